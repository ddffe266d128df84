//! Tests d'intégration sur l'API publique du crate usng

use usng::zone::{band_latitudes, band_letter, zone_number};
use usng::{
    distance_meters, BoundingBox, Converter, Datum, GridReference, Precision, Unprojected,
    UsngError,
};

/// Balayage déterministe de la couverture de la grille
fn sweep() -> impl Iterator<Item = (f64, f64)> {
    (0..67).flat_map(|i| {
        let lat = -79.5 + 2.45 * f64::from(i);
        (0..74).map(move |j| (lat, -179.5 + 4.85 * f64::from(j)))
    })
}

#[test]
fn test_roundtrip_within_one_meter() {
    let converter = Converter::default();
    let mut worst = 0.0_f64;

    for (lat, lon) in sweep() {
        let usng = converter.encode(lat, lon, 6).unwrap();
        let point = converter
            .decode(&usng, true)
            .and_then(|r| r.as_point())
            .unwrap_or_else(|| panic!("decode failed for {usng}"));

        let d = distance_meters(lat, lon, point.lat, point.lon);
        worst = worst.max(d);
        assert!(d < 1.0, "{usng} ({lat}, {lon}) decoded {d:.3} m away");
    }

    println!("worst round trip error: {worst:.3} m");
}

#[test]
fn test_mgrs_and_usng_decode_alike() {
    let converter = Converter::default();
    for (lat, lon) in sweep().step_by(37) {
        let usng = converter.encode(lat, lon, 5).unwrap();
        let mgrs = converter.encode_mgrs(lat, lon, 5).unwrap();
        assert_eq!(usng.replace(' ', ""), mgrs);
        assert_eq!(converter.decode(&usng, false), converter.decode(&mgrs, false));
    }
}

#[test]
fn test_truncation_matches_coarser_encoding() {
    let converter = Converter::default();
    for (lat, lon) in sweep().step_by(7) {
        let fine = converter
            .encode_reference(lat, lon, Precision::OneMeter)
            .unwrap();
        for level in 0..=6 {
            let precision = Precision::from_level(level);
            let coarse = converter.encode_reference(lat, lon, precision).unwrap();
            assert_eq!(fine.truncate(precision), coarse, "({lat}, {lon}) level {level}");
        }
    }
}

#[test]
fn test_strict_parse_accepts_encoder_output() {
    let converter = Converter::default();
    for (lat, lon) in sweep().step_by(13) {
        let reference = converter
            .encode_reference(lat, lon, Precision::TenMeters)
            .unwrap();
        let parsed: GridReference = reference.to_string().parse().unwrap();
        assert_eq!(parsed, reference);
        let parsed: GridReference = reference.to_mgrs().parse().unwrap();
        assert_eq!(parsed, reference);
    }
}

#[test]
fn test_zone_numbers_increase_eastward() {
    // Hors Norvège et Svalbard
    for lat in [-75.0, -30.0, 0.5, 45.0, 70.0] {
        let mut previous = 0;
        for step in 0..3600 {
            let lon = -180.0 + 0.1 * f64::from(step);
            let zone = zone_number(lat, lon).unwrap();
            assert!((1..=60).contains(&zone));
            assert!(zone >= previous, "zone decreased at ({lat}, {lon})");
            previous = zone;
        }
        assert_eq!(previous, 60);
    }
}

#[test]
fn test_bands_cover_grid() {
    for step in 0..1640 {
        let lat = -79.95 + 0.1 * f64::from(step);
        let band = band_letter(lat);
        assert_ne!(band, 'I');
        assert_ne!(band, 'O');
        let (south, north) = band_latitudes(band).unwrap();
        // M et N s'arrêtent à 0.01° de l'équateur
        assert!(
            lat >= south - 0.011 && lat <= north,
            "{lat} not in band {band} ({south}..{north})"
        );
    }
    assert_eq!(band_letter(-80.5), 'Z');
    assert_eq!(band_letter(84.5), 'Z');
}

#[test]
fn test_known_references() {
    let converter = Converter::default();
    let cases = [
        (38.8895, -77.0353, 5, "18S UJ 2347 0648"),
        (38.8977, -77.0365, 6, "18S UJ 23394 07396"),
        (-33.8568, 151.2153, 6, "56H LH 34901 52289"),
        (0.0, 0.0, 6, "31N AA 66021 00000"),
        (61.0, 5.0, 4, "32V KN 837 693"),
        (75.0, 10.0, 3, "33X UD 55 29"),
    ];
    for (lat, lon, level, want) in cases {
        assert_eq!(converter.encode(lat, lon, level).unwrap(), want);
    }
}

#[test]
fn test_errors() {
    let converter = Converter::default();
    assert!(matches!(
        converter.encode(91.0, 0.0, 6),
        Err(UsngError::InputRange { .. })
    ));
    assert_eq!(
        converter.encode(-85.0, 0.0, 6),
        Err(UsngError::OutsideGridCoverage { lat: -85.0 })
    );
    assert_eq!(converter.to_utm(-85.0, 0.0, None), Ok(None));
    assert_eq!(
        converter.to_utm(10.0, 10.0, Some(61)),
        Err(UsngError::InvalidZone(61))
    );
    assert!(converter.decode("garbage", true).is_none());
    assert!(converter.decode("18S UJ 123456 123456", true).is_none());
}

#[test]
fn test_zone_only_decode() {
    let converter = Converter::default();
    let cell = converter.decode("18S", false).unwrap();
    assert_eq!(
        cell,
        Unprojected::Bounds(BoundingBox {
            north: 40.0,
            south: 32.0,
            east: -72.0,
            west: -78.0,
        })
    );
}

#[test]
fn test_nad27_differs_from_nad83() {
    let nad83 = Converter::default();
    let nad27 = Converter::with_datum(Datum::Nad27);
    let a = nad83.to_utm(38.8977, -77.0365, None).unwrap().unwrap();
    let b = nad27.to_utm(38.8977, -77.0365, None).unwrap().unwrap();
    // Quelques dizaines de mètres en northing entre les deux ellipsoïdes
    assert!((a.northing - b.northing).abs() > 10.0);
    assert!((a.northing - b.northing).abs() < 500.0);
}

#[test]
fn test_converter_shared_between_threads() {
    let converter = Converter::default();
    let results: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let converter = &converter;
                scope.spawn(move || converter.encode(38.8977, -77.0365, 6).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(results.iter().all(|r| r == "18S UJ 23394 07396"));
}
