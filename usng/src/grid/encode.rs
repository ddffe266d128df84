//! Encodage lat/lon → référence USNG/MGRS

use super::precision::Precision;
use super::reference::GridReference;
use super::tables::{square_id, BLOCK_SIZE};
use crate::ellipsoid::Ellipsoid;
use crate::utm::{self, NORTHING_OFFSET};
use crate::zone;
use crate::UsngError;

/// Encode un point en référence de grille à la précision demandée
///
/// Les chiffres sont tronqués, jamais arrondis : "18S UJ 2348 0647" désigne la
/// cellule de 10 m dont le coin sud-ouest est à 23 480 m E, 06 470 m N du carré UJ.
///
/// # Errors
///
/// `UsngError::InputRange` pour une latitude ou longitude invalide,
/// `UsngError::OutsideGridCoverage` hors de [-80, 84] de latitude.
pub fn encode(
    lat: f64,
    lon: f64,
    precision: Precision,
    ellipsoid: &Ellipsoid,
) -> Result<GridReference, UsngError> {
    let lon = if lon < -180.0 {
        lon + 360.0
    } else if lon > 180.0 {
        lon - 360.0
    } else {
        lon
    };

    let utm = utm::project(lat, lon, ellipsoid, None)?
        .ok_or(UsngError::OutsideGridCoverage { lat })?;

    let northing = if lat < 0.0 {
        utm.northing + NORTHING_OFFSET
    } else {
        utm.northing
    };

    // Au mètre près avant tout découpage
    let easting = utm.easting.round() as u32;
    let northing = northing.round() as u32;

    let band = zone::band_letter(lat);

    if precision == Precision::SixByEightDegrees {
        return Ok(GridReference {
            zone: utm.zone,
            band,
            square: None,
            easting: 0,
            northing: 0,
            digits: 0,
        });
    }

    let digits = precision.digits();
    let divisor = 10u32.pow(u32::from(5 - digits));
    let block = BLOCK_SIZE as u32;

    Ok(GridReference {
        zone: utm.zone,
        band,
        square: Some(square_id(utm.zone, easting, northing)),
        easting: (easting % block) / divisor,
        northing: (northing % block) / divisor,
        digits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const WGS84: Ellipsoid = Ellipsoid::WGS84;

    fn usng(lat: f64, lon: f64, level: u8) -> String {
        encode(lat, lon, Precision::from_level(level), &WGS84)
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_washington_monument() {
        assert_eq!(usng(38.8895, -77.0353, 6), "18S UJ 23478 06483");
        assert_eq!(usng(38.8895, -77.0353, 5), "18S UJ 2347 0648");
        assert_eq!(usng(38.8895, -77.0353, 3), "18S UJ 23 06");
    }

    #[test]
    fn test_all_levels() {
        let expected = [
            "18S",
            "18S UJ",
            "18S UJ 2 0",
            "18S UJ 23 07",
            "18S UJ 233 073",
            "18S UJ 2339 0739",
            "18S UJ 23394 07396",
        ];
        for (level, want) in expected.iter().enumerate() {
            assert_eq!(usng(38.8977, -77.0365, level as u8), *want, "level {}", level);
        }
    }

    #[test]
    fn test_southern_hemisphere() {
        assert_eq!(usng(-33.8568, 151.2153, 6), "56H LH 34901 52289");
    }

    #[test]
    fn test_equator_origin() {
        assert_eq!(usng(0.0, 0.0, 6), "31N AA 66021 00000");
        assert_eq!(usng(0.0, 0.0, 1), "31N AA");
    }

    #[test]
    fn test_special_zones() {
        assert_eq!(usng(61.0, 5.0, 4), "32V KN 837 693");
        assert_eq!(usng(75.0, 10.0, 3), "33X UD 55 29");
        assert_eq!(usng(83.9, -10.0, 1), "29X MP");
    }

    #[test]
    fn test_longitude_folding() {
        assert_eq!(usng(38.8977, 282.9635, 6), usng(38.8977, -77.0365, 6));
    }

    #[test]
    fn test_outside_coverage() {
        assert_eq!(
            encode(85.0, 0.0, Precision::OneMeter, &WGS84),
            Err(UsngError::OutsideGridCoverage { lat: 85.0 })
        );
        assert!(matches!(
            encode(95.0, 0.0, Precision::OneMeter, &WGS84),
            Err(UsngError::InputRange { .. })
        ));
    }
}
