//! Décodage référence USNG/MGRS → UTM → lat/lon

use tracing::trace;

use super::reference::GridReference;
use super::tables::{absolute_northing, band_base_northing, column_easting, row_northing};
use crate::ellipsoid::Ellipsoid;
use crate::types::{Hemisphere, Unprojected, UtmCoordinate};
use crate::utm::{self, EASTING_OFFSET};
use crate::ParseError;

/// Demi-hauteur approximative d'une bande, pour viser son milieu
const HALF_BAND_NORTHING: u32 = 499_600;

/// Reconstruit la coordonnée UTM du coin sud-ouest de la cellule
///
/// Le northing retourné porte le décalage de 10 000 000 m au sud (bandes C..M),
/// `hemisphere` l'indique. Une référence sans carré vise le milieu de la bande
/// sur le méridien central.
///
/// # Errors
///
/// Erreurs de [`GridReference::validate`] pour une référence construite champ
/// par champ (lettres hors table, valeurs plus longues que `digits`).
pub fn grid_to_utm(reference: &GridReference) -> Result<UtmCoordinate, ParseError> {
    reference.validate()?;

    let band = reference.band;
    let base = band_base_northing(band).ok_or(ParseError::UnknownBand(band))?;

    let (easting, northing) = match reference.square {
        None => (EASTING_OFFSET, f64::from(base + HALF_BAND_NORTHING)),
        Some((column, row)) => {
            let column_base =
                column_easting(column).ok_or(ParseError::InvalidSquareLetter(column))?;
            let cycle_northing =
                row_northing(reference.zone, row).ok_or(ParseError::InvalidSquareLetter(row))?;
            let row_base =
                absolute_northing(cycle_northing, band).ok_or(ParseError::UnknownBand(band))?;

            let scale = 10u32.pow(u32::from(5 - reference.digits));
            (
                f64::from(column_base + reference.easting * scale),
                f64::from(row_base + reference.northing * scale),
            )
        }
    };

    let hemisphere = if band < 'N' {
        Hemisphere::South
    } else {
        Hemisphere::North
    };

    trace!(
        zone = reference.zone,
        band = %band,
        easting,
        northing,
        "grid reference resolved to UTM"
    );

    Ok(UtmCoordinate {
        easting,
        northing,
        zone: reference.zone,
        band: Some(band),
        hemisphere: Some(hemisphere),
    })
}

/// Décode une référence en point ou en cellule
///
/// Avec `want_point`, retourne le coin sud-ouest de la cellule. Sinon retourne la
/// cellule de la précision de la référence (100 000 / 10^chiffres mètres de côté),
/// ou l'emprise zone × bande pour une référence sans carré.
pub fn decode(
    reference: &GridReference,
    want_point: bool,
    ellipsoid: &Ellipsoid,
) -> Result<Unprojected, ParseError> {
    let utm = grid_to_utm(reference)?;
    let hemisphere = utm.hemisphere.unwrap_or(Hemisphere::North);
    let cell = reference.precision().cell_size();

    if !want_point && cell.is_none() {
        return Ok(utm::cell_bounds(reference.zone, reference.band));
    }

    let accuracy = if want_point { None } else { cell };
    Ok(utm::unproject_with_hemisphere(
        utm.northing,
        utm.easting,
        utm.zone,
        hemisphere,
        accuracy,
        ellipsoid,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::parser::parse_grid_string;
    use crate::types::BoundingBox;

    const WGS84: Ellipsoid = Ellipsoid::WGS84;

    fn reference(s: &str) -> GridReference {
        parse_grid_string(s).unwrap()
    }

    #[test]
    fn test_grid_to_utm_washington() {
        let utm = grid_to_utm(&reference("18S UJ 2348 0647")).unwrap();
        assert_eq!(utm.easting, 323_480.0);
        assert_eq!(utm.northing, 4_306_470.0);
        assert_eq!(utm.zone, 18);
        assert_eq!(utm.hemisphere, Some(Hemisphere::North));
    }

    #[test]
    fn test_grid_to_utm_southern() {
        let utm = grid_to_utm(&reference("56H LH 34901 52289")).unwrap();
        assert_eq!(utm.easting, 334_901.0);
        assert_eq!(utm.northing, 6_252_289.0);
        assert_eq!(utm.hemisphere, Some(Hemisphere::South));
    }

    #[test]
    fn test_grid_to_utm_zone_only() {
        let utm = grid_to_utm(&reference("18S")).unwrap();
        assert_eq!(utm.easting, 500_000.0);
        assert_eq!(utm.northing, 3_999_600.0);
    }

    #[test]
    fn test_grid_to_utm_unknown_letters() {
        let mut r = reference("18S UJ");
        r.band = 'Z';
        assert_eq!(grid_to_utm(&r), Err(ParseError::UnknownBand('Z')));

        let mut r = reference("18S UJ");
        r.square = Some(('U', 'W'));
        assert_eq!(grid_to_utm(&r), Err(ParseError::InvalidSquareLetter('W')));
    }

    #[test]
    fn test_oversized_values_rejected() {
        let r = GridReference {
            easting: 100_000,
            digits: 0,
            ..reference("18S UJ")
        };
        assert_eq!(grid_to_utm(&r), Err(ParseError::TooManyDigits(6)));
        assert_eq!(decode(&r, true, &WGS84), Err(ParseError::TooManyDigits(6)));

        let r = GridReference {
            digits: 12,
            ..reference("18S UJ 2348 0647")
        };
        assert_eq!(decode(&r, false, &WGS84), Err(ParseError::TooManyDigits(12)));
    }

    #[test]
    fn test_decode_point() {
        let p = decode(&reference("18S UJ 2348 0647"), true, &WGS84)
            .unwrap()
            .as_point()
            .unwrap();
        assert!((p.lat - 38.889381).abs() < 1e-5, "lat={}", p.lat);
        assert!((p.lon - (-77.035274)).abs() < 1e-5, "lon={}", p.lon);
    }

    #[test]
    fn test_decode_cell() {
        let b = decode(&reference("18S UJ 2348 0647"), false, &WGS84)
            .unwrap()
            .as_bounds()
            .unwrap();
        assert!((b.south - 38.889381).abs() < 1e-5, "south={}", b.south);
        assert!((b.north - 38.889473).abs() < 1e-5, "north={}", b.north);
        assert!((b.west - (-77.035274)).abs() < 1e-5, "west={}", b.west);
        assert!((b.east - (-77.035162)).abs() < 1e-5, "east={}", b.east);
    }

    #[test]
    fn test_decode_square_only() {
        let b = decode(&reference("18S UJ"), false, &WGS84)
            .unwrap()
            .as_bounds()
            .unwrap();
        assert!((b.south - 38.826093).abs() < 1e-5, "south={}", b.south);
        assert!((b.north - 39.744040).abs() < 1e-5, "north={}", b.north);
    }

    #[test]
    fn test_decode_zone_only() {
        let b = decode(&reference("18S"), false, &WGS84).unwrap();
        assert_eq!(
            b,
            Unprojected::Bounds(BoundingBox {
                north: 40.0,
                south: 32.0,
                east: -72.0,
                west: -78.0,
            })
        );

        let p = decode(&reference("18S"), true, &WGS84)
            .unwrap()
            .as_point()
            .unwrap();
        assert!((32.0..40.0).contains(&p.lat), "lat={}", p.lat);
        assert!((p.lon - (-75.0)).abs() < 1e-9, "lon={}", p.lon);
    }

    #[test]
    fn test_decode_equator() {
        let p = decode(&reference("31N AA 66021 00000"), true, &WGS84)
            .unwrap()
            .as_point()
            .unwrap();
        assert_eq!(p.lat, 0.001);
        assert!(p.lon.abs() < 1e-4, "lon={}", p.lon);
    }
}
