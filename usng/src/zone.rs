//! Résolution de la zone UTM et de la bande de latitude
//!
//! Les zones font 6° de large (1 à 60 sur [-180, 180)), avec les exceptions
//! de la côte ouest norvégienne et du Svalbard. Les bandes font 8° de haut,
//! de C (-80°) à X (72°..84°), sans I ni O.

use crate::types::GridZone;
use crate::UsngError;

/// Lettres des bandes de latitude, du sud au nord
pub const BAND_LETTERS: &str = "CDEFGHJKLMNPQRSTUVWX";

/// Lettre renvoyée hors de la couverture de la grille
pub const OUT_OF_GRID_BAND: char = 'Z';

/// Latitudes (sud, nord) de chaque bande. M et N s'arrêtent à ±0.01°.
const BAND_LATITUDES: [(char, f64, f64); 20] = [
    ('C', -80.0, -72.0),
    ('D', -72.0, -64.0),
    ('E', -64.0, -56.0),
    ('F', -56.0, -48.0),
    ('G', -48.0, -40.0),
    ('H', -40.0, -32.0),
    ('J', -32.0, -24.0),
    ('K', -24.0, -16.0),
    ('L', -16.0, -8.0),
    ('M', -8.0, -0.01),
    ('N', 0.01, 8.0),
    ('P', 8.0, 16.0),
    ('Q', 16.0, 24.0),
    ('R', 24.0, 32.0),
    ('S', 32.0, 40.0),
    ('T', 40.0, 48.0),
    ('U', 48.0, 56.0),
    ('V', 56.0, 64.0),
    ('W', 64.0, 72.0),
    ('X', 72.0, 84.0),
];

/// Ramène une longitude de [-180, 360] dans [-180, 180)
pub fn normalize_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

fn check_range(lat: f64, lon: f64) -> Result<(), UsngError> {
    if !(-180.0..=360.0).contains(&lon) || !(-80.0..=84.0).contains(&lat) {
        return Err(UsngError::input_range(lat, lon));
    }
    Ok(())
}

/// Numéro de zone UTM (1..=60) d'un point
///
/// # Errors
///
/// `UsngError::InputRange` si `lon` est hors de [-180, 360] ou `lat` hors de [-80, 84].
pub fn zone_number(lat: f64, lon: f64) -> Result<u8, UsngError> {
    check_range(lat, lon)?;

    let lon = normalize_longitude(lon);
    let base = ((lon + 180.0) / 6.0).floor() as u8 + 1;

    // Côte ouest de la Norvège
    if (56.0..64.0).contains(&lat) && (3.0..12.0).contains(&lon) {
        return Ok(32);
    }

    // Svalbard
    if (72.0..84.0).contains(&lat) {
        let svalbard = if (0.0..9.0).contains(&lon) {
            Some(31)
        } else if (9.0..21.0).contains(&lon) {
            Some(33)
        } else if (21.0..33.0).contains(&lon) {
            Some(35)
        } else if (33.0..42.0).contains(&lon) {
            Some(37)
        } else {
            None
        };
        if let Some(zone) = svalbard {
            return Ok(zone);
        }
    }

    Ok(base)
}

/// Lettre de bande de latitude, ou `'Z'` hors de [-80, 84]
pub fn band_letter(lat: f64) -> char {
    if !(-80.0..=84.0).contains(&lat) {
        return OUT_OF_GRID_BAND;
    }

    let mut index = (lat + 80.0) / 8.0;
    if index >= 6.0 {
        index += 1.0; // I
    }
    if index >= 12.0 {
        index += 1.0; // O
    }
    if index >= 22.0 {
        index -= 1.0; // 80..84 reste en X
    }

    char::from(b'C' + index as u8)
}

/// Zone et bande d'un point
pub fn resolve_zone(lat: f64, lon: f64) -> Result<GridZone, UsngError> {
    Ok(GridZone {
        number: zone_number(lat, lon)?,
        band: band_letter(lat),
    })
}

/// Position d'une bande dans `BAND_LETTERS`
pub fn band_index(band: char) -> Option<usize> {
    BAND_LETTERS.find(band)
}

/// Latitudes (sud, nord) d'une bande
pub fn band_latitudes(band: char) -> Option<(f64, f64)> {
    BAND_LATITUDES
        .iter()
        .find(|(letter, _, _)| *letter == band)
        .map(|&(_, south, north)| (south, north))
}

/// Longitudes (ouest, est) d'une zone
pub fn zone_longitudes(zone: u8) -> (f64, f64) {
    let east = -180.0 + 6.0 * f64::from(zone);
    (east - 6.0, east)
}

/// Méridien central d'une zone, en degrés
pub fn central_meridian(zone: u8) -> f64 {
    f64::from(zone) * 6.0 - 180.0 - 3.0
}
