//! Réduction d'une emprise à un point et une précision
//!
//! Ajustement grossier : le centre de l'emprise est encodé à une précision
//! choisie d'après la plus grande de ses deux dimensions (hauteur, largeur).

use crate::grid::Precision;
use crate::types::LatLon;

/// Rayon terrestre moyen en mètres
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// Distance orthodromique (haversine) entre deux points, en mètres
pub fn distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    EARTH_RADIUS * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

fn haversine_arc(a: f64) -> f64 {
    EARTH_RADIUS * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Emprise ramenée à son centre et à la précision correspondante
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsQuery {
    /// Centre, écarté des pôles et de l'antiméridien
    pub center: LatLon,
    /// Plus grande dimension de l'emprise, en mètres
    pub extent: f64,
}

impl BoundsQuery {
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        let lat = (north + south) / 2.0;
        let lon = (east + west) / 2.0;

        let lat = if lat >= 90.0 {
            89.9
        } else if lat <= -90.0 {
            -89.9
        } else {
            lat
        };
        let lon = if lon >= 180.0 {
            179.9
        } else if lon <= -180.0 {
            -179.9
        } else {
            lon
        };

        let phi1 = north.to_radians();
        let phi2 = south.to_radians();
        let delta_phi = (south - north).to_radians();
        let delta_lambda = (west - east).to_radians();

        let height = haversine_arc((delta_phi / 2.0).sin().powi(2));
        let width = haversine_arc(phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2));

        // Emprise à cheval sur l'antiméridien : le centre est à 180°
        let crosses_antimeridian = (east > 90.0 || east < -90.0) && (west > 90.0 || west < -90.0);
        let lon = if lon == 0.0 && crosses_antimeridian {
            180.0
        } else {
            lon
        };

        Self {
            center: LatLon::new(lat, lon),
            extent: height.max(width),
        }
    }

    pub fn precision(&self) -> Precision {
        Precision::from_extent(self.extent)
    }
}
