//! Projection UTM (Universal Transverse Mercator)
//!
//! Équations de Snyder (USGS Professional Paper 1395, "Map Projections - A
//! Working Manual"), séries tronquées à l'ordre 6 dans les deux sens.

use tracing::{trace, warn};

use crate::ellipsoid::Ellipsoid;
use crate::types::{BoundingBox, Hemisphere, LatLon, Unprojected, UtmCoordinate};
use crate::zone::{self, normalize_longitude};
use crate::UsngError;

/// Facteur d'échelle sur le méridien central
pub const K0: f64 = 0.9996;

/// False easting
pub const EASTING_OFFSET: f64 = 500_000.0;

/// False northing de l'hémisphère sud
pub const NORTHING_OFFSET: f64 = 10_000_000.0;

/// Au-delà de cette précision, l'emprise est lue dans les tables de bandes/zones
///
/// Une précision nulle ou négative ne désigne aucune cellule : `unproject`
/// retourne alors le point seul.
pub const MAX_PROJECTED_ACCURACY: f64 = 100_000.0;

/// Convertit des coordonnées géographiques en UTM
///
/// Le northing est signé (négatif dans l'hémisphère sud). `forced_zone` impose
/// le calcul dans une zone donnée au lieu de la zone du point.
///
/// Retourne `Ok(None)` hors de la couverture de la grille (lat hors de [-80, 84]).
///
/// # Errors
///
/// `UsngError::InputRange` si `lat` est hors de [-90, 90] ou `lon` hors de [-180, 360],
/// `UsngError::InvalidZone` si la zone imposée est hors de 1..=60.
pub fn project(
    lat: f64,
    lon: f64,
    ellipsoid: &Ellipsoid,
    forced_zone: Option<u8>,
) -> Result<Option<UtmCoordinate>, UsngError> {
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=360.0).contains(&lon) {
        return Err(UsngError::input_range(lat, lon));
    }

    if !(-80.0..=84.0).contains(&lat) {
        trace!(lat, lon, "latitude outside UTM grid coverage");
        return Ok(None);
    }

    let zone = match forced_zone {
        Some(z) if !(1..=60).contains(&z) => return Err(UsngError::InvalidZone(z)),
        Some(z) => z,
        None => zone::zone_number(lat, lon)?,
    };

    let a = ellipsoid.equatorial_radius;
    let e2 = ellipsoid.eccentricity_squared;
    let ep2 = ellipsoid.eccentricity_prime_squared();

    let lat_rad = lat.to_radians();
    let lon_rad = normalize_longitude(lon).to_radians();
    let lon0 = zone::central_meridian(zone).to_radians();

    let sin_lat = lat_rad.sin();
    let cos_lat = lat_rad.cos();
    let tan_lat = lat_rad.tan();

    let n = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
    let t = tan_lat * tan_lat;
    let c = ep2 * cos_lat * cos_lat;
    let aa = cos_lat * (lon_rad - lon0);

    // Longueur de l'arc de méridien (M0 = 0 pour UTM)
    let m = a
        * ((1.0 - e2 / 4.0 - 3.0 * e2.powi(2) / 64.0 - 5.0 * e2.powi(3) / 256.0) * lat_rad
            - (3.0 * e2 / 8.0 + 3.0 * e2.powi(2) / 32.0 + 45.0 * e2.powi(3) / 1024.0)
                * (2.0 * lat_rad).sin()
            + (15.0 * e2.powi(2) / 256.0 + 45.0 * e2.powi(3) / 1024.0) * (4.0 * lat_rad).sin()
            - (35.0 * e2.powi(3) / 3072.0) * (6.0 * lat_rad).sin());

    let easting = K0
        * n
        * (aa
            + (1.0 - t + c) * aa.powi(3) / 6.0
            + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * aa.powi(5) / 120.0)
        + EASTING_OFFSET;

    let northing = K0
        * (m + n
            * tan_lat
            * (aa.powi(2) / 2.0
                + (5.0 - t + 9.0 * c + 4.0 * c * c) * aa.powi(4) / 24.0
                + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * aa.powi(6) / 720.0));

    Ok(Some(UtmCoordinate {
        easting,
        northing,
        zone,
        band: Some(zone::band_letter(lat)),
        hemisphere: None,
    }))
}

/// Comme [`project`], avec un northing toujours positif et l'hémisphère explicite
pub fn project_with_hemisphere(
    lat: f64,
    lon: f64,
    ellipsoid: &Ellipsoid,
    forced_zone: Option<u8>,
) -> Result<Option<UtmCoordinate>, UsngError> {
    Ok(project(lat, lon, ellipsoid, forced_zone)?.map(|mut utm| {
        if utm.northing < 0.0 {
            utm.northing += NORTHING_OFFSET;
            utm.hemisphere = Some(Hemisphere::South);
        } else {
            utm.hemisphere = Some(Hemisphere::North);
        }
        utm
    }))
}

/// Projection inverse d'un point (northing signé)
fn inverse_point(northing: f64, easting: f64, zone: u8, ellipsoid: &Ellipsoid) -> LatLon {
    let a = ellipsoid.equatorial_radius;
    let e2 = ellipsoid.eccentricity_squared;
    let ep2 = ellipsoid.eccentricity_prime_squared();
    let e1 = (1.0 - (1.0 - e2).sqrt()) / (1.0 + (1.0 - e2).sqrt());

    let x = easting - EASTING_OFFSET;
    let y = northing;
    let lon0 = zone::central_meridian(zone);

    // Latitude "footprint" sur le méridien central
    let m = y / K0;
    let mu = m / (a * (1.0 - e2 / 4.0 - 3.0 * e2.powi(2) / 64.0 - 5.0 * e2.powi(3) / 256.0));

    let phi1 = mu
        + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
        + (21.0 * e1.powi(2) / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
        + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin();

    let sin_phi1 = phi1.sin();
    let cos_phi1 = phi1.cos();
    let tan_phi1 = phi1.tan();

    let n1 = a / (1.0 - e2 * sin_phi1.powi(2)).sqrt();
    let t1 = tan_phi1.powi(2);
    let c1 = ep2 * cos_phi1.powi(2);
    let r1 = a * (1.0 - e2) / (1.0 - e2 * sin_phi1.powi(2)).powf(1.5);
    let d = x / (n1 * K0);

    let lat = phi1
        - (n1 * tan_phi1 / r1)
            * (d.powi(2) / 2.0
                - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1.powi(2) - 9.0 * ep2) * d.powi(4) / 24.0
                + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1.powi(2)
                    - 252.0 * ep2
                    - 3.0 * c1.powi(2))
                    * d.powi(6)
                    / 720.0);
    let mut lat = lat.to_degrees();

    // Évite une bande ambiguë exactement sur l'équateur
    if lat == 0.0 {
        lat = 0.001;
    }

    let lon = (d - (1.0 + 2.0 * t1 + c1) * d.powi(3) / 6.0
        + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1.powi(2) + 8.0 * ep2 + 24.0 * t1.powi(2))
            * d.powi(5)
            / 120.0)
        / cos_phi1;
    let lon = lon0 + lon.to_degrees();

    LatLon::new(lat, lon)
}

/// Convertit des coordonnées UTM en géographiques
///
/// Le northing est signé (négatif au sud). Sans `accuracy`, retourne un point.
/// Avec `accuracy` ≤ 100 000 m, retourne la cellule dont le point est le coin
/// sud-ouest et dont le coin nord-est est décalé de `accuracy` sur les deux axes.
/// Au-delà, retourne l'emprise de la bande et de la zone lue dans les tables.
/// Une `accuracy` nulle, négative ou NaN est traitée comme absente.
pub fn unproject(
    northing: f64,
    easting: f64,
    zone: u8,
    accuracy: Option<f64>,
    ellipsoid: &Ellipsoid,
) -> Unprojected {
    let point = inverse_point(northing, easting, zone, ellipsoid);

    match accuracy {
        Some(acc) if acc > 0.0 && acc <= MAX_PROJECTED_ACCURACY => {
            let north_east = inverse_point(northing + acc, easting + acc, zone, ellipsoid);
            Unprojected::Bounds(BoundingBox {
                north: north_east.lat,
                south: point.lat,
                east: north_east.lon,
                west: point.lon,
            })
        }
        Some(acc) if acc > MAX_PROJECTED_ACCURACY => {
            cell_bounds(zone, zone::band_letter(point.lat))
        }
        _ => Unprojected::Point(point),
    }
}

/// Comme [`unproject`], pour un northing décalé accompagné de son hémisphère
pub fn unproject_with_hemisphere(
    northing: f64,
    easting: f64,
    zone: u8,
    hemisphere: Hemisphere,
    accuracy: Option<f64>,
    ellipsoid: &Ellipsoid,
) -> Unprojected {
    let northing = match hemisphere {
        Hemisphere::South => northing - NORTHING_OFFSET,
        Hemisphere::North => northing,
    };
    unproject(northing, easting, zone, accuracy, ellipsoid)
}

/// Emprise d'une cellule zone × bande lue dans les tables
///
/// Approximation grossière, indépendante de la géométrie de la projection.
pub fn cell_bounds(zone: u8, band: char) -> Unprojected {
    let (west, east) = zone::zone_longitudes(zone);
    match zone::band_latitudes(band) {
        Some((south, north)) => Unprojected::Bounds(BoundingBox {
            north,
            south,
            east,
            west,
        }),
        None => {
            warn!(zone, band = %band, "unknown latitude band, only zone longitudes resolved");
            Unprojected::ZoneOnly { east, west }
        }
    }
}
