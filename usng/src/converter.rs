//! Convertisseur lié à un datum
//!
//! Toutes les conversions d'un `Converter` utilisent l'ellipsoïde fixé à sa
//! construction.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bounds::BoundsQuery;
use crate::ellipsoid::{Datum, Ellipsoid};
use crate::grid::{self, GridReference, Precision};
use crate::types::{Hemisphere, LatLon, Unprojected, UtmCoordinate};
use crate::{utm, zone, UsngError};

/// Suffixe ajouté par [`Converter::encode_nad27`]
pub const NAD27_SUFFIX: &str = " (NAD27)";

/// Options de construction d'un convertisseur
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterOptions {
    #[serde(default)]
    pub datum: Datum,
}

/// Convertisseur lat/lon ↔ UTM ↔ USNG/MGRS
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Converter {
    datum: Datum,
    ellipsoid: Ellipsoid,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConverterOptions::default())
    }
}

impl Converter {
    pub fn new(options: ConverterOptions) -> Self {
        Self::with_datum(options.datum)
    }

    pub fn with_datum(datum: Datum) -> Self {
        Self {
            datum,
            ellipsoid: datum.ellipsoid(),
        }
    }

    pub fn datum(&self) -> Datum {
        self.datum
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    /// Numéro de zone UTM d'un point
    pub fn zone_number(&self, lat: f64, lon: f64) -> Result<u8, UsngError> {
        zone::zone_number(lat, lon)
    }

    /// Lettre de bande d'une latitude (`'Z'` hors grille)
    pub fn band_letter(&self, lat: f64) -> char {
        zone::band_letter(lat)
    }

    /// Lat/lon → UTM, northing signé. `None` hors de la couverture de la grille.
    pub fn to_utm(
        &self,
        lat: f64,
        lon: f64,
        zone: Option<u8>,
    ) -> Result<Option<UtmCoordinate>, UsngError> {
        utm::project(lat, lon, &self.ellipsoid, zone)
    }

    /// Lat/lon → UTM, northing positif et hémisphère explicite
    pub fn to_utm_with_hemisphere(
        &self,
        lat: f64,
        lon: f64,
        zone: Option<u8>,
    ) -> Result<Option<UtmCoordinate>, UsngError> {
        utm::project_with_hemisphere(lat, lon, &self.ellipsoid, zone)
    }

    /// UTM (northing signé) → point, ou cellule si `accuracy` est fourni
    pub fn from_utm(
        &self,
        northing: f64,
        easting: f64,
        zone: u8,
        accuracy: Option<f64>,
    ) -> Unprojected {
        utm::unproject(northing, easting, zone, accuracy, &self.ellipsoid)
    }

    /// UTM (northing décalé au sud) → point, ou cellule si `accuracy` est fourni
    pub fn from_utm_with_hemisphere(
        &self,
        northing: f64,
        easting: f64,
        zone: u8,
        hemisphere: Hemisphere,
        accuracy: Option<f64>,
    ) -> Unprojected {
        utm::unproject_with_hemisphere(northing, easting, zone, hemisphere, accuracy, &self.ellipsoid)
    }

    /// Référence de grille structurée d'un point
    pub fn encode_reference(
        &self,
        lat: f64,
        lon: f64,
        precision: Precision,
    ) -> Result<GridReference, UsngError> {
        grid::encode(lat, lon, precision, &self.ellipsoid)
    }

    /// Chaîne USNG d'un point
    ///
    /// `precision` : 0 = zone et bande, 1 = carré de 100 km, 2..=6 = 1 à 5 chiffres
    /// par coordonnée. Les valeurs supérieures à 6 sont ramenées à 6.
    pub fn encode(&self, lat: f64, lon: f64, precision: u8) -> Result<String, UsngError> {
        self.encode_reference(lat, lon, Precision::from_level(precision))
            .map(|r| r.to_string())
    }

    /// Chaîne MGRS (USNG sans espaces) d'un point
    pub fn encode_mgrs(&self, lat: f64, lon: f64, precision: u8) -> Result<String, UsngError> {
        self.encode_reference(lat, lon, Precision::from_level(precision))
            .map(|r| r.to_mgrs())
    }

    /// Chaîne USNG du centre d'une emprise, à une précision déduite de sa taille
    pub fn encode_bounds(
        &self,
        north: f64,
        south: f64,
        east: f64,
        west: f64,
    ) -> Result<String, UsngError> {
        let query = BoundsQuery::new(north, south, east, west);
        debug!(
            lat = query.center.lat,
            lon = query.center.lon,
            extent = query.extent,
            "encoding bounding box center"
        );
        self.encode_reference(query.center.lat, query.center.lon, query.precision())
            .map(|r| r.to_string())
    }

    /// Chaîne USNG sur l'ellipsoïde NAD27, suffixée par `" (NAD27)"`
    ///
    /// Indépendant du datum du convertisseur.
    pub fn encode_nad27(lat: f64, lon: f64, precision: u8) -> Result<String, UsngError> {
        let usng = Self::with_datum(Datum::Nad27).encode(lat, lon, precision)?;
        Ok(format!("{usng}{NAD27_SUFFIX}"))
    }

    /// Chaîne USNG/MGRS → UTM (coin sud-ouest, northing décalé au sud)
    pub fn grid_to_utm(&self, input: &str) -> Option<UtmCoordinate> {
        let reference = parse_or_log(input)?;
        grid::grid_to_utm(&reference)
            .map_err(|e| debug!(input, error = %e, "grid reference rejected"))
            .ok()
    }

    /// Chaîne USNG/MGRS → lat/lon
    ///
    /// Avec `want_point`, retourne un point ; sinon la cellule désignée par la
    /// référence. Une chaîne mal formée donne `None` plutôt qu'une erreur.
    pub fn decode(&self, input: &str, want_point: bool) -> Option<Unprojected> {
        let reference = parse_or_log(input)?;
        grid::decode(&reference, want_point, &self.ellipsoid)
            .map_err(|e| debug!(input, error = %e, "grid reference rejected"))
            .ok()
    }

    /// Comme [`Converter::decode`], en signalant la raison du rejet
    pub fn try_decode(&self, input: &str, want_point: bool) -> Result<Unprojected, UsngError> {
        let reference =
            grid::parse_grid_string(input).map_err(|e| UsngError::malformed(input, e))?;
        grid::decode(&reference, want_point, &self.ellipsoid)
            .map_err(|e| UsngError::malformed(input, e))
    }

    /// Chaîne USNG/MGRS → `geo::Point` (x = longitude, y = latitude)
    pub fn decode_point(&self, input: &str) -> Option<geo::Point<f64>> {
        self.decode(input, true)
            .and_then(|result| result.as_point())
            .map(LatLon::into)
    }
}

fn parse_or_log(input: &str) -> Option<GridReference> {
    grid::parse_grid_string(input)
        .map_err(|e| debug!(input, error = %e, "malformed grid reference"))
        .ok()
}
