//! Types de données pour le crate usng

use std::fmt;

use geo::{Geometry, Point, Rect};
use serde::{Deserialize, Serialize};

/// Point en coordonnées géographiques (degrés décimaux)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    /// Latitude en degrés, positive au nord
    pub lat: f64,
    /// Longitude en degrés, positive à l'est
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<LatLon> for Point<f64> {
    fn from(p: LatLon) -> Self {
        Point::new(p.lon, p.lat)
    }
}

/// Emprise géographique en degrés
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    /// Centre arithmétique de l'emprise
    pub fn center(&self) -> LatLon {
        LatLon::new((self.north + self.south) / 2.0, (self.east + self.west) / 2.0)
    }

    /// Teste si un point est dans l'emprise (bords inclus)
    pub fn contains(&self, p: LatLon) -> bool {
        p.lat >= self.south && p.lat <= self.north && p.lon >= self.west && p.lon <= self.east
    }
}

impl From<BoundingBox> for Rect<f64> {
    fn from(b: BoundingBox) -> Self {
        Rect::new((b.west, b.south), (b.east, b.north))
    }
}

/// Hémisphère d'une coordonnée UTM dont le northing est décalé
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hemisphere {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "S")]
    South,
}

impl Hemisphere {
    pub fn as_char(self) -> char {
        match self {
            Self::North => 'N',
            Self::South => 'S',
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Coordonnée UTM
///
/// `northing` est signé (négatif au sud) tant que `hemisphere` vaut `None`.
/// Avec un hémisphère explicite, le northing sud porte le décalage de 10 000 000 m.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtmCoordinate {
    /// Easting en mètres (décalé de 500 000 m depuis le méridien central)
    pub easting: f64,
    /// Northing en mètres
    pub northing: f64,
    /// Numéro de zone (1..=60)
    pub zone: u8,
    /// Lettre de bande de latitude
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<char>,
    /// Hémisphère, si le northing a été normalisé
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hemisphere: Option<Hemisphere>,
}

/// Zone UTM et bande de latitude d'un point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridZone {
    pub number: u8,
    pub band: char,
}

impl fmt::Display for GridZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.number, self.band)
    }
}

/// Résultat d'une projection inverse
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Unprojected {
    /// Point unique
    Point(LatLon),
    /// Cellule de précision
    Bounds(BoundingBox),
    /// Bande inconnue : seules les longitudes de la zone sont résolues
    ZoneOnly { east: f64, west: f64 },
}

impl Unprojected {
    pub fn as_point(&self) -> Option<LatLon> {
        match self {
            Self::Point(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_bounds(&self) -> Option<BoundingBox> {
        match self {
            Self::Bounds(b) => Some(*b),
            _ => None,
        }
    }

    /// Géométrie `geo` équivalente (point ou polygone de la cellule)
    pub fn to_geometry(&self) -> Option<Geometry<f64>> {
        match self {
            Self::Point(p) => Some(Geometry::Point((*p).into())),
            Self::Bounds(b) => Some(Geometry::Polygon(Rect::from(*b).to_polygon())),
            Self::ZoneOnly { .. } => None,
        }
    }
}
