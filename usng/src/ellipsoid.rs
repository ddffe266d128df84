//! Définitions des ellipsoïdes et des datums supportés

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::UsngError;

/// Paramètres d'un ellipsoïde de référence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipsoid {
    /// Demi-grand axe (rayon équatorial) en mètres
    pub equatorial_radius: f64,

    /// Première excentricité au carré
    pub eccentricity_squared: f64,
}

impl Ellipsoid {
    /// WGS84 / GRS80 (NAD83)
    pub const WGS84: Self = Self {
        equatorial_radius: 6378137.0,
        eccentricity_squared: 0.006694380023,
    };

    /// Clarke 1866 (NAD27)
    pub const CLARKE_1866: Self = Self {
        equatorial_radius: 6378206.4,
        eccentricity_squared: 0.006768658,
    };

    /// Deuxième excentricité au carré
    pub fn eccentricity_prime_squared(&self) -> f64 {
        self.eccentricity_squared / (1.0 - self.eccentricity_squared)
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS84
    }
}

/// Datum géodésique du convertisseur
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Datum {
    /// NAD83, équivalent WGS84 à l'échelle de la grille
    #[default]
    #[serde(rename = "NAD83", alias = "WGS84", alias = "nad83", alias = "wgs84")]
    Nad83,
    /// NAD27 (ellipsoïde de Clarke 1866)
    #[serde(rename = "NAD27", alias = "nad27")]
    Nad27,
}

impl Datum {
    /// Ellipsoïde associé
    pub fn ellipsoid(self) -> Ellipsoid {
        match self {
            Self::Nad83 => Ellipsoid::WGS84,
            Self::Nad27 => Ellipsoid::CLARKE_1866,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Nad83 => "NAD83",
            Self::Nad27 => "NAD27",
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Datum {
    type Err = UsngError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NAD83" | "WGS84" => Ok(Self::Nad83),
            "NAD27" => Ok(Self::Nad27),
            other => Err(UsngError::UnknownDatum(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datum_from_str() {
        assert_eq!("nad27".parse::<Datum>().unwrap(), Datum::Nad27);
        assert_eq!(" WGS84 ".parse::<Datum>().unwrap(), Datum::Nad83);
        assert_eq!("NAD83".parse::<Datum>().unwrap(), Datum::Nad83);
        assert!(matches!(
            "ED50".parse::<Datum>(),
            Err(UsngError::UnknownDatum(name)) if name == "ED50"
        ));
    }

    #[test]
    fn test_datum_ellipsoid() {
        assert_eq!(Datum::default().ellipsoid(), Ellipsoid::WGS84);
        assert_eq!(Datum::Nad27.ellipsoid().equatorial_radius, 6378206.4);
    }

    #[test]
    fn test_eccentricity_prime() {
        let ep2 = Ellipsoid::WGS84.eccentricity_prime_squared();
        assert!((ep2 - 0.00673949674).abs() < 1e-9, "ep2={}", ep2);
    }
}
