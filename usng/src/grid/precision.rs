//! Niveaux de précision USNG

use serde::{Deserialize, Serialize};

/// Précision d'une référence de grille
///
/// Le niveau 0 ne garde que la zone et la bande, le niveau 1 ajoute le carré
/// de 100 km, chaque niveau suivant ajoute un chiffre à l'easting et au northing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Precision {
    /// Zone et bande seulement ("18S")
    SixByEightDegrees,
    /// Carré de 100 km ("18S UJ")
    OneHundredKilometers,
    /// "18S UJ 2 0"
    TenKilometers,
    /// "18S UJ 23 06"
    OneKilometer,
    /// "18S UJ 234 064"
    OneHundredMeters,
    /// "18S UJ 2348 0647"
    TenMeters,
    /// "18S UJ 23480 06470"
    OneMeter,
}

impl Precision {
    /// Niveau 0..=6 ; les niveaux supérieurs sont ramenés au mètre
    pub fn from_level(level: u8) -> Self {
        match level {
            0 => Self::SixByEightDegrees,
            1 => Self::OneHundredKilometers,
            2 => Self::TenKilometers,
            3 => Self::OneKilometer,
            4 => Self::OneHundredMeters,
            5 => Self::TenMeters,
            _ => Self::OneMeter,
        }
    }

    /// Précision d'une référence avec carré et `digits` chiffres par coordonnée
    pub fn from_digits(digits: u8) -> Self {
        Self::from_level(digits.saturating_add(1))
    }

    pub fn level(self) -> u8 {
        self as u8
    }

    /// Nombre de chiffres par coordonnée (0..=5)
    pub fn digits(self) -> u8 {
        self.level().saturating_sub(1)
    }

    /// Côté de la cellule en mètres, `None` pour une cellule zone × bande
    pub fn cell_size(self) -> Option<f64> {
        match self {
            Self::SixByEightDegrees => None,
            _ => Some(100_000.0 / 10f64.powi(i32::from(self.digits()))),
        }
    }

    /// Précision adaptée à une diagonale d'emprise en mètres
    pub fn from_extent(meters: f64) -> Self {
        if meters > 100_000.0 {
            Self::SixByEightDegrees
        } else if meters > 10_000.0 {
            Self::OneHundredKilometers
        } else if meters > 1_000.0 {
            Self::TenKilometers
        } else if meters > 100.0 {
            Self::OneKilometer
        } else if meters > 10.0 {
            Self::OneHundredMeters
        } else if meters > 1.0 {
            Self::TenMeters
        } else {
            Self::OneMeter
        }
    }
}
