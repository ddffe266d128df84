//! Types d'erreurs pour le crate usng

use thiserror::Error;

/// Erreurs des conversions lat/lon ↔ UTM ↔ USNG
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UsngError {
    /// Latitude/longitude hors de la fenêtre de validité de l'opération
    #[error("invalid input: lat {lat:.4}, lon {lon:.4}")]
    InputRange { lat: f64, lon: f64 },

    /// Latitude hors de la couverture de la grille (-80..84)
    #[error("latitude {lat:.4} is outside the USNG grid coverage (-80..84)")]
    OutsideGridCoverage { lat: f64 },

    /// Numéro de zone UTM hors de 1..=60
    #[error("invalid UTM zone number: {0}")]
    InvalidZone(u8),

    /// Datum inconnu
    #[error("unknown datum: {0} (expected NAD83, WGS84 or NAD27)")]
    UnknownDatum(String),

    /// Référence de grille mal formée
    #[error("malformed grid reference '{input}': {source}")]
    MalformedGrid {
        input: String,
        #[source]
        source: ParseError,
    },
}

impl UsngError {
    /// Crée une erreur de plage avec les valeurs fautives
    pub fn input_range(lat: f64, lon: f64) -> Self {
        Self::InputRange { lat, lon }
    }

    /// Crée une erreur de parsing avec la chaîne d'origine
    pub fn malformed(input: impl Into<String>, source: ParseError) -> Self {
        Self::MalformedGrid {
            input: input.into(),
            source,
        }
    }
}

/// Raisons de rejet d'une chaîne USNG/MGRS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Moins de 2 caractères après normalisation
    #[error("grid reference is empty or shorter than 2 characters")]
    TooShort,

    /// Numéro de zone absent ou hors de 1..=60
    #[error("missing or invalid zone number")]
    InvalidZone,

    /// Lettre de bande hors de "CDEFGHJKLMNPQRSTUVWX"
    #[error("unknown latitude band letter '{0}'")]
    UnknownBand(char),

    /// Lettre de carré de 100 km invalide
    #[error("invalid 100km square letter '{0}'")]
    InvalidSquareLetter(char),

    /// Une seule lettre de carré fournie
    #[error("100km square identifier needs two letters")]
    IncompleteSquare,

    /// Nombre impair de chiffres
    #[error("easting and northing must have the same number of digits (got {0} digits)")]
    UnbalancedDigits(usize),

    /// Plus de 5 chiffres par coordonnée
    #[error("at most 5 digits per coordinate are allowed (got {0})")]
    TooManyDigits(usize),

    /// Caractère inattendu
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
}
