//! Référence de grille USNG/MGRS et son format texte

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::parser::parse_grid_string;
use super::precision::Precision;
use super::tables::{column_easting, row_northing};
use crate::zone::BAND_LETTERS;
use crate::ParseError;

/// Forme stricte : séparateurs optionnels, groupes de chiffres séparés ou accolés
const STRICT_PATTERN: &str = r"^(\d\d?)([CDEFGHJKLMNPQRSTUVWX])\W?(?:([ABCDEFGHJKLMNPQRSTUVWXYZ])([ABCDEFGHJKLMNPQRSTUV])(?:\W?(\d{1,5}\W\d{1,5}|\d{2,10}))?)?\W*$";

fn strict_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(STRICT_PATTERN).expect("valid grid reference pattern"))
}

/// Référence de grille décomposée
///
/// `easting` et `northing` sont les valeurs des groupes de chiffres (tronquées,
/// non arrondies) ; `digits` est leur longueur commune, zéros de tête compris.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridReference {
    /// Numéro de zone (1..=60)
    pub zone: u8,
    /// Lettre de bande de latitude
    pub band: char,
    /// Carré de 100 km (colonne, ligne)
    pub square: Option<(char, char)>,
    pub easting: u32,
    pub northing: u32,
    /// Nombre de chiffres par coordonnée (0..=5)
    pub digits: u8,
}

impl GridReference {
    /// Construit une référence en vérifiant zone, bande, carré et chiffres
    ///
    /// # Errors
    ///
    /// Voir [`GridReference::validate`].
    pub fn new(
        zone: u8,
        band: char,
        square: Option<(char, char)>,
        easting: u32,
        northing: u32,
        digits: u8,
    ) -> Result<Self, ParseError> {
        let reference = Self {
            zone,
            band,
            square,
            easting,
            northing,
            digits,
        };
        reference.validate()?;
        Ok(reference)
    }

    /// Vérifie une référence construite champ par champ
    ///
    /// # Errors
    ///
    /// - `ParseError::InvalidZone` hors de 1..=60
    /// - `ParseError::UnknownBand` pour une lettre hors de `BAND_LETTERS`
    /// - `ParseError::InvalidSquareLetter` pour une lettre de carré hors table
    /// - `ParseError::TooManyDigits` si `digits` dépasse 5 ou si une valeur
    ///   ne tient pas dans `digits` chiffres
    pub fn validate(&self) -> Result<(), ParseError> {
        if !(1..=60).contains(&self.zone) {
            return Err(ParseError::InvalidZone);
        }
        if !BAND_LETTERS.contains(self.band) {
            return Err(ParseError::UnknownBand(self.band));
        }
        if let Some((column, row)) = self.square {
            if column_easting(column).is_none() {
                return Err(ParseError::InvalidSquareLetter(column));
            }
            if row_northing(self.zone, row).is_none() {
                return Err(ParseError::InvalidSquareLetter(row));
            }
        }
        if self.digits > 5 {
            return Err(ParseError::TooManyDigits(usize::from(self.digits)));
        }
        let limit = 10u32.pow(u32::from(self.digits));
        if self.easting >= limit || self.northing >= limit {
            let width = self.easting.max(self.northing).to_string().len();
            return Err(ParseError::TooManyDigits(width));
        }
        Ok(())
    }

    pub fn precision(&self) -> Precision {
        match self.square {
            None => Precision::SixByEightDegrees,
            Some(_) => Precision::from_digits(self.digits),
        }
    }

    /// Forme MGRS, sans espaces
    pub fn to_mgrs(&self) -> String {
        self.format(false)
    }

    /// Même référence ramenée à une précision plus grossière (troncature)
    pub fn truncate(&self, precision: Precision) -> Self {
        if precision >= self.precision() {
            return *self;
        }
        if precision == Precision::SixByEightDegrees {
            return Self {
                square: None,
                easting: 0,
                northing: 0,
                digits: 0,
                ..*self
            };
        }
        let digits = precision.digits();
        let dropped = self.digits.saturating_sub(digits);
        let shorten = |v: u32| (0..dropped).fold(v, |v, _| v / 10);
        Self {
            easting: shorten(self.easting),
            northing: shorten(self.northing),
            digits,
            ..*self
        }
    }

    fn format(&self, spaced: bool) -> String {
        let sep = if spaced { " " } else { "" };
        let mut out = format!("{}{}", self.zone, self.band);
        if let Some((column, row)) = self.square {
            out.push_str(sep);
            out.push(column);
            out.push(row);
            if self.digits > 0 {
                let width = usize::from(self.digits);
                out.push_str(&format!(
                    "{sep}{:0width$}{sep}{:0width$}",
                    self.easting, self.northing
                ));
            }
        }
        out
    }
}

impl fmt::Display for GridReference {
    /// Forme USNG, séparée par des espaces
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(true))
    }
}

impl FromStr for GridReference {
    type Err = ParseError;

    /// Parsing strict (lettres valides, zone 1..=60, groupes de même longueur)
    ///
    /// Accepte la forme USNG (`18S UJ 2348 0647`) et la forme MGRS (`18SUJ23480647`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        if upper.len() < 2 {
            return Err(ParseError::TooShort);
        }

        let caps = strict_regex()
            .captures(&upper)
            .ok_or_else(|| rejection_reason(&upper))?;

        let zone: u8 = caps[1].parse().map_err(|_| ParseError::InvalidZone)?;
        if !(1..=60).contains(&zone) {
            return Err(ParseError::InvalidZone);
        }
        let band = caps[2].chars().next().ok_or(ParseError::TooShort)?;

        let square = match (caps.get(3), caps.get(4)) {
            (Some(c), Some(r)) => c.as_str().chars().next().zip(r.as_str().chars().next()),
            _ => None,
        };

        let (easting, northing, digits) = match caps.get(5) {
            None => (0, 0, 0),
            Some(tail) => split_digit_groups(tail.as_str())?,
        };

        Ok(Self {
            zone,
            band,
            square,
            easting,
            northing,
            digits,
        })
    }
}

/// Sépare "2348 0647" ou "23480647" en deux valeurs de même longueur
fn split_digit_groups(tail: &str) -> Result<(u32, u32, u8), ParseError> {
    let (east, north) = match tail.find(|c: char| !c.is_ascii_digit()) {
        Some(pos) => {
            let sep_len = tail[pos..].chars().next().map_or(1, char::len_utf8);
            (&tail[..pos], &tail[pos + sep_len..])
        }
        None => {
            if tail.len() % 2 != 0 {
                return Err(ParseError::UnbalancedDigits(tail.len()));
            }
            tail.split_at(tail.len() / 2)
        }
    };

    if east.len() != north.len() {
        return Err(ParseError::UnbalancedDigits(east.len() + north.len()));
    }
    if east.len() > 5 {
        return Err(ParseError::TooManyDigits(east.len()));
    }

    let parse = |s: &str| s.parse::<u32>().map_err(|_| ParseError::UnbalancedDigits(s.len()));
    Ok((parse(east)?, parse(north)?, east.len() as u8))
}

/// Diagnostic d'une chaîne refusée par le motif strict
///
/// Si la grammaire tolérante l'accepte, seuls les séparateurs diffèrent : le
/// premier séparateur doublé, ou à défaut le premier séparateur, est signalé.
fn rejection_reason(s: &str) -> ParseError {
    if let Err(e) = parse_grid_string(s) {
        return e;
    }

    let is_separator = |c: char| !c.is_ascii_alphanumeric();
    let chars: Vec<char> = s.chars().collect();
    chars
        .windows(2)
        .find(|pair| is_separator(pair[0]) && is_separator(pair[1]))
        .map(|pair| pair[1])
        .or_else(|| chars.iter().copied().find(|&c| is_separator(c)))
        .or_else(|| chars.last().copied())
        .map_or(ParseError::TooShort, ParseError::UnexpectedCharacter)
}
