//! Parser tolérant des chaînes USNG/MGRS
//!
//! Grammaire, après passage en majuscules et suppression des espaces et des `%20` :
//!
//! ```text
//! reference := zone band [square [digits]]
//! zone      := DIGIT [DIGIT]            (1..=60)
//! band      := C..X sans I ni O
//! square    := column row
//! digits    := DIGIT{2k}, k ∈ 0..=5     (easting puis northing)
//! ```

use std::iter::Peekable;
use std::str::Chars;

use super::reference::GridReference;
use super::tables::{COLUMN_LETTERS, ROW_LETTERS_ODD};
use crate::zone::BAND_LETTERS;
use crate::ParseError;

/// Met une chaîne sous forme normalisée (majuscules, sans espaces ni `%20`)
pub fn normalize(input: &str) -> String {
    input.to_uppercase().replace("%20", "").replace(' ', "")
}

/// Parse une référence de grille USNG ou MGRS
///
/// # Errors
///
/// `ParseError::TooShort` si la chaîne normalisée fait moins de 2 caractères,
/// sinon l'erreur de la première règle de grammaire non satisfaite.
pub fn parse_grid_string(input: &str) -> Result<GridReference, ParseError> {
    let text = normalize(input);
    if text.chars().count() < 2 {
        return Err(ParseError::TooShort);
    }

    let mut scanner = Scanner {
        chars: text.chars().peekable(),
    };

    let zone = scanner.zone()?;
    let band = scanner.band()?;
    let square = scanner.square()?;
    let (easting, northing, digits) = match square {
        Some(_) => scanner.digit_groups()?,
        None => {
            scanner.end()?;
            (0, 0, 0)
        }
    };

    Ok(GridReference {
        zone,
        band,
        square,
        easting,
        northing,
        digits,
    })
}

struct Scanner<'a> {
    chars: Peekable<Chars<'a>>,
}

impl Scanner<'_> {
    fn zone(&mut self) -> Result<u8, ParseError> {
        let first = self
            .chars
            .next()
            .and_then(|c| c.to_digit(10))
            .ok_or(ParseError::InvalidZone)?;

        // Deuxième chiffre seulement s'il est numérique
        let zone = match self.chars.peek().and_then(|c| c.to_digit(10)) {
            Some(second) => {
                self.chars.next();
                first * 10 + second
            }
            None => first,
        };

        if !(1..=60).contains(&zone) {
            return Err(ParseError::InvalidZone);
        }
        Ok(zone as u8)
    }

    fn band(&mut self) -> Result<char, ParseError> {
        match self.chars.next() {
            None => Err(ParseError::TooShort),
            Some(c) if BAND_LETTERS.contains(c) => Ok(c),
            Some(c) if c.is_ascii_alphabetic() => Err(ParseError::UnknownBand(c)),
            Some(c) => Err(ParseError::UnexpectedCharacter(c)),
        }
    }

    fn square(&mut self) -> Result<Option<(char, char)>, ParseError> {
        let column = match self.chars.peek() {
            Some(c) if c.is_ascii_alphabetic() => *c,
            _ => return Ok(None),
        };
        self.chars.next();
        if !is_column_letter(column) {
            return Err(ParseError::InvalidSquareLetter(column));
        }

        match self.chars.next() {
            Some(row) if row.is_ascii() && ROW_LETTERS_ODD.contains(&(row as u8)) => {
                Ok(Some((column, row)))
            }
            Some(row) if row.is_ascii_alphabetic() => Err(ParseError::InvalidSquareLetter(row)),
            _ => Err(ParseError::IncompleteSquare),
        }
    }

    fn digit_groups(&mut self) -> Result<(u32, u32, u8), ParseError> {
        let mut digits = String::new();
        for c in self.chars.by_ref() {
            if !c.is_ascii_digit() {
                return Err(ParseError::UnexpectedCharacter(c));
            }
            digits.push(c);
        }

        if digits.len() % 2 != 0 {
            return Err(ParseError::UnbalancedDigits(digits.len()));
        }
        let half = digits.len() / 2;
        if half > 5 {
            return Err(ParseError::TooManyDigits(half));
        }
        if half == 0 {
            return Ok((0, 0, 0));
        }

        let (east, north) = digits.split_at(half);
        // Au plus 5 chiffres ASCII : tient dans un u32
        let easting = east.parse().map_err(|_| ParseError::TooManyDigits(half))?;
        let northing = north.parse().map_err(|_| ParseError::TooManyDigits(half))?;
        Ok((easting, northing, half as u8))
    }

    fn end(&mut self) -> Result<(), ParseError> {
        match self.chars.next() {
            None => Ok(()),
            Some(c) => Err(ParseError::UnexpectedCharacter(c)),
        }
    }
}

fn is_column_letter(c: char) -> bool {
    c.is_ascii() && COLUMN_LETTERS.iter().any(|set| set.contains(&(c as u8)))
}
