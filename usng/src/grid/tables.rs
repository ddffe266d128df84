//! Tables des lettres des carrés de 100 km
//!
//! Les identifiants se répètent tous les 6 numéros de zone (jeux 1 à 6),
//! toutes les 8 colonnes en easting et toutes les 20 lignes en northing.

use crate::zone::band_index;

/// Côté d'un carré de 100 km, en mètres
pub const BLOCK_SIZE: f64 = 100_000.0;

/// Largeur d'un jeu de colonnes
pub const COLUMN_CYCLE: u32 = 8;

/// Hauteur d'un jeu de lignes
pub const ROW_CYCLE: u32 = 20;

/// Période de répétition des lettres de ligne, en mètres
pub const ROW_CYCLE_METERS: u32 = 2_000_000;

/// Lettres de ligne des jeux impairs
pub const ROW_LETTERS_ODD: &[u8; 20] = b"ABCDEFGHJKLMNPQRSTUV";

/// Lettres de ligne des jeux pairs (décalées de 5)
pub const ROW_LETTERS_EVEN: &[u8; 20] = b"FGHJKLMNPQRSTUVABCDE";

/// Lettres de colonne des jeux 1/4, 2/5 et 3/6
pub const COLUMN_LETTERS: [&[u8; 8]; 3] = [b"ABCDEFGH", b"JKLMNPQR", b"STUVWXYZ"];

/// Lettres de colonne regroupées par easting : A, J et S valent 100 000 m, etc.
const EASTING_GROUPS: [&str; 8] = ["AJS", "BKT", "CLU", "DMV", "ENW", "FPX", "GQY", "HRZ"];

/// Northing approximatif du bord sud de chaque bande (ordre de `BAND_LETTERS`),
/// hémisphère sud compris avec son décalage de 10 000 000 m
const BAND_BASE_NORTHING: [u32; 20] = [
    1_100_000, 2_000_000, 2_800_000, 3_700_000, 4_600_000, 5_500_000, 6_400_000, 7_300_000,
    8_200_000, 9_100_000, 0, 800_000, 1_700_000, 2_600_000, 3_500_000, 4_400_000, 5_300_000,
    6_200_000, 7_000_000, 7_900_000,
];

/// Jeu de lettres (1..=6) d'une zone
pub fn zone_set(zone: u8) -> u8 {
    (zone.saturating_sub(1) % 6) + 1
}

/// Identifiant du carré de 100 km contenant un point (easting, northing en mètres entiers)
///
/// Le northing sud doit porter le décalage de 10 000 000 m.
pub fn square_id(zone: u8, easting: u32, northing: u32) -> (char, char) {
    let set = zone_set(zone);

    // Colonne 1..=8 à partir de 100 000 m ; 0 correspond à la 8e
    let column = (easting / BLOCK_SIZE as u32 + COLUMN_CYCLE - 1) % COLUMN_CYCLE;
    let row = (northing / BLOCK_SIZE as u32) % ROW_CYCLE;

    let columns = COLUMN_LETTERS[usize::from((set - 1) % 3)];
    let rows = if set % 2 == 1 {
        ROW_LETTERS_ODD
    } else {
        ROW_LETTERS_EVEN
    };

    (
        char::from(columns[column as usize]),
        char::from(rows[row as usize]),
    )
}

/// Easting de base (100 000..=800 000 m) d'une lettre de colonne
pub fn column_easting(column: char) -> Option<u32> {
    EASTING_GROUPS
        .iter()
        .position(|group| group.contains(column))
        .map(|i| (i as u32 + 1) * BLOCK_SIZE as u32)
}

/// Northing dans le cycle de 2 000 000 m d'une lettre de ligne
pub fn row_northing(zone: u8, row: char) -> Option<u32> {
    let rows = if zone % 2 == 0 {
        ROW_LETTERS_EVEN
    } else {
        ROW_LETTERS_ODD
    };
    rows.iter()
        .position(|&letter| char::from(letter) == row)
        .map(|i| i as u32 * BLOCK_SIZE as u32)
}

/// Northing du bord sud approximatif d'une bande
pub fn band_base_northing(band: char) -> Option<u32> {
    band_index(band).map(|i| BAND_BASE_NORTHING[i])
}

/// Remonte un northing de cycles de 2 000 000 m jusqu'à atteindre la base de la bande
pub fn absolute_northing(cycle_northing: u32, band: char) -> Option<u32> {
    let base = band_base_northing(band)?;
    if cycle_northing >= base {
        return Some(cycle_northing);
    }
    let cycles = (base - cycle_northing).div_ceil(ROW_CYCLE_METERS);
    Some(cycle_northing + cycles * ROW_CYCLE_METERS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_set() {
        assert_eq!(zone_set(1), 1);
        assert_eq!(zone_set(6), 6);
        assert_eq!(zone_set(7), 1);
        assert_eq!(zone_set(18), 6);
        assert_eq!(zone_set(60), 6);
    }

    #[test]
    fn test_square_id_washington() {
        // 18S UJ
        assert_eq!(square_id(18, 323394, 4307396), ('U', 'J'));
    }

    #[test]
    fn test_square_id_wraps() {
        // Easting 800 000..900 000 : 8e colonne
        assert_eq!(square_id(1, 850_000, 0), ('H', 'A'));
        // Easting < 100 000 : aussi 8e colonne
        assert_eq!(square_id(1, 50_000, 0), ('H', 'A'));
        // Ligne 20 puis retour à la première
        assert_eq!(square_id(1, 150_000, 1_950_000), ('A', 'V'));
        assert_eq!(square_id(1, 150_000, 2_050_000), ('A', 'A'));
        // Jeu pair
        assert_eq!(square_id(2, 150_000, 50_000), ('J', 'F'));
    }

    #[test]
    fn test_column_easting() {
        assert_eq!(column_easting('A'), Some(100_000));
        assert_eq!(column_easting('U'), Some(300_000));
        assert_eq!(column_easting('Z'), Some(800_000));
        assert_eq!(column_easting('I'), None);
    }

    #[test]
    fn test_row_northing_parity() {
        assert_eq!(row_northing(17, 'A'), Some(0));
        assert_eq!(row_northing(18, 'F'), Some(0));
        assert_eq!(row_northing(18, 'J'), Some(300_000));
        assert_eq!(row_northing(18, 'E'), Some(1_900_000));
        assert_eq!(row_northing(18, 'W'), None);
    }

    #[test]
    fn test_absolute_northing() {
        // 18S UJ : ligne 300 000 → 4 300 000
        assert_eq!(absolute_northing(300_000, 'S'), Some(4_300_000));
        // Déjà au-dessus de la base
        assert_eq!(absolute_northing(1_100_000, 'C'), Some(1_100_000));
        assert_eq!(absolute_northing(0, 'N'), Some(0));
        // Bande X : base 7 900 000
        assert_eq!(absolute_northing(1_900_000, 'X'), Some(7_900_000));
        assert_eq!(absolute_northing(300_000, 'Z'), None);
    }

    #[test]
    fn test_encode_decode_tables_agree() {
        for zone in 1..=60u8 {
            for col in 0..8u32 {
                for row in 0..20u32 {
                    let easting = (col + 1) * 100_000 + 50_000;
                    let northing = row * 100_000 + 50_000;
                    let (c, r) = square_id(zone, easting, northing);
                    assert_eq!(column_easting(c), Some((col + 1) * 100_000));
                    assert_eq!(row_northing(zone, r), Some(row * 100_000));
                }
            }
        }
    }
}
