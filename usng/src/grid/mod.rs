//! Références de grille USNG/MGRS
//!
//! - `tables` : lettres des carrés de 100 km et northings de base des bandes
//! - `encode` : lat/lon → référence
//! - `parser` / `decode` : chaîne → référence → UTM → lat/lon

pub mod decode;
pub mod encode;
pub mod parser;
pub mod precision;
pub mod reference;
pub mod tables;

pub use decode::{decode, grid_to_utm};
pub use encode::encode;
pub use parser::parse_grid_string;
pub use precision::Precision;
pub use reference::GridReference;
