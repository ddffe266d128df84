//! # usng-cli
//!
//! Conversions USNG/MGRS en ligne de commande.
//!
//! ## Usage CLI
//!
//! ```bash
//! # Lat/lon → USNG
//! usng-cli encode 38.8977 -77.0365 --precision 5
//!
//! # USNG → lat/lon (cellule, point, ou GeoJSON)
//! usng-cli decode "18S UJ 2348 0647"
//! usng-cli decode "18S UJ 2348 0647" --point --geojson -
//!
//! # Fichier de coordonnées, une par ligne, avec rapport JSON
//! usng-cli batch points.csv --report report.json
//! ```

pub mod batch;
pub mod config;
pub mod export;
pub mod report;

pub use config::{Config, OutputFormat};
pub use report::{BatchReport, BatchStatus};
