//! # usng
//!
//! Conversions entre coordonnées géographiques, UTM et références de grille
//! USNG/MGRS (United States National Grid / Military Grid Reference System).
//!
//! ## Features
//!
//! - Projection Transverse Mercator directe et inverse (série de Snyder)
//! - Exceptions de zones Norvège et Svalbard
//! - Encodage à 7 niveaux de précision, du couple zone/bande au mètre
//! - Décodage tolérant (espaces, `%20`, casse) et parsing strict via `FromStr`
//! - Datums NAD83/WGS84 et NAD27 (Clarke 1866)
//! - Types `geo` pour l'interopérabilité avec l'écosystème Rust géospatial
//!
//! ## Usage
//!
//! ```rust
//! use usng::Converter;
//!
//! let converter = Converter::default();
//! let usng = converter.encode(38.8977, -77.0365, 5)?;
//! assert_eq!(usng, "18S UJ 2339 0739");
//!
//! let point = converter.decode(&usng, true).and_then(|r| r.as_point());
//! assert!(point.is_some());
//! # Ok::<(), usng::UsngError>(())
//! ```

pub mod bounds;
pub mod converter;
pub mod ellipsoid;
pub mod error;
pub mod grid;
pub mod types;
pub mod utm;
pub mod zone;

pub use bounds::distance_meters;
pub use converter::{Converter, ConverterOptions};
pub use ellipsoid::{Datum, Ellipsoid};
pub use error::{ParseError, UsngError};
pub use grid::{GridReference, Precision};
pub use types::{BoundingBox, GridZone, Hemisphere, LatLon, Unprojected, UtmCoordinate};
