//! Définition et implémentation des commandes CLI

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::{info, warn};
use usng::zone::resolve_zone;
use usng::{Converter, Hemisphere, Unprojected};
use usng_cli::batch::{self, Direction};
use usng_cli::export::geojson::{self, DecodedFeature};
use usng_cli::{Config, OutputFormat};

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a latitude/longitude to a USNG (or MGRS) grid reference
    #[command(allow_negative_numbers = true)]
    Encode {
        /// Latitude in decimal degrees
        lat: f64,

        /// Longitude in decimal degrees
        lon: f64,

        /// Precision level: 0 = zone and band, 1 = 100km square, 2..6 = 1 to 5 digits
        #[arg(short, long)]
        precision: Option<u8>,

        /// Print the MGRS form (no spaces)
        #[arg(long)]
        mgrs: bool,

        /// Encode on the NAD27 ellipsoid and append " (NAD27)"
        #[arg(long, conflicts_with = "mgrs")]
        nad27: bool,
    },

    /// Convert a USNG/MGRS grid reference to latitude/longitude
    Decode {
        /// Grid reference, e.g. "18S UJ 2348 0647" or 18SUJ23480647
        reference: String,

        /// Return the south-west corner point instead of the cell
        #[arg(long)]
        point: bool,

        /// Write the result as GeoJSON ("-" for stdout)
        #[arg(long)]
        geojson: Option<PathBuf>,
    },

    /// Convert a latitude/longitude to UTM
    #[command(allow_negative_numbers = true)]
    ToUtm {
        lat: f64,
        lon: f64,

        /// Force the UTM zone (1..60)
        #[arg(long)]
        zone: Option<u8>,

        /// Offset southern northings by 10,000,000 m and report the hemisphere
        #[arg(long)]
        hemisphere: bool,
    },

    /// Convert UTM coordinates to latitude/longitude
    #[command(allow_negative_numbers = true)]
    FromUtm {
        easting: f64,
        northing: f64,

        /// UTM zone (1..60)
        zone: u8,

        /// Northing is in the southern hemisphere (false northing 10,000,000 m)
        #[arg(long)]
        south: bool,

        /// Return the cell of this size in meters instead of a point
        #[arg(long)]
        accuracy: Option<f64>,
    },

    /// Print the UTM zone and latitude band of a point (e.g. 18S)
    #[command(allow_negative_numbers = true)]
    Zone { lat: f64, lon: f64 },

    /// Encode the center of a bounding box at a precision matching its size
    #[command(allow_negative_numbers = true)]
    Bbox {
        north: f64,
        south: f64,
        east: f64,
        west: f64,
    },

    /// Convert a file with one coordinate or reference per line
    Batch {
        /// Input file ("-" for stdin)
        input: PathBuf,

        /// Conversion direction
        #[arg(long, value_enum, default_value = "encode")]
        direction: Direction,

        /// When decoding, return points instead of cells
        #[arg(long)]
        point: bool,

        /// Save the JSON report to this file (default or "-": print it to stdout)
        #[arg(long)]
        report: Option<PathBuf>,

        /// When decoding, also export the results as GeoJSON ("-" for stdout, requires --report <FILE>)
        #[arg(long)]
        geojson: Option<PathBuf>,
    },
}

/// Exécute la commande encode
pub fn cmd_encode(
    config: &Config,
    lat: f64,
    lon: f64,
    precision: Option<u8>,
    mgrs: bool,
    nad27: bool,
) -> Result<()> {
    let precision = precision.unwrap_or(config.precision);

    let usng = if nad27 {
        Converter::encode_nad27(lat, lon, precision)?
    } else {
        let config = Config {
            format: if mgrs { OutputFormat::Mgrs } else { config.format },
            ..config.clone()
        };
        config.encode_at(&config.converter(), lat, lon, precision)?
    };

    println!("{}", usng);
    Ok(())
}

/// Exécute la commande decode
pub fn cmd_decode(
    config: &Config,
    reference: &str,
    point: bool,
    geojson_output: Option<&Path>,
) -> Result<()> {
    let result = config
        .converter()
        .try_decode(reference, point)
        .context("Failed to decode grid reference")?;

    if let Unprojected::ZoneOnly { .. } = result {
        warn!(reference, "unknown latitude band, only the zone was resolved");
    }

    match geojson_output {
        Some(path) => {
            let features = [DecodedFeature {
                reference: reference.to_string(),
                result,
            }];
            write_geojson(&features, path)
        }
        None => {
            println!("{}", serde_json::to_string(&result)?);
            Ok(())
        }
    }
}

/// Exécute la commande to-utm
pub fn cmd_to_utm(
    config: &Config,
    lat: f64,
    lon: f64,
    zone: Option<u8>,
    hemisphere: bool,
) -> Result<()> {
    let converter = config.converter();
    let utm = if hemisphere {
        converter.to_utm_with_hemisphere(lat, lon, zone)?
    } else {
        converter.to_utm(lat, lon, zone)?
    };

    let utm = utm.with_context(|| {
        format!("Latitude {} is outside the UTM grid coverage (-80..84)", lat)
    })?;
    println!("{}", serde_json::to_string(&utm)?);
    Ok(())
}

/// Exécute la commande from-utm
pub fn cmd_from_utm(
    config: &Config,
    easting: f64,
    northing: f64,
    zone: u8,
    south: bool,
    accuracy: Option<f64>,
) -> Result<()> {
    if !(1..=60).contains(&zone) {
        anyhow::bail!("Invalid UTM zone {}: expected 1..60", zone);
    }

    let converter = config.converter();
    let result = if south {
        converter.from_utm_with_hemisphere(northing, easting, zone, Hemisphere::South, accuracy)
    } else {
        converter.from_utm(northing, easting, zone, accuracy)
    };

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}

/// Exécute la commande zone
pub fn cmd_zone(lat: f64, lon: f64) -> Result<()> {
    let zone = resolve_zone(lat, lon)?;
    println!("{}", zone);
    Ok(())
}

/// Exécute la commande bbox
pub fn cmd_bbox(config: &Config, north: f64, south: f64, east: f64, west: f64) -> Result<()> {
    let usng = config.converter().encode_bounds(north, south, east, west)?;
    println!("{}", usng);
    Ok(())
}

/// Exécute la commande batch
pub fn cmd_batch(
    config: &Config,
    input: &Path,
    direction: Direction,
    point: bool,
    report_path: Option<&Path>,
    geojson_output: Option<&Path>,
) -> Result<()> {
    batch::check_outputs(report_path, geojson_output)?;

    let lines = batch::read_lines(input)?;
    info!(lines = lines.len(), ?direction, "Starting batch conversion");

    let report = batch::run_batch(&lines, config, direction, point);

    match report_path.filter(|path| *path != Path::new("-")) {
        Some(path) => {
            report
                .save_to_file(path)
                .context(format!("Failed to write report: {}", path.display()))?;
            report.display();
        }
        None => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if let Some(path) = geojson_output {
        if direction == Direction::Encode {
            warn!("--geojson is only used when decoding, ignored");
        } else {
            let features: Vec<DecodedFeature> = report
                .records
                .iter()
                .filter_map(|record| match &record.output {
                    usng_cli::report::Conversion::Decoded(result) => Some(DecodedFeature {
                        reference: record.input.clone(),
                        result: *result,
                    }),
                    usng_cli::report::Conversion::Grid { .. } => None,
                })
                .collect();
            write_geojson(&features, path)?;
        }
    }

    if report.lines_converted == 0 && report.lines_failed > 0 {
        anyhow::bail!("No line could be converted ({})", report.summary());
    }
    Ok(())
}

fn write_geojson(features: &[DecodedFeature], path: &Path) -> Result<()> {
    if path == Path::new("-") {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        geojson::write_collection(&mut out, features)?;
        writeln!(out)?;
        return Ok(());
    }

    geojson::export_to_geojson(features, path)?;
    info!(output = %path.display(), features = features.len(), "GeoJSON written");
    Ok(())
}
