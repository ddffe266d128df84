//! Conversion par lots, une coordonnée ou une référence par ligne
//!
//! Les lignes sont indépendantes et traitées en parallèle avec rayon ; le
//! rapport garde l'ordre du fichier.

use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::{debug, info};
use usng::Converter;

use crate::config::Config;
use crate::report::{BatchReport, Conversion};

/// Sens de conversion d'un lot
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Direction {
    /// "lat,lon" → référence de grille
    Encode,
    /// Référence de grille → lat/lon
    Decode,
}

enum LineOutcome {
    Skipped,
    Converted(Conversion),
    Failed(String),
}

/// Lit les lignes d'un fichier, ou de l'entrée standard pour `-`
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    if path == Path::new("-") {
        return std::io::stdin()
            .lock()
            .lines()
            .collect::<std::io::Result<_>>()
            .context("Failed to read standard input");
    }

    let file = std::fs::File::open(path)
        .context(format!("Failed to open input file: {}", path.display()))?;
    BufReader::new(file)
        .lines()
        .collect::<std::io::Result<_>>()
        .context(format!("Failed to read input file: {}", path.display()))
}

/// Vérifie qu'un seul document JSON est écrit sur la sortie standard
///
/// Sans `--report`, le rapport part sur stdout : un GeoJSON sur `-` y est refusé.
pub fn check_outputs(report: Option<&Path>, geojson: Option<&Path>) -> Result<()> {
    let stdout = Path::new("-");
    let report_on_stdout = report.map_or(true, |path| path == stdout);
    if report_on_stdout && geojson == Some(stdout) {
        anyhow::bail!("Report and GeoJSON cannot both be written to stdout: use --report <FILE>");
    }
    Ok(())
}

/// Sépare "lat,lon", "lat;lon" ou "lat lon"
pub fn parse_lat_lon(line: &str) -> Result<(f64, f64)> {
    let fields: Vec<&str> = line
        .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|f| !f.is_empty())
        .collect();

    if fields.len() != 2 {
        anyhow::bail!("expected 'lat,lon', got {} fields", fields.len());
    }

    let parse = |s: &str| -> Result<f64> {
        fast_float::parse(s.trim_start_matches('+'))
            .map_err(|_| anyhow::anyhow!("invalid number '{}'", s))
    };
    Ok((parse(fields[0])?, parse(fields[1])?))
}

fn convert_line(
    config: &Config,
    converter: &Converter,
    direction: Direction,
    want_point: bool,
    line: &str,
) -> LineOutcome {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return LineOutcome::Skipped;
    }

    let result = match direction {
        Direction::Encode => parse_lat_lon(line).and_then(|(lat, lon)| {
            config
                .encode(converter, lat, lon)
                .map(|usng| Conversion::Grid { usng })
                .map_err(anyhow::Error::from)
        }),
        Direction::Decode => converter
            .try_decode(line, want_point)
            .map(Conversion::Decoded)
            .map_err(anyhow::Error::from),
    };

    match result {
        Ok(conversion) => LineOutcome::Converted(conversion),
        Err(e) => {
            debug!(line, error = %e, "line rejected");
            LineOutcome::Failed(e.to_string())
        }
    }
}

/// Convertit toutes les lignes et construit le rapport
pub fn run_batch(
    lines: &[String],
    config: &Config,
    direction: Direction,
    want_point: bool,
) -> BatchReport {
    let start = Instant::now();
    let converter = config.converter();

    let outcomes: Vec<LineOutcome> = lines
        .par_iter()
        .map(|line| convert_line(config, &converter, direction, want_point, line))
        .collect();

    let mut report = BatchReport::default();
    for (index, (line, outcome)) in lines.iter().zip(outcomes).enumerate() {
        let number = index + 1;
        match outcome {
            LineOutcome::Skipped => report.record_skipped(),
            LineOutcome::Converted(conversion) => {
                report.record_success(number, line.trim(), conversion)
            }
            LineOutcome::Failed(message) => report.record_error(number, line.trim(), message),
        }
    }

    report.set_duration(start.elapsed());
    report.finalize();
    info!(
        converted = report.lines_converted,
        failed = report.lines_failed,
        "batch complete"
    );
    report
}
