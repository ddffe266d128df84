//! Export des références décodées en GeoJSON avec geozero

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use geozero::geojson::GeoJsonWriter;
use geozero::GeozeroGeometry;

use usng::Unprojected;

/// Une référence de grille et son résultat de décodage
#[derive(Debug, Clone)]
pub struct DecodedFeature {
    pub reference: String,
    pub result: Unprojected,
}

/// Écrit une FeatureCollection dans un fichier
pub fn export_to_geojson(features: &[DecodedFeature], output_path: &Path) -> Result<()> {
    let file = File::create(output_path)
        .context(format!("Failed to create file: {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);
    write_collection(&mut writer, features)?;
    writer.flush()?;
    Ok(())
}

/// Écrit une FeatureCollection (WGS84, lon/lat)
pub fn write_collection<W: Write>(writer: &mut W, features: &[DecodedFeature]) -> Result<()> {
    write!(writer, r#"{{"type":"FeatureCollection","features":["#)?;
    for (i, feature) in features.iter().enumerate() {
        if i > 0 {
            write!(writer, ",")?;
        }
        write_feature(writer, feature)?;
    }
    write!(writer, "]}}")?;
    Ok(())
}

/// Écrit une feature ; une bande inconnue donne une géométrie nulle
fn write_feature<W: Write>(writer: &mut W, feature: &DecodedFeature) -> Result<()> {
    write!(writer, r#"{{"type":"Feature","geometry":"#)?;

    match feature.result.to_geometry() {
        Some(geometry) => {
            let mut geom_buf = Vec::new();
            let mut geom_writer = GeoJsonWriter::new(&mut geom_buf);
            geometry.process_geom(&mut geom_writer)?;
            writer.write_all(&geom_buf)?;
        }
        None => write!(writer, "null")?,
    }

    let kind = match feature.result {
        Unprojected::Point(_) => "point",
        Unprojected::Bounds(_) => "cell",
        Unprojected::ZoneOnly { .. } => "zone",
    };
    write!(
        writer,
        r#","properties":{{"usng":"{}","kind":"{}""#,
        escape_json(&feature.reference),
        kind
    )?;
    if let Unprojected::ZoneOnly { east, west } = feature.result {
        write!(writer, r#","east":{},"west":{}"#, east, west)?;
    }
    write!(writer, "}}}}")?;

    Ok(())
}

/// Échappe une chaîne pour JSON
fn escape_json(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c.is_control() => {
                result.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => result.push(c),
        }
    }
    result
}
