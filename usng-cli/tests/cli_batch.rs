//! Tests d'intégration du traitement par lots (fichier → rapport JSON / GeoJSON)

use std::path::PathBuf;

use usng_cli::batch::{read_lines, run_batch, Direction};
use usng_cli::export::geojson::{export_to_geojson, DecodedFeature};
use usng_cli::report::Conversion;
use usng_cli::{BatchStatus, Config};

fn temp_file(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_encode_file_to_report() {
    let input = temp_file(
        "usng_cli_encode_input.csv",
        "# lat,lon\n38.8977,-77.0365\n-33.8568;151.2153\n0 0\n\n85,0\n",
    );
    let lines = read_lines(&input).unwrap();
    assert_eq!(lines.len(), 6);

    let config = Config::from_preset("mgrs").unwrap();
    let report = run_batch(&lines, &config, Direction::Encode, false);

    assert_eq!(report.status, BatchStatus::PartialSuccess);
    assert_eq!(report.lines_converted, 3);
    assert_eq!(report.lines_failed, 1);
    assert_eq!(report.lines_skipped, 2);

    let encoded: Vec<&str> = report
        .records
        .iter()
        .filter_map(|r| match &r.output {
            Conversion::Grid { usng } => Some(usng.as_str()),
            Conversion::Decoded(_) => None,
        })
        .collect();
    assert_eq!(
        encoded,
        ["18SUJ2339407396", "56HLH3490152289", "31NAA6602100000"]
    );
    assert!(report.errors[0].message.contains("outside the USNG grid"));

    let report_path = std::env::temp_dir().join("usng_cli_encode_report.json");
    report.save_to_file(&report_path).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(json["status"], "PartialSuccess");
    assert_eq!(json["records"][0]["line"], 2);
    assert_eq!(json["errors"][0]["line"], 6);

    std::fs::remove_file(&input).ok();
    std::fs::remove_file(&report_path).ok();
}

#[test]
fn test_decode_file_to_geojson() {
    let input = temp_file(
        "usng_cli_decode_input.txt",
        "18S UJ 2348 0647\n18s%20uj%2023480647\n18S\nnot a reference\n",
    );
    let lines = read_lines(&input).unwrap();
    let report = run_batch(&lines, &Config::default(), Direction::Decode, false);

    assert_eq!(report.lines_converted, 3);
    assert_eq!(report.lines_failed, 1);
    assert_eq!(report.records[0].output, report.records[1].output);

    let features: Vec<DecodedFeature> = report
        .records
        .iter()
        .filter_map(|r| match &r.output {
            Conversion::Decoded(result) => Some(DecodedFeature {
                reference: r.input.clone(),
                result: *result,
            }),
            Conversion::Grid { .. } => None,
        })
        .collect();

    let output = std::env::temp_dir().join("usng_cli_decode.geojson");
    export_to_geojson(&features, &output).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();

    let collection = json["features"].as_array().unwrap();
    assert_eq!(collection.len(), 3);
    assert!(collection
        .iter()
        .all(|f| f["geometry"]["type"] == "Polygon"));
    assert_eq!(collection[2]["properties"]["usng"], "18S");

    std::fs::remove_file(&input).ok();
    std::fs::remove_file(&output).ok();
}

#[test]
fn test_nad27_config_changes_output() {
    let lines = vec!["38.8977,-77.0365".to_string()];
    let nad83 = run_batch(&lines, &Config::default(), Direction::Encode, false);
    let nad27 = run_batch(
        &lines,
        &Config::from_preset("nad27").unwrap(),
        Direction::Encode,
        false,
    );

    assert_eq!(
        nad83.records[0].output,
        Conversion::Grid {
            usng: "18S UJ 2339 0739".to_string()
        }
    );
    assert_eq!(
        nad27.records[0].output,
        Conversion::Grid {
            usng: "18S UJ 2339 0718".to_string()
        }
    );
}

#[test]
fn test_missing_input_file() {
    assert!(read_lines(std::path::Path::new("/nonexistent/usng_input.csv")).is_err());
}
