//! Point d'entrée CLI pour usng-cli

use anyhow::Result;
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::{fmt, EnvFilter};
use usng_cli::Config;

// Charger .env au démarrage
fn load_env() {
    // Chercher .env dans le répertoire courant
    if dotenvy::dotenv().is_err() {
        // Essayer depuis le répertoire du binaire
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let _ = dotenvy::from_path(dir.join(".env"));
            }
        }
    }
}

mod cli;

use cli::Commands;

/// Convertir entre latitude/longitude, UTM et références USNG/MGRS
#[derive(Parser)]
#[command(name = "usng-cli")]
#[command(author, version)]
#[command(about = "Convert between latitude/longitude, UTM and USNG/MGRS grid references")]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config preset name (default/nad27/mgrs) or path to a JSON config
    #[arg(long, default_value = "default", global = true)]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    // Charger .env avant tout
    load_env();

    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    let config = Config::resolve(&cli.config)?.apply_env()?;
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Encode {
            lat,
            lon,
            precision,
            mgrs,
            nad27,
        } => cli::cmd_encode(&config, lat, lon, precision, mgrs, nad27)?,
        Commands::Decode {
            reference,
            point,
            geojson,
        } => cli::cmd_decode(&config, &reference, point, geojson.as_deref())?,
        Commands::ToUtm {
            lat,
            lon,
            zone,
            hemisphere,
        } => cli::cmd_to_utm(&config, lat, lon, zone, hemisphere)?,
        Commands::FromUtm {
            easting,
            northing,
            zone,
            south,
            accuracy,
        } => cli::cmd_from_utm(&config, easting, northing, zone, south, accuracy)?,
        Commands::Zone { lat, lon } => cli::cmd_zone(lat, lon)?,
        Commands::Bbox {
            north,
            south,
            east,
            west,
        } => cli::cmd_bbox(&config, north, south, east, west)?,
        Commands::Batch {
            input,
            direction,
            point,
            report,
            geojson,
        } => cli::cmd_batch(
            &config,
            &input,
            direction,
            point,
            report.as_deref(),
            geojson.as_deref(),
        )?,
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
