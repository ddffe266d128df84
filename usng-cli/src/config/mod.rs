//! Configuration du convertisseur en ligne de commande

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;
use usng::{Converter, Datum, UsngError};

/// Variable d'environnement surchargeant le datum
pub const ENV_DATUM: &str = "USNG_DATUM";
/// Variable d'environnement surchargeant la précision
pub const ENV_PRECISION: &str = "USNG_PRECISION";

/// Forme textuelle des références produites
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// "18S UJ 2348 0647"
    #[default]
    Usng,
    /// "18SUJ23480647"
    Mgrs,
}

/// Configuration principale
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Datum des conversions
    #[serde(default)]
    pub datum: Datum,

    /// Niveau de précision de l'encodage (0..=6)
    #[serde(default = "default_precision")]
    pub precision: u8,

    #[serde(default)]
    pub format: OutputFormat,
}

fn default_precision() -> u8 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            datum: Datum::default(),
            precision: default_precision(),
            format: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Charge une configuration depuis un fichier
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Self = serde_json::from_str(&content).context("Failed to parse config JSON")?;
        config.validate()
    }

    /// Charge une configuration depuis un preset embarqué
    pub fn from_preset(preset: &str) -> Result<Self> {
        match preset {
            "default" => Self::load_embedded(include_str!("presets/default.json")),
            "nad27" => Self::load_embedded(include_str!("presets/nad27.json")),
            "mgrs" => Self::load_embedded(include_str!("presets/mgrs.json")),
            _ => anyhow::bail!("Unknown preset: {}. Use: default, nad27, mgrs", preset),
        }
    }

    /// Preset embarqué, ou chemin vers un fichier JSON
    pub fn resolve(name: &str) -> Result<Self> {
        let path = Path::new(name);
        if path.extension().is_some_and(|ext| ext == "json") || path.exists() {
            Self::load(path)
        } else {
            Self::from_preset(name)
        }
    }

    fn load_embedded(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse embedded config")
    }

    fn validate(self) -> Result<Self> {
        if self.precision > 6 {
            anyhow::bail!("Invalid precision {}: expected 0..=6", self.precision);
        }
        Ok(self)
    }

    /// Applique `USNG_DATUM` et `USNG_PRECISION` si elles sont définies
    pub fn apply_env(self) -> Result<Self> {
        let datum = std::env::var(ENV_DATUM).ok();
        let precision = std::env::var(ENV_PRECISION).ok();
        self.with_overrides(datum.as_deref(), precision.as_deref())
    }

    /// Surcharge le datum et la précision depuis leur forme texte
    pub fn with_overrides(mut self, datum: Option<&str>, precision: Option<&str>) -> Result<Self> {
        if let Some(datum) = datum {
            self.datum = datum.parse().context(format!("Invalid {}", ENV_DATUM))?;
            debug!(datum = %self.datum, "datum overridden");
        }
        if let Some(precision) = precision {
            self.precision = precision
                .trim()
                .parse()
                .context(format!("Invalid {}: {}", ENV_PRECISION, precision))?;
            debug!(precision = self.precision, "precision overridden");
        }
        self.validate()
    }

    pub fn converter(&self) -> Converter {
        Converter::with_datum(self.datum)
    }

    /// Encode un point selon le format et la précision configurés
    pub fn encode(&self, converter: &Converter, lat: f64, lon: f64) -> Result<String, UsngError> {
        self.encode_at(converter, lat, lon, self.precision)
    }

    /// Encode un point selon le format configuré, à une précision donnée
    pub fn encode_at(
        &self,
        converter: &Converter,
        lat: f64,
        lon: f64,
        precision: u8,
    ) -> Result<String, UsngError> {
        match self.format {
            OutputFormat::Usng => converter.encode(lat, lon, precision),
            OutputFormat::Mgrs => converter.encode_mgrs(lat, lon, precision),
        }
    }
}
