//! Rapport de conversion par lots
//!
//! Une ligne invalide n'interrompt pas le lot : elle est consignée avec son
//! numéro et la raison du rejet.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;
use usng::Unprojected;

/// Statut global du lot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BatchStatus {
    /// Toutes les lignes converties
    Success,
    /// Des lignes converties, d'autres rejetées
    PartialSuccess,
    /// Aucune ligne convertie
    Failed,
}

/// Résultat d'une ligne
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Conversion {
    /// Référence de grille (encodage)
    Grid { usng: String },
    /// Point ou cellule (décodage)
    Decoded(Unprojected),
}

/// Ligne convertie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRecord {
    /// Numéro de ligne (à partir de 1)
    pub line: usize,
    pub input: String,
    pub output: Conversion,
}

/// Ligne rejetée
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchError {
    pub line: usize,
    pub input: String,
    pub message: String,
}

/// Rapport complet d'un lot
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// Durée du traitement
    pub duration_secs: f64,
    pub status: BatchStatus,

    /// Lignes lues, vides et commentaires compris
    pub lines_read: usize,
    pub lines_converted: usize,
    pub lines_failed: usize,
    /// Lignes vides ou commentaires (`#`)
    pub lines_skipped: usize,

    pub records: Vec<BatchRecord>,
    pub errors: Vec<BatchError>,
}

impl Default for BatchReport {
    fn default() -> Self {
        Self {
            duration_secs: 0.0,
            status: BatchStatus::Success,
            lines_read: 0,
            lines_converted: 0,
            lines_failed: 0,
            lines_skipped: 0,
            records: Vec::new(),
            errors: Vec::new(),
        }
    }
}

impl BatchReport {
    /// Enregistre une ligne convertie
    pub fn record_success(&mut self, line: usize, input: &str, output: Conversion) {
        self.lines_read += 1;
        self.lines_converted += 1;
        self.records.push(BatchRecord {
            line,
            input: input.to_string(),
            output,
        });
    }

    /// Enregistre une ligne rejetée
    pub fn record_error(&mut self, line: usize, input: &str, message: String) {
        self.lines_read += 1;
        self.lines_failed += 1;
        self.errors.push(BatchError {
            line,
            input: input.to_string(),
            message,
        });
    }

    pub fn record_skipped(&mut self) {
        self.lines_read += 1;
        self.lines_skipped += 1;
    }

    /// Définit la durée du lot
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs_f64();
    }

    /// Détermine le statut final
    pub fn finalize(&mut self) {
        self.status = match (self.lines_converted, self.lines_failed) {
            (_, 0) => BatchStatus::Success,
            (0, _) => BatchStatus::Failed,
            _ => BatchStatus::PartialSuccess,
        };
    }

    /// Affiche le rapport sur la sortie d'erreur
    pub fn display(&self) {
        eprintln!("\n{}", "=".repeat(60));
        eprintln!("BATCH REPORT");
        eprintln!("{}", "=".repeat(60));

        eprintln!("\nStatus: {:?}", self.status);
        eprintln!("Duration: {:.3}s", self.duration_secs);
        eprintln!("\n--- SUMMARY ---");
        eprintln!("{}", self.summary());

        if !self.errors.is_empty() {
            eprintln!("\n--- ERRORS ({}) ---", self.errors.len());
            for e in self.errors.iter().take(20) {
                eprintln!("  [line {}] '{}': {}", e.line, e.input, e.message);
            }
            if self.errors.len() > 20 {
                eprintln!("  ... and {} more", self.errors.len() - 20);
            }
        }

        eprintln!("\n{}", "=".repeat(60));
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Affichage compact pour le résumé
    pub fn summary(&self) -> String {
        format!(
            "{} lines: {} converted, {} failed, {} skipped",
            self.lines_read, self.lines_converted, self.lines_failed, self.lines_skipped
        )
    }
}
