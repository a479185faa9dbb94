use crate::synthetic::{SynthesisAlgorithm, ZeroPolicy};
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Locale persistence
    pub locale_state_file: PathBuf,

    // Dictionaries
    pub translations_dir: Option<PathBuf>,

    // Synthetic metrics
    pub synthesis_algorithm: SynthesisAlgorithm,
    pub zero_metric_policy: ZeroPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            locale_state_file: std::env::var("LOCALE_STATE_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/locale.json")),

            translations_dir: std::env::var("TRANSLATIONS_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),

            synthesis_algorithm: match std::env::var("SYNTHESIS_ALGORITHM") {
                Ok(value) => value
                    .parse()
                    .context("SYNTHESIS_ALGORITHM must be 'legacy' or 'splitmix'")?,
                Err(_) => SynthesisAlgorithm::default(),
            },

            zero_metric_policy: match std::env::var("ZERO_METRIC_POLICY") {
                Ok(value) => value
                    .parse()
                    .context("ZERO_METRIC_POLICY must be 'missing' or 'authoritative'")?,
                Err(_) => ZeroPolicy::default(),
            },
        })
    }
}
