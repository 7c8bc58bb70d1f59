//! Generation settings, loadable from JSON.

use std::path::Path;

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::data::model::SyntheticSpectra;
use crate::data::peak::ParamRange;
use crate::synth::{self, SpectrumSynthesizer};

/// Problems found by [`SynthConfig::validate`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("grid must have at least one point")]
    EmptyGrid,
    #[error("a single-point grid needs x_range min == max, got [{min}, {max}]")]
    SinglePointRange { min: f64, max: f64 },
    #[error("x_range [{0}, {0}] is flat; a multi-point grid needs min < max")]
    FlatRange(f64),
    #[error("{name} must be finite with min <= max, got [{min}, {max}]")]
    InvalidRange { name: &'static str, min: f64, max: f64 },
    #[error("variance_limits lower bound must be > 0, got {0}")]
    NonPositiveVariance(f64),
}

/// Everything needed to reproduce one generated batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    pub n_spectra: usize,
    pub n_peaks: usize,
    pub n_points: usize,
    pub x_range: ParamRange,
    pub center_limits: ParamRange,
    pub variance_limits: ParamRange,
    pub amplitude_limits: ParamRange,
    /// Fixed seed for a reproducible stream; `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            n_spectra: 10,
            n_peaks: 3,
            n_points: synth::DEFAULT_N_POINTS,
            x_range: synth::DEFAULT_X_RANGE,
            center_limits: synth::DEFAULT_CENTER_LIMITS,
            variance_limits: synth::DEFAULT_VARIANCE_LIMITS,
            amplitude_limits: synth::DEFAULT_AMPLITUDE_LIMITS,
            seed: None,
        }
    }
}

impl SynthConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parsing synth config JSON")
    }

    /// Read a config file. Missing fields fall back to defaults; a config
    /// that fails [`validate`](Self::validate) is still returned, with a warning.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config = Self::from_json_str(&text)
            .with_context(|| format!("in {}", path.display()))?;
        if let Err(e) = config.validate() {
            warn!("{}: {e}", path.display());
        }
        Ok(config)
    }

    /// Check the parameters generation leaves unchecked.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_points == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        let ranges = [
            ("x_range", &self.x_range),
            ("center_limits", &self.center_limits),
            ("variance_limits", &self.variance_limits),
            ("amplitude_limits", &self.amplitude_limits),
        ];
        for (name, range) in ranges {
            if !range.is_ordered() {
                return Err(ConfigError::InvalidRange {
                    name,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        if self.n_points == 1 && !self.x_range.is_degenerate() {
            return Err(ConfigError::SinglePointRange {
                min: self.x_range.min,
                max: self.x_range.max,
            });
        }
        if self.n_points > 1 && self.x_range.is_degenerate() {
            return Err(ConfigError::FlatRange(self.x_range.min));
        }
        if self.variance_limits.min <= 0.0 {
            return Err(ConfigError::NonPositiveVariance(self.variance_limits.min));
        }
        Ok(())
    }

    pub fn synthesizer(&self) -> SpectrumSynthesizer {
        SpectrumSynthesizer {
            n_points: self.n_points,
            x_range: self.x_range,
            center_limits: self.center_limits,
            variance_limits: self.variance_limits,
            amplitude_limits: self.amplitude_limits,
        }
    }

    /// Generate `n_spectra × n_peaks`, seeded when `seed` is set.
    pub fn generate(&self) -> SyntheticSpectra {
        let synth = self.synthesizer();
        match self.seed {
            Some(seed) => synth.generate_seeded(self.n_spectra, self.n_peaks, seed),
            None => synth.generate(self.n_spectra, self.n_peaks),
        }
    }
}
