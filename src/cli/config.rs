//! TOML configuration file support.
//!
//! Instead of passing many CLI flags, users can keep settings in a config file:
//!
//! ```toml
//! # agnp.toml
//! [sweep]
//! max_concentration = 150
//! concentration_step = 5
//! time_max = 90
//!
//! [degradation]
//! rate = 0.08
//!
//! [models.antibacterial]
//! ceiling = 25.0
//! half_saturation = 120.0
//! ```
//!
//! Every key is optional; CLI flags override file values, which override defaults.

use std::path::Path;

use serde::Deserialize;

use crate::domain::{SaturationParams, SimConfig};
use crate::error::AppError;

/// Root configuration structure for `agnp.toml` files.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub sweep: SweepSection,
    #[serde(default)]
    pub degradation: DegradationSection,
    #[serde(default)]
    pub models: ModelsSection,
}

/// Concentration and time sweep settings.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SweepSection {
    pub min_concentration: Option<f64>,
    pub max_concentration: Option<f64>,
    pub concentration_step: Option<f64>,
    pub time_max: Option<f64>,
    pub time_step: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DegradationSection {
    pub rate: Option<f64>,
}

/// Per-assay saturation constants.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelsSection {
    pub antibacterial: Option<SaturationOverride>,
    pub biofilm_inhibition: Option<SaturationOverride>,
    pub antioxidant: Option<SaturationOverride>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SaturationOverride {
    pub baseline: Option<f64>,
    pub ceiling: Option<f64>,
    pub half_saturation: Option<f64>,
}

impl SaturationOverride {
    fn apply(&self, params: &mut SaturationParams) {
        if let Some(v) = self.baseline {
            params.baseline = v;
        }
        if let Some(v) = self.ceiling {
            params.ceiling = v;
        }
        if let Some(v) = self.half_saturation {
            params.half_saturation = v;
        }
    }
}

impl FileConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::new(2, format!("Failed to read config file '{}': {e}", path.display())))?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, AppError> {
        toml::from_str(content).map_err(|e| AppError::new(2, format!("Failed to parse TOML configuration: {e}")))
    }

    /// Overlay the values present in this file onto `config`.
    pub fn apply(&self, config: &mut SimConfig) {
        let sweep = &self.sweep;
        if let Some(v) = sweep.min_concentration {
            config.min_concentration = v;
        }
        if let Some(v) = sweep.max_concentration {
            config.max_concentration = v;
        }
        if let Some(v) = sweep.concentration_step {
            config.concentration_step = v;
        }
        if let Some(v) = sweep.time_max {
            config.time_max = v;
        }
        if let Some(v) = sweep.time_step {
            config.time_step = v;
        }
        if let Some(v) = self.degradation.rate {
            config.params.decay.rate = v;
        }

        let models = &self.models;
        if let Some(o) = &models.antibacterial {
            o.apply(&mut config.params.antibacterial);
        }
        if let Some(o) = &models.biofilm_inhibition {
            o.apply(&mut config.params.biofilm);
        }
        if let Some(o) = &models.antioxidant {
            o.apply(&mut config.params.antioxidant);
        }
    }
}
