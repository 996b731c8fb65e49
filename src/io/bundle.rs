//! Read/write simulation bundle JSON files.
//!
//! A bundle is the "portable" representation of one recomputation:
//! - the validated configuration (sweeps + model constants)
//! - every dataset exactly as charted and exported
//!
//! `agnp plot --bundle` renders a saved bundle without recomputing anything.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::app::pipeline::SimulationRun;
use crate::domain::{AssayKind, ResponseDataset, SimConfig};
use crate::error::AppError;

/// On-disk bundle schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationBundle {
    pub tool: String,
    pub version: String,
    pub config: SimConfig,
    pub datasets: Vec<ResponseDataset>,
}

impl SimulationBundle {
    pub fn from_run(run: &SimulationRun) -> Self {
        Self {
            tool: "agnp".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            config: run.config,
            datasets: run.datasets.to_vec(),
        }
    }

    pub fn dataset(&self, kind: AssayKind) -> Option<&ResponseDataset> {
        self.datasets.iter().find(|ds| ds.kind() == kind)
    }
}

/// Write a bundle JSON file.
pub fn write_bundle_json(path: &Path, run: &SimulationRun) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create bundle JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &SimulationBundle::from_run(run))
        .map_err(|e| AppError::new(2, format!("Failed to write bundle JSON: {e}")))?;

    log::info!("wrote bundle {}", path.display());
    Ok(())
}

/// Read a bundle JSON file.
pub fn read_bundle_json(path: &Path) -> Result<SimulationBundle, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open bundle JSON '{}': {e}", path.display())))?;
    let bundle: SimulationBundle =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid bundle JSON: {e}")))?;
    Ok(bundle)
}
