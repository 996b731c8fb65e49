//! Shared "simulation pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! config validation -> sweeps -> datasets -> summary
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets). Both
//! chart and export from the same `SimulationRun`, so the data on screen and the
//! data in a downloaded file are the same values.

use crate::dataset::build_all;
use crate::domain::{AssayKind, ResponseDataset, SimConfig};
use crate::error::EngineError;
use crate::io::export::{format_combined, format_dataset};
use crate::report::{SimulationSummary, summarize};

/// All computed outputs of a single recomputation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRun {
    pub config: SimConfig,
    /// Datasets in `AssayKind::ALL` order.
    pub datasets: [ResponseDataset; 4],
    pub summary: SimulationSummary,
}

impl SimulationRun {
    pub fn dataset(&self, kind: AssayKind) -> &ResponseDataset {
        &self.datasets[kind.index()]
    }

    /// CSV for the concentration assays, one shared concentration column.
    pub fn applications_csv(&self) -> Result<String, EngineError> {
        let datasets: Vec<&ResponseDataset> = AssayKind::CONCENTRATION
            .iter()
            .map(|&kind| self.dataset(kind))
            .collect();
        format_combined(&datasets)
    }

    /// CSV for the dye degradation time course.
    pub fn degradation_csv(&self) -> Result<String, EngineError> {
        format_dataset(self.dataset(AssayKind::PhotocatalyticDegradation))
    }
}

/// Execute the full pipeline and return the computed outputs.
pub fn run_simulation(config: &SimConfig) -> Result<SimulationRun, EngineError> {
    // 1) Validate once, at the boundary.
    config.validate()?;

    // 2) Sweeps + models -> datasets.
    let datasets = build_all(config)?;

    // 3) Summary metrics.
    let summary = summarize(&datasets, config);

    log::debug!(
        "recomputed: conc=[{}, {}] step {} ({} pts), time=[0, {}] step {} ({} pts), k={}",
        config.min_concentration,
        config.max_concentration,
        config.concentration_step,
        datasets[0].len(),
        config.time_max,
        config.time_step,
        datasets[3].len(),
        config.params.decay.rate,
    );

    Ok(SimulationRun {
        config: *config,
        datasets,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_is_rejected_before_building() {
        let mut config = SimConfig::default();
        config.max_concentration = 5.0;
        assert!(matches!(run_simulation(&config), Err(EngineError::InvalidRange(_))));
    }

    #[test]
    fn exports_are_serializations_of_the_charted_datasets() {
        let run = run_simulation(&SimConfig::default()).unwrap();

        let csv = run.degradation_csv().unwrap();
        let parsed = crate::io::parse_dataset(&csv, AssayKind::PhotocatalyticDegradation).unwrap();
        assert_eq!(&parsed, run.dataset(AssayKind::PhotocatalyticDegradation));

        let csv = run.applications_csv().unwrap();
        for kind in AssayKind::CONCENTRATION {
            assert_eq!(&crate::io::parse_dataset(&csv, kind).unwrap(), run.dataset(kind));
        }
    }

    #[test]
    fn recomputation_is_deterministic() {
        let config = SimConfig::default();
        assert_eq!(run_simulation(&config).unwrap(), run_simulation(&config).unwrap());
    }
}
