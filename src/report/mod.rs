//! Reporting utilities: summary metrics, terminal tables and Markdown reports.
//!
//! We keep formatting code in one place so:
//! - the engine stays clean and testable
//! - output changes are localized (important for snapshot tests)

pub mod format;
pub mod markdown;

pub use format::*;
pub use markdown::*;

use serde::Serialize;

use crate::domain::{AssayKind, ResponseDataset, SimConfig};

/// Highest response of a concentration assay and where it first occurs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AssayPeak {
    pub kind: AssayKind,
    pub max_y: f64,
    pub at_x: f64,
}

/// Degradation reached at the end of the time sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DegradationEndpoint {
    pub time: f64,
    pub degraded_pct: f64,
    pub rate: f64,
}

/// Headline numbers for one recomputation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub peaks: Vec<AssayPeak>,
    pub degradation: Option<DegradationEndpoint>,
}

impl SimulationSummary {
    pub fn peak(&self, kind: AssayKind) -> Option<&AssayPeak> {
        self.peaks.iter().find(|p| p.kind == kind)
    }
}

/// Compute summary metrics from built datasets.
pub fn summarize(datasets: &[ResponseDataset], config: &SimConfig) -> SimulationSummary {
    let mut peaks = Vec::new();
    let mut degradation = None;

    for ds in datasets {
        match ds.kind() {
            AssayKind::PhotocatalyticDegradation => {
                degradation = ds.points.last().map(|p| DegradationEndpoint {
                    time: p.x,
                    degraded_pct: p.y,
                    rate: config.params.decay.rate,
                });
            }
            kind => {
                if let Some(peak) = peak_of(ds) {
                    peaks.push(AssayPeak {
                        kind,
                        max_y: peak.1,
                        at_x: peak.0,
                    });
                }
            }
        }
    }

    SimulationSummary { peaks, degradation }
}

/// First point holding the maximum response.
fn peak_of(ds: &ResponseDataset) -> Option<(f64, f64)> {
    let mut best: Option<(f64, f64)> = None;
    for p in &ds.points {
        match best {
            Some((_, y)) if p.y <= y => {}
            _ => best = Some((p.x, p.y)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DataPoint, DatasetMeta};

    fn ds(kind: AssayKind, pts: &[(f64, f64)]) -> ResponseDataset {
        ResponseDataset {
            meta: DatasetMeta::for_kind(kind),
            points: pts.iter().map(|&(x, y)| DataPoint { x, y }).collect(),
        }
    }

    #[test]
    fn peak_reports_first_maximum() {
        let datasets = vec![
            ds(AssayKind::Antibacterial, &[(0.0, 5.0), (10.0, 7.0), (20.0, 7.0)]),
            ds(AssayKind::PhotocatalyticDegradation, &[(0.0, 0.0), (60.0, 95.0)]),
        ];
        let summary = summarize(&datasets, &SimConfig::default());

        let peak = summary.peak(AssayKind::Antibacterial).unwrap();
        assert_eq!(peak.max_y, 7.0);
        assert_eq!(peak.at_x, 10.0);
        assert!(summary.peak(AssayKind::Antioxidant).is_none());

        let end = summary.degradation.unwrap();
        assert_eq!(end.time, 60.0);
        assert_eq!(end.degraded_pct, 95.0);
        assert_eq!(end.rate, 0.05);
    }
}
