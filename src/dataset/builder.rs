//! Apply a response model over a sweep.
//!
//! Building is a pure transformation: identical inputs give bit-identical datasets,
//! which is what lets the charts and the CSV exports share one source of truth.

use crate::domain::{AssayKind, DataPoint, DatasetMeta, IndependentSeries, ModelParams, ResponseDataset, SimConfig};
use crate::error::EngineError;
use crate::models::evaluate;
use crate::sweep::generate;

/// Evaluate `kind`'s model at every sweep value, preserving order and cardinality.
pub fn build(
    kind: AssayKind,
    series: &IndependentSeries,
    params: &ModelParams,
) -> Result<ResponseDataset, EngineError> {
    let mut points = Vec::with_capacity(series.len());
    for &x in series.iter() {
        let y = evaluate(kind, x, params)?;
        if !y.is_finite() {
            return Err(EngineError::domain(format!(
                "non-finite {} response at x={x}",
                kind.display_name()
            )));
        }
        points.push(DataPoint { x, y });
    }

    Ok(ResponseDataset {
        meta: DatasetMeta::for_kind(kind),
        points,
    })
}

/// Build all four datasets for a configuration, in `AssayKind::ALL` order.
///
/// The concentration assays share one concentration sweep; degradation uses the
/// time sweep.
pub fn build_all(config: &SimConfig) -> Result<[ResponseDataset; 4], EngineError> {
    let concentrations = generate(&config.concentration_sweep())?;
    let times = generate(&config.time_sweep())?;
    let params = &config.params;

    Ok([
        build(AssayKind::Antibacterial, &concentrations, params)?,
        build(AssayKind::BiofilmInhibition, &concentrations, params)?,
        build(AssayKind::Antioxidant, &concentrations, params)?,
        build(AssayKind::PhotocatalyticDegradation, &times, params)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SweepConfig;

    #[test]
    fn build_preserves_order_and_length() {
        let series = generate(&SweepConfig::new(10.0, 95.0, 10.0)).unwrap();
        let ds = build(AssayKind::Antioxidant, &series, &ModelParams::default()).unwrap();
        assert_eq!(ds.len(), series.len());
        assert_eq!(ds.xs(), series.as_slice().to_vec());
        assert_eq!(ds.meta.y_label, "Antioxidant RSA");
    }

    #[test]
    fn build_all_matches_default_sweep_sizes() {
        let datasets = build_all(&SimConfig::default()).unwrap();
        for kind in AssayKind::CONCENTRATION {
            let ds = &datasets[kind.index()];
            assert_eq!(ds.kind(), kind);
            assert_eq!(ds.len(), 11);
        }
        let degradation = &datasets[AssayKind::PhotocatalyticDegradation.index()];
        assert_eq!(degradation.len(), 13);
        assert_eq!(degradation.points[12].x, 60.0);
    }

    #[test]
    fn invalid_params_surface_as_domain_errors() {
        let series = generate(&SweepConfig::new(0.0, 10.0, 1.0)).unwrap();
        let mut params = ModelParams::default();
        params.biofilm.half_saturation = 0.0;
        let err = build(AssayKind::BiofilmInhibition, &series, &params).unwrap_err();
        assert!(matches!(err, EngineError::Domain(_)));
    }
}
