//! Property tests for the sweep -> model -> dataset -> CSV chain.

use agnp_sim::app::pipeline::run_simulation;
use agnp_sim::dataset::build;
use agnp_sim::domain::{AssayKind, ModelParams, SaturationParams, SimConfig, SweepConfig};
use agnp_sim::io::export::{format_dataset, parse_dataset};
use agnp_sim::sweep::generate;
use proptest::prelude::*;

fn any_kind() -> impl Strategy<Value = AssayKind> {
    prop::sample::select(AssayKind::ALL.to_vec())
}

/// Saturation constants accepted for an assay whose output bound is `[0, hi]`.
fn saturation(hi: f64) -> impl Strategy<Value = SaturationParams> {
    (0.0..=1.0f64, 0.0..=1.0f64, 0.5..500.0f64).prop_map(move |(b, c, half)| {
        let baseline = b * hi;
        SaturationParams {
            baseline,
            ceiling: (baseline + c * (hi - baseline)).clamp(baseline, hi),
            half_saturation: half,
        }
    })
}

fn model_params() -> impl Strategy<Value = ModelParams> {
    let hi = |kind: AssayKind| kind.meta().bound.1;
    (
        saturation(hi(AssayKind::Antibacterial)),
        saturation(hi(AssayKind::BiofilmInhibition)),
        saturation(hi(AssayKind::Antioxidant)),
        1u32..=20,
    )
        .prop_map(|(antibacterial, biofilm, antioxidant, rate)| {
            let mut params = ModelParams {
                antibacterial,
                biofilm,
                antioxidant,
                ..ModelParams::default()
            };
            params.decay.rate = f64::from(rate) / 100.0;
            params
        })
}

/// Configurations reachable through the UI controls and the TOML model overrides.
fn valid_config() -> impl Strategy<Value = SimConfig> {
    (10u32..=200, 1u32..=20, 1u32..=48, 1u32..=30, model_params()).prop_flat_map(
        |(max, step, time_max, time_step, params)| {
            (0u32..=max).prop_map(move |min| {
                let mut config = SimConfig::default();
                config.min_concentration = f64::from(min);
                config.max_concentration = f64::from(max);
                config.concentration_step = f64::from(step);
                config.time_max = f64::from(time_max * 5);
                config.time_step = f64::from(time_step);
                config.params = params;
                config
            })
        },
    )
}

proptest! {
    #[test]
    fn sweep_is_ordered_and_within_range(min in 0u32..200, span in 0u32..200, step in 1u32..=20) {
        let (min, max, step) = (f64::from(min), f64::from(min + span), f64::from(step));
        let series = generate(&SweepConfig::new(min, max, step)).unwrap();
        let xs = series.as_slice();

        prop_assert_eq!(xs.len(), (span as usize) / (step as usize) + 1);
        prop_assert_eq!(xs[0], min);
        prop_assert!(*xs.last().unwrap() <= max);
        prop_assert!(max - *xs.last().unwrap() < step);
        for w in xs.windows(2) {
            prop_assert!(w[0] < w[1]);
        }
    }

    #[test]
    fn every_response_is_monotone_and_bounded(config in valid_config()) {
        let run = run_simulation(&config).unwrap();
        for ds in &run.datasets {
            let (lo, hi) = ds.kind().meta().bound;
            for p in &ds.points {
                prop_assert!(p.y.is_finite());
                prop_assert!(p.y >= lo && p.y <= hi, "{} out of bounds: {}", ds.kind().display_name(), p.y);
            }
            for w in ds.points.windows(2) {
                prop_assert!(w[0].y <= w[1].y);
            }
        }
        let dye = run.dataset(AssayKind::PhotocatalyticDegradation);
        prop_assert!(dye.points.iter().all(|p| p.y < 100.0));
    }

    #[test]
    fn dataset_length_matches_sweep(config in valid_config(), kind in any_kind()) {
        let series = generate(&config.sweep_for(kind)).unwrap();
        let ds = build(kind, &series, &config.params).unwrap();
        prop_assert_eq!(ds.len(), series.len());
        prop_assert_eq!(ds.xs(), series.as_slice().to_vec());
    }

    #[test]
    fn recomputation_is_deterministic(config in valid_config()) {
        let a = run_simulation(&config).unwrap();
        let b = run_simulation(&config).unwrap();
        prop_assert_eq!(&a.datasets, &b.datasets);
        prop_assert_eq!(a.applications_csv().unwrap(), b.applications_csv().unwrap());
    }

    #[test]
    fn csv_export_parses_back_exactly(config in valid_config(), kind in any_kind()) {
        let series = generate(&config.sweep_for(kind)).unwrap();
        let ds = build(kind, &series, &config.params).unwrap();
        let text = format_dataset(&ds).unwrap();
        prop_assert_eq!(parse_dataset(&text, kind).unwrap(), ds);
    }

    #[test]
    fn combined_export_parses_back_per_assay(config in valid_config()) {
        let run = run_simulation(&config).unwrap();
        let text = run.applications_csv().unwrap();
        for kind in AssayKind::CONCENTRATION {
            prop_assert_eq!(&parse_dataset(&text, kind).unwrap(), run.dataset(kind));
        }
    }
}

#[test]
fn default_params_are_valid() {
    assert!(ModelParams::default().validate().is_ok());
}

proptest! {
    #[test]
    fn overridden_saturation_params_validate(params in model_params()) {
        prop_assert!(params.validate().is_ok());
    }
}
