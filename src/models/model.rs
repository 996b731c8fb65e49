//! Response model evaluation for the four assays.
//!
//! The dataset builder relies on one primitive operation: evaluate `y(x)` for a given
//! assay kind and parameter set. Each model is a closed form built on
//! `math::kinetics`, clamped into the assay's output bound.

use crate::domain::{AssayKind, DecayConfig, ModelParams, SaturationParams};
use crate::error::EngineError;
use crate::math::{first_order_conversion, saturation_fraction};

/// Largest `f64` strictly below 100: degradation approaches but never reaches 100 %.
pub const DEGRADATION_CEILING: f64 = f64::from_bits(100.0_f64.to_bits() - 1);

/// Evaluate the model selected by `kind` at `x` (concentration in µg/ml, or time in min).
pub fn evaluate(kind: AssayKind, x: f64, params: &ModelParams) -> Result<f64, EngineError> {
    match kind {
        AssayKind::Antibacterial => zone_of_inhibition(x, &params.antibacterial),
        AssayKind::BiofilmInhibition => biofilm_inhibition(x, &params.biofilm),
        AssayKind::Antioxidant => antioxidant_rsa(x, &params.antioxidant),
        AssayKind::PhotocatalyticDegradation => dye_degradation(x, &params.decay),
    }
}

/// Zone of inhibition (mm) at concentration `c`.
pub fn zone_of_inhibition(c: f64, params: &SaturationParams) -> Result<f64, EngineError> {
    saturating_response(AssayKind::Antibacterial, c, params)
}

/// Biofilm inhibition (%) at concentration `c`.
pub fn biofilm_inhibition(c: f64, params: &SaturationParams) -> Result<f64, EngineError> {
    saturating_response(AssayKind::BiofilmInhibition, c, params)
}

/// Radical scavenging activity (%) at concentration `c`.
pub fn antioxidant_rsa(c: f64, params: &SaturationParams) -> Result<f64, EngineError> {
    saturating_response(AssayKind::Antioxidant, c, params)
}

/// Dye degraded (%) after `t` minutes: `100 * (1 - exp(-k t))`.
pub fn dye_degradation(t: f64, decay: &DecayConfig) -> Result<f64, EngineError> {
    check_input(AssayKind::PhotocatalyticDegradation, t)?;
    decay.validate()?;

    let y = 100.0 * first_order_conversion(decay.rate, t);
    Ok(y.clamp(0.0, DEGRADATION_CEILING))
}

fn saturating_response(kind: AssayKind, c: f64, params: &SaturationParams) -> Result<f64, EngineError> {
    check_input(kind, c)?;
    let bound = kind.meta().bound;
    params.validate(bound)?;

    let span = params.ceiling - params.baseline;
    let y = params.baseline + span * saturation_fraction(c, params.half_saturation);
    Ok(y.clamp(bound.0, bound.1))
}

fn check_input(kind: AssayKind, x: f64) -> Result<(), EngineError> {
    if !x.is_finite() || x < 0.0 {
        let meta = kind.meta();
        return Err(EngineError::domain(format!(
            "{} must be finite and >= 0 {} (got {x})",
            meta.x_label.to_lowercase(),
            meta.unit_x
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concentration_models_start_at_baseline() {
        let params = ModelParams::default();
        assert_eq!(evaluate(AssayKind::Antibacterial, 0.0, &params).unwrap(), 5.0);
        assert_eq!(evaluate(AssayKind::BiofilmInhibition, 0.0, &params).unwrap(), 20.0);
        assert_eq!(evaluate(AssayKind::Antioxidant, 0.0, &params).unwrap(), 10.0);
    }

    #[test]
    fn low_dose_slope_matches_linear_term() {
        let params = ModelParams::default();
        let h = 1e-3;
        let slope = (evaluate(AssayKind::Antibacterial, h, &params).unwrap() - 5.0) / h;
        assert!((slope - 0.15).abs() < 1e-4, "slope {slope}");
        let slope = (evaluate(AssayKind::BiofilmInhibition, h, &params).unwrap() - 20.0) / h;
        assert!((slope - 0.6).abs() < 1e-4, "slope {slope}");
    }

    #[test]
    fn zone_of_inhibition_is_concave() {
        let params = ModelParams::default();
        let y = |c: f64| zone_of_inhibition(c, &params.antibacterial).unwrap();
        let first = y(50.0) - y(0.0);
        let second = y(100.0) - y(50.0);
        assert!(first > second && second > 0.0);
    }

    #[test]
    fn degradation_scenario() {
        let decay = DecayConfig::new(0.05).unwrap();
        assert_eq!(dye_degradation(0.0, &decay).unwrap(), 0.0);
        let at_60 = dye_degradation(60.0, &decay).unwrap();
        assert!((at_60 - 100.0 * (1.0 - (-3.0_f64).exp())).abs() < 1e-9);
    }

    #[test]
    fn degradation_never_reaches_100() {
        let decay = DecayConfig::new(0.2).unwrap();
        let y = dye_degradation(10_000.0, &decay).unwrap();
        assert!(y < 100.0);
        assert_eq!(y, DEGRADATION_CEILING);
    }

    #[test]
    fn out_of_domain_inputs_fail() {
        let params = ModelParams::default();
        for kind in AssayKind::ALL {
            assert!(matches!(evaluate(kind, -1.0, &params), Err(EngineError::Domain(_))));
            assert!(matches!(evaluate(kind, f64::NAN, &params), Err(EngineError::Domain(_))));
        }
        let decay = DecayConfig { rate: 0.3 };
        assert!(matches!(dye_degradation(5.0, &decay), Err(EngineError::Domain(_))));
    }
}
