//! Sweep grid generation.
//!
//! Every dataset is evaluated on a deterministic grid of independent values.
//! Points are computed as `min + i * step` from an integer counter, so there is no
//! drift from repeated floating-point addition.

use crate::domain::{IndependentSeries, SweepConfig};
use crate::error::EngineError;

/// Upper limit on the number of points a single sweep may produce.
pub const MAX_SWEEP_POINTS: usize = 10_000;

/// Relative slack (in units of `step`) for treating a point as equal to `max`.
const ENDPOINT_TOL: f64 = 1e-9;

/// Generate the ordered sweep `min, min + step, ...` up to and including `max`.
///
/// The last point is the largest grid value `<= max`; `max` itself is only included
/// when `max - min` is a multiple of `step`. `min == max` yields a single point.
pub fn generate(config: &SweepConfig) -> Result<IndependentSeries, EngineError> {
    let SweepConfig { min, max, step } = *config;

    if !(min.is_finite() && max.is_finite() && step.is_finite()) {
        return Err(EngineError::invalid_range(format!(
            "sweep bounds must be finite: min={min}, max={max}, step={step}"
        )));
    }
    if min < 0.0 {
        return Err(EngineError::invalid_range(format!("sweep min must be >= 0 (got {min})")));
    }
    if max < min {
        return Err(EngineError::invalid_range(format!(
            "sweep max ({max}) must not be below min ({min})"
        )));
    }
    if step <= 0.0 {
        return Err(EngineError::invalid_range(format!("sweep step must be > 0 (got {step})")));
    }

    let tol = step * ENDPOINT_TOL;
    let intervals = ((max - min + tol) / step).floor();
    if intervals >= MAX_SWEEP_POINTS as f64 {
        return Err(EngineError::invalid_range(format!(
            "sweep [{min}, {max}] with step {step} exceeds {MAX_SWEEP_POINTS} points"
        )));
    }

    let n = intervals as usize + 1;
    let mut out: Vec<f64> = Vec::with_capacity(n);
    for i in 0..n {
        let x = min + step * i as f64;
        // Points within tolerance of `max` snap onto it, from either side.
        let x = if (max - x).abs() <= tol { max } else { x.min(max) };
        if out.last().is_some_and(|&prev| x <= prev) {
            return Err(EngineError::invalid_range(format!(
                "sweep step {step} is below the float resolution near {x}"
            )));
        }
        out.push(x);
    }

    Ok(IndependentSeries::from_sorted(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(min: f64, max: f64, step: f64) -> Vec<f64> {
        generate(&SweepConfig::new(min, max, step)).unwrap().as_slice().to_vec()
    }

    #[test]
    fn inclusive_when_evenly_divisible() {
        let v = values(10.0, 100.0, 10.0);
        assert_eq!(v, vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0]);
    }

    #[test]
    fn never_passes_max() {
        let v = values(10.0, 95.0, 10.0);
        assert_eq!(v.len(), 9);
        assert_eq!(v[0], 10.0);
        assert_eq!(v[8], 90.0);
        assert!(!v.contains(&95.0));
    }

    #[test]
    fn single_point_when_min_equals_max() {
        assert_eq!(values(50.0, 50.0, 5.0), vec![50.0]);
    }

    #[test]
    fn no_drift_for_fractional_steps() {
        let v = values(0.0, 1.0, 0.1);
        assert_eq!(v.len(), 11);
        assert_eq!(v[10], 1.0);
        for w in v.windows(2) {
            assert!(w[1] > w[0]);
        }
    }

    #[test]
    fn malformed_ranges_are_rejected() {
        for (min, max, step) in [
            (10.0, 5.0, 1.0),
            (0.0, 10.0, 0.0),
            (0.0, 10.0, -1.0),
            (-1.0, 10.0, 1.0),
            (0.0, f64::INFINITY, 1.0),
            (0.0, 1.0e9, 1.0),
        ] {
            let err = generate(&SweepConfig::new(min, max, step)).unwrap_err();
            assert!(matches!(err, EngineError::InvalidRange(_)), "{min},{max},{step}: {err}");
        }
    }

    #[test]
    fn endpoint_snaps_from_below() {
        // 3 * 4.3 rounds to 12.899999999999999.
        let v = values(0.0, 12.9, 4.3);
        assert_eq!(v.len(), 4);
        assert_eq!(v[3], 12.9);
    }

    #[test]
    fn step_below_float_resolution_is_rejected() {
        let err = generate(&SweepConfig::new(1e16, 1e16 + 4.0, 1.0)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidRange(_)), "{err}");
    }
}
