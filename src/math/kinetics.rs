//! Stable kinetic primitives shared by the response models.
//!
//! - `saturation_fraction(x, K) = x / (K + x)` (hyperbolic / Michaelis-Menten occupancy)
//! - `first_order_conversion(k, t) = 1 - exp(-k t)` (first-order kinetics)
//!
//! Numerical notes:
//! - For small `k t`, `1 - exp(-k t)` suffers from catastrophic cancellation.
//!   We use `expm1` to keep precision near `t = 0`.
//! - Both primitives are non-decreasing in their first argument and stay in `[0, 1]`.

/// Fraction of the maximal effect reached at `x` with half-saturation constant `half`.
///
/// Callers guarantee `x >= 0` and `half > 0`.
pub fn saturation_fraction(x: f64, half: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    (x / (half + x)).clamp(0.0, 1.0)
}

/// Fraction converted after time `t` under first-order kinetics with rate `k`.
pub fn first_order_conversion(k: f64, t: f64) -> f64 {
    let x = k * t;
    if x <= 0.0 {
        return 0.0;
    }
    // 1 - exp(-x) computed as -expm1(-x).
    (-(-x).exp_m1()).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturation_limits() {
        assert_eq!(saturation_fraction(0.0, 10.0), 0.0);
        assert!((saturation_fraction(10.0, 10.0) - 0.5).abs() < 1e-15);
        assert!(saturation_fraction(1e12, 10.0) <= 1.0);
    }

    #[test]
    fn conversion_small_argument_is_precise() {
        let v = first_order_conversion(0.01, 1e-10);
        assert!((v - 1e-12).abs() < 1e-24, "got {v}");
    }

    #[test]
    fn conversion_is_monotone() {
        let mut prev = 0.0;
        for i in 0..=200 {
            let v = first_order_conversion(0.2, i as f64);
            assert!(v >= prev);
            assert!(v <= 1.0);
            prev = v;
        }
    }
}
