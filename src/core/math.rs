/// Clamps `x` to the symmetric range `[-limit, limit]`.
///
/// Total for any inputs: a negative or NaN `limit` falls through the
/// comparisons instead of panicking the way `f64::clamp` does on an
/// inverted range.
pub fn clamp_abs(x: f64, limit: f64) -> f64 {
    if x < -limit {
        -limit
    } else if x > limit {
        limit
    } else {
        x
    }
}

/// Sign of `x` with `sign(0) == 0`.
///
/// `f64::signum` returns ±1.0 for signed zeros, which would apply kinetic
/// friction to a body at rest.
pub fn sign(x: f64) -> f64 {
    if x == 0.0 { 0.0 } else { x.signum() }
}

#[cfg(test)]
mod math_tests {
    use super::*;

    #[test]
    fn test_clamp_abs() {
        assert_eq!(clamp_abs(5.0, 2.2), 2.2);
        assert_eq!(clamp_abs(-5.0, 2.2), -2.2);
        assert_eq!(clamp_abs(1.5, 2.2), 1.5);
        assert_eq!(clamp_abs(-1.5, 2.2), -1.5);
    }

    #[test]
    fn test_clamp_abs_is_total_for_degenerate_limits() {
        // A negative limit inverts the range; the comparisons resolve it
        // instead of panicking.
        assert_eq!(clamp_abs(0.0, -2.0), 2.0);
        assert_eq!(clamp_abs(5.0, -2.0), -2.0);

        // A NaN limit passes the value through.
        assert_eq!(clamp_abs(1.5, f64::NAN), 1.5);
    }

    #[test]
    fn test_sign_zero_is_zero() {
        assert_eq!(sign(0.0), 0.0, "sign of +0.0 must be 0");
        assert_eq!(sign(-0.0), 0.0, "sign of -0.0 must be 0");
        assert_eq!(sign(3.5), 1.0);
        assert_eq!(sign(-0.001), -1.0);
    }
}
