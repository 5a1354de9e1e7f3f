// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — ESIV Void Detector
// ─────────────────────────────────────────────────────────────────────

/// True iff `|v| < threshold`.
///
/// Evaluated fresh each turn with no hysteresis; consecutive
/// near-equilibrium turns each report an event. A threshold is used
/// instead of an exact-zero test because V is a floating-point
/// accumulation.
#[inline]
pub fn detect_void(v: f64, threshold: f64) -> bool {
    v.abs() < threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inside_threshold() {
        assert!(detect_void(0.005, 0.01));
    }

    #[test]
    fn test_outside_threshold() {
        assert!(!detect_void(0.02, 0.01));
    }

    #[test]
    fn test_negative_uses_magnitude() {
        assert!(detect_void(-0.005, 0.01));
        assert!(!detect_void(-0.02, 0.01));
    }

    #[test]
    fn test_boundary_is_exclusive() {
        assert!(!detect_void(0.01, 0.01));
        assert!(!detect_void(-0.01, 0.01));
    }

    #[test]
    fn test_exact_zero() {
        assert!(detect_void(0.0, 0.01));
    }

    #[test]
    fn test_nan_never_fires() {
        assert!(!detect_void(f64::NAN, 0.01));
    }

    #[test]
    fn test_repeated_calls_agree() {
        let first = detect_void(0.004, 0.01);
        for _ in 0..5 {
            assert_eq!(detect_void(0.004, 0.01), first);
        }
    }
}
