// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — ESIV Integrity Estimator
// ─────────────────────────────────────────────────────────────────────

/// Map raw surprise to integrity: `I = 1 - clamp(S, 0, 1)`.
///
/// Out-of-range surprise (upstream noise) is clamped silently. The
/// result is computed directly from the current S, so there is no lag
/// when surprise drops. A NaN surprise yields a NaN integrity; callers
/// that need finite output go through [`crate::GovernanceEngine`].
#[inline]
pub fn compute_integrity(s: f64) -> f64 {
    1.0 - s.clamp(0.0, 1.0)
}
