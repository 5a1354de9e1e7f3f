// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — ESIV Void Accumulator
// ─────────────────────────────────────────────────────────────────────
//! Leaky integration of the Energy/Integrity imbalance.
//!
//! `V_t = γ · V_{t-1} + (E_t - I_t)`, `0 ≤ γ < 1`.
//!
//! Each turn adds its imbalance while older history decays
//! geometrically. For a bounded forcing `|E - I| ≤ M` the accumulator
//! stays inside `M / (1 - γ)`; a constant forcing `u` converges to the
//! fixed point `u / (1 - γ)`. The function holds no state: the caller
//! feeds the returned V back in as the next `v_prev`, which also makes
//! recorded histories replayable.

/// One step of the leaky integrator.
#[inline]
pub fn update_void(e: f64, i: f64, v_prev: f64, gamma: f64) -> f64 {
    gamma * v_prev + (e - i)
}

/// Steady-state magnitude bound `M / (1 - γ)` for forcing bounded by `M`.
pub fn steady_state_bound(max_imbalance: f64, gamma: f64) -> f64 {
    max_imbalance.abs() / (1.0 - gamma)
}
