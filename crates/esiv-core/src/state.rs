// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — ESIV Agent State
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use esiv_types::{GovernorConfig, TurnRecord};

/// Previous-turn values for one monitored agent.
///
/// Mutated exactly once per accepted turn and never shared between
/// agents. `e`, `s` and `i` are recomputed every turn and kept only for
/// logging; `v`, `lambda` and `integral_error_v` drive the next turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    pub e: f64,
    pub s: f64,
    pub i: f64,
    pub v: f64,
    pub v_prev: f64,
    pub rho: f64,
    pub lambda: f64,
    pub integral_error_v: f64,
    pub turns: u64,
}

impl Default for AgentState {
    fn default() -> Self {
        Self {
            e: 0.0,
            s: 0.0,
            i: 1.0,
            v: 0.0,
            v_prev: 0.0,
            rho: 1.0,
            lambda: 0.15,
            integral_error_v: 0.0,
            turns: 0,
        }
    }
}

impl AgentState {
    /// Fresh state with λ taken from `config.lambda_init`.
    pub fn new(config: &GovernorConfig) -> Self {
        Self {
            lambda: config.lambda_init,
            ..Default::default()
        }
    }

    /// Snapshot the last applied turn as a time-series row.
    pub fn to_record(&self, time: f64, void_event: bool) -> TurnRecord {
        TurnRecord {
            time,
            energy: self.e,
            integrity: self.i,
            surprise: self.s,
            void: self.v,
            lambda: self.lambda,
            rho: self.rho,
            void_event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_defaults() {
        let st = AgentState::default();
        assert_eq!(st.e, 0.0);
        assert_eq!(st.s, 0.0);
        assert_eq!(st.i, 1.0);
        assert_eq!(st.v, 0.0);
        assert_eq!(st.v_prev, 0.0);
        assert_eq!(st.rho, 1.0);
        assert!((st.lambda - 0.15).abs() < 1e-12);
        assert_eq!(st.integral_error_v, 0.0);
        assert_eq!(st.turns, 0);
    }

    #[test]
    fn test_new_uses_configured_lambda() {
        let cfg = GovernorConfig {
            lambda_init: 0.1,
            ..Default::default()
        };
        assert!((AgentState::new(&cfg).lambda - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_to_record_maps_fields() {
        let st = AgentState {
            e: 0.4,
            s: 0.2,
            i: 0.8,
            v: -0.4,
            rho: 0.7,
            lambda: 0.12,
            ..Default::default()
        };
        let rec = st.to_record(3.0, false);
        assert_eq!(rec.time, 3.0);
        assert_eq!(rec.energy, 0.4);
        assert_eq!(rec.integrity, 0.8);
        assert_eq!(rec.surprise, 0.2);
        assert_eq!(rec.void, -0.4);
        assert_eq!(rec.lambda, 0.12);
        assert_eq!(rec.rho, 0.7);
        assert!(!rec.void_event);
    }
}
