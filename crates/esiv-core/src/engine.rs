// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — ESIV Turn Engine
// ─────────────────────────────────────────────────────────────────────
//! Runs one governance turn over an agent's state:
//!
//!   1. Resolve Energy (direct or normalized from tokens + latency)
//!   2. Integrity from clamped Surprise
//!   3. Void via the leaky integrator
//!   4. λ via the clamped PI controller
//!   5. Void event from |V|
//!   6. Commit the new state and emit a [`TurnRecord`]
//!
//! The engine is the validating layer around the pure recurrences:
//! non-finite inputs are rejected before the state is touched, so a bad
//! turn never corrupts an agent's history.

use serde::{Deserialize, Serialize};

use esiv_types::{GovernorConfig, GovernorError, GovernorResult, TurnRecord};

use crate::detector::detect_void;
use crate::energy::EnergySource;
use crate::integrity::compute_integrity;
use crate::lambda::LambdaController;
use crate::state::AgentState;
use crate::void::update_void;

/// Raw per-turn inputs supplied by the monitoring layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurnInput {
    /// Timestamp carried into the record (seconds).
    pub time: f64,
    /// Raw surprise; may fall outside [0, 1].
    pub surprise: f64,
    pub energy: EnergySource,
    /// Coherence ρ.
    pub rho: f64,
}

impl TurnInput {
    /// Turn with a precomputed Energy.
    pub fn direct(time: f64, surprise: f64, energy: f64, rho: f64) -> Self {
        Self {
            time,
            surprise,
            energy: EnergySource::Direct(energy),
            rho,
        }
    }

    /// Turn whose Energy is normalized from token length and latency.
    pub fn normalized(time: f64, surprise: f64, token_len: u64, latency_s: f64, rho: f64) -> Self {
        Self {
            time,
            surprise,
            energy: EnergySource::Normalized {
                token_len,
                latency_s,
            },
            rho,
        }
    }

    pub(crate) fn validate(&self) -> GovernorResult<()> {
        let mut fields = vec![
            ("time", self.time),
            ("surprise", self.surprise),
            ("rho", self.rho),
        ];
        match self.energy {
            EnergySource::Direct(e) => fields.push(("energy", e)),
            EnergySource::Normalized { latency_s, .. } => fields.push(("latency_s", latency_s)),
        }
        for (name, value) in fields {
            if !value.is_finite() {
                log::warn!("rejecting turn: {name} is non-finite ({value})");
                return Err(GovernorError::Numerical(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if let EnergySource::Normalized { latency_s, .. } = self.energy {
            if latency_s < 0.0 {
                log::warn!("rejecting turn: negative latency {latency_s}");
                return Err(GovernorError::Validation(format!(
                    "latency_s must be >= 0, got {latency_s}"
                )));
            }
        }
        Ok(())
    }
}

/// Per-turn governance update, configured once.
#[derive(Debug, Clone)]
pub struct GovernanceEngine {
    config: GovernorConfig,
    controller: LambdaController,
}

impl GovernanceEngine {
    /// Build an engine; the config is validated first.
    pub fn new(config: GovernorConfig) -> GovernorResult<Self> {
        config.validate()?;
        let controller = LambdaController::from_config(&config);
        Ok(Self { config, controller })
    }

    /// Fresh state for a newly observed agent.
    pub fn new_state(&self) -> AgentState {
        AgentState::new(&self.config)
    }

    /// Apply one turn to `state` and return the emitted record.
    ///
    /// On error the state is left untouched.
    pub fn step(&self, state: &mut AgentState, input: &TurnInput) -> GovernorResult<TurnRecord> {
        input.validate()?;

        let e = input.energy.resolve(&self.config.energy);
        let s = input.surprise.clamp(0.0, 1.0);
        let i = compute_integrity(input.surprise);
        let v = update_void(e, i, state.v, self.config.void_decay);

        let e_v = v - self.config.void_setpoint;
        let e_rho = self.config.rho_setpoint - input.rho;
        let ctl = self
            .controller
            .step(e_v, e_rho, state.lambda, state.integral_error_v);
        if ctl.saturated() && ctl.lambda != state.lambda {
            log::warn!(
                "lambda saturated at {:.4} (uncapped {:.4}, turn {})",
                ctl.lambda,
                ctl.uncapped,
                state.turns + 1
            );
        }

        let void_event = detect_void(v, self.config.void_threshold);

        state.e = e;
        state.s = s;
        state.i = i;
        state.v_prev = state.v;
        state.v = v;
        state.rho = input.rho;
        state.lambda = ctl.lambda;
        state.integral_error_v = ctl.integral_error_v;
        state.turns += 1;

        log::debug!(
            "turn {}: E={e:.4} S={s:.4} I={i:.4} V={v:.4} lambda={:.4} rho={:.4}",
            state.turns,
            ctl.lambda,
            input.rho
        );
        if void_event {
            log::debug!("void event at turn {} (|V|={:.6})", state.turns, v.abs());
        }

        Ok(state.to_record(input.time, void_event))
    }

    pub fn config(&self) -> &GovernorConfig {
        &self.config
    }

    pub fn controller(&self) -> &LambdaController {
        &self.controller
    }
}

/// Recompute a recorded history under the current formulas.
///
/// Only the raw inputs of each row are used (`time`, `E`, `S`,
/// `coherence`); `I`, `V`, `lambda1` and `void_event` are derived afresh
/// starting from a new agent state.
pub fn replay(engine: &GovernanceEngine, history: &[TurnRecord]) -> GovernorResult<Vec<TurnRecord>> {
    let mut state = engine.new_state();
    history
        .iter()
        .map(|row| {
            let input = TurnInput::direct(row.time, row.surprise, row.energy, row.rho);
            engine.step(&mut state, &input)
        })
        .collect()
}
