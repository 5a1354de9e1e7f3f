// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — ESIV Governance Kernel Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{GovernorError, GovernorResult};

/// Normalization constants for the direct-Energy variant.
///
/// `E = α_L · min(tokens / max_token_norm, 1) + α_C · min(latency / max_latency_norm, 1)`,
/// clamped to [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyNorm {
    /// Token count that saturates the length term.
    /// Default: 4096.
    pub max_token_norm: f64,

    /// Latency (seconds) that saturates the compute term.
    /// Default: 30.0.
    pub max_latency_norm: f64,

    /// Weight of the length term.
    /// Default: 0.5.
    pub alpha_l: f64,

    /// Weight of the compute (latency) term.
    /// Default: 0.5.
    pub alpha_c: f64,
}

impl Default for EnergyNorm {
    fn default() -> Self {
        Self {
            max_token_norm: 4096.0,
            max_latency_norm: 30.0,
            alpha_l: 0.5,
            alpha_c: 0.5,
        }
    }
}

/// Runtime configuration for the governance kernel.
///
/// Fixed at initialization; the engine never mutates it mid-run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GovernorConfig {
    /// Void decay factor γ of the leaky integrator, must lie in [0, 1).
    /// Default: 0.85.
    pub void_decay: f64,

    /// A void event fires when |V| is strictly below this.
    /// Default: 0.01.
    pub void_threshold: f64,

    /// λ assigned to a freshly created agent state.
    /// Default: 0.15.
    pub lambda_init: f64,

    /// Lower clamp bound for λ.
    /// Default: 0.05.
    pub lambda_min: f64,

    /// Upper clamp bound for λ.
    /// Default: 0.20.
    pub lambda_max: f64,

    /// Proportional gain on the void error.
    /// Default: 0.05.
    pub kp: f64,

    /// Integral gain on the accumulated void error.
    /// Default: 0.01.
    pub ki: f64,

    /// Cross gain on the coherence error.
    /// Default: 0.02.
    pub k_rho: f64,

    /// Target void level; `e_V = V - void_setpoint`.
    /// Default: 0.0.
    pub void_setpoint: f64,

    /// Target coherence; `e_ρ = rho_setpoint - ρ`.
    /// Default: 1.0.
    pub rho_setpoint: f64,

    /// Optional symmetric bound on the integral accumulator.
    /// Default: None (unbounded accumulation).
    pub integral_limit: Option<f64>,

    /// Energy normalization constants.
    pub energy: EnergyNorm,
}

impl Default for GovernorConfig {
    fn default() -> Self {
        Self {
            void_decay: 0.85,
            void_threshold: 0.01,
            lambda_init: 0.15,
            lambda_min: 0.05,
            lambda_max: 0.20,
            kp: 0.05,
            ki: 0.01,
            k_rho: 0.02,
            void_setpoint: 0.0,
            rho_setpoint: 1.0,
            integral_limit: None,
            energy: EnergyNorm::default(),
        }
    }
}

fn require_finite(name: &str, value: f64) -> GovernorResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GovernorError::Config(format!(
            "{name} must be finite, got {value}"
        )))
    }
}

impl GovernorConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> GovernorResult<()> {
        for (name, value) in [
            ("void_decay", self.void_decay),
            ("void_threshold", self.void_threshold),
            ("lambda_init", self.lambda_init),
            ("lambda_min", self.lambda_min),
            ("lambda_max", self.lambda_max),
            ("kp", self.kp),
            ("ki", self.ki),
            ("k_rho", self.k_rho),
            ("void_setpoint", self.void_setpoint),
            ("rho_setpoint", self.rho_setpoint),
            ("energy.max_token_norm", self.energy.max_token_norm),
            ("energy.max_latency_norm", self.energy.max_latency_norm),
            ("energy.alpha_l", self.energy.alpha_l),
            ("energy.alpha_c", self.energy.alpha_c),
        ] {
            require_finite(name, value)?;
        }

        if !(0.0..1.0).contains(&self.void_decay) {
            return Err(GovernorError::Config(format!(
                "void_decay must be in [0, 1), got {}",
                self.void_decay
            )));
        }
        if self.void_threshold <= 0.0 {
            return Err(GovernorError::Config(format!(
                "void_threshold must be > 0, got {}",
                self.void_threshold
            )));
        }
        if self.lambda_min > self.lambda_max {
            return Err(GovernorError::Config(format!(
                "lambda_min must be <= lambda_max, got {} > {}",
                self.lambda_min, self.lambda_max
            )));
        }
        if !(self.lambda_min..=self.lambda_max).contains(&self.lambda_init) {
            return Err(GovernorError::Config(format!(
                "lambda_init must be in [{}, {}], got {}",
                self.lambda_min, self.lambda_max, self.lambda_init
            )));
        }
        if let Some(limit) = self.integral_limit {
            if !(limit.is_finite() && limit > 0.0) {
                return Err(GovernorError::Config(format!(
                    "integral_limit must be finite and > 0, got {limit}"
                )));
            }
        }
        if self.energy.max_token_norm <= 0.0 || self.energy.max_latency_norm <= 0.0 {
            return Err(GovernorError::Config(format!(
                "energy normalization constants must be > 0, got tokens={} latency={}",
                self.energy.max_token_norm, self.energy.max_latency_norm
            )));
        }
        if self.energy.alpha_l < 0.0 || self.energy.alpha_c < 0.0 {
            return Err(GovernorError::Config(format!(
                "energy weights must be >= 0, got alpha_l={} alpha_c={}",
                self.energy.alpha_l, self.energy.alpha_c
            )));
        }
        Ok(())
    }

    /// Load from JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> GovernorResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| GovernorError::Config(format!("JSON parse error: {e}")))
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> GovernorResult<String> {
        serde_json::to_string(self)
            .map_err(|e| GovernorError::Config(format!("JSON encode error: {e}")))
    }
}
