// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — ESIV Lambda Controller
// ─────────────────────────────────────────────────────────────────────
//! Clamped proportional-integral controller for the adaptive gain λ.
//!
//! ```text
//! integral' = integral + e_V
//! λ         = clamp(λ_prev + k_p·e_V + k_i·integral' + k_ρ·e_ρ, λ_min, λ_max)
//! ```
//!
//! The output clamp is always the final step. The integral itself is
//! unbounded unless an `integral_limit` is configured, in which case it
//! is clamped before it contributes to λ (anti-windup).

use serde::{Deserialize, Serialize};

use esiv_types::GovernorConfig;

/// Result of one controller step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LambdaStep {
    pub lambda: f64,
    pub integral_error_v: f64,
    /// λ before clamping.
    pub uncapped: f64,
}

impl LambdaStep {
    /// True when the clamp changed the output.
    pub fn saturated(&self) -> bool {
        self.lambda != self.uncapped
    }
}

/// PI gains, output bounds and optional anti-windup limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LambdaController {
    pub kp: f64,
    pub ki: f64,
    pub k_rho: f64,
    pub lambda_min: f64,
    pub lambda_max: f64,
    pub integral_limit: Option<f64>,
}

impl LambdaController {
    pub fn from_config(config: &GovernorConfig) -> Self {
        Self {
            kp: config.kp,
            ki: config.ki,
            k_rho: config.k_rho,
            lambda_min: config.lambda_min,
            lambda_max: config.lambda_max,
            integral_limit: config.integral_limit,
        }
    }

    /// Execute one PI step from the previous gain and accumulator.
    pub fn step(&self, e_v: f64, e_rho: f64, lambda_prev: f64, integral: f64) -> LambdaStep {
        let mut integral = integral + e_v;
        if let Some(limit) = self.integral_limit {
            integral = bound(integral, -limit, limit);
        }
        let uncapped = lambda_prev + self.kp * e_v + self.ki * integral + self.k_rho * e_rho;
        LambdaStep {
            lambda: bound(uncapped, self.lambda_min, self.lambda_max),
            integral_error_v: integral,
            uncapped,
        }
    }
}

/// Clamp that never panics: NaN in `x` propagates, a NaN bound is
/// ignored, and inverted bounds resolve to `hi` above and `lo` below.
fn bound(x: f64, lo: f64, hi: f64) -> f64 {
    if x > hi {
        hi
    } else if x < lo {
        lo
    } else {
        x
    }
}

impl Default for LambdaController {
    fn default() -> Self {
        Self::from_config(&GovernorConfig::default())
    }
}

/// Stateless form of the controller with an unbounded integral.
///
/// Returns `(λ, integral_error_v')`. Non-finite inputs propagate.
/// Inverted bounds do not fail; the result is still deterministic.
#[allow(clippy::too_many_arguments)]
pub fn update_lambda(
    e_v: f64,
    e_rho: f64,
    lambda_prev: f64,
    kp: f64,
    ki: f64,
    k_rho: f64,
    integral_error_v: f64,
    lambda_min: f64,
    lambda_max: f64,
) -> (f64, f64) {
    let ctrl = LambdaController {
        kp,
        ki,
        k_rho,
        lambda_min,
        lambda_max,
        integral_limit: None,
    };
    let step = ctrl.step(e_v, e_rho, lambda_prev, integral_error_v);
    (step.lambda, step.integral_error_v)
}
