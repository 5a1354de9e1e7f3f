// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — ESIV Governance Kernel Core
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Per-turn governance scoring for monitored agents.
//!
//! Each observed turn derives Energy (E), Surprise (S), Integrity (I)
//! and Void (V), updates the adaptive gain λ, and flags void events:
//!
//! ```text
//! inputs → I = 1 - clamp(S) → V = γ·V_prev + (E - I) → λ (clamped PI) → |V| < θ
//! ```
//!
//! # Stability Invariants
//!
//! 1. **Integrity is bounded**: `I ∈ [0, 1]` for every finite S, because S
//!    is clamped before the subtraction.
//!
//! 2. **λ is bounded**: `λ ∈ [λ_min, λ_max]` after every turn. The clamp is
//!    the last operation of the controller.
//!
//! 3. **Void is bounded**: with `0 ≤ γ < 1` and `|E - I| ≤ M`, the leaky
//!    integrator keeps `limsup |V| ≤ M / (1 - γ)`. Recent imbalances
//!    dominate old ones, so V recovers after a transient shock.
//!
//! 4. **Void events are memoryless**: the flag is a pure function of the
//!    current V; there is no debounce.
//!
//! The four recurrences are pure functions. State lives in an explicit
//! [`AgentState`] per agent, owned by an [`AgentRegistry`] or by the caller.

pub mod detector;
pub mod energy;
pub mod engine;
pub mod integrity;
pub mod lambda;
pub mod registry;
pub mod sink;
pub mod state;
pub mod void;

pub use detector::detect_void;
pub use energy::{compute_energy, EnergySource};
pub use engine::{replay, GovernanceEngine, TurnInput};
pub use integrity::compute_integrity;
pub use lambda::{update_lambda, LambdaController, LambdaStep};
pub use registry::{AgentId, AgentRegistry};
pub use sink::{read_history, CsvSeries, MemorySeries, TurnSink};
pub use state::AgentState;
pub use void::{steady_state_bound, update_void};
