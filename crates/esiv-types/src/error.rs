// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — ESIV Governance Kernel Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for the governance kernel.
///
/// The core recurrences never fail; every variant here is raised by a
/// wrapping layer (config loading, turn validation, registry, sinks).
#[derive(Error, Debug)]
pub enum GovernorError {
    /// Configuration rejected by `GovernorConfig::validate` or unparsable.
    #[error("config error: {0}")]
    Config(String),

    /// Invalid turn input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Non-finite value (NaN/Inf) offered to the turn engine.
    #[error("numerical error: {0}")]
    Numerical(String),

    /// No state is registered for the agent.
    #[error("unknown agent: {0}")]
    UnknownAgent(String),

    /// The agent already has a state record.
    #[error("agent already registered: {0}")]
    DuplicateAgent(String),

    /// A recorded row or header does not match the time-series schema.
    #[error("schema error: {0}")]
    Schema(String),

    /// Writing to a time-series sink failed.
    #[error("sink error: {0}")]
    Sink(String),
}

pub type GovernorResult<T> = Result<T, GovernorError>;
