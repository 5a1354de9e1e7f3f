// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — ESIV Governance Kernel Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Type definitions, configuration, and error hierarchy for the
//! ESIV governance kernel: per-turn Energy, Surprise, Integrity and
//! Void signals plus the adaptive control gain λ.

pub mod config;
pub mod error;
pub mod record;

pub use config::{EnergyNorm, GovernorConfig};
pub use error::{GovernorError, GovernorResult};
pub use record::{header_line, parse_header, TurnRecord, COLUMNS};
