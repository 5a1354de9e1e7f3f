// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — ESIV Agent Registry
// ─────────────────────────────────────────────────────────────────────
//! Explicit map from agent identifier to its governance state.
//!
//! Creation and removal are explicit calls; there is no global record.
//! One registry owns its states exclusively, so turns for an agent are
//! applied strictly in order. Monitoring several agents in parallel
//! means one registry (or one bare [`AgentState`]) per worker.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use esiv_types::{GovernorConfig, GovernorError, GovernorResult, TurnRecord};

use crate::engine::{GovernanceEngine, TurnInput};
use crate::sink::TurnSink;
use crate::state::AgentState;

/// Identifier of a monitored agent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub String);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AgentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AgentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Per-agent states plus the engine that advances them.
pub struct AgentRegistry {
    engine: GovernanceEngine,
    states: HashMap<AgentId, AgentState>,
}

impl AgentRegistry {
    pub fn new(config: GovernorConfig) -> GovernorResult<Self> {
        Ok(Self::with_engine(GovernanceEngine::new(config)?))
    }

    pub fn with_engine(engine: GovernanceEngine) -> Self {
        Self {
            engine,
            states: HashMap::new(),
        }
    }

    /// Create a default state for `id`.
    pub fn register(&mut self, id: impl Into<AgentId>) -> GovernorResult<&AgentState> {
        let id = id.into();
        if self.states.contains_key(&id) {
            return Err(GovernorError::DuplicateAgent(id.to_string()));
        }
        log::info!("registered agent {id}");
        let state = self.engine.new_state();
        Ok(self.states.entry(id).or_insert(state))
    }

    /// Stop monitoring `id`, returning its final state.
    pub fn remove(&mut self, id: &AgentId) -> GovernorResult<AgentState> {
        let state = self
            .states
            .remove(id)
            .ok_or_else(|| GovernorError::UnknownAgent(id.to_string()))?;
        log::info!("removed agent {id} after {} turns", state.turns);
        Ok(state)
    }

    /// Apply one turn for `id`, registering it on first observation.
    ///
    /// A rejected turn leaves the registry untouched, including for an
    /// agent that has not been seen yet.
    pub fn observe(&mut self, id: impl Into<AgentId>, input: &TurnInput) -> GovernorResult<TurnRecord> {
        let id = id.into();
        input.validate()?;
        if !self.states.contains_key(&id) {
            log::info!("first observation of agent {id}");
        }
        let engine = &self.engine;
        let state = self
            .states
            .entry(id)
            .or_insert_with(|| engine.new_state());
        engine.step(state, input)
    }

    /// [`observe`](Self::observe), then append the record to `sink`.
    pub fn observe_into(
        &mut self,
        id: impl Into<AgentId>,
        input: &TurnInput,
        sink: &mut dyn TurnSink,
    ) -> GovernorResult<TurnRecord> {
        let record = self.observe(id, input)?;
        sink.append(&record)?;
        Ok(record)
    }

    pub fn state(&self, id: &AgentId) -> Option<&AgentState> {
        self.states.get(id)
    }

    /// Registered agent ids, sorted.
    pub fn agents(&self) -> Vec<AgentId> {
        let mut ids: Vec<AgentId> = self.states.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn engine(&self) -> &GovernanceEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySeries;

    fn registry() -> AgentRegistry {
        AgentRegistry::new(GovernorConfig::default()).unwrap()
    }

    #[test]
    fn test_register_creates_default_state() {
        let mut reg = registry();
        let st = reg.register("alpha").unwrap().clone();
        assert_eq!(st, AgentState::default());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_duplicate_register_rejected() {
        let mut reg = registry();
        reg.register("alpha").unwrap();
        let err = reg.register("alpha").unwrap_err();
        assert!(matches!(err, GovernorError::DuplicateAgent(_)));
    }

    #[test]
    fn test_remove_unknown_agent() {
        let mut reg = registry();
        let err = reg.remove(&AgentId::from("ghost")).unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn test_observe_auto_registers() {
        let mut reg = registry();
        assert!(reg.is_empty());
        reg.observe("alpha", &TurnInput::direct(0.0, 0.1, 0.6, 1.0))
            .unwrap();
        let st = reg.state(&AgentId::from("alpha")).unwrap();
        assert_eq!(st.turns, 1);
    }

    #[test]
    fn test_agents_are_isolated() {
        let mut reg = registry();
        for t in 0..10 {
            reg.observe("busy", &TurnInput::direct(t as f64, 0.5, 1.0, 0.2))
                .unwrap();
        }
        reg.observe("calm", &TurnInput::direct(0.0, 0.5, 0.5, 1.0))
            .unwrap();
        let busy = reg.state(&AgentId::from("busy")).unwrap();
        let calm = reg.state(&AgentId::from("calm")).unwrap();
        assert_eq!(busy.turns, 10);
        assert_eq!(calm.turns, 1);
        assert!(calm.v.abs() < 1e-12);
        assert!((calm.lambda - 0.15).abs() < 1e-12);
        assert!(busy.integral_error_v.abs() > 0.0);
    }

    #[test]
    fn test_remove_returns_final_state() {
        let mut reg = registry();
        reg.observe("alpha", &TurnInput::direct(0.0, 0.1, 0.6, 1.0))
            .unwrap();
        let st = reg.remove(&AgentId::from("alpha")).unwrap();
        assert_eq!(st.turns, 1);
        assert!(reg.state(&AgentId::from("alpha")).is_none());
    }

    #[test]
    fn test_agents_sorted() {
        let mut reg = registry();
        reg.register("zeta").unwrap();
        reg.register("alpha").unwrap();
        assert_eq!(
            reg.agents(),
            vec![AgentId::from("alpha"), AgentId::from("zeta")]
        );
    }

    #[test]
    fn test_observe_into_appends() {
        let mut reg = registry();
        let mut series = MemorySeries::new();
        let rec = reg
            .observe_into("alpha", &TurnInput::direct(0.0, 0.1, 0.6, 1.0), &mut series)
            .unwrap();
        assert_eq!(series.records(), &[rec]);
    }

    #[test]
    fn test_rejected_turn_not_appended() {
        let mut reg = registry();
        let mut series = MemorySeries::new();
        let res = reg.observe_into(
            "alpha",
            &TurnInput::direct(0.0, f64::NAN, 0.6, 1.0),
            &mut series,
        );
        assert!(res.is_err());
        assert!(series.is_empty());
        assert!(reg.is_empty());
    }

    #[test]
    fn test_rejected_first_turn_leaves_no_agent() {
        let mut reg = registry();
        let err = reg
            .observe("ghost", &TurnInput::direct(0.0, f64::NAN, 0.5, 1.0))
            .unwrap_err();
        assert!(matches!(err, GovernorError::Numerical(_)));
        let err = reg
            .observe("ghost", &TurnInput::normalized(0.0, 0.2, 100, -1.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, GovernorError::Validation(_)));
        assert_eq!(reg.len(), 0);
        assert!(reg.state(&AgentId::from("ghost")).is_none());
        reg.register("ghost").unwrap();
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_rejected_turn_keeps_existing_state() {
        let mut reg = registry();
        reg.observe("alpha", &TurnInput::direct(0.0, 0.1, 0.6, 1.0))
            .unwrap();
        let before = reg.state(&AgentId::from("alpha")).unwrap().clone();
        assert!(reg
            .observe("alpha", &TurnInput::direct(1.0, 0.1, f64::INFINITY, 1.0))
            .is_err());
        assert_eq!(reg.state(&AgentId::from("alpha")).unwrap(), &before);
    }
}
