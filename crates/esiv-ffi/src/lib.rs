// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — ESIV Governance Kernel PyO3 FFI Bindings
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
// Note: #[deny(unsafe_code)] not applied — PyO3 proc macros generate
// unsafe blocks internally. All hand-written code in this crate is safe.
//! Python-callable wrappers around the ESIV governance kernel.
//!
//! Exposes `GovernorConfig`, `TurnRecord`, `AgentRegistry` and the four
//! per-turn recurrences to the Python agent monitor via PyO3.
//!
//! # FFI Safety
//!
//! - The recurrences never raise; they return floats/bools as in Rust.
//! - Registry and config errors surface as `ValueError`.
//! - All config validated before storage (`GovernorConfig::validate()`).
//!
//! Install: `pip install -e crates/esiv-ffi` (requires maturin).
//!
//! Usage from Python:
//! ```python
//! from esiv_kernel import AgentRegistry
//!
//! registry = AgentRegistry()
//! row = registry.observe("agent-1", surprise=0.1, rho=0.95, energy=0.6, time=0.0)
//! print(row.to_dict())
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use esiv_core::{AgentId, AgentRegistry, AgentState, EnergySource, TurnInput};
use esiv_types::{GovernorConfig, GovernorError, TurnRecord, COLUMNS};

fn to_py_err(e: GovernorError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

// ─── PyGovernorConfig ───────────────────────────────────────────────

/// Python-visible configuration for the governance kernel.
#[pyclass(name = "GovernorConfig")]
#[derive(Clone)]
struct PyGovernorConfig {
    inner: GovernorConfig,
}

#[pymethods]
impl PyGovernorConfig {
    #[new]
    #[pyo3(signature = (
        void_decay = 0.85,
        void_threshold = 0.01,
        lambda_init = 0.15,
        lambda_min = 0.05,
        lambda_max = 0.20,
        kp = 0.05,
        ki = 0.01,
        k_rho = 0.02,
        void_setpoint = 0.0,
        rho_setpoint = 1.0,
        integral_limit = None,
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        void_decay: f64,
        void_threshold: f64,
        lambda_init: f64,
        lambda_min: f64,
        lambda_max: f64,
        kp: f64,
        ki: f64,
        k_rho: f64,
        void_setpoint: f64,
        rho_setpoint: f64,
        integral_limit: Option<f64>,
    ) -> PyResult<Self> {
        let config = GovernorConfig {
            void_decay,
            void_threshold,
            lambda_init,
            lambda_min,
            lambda_max,
            kp,
            ki,
            k_rho,
            void_setpoint,
            rho_setpoint,
            integral_limit,
            ..Default::default()
        };
        config.validate().map_err(to_py_err)?;
        Ok(Self { inner: config })
    }

    /// Construct from JSON string.
    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let config = GovernorConfig::from_json(json).map_err(to_py_err)?;
        config.validate().map_err(to_py_err)?;
        Ok(Self { inner: config })
    }

    fn to_json(&self) -> PyResult<String> {
        self.inner.to_json().map_err(to_py_err)
    }

    fn __repr__(&self) -> String {
        format!(
            "GovernorConfig(void_decay={}, void_threshold={}, lambda=[{}, {}])",
            self.inner.void_decay,
            self.inner.void_threshold,
            self.inner.lambda_min,
            self.inner.lambda_max
        )
    }
}

// ─── PyTurnRecord ───────────────────────────────────────────────────

/// One time-series row.
#[pyclass(name = "TurnRecord")]
#[derive(Clone)]
struct PyTurnRecord {
    inner: TurnRecord,
}

#[pymethods]
impl PyTurnRecord {
    #[getter]
    fn time(&self) -> f64 {
        self.inner.time
    }

    #[getter(E)]
    fn energy(&self) -> f64 {
        self.inner.energy
    }

    #[getter(I)]
    fn integrity(&self) -> f64 {
        self.inner.integrity
    }

    #[getter(S)]
    fn surprise(&self) -> f64 {
        self.inner.surprise
    }

    #[getter(V)]
    fn void(&self) -> f64 {
        self.inner.void
    }

    #[getter]
    fn lambda1(&self) -> f64 {
        self.inner.lambda
    }

    #[getter]
    fn coherence(&self) -> f64 {
        self.inner.rho
    }

    #[getter]
    fn void_event(&self) -> bool {
        self.inner.void_event
    }

    /// Column names in file order.
    #[staticmethod]
    fn columns() -> Vec<&'static str> {
        COLUMNS.to_vec()
    }

    fn to_csv_row(&self) -> String {
        self.inner.to_csv_row()
    }

    fn to_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new(py);
        dict.set_item("time", self.inner.time)?;
        dict.set_item("E", self.inner.energy)?;
        dict.set_item("I", self.inner.integrity)?;
        dict.set_item("S", self.inner.surprise)?;
        dict.set_item("V", self.inner.void)?;
        dict.set_item("lambda1", self.inner.lambda)?;
        dict.set_item("coherence", self.inner.rho)?;
        dict.set_item("void_event", self.inner.void_event)?;
        Ok(dict)
    }

    fn __repr__(&self) -> String {
        format!(
            "TurnRecord(time={}, E={:.4}, I={:.4}, S={:.4}, V={:.4}, lambda1={:.4}, coherence={:.4}, void_event={})",
            self.inner.time,
            self.inner.energy,
            self.inner.integrity,
            self.inner.surprise,
            self.inner.void,
            self.inner.lambda,
            self.inner.rho,
            self.inner.void_event
        )
    }
}

fn state_dict<'py>(py: Python<'py>, state: &AgentState) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("E", state.e)?;
    dict.set_item("S", state.s)?;
    dict.set_item("I", state.i)?;
    dict.set_item("V", state.v)?;
    dict.set_item("V_prev", state.v_prev)?;
    dict.set_item("rho", state.rho)?;
    dict.set_item("lambda", state.lambda)?;
    dict.set_item("integral_error_V", state.integral_error_v)?;
    dict.set_item("turns", state.turns)?;
    Ok(dict)
}

// ─── PyAgentRegistry ────────────────────────────────────────────────

/// Per-agent governance states exposed to Python.
#[pyclass(name = "AgentRegistry")]
struct PyAgentRegistry {
    inner: AgentRegistry,
}

#[pymethods]
impl PyAgentRegistry {
    #[new]
    #[pyo3(signature = (config = None))]
    fn new(config: Option<PyGovernorConfig>) -> PyResult<Self> {
        let cfg = config.map(|c| c.inner).unwrap_or_default();
        Ok(Self {
            inner: AgentRegistry::new(cfg).map_err(to_py_err)?,
        })
    }

    fn register(&mut self, agent_id: &str) -> PyResult<()> {
        self.inner.register(agent_id).map_err(to_py_err)?;
        Ok(())
    }

    /// Remove an agent and return its final state as a dict.
    fn remove<'py>(&mut self, py: Python<'py>, agent_id: &str) -> PyResult<Bound<'py, PyDict>> {
        let state = self
            .inner
            .remove(&AgentId::from(agent_id))
            .map_err(to_py_err)?;
        state_dict(py, &state)
    }

    /// Apply one turn.
    ///
    /// Args:
    ///     agent_id: Agent identifier (registered on first use).
    ///     surprise: Raw surprise S.
    ///     rho: Coherence ρ.
    ///     time: Timestamp stored in the record.
    ///     energy: Precomputed E; if None, token_len and latency_s are required.
    ///         Giving energy together with either of them raises ValueError.
    #[pyo3(signature = (agent_id, surprise, rho, time = 0.0, energy = None, token_len = None, latency_s = None))]
    #[allow(clippy::too_many_arguments)]
    fn observe(
        &mut self,
        agent_id: &str,
        surprise: f64,
        rho: f64,
        time: f64,
        energy: Option<f64>,
        token_len: Option<u64>,
        latency_s: Option<f64>,
    ) -> PyResult<PyTurnRecord> {
        let energy = EnergySource::from_parts(energy, token_len, latency_s).map_err(to_py_err)?;
        let input = TurnInput {
            time,
            surprise,
            energy,
            rho,
        };
        let record = self.inner.observe(agent_id, &input).map_err(to_py_err)?;
        Ok(PyTurnRecord { inner: record })
    }

    /// Current state of an agent, or None if it is not registered.
    fn state<'py>(&self, py: Python<'py>, agent_id: &str) -> PyResult<Option<Bound<'py, PyDict>>> {
        match self.inner.state(&AgentId::from(agent_id)) {
            Some(state) => Ok(Some(state_dict(py, state)?)),
            None => Ok(None),
        }
    }

    fn agents(&self) -> Vec<String> {
        self.inner.agents().into_iter().map(|id| id.0).collect()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }
}

// ─── Recurrences ────────────────────────────────────────────────────

/// I = 1 - clamp(S, 0, 1).
#[pyfunction(name = "compute_integrity")]
fn py_compute_integrity(s: f64) -> f64 {
    esiv_core::compute_integrity(s)
}

/// V = γ·V_prev + (E - I).
#[pyfunction(name = "update_void")]
#[pyo3(signature = (e, i, v_prev, gamma = 0.85))]
fn py_update_void(e: f64, i: f64, v_prev: f64, gamma: f64) -> f64 {
    esiv_core::update_void(e, i, v_prev, gamma)
}

/// Clamped PI step; returns (lambda, integral_error_V).
#[pyfunction(name = "update_lambda")]
#[pyo3(signature = (e_v, e_rho, lambda_prev, kp, ki, k_rho, integral_error_v, lambda_min = 0.05, lambda_max = 0.20))]
#[allow(clippy::too_many_arguments)]
fn py_update_lambda(
    e_v: f64,
    e_rho: f64,
    lambda_prev: f64,
    kp: f64,
    ki: f64,
    k_rho: f64,
    integral_error_v: f64,
    lambda_min: f64,
    lambda_max: f64,
) -> PyResult<(f64, f64)> {
    if lambda_min.is_nan() || lambda_max.is_nan() || lambda_min > lambda_max {
        return Err(PyValueError::new_err(format!(
            "invalid lambda bounds [{lambda_min}, {lambda_max}]"
        )));
    }
    Ok(esiv_core::update_lambda(
        e_v,
        e_rho,
        lambda_prev,
        kp,
        ki,
        k_rho,
        integral_error_v,
        lambda_min,
        lambda_max,
    ))
}

/// |V| < threshold.
#[pyfunction(name = "detect_void")]
#[pyo3(signature = (v, threshold = 0.01))]
fn py_detect_void(v: f64, threshold: f64) -> bool {
    esiv_core::detect_void(v, threshold)
}

// ─── Module Registration ────────────────────────────────────────────

/// ESIV Governance Kernel — Rust per-turn scoring for the agent monitor.
///
/// - `GovernorConfig` — configuration
/// - `AgentRegistry` — per-agent state and turn updates
/// - `TurnRecord` — one time-series row
/// - `compute_integrity`, `update_void`, `update_lambda`, `detect_void`
#[pymodule]
fn esiv_kernel(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyGovernorConfig>()?;
    m.add_class::<PyTurnRecord>()?;
    m.add_class::<PyAgentRegistry>()?;
    m.add_function(wrap_pyfunction!(py_compute_integrity, m)?)?;
    m.add_function(wrap_pyfunction!(py_update_void, m)?)?;
    m.add_function(wrap_pyfunction!(py_update_lambda, m)?)?;
    m.add_function(wrap_pyfunction!(py_detect_void, m)?)?;
    Ok(())
}
