//! Backend context
//!
//! Gantree: L6_Backend → BackendContext
//!
//! Everything an executor needs to know about where it runs. Executors
//! own their context; nothing is read from process-wide state.

use qaw_core::RunMode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Execution context handed to an executor
/// Gantree: BackendContext // 백엔드 컨텍스트
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendContext {
    /// Backend name
    pub name: String,

    /// Simulated or real hardware
    pub mode: RunMode,

    /// Random seed for backends that sample
    pub seed: Option<u64>,
}

impl BackendContext {
    /// Create new context
    pub fn new(name: impl Into<String>, mode: RunMode) -> Self {
        Self {
            name: name.into(),
            mode,
            seed: None,
        }
    }

    /// Context of the built-in simulator
    pub fn simulator() -> Self {
        Self::new("qaw_simulator", RunMode::Simulated)
    }

    /// Builder: set seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check if results come from a simulation
    pub fn is_simulated(&self) -> bool {
        self.mode.is_simulated()
    }
}

impl Default for BackendContext {
    fn default() -> Self {
        Self::simulator()
    }
}

impl fmt::Display for BackendContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BackendContext(name={}, mode={:?}", self.name, self.mode)?;
        if let Some(seed) = self.seed {
            write!(f, ", seed={}", seed)?;
        }
        write!(f, ")")
    }
}
