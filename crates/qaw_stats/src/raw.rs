//! Raw backend results
//!
//! Gantree: L4_Stats → RawResult
//!
//! What an executor hands back. Bitstrings are keyed with qubit 0 as the
//! first character.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw measurement data (or a handle for data not yet available)
/// Gantree: RawResult // Exact/Counts/Frequencies/Pending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawResult {
    /// Exact probabilities from a noiseless simulation
    Exact(BTreeMap<String, f64>),

    /// Occurrence counts from sampled hardware
    Counts(BTreeMap<String, u64>),

    /// Already-normalized sampled frequencies
    Frequencies(BTreeMap<String, f64>),

    /// Job handle or other non-measurement payload
    Pending(String),
}

impl RawResult {
    /// Check if this is a pending handle rather than data
    pub fn is_pending(&self) -> bool {
        matches!(self, RawResult::Pending(_))
    }

    /// Check if shot noise still has to be injected
    pub fn is_exact(&self) -> bool {
        matches!(self, RawResult::Exact(_))
    }

    /// Number of distinct bitstrings carried
    pub fn num_outcomes(&self) -> usize {
        match self {
            RawResult::Exact(m) | RawResult::Frequencies(m) => m.len(),
            RawResult::Counts(m) => m.len(),
            RawResult::Pending(_) => 0,
        }
    }
}
