//! Stored game corpus
//!
//! Gantree: L5_Clean → Corpus
//!
//! One `GameSample` per stored game: the statistics seen in every round
//! and the gate history that produced them.

use qaw_circuit::GateSet;
use qaw_core::{OneProb, QawError, QawResult, SameProb};
use serde::{Deserialize, Serialize};

/// Statistics and gates of one recorded game
/// Gantree: GameSample // 게임 표본
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameSample {
    /// Excitation probabilities per round
    pub one_probs: Vec<OneProb>,
    /// Agreement probabilities per round
    pub same_probs: Vec<SameProb>,
    /// Gate history (creating, removing, ...)
    pub gates: Vec<GateSet>,
}

/// View of one round of a recorded game
#[derive(Debug, Clone, Copy)]
pub struct RoundView<'a> {
    /// Raw excitation probabilities
    pub one_prob: &'a OneProb,
    /// Agreement probabilities
    pub same_prob: &'a SameProb,
    /// Creating gates: the ground-truth pairing and fractions
    pub applied: &'a GateSet,
}

impl GameSample {
    /// Create a sample
    pub fn new(one_probs: Vec<OneProb>, same_probs: Vec<SameProb>, gates: Vec<GateSet>) -> Self {
        Self {
            one_probs,
            same_probs,
            gates,
        }
    }

    /// Number of rounds with statistics
    pub fn num_rounds(&self) -> usize {
        self.one_probs.len()
    }

    /// Round `round` (1-based)
    /// Gantree: round(r) -> QawResult<RoundView> // 라운드 조회
    pub fn round(&self, round: usize) -> QawResult<RoundView<'_>> {
        let missing = |what: &str| QawError::MissingData {
            what: format!("{} for round {}", what, round),
        };
        if round == 0 {
            return Err(missing("statistics"));
        }
        let r = round - 1;
        Ok(RoundView {
            one_prob: self.one_probs.get(r).ok_or_else(|| missing("oneProb"))?,
            same_prob: self.same_probs.get(r).ok_or_else(|| missing("sameProb"))?,
            applied: self.gates.get(2 * r).ok_or_else(|| missing("gates"))?,
        })
    }
}

/// Number of qubits recorded in a corpus
pub fn corpus_qubits(corpus: &[GameSample]) -> QawResult<usize> {
    corpus
        .iter()
        .flat_map(|s| s.one_probs.first())
        .map(Vec::len)
        .next()
        .ok_or_else(|| QawError::MissingData {
            what: "empty corpus".into(),
        })
}
