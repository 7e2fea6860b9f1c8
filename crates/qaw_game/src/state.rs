//! Game state
//!
//! Gantree: L7_Game → GameState
//!
//! Append-only record of one game. Transitions consume the state and
//! return the extended one; nothing already recorded is ever rewritten.

use qaw_circuit::{ConjugateLayer, GateSet};
use qaw_clean::GameSample;
use qaw_core::constants::stats::MAX_STORED_RESULT_CHARS;
use qaw_core::{OneProb, SameProb};
use qaw_matching::Matching;
use qaw_stats::Frequencies;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A puzzle ready for guessing
/// Gantree: Puzzle // 라운드 퍼즐
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    /// Round number (1-based)
    pub round: usize,
    /// Hidden pairing
    pub truth: Matching,
    /// Creating gates of this round
    pub applied: GateSet,
    /// Statistics shown to the guesser (cleaned in replay with cleanup)
    pub one_prob: OneProb,
    /// Statistics as measured
    pub raw_one_prob: OneProb,
    /// Agreement probabilities
    pub same_prob: SameProb,
    /// Outcome frequencies, when measured this game
    pub results: Option<Frequencies>,
    /// Pairing implied by mutual information, in replays
    pub correlated: Option<Matching>,
}

/// A pairing guess
/// Gantree: Guess // 추측
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guess {
    /// Chosen pairs
    pub pairs: Matching,
    /// Player asked to abandon the game
    pub restart: bool,
}

impl Guess {
    /// Guess with the given pairs
    pub fn new(pairs: Matching) -> Self {
        Self {
            pairs,
            restart: false,
        }
    }

    /// Restart request
    pub fn restart() -> Self {
        Self {
            pairs: Matching::new(),
            restart: true,
        }
    }
}

/// Outcome of one scored round
/// Gantree: RoundRecord // 라운드 기록
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Round number (1-based)
    pub round: usize,
    /// Hidden pairing
    pub truth: Matching,
    /// Pairs guessed
    pub guess: Matching,
    /// Matcher's pairing on the displayed statistics
    pub bot: Matching,
    /// Number of true pairs guessed
    pub correct: usize,
    /// Mean excitation gap inside true pairs
    pub fuzz: f64,
    /// Fraction of true pairs guessed
    pub correctness: f64,
    /// Removal gates derived from the guess
    pub removal: GateSet,
}

impl fmt::Display for RoundRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Round {}: guessed {:?}, bot {:?}, correct {:?}; {} out of {} pairs",
            self.round,
            self.guess,
            self.bot,
            self.truth,
            self.correct,
            self.truth.len()
        )
    }
}

/// Everything recorded during one game
/// Gantree: GameState // 게임 상태
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    gates: Vec<GateSet>,
    conjugates: Vec<ConjugateLayer>,
    one_probs: Vec<OneProb>,
    same_probs: Vec<SameProb>,
    results: Vec<Frequencies>,
    rounds: Vec<RoundRecord>,
}

impl GameState {
    /// Empty game
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Record a new puzzle
    /// Gantree: with_puzzle(puzzle) -> GameState // 퍼즐 기록
    ///
    /// Frequency tables are kept only while their serialized form stays
    /// small.
    pub fn with_puzzle(mut self, puzzle: &Puzzle) -> Self {
        self.gates.push(puzzle.applied.clone());
        self.one_probs.push(puzzle.one_prob.clone());
        self.same_probs.push(puzzle.same_prob.clone());
        if let Some(results) = &puzzle.results {
            let size = serde_json::to_string(results).map(|s| s.len()).unwrap_or(usize::MAX);
            if size < MAX_STORED_RESULT_CHARS {
                self.results.push(results.clone());
            } else {
                log::debug!("round {}: results too large to keep ({} chars)", puzzle.round, size);
            }
        }
        self
    }

    /// Record the removal gates and conjugation of a scored round
    /// Gantree: with_round(layer, record) -> GameState // 라운드 기록
    pub fn with_round(mut self, layer: ConjugateLayer, record: RoundRecord) -> Self {
        self.gates.push(record.removal.clone());
        self.conjugates.push(layer);
        self.rounds.push(record);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Gate history, two sets per completed round
    pub fn gates(&self) -> &[GateSet] {
        &self.gates
    }

    /// Conjugation history, one layer per completed round
    pub fn conjugates(&self) -> &[ConjugateLayer] {
        &self.conjugates
    }

    /// Excitation probabilities per round
    pub fn one_probs(&self) -> &[OneProb] {
        &self.one_probs
    }

    /// Agreement probabilities per round
    pub fn same_probs(&self) -> &[SameProb] {
        &self.same_probs
    }

    /// Stored frequency tables
    pub fn results(&self) -> &[Frequencies] {
        &self.results
    }

    /// Scored rounds
    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }

    /// Number of scored rounds
    pub fn score(&self) -> usize {
        self.rounds.len()
    }

    /// Total correct pairs over the game
    pub fn total_correct(&self) -> usize {
        self.rounds.iter().map(|r| r.correct).sum()
    }

    /// As a corpus sample for the cleaner
    pub fn to_sample(&self) -> GameSample {
        GameSample::new(self.one_probs.clone(), self.same_probs.clone(), self.gates.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qaw_circuit::Conjugate;
    use qaw_core::Axis;

    fn puzzle(results: Option<Frequencies>) -> Puzzle {
        let mut applied = GateSet::new();
        applied.insert("A".into(), 0.2);
        Puzzle {
            round: 1,
            truth: ["A".to_string()].into_iter().collect(),
            applied,
            one_prob: vec![0.1, 0.1],
            raw_one_prob: vec![0.1, 0.1],
            same_prob: SameProb::new(),
            results,
            correlated: None,
        }
    }

    fn record(removal: GateSet) -> RoundRecord {
        RoundRecord {
            round: 1,
            truth: Matching::new(),
            guess: Matching::new(),
            bot: Matching::new(),
            correct: 0,
            fuzz: 0.0,
            correctness: 1.0,
            removal,
        }
    }

    #[test]
    fn test_history_grows_in_pairs() {
        let state = GameState::new().with_puzzle(&puzzle(None));
        assert_eq!(state.gates().len(), 1);
        assert_eq!(state.score(), 0);

        let mut removal = GateSet::new();
        removal.insert("A".into(), -0.2);
        let layer = vec![Conjugate::new(Axis::X, 0.3); 2];
        let state = state.with_round(layer, record(removal));
        assert_eq!(state.gates().len(), 2);
        assert_eq!(state.conjugates().len(), 1);
        assert_eq!(state.score(), 1);
        assert_eq!(state.gates()[1]["A"], -0.2);
        assert_eq!(state.to_sample().num_rounds(), 1);
    }

    #[test]
    fn test_large_results_dropped() {
        let small: Frequencies = [("00".to_string(), 1.0)].into_iter().collect();
        let large: Frequencies = (0..2000).map(|i| (format!("{:011b}", i), 0.0005)).collect();

        let state = GameState::new()
            .with_puzzle(&puzzle(Some(small)))
            .with_puzzle(&puzzle(Some(large)))
            .with_puzzle(&puzzle(None));
        assert_eq!(state.results().len(), 1);
        assert_eq!(state.one_probs().len(), 3);
    }
}
