//! Round metrics
//!
//! Gantree: L4_Stats → Metrics
//!
//! Fuzz measures how far apart the two qubits of each true pair read;
//! correctness measures how much of the true pairing a guess recovered.

use qaw_core::{PairMap, PairName, QawError, QawResult};
use std::collections::BTreeSet;

/// Mean absolute difference in excitation probability across matched pairs
/// Gantree: calculate_fuzz(one_prob, pairs, matching) -> QawResult<f64> // 퍼지
///
/// An empty matching has zero fuzz.
pub fn calculate_fuzz<'a, I>(one_prob: &[f64], pairs: &PairMap, matching: I) -> QawResult<f64>
where
    I: IntoIterator<Item = &'a PairName>,
{
    let mut total = 0.0;
    let mut count = 0usize;
    for name in matching {
        let pair = pairs
            .get(name)
            .ok_or_else(|| QawError::UnknownPair(name.clone()))?;
        let read = |q: usize| {
            one_prob.get(q).copied().ok_or(QawError::QubitOutOfRange {
                qubit: q,
                num_qubits: one_prob.len(),
            })
        };
        total += (read(pair.control)? - read(pair.target)?).abs();
        count += 1;
    }
    Ok(if count == 0 { 0.0 } else { total / count as f64 })
}

/// True pairs that the guess contains
pub fn correct_guesses(guess: &BTreeSet<PairName>, truth: &BTreeSet<PairName>) -> BTreeSet<PairName> {
    guess.intersection(truth).cloned().collect()
}

/// Fraction of true pairs present in the guess
/// Gantree: correctness(guess, truth) -> f64 // 정답률
///
/// An empty ground truth counts as fully recovered.
pub fn correctness(guess: &BTreeSet<PairName>, truth: &BTreeSet<PairName>) -> f64 {
    if truth.is_empty() {
        return 1.0;
    }
    correct_guesses(guess, truth).len() as f64 / truth.len() as f64
}
