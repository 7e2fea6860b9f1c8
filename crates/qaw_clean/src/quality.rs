//! Cleaning quality objective
//!
//! Gantree: L5_Clean → Quality
//!
//! Scores a cleaning profile over a whole corpus: how often the matcher
//! recovers the true pairs from cleaned data, and how close the
//! recovered fractions are to the ones actually applied.

use crate::clean::clean;
use crate::corpus::GameSample;
use crate::profile::CleaningProfile;
use qaw_core::{frac_from_prob, PairMap, QawError, QawResult};
use qaw_matching::matching_from_one_prob;
use qaw_stats::correctness;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Mean and (population) variance of a sample
/// Gantree: MeanVar // 평균/분산
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeanVar {
    /// Sample mean
    pub mean: f64,
    /// `E[x²] - E[x]²`
    pub variance: f64,
}

impl MeanVar {
    /// Mean and variance of `values`; zero for an empty slice
    pub fn of(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let square = values.iter().map(|v| v * v).sum::<f64>() / n;
        Self {
            mean,
            variance: square - mean * mean,
        }
    }
}

/// Two-level quality of a cleaning profile on one round
/// Gantree: Quality // 품질
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Quality {
    /// Fraction of true pairs the matcher recovers (higher is better)
    pub fraction_correct: MeanVar,
    /// Distance between recovered and applied fractions (lower is better)
    pub frac_difference: MeanVar,
}

impl Quality {
    /// Lexicographic comparison: correctness first, then frac difference
    /// Gantree: better_than(other) -> bool // 사전식 비교
    pub fn better_than(&self, other: &Quality) -> bool {
        let (c, o) = (self.fraction_correct.mean, other.fraction_correct.mean);
        c > o || (c == o && self.frac_difference.mean < other.frac_difference.mean)
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "correct={:.4}±{:.4}, frac_diff={:.4}±{:.4}",
            self.fraction_correct.mean,
            self.fraction_correct.variance.max(0.0).sqrt(),
            self.frac_difference.mean,
            self.frac_difference.variance.max(0.0).sqrt()
        )
    }
}

/// Score a profile (or raw data, with `None`) on one round of a corpus
/// Gantree: calculate_quality(x, corpus, pairs, round) -> QawResult<Quality> // 품질 평가
///
/// `round` is 1-based. Every sample must hold that round.
pub fn calculate_quality(
    profile: Option<&CleaningProfile>,
    corpus: &[GameSample],
    pairs: &PairMap,
    round: usize,
    min_information: f64,
) -> QawResult<Quality> {
    if corpus.is_empty() {
        return Err(QawError::MissingData {
            what: "empty corpus".into(),
        });
    }

    let mut correct = Vec::with_capacity(corpus.len());
    let mut difference = Vec::with_capacity(corpus.len());

    for sample in corpus {
        let view = sample.round(round)?;
        let one_prob = match profile {
            Some(x) => clean(x, view.one_prob, view.same_prob, pairs, min_information)?,
            None => view.one_prob.clone(),
        };

        let truth: BTreeSet<String> = view.applied.keys().cloned().collect();
        let guessed = matching_from_one_prob(pairs, &one_prob);
        correct.push(correctness(&guessed, &truth));

        let mut diff = 0.0;
        for (name, &applied) in view.applied {
            let pair = pairs
                .get(name)
                .ok_or_else(|| QawError::UnknownPair(name.clone()))?;
            let read = |q: usize| one_prob.get(q).copied().unwrap_or(0.0);
            let guessed_prob = (read(pair.control) + read(pair.target)) / 2.0;
            diff += (frac_from_prob(guessed_prob) - applied).abs();
        }
        if !view.applied.is_empty() {
            diff /= view.applied.len() as f64;
        }
        difference.push(diff);
    }

    Ok(Quality {
        fraction_correct: MeanVar::of(&correct),
        frac_difference: MeanVar::of(&difference),
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use qaw_circuit::GateSet;
    use qaw_core::{prob_from_frac, Pair, SameProb};

    fn line4() -> PairMap {
        let mut pairs = PairMap::new();
        pairs.insert("A".into(), Pair::new(0, 1));
        pairs.insert("B".into(), Pair::new(1, 2));
        pairs.insert("C".into(), Pair::new(2, 3));
        pairs
    }

    fn clean_sample(fa: f64, fc: f64) -> GameSample {
        let (pa, pc) = (prob_from_frac(fa), prob_from_frac(fc));
        let mut applied = GateSet::new();
        applied.insert("A".into(), fa);
        applied.insert("C".into(), fc);
        let same: SameProb = [("A", 1.0), ("B", pa * pc + (1.0 - pa) * (1.0 - pc)), ("C", 1.0)]
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect();
        GameSample::new(vec![vec![pa, pa, pc, pc]], vec![same], vec![applied])
    }

    #[test]
    fn test_mean_var() {
        let mv = MeanVar::of(&[1.0, 3.0]);
        assert_abs_diff_eq!(mv.mean, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(mv.variance, 1.0, epsilon = 1e-12);
        assert_eq!(MeanVar::of(&[]), MeanVar::default());
    }

    #[test]
    fn test_perfect_data() {
        let corpus = vec![clean_sample(0.1, 0.4), clean_sample(0.3, 0.2)];
        let q = calculate_quality(None, &corpus, &line4(), 1, 0.0).unwrap();
        assert_abs_diff_eq!(q.fraction_correct.mean, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(q.frac_difference.mean, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_lexicographic_order() {
        let q = |c: f64, d: f64| Quality {
            fraction_correct: MeanVar { mean: c, variance: 0.0 },
            frac_difference: MeanVar { mean: d, variance: 0.0 },
        };
        assert!(q(0.9, 0.5).better_than(&q(0.8, 0.0)));
        assert!(q(0.8, 0.1).better_than(&q(0.8, 0.2)));
        assert!(!q(0.8, 0.2).better_than(&q(0.8, 0.2)));
        assert!(!q(0.7, 0.0).better_than(&q(0.8, 0.9)));
    }

    #[test]
    fn test_missing_round() {
        let corpus = vec![clean_sample(0.1, 0.4)];
        assert!(matches!(
            calculate_quality(None, &corpus, &line4(), 2, 0.0),
            Err(QawError::MissingData { .. })
        ));
        assert!(calculate_quality(None, &[], &line4(), 1, 0.0).is_err());
    }
}
