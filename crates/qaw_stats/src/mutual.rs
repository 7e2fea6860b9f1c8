//! Mutual information estimator
//!
//! Gantree: L4_Stats → Mutual
//!
//! Rebuilds the two-qubit outcome distribution of each pair from its
//! marginals and agreement probability, then measures how much one
//! qubit's result tells about the other's.

use qaw_core::constants::stats::MI_NORMALIZE_TOLERANCE;
use qaw_core::{PairMap, PairName, QawError, QawResult, QubitId};
use std::collections::BTreeMap;

/// Per-pair mutual information
pub type Information = BTreeMap<PairName, f64>;

/// Shannon entropy in bits, with `0·log 0 = 0`
/// Gantree: entropy(probs) -> f64 // 엔트로피
pub fn entropy(probs: &[f64]) -> f64 {
    probs
        .iter()
        .filter(|&&p| p > 0.0)
        .map(|&p| -p * p.log2())
        .sum()
}

/// Entropy of a single bit reading `1` with probability `p`
pub fn binary_entropy(p: f64) -> f64 {
    entropy(&[1.0 - p, p])
}

/// `1 - 2p` for each probability of reading the `-1` outcome
pub fn expectations(probs: &[f64]) -> Vec<f64> {
    probs.iter().map(|p| 1.0 - 2.0 * p).collect()
}

/// Joint distribution implied by two marginals and the agreement
/// probability, indexed by `q0 + 2·q1`
pub fn joint_distribution(p0: f64, p1: f64, same: f64) -> [f64; 4] {
    let e = expectations(&[p0, p1, 1.0 - same]);
    [
        (1.0 + e[0] + e[1] + e[2]) / 4.0,
        (1.0 - e[0] + e[1] - e[2]) / 4.0,
        (1.0 + e[0] - e[1] - e[2]) / 4.0,
        (1.0 - e[0] - e[1] + e[2]) / 4.0,
    ]
}

/// Mutual information of one pair
/// Gantree: pair_information(p0, p1, same) -> f64 // 쌍 상호정보
///
/// Above `MI_NORMALIZE_TOLERANCE` the value is divided by the smaller
/// marginal entropy, bounding it to `[0, 1]`.
pub fn pair_information(p0: f64, p1: f64, same: f64) -> f64 {
    let h0 = binary_entropy(p0);
    let h1 = binary_entropy(p1);
    let info = h0 + h1 - entropy(&joint_distribution(p0, p1, same));
    if info > MI_NORMALIZE_TOLERANCE {
        info / h0.min(h1)
    } else {
        info
    }
}

/// Mutual information for every pair with an agreement probability
/// Gantree: mutual_information(one_prob, same_prob, pairs) -> QawResult<Information> // 상호정보
pub fn mutual_information(
    one_prob: &[f64],
    same_prob: &BTreeMap<PairName, f64>,
    pairs: &PairMap,
) -> QawResult<Information> {
    let prob = |q: QubitId| {
        one_prob.get(q).copied().ok_or(QawError::QubitOutOfRange {
            qubit: q,
            num_qubits: one_prob.len(),
        })
    };

    let mut info = Information::new();
    for (name, &same) in same_prob {
        let pair = pairs
            .get(name)
            .ok_or_else(|| QawError::UnknownPair(name.clone()))?;
        let value = pair_information(prob(pair.control)?, prob(pair.target)?, same);
        info.insert(name.clone(), value);
    }
    Ok(info)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use qaw_core::Pair;

    fn pairs() -> PairMap {
        let mut pairs = PairMap::new();
        pairs.insert("A".into(), Pair::new(0, 1));
        pairs.insert("B".into(), Pair::new(1, 2));
        pairs
    }

    #[test]
    fn test_entropy() {
        assert_abs_diff_eq!(entropy(&[0.5, 0.5]), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(entropy(&[1.0, 0.0]), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(entropy(&[0.25; 4]), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_joint_distribution_sums_to_one() {
        let joint = joint_distribution(0.3, 0.6, 0.55);
        assert_abs_diff_eq!(joint.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(joint[1] + joint[3], 0.3, epsilon = 1e-12);
        assert_abs_diff_eq!(joint[2] + joint[3], 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(joint[0] + joint[3], 0.55, epsilon = 1e-12);
    }

    #[test]
    fn test_perfect_correlation_is_one() {
        for p in [0.1, 0.3, 0.5] {
            assert_abs_diff_eq!(pair_information(p, p, 1.0), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_independent_is_zero() {
        // Independent fair coins agree half the time
        assert_abs_diff_eq!(pair_information(0.5, 0.5, 0.5), 0.0, epsilon = 1e-12);
        // Independent biased bits: P(same) = p0 p1 + (1-p0)(1-p1)
        let (p0, p1) = (0.2, 0.7);
        let same = p0 * p1 + (1.0 - p0) * (1.0 - p1);
        assert_abs_diff_eq!(pair_information(p0, p1, same), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_below_tolerance_not_normalized() {
        // Marginal entropies are tiny, so normalizing would blow up
        let value = pair_information(0.0, 0.0, 1.0);
        assert_abs_diff_eq!(value, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mutual_information_per_pair() {
        let mut same = BTreeMap::new();
        same.insert("A".to_string(), 1.0);
        same.insert("B".to_string(), 0.5);
        let info = mutual_information(&[0.5, 0.5, 0.5], &same, &pairs()).unwrap();
        assert_abs_diff_eq!(info["A"], 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(info["B"], 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_mutual_information_errors() {
        let mut same = BTreeMap::new();
        same.insert("Z".to_string(), 1.0);
        assert_eq!(
            mutual_information(&[0.5; 3], &same, &pairs()),
            Err(QawError::UnknownPair("Z".into()))
        );

        let mut same = BTreeMap::new();
        same.insert("B".to_string(), 1.0);
        assert!(matches!(
            mutual_information(&[0.5; 2], &same, &pairs()),
            Err(QawError::QubitOutOfRange { qubit: 2, .. })
        ));
    }
}
