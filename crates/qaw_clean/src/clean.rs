//! Data cleaning
//!
//! Gantree: L5_Clean → Cleaner
//!
//! Corrects each qubit's excitation probability using its own value and
//! the value of the neighbour it shares the most information with.

use crate::profile::CleaningProfile;
use qaw_core::{is_helper_pair, OneProb, PairMap, QawError, QawResult, QubitId, SameProb};
use qaw_stats::mutual_information;

/// Most informative neighbour of every qubit
/// Gantree: select_partners(p, same, pairs, min_i) -> QawResult<Vec<QubitId>> // 짝 선택
///
/// A qubit with no pair carrying more than `min_information` (and more
/// than zero) is its own partner. Ties go to the first pair by name.
pub fn select_partners(
    one_prob: &[f64],
    same_prob: &SameProb,
    pairs: &PairMap,
    min_information: f64,
) -> QawResult<Vec<QubitId>> {
    let info = mutual_information(one_prob, same_prob, pairs)?;
    let mut partners: Vec<QubitId> = (0..one_prob.len()).collect();
    let mut best = vec![0.0_f64; one_prob.len()];

    for (name, pair) in pairs {
        if is_helper_pair(name) {
            continue;
        }
        let Some(&value) = info.get(name) else {
            continue;
        };
        if value <= min_information {
            continue;
        }
        for (q, other) in [(pair.control, pair.target), (pair.target, pair.control)] {
            if q < best.len() && value > best[q] {
                best[q] = value;
                partners[q] = other;
            }
        }
    }
    Ok(partners)
}

/// Apply a cleaning profile
/// Gantree: clean(x, raw, same, pairs, min_i) -> QawResult<OneProb> // 정리
///
/// Results are clamped to `[0, 1]`.
pub fn clean(
    profile: &CleaningProfile,
    raw_one_prob: &[f64],
    same_prob: &SameProb,
    pairs: &PairMap,
    min_information: f64,
) -> QawResult<OneProb> {
    if profile.num_qubits() < raw_one_prob.len() {
        return Err(QawError::InvalidConfig(format!(
            "cleaning profile covers {} qubits, data has {}",
            profile.num_qubits(),
            raw_one_prob.len()
        )));
    }
    let partners = select_partners(raw_one_prob, same_prob, pairs, min_information)?;

    let cleaned = raw_one_prob
        .iter()
        .zip(&partners)
        .enumerate()
        .map(|(n, (&own, &partner))| {
            let [a, b, c] = profile.coefficients(n).unwrap_or([1.0, 0.0, 0.0]);
            (a * own + b * raw_one_prob[partner] + c).clamp(0.0, 1.0)
        })
        .collect();
    Ok(cleaned)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use qaw_core::Pair;

    fn line4() -> PairMap {
        let mut pairs = PairMap::new();
        pairs.insert("A".into(), Pair::new(0, 1));
        pairs.insert("B".into(), Pair::new(1, 2));
        pairs.insert("C".into(), Pair::new(2, 3));
        pairs
    }

    fn same(a: f64, b: f64, c: f64) -> SameProb {
        [("A", a), ("B", b), ("C", c)]
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect()
    }

    #[test]
    fn test_partners_follow_information() {
        let p = [0.3, 0.3, 0.5, 0.5];
        // A and C perfectly correlated, B independent
        let partners = select_partners(&p, &same(1.0, 0.5, 1.0), &line4(), 0.0).unwrap();
        assert_eq!(partners, vec![1, 0, 3, 2]);
    }

    #[test]
    fn test_partner_threshold() {
        let p = [0.3, 0.3, 0.5, 0.5];
        // C carries no information, B only rounding noise
        let partners = select_partners(&p, &same(1.0, 0.5, 0.5), &line4(), 1e-9).unwrap();
        assert_eq!(partners[0], 1);
        assert_eq!(partners[2], 2);
        assert_eq!(partners[3], 3);

        // Nothing clears an information bar above 1
        let partners = select_partners(&p, &same(1.0, 0.5, 1.0), &line4(), 1.5).unwrap();
        assert_eq!(partners, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_identity_is_idempotent() {
        let p = vec![0.1, 0.35, 0.0, 1.0];
        let identity = CleaningProfile::identity(4);
        let once = clean(&identity, &p, &same(1.0, 0.2, 0.7), &line4(), 0.0).unwrap();
        assert_eq!(once, p);
        let twice = clean(&identity, &once, &same(1.0, 0.2, 0.7), &line4(), 0.0).unwrap();
        assert_eq!(twice, p);
    }

    #[test]
    fn test_neutral_averages_partners() {
        let p = [0.2, 0.4, 0.5, 0.5];
        let neutral = CleaningProfile::neutral(4);
        // Agreement consistent with a strong correlation on A
        let cleaned = clean(&neutral, &p, &same(0.8, 0.5, 0.5), &line4(), 0.0).unwrap();
        assert_abs_diff_eq!(cleaned[0], 0.3, epsilon = 1e-12);
        assert_abs_diff_eq!(cleaned[1], 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_clamped() {
        let p = [0.9, 0.9, 0.1, 0.1];
        let profile = CleaningProfile::uniform(4, [1.0, 0.0, 0.5]);
        let cleaned = clean(&profile, &p, &same(1.0, 0.2, 1.0), &line4(), 0.0).unwrap();
        assert_eq!(cleaned[0], 1.0);
        assert_abs_diff_eq!(cleaned[2], 0.6, epsilon = 1e-12);

        let profile = CleaningProfile::uniform(4, [1.0, 0.0, -0.5]);
        let cleaned = clean(&profile, &p, &same(1.0, 0.2, 1.0), &line4(), 0.0).unwrap();
        assert_eq!(cleaned[3], 0.0);
    }

    #[test]
    fn test_short_profile_rejected() {
        let err = clean(&CleaningProfile::identity(2), &[0.1; 4], &same(1.0, 1.0, 1.0), &line4(), 0.0);
        assert!(matches!(err, Err(QawError::InvalidConfig(_))));
    }
}
