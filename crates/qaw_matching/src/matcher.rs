//! Matcher over named device pairs
//!
//! Gantree: L2_Matching → Matcher
//!
//! Turns named pairs and per-pair weights into a maximum-cardinality,
//! maximum-weight set of disjoint pair names. Helper pairs may be used
//! by the solver but are never reported.

use mwmatching::{Edges, Matching as Blossom, SENTINEL};
use qaw_core::constants::puzzle::RANDOM_WEIGHT_MAX;
use qaw_core::{frac_difference, frac_from_prob, is_helper_pair, PairMap, PairName, QubitId};
use qaw_core::{DeviceDescriptor, QawError, QawResult};
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Pair names chosen by a matching
pub type Matching = BTreeSet<PairName>;

/// Per-pair matching weights
pub type Weights = BTreeMap<PairName, f64>;

/// Resolution at which float weights are compared
pub const WEIGHT_SCALE: f64 = 1e6;

// ============================================================================
// Matching
// ============================================================================

/// Maximum-weight matching restricted to maximum cardinality
/// Gantree: find_matching(pairs, weights) -> Matching // 매칭
///
/// Only pairs present in `weights` are eligible. Weights are compared at
/// a resolution of `1 / WEIGHT_SCALE`; a weight whose scaled value does
/// not fit the solver's integer type is dropped with the pair.
pub fn find_matching(pairs: &PairMap, weights: &Weights) -> Matching {
    // One edge per unordered qubit pair: the heaviest name wins
    let mut best: HashMap<(QubitId, QubitId), (&str, i64)> = HashMap::new();
    for (name, pair) in pairs {
        let Some(&w) = weights.get(name) else {
            continue;
        };
        if !w.is_finite() {
            continue;
        }
        let key = (pair.control.min(pair.target), pair.control.max(pair.target));
        let scaled = (w * WEIGHT_SCALE).round() as i64;
        let entry = best.entry(key).or_insert((name.as_str(), scaled));
        if scaled > entry.1 {
            *entry = (name.as_str(), scaled);
        }
    }

    let mut edges: Edges = best
        .iter()
        .filter_map(|(&(a, b), &(_, w))| Some((a, b, w.try_into().ok()?)))
        .collect();
    edges.sort_unstable();
    let num_edges = edges.len();

    let mates = if edges.is_empty() {
        Vec::new()
    } else {
        Blossom::new(edges).max_cardinality().solve()
    };

    let mut matching = Matching::new();
    for (v, &u) in mates.iter().enumerate() {
        if u == SENTINEL || v > u {
            continue;
        }
        if let Some(&(name, _)) = best.get(&(v, u)) {
            if !is_helper_pair(name) {
                matching.insert(name.to_string());
            }
        }
    }
    log::debug!(
        "matching over {} edges selected {} pairs",
        num_edges,
        matching.len()
    );
    matching
}

/// Uniformly random integer weights in `[0, RANDOM_WEIGHT_MAX]`
pub fn random_weights<R: Rng + ?Sized>(pairs: &PairMap, rng: &mut R) -> Weights {
    pairs
        .keys()
        .map(|name| (name.clone(), rng.gen_range(0..=RANDOM_WEIGHT_MAX) as f64))
        .collect()
}

/// Random disjoint pairing
/// Gantree: random_matching(pairs, rng) -> Matching // 무작위 매칭
pub fn random_matching<R: Rng + ?Sized>(pairs: &PairMap, rng: &mut R) -> Matching {
    find_matching(pairs, &random_weights(pairs, rng))
}

/// Weights that favour pairs whose implied fractions are close
/// Gantree: weights_from_one_prob(pairs, p) -> Weights // 유사도 가중치
///
/// `w = -frac_difference(frac(p0), frac(p1))`; qubits beyond `one_prob`
/// read as 0.
pub fn weights_from_one_prob(pairs: &PairMap, one_prob: &[f64]) -> Weights {
    let prob = |q: QubitId| one_prob.get(q).copied().unwrap_or(0.0);
    pairs
        .iter()
        .map(|(name, pair)| {
            let f0 = frac_from_prob(prob(pair.control));
            let f1 = frac_from_prob(prob(pair.target));
            (name.clone(), -frac_difference(f0, f1))
        })
        .collect()
}

/// Matching guessed from raw excitation probabilities
pub fn matching_from_one_prob(pairs: &PairMap, one_prob: &[f64]) -> Matching {
    find_matching(pairs, &weights_from_one_prob(pairs, one_prob))
}

/// Check that no qubit appears in two chosen pairs
pub fn is_disjoint(matching: &Matching, pairs: &PairMap) -> QawResult<bool> {
    let mut seen = BTreeSet::new();
    for name in matching {
        let pair = pairs
            .get(name)
            .ok_or_else(|| QawError::UnknownPair(name.clone()))?;
        if !seen.insert(pair.control) || !seen.insert(pair.target) {
            return Ok(false);
        }
    }
    Ok(true)
}

// ============================================================================
// Example Puzzles
// ============================================================================

/// Random example puzzle for tutorials
/// Gantree: make_example(device, rng) -> Vec<Option<f64>> // 예제 생성
///
/// For each pair of a random matching, `p0 = u/2` and `p1 = p0 + 0.05·u'`.
/// Unpaired active qubits read 0, inactive qubits `None`.
pub fn make_example<R: Rng + ?Sized>(device: &DeviceDescriptor, rng: &mut R) -> Vec<Option<f64>> {
    let mut example: Vec<Option<f64>> = (0..device.num_qubits())
        .map(|q| device.is_active(q).then_some(0.0))
        .collect();
    for name in random_matching(device.pairs(), rng) {
        if let Ok(pair) = device.pair(&name) {
            let p0 = rng.gen::<f64>() / 2.0;
            let p1 = p0 + 0.05 * rng.gen::<f64>();
            example[pair.control] = Some(p0);
            example[pair.target] = Some(p1);
        }
    }
    example
}

// ============================================================================
// Tests
// ============================================================================
