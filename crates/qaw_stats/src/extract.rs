//! Statistics extraction
//!
//! Gantree: L4_Stats → Extractor
//!
//! Reduces a raw result to per-qubit excitation probabilities and
//! per-pair agreement probabilities. Exact distributions are resampled
//! `shots` times so that simulated and hardware data carry the same
//! finite-sampling noise.

use crate::raw::RawResult;
use qaw_core::constants::stats::INACTIVE_BIT;
use qaw_core::{Bitstring, DeviceDescriptor, OneProb, QawError, QawResult, SameProb};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Normalized outcome frequencies keyed by bitstring
pub type Frequencies = BTreeMap<String, f64>;

/// Statistics for one execution
/// Gantree: Snapshot // oneProb, sameProb, results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Fraction of shots reading `1`, per qubit
    pub one_prob: OneProb,
    /// Fraction of shots where both qubits of a pair agree
    pub same_prob: SameProb,
    /// Frequencies the statistics were computed from
    pub results: Frequencies,
}

/// Outcome of extraction
/// Gantree: Extraction // Measured | Pending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Extraction {
    /// Measurement data reduced to statistics
    Measured(Snapshot),
    /// Non-measurement payload passed through untouched
    Pending(String),
}

impl Extraction {
    /// Snapshot, if measurement data was available
    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            Extraction::Measured(s) => Some(s),
            Extraction::Pending(_) => None,
        }
    }

    /// Take the snapshot, failing on a pending handle
    pub fn into_snapshot(self) -> QawResult<Snapshot> {
        match self {
            Extraction::Measured(s) => Ok(s),
            Extraction::Pending(handle) => Err(QawError::MalformedResult(format!(
                "expected measurement data, got pending handle '{}'",
                handle
            ))),
        }
    }
}

// ============================================================================
// Extraction
// ============================================================================

/// Reduce a raw result to statistics
/// Gantree: extract(raw, device, shots, rng) -> QawResult<Extraction> // 통계 추출
///
/// - `Exact`: `shots` categorical draws, renormalized
/// - `Counts`: divided by `shots`
/// - `Frequencies`: used as given
/// - `Pending`: passed through
///
/// Inactive qubits always read `0`.
pub fn extract<R: Rng + ?Sized>(
    raw: &RawResult,
    device: &DeviceDescriptor,
    shots: u64,
    rng: &mut R,
) -> QawResult<Extraction> {
    let frequencies = match raw {
        RawResult::Pending(handle) => {
            log::debug!("result pending: {}", handle);
            return Ok(Extraction::Pending(handle.clone()));
        }
        RawResult::Exact(probs) => sample_shots(probs, shots, rng)?,
        RawResult::Counts(counts) => {
            check_shots(shots)?;
            counts
                .iter()
                .map(|(k, &c)| (k.clone(), c as f64 / shots as f64))
                .collect()
        }
        RawResult::Frequencies(freqs) => freqs.clone(),
    };

    let results = pad_inactive(&frequencies, device)?;
    let (one_prob, same_prob) = marginals(&results, device)?;

    log::debug!(
        "extracted statistics over {} outcomes for {} qubits",
        results.len(),
        device.num_qubits()
    );
    Ok(Extraction::Measured(Snapshot {
        one_prob,
        same_prob,
        results,
    }))
}

/// Draw `shots` samples from an exact distribution
/// Gantree: sample_shots(probs, shots, rng) -> Frequencies // 샷 잡음
///
/// Every input bitstring is kept in the output, with frequency 0 if it
/// was never drawn.
pub fn sample_shots<R: Rng + ?Sized>(
    probs: &BTreeMap<String, f64>,
    shots: u64,
    rng: &mut R,
) -> QawResult<Frequencies> {
    check_shots(shots)?;
    let keys: Vec<&String> = probs.keys().collect();
    let dist = WeightedIndex::new(probs.values().copied())
        .map_err(|e| QawError::MalformedResult(format!("bad probability table: {}", e)))?;

    let mut hits = vec![0u64; keys.len()];
    for _ in 0..shots {
        hits[dist.sample(rng)] += 1;
    }

    Ok(keys
        .into_iter()
        .zip(hits)
        .map(|(k, h)| (k.clone(), h as f64 / shots as f64))
        .collect())
}

fn check_shots(shots: u64) -> QawResult<()> {
    if shots == 0 {
        return Err(QawError::InvalidConfig("shots must be positive".into()));
    }
    Ok(())
}

/// Force inactive qubits to the placeholder bit, merging collisions
fn pad_inactive(freqs: &Frequencies, device: &DeviceDescriptor) -> QawResult<Frequencies> {
    let n = device.num_qubits();
    let mut padded = Frequencies::new();
    for (key, &p) in freqs {
        if key.chars().count() != n {
            return Err(QawError::MalformedResult(format!(
                "bitstring '{}' has {} bits for {} qubits",
                key,
                key.chars().count(),
                n
            )));
        }
        let fixed: String = key
            .chars()
            .enumerate()
            .map(|(q, c)| if device.is_active(q) { c } else { INACTIVE_BIT })
            .collect();
        *padded.entry(fixed).or_insert(0.0) += p;
    }
    Ok(padded)
}

/// Excitation and agreement probabilities from frequencies
/// Gantree: marginals(results, device) -> (OneProb, SameProb) // 주변 확률
pub fn marginals(results: &Frequencies, device: &DeviceDescriptor) -> QawResult<(OneProb, SameProb)> {
    let mut one_prob = vec![0.0; device.num_qubits()];
    let mut same_prob: SameProb = device.pairs().keys().map(|k| (k.clone(), 0.0)).collect();

    for (key, &p) in results {
        let bits = Bitstring::parse(key)?;
        for (q, slot) in one_prob.iter_mut().enumerate() {
            if bits.get(q) == Some(true) {
                *slot += p;
            }
        }
        for (name, pair) in device.pairs() {
            if bits.agrees(pair.control, pair.target) {
                if let Some(slot) = same_prob.get_mut(name) {
                    *slot += p;
                }
            }
        }
    }
    Ok((one_prob, same_prob))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use qaw_core::get_device;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn table(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_frequencies_used_directly() {
        let device = get_device("line3").unwrap();
        let raw = RawResult::Frequencies(table(&[("110", 0.25), ("000", 0.75)]));
        let mut rng = StdRng::seed_from_u64(0);
        let snap = extract(&raw, &device, 100, &mut rng).unwrap().into_snapshot().unwrap();

        assert_abs_diff_eq!(snap.one_prob[0], 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(snap.one_prob[1], 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(snap.one_prob[2], 0.0, epsilon = 1e-12);
        // A = [0,1] always agrees, B = [1,2] disagrees on "110"
        assert_abs_diff_eq!(snap.same_prob["A"], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(snap.same_prob["B"], 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_counts_divided_by_shots() {
        let device = get_device("line3").unwrap();
        let mut counts = BTreeMap::new();
        counts.insert("100".to_string(), 30u64);
        counts.insert("000".to_string(), 70u64);
        let mut rng = StdRng::seed_from_u64(0);
        let snap = extract(&RawResult::Counts(counts), &device, 100, &mut rng)
            .unwrap()
            .into_snapshot()
            .unwrap();
        assert_abs_diff_eq!(snap.one_prob[0], 0.3, epsilon = 1e-12);
        assert_abs_diff_eq!(snap.results["000"], 0.7, epsilon = 1e-12);
    }

    #[test]
    fn test_exact_is_resampled() {
        let device = get_device("line3").unwrap();
        let raw = RawResult::Exact(table(&[("000", 0.5), ("111", 0.5), ("010", 0.0)]));
        let mut rng = StdRng::seed_from_u64(3);
        let snap = extract(&raw, &device, 1000, &mut rng).unwrap().into_snapshot().unwrap();

        // Zero-probability outcomes are kept but never drawn
        assert_eq!(snap.results["010"], 0.0);
        let total: f64 = snap.results.values().sum();
        assert_abs_diff_eq!(total, 1.0, epsilon = 1e-9);
        // Sampling noise, but close to 1/2
        assert!((snap.one_prob[1] - 0.5).abs() < 0.06);
        assert_abs_diff_eq!(snap.same_prob["A"], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sampling_is_seeded() {
        let probs = table(&[("00", 0.3), ("01", 0.3), ("11", 0.4)]);
        let a = sample_shots(&probs, 200, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = sample_shots(&probs, 200, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_pending_passthrough() {
        let device = get_device("line3").unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let out = extract(&RawResult::Pending("job-7".into()), &device, 100, &mut rng).unwrap();
        assert_eq!(out, Extraction::Pending("job-7".into()));
        assert!(out.snapshot().is_none());
        assert!(out.into_snapshot().is_err());
    }

    #[test]
    fn test_inactive_qubit_reads_zero() {
        // Qubit 3 of 19Q-Acorn is disabled
        let device = get_device("19Q-Acorn").unwrap();
        let mut ones = "0".repeat(device.num_qubits());
        ones.replace_range(3..5, "11");
        let raw = RawResult::Frequencies(table(&[(ones.as_str(), 1.0)]));
        let mut rng = StdRng::seed_from_u64(0);
        let snap = extract(&raw, &device, 10, &mut rng).unwrap().into_snapshot().unwrap();

        assert_eq!(snap.one_prob.len(), 20);
        assert_eq!(snap.one_prob[3], 0.0);
        assert_eq!(snap.one_prob[4], 1.0);
        let key = snap.results.keys().next().unwrap();
        assert_eq!(key.chars().nth(3), Some('0'));
    }

    #[test]
    fn test_bad_inputs() {
        let device = get_device("line3").unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let short = RawResult::Frequencies(table(&[("01", 1.0)]));
        assert!(matches!(
            extract(&short, &device, 10, &mut rng),
            Err(QawError::MalformedResult(_))
        ));

        let empty = RawResult::Exact(table(&[("000", 0.0)]));
        assert!(extract(&empty, &device, 10, &mut rng).is_err());

        let counts = RawResult::Counts(BTreeMap::new());
        assert!(matches!(
            extract(&counts, &device, 0, &mut rng),
            Err(QawError::InvalidConfig(_))
        ));
    }
}
