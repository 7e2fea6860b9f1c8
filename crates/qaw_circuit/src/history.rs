//! Gate and conjugation history types
//!
//! Gantree: L3_Circuit → History
//!
//! A game's history is two gate sets per finished round (creating, then
//! removing) plus one creating set for the round in play, and one
//! conjugation layer per finished round.

use qaw_core::{Axis, Frac, PairName};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// XX rotations for one slice of a round, keyed by pair name
pub type GateSet = BTreeMap<PairName, Frac>;

/// Random single-qubit rotation used to scramble a finished round
/// Gantree: Conjugate // (axis, frac)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Conjugate {
    /// Rotation axis
    pub axis: Axis,
    /// Rotation angle in units of π
    pub frac: Frac,
}

impl Conjugate {
    /// Create a conjugation
    pub fn new(axis: Axis, frac: Frac) -> Self {
        Self { axis, frac }
    }

    /// Draw axis uniformly from {X, Y} and frac uniformly from [0, 1)
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let axis = if rng.gen_bool(0.5) { Axis::X } else { Axis::Y };
        Self::new(axis, rng.gen::<f64>())
    }

    /// Same rotation undone
    pub fn inverse(&self) -> Self {
        Self::new(self.axis, -self.frac)
    }
}

/// One conjugation per qubit slot
pub type ConjugateLayer = Vec<Conjugate>;

/// Random conjugation layer for every qubit slot
/// Gantree: random_layer(n, rng) -> ConjugateLayer // 무작위 켤레
pub fn random_layer<R: Rng + ?Sized>(num_qubits: usize, rng: &mut R) -> ConjugateLayer {
    (0..num_qubits).map(|_| Conjugate::random(rng)).collect()
}

/// Number of rounds described by a gate history (finished plus pending)
pub fn rounds_in(gates: &[GateSet]) -> usize {
    (gates.len() + 1) / 2
}

/// Number of finished rounds in a gate history
pub fn completed_rounds(gates: &[GateSet]) -> usize {
    gates.len() / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_layer() {
        let mut rng = StdRng::seed_from_u64(1);
        let layer = random_layer(200, &mut rng);
        assert_eq!(layer.len(), 200);
        assert!(layer.iter().all(|c| (0.0..1.0).contains(&c.frac)));
        let xs = layer.iter().filter(|c| c.axis == Axis::X).count();
        assert!(xs > 60 && xs < 140);
    }

    #[test]
    fn test_inverse() {
        let c = Conjugate::new(Axis::Y, 0.3);
        assert_eq!(c.inverse(), Conjugate::new(Axis::Y, -0.3));
    }

    #[test]
    fn test_round_counts() {
        let set = GateSet::new();
        assert_eq!(rounds_in(&[]), 0);
        assert_eq!(rounds_in(&[set.clone()]), 1);
        assert_eq!(completed_rounds(&[set.clone()]), 0);
        assert_eq!(rounds_in(&vec![set.clone(); 3]), 2);
        assert_eq!(completed_rounds(&vec![set; 4]), 2);
    }
}
