//! Cleaning profiles
//!
//! Gantree: L5_Clean → Profile
//!
//! A profile holds three affine coefficients per qubit:
//! `p'[n] = x[3n]·p[n] + x[3n+1]·p[match(n)] + x[3n+2]`.
//! A `ProfileSet` holds one profile per game round.

use qaw_core::constants::cleaning::{COEFFS_PER_QUBIT, GRITTY, IDENTITY, NEUTRAL, SMOOTH};
use qaw_core::{QawError, QawResult, QubitId};
use serde::{Deserialize, Serialize};

/// Per-qubit affine correction coefficients
/// Gantree: CleaningProfile // 정리 계수
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CleaningProfile {
    coeffs: Vec<f64>,
}

impl CleaningProfile {
    /// Create from a flat coefficient list (three per qubit)
    pub fn new(coeffs: Vec<f64>) -> QawResult<Self> {
        if coeffs.len() % COEFFS_PER_QUBIT != 0 {
            return Err(QawError::InvalidConfig(format!(
                "cleaning profile needs {} coefficients per qubit, got {} in total",
                COEFFS_PER_QUBIT,
                coeffs.len()
            )));
        }
        if let Some(bad) = coeffs.iter().find(|c| !c.is_finite()) {
            return Err(QawError::InvalidConfig(format!(
                "cleaning coefficient {} is not finite",
                bad
            )));
        }
        Ok(Self { coeffs })
    }

    /// Same coefficients on every qubit
    pub fn uniform(num_qubits: usize, per_qubit: [f64; 3]) -> Self {
        Self {
            coeffs: per_qubit.repeat(num_qubits),
        }
    }

    /// Leaves data unchanged
    pub fn identity(num_qubits: usize) -> Self {
        Self::uniform(num_qubits, IDENTITY)
    }

    /// Equal mix of a qubit and its partner
    pub fn neutral(num_qubits: usize) -> Self {
        Self::uniform(num_qubits, NEUTRAL)
    }

    /// Number of qubits covered
    pub fn num_qubits(&self) -> usize {
        self.coeffs.len() / COEFFS_PER_QUBIT
    }

    /// `(self, partner, offset)` coefficients of a qubit
    pub fn coefficients(&self, qubit: QubitId) -> Option<[f64; 3]> {
        let base = qubit * COEFFS_PER_QUBIT;
        let c = self.coeffs.get(base..base + COEFFS_PER_QUBIT)?;
        Some([c[0], c[1], c[2]])
    }

    /// Flat coefficient list
    pub fn as_slice(&self) -> &[f64] {
        &self.coeffs
    }

    /// Nudge one flat coefficient
    pub(crate) fn perturb(&mut self, index: usize, delta: f64) {
        if let Some(c) = self.coeffs.get_mut(index) {
            *c += delta;
        }
    }

    /// Number of flat coefficients
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    /// Check if the profile covers no qubits
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }
}

// ============================================================================
// Profile Set
// ============================================================================

/// One cleaning profile per round
/// Gantree: ProfileSet // 라운드별 계수
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileSet {
    rounds: Vec<CleaningProfile>,
}

impl ProfileSet {
    /// Create from per-round profiles
    pub fn new(rounds: Vec<CleaningProfile>) -> Self {
        Self { rounds }
    }

    /// Fallback profiles when none were fitted
    /// Gantree: default_for(n, rounds, gritty) -> Self // 기본 계수
    ///
    /// `gritty` keeps some of the raw noise visible for human players.
    pub fn default_for(num_qubits: usize, max_score: usize, gritty: bool) -> Self {
        let per_qubit = if gritty { GRITTY } else { SMOOTH };
        Self {
            rounds: vec![CleaningProfile::uniform(num_qubits, per_qubit); max_score],
        }
    }

    /// Profile for round `round` (1-based)
    pub fn get(&self, round: usize) -> QawResult<&CleaningProfile> {
        round
            .checked_sub(1)
            .and_then(|r| self.rounds.get(r))
            .ok_or_else(|| QawError::MissingData {
                what: format!(
                    "cleaning profile for round {} ({} rounds fitted)",
                    round,
                    self.rounds.len()
                ),
            })
    }

    /// Number of rounds covered
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    /// Check if no rounds are covered
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Iterate over per-round profiles
    pub fn iter(&self) -> impl Iterator<Item = &CleaningProfile> {
        self.rounds.iter()
    }

    /// Serialize to JSON (a list of flat coefficient lists)
    pub fn to_json(&self) -> QawResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON, checking coefficient counts
    pub fn from_json(json: &str) -> QawResult<Self> {
        let raw: Vec<Vec<f64>> = serde_json::from_str(json)?;
        let rounds = raw
            .into_iter()
            .map(CleaningProfile::new)
            .collect::<QawResult<Vec<_>>>()?;
        Ok(Self { rounds })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_shape() {
        let p = CleaningProfile::identity(4);
        assert_eq!(p.num_qubits(), 4);
        assert_eq!(p.len(), 12);
        assert_eq!(p.coefficients(2), Some([1.0, 0.0, 0.0]));
        assert_eq!(p.coefficients(4), None);
        assert!(CleaningProfile::new(vec![1.0, 0.0]).is_err());
        assert!(CleaningProfile::new(vec![1.0, f64::NAN, 0.0]).is_err());
    }

    #[test]
    fn test_perturb() {
        let mut p = CleaningProfile::neutral(2);
        p.perturb(5, 0.1);
        assert_eq!(p.coefficients(1), Some([0.5, 0.5, 0.1]));
        p.perturb(99, 1.0);
        assert_eq!(p.len(), 6);
    }

    #[test]
    fn test_default_sets() {
        let gritty = ProfileSet::default_for(3, 5, true);
        assert_eq!(gritty.len(), 5);
        assert_eq!(gritty.get(1).unwrap().coefficients(0), Some([0.5, 0.5, 0.0]));

        let smooth = ProfileSet::default_for(3, 5, false);
        assert_eq!(smooth.get(5).unwrap().coefficients(2), Some([0.45, 0.55, 0.0]));
        assert!(smooth.get(0).is_err());
        assert!(smooth.get(6).is_err());
    }

    #[test]
    fn test_json_is_flat_lists() {
        let set = ProfileSet::default_for(1, 2, true);
        let json = set.to_json().unwrap();
        assert_eq!(json, "[[0.5,0.5,0.0],[0.5,0.5,0.0]]");
        assert_eq!(ProfileSet::from_json(&json).unwrap(), set);
        assert!(ProfileSet::from_json("[[0.5,0.5]]").is_err());
    }
}
