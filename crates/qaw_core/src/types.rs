//! Core types for Quantum Awesomeness
//!
//! Gantree: L0_Foundation → CoreTypes
//!
//! Type aliases and small value types shared by the matcher, the
//! circuit accumulator, the statistics extractor and the round engine.

use crate::constants::puzzle::HELPER_PREFIX;
use crate::error::{QawError, QawResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Qubit identifier (0-indexed)
/// Gantree: QubitId // pub type QubitId = usize
pub type QubitId = usize;

/// Rotation angle in units of π
/// Gantree: Frac // pub type Frac = f64
pub type Frac = f64;

/// Name of an entangling pair (e.g. "A", "AB", "fake3")
pub type PairName = String;

/// Per-qubit probability of reading `1`
pub type OneProb = Vec<f64>;

/// Per-pair probability of both qubits reading the same value
pub type SameProb = BTreeMap<PairName, f64>;

/// Named pairs of a device
pub type PairMap = BTreeMap<PairName, Pair>;

/// Whether a pair name marks a helper edge used only to balance matchings
pub fn is_helper_pair(name: &str) -> bool {
    name.starts_with(HELPER_PREFIX)
}

// ============================================================================
// Pair
// ============================================================================

/// Two qubits joined by an entangling gate
/// Gantree: Pair // (control, target)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pair {
    /// Control qubit for asymmetric gates
    pub control: QubitId,
    /// Target qubit
    pub target: QubitId,
}

impl Pair {
    /// Create a new pair
    pub fn new(control: QubitId, target: QubitId) -> Self {
        Self { control, target }
    }

    /// Both qubits, control first
    pub fn qubits(&self) -> [QubitId; 2] {
        [self.control, self.target]
    }

    /// Check whether the pair touches a qubit
    pub fn contains(&self, qubit: QubitId) -> bool {
        self.control == qubit || self.target == qubit
    }

    /// The other qubit of the pair
    pub fn partner(&self, qubit: QubitId) -> Option<QubitId> {
        if qubit == self.control {
            Some(self.target)
        } else if qubit == self.target {
            Some(self.control)
        } else {
            None
        }
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.control, self.target)
    }
}

impl From<(QubitId, QubitId)> for Pair {
    fn from((control, target): (QubitId, QubitId)) -> Self {
        Self::new(control, target)
    }
}

// ============================================================================
// Axis
// ============================================================================

/// Rotation axis for single-qubit conjugation gates
/// Gantree: Axis // X/Y
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Rotation around X
    X,
    /// Rotation around Y
    Y,
}

impl Axis {
    /// Parse from character
    pub fn from_char(c: char) -> QawResult<Self> {
        match c.to_ascii_uppercase() {
            'X' => Ok(Axis::X),
            'Y' => Ok(Axis::Y),
            _ => Err(QawError::InvalidConfig(format!("invalid axis '{}'", c))),
        }
    }

    /// Convert to character
    pub fn to_char(&self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

// ============================================================================
// Modes
// ============================================================================

/// Where the circuits run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RunMode {
    /// Simulator returning exact distributions
    Simulated,
    /// Real hardware returning sampled counts
    Real,
}

impl RunMode {
    /// Check if simulated
    pub fn is_simulated(&self) -> bool {
        matches!(self, RunMode::Simulated)
    }

    /// Mode from the historical boolean flag
    pub fn from_sim(sim: bool) -> Self {
        if sim {
            RunMode::Simulated
        } else {
            RunMode::Real
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Simulated => write!(f, "simulated"),
            RunMode::Real => write!(f, "real"),
        }
    }
}

/// How the pairing guess for a round is chosen
/// Gantree: MoveMode // C/R/B/M
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MoveMode {
    /// Ground truth ("C")
    Correct,
    /// Uniformly random disjoint matching ("R")
    Random,
    /// Matcher on raw statistics ("B")
    Bot,
    /// Externally supplied player guess ("M")
    Manual,
}

impl MoveMode {
    /// Single-letter code used in record keys
    pub fn code(&self) -> char {
        match self {
            MoveMode::Correct => 'C',
            MoveMode::Random => 'R',
            MoveMode::Bot => 'B',
            MoveMode::Manual => 'M',
        }
    }

    /// Parse from the single-letter code
    pub fn from_code(c: char) -> QawResult<Self> {
        match c.to_ascii_uppercase() {
            'C' => Ok(MoveMode::Correct),
            'R' => Ok(MoveMode::Random),
            'B' => Ok(MoveMode::Bot),
            'M' => Ok(MoveMode::Manual),
            _ => Err(QawError::InvalidConfig(format!("invalid move '{}'", c))),
        }
    }
}

impl fmt::Display for MoveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Bitstring
// ============================================================================

/// Measurement outcome, qubit 0 first
/// Gantree: Bitstring // 비트열 타입
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bitstring {
    bits: Vec<bool>,
}

impl Bitstring {
    /// Create from a vector of bools
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Create from string (e.g., "0110")
    /// Gantree: parse(s) -> Self // 파싱
    pub fn parse(s: &str) -> QawResult<Self> {
        let bits: Result<Vec<bool>, _> = s
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(QawError::InvalidBitstring(s.to_string())),
            })
            .collect();
        Ok(Self { bits: bits? })
    }

    /// Create zero bitstring of given length
    pub fn zeros(n: usize) -> Self {
        Self {
            bits: vec![false; n],
        }
    }

    /// Get the number of bits
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bit of a qubit
    pub fn get(&self, qubit: QubitId) -> Option<bool> {
        self.bits.get(qubit).copied()
    }

    /// Whether two qubits read the same value
    pub fn agrees(&self, a: QubitId, b: QubitId) -> bool {
        self.get(a) == self.get(b)
    }

    /// Count number of 1s
    pub fn popcount(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }
}

impl fmt::Display for Bitstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bits {
            write!(f, "{}", if b { '1' } else { '0' })?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_partner() {
        let p = Pair::new(3, 7);
        assert_eq!(p.partner(3), Some(7));
        assert_eq!(p.partner(7), Some(3));
        assert_eq!(p.partner(1), None);
        assert!(p.contains(7));
    }

    #[test]
    fn test_helper_pair() {
        assert!(is_helper_pair("fake1"));
        assert!(!is_helper_pair("A"));
        assert!(!is_helper_pair("Fake"));
    }

    #[test]
    fn test_move_codes() {
        for mode in [
            MoveMode::Correct,
            MoveMode::Random,
            MoveMode::Bot,
            MoveMode::Manual,
        ] {
            assert_eq!(MoveMode::from_code(mode.code()).unwrap(), mode);
        }
        assert!(MoveMode::from_code('Z').is_err());
    }

    #[test]
    fn test_axis() {
        assert_eq!(Axis::from_char('y').unwrap(), Axis::Y);
        assert!(Axis::from_char('Z').is_err());
    }

    #[test]
    fn test_bitstring_agrees() {
        let bs = Bitstring::parse("0110").unwrap();
        assert!(bs.agrees(1, 2));
        assert!(!bs.agrees(0, 1));
        assert_eq!(bs.get(2), Some(true));
        assert_eq!(bs.popcount(), 2);
        assert!(Bitstring::parse("01a").is_err());
    }

    #[test]
    fn test_run_mode() {
        assert!(RunMode::from_sim(true).is_simulated());
        assert_eq!(RunMode::Real.to_string(), "real");
    }
}
