//! Device descriptors
//!
//! Gantree: L1_Device → DeviceDescriptor
//!
//! Immutable description of a playable device: qubit count, named pairs,
//! display positions, entangling-gate family, active qubits and the run
//! table used for data collection.

use crate::error::{QawError, QawResult};
use crate::types::{is_helper_pair, MoveMode, Pair, PairMap, QubitId, RunMode};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Default example value for qubits when no example puzzle is given
const DEFAULT_EXAMPLE: f64 = 0.25;

// ============================================================================
// Entangler Type
// ============================================================================

/// Two-qubit gate family a device natively offers
/// Gantree: EntanglerType // CX/CZ/none
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EntanglerType {
    /// CNOT (CX) gates
    Cx,
    /// CZ gates
    #[default]
    Cz,
    /// No entangling gate: pairs are rotated independently
    Independent,
}

impl FromStr for EntanglerType {
    type Err = QawError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cx" | "cnot" => Ok(EntanglerType::Cx),
            "cz" => Ok(EntanglerType::Cz),
            "none" | "independent" => Ok(EntanglerType::Independent),
            _ => Err(QawError::UnsupportedEntangler(s.to_string())),
        }
    }
}

impl fmt::Display for EntanglerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntanglerType::Cx => write!(f, "CX"),
            EntanglerType::Cz => write!(f, "CZ"),
            EntanglerType::Independent => write!(f, "none"),
        }
    }
}

// ============================================================================
// Run Table
// ============================================================================

/// Data-collection settings for one run mode
/// Gantree: RunSpec // shots/moves/maxScore/samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSpec {
    /// Allowed shot counts
    pub shots: Vec<u64>,
    /// Move modes to collect
    pub moves: Vec<MoveMode>,
    /// Rounds per game
    pub max_score: usize,
    /// Games per configuration
    pub samples: usize,
}

impl RunSpec {
    /// Create a run spec
    pub fn new(shots: Vec<u64>, moves: Vec<MoveMode>, max_score: usize, samples: usize) -> Self {
        Self {
            shots,
            moves,
            max_score,
            samples,
        }
    }

    /// Settings used for simulated runs of every catalog device
    pub fn simulated_default() -> Self {
        Self::new(vec![100], vec![MoveMode::Correct, MoveMode::Random], 20, 100)
    }

    /// Check whether nothing is configured
    pub fn is_empty(&self) -> bool {
        self.shots.is_empty() || self.moves.is_empty() || self.max_score == 0
    }
}

/// Run settings per mode
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunTable {
    /// Simulated runs
    pub simulated: Option<RunSpec>,
    /// Real-device runs
    pub real: Option<RunSpec>,
}

impl RunTable {
    /// Table with the given real-device settings and the default simulated ones
    pub fn with_real(real: RunSpec) -> Self {
        Self {
            simulated: Some(RunSpec::simulated_default()),
            real: Some(real),
        }
    }

    /// Table for simulation-only devices
    pub fn simulated_only() -> Self {
        Self {
            simulated: Some(RunSpec::simulated_default()),
            real: None,
        }
    }

    /// Settings for a mode, if any are configured
    pub fn get(&self, mode: RunMode) -> Option<&RunSpec> {
        let spec = match mode {
            RunMode::Simulated => self.simulated.as_ref(),
            RunMode::Real => self.real.as_ref(),
        };
        spec.filter(|s| !s.is_empty())
    }
}

// ============================================================================
// Device Descriptor
// ============================================================================

/// Immutable device description
/// Gantree: DeviceDescriptor // 장치 기술자
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    name: String,
    num_qubits: usize,
    area: [f64; 2],
    entangler: EntanglerType,
    pairs: PairMap,
    positions: BTreeMap<QubitId, (f64, f64)>,
    active: BTreeSet<QubitId>,
    example: Vec<Option<f64>>,
    runs: RunTable,
}

impl DeviceDescriptor {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a device with every qubit active
    /// Gantree: new(name, n, pairs) -> QawResult<Self> // 검증 생성
    pub fn new(name: impl Into<String>, num_qubits: usize, pairs: PairMap) -> QawResult<Self> {
        let name = name.into();
        for (pair_name, pair) in &pairs {
            check_pair(pair_name, pair, num_qubits)?;
        }

        Ok(Self {
            name,
            num_qubits,
            area: [num_qubits as f64, 1.0],
            entangler: EntanglerType::default(),
            pairs,
            positions: BTreeMap::new(),
            active: (0..num_qubits).collect(),
            example: vec![Some(DEFAULT_EXAMPLE); num_qubits],
            runs: RunTable::simulated_only(),
        })
    }

    /// Create from an ordered list of named pairs, rejecting repeated names
    pub fn from_pair_list<S: Into<String>>(
        name: impl Into<String>,
        num_qubits: usize,
        pairs: Vec<(S, (QubitId, QubitId))>,
    ) -> QawResult<Self> {
        let mut map = PairMap::new();
        for (pair_name, (a, b)) in pairs {
            let pair_name = pair_name.into();
            if map.contains_key(&pair_name) {
                return Err(QawError::DuplicatePair(pair_name));
            }
            map.insert(pair_name, Pair::new(a, b));
        }
        Self::new(name, num_qubits, map)
    }

    // ========================================================================
    // Builders
    // ========================================================================

    /// Set the display area
    pub fn with_area(mut self, width: f64, height: f64) -> Self {
        self.area = [width, height];
        self
    }

    /// Set the entangling-gate family
    pub fn with_entangler(mut self, entangler: EntanglerType) -> Self {
        self.entangler = entangler;
        self
    }

    /// Set display positions; the positioned qubits become the active set
    pub fn with_positions(mut self, positions: BTreeMap<QubitId, (f64, f64)>) -> QawResult<Self> {
        for &q in positions.keys() {
            self.check_qubit(q)?;
        }
        self.active = positions.keys().copied().collect();
        self.positions = positions;
        Ok(self)
    }

    /// Set the example puzzle shown in tutorials
    pub fn with_example(mut self, example: Vec<Option<f64>>) -> QawResult<Self> {
        if example.len() != self.num_qubits {
            return Err(QawError::InvalidConfig(format!(
                "example has {} entries for {} qubits",
                example.len(),
                self.num_qubits
            )));
        }
        self.example = example;
        Ok(self)
    }

    /// Set the run table
    pub fn with_runs(mut self, runs: RunTable) -> Self {
        self.runs = runs;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Device name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of qubit slots (including inactive ones)
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Display area [width, height]
    pub fn area(&self) -> [f64; 2] {
        self.area
    }

    /// Entangling-gate family
    pub fn entangler(&self) -> EntanglerType {
        self.entangler
    }

    /// All named pairs, helper pairs included
    pub fn pairs(&self) -> &PairMap {
        &self.pairs
    }

    /// Look up a pair by name
    pub fn pair(&self, name: &str) -> QawResult<Pair> {
        self.pairs
            .get(name)
            .copied()
            .ok_or_else(|| QawError::UnknownPair(name.to_string()))
    }

    /// Pairs that correspond to physical gates
    pub fn real_pairs(&self) -> impl Iterator<Item = (&String, &Pair)> {
        self.pairs.iter().filter(|(name, _)| !is_helper_pair(name))
    }

    /// Names of the physical pairs touching a qubit
    pub fn pairs_containing(&self, qubit: QubitId) -> Vec<&str> {
        self.real_pairs()
            .filter(|(_, pair)| pair.contains(qubit))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Display positions
    pub fn positions(&self) -> &BTreeMap<QubitId, (f64, f64)> {
        &self.positions
    }

    /// Check whether a qubit takes part in the game
    pub fn is_active(&self, qubit: QubitId) -> bool {
        self.active.contains(&qubit)
    }

    /// Active qubits in ascending order
    pub fn active_qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.active.iter().copied()
    }

    /// Number of active qubits
    pub fn num_active(&self) -> usize {
        self.active.len()
    }

    /// Example puzzle (`None` for inactive qubits)
    pub fn example(&self) -> &[Option<f64>] {
        &self.example
    }

    /// Run table
    pub fn runs(&self) -> &RunTable {
        &self.runs
    }

    // ========================================================================
    // Validation / Serialization
    // ========================================================================

    /// Re-check the pair and position tables
    /// Gantree: validate() -> QawResult<()> // 검증
    pub fn validate(&self) -> QawResult<()> {
        if self.num_qubits == 0 {
            return Err(QawError::InvalidLayout(format!(
                "device '{}' has no qubits",
                self.name
            )));
        }
        for (name, pair) in &self.pairs {
            check_pair(name, pair, self.num_qubits)?;
        }
        for &q in self.positions.keys().chain(self.active.iter()) {
            self.check_qubit(q)?;
        }
        if self.example.len() != self.num_qubits {
            return Err(QawError::InvalidConfig(format!(
                "example has {} entries for {} qubits",
                self.example.len(),
                self.num_qubits
            )));
        }
        Ok(())
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> QawResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON and validate
    pub fn from_json(json: &str) -> QawResult<Self> {
        let device: Self = serde_json::from_str(json)?;
        device.validate()?;
        Ok(device)
    }

    fn check_qubit(&self, qubit: QubitId) -> QawResult<()> {
        if qubit >= self.num_qubits {
            return Err(QawError::QubitOutOfRange {
                qubit,
                num_qubits: self.num_qubits,
            });
        }
        Ok(())
    }
}

fn check_pair(name: &str, pair: &Pair, num_qubits: usize) -> QawResult<()> {
    let invalid = |reason: &str| QawError::InvalidPair {
        name: name.to_string(),
        a: pair.control,
        b: pair.target,
        reason: reason.to_string(),
    };
    if pair.control == pair.target {
        return Err(invalid("qubits must be distinct"));
    }
    if pair.control >= num_qubits || pair.target >= num_qubits {
        return Err(invalid(&format!("device has {} qubits", num_qubits)));
    }
    Ok(())
}

impl fmt::Display for DeviceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} qubits, {} active, {} pairs, {})",
            self.name,
            self.num_qubits,
            self.active.len(),
            self.pairs.len(),
            self.entangler
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle4() -> DeviceDescriptor {
        DeviceDescriptor::from_pair_list(
            "cycle4",
            4,
            vec![("A", (0, 1)), ("B", (1, 2)), ("C", (2, 3)), ("D", (3, 0))],
        )
        .unwrap()
    }

    #[test]
    fn test_entangler_parse() {
        assert_eq!("CX".parse::<EntanglerType>().unwrap(), EntanglerType::Cx);
        assert_eq!("cz".parse::<EntanglerType>().unwrap(), EntanglerType::Cz);
        assert_eq!(
            "none".parse::<EntanglerType>().unwrap(),
            EntanglerType::Independent
        );
        let err = "iSWAP".parse::<EntanglerType>().unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_invalid_pairs() {
        let same = DeviceDescriptor::from_pair_list("bad", 3, vec![("A", (1, 1))]);
        assert!(matches!(same, Err(QawError::InvalidPair { .. })));

        let range = DeviceDescriptor::from_pair_list("bad", 3, vec![("A", (1, 3))]);
        assert!(matches!(range, Err(QawError::InvalidPair { .. })));

        let dup = DeviceDescriptor::from_pair_list("bad", 3, vec![("A", (0, 1)), ("A", (1, 2))]);
        assert_eq!(dup.unwrap_err(), QawError::DuplicatePair("A".into()));
    }

    #[test]
    fn test_pair_lookup() {
        let device = cycle4();
        assert_eq!(device.pair("B").unwrap(), Pair::new(1, 2));
        assert_eq!(
            device.pair("Z").unwrap_err(),
            QawError::UnknownPair("Z".into())
        );
        let mut touching = device.pairs_containing(0);
        touching.sort();
        assert_eq!(touching, vec!["A", "D"]);
    }

    #[test]
    fn test_positions_define_active() {
        let mut positions = BTreeMap::new();
        positions.insert(0, (0.0, 0.0));
        positions.insert(2, (1.0, 0.0));
        let device = cycle4().with_positions(positions).unwrap();
        assert!(device.is_active(0));
        assert!(!device.is_active(1));
        assert_eq!(device.num_active(), 2);

        let mut outside = BTreeMap::new();
        outside.insert(9, (0.0, 0.0));
        assert!(cycle4().with_positions(outside).is_err());
    }

    #[test]
    fn test_run_table() {
        let runs = RunTable::simulated_only();
        assert!(runs.get(RunMode::Simulated).is_some());
        assert!(runs.get(RunMode::Real).is_none());
        let sim = runs.get(RunMode::Simulated).unwrap();
        assert_eq!(sim.shots, vec![100]);
        assert_eq!(sim.max_score, 20);
    }

    #[test]
    fn test_json_roundtrip() {
        let device = cycle4().with_entangler(EntanglerType::Cx);
        let json = device.to_json().unwrap();
        let back = DeviceDescriptor::from_json(&json).unwrap();
        assert_eq!(device, back);
    }
}
