//! Layout patterns and device catalog
//!
//! Gantree: L1_Device → Layout
//!
//! Pattern devices (`line9`, `ladder8`, `square16`, `web6`) are generated
//! on demand; hardware presets are written out by hand. Pattern devices
//! are for simulation only.

use crate::device::{DeviceDescriptor, EntanglerType, RunSpec, RunTable};
use crate::error::{QawError, QawResult};
use crate::types::{MoveMode, QubitId};
use std::collections::BTreeMap;
use std::f64::consts::PI;

// ============================================================================
// Pair Labels
// ============================================================================

/// Label for the `index`-th generated pair: A..Z, AA, AB, ...
/// Gantree: pair_label(i) -> String // 이름 생성
pub fn pair_label(index: usize) -> String {
    let mut n = index + 1;
    let mut label = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        label.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}

// ============================================================================
// Patterns
// ============================================================================

/// Connectivity pattern of a generated device
/// Gantree: Pattern // line/ladder/square/web
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Open chain; needs an odd qubit count
    Line,
    /// 2 × N/2 open lattice; needs an even qubit count
    Ladder,
    /// √N × √N open lattice; needs a perfect square
    Square,
    /// All-to-all
    Web,
}

impl Pattern {
    /// Split a pattern name such as `ladder8` into pattern and qubit count
    pub fn parse(name: &str) -> Option<(Pattern, usize)> {
        let (pattern, rest) = if let Some(rest) = name.strip_prefix("line") {
            (Pattern::Line, rest)
        } else if let Some(rest) = name.strip_prefix("ladder") {
            (Pattern::Ladder, rest)
        } else if let Some(rest) = name.strip_prefix("square") {
            (Pattern::Square, rest)
        } else if let Some(rest) = name.strip_prefix("web") {
            (Pattern::Web, rest)
        } else {
            return None;
        };
        rest.parse().ok().map(|n| (pattern, n))
    }
}

/// Build a pattern device from its name
/// Gantree: make_layout(name) -> QawResult<DeviceDescriptor> // 패턴 장치
pub fn make_layout(name: &str) -> QawResult<DeviceDescriptor> {
    let (pattern, num) =
        Pattern::parse(name).ok_or_else(|| QawError::UnknownDevice(name.to_string()))?;
    if num < 2 {
        return Err(QawError::InvalidLayout(format!(
            "{} needs at least 2 qubits",
            name
        )));
    }

    let mut edges: Vec<(QubitId, QubitId)> = Vec::new();
    let mut positions = BTreeMap::new();
    let area;

    match pattern {
        Pattern::Line => {
            if num % 2 == 0 {
                return Err(QawError::InvalidLayout(format!(
                    "line needs an odd qubit count, got {}",
                    num
                )));
            }
            for q in 0..num - 1 {
                edges.push((q, q + 1));
            }
            for q in 0..num {
                positions.insert(q, (q as f64, 0.0));
            }
            area = [num as f64, 1.0];
        }
        Pattern::Ladder | Pattern::Square => {
            let (lx, ly) = if pattern == Pattern::Ladder {
                if num % 2 != 0 {
                    return Err(QawError::InvalidLayout(format!(
                        "ladder needs an even qubit count, got {}",
                        num
                    )));
                }
                (num / 2, 2)
            } else {
                let side = (num as f64).sqrt().round() as usize;
                if side * side != num {
                    return Err(QawError::InvalidLayout(format!(
                        "square needs a perfect square qubit count, got {}",
                        num
                    )));
                }
                (side, side)
            };
            for y in 0..ly {
                for x in 0..lx {
                    let q = y * lx + x;
                    if x + 1 < lx {
                        edges.push((q, q + 1));
                    }
                    if y + 1 < ly {
                        edges.push((q, q + lx));
                    }
                    positions.insert(q, (x as f64, y as f64));
                }
            }
            area = [lx as f64, ly as f64];
        }
        Pattern::Web => {
            let radius = (num as f64).sqrt().floor();
            for q0 in 0..num - 1 {
                for q1 in q0 + 1..num {
                    edges.push((q0, q1));
                }
            }
            for q in 0..num {
                let angle = q as f64 * 2.0 * PI / num as f64;
                positions.insert(q, (radius * angle.cos(), radius * angle.sin()));
            }
            area = [radius, radius];
        }
    }

    let pairs: Vec<(String, (QubitId, QubitId))> = edges
        .into_iter()
        .enumerate()
        .map(|(i, edge)| (pair_label(i), edge))
        .collect();

    DeviceDescriptor::from_pair_list(name, num, pairs)?
        .with_area(area[0], area[1])
        .with_entangler(EntanglerType::Cz)
        .with_runs(RunTable::simulated_only())
        .with_positions(positions)
}

// ============================================================================
// Catalog
// ============================================================================

/// Names of the hardware presets
/// Gantree: supported_devices() -> Vec<&str> // 지원 장치
pub fn supported_devices() -> Vec<&'static str> {
    vec!["ibmqx4", "ibmqx5", "8Q-Agave", "19Q-Acorn", "8Q-Wallraff"]
}

/// Resolve a device by name: presets first, then patterns
/// Gantree: get_device(name) -> QawResult<DeviceDescriptor> // 장치 조회
pub fn get_device(name: &str) -> QawResult<DeviceDescriptor> {
    match name {
        "ibmqx4" => ibmqx4(),
        "ibmqx5" => ibmqx5(),
        "8Q-Agave" => agave(),
        "19Q-Acorn" => acorn(),
        "8Q-Wallraff" => wallraff(),
        _ => make_layout(name),
    }
}

fn positions_of(entries: &[(QubitId, f64, f64)]) -> BTreeMap<QubitId, (f64, f64)> {
    entries.iter().map(|&(q, x, y)| (q, (x, y))).collect()
}

fn some_all(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().copied().map(Some).collect()
}

fn ibmqx4() -> QawResult<DeviceDescriptor> {
    DeviceDescriptor::from_pair_list(
        "ibmqx4",
        5,
        vec![
            ("A", (1, 0)),
            ("B", (2, 0)),
            ("C", (2, 1)),
            ("D", (4, 2)),
            ("E", (3, 2)),
            ("F", (3, 4)),
        ],
    )?
    .with_area(3.0, 3.0)
    .with_entangler(EntanglerType::Cx)
    .with_runs(RunTable::with_real(RunSpec::new(
        vec![8192],
        vec![MoveMode::Correct],
        10,
        100,
    )))
    .with_positions(positions_of(&[
        (0, 1.0, 1.0),
        (1, 1.0, 0.0),
        (2, 0.5, 0.5),
        (3, 0.0, 0.0),
        (4, 0.0, 1.0),
    ]))?
    .with_example(some_all(&[0.11, 0.09, 0.49, 0.47, 0.31]))
}

fn ibmqx5() -> QawResult<DeviceDescriptor> {
    DeviceDescriptor::from_pair_list(
        "ibmqx5",
        16,
        vec![
            ("A", (1, 2)),
            ("B", (2, 3)),
            ("C", (3, 4)),
            ("D", (5, 4)),
            ("E", (6, 5)),
            ("F", (6, 7)),
            ("G", (8, 7)),
            ("H", (1, 0)),
            ("I", (15, 2)),
            ("J", (3, 14)),
            ("K", (13, 4)),
            ("L", (12, 5)),
            ("M", (6, 11)),
            ("N", (7, 10)),
            ("O", (9, 8)),
            ("P", (15, 0)),
            ("Q", (15, 14)),
            ("R", (13, 14)),
            ("S", (12, 13)),
            ("T", (12, 11)),
            ("U", (11, 10)),
            ("V", (9, 10)),
        ],
    )?
    .with_area(6.5, 2.15)
    .with_entangler(EntanglerType::Cx)
    .with_runs(RunTable::with_real(RunSpec::new(
        vec![8192],
        vec![MoveMode::Correct],
        10,
        53,
    )))
    .with_positions(positions_of(&[
        (0, 0.0, 0.0),
        (1, 0.0, 1.0),
        (2, 1.0, 1.0),
        (3, 2.0, 1.0),
        (4, 3.0, 1.0),
        (5, 4.0, 1.0),
        (6, 5.0, 1.0),
        (7, 6.0, 1.0),
        (8, 7.0, 1.0),
        (9, 7.0, 0.0),
        (10, 6.0, 0.0),
        (11, 5.0, 0.0),
        (12, 4.0, 0.0),
        (13, 3.0, 0.0),
        (14, 2.0, 0.0),
        (15, 1.0, 0.0),
    ]))?
    .with_example(some_all(&[
        0.055, 0.045, 0.25, 0.26, 0.15, 0.45, 0.8, 0.9, 0.24, 0.22, 0.33, 0.31, 0.46, 0.15, 0.42,
        0.41,
    ]))
}

fn agave() -> QawResult<DeviceDescriptor> {
    DeviceDescriptor::from_pair_list(
        "8Q-Agave",
        8,
        vec![
            ("A", (0, 1)),
            ("B", (1, 2)),
            ("C", (2, 3)),
            ("D", (3, 4)),
            ("E", (4, 5)),
            ("F", (5, 6)),
            ("G", (6, 7)),
            ("H", (7, 0)),
        ],
    )?
    .with_area(3.0, 3.0)
    .with_entangler(EntanglerType::Cz)
    .with_runs(RunTable::with_real(RunSpec::new(
        vec![10_000],
        vec![MoveMode::Correct],
        10,
        1000,
    )))
    .with_positions(positions_of(&[
        (0, 1.0, 2.0),
        (1, 0.0, 2.0),
        (2, 0.0, 1.0),
        (3, 0.0, 0.0),
        (4, 1.0, 0.0),
        (5, 2.0, 0.0),
        (6, 2.0, 1.0),
        (7, 2.0, 2.0),
    ]))?
    .with_example(some_all(&[
        0.44, 0.45, 0.06, 0.075, 0.175, 0.165, 0.235, 0.225,
    ]))
}

fn acorn() -> QawResult<DeviceDescriptor> {
    DeviceDescriptor::from_pair_list(
        "19Q-Acorn",
        20,
        vec![
            ("A", (0, 5)),
            ("B", (0, 6)),
            ("C", (1, 6)),
            ("D", (1, 7)),
            ("E", (2, 7)),
            ("F", (2, 8)),
            ("G", (4, 9)),
            ("H", (5, 10)),
            ("I", (6, 11)),
            ("J", (7, 12)),
            ("K", (8, 13)),
            ("L", (9, 14)),
            ("M", (10, 15)),
            ("N", (10, 16)),
            ("O", (11, 16)),
            ("P", (11, 17)),
            ("Q", (12, 17)),
            ("R", (12, 18)),
            ("S", (13, 18)),
            ("T", (13, 19)),
            ("U", (14, 19)),
        ],
    )?
    .with_area(10.0, 4.0)
    .with_entangler(EntanglerType::Cz)
    .with_runs(RunTable::with_real(RunSpec::new(
        vec![10_000],
        vec![MoveMode::Correct],
        10,
        1000,
    )))
    // Qubit 3 is isolated on the chip and left out
    .with_positions(positions_of(&[
        (0, 1.0, 3.0),
        (1, 3.0, 3.0),
        (2, 5.0, 3.0),
        (4, 9.0, 3.0),
        (5, 0.0, 2.0),
        (6, 2.0, 2.0),
        (7, 4.0, 2.0),
        (8, 6.0, 2.0),
        (9, 8.0, 2.0),
        (10, 1.0, 1.0),
        (11, 3.0, 1.0),
        (12, 5.0, 1.0),
        (13, 7.0, 1.0),
        (14, 9.0, 1.0),
        (15, 0.0, 0.0),
        (16, 2.0, 0.0),
        (17, 4.0, 0.0),
        (18, 6.0, 0.0),
        (19, 8.0, 0.0),
    ]))?
    .with_example(vec![
        Some(0.16),
        Some(0.24),
        Some(0.29),
        None,
        Some(0.075),
        Some(0.26),
        Some(0.165),
        Some(0.235),
        Some(0.295),
        Some(0.085),
        Some(0.255),
        Some(0.38),
        Some(0.445),
        Some(0.115),
        Some(0.325),
        Some(0.01),
        Some(0.39),
        Some(0.455),
        Some(0.125),
        Some(0.32),
    ])
}

fn wallraff() -> QawResult<DeviceDescriptor> {
    // Qubits are numbered from 1; slot 0 is a helper vertex joined to every
    // qubit so that matchings may leave two non-neighbours unpaired.
    let mut pairs: Vec<(String, (QubitId, QubitId))> = (1..8)
        .map(|q| (pair_label(q - 1), (q, q + 1)))
        .collect();
    pairs.extend((1..=8).map(|q| (format!("fake{}", q), (0, q))));

    DeviceDescriptor::from_pair_list("8Q-Wallraff", 9, pairs)?
        .with_area(4.0, 2.0)
        .with_entangler(EntanglerType::Cz)
        .with_runs(RunTable::with_real(RunSpec::new(
            vec![8192],
            vec![MoveMode::Correct],
            10,
            100,
        )))
        .with_positions(positions_of(&[
            (1, 0.0, 1.0),
            (2, 1.0, 1.0),
            (3, 2.0, 1.0),
            (4, 3.0, 1.0),
            (8, 0.0, 0.0),
            (7, 1.0, 0.0),
            (6, 2.0, 0.0),
            (5, 3.0, 0.0),
        ]))?
        .with_example(vec![
            None,
            Some(0.24),
            Some(0.25),
            Some(0.06),
            Some(0.075),
            Some(0.175),
            Some(0.165),
            Some(0.235),
            Some(0.225),
        ])
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{is_helper_pair, Pair, RunMode};

    #[test]
    fn test_pair_labels() {
        assert_eq!(pair_label(0), "A");
        assert_eq!(pair_label(25), "Z");
        assert_eq!(pair_label(26), "AA");
        assert_eq!(pair_label(27), "AB");
        assert_eq!(pair_label(52), "BA");
    }

    #[test]
    fn test_line_layout() {
        let device = make_layout("line5").unwrap();
        assert_eq!(device.num_qubits(), 5);
        assert_eq!(device.pairs().len(), 4);
        assert_eq!(device.pair("A").unwrap(), Pair::new(0, 1));
        assert_eq!(device.pair("D").unwrap(), Pair::new(3, 4));
        assert_eq!(device.area(), [5.0, 1.0]);

        assert!(matches!(
            make_layout("line4"),
            Err(QawError::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_ladder_layout() {
        let device = make_layout("ladder6").unwrap();
        // 2 rows of 3: 2 horizontal per row + 3 rungs
        assert_eq!(device.pairs().len(), 7);
        assert_eq!(device.pair("A").unwrap(), Pair::new(0, 1));
        assert_eq!(device.pair("B").unwrap(), Pair::new(0, 3));
        assert_eq!(device.area(), [3.0, 2.0]);
        assert!(make_layout("ladder5").is_err());
    }

    #[test]
    fn test_square_layout() {
        let device = make_layout("square9").unwrap();
        assert_eq!(device.pairs().len(), 12);
        assert!(make_layout("square8").is_err());
    }

    #[test]
    fn test_web_layout() {
        let device = make_layout("web5").unwrap();
        assert_eq!(device.pairs().len(), 10);
        assert_eq!(device.positions().len(), 5);
        let (x, y) = device.positions()[&0];
        assert!((x - 2.0).abs() < 1e-12);
        assert!(y.abs() < 1e-12);
    }

    #[test]
    fn test_unknown_device() {
        assert!(matches!(
            get_device("hexagon7"),
            Err(QawError::UnknownDevice(_))
        ));
        assert!(matches!(get_device("line"), Err(QawError::UnknownDevice(_))));
    }

    #[test]
    fn test_catalog_valid() {
        for name in supported_devices() {
            let device = get_device(name).unwrap();
            assert!(device.validate().is_ok(), "{} invalid", name);
            assert_eq!(device.name(), name);
            assert!(device.runs().get(RunMode::Simulated).is_some());
            assert!(device.runs().get(RunMode::Real).is_some());
        }
    }

    #[test]
    fn test_acorn_inactive_qubit() {
        let device = get_device("19Q-Acorn").unwrap();
        assert_eq!(device.num_qubits(), 20);
        assert_eq!(device.num_active(), 19);
        assert!(!device.is_active(3));
        assert_eq!(device.example()[3], None);
    }

    #[test]
    fn test_wallraff_helpers() {
        let device = get_device("8Q-Wallraff").unwrap();
        assert!(!device.is_active(0));
        let helpers = device
            .pairs()
            .keys()
            .filter(|name| is_helper_pair(name))
            .count();
        assert_eq!(helpers, 8);
        assert_eq!(device.real_pairs().count(), 7);
        assert!(device.pairs_containing(0).is_empty());
    }

    #[test]
    fn test_pattern_runs_simulated_only() {
        let device = get_device("square4").unwrap();
        assert!(device.runs().get(RunMode::Real).is_none());
        assert_eq!(device.entangler(), EntanglerType::Cz);
    }
}
