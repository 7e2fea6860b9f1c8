//! Native gates and lowering
//!
//! Gantree: L3_Circuit → Gate
//!
//! Lowers abstract operations onto the gate family a device offers.
//! An XX rotation is built by conjugating an X rotation on the control
//! with the native entangler:
//!
//! - CX: `CNOT · Rx(c) · CNOT`
//! - CZ: `H(t) · CZ · Rx(c) · CZ · H(t)`
//! - none: `Rx(c) · Rx(t)` (no correlation, same marginals)

use crate::operation::Operation;
use qaw_core::{Axis, EntanglerType, QubitId};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Native gate
/// Gantree: Gate // 게이트 enum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    /// Hadamard gate
    /// Gantree: H(QubitId) // 하다마드
    H(QubitId),

    /// Rotation around X-axis (radians)
    /// Gantree: Rx(QubitId, f64) // X 회전
    Rx(QubitId, f64),

    /// Rotation around Y-axis (radians)
    /// Gantree: Ry(QubitId, f64) // Y 회전
    Ry(QubitId, f64),

    /// Controlled-NOT (control, target)
    Cnot(QubitId, QubitId),

    /// Controlled-Z
    Cz(QubitId, QubitId),
}

impl Gate {
    /// Qubits this gate acts on
    pub fn qubits(&self) -> Vec<QubitId> {
        match *self {
            Gate::H(q) | Gate::Rx(q, _) | Gate::Ry(q, _) => vec![q],
            Gate::Cnot(c, t) | Gate::Cz(c, t) => vec![c, t],
        }
    }

    /// Check if two-qubit gate
    pub fn is_two_qubit(&self) -> bool {
        matches!(self, Gate::Cnot(..) | Gate::Cz(..))
    }

    /// Convert to OpenQASM 2.0 string
    /// Gantree: to_qasm() -> String // QASM 출력
    pub fn to_qasm(&self) -> String {
        match self {
            Gate::H(q) => format!("h q[{}];", q),
            Gate::Rx(q, theta) => format!("rx({}) q[{}];", theta, q),
            Gate::Ry(q, theta) => format!("ry({}) q[{}];", theta, q),
            Gate::Cnot(c, t) => format!("cx q[{}],q[{}];", c, t),
            Gate::Cz(c, t) => format!("cz q[{}],q[{}];", c, t),
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_qasm())
    }
}

// ============================================================================
// Lowering
// ============================================================================

/// Lower one operation
/// Gantree: lower(op, entangler) -> Vec<Gate> // 네이티브 변환
pub fn lower(op: &Operation, entangler: EntanglerType) -> Vec<Gate> {
    match *op {
        Operation::Rotate { qubit, axis, frac } => match axis {
            Axis::X => vec![Gate::Rx(qubit, frac * PI)],
            Axis::Y => vec![Gate::Ry(qubit, frac * PI)],
        },
        Operation::Entangle {
            control,
            target,
            frac,
        } => {
            let theta = frac * PI;
            match entangler {
                EntanglerType::Cx => vec![
                    Gate::Cnot(control, target),
                    Gate::Rx(control, theta),
                    Gate::Cnot(control, target),
                ],
                EntanglerType::Cz => vec![
                    Gate::H(target),
                    Gate::Cz(control, target),
                    Gate::Rx(control, theta),
                    Gate::Cz(control, target),
                    Gate::H(target),
                ],
                EntanglerType::Independent => {
                    vec![Gate::Rx(control, theta), Gate::Rx(target, theta)]
                }
            }
        }
    }
}

/// Lower a whole operation list
pub fn lower_all(ops: &[Operation], entangler: EntanglerType) -> Vec<Gate> {
    ops.iter().flat_map(|op| lower(op, entangler)).collect()
}

/// Render a lowered circuit as OpenQASM 2.0 with measurement of every qubit
pub fn to_qasm(num_qubits: usize, gates: &[Gate]) -> String {
    let mut lines = Vec::new();

    // Header
    lines.push("OPENQASM 2.0;".to_string());
    lines.push("include \"qelib1.inc\";".to_string());
    lines.push(String::new());

    lines.push(format!("qreg q[{}];", num_qubits));
    lines.push(format!("creg c[{}];", num_qubits));
    lines.push(String::new());

    for gate in gates {
        lines.push(gate.to_qasm());
    }
    for q in 0..num_qubits {
        lines.push(format!("measure q[{}] -> c[{}];", q, q));
    }

    lines.join("\n")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn xx(frac: f64) -> Operation {
        Operation::Entangle {
            control: 0,
            target: 1,
            frac,
        }
    }

    #[test]
    fn test_lower_rotation() {
        let op = Operation::Rotate {
            qubit: 3,
            axis: Axis::Y,
            frac: 0.5,
        };
        let gates = lower(&op, EntanglerType::Cx);
        assert_eq!(gates.len(), 1);
        match gates[0] {
            Gate::Ry(q, theta) => {
                assert_eq!(q, 3);
                assert_abs_diff_eq!(theta, PI / 2.0, epsilon = 1e-12);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_lower_cx() {
        let gates = lower(&xx(0.25), EntanglerType::Cx);
        assert_eq!(gates.len(), 3);
        assert_eq!(gates[0], Gate::Cnot(0, 1));
        assert_eq!(gates[2], Gate::Cnot(0, 1));
        assert!(matches!(gates[1], Gate::Rx(0, _)));
    }

    #[test]
    fn test_lower_cz() {
        let gates = lower(&xx(0.25), EntanglerType::Cz);
        assert_eq!(gates.len(), 5);
        assert_eq!(gates[0], Gate::H(1));
        assert_eq!(gates[1], Gate::Cz(0, 1));
        assert_eq!(gates[4], Gate::H(1));
        assert_eq!(gates.iter().filter(|g| g.is_two_qubit()).count(), 2);
    }

    #[test]
    fn test_lower_independent() {
        let gates = lower(&xx(0.25), EntanglerType::Independent);
        assert_eq!(gates.len(), 2);
        assert!(gates.iter().all(|g| !g.is_two_qubit()));
    }

    #[test]
    fn test_qasm_output() {
        let gates = lower_all(&[xx(0.5)], EntanglerType::Cx);
        let qasm = to_qasm(2, &gates);
        assert!(qasm.starts_with("OPENQASM 2.0;"));
        assert!(qasm.contains("qreg q[2];"));
        assert!(qasm.contains("cx q[0],q[1];"));
        assert!(qasm.contains("measure q[1] -> c[1];"));
    }
}
