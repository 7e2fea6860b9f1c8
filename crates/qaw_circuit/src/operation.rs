//! Abstract puzzle operations
//!
//! Gantree: L3_Circuit → Operation
//!
//! The puzzle circuit only ever contains two kinds of operation: a
//! single-qubit X/Y rotation and a two-qubit XX-type rotation, both
//! parameterized by a fraction of π.

use qaw_core::{Axis, Frac, QubitId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Abstract operation handed to an executor
/// Gantree: Operation // Rotate/Entangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    /// exp(-i·frac·π/2·σ) on one qubit, σ ∈ {X, Y}
    Rotate {
        /// Target qubit
        qubit: QubitId,
        /// Rotation axis
        axis: Axis,
        /// Angle in units of π
        frac: Frac,
    },
    /// exp(-i·frac·π/2·X⊗X) on a pair
    Entangle {
        /// Control qubit (first qubit of the pair)
        control: QubitId,
        /// Target qubit
        target: QubitId,
        /// Angle in units of π
        frac: Frac,
    },
}

impl Operation {
    /// Qubits acted on
    pub fn qubits(&self) -> Vec<QubitId> {
        match *self {
            Operation::Rotate { qubit, .. } => vec![qubit],
            Operation::Entangle {
                control, target, ..
            } => vec![control, target],
        }
    }

    /// Rotation fraction
    pub fn frac(&self) -> Frac {
        match *self {
            Operation::Rotate { frac, .. } | Operation::Entangle { frac, .. } => frac,
        }
    }

    /// Check if this is a two-qubit operation
    pub fn is_entangling(&self) -> bool {
        matches!(self, Operation::Entangle { .. })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Rotate { qubit, axis, frac } => {
                write!(f, "R{}({:.4}π) q{}", axis, frac, qubit)
            }
            Operation::Entangle {
                control,
                target,
                frac,
            } => write!(f, "XX({:.4}π) q{},q{}", frac, control, target),
        }
    }
}
