//! # Quantum Awesomeness Circuit
//!
//! Accumulates the puzzle history of a game into an ordered list of
//! abstract operations and lowers it onto a device's native gates.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qaw_circuit // L3: Circuit (완료)
//!     Operation // 추상 연산 (완료)
//!     Gate // 네이티브 게이트/변환 (완료)
//!     History // 게이트/켤레 기록 (완료)
//!     Accumulator // 누적 회로 빌더 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qaw_circuit::prelude::*;
//! use qaw_core::get_device;
//!
//! let device = get_device("line3").unwrap();
//! let mut round = GateSet::new();
//! round.insert("A".to_string(), 0.3);
//!
//! let ops = build_circuit(&[round], &[], &device).unwrap();
//! let gates = lower_all(&ops, device.entangler());
//! println!("{}", to_qasm(device.num_qubits(), &gates));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Abstract operations (Gantree: L3_Circuit → Operation)
pub mod operation;

/// Native gates (Gantree: L3_Circuit → Gate)
pub mod gate;

/// History types (Gantree: L3_Circuit → History)
pub mod history;

/// Circuit accumulator (Gantree: L3_Circuit → Accumulator)
pub mod accumulator;

pub use accumulator::{build_circuit, merge_round};
pub use gate::{lower, lower_all, to_qasm, Gate};
pub use history::{completed_rounds, random_layer, rounds_in, Conjugate, ConjugateLayer, GateSet};
pub use operation::Operation;

pub mod prelude {
    //! Convenient imports
    pub use crate::accumulator::{build_circuit, merge_round};
    pub use crate::gate::{lower, lower_all, to_qasm, Gate};
    pub use crate::history::{random_layer, Conjugate, ConjugateLayer, GateSet};
    pub use crate::operation::Operation;
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use qaw_core::{get_device, EntanglerType};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_circuit_depth_bounded_by_merge() {
        // Every round touches at most one XX per pair, however long the game
        let device = get_device("ladder4").unwrap();
        let mut rng = StdRng::seed_from_u64(8);
        let mut gates = Vec::new();
        let mut conjugates = Vec::new();
        for _ in 0..5 {
            let mut create = GateSet::new();
            create.insert("A".to_string(), 0.2);
            let mut remove = GateSet::new();
            remove.insert("A".to_string(), -0.18);
            gates.push(create);
            gates.push(remove);
            conjugates.push(random_layer(device.num_qubits(), &mut rng));
        }
        let ops = build_circuit(&gates, &conjugates, &device).unwrap();
        let xx = ops.iter().filter(|op| op.is_entangling()).count();
        assert_eq!(xx, 5);
        assert_eq!(ops.len(), 5 * (1 + 2 * device.num_qubits()));
    }

    #[test]
    fn test_lowering_per_device_family() {
        let mut round = GateSet::new();
        round.insert("A".to_string(), 0.5);
        for (name, expected) in [("ibmqx4", EntanglerType::Cx), ("line3", EntanglerType::Cz)] {
            let device = get_device(name).unwrap();
            assert_eq!(device.entangler(), expected);
            let ops = build_circuit(&[round.clone()], &[], &device).unwrap();
            let gates = lower_all(&ops, device.entangler());
            let two_qubit = gates.iter().filter(|g| g.is_two_qubit()).count();
            assert_eq!(two_qubit, 2);
        }
    }
}
