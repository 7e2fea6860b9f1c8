//! # Quantum Awesomeness Backend
//!
//! Executes accumulated puzzle circuits. Backends sit behind the
//! [`Executor`] trait and carry their own [`BackendContext`]; the
//! built-in [`SimulatorExecutor`] computes exact outcome distributions,
//! and [`RetryingExecutor`] adds bounded retry-with-delay to any backend.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qaw_backend // L6: Backend (완료)
//!     BackendContext // 실행 컨텍스트 (완료)
//!     Executor // 실행 trait (완료)
//!     SimulatorExecutor // 상태 벡터 시뮬레이터 (완료)
//!         ReadoutBias // 판독 편향 모델 (완료)
//!     Retry // 재시도 정책/래퍼 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qaw_backend::prelude::*;
//! use qaw_circuit::{build_circuit, GateSet};
//! use qaw_core::get_device;
//!
//! let device = get_device("line3").unwrap();
//! let mut round = GateSet::new();
//! round.insert("A".to_string(), 0.5);
//! let ops = build_circuit(&[round], &[], &device).unwrap();
//!
//! let executor = RetryingExecutor::new(SimulatorExecutor::new(), RetryPolicy::none());
//! let raw = executor.execute(&ops, &device, 1000).unwrap();
//! assert!(raw.is_exact());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Execution context (Gantree: L6_Backend → BackendContext)
pub mod context;

/// Executor trait (Gantree: L6_Backend → Executor)
pub mod executor;

/// State-vector simulator (Gantree: L6_Backend → SimulatorExecutor)
pub mod simulator;

/// Retry policy (Gantree: L6_Backend → Retry)
pub mod retry;

pub use context::BackendContext;
pub use executor::Executor;
pub use retry::{RetryPolicy, RetryingExecutor};
pub use simulator::{ReadoutBias, SimulatorExecutor, MAX_SIMULATED_QUBITS};

pub mod prelude {
    //! Convenient imports
    pub use crate::context::BackendContext;
    pub use crate::executor::Executor;
    pub use crate::retry::{RetryPolicy, RetryingExecutor};
    pub use crate::simulator::{ReadoutBias, SimulatorExecutor};
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use approx::assert_abs_diff_eq;
    use qaw_circuit::{build_circuit, random_layer, GateSet};
    use qaw_core::{get_device, prob_from_frac};
    use qaw_stats::extract;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_perfect_removal_returns_to_ground() {
        // Removing exactly what was created undoes the puzzle under any conjugation
        let device = get_device("ladder4").unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let mut create = GateSet::new();
        create.insert("A".to_string(), 0.3);
        create.insert("D".to_string(), 0.45);
        let remove: GateSet = create.iter().map(|(k, f)| (k.clone(), -f)).collect();
        let layer = random_layer(device.num_qubits(), &mut rng);

        let ops = build_circuit(&[create, remove], &[layer], &device).unwrap();
        let raw = SimulatorExecutor::new().execute(&ops, &device, 1).unwrap();
        let snap = extract(&raw, &device, 1000, &mut rng).unwrap().into_snapshot().unwrap();
        for p in &snap.one_prob {
            assert_abs_diff_eq!(*p, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_biased_simulation_skews_statistics() {
        let device = get_device("line3").unwrap();
        let mut round = GateSet::new();
        round.insert("A".to_string(), 0.3);
        let ops = build_circuit(&[round], &[], &device).unwrap();

        let bias = ReadoutBias::uniform(3, 0.05, 0.0).unwrap();
        let executor = SimulatorExecutor::new().with_bias(bias).with_name("biased");
        let raw = executor.execute(&ops, &device, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let snap = extract(&raw, &device, 20_000, &mut rng).unwrap().into_snapshot().unwrap();

        let expected = prob_from_frac(0.3) * 1.0 + (1.0 - prob_from_frac(0.3)) * 0.05;
        assert_abs_diff_eq!(snap.one_prob[0], expected, epsilon = 0.02);
        assert_abs_diff_eq!(snap.one_prob[2], 0.05, epsilon = 0.01);
        assert_eq!(executor.name(), "biased");
    }
}
