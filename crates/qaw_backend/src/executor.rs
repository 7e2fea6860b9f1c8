//! Executor abstraction
//!
//! Gantree: L6_Backend → Executor
//!
//! The one seam between the game and whatever runs circuits. Each backend
//! family implements `execute`; callers never branch on backend identity.

use crate::context::BackendContext;
use qaw_circuit::Operation;
use qaw_core::{DeviceDescriptor, QawResult};
use qaw_stats::RawResult;

/// Circuit executor
/// Gantree: Executor // trait
pub trait Executor {
    /// Execution context
    fn context(&self) -> &BackendContext;

    /// Backend name
    fn name(&self) -> &str {
        &self.context().name
    }

    /// Check if results come from a simulation
    fn is_simulator(&self) -> bool {
        self.context().is_simulated()
    }

    /// Run an accumulated circuit
    /// Gantree: execute(ops, device, shots) -> QawResult<RawResult> // 실행
    ///
    /// May block for a long time on real hardware.
    fn execute(
        &self,
        ops: &[Operation],
        device: &DeviceDescriptor,
        shots: u64,
    ) -> QawResult<RawResult>;
}

impl<E: Executor + ?Sized> Executor for Box<E> {
    fn context(&self) -> &BackendContext {
        (**self).context()
    }

    fn execute(
        &self,
        ops: &[Operation],
        device: &DeviceDescriptor,
        shots: u64,
    ) -> QawResult<RawResult> {
        (**self).execute(ops, device, shots)
    }
}

impl<E: Executor + ?Sized> Executor for &E {
    fn context(&self) -> &BackendContext {
        (**self).context()
    }

    fn execute(
        &self,
        ops: &[Operation],
        device: &DeviceDescriptor,
        shots: u64,
    ) -> QawResult<RawResult> {
        (**self).execute(ops, device, shots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qaw_core::{get_device, RunMode};
    use std::collections::BTreeMap;

    struct Fixed(BackendContext);

    impl Executor for Fixed {
        fn context(&self) -> &BackendContext {
            &self.0
        }

        fn execute(&self, _: &[Operation], device: &DeviceDescriptor, shots: u64) -> QawResult<RawResult> {
            let mut counts = BTreeMap::new();
            counts.insert("0".repeat(device.num_qubits()), shots);
            Ok(RawResult::Counts(counts))
        }
    }

    #[test]
    fn test_default_methods() {
        let exec = Fixed(BackendContext::new("fixed", RunMode::Real));
        assert_eq!(exec.name(), "fixed");
        assert!(!exec.is_simulator());
    }

    #[test]
    fn test_boxed_executor() {
        let device = get_device("line3").unwrap();
        let exec: Box<dyn Executor> = Box::new(Fixed(BackendContext::simulator()));
        let raw = exec.execute(&[], &device, 10).unwrap();
        assert_eq!(raw.num_outcomes(), 1);
        assert!(exec.is_simulator());
    }
}
