//! State-vector simulator
//!
//! Gantree: L6_Backend → SimulatorExecutor
//!
//! Noiseless simulation of the lowered gate list. Returns the exact
//! outcome distribution; shot noise is added later by the statistics
//! extractor. An optional readout bias skews the distribution the way a
//! miscalibrated measurement chain would.

use crate::context::BackendContext;
use crate::executor::Executor;
use num_complex::Complex64;
use qaw_circuit::{lower_all, Gate, Operation};
use qaw_core::{DeviceDescriptor, QawError, QawResult, QubitId};
use qaw_stats::RawResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Largest register the simulator accepts
pub const MAX_SIMULATED_QUBITS: usize = 24;

/// Outcomes at or below this probability are dropped
pub const PROBABILITY_FLOOR: f64 = 1e-12;

// ============================================================================
// Readout Bias
// ============================================================================

/// Per-qubit asymmetric readout error
/// Gantree: ReadoutBias // 판독 편향
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadoutBias {
    /// `(p01, p10)` per qubit: P(read 1 | 0) and P(read 0 | 1)
    flips: Vec<(f64, f64)>,
}

impl ReadoutBias {
    /// Create from per-qubit flip probabilities
    pub fn new(flips: Vec<(f64, f64)>) -> QawResult<Self> {
        for &(p01, p10) in &flips {
            for p in [p01, p10] {
                if !(0.0..=1.0).contains(&p) {
                    return Err(QawError::InvalidProbability(p));
                }
            }
        }
        Ok(Self { flips })
    }

    /// Same flip probabilities on every qubit
    pub fn uniform(num_qubits: usize, p01: f64, p10: f64) -> QawResult<Self> {
        Self::new(vec![(p01, p10); num_qubits])
    }

    /// Flip probabilities of one qubit (none if not covered)
    pub fn flips(&self, qubit: QubitId) -> Option<(f64, f64)> {
        self.flips.get(qubit).copied()
    }

    /// Apply to an outcome distribution indexed by basis state
    /// Gantree: apply(probs, n) // 편향 적용
    pub fn apply(&self, probs: &mut [f64], num_qubits: usize) {
        for (q, &(p01, p10)) in self.flips.iter().enumerate().take(num_qubits) {
            let mask = 1usize << q;
            for i in 0..probs.len() {
                if i & mask == 0 {
                    let j = i | mask;
                    let (zero, one) = (probs[i], probs[j]);
                    probs[i] = zero * (1.0 - p01) + one * p10;
                    probs[j] = zero * p01 + one * (1.0 - p10);
                }
            }
        }
    }
}

// ============================================================================
// Simulator
// ============================================================================

/// Exact state-vector executor
/// Gantree: SimulatorExecutor // 시뮬레이터 구현
#[derive(Debug, Clone)]
pub struct SimulatorExecutor {
    /// Execution context
    context: BackendContext,

    /// Optional readout bias
    bias: Option<ReadoutBias>,
}

impl SimulatorExecutor {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create noiseless simulator
    pub fn new() -> Self {
        Self {
            context: BackendContext::simulator(),
            bias: None,
        }
    }

    /// Set readout bias
    pub fn with_bias(mut self, bias: ReadoutBias) -> Self {
        self.bias = Some(bias);
        self
    }

    /// Set backend name
    pub fn with_name(mut self, name: &str) -> Self {
        self.context.name = name.to_string();
        self
    }

    /// Readout bias, if any
    pub fn bias(&self) -> Option<&ReadoutBias> {
        self.bias.as_ref()
    }

    // ========================================================================
    // Simulation
    // ========================================================================

    /// Final state of a lowered circuit starting from |0...0⟩
    /// Gantree: simulate(gates, n) -> QawResult<Vec<Complex64>> // 상태 벡터
    pub fn simulate(&self, gates: &[Gate], num_qubits: usize) -> QawResult<Vec<Complex64>> {
        if num_qubits > MAX_SIMULATED_QUBITS {
            return Err(QawError::InvalidConfig(format!(
                "{} qubits exceed the simulator limit of {}",
                num_qubits, MAX_SIMULATED_QUBITS
            )));
        }

        let mut state = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
        state[0] = Complex64::new(1.0, 0.0);

        for gate in gates {
            for qubit in gate.qubits() {
                if qubit >= num_qubits {
                    return Err(QawError::QubitOutOfRange { qubit, num_qubits });
                }
            }
            apply_gate(&mut state, gate);
        }
        Ok(state)
    }

    /// Exact outcome distribution keyed by bitstring (qubit 0 first)
    pub fn distribution(&self, gates: &[Gate], num_qubits: usize) -> QawResult<BTreeMap<String, f64>> {
        let state = self.simulate(gates, num_qubits)?;
        let mut probs: Vec<f64> = state.iter().map(|a| a.norm_sqr()).collect();
        if let Some(bias) = &self.bias {
            bias.apply(&mut probs, num_qubits);
        }

        Ok(probs
            .into_iter()
            .enumerate()
            .filter(|(_, p)| *p > PROBABILITY_FLOOR)
            .map(|(index, p)| (bitstring(index, num_qubits), p))
            .collect())
    }
}

impl Default for SimulatorExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor for SimulatorExecutor {
    fn context(&self) -> &BackendContext {
        &self.context
    }

    fn execute(
        &self,
        ops: &[Operation],
        device: &DeviceDescriptor,
        _shots: u64,
    ) -> QawResult<RawResult> {
        let gates = lower_all(ops, device.entangler());
        log::debug!(
            "simulating {} gates on {} ({} qubits)",
            gates.len(),
            device.name(),
            device.num_qubits()
        );
        let probs = self.distribution(&gates, device.num_qubits())?;
        Ok(RawResult::Exact(probs))
    }
}

// ============================================================================
// Gate Application
// ============================================================================

fn bitstring(index: usize, num_qubits: usize) -> String {
    (0..num_qubits)
        .map(|q| if index & (1 << q) != 0 { '1' } else { '0' })
        .collect()
}

fn apply_gate(state: &mut [Complex64], gate: &Gate) {
    match *gate {
        Gate::H(q) => apply_h(state, q),
        Gate::Rx(q, theta) => apply_rx(state, q, theta),
        Gate::Ry(q, theta) => apply_ry(state, q, theta),
        Gate::Cnot(c, t) => apply_cnot(state, c, t),
        Gate::Cz(a, b) => apply_cz(state, a, b),
    }
}

fn apply_h(state: &mut [Complex64], q: QubitId) {
    let h = std::f64::consts::FRAC_1_SQRT_2;
    apply_single_qubit_gate(state, q, |a, b| ((a + b) * h, (a - b) * h));
}

fn apply_rx(state: &mut [Complex64], q: QubitId, theta: f64) {
    let c = (theta / 2.0).cos();
    let s = Complex64::new(0.0, -(theta / 2.0).sin());
    apply_single_qubit_gate(state, q, |a, b| (a * c + b * s, a * s + b * c));
}

fn apply_ry(state: &mut [Complex64], q: QubitId, theta: f64) {
    let (c, s) = ((theta / 2.0).cos(), (theta / 2.0).sin());
    apply_single_qubit_gate(state, q, |a, b| (a * c - b * s, a * s + b * c));
}

fn apply_single_qubit_gate<F>(state: &mut [Complex64], q: QubitId, f: F)
where
    F: Fn(Complex64, Complex64) -> (Complex64, Complex64),
{
    let mask = 1 << q;
    for i in 0..state.len() {
        if i & mask == 0 {
            let j = i | mask;
            let (new_i, new_j) = f(state[i], state[j]);
            state[i] = new_i;
            state[j] = new_j;
        }
    }
}

fn apply_cnot(state: &mut [Complex64], control: QubitId, target: QubitId) {
    let (control_mask, target_mask) = (1 << control, 1 << target);
    for i in 0..state.len() {
        if i & control_mask != 0 && i & target_mask == 0 {
            state.swap(i, i | target_mask);
        }
    }
}

fn apply_cz(state: &mut [Complex64], q1: QubitId, q2: QubitId) {
    let mask = (1 << q1) | (1 << q2);
    for (i, amp) in state.iter_mut().enumerate() {
        if i & mask == mask {
            *amp = -*amp;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
