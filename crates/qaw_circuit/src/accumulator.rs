//! Gate accumulator
//!
//! Gantree: L3_Circuit → Accumulator
//!
//! Rebuilds the full puzzle circuit from the game history. Each finished
//! round contributes `conj⁻¹ · XX(merged) · conj`; the round in play
//! contributes its creating gates only. XX rotations on the same pair
//! compose additively, so a round's creating and removing gates are
//! merged into a single rotation per pair.

use crate::history::{completed_rounds, ConjugateLayer, GateSet};
use crate::operation::Operation;
use qaw_core::{is_helper_pair, DeviceDescriptor, Frac, PairName, QawError, QawResult};
use std::collections::BTreeMap;

/// Build the ordered operation list for a game history
/// Gantree: build_circuit(gates, conjugates, device) -> QawResult<Vec<Operation>> // 누적 회로
///
/// Needs exactly one conjugation layer per completed round.
pub fn build_circuit(
    gates: &[GateSet],
    conjugates: &[ConjugateLayer],
    device: &DeviceDescriptor,
) -> QawResult<Vec<Operation>> {
    let completed = completed_rounds(gates);
    if conjugates.len() != completed {
        return Err(QawError::HistoryMismatch {
            gates: gates.len(),
            conjugates: conjugates.len(),
        });
    }

    let mut ops = Vec::new();
    for r in 0..completed {
        let layer = &conjugates[r];
        check_layer(layer, r, device)?;

        push_conjugation(&mut ops, layer, device, true);
        let merged = merge_round(&gates[2 * r], &gates[2 * r + 1]);
        push_entangling(&mut ops, &merged, device)?;
        push_conjugation(&mut ops, layer, device, false);
    }

    if gates.len() % 2 == 1 {
        push_entangling(&mut ops, &gates[gates.len() - 1], device)?;
    }

    log::debug!(
        "built circuit: {} rounds, {} operations",
        (gates.len() + 1) / 2,
        ops.len()
    );
    Ok(ops)
}

/// Sum creating and removing fractions pair by pair
/// Gantree: merge_round(create, remove) -> GateSet // 병합 규칙
pub fn merge_round(create: &GateSet, remove: &GateSet) -> GateSet {
    let mut merged: BTreeMap<PairName, Frac> = create.clone();
    for (name, frac) in remove {
        *merged.entry(name.clone()).or_insert(0.0) += frac;
    }
    merged
}

fn check_layer(layer: &ConjugateLayer, round: usize, device: &DeviceDescriptor) -> QawResult<()> {
    if layer.len() != device.num_qubits() {
        return Err(QawError::InvalidConfig(format!(
            "conjugate layer {} has {} entries for {} qubits",
            round,
            layer.len(),
            device.num_qubits()
        )));
    }
    Ok(())
}

fn push_conjugation(
    ops: &mut Vec<Operation>,
    layer: &ConjugateLayer,
    device: &DeviceDescriptor,
    inverse: bool,
) {
    for (qubit, conj) in layer.iter().enumerate() {
        if !device.is_active(qubit) {
            continue;
        }
        let conj = if inverse { conj.inverse() } else { *conj };
        ops.push(Operation::Rotate {
            qubit,
            axis: conj.axis,
            frac: conj.frac,
        });
    }
}

fn push_entangling(
    ops: &mut Vec<Operation>,
    set: &GateSet,
    device: &DeviceDescriptor,
) -> QawResult<()> {
    for (name, &frac) in set {
        if is_helper_pair(name) {
            continue;
        }
        let pair = device.pair(name)?;
        ops.push(Operation::Entangle {
            control: pair.control,
            target: pair.target,
            frac,
        });
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
