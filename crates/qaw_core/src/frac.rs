//! Rotation fraction helpers
//!
//! Gantree: L0_Foundation → Frac
//!
//! An X rotation by `frac·π` on |0⟩ gives `P(1) = sin²(frac·π/2)`, so the
//! fraction implied by an excitation probability is
//! `frac = asin(√p)·2/π`.

use std::f64::consts::PI;

/// Fraction of π that produces the given excitation probability
/// Gantree: frac_from_prob(p) -> f64 // 역변환
pub fn frac_from_prob(one_prob: f64) -> f64 {
    let p = one_prob.clamp(0.0, 1.0);
    p.sqrt().asin() * 2.0 / PI
}

/// Excitation probability produced by an X rotation of `frac·π`
pub fn prob_from_frac(frac: f64) -> f64 {
    (frac * PI / 2.0).sin().powi(2)
}

/// Circular distance between two fractions
///
/// `frac = 0` and `frac = 2` give identical statistics, so the distance
/// wraps: `d = min(|f1 - f2|, 1 - |f1 - f2|)`.
pub fn frac_difference(frac1: f64, frac2: f64) -> f64 {
    let delta = (frac1 - frac2).abs();
    delta.min(1.0 - delta)
}

/// Value shown to players: twice the implied fraction, capped at 1
pub fn entanglement_display(one_prob: f64) -> f64 {
    (2.0 * frac_from_prob(one_prob)).min(1.0)
}

// ============================================================================
// Tests
// ============================================================================
