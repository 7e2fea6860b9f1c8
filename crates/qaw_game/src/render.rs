//! Puzzle display
//!
//! Gantree: L7_Game → Renderer
//!
//! The game only needs "show this snapshot"; drawing is up to the
//! implementation.

use qaw_core::constants::puzzle::TAKEN_MARKER;
use qaw_core::DeviceDescriptor;

/// Display capability consumed once per manual round
/// Gantree: Renderer // trait
pub trait Renderer {
    /// Show a snapshot of excitation probabilities
    fn render(&mut self, device: &DeviceDescriptor, one_prob: &[f64], round: usize);
}

/// Renderer writing one line per qubit through `log`
/// Gantree: LogRenderer // 로그 출력
#[derive(Debug, Clone, Copy, Default)]
pub struct LogRenderer;

impl LogRenderer {
    /// Text for one qubit: percentage, or `--` once taken
    pub fn cell(value: f64) -> String {
        if value >= TAKEN_MARKER {
            "--".to_string()
        } else {
            format!("{:>3.0}%", 100.0 * value.clamp(0.0, 1.0))
        }
    }

    /// Whole snapshot as one line, inactive qubits skipped
    pub fn line(device: &DeviceDescriptor, one_prob: &[f64]) -> String {
        device
            .active_qubits()
            .filter_map(|q| one_prob.get(q).map(|&p| format!("q{}={}", q, Self::cell(p))))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, device: &DeviceDescriptor, one_prob: &[f64], round: usize) {
        log::info!("Round {} [{}]: {}", round, device.name(), Self::line(device, one_prob));
    }
}
