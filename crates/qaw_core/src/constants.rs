//! Constants for Quantum Awesomeness
//!
//! Gantree: L0_Foundation → Constants
//!
//! Puzzle tuning, statistics tolerances, cleaning defaults and
//! retry timings.

/// Puzzle generation constants
/// Gantree: PuzzleConstants // 퍼즐 상수
pub mod puzzle {
    /// Pair names with this prefix are helper edges
    pub const HELPER_PREFIX: &str = "fake";

    /// Lower bound of the puzzle fraction: (0.1 + 0.9·0) / 2
    pub const FRAC_MIN: f64 = 0.05;

    /// Upper bound (exclusive) of the puzzle fraction: (0.1 + 0.9·1) / 2
    pub const FRAC_MAX: f64 = 0.5;

    /// Upper bound (inclusive) for random matching weights
    pub const RANDOM_WEIGHT_MAX: i64 = 100;

    /// Displayed value marking a qubit already chosen by the player
    pub const TAKEN_MARKER: f64 = 2.0;

    /// Devices up to this many qubits take case-insensitive pair names
    pub const CASE_INSENSITIVE_MAX_QUBITS: usize = 26;

    /// Draw the puzzle fraction for a uniform sample `u` in [0, 1)
    #[inline]
    pub fn frac_for_uniform(u: f64) -> f64 {
        FRAC_MIN + (FRAC_MAX - FRAC_MIN) * u
    }
}

/// Statistics constants
/// Gantree: StatsConstants // 통계 상수
pub mod stats {
    /// Mutual information above this is normalized by the smaller marginal entropy
    pub const MI_NORMALIZE_TOLERANCE: f64 = 1e-3;

    /// Placeholder bit reported for inactive qubits
    pub const INACTIVE_BIT: char = '0';

    /// Results larger than this (in serialized characters) are not kept per round
    pub const MAX_STORED_RESULT_CHARS: usize = 10_000;
}

/// Cleaning model constants
/// Gantree: CleaningConstants // 정리 상수
pub mod cleaning {
    /// Coefficients per qubit
    pub const COEFFS_PER_QUBIT: usize = 3;

    /// Neutral starting point of the optimizer
    pub const NEUTRAL: [f64; 3] = [0.5, 0.5, 0.0];

    /// Default profile for human players
    pub const GRITTY: [f64; 3] = [0.5, 0.5, 0.0];

    /// Default profile otherwise
    pub const SMOOTH: [f64; 3] = [0.45, 0.55, 0.0];

    /// Identity profile
    pub const IDENTITY: [f64; 3] = [1.0, 0.0, 0.0];

    /// Default perturbation amplitude of the optimizer
    pub const DEFAULT_STEP: f64 = 0.05;

    /// Default number of optimizer steps
    pub const DEFAULT_ITERATIONS: usize = 2_000;
}

/// Backend retry constants
pub mod retry {
    /// Historical wait after a failed hardware job (seconds)
    pub const HARDWARE_DELAY_SECS: u64 = 600;

    /// Historical wait for queue-based services (seconds)
    pub const QUEUE_DELAY_SECS: u64 = 300;

    /// Default number of attempts before giving up
    pub const DEFAULT_MAX_ATTEMPTS: usize = 5;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_puzzle_range() {
        assert!((puzzle::frac_for_uniform(0.0) - 0.05).abs() < 1e-12);
        assert!((puzzle::frac_for_uniform(1.0) - 0.5).abs() < 1e-12);
        // Matches the historical (0.1 + 0.9u) / 2
        let u = 0.37;
        assert!((puzzle::frac_for_uniform(u) - (0.1 + 0.9 * u) / 2.0).abs() < 1e-12);
    }
}
