//! Game configuration
//!
//! Gantree: L7_Game → GameConfig
//!
//! Settings for one game: how guesses are made, how many shots and rounds,
//! where the circuits run, and the puzzle fraction range.

use qaw_core::constants::puzzle::{FRAC_MAX, FRAC_MIN};
use qaw_core::{DeviceDescriptor, MoveMode, QawError, QawResult, RunMode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Game configuration
/// Gantree: GameConfig // 게임 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    // ========================================================================
    // Play
    // ========================================================================
    /// How the pairing guess is chosen
    /// Gantree: move_mode: MoveMode // C/R/B/M
    pub move_mode: MoveMode,

    /// Number of rounds
    /// Gantree: max_score: usize // 최대 라운드
    pub max_score: usize,

    /// Extra fraction added to every removal gate's magnitude
    pub bias: f64,

    /// Clean replayed statistics before guessing
    pub cleanup: bool,

    /// In move C on hardware, remove the applied fraction instead of the inferred one
    pub uniform_answer_for_correct_real: bool,

    // ========================================================================
    // Execution
    // ========================================================================
    /// Number of shots per round
    /// Gantree: shots: u64 // 샷 수
    pub shots: u64,

    /// Simulated or real hardware
    pub mode: RunMode,

    /// Lower bound of the puzzle fraction
    pub puzzle_frac_min: f64,

    /// Upper bound of the puzzle fraction
    pub puzzle_frac_max: f64,

    /// Random seed
    /// Gantree: seed: Option<u64> // 시드
    pub seed: Option<u64>,
}

impl GameConfig {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Simulated game with automatic moves
    pub fn simulated() -> Self {
        Self {
            move_mode: MoveMode::Correct,
            max_score: 10,
            bias: 0.0,
            cleanup: false,
            uniform_answer_for_correct_real: true,
            shots: 1024,
            mode: RunMode::Simulated,
            puzzle_frac_min: FRAC_MIN,
            puzzle_frac_max: FRAC_MAX,
            seed: None,
        }
    }

    /// Game on real hardware
    pub fn real() -> Self {
        Self {
            mode: RunMode::Real,
            ..Self::simulated()
        }
    }

    /// Defaults taken from a device's run table
    pub fn for_device(device: &DeviceDescriptor, mode: RunMode) -> QawResult<Self> {
        let spec = device.runs().get(mode).ok_or_else(|| {
            QawError::InvalidConfig(format!("device {} has no {} runs", device.name(), mode))
        })?;
        let mut config = match mode {
            RunMode::Simulated => Self::simulated(),
            RunMode::Real => Self::real(),
        };
        config.max_score = spec.max_score;
        if let Some(&shots) = spec.shots.first() {
            config.shots = shots;
        }
        if let Some(&move_mode) = spec.moves.first() {
            config.move_mode = move_mode;
        }
        Ok(config)
    }

    // ========================================================================
    // Builders
    // ========================================================================

    /// Builder: set move mode
    pub fn with_move(mut self, move_mode: MoveMode) -> Self {
        self.move_mode = move_mode;
        self
    }

    /// Builder: set rounds
    pub fn with_max_score(mut self, max_score: usize) -> Self {
        self.max_score = max_score;
        self
    }

    /// Builder: set shots
    pub fn with_shots(mut self, shots: u64) -> Self {
        self.shots = shots;
        self
    }

    /// Builder: set removal bias
    pub fn with_bias(mut self, bias: f64) -> Self {
        self.bias = bias;
        self
    }

    /// Builder: enable cleaning
    pub fn with_cleanup(mut self, cleanup: bool) -> Self {
        self.cleanup = cleanup;
        self
    }

    /// Builder: set puzzle fraction range
    pub fn with_frac_range(mut self, min: f64, max: f64) -> Self {
        self.puzzle_frac_min = min;
        self.puzzle_frac_max = max;
        self
    }

    /// Builder: set seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder: set move C behaviour on hardware
    pub fn with_uniform_answer(mut self, enabled: bool) -> Self {
        self.uniform_answer_for_correct_real = enabled;
        self
    }

    // ========================================================================
    // Derived
    // ========================================================================

    /// Puzzle fraction for a uniform sample `u` in [0, 1)
    pub fn puzzle_frac(&self, u: f64) -> f64 {
        self.puzzle_frac_min + (self.puzzle_frac_max - self.puzzle_frac_min) * u
    }

    /// Removal fraction for an applied (or inferred) fraction
    pub fn removal_frac(&self, frac: f64) -> f64 {
        -(frac + self.bias)
    }

    /// Check if move C removes the applied fraction directly
    pub fn removes_true_frac(&self) -> bool {
        self.move_mode == MoveMode::Correct
            && !self.mode.is_simulated()
            && self.uniform_answer_for_correct_real
    }

    // ========================================================================
    // Validation / IO
    // ========================================================================

    /// Validate configuration
    pub fn validate(&self) -> QawResult<()> {
        if self.shots == 0 {
            return Err(QawError::InvalidConfig("shots must be > 0".into()));
        }
        if self.max_score == 0 {
            return Err(QawError::InvalidConfig("max_score must be > 0".into()));
        }
        if !self.bias.is_finite() {
            return Err(QawError::InvalidConfig(format!("bias must be finite, got {}", self.bias)));
        }
        let (lo, hi) = (self.puzzle_frac_min, self.puzzle_frac_max);
        if !(lo.is_finite() && hi.is_finite() && 0.0 <= lo && lo <= hi && hi <= 1.0) {
            return Err(QawError::InvalidConfig(format!(
                "puzzle fraction range [{}, {}] must lie in [0, 1]",
                lo, hi
            )));
        }
        Ok(())
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> QawResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> QawResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::simulated()
    }
}

impl fmt::Display for GameConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GameConfig(move={}, shots={}, {}, max_score={}, bias={:.3})",
            self.move_mode, self.shots, self.mode, self.max_score, self.bias
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
