//! # Quantum Awesomeness Game
//!
//! The round-based pairing game. Each round hides a random disjoint
//! pairing in an accumulated entangling circuit, shows the resulting
//! excitation probabilities, takes a guess, and removes the guessed
//! pairs before the next round.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qaw_game // L7: Game (완료)
//!     GameConfig // 게임 설정 (완료)
//!     GameState // 추가 전용 기록 (완료)
//!     PuzzleSource // 실시간/재생 퍼즐 (완료)
//!     Guess // 자동/수동 추측 (완료)
//!     RoundEngine // 라운드 상태 기계 (완료)
//!     Replay // 저장 게임 재생 (완료)
//!     ResultsStore // JSON-lines 저장소 (완료)
//!     Collect // 수집/피팅/분석 (완료)
//!     Renderer // 표시 trait (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qaw_game::prelude::*;
//! use qaw_core::get_device;
//!
//! let device = get_device("ladder4").unwrap();
//! let config = GameConfig::simulated().with_max_score(3).with_seed(42);
//! let source = LiveSource::new(SimulatorExecutor::new());
//!
//! let mut engine = RoundEngine::new(device, config, source).unwrap();
//! engine.play_auto().unwrap();
//! let state = engine.finish();
//! assert_eq!(state.score(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Game configuration (Gantree: L7_Game → GameConfig)
pub mod config;

/// Game state (Gantree: L7_Game → GameState)
pub mod state;

/// Puzzle sources (Gantree: L7_Game → PuzzleSource)
pub mod source;

/// Guessing (Gantree: L7_Game → Guess)
pub mod guess;

/// Round state machine (Gantree: L7_Game → RoundEngine)
pub mod engine;

/// Replay of stored games (Gantree: L7_Game → Replay)
pub mod replay;

/// Results store (Gantree: L7_Game → ResultsStore)
pub mod store;

/// Data collection (Gantree: L7_Game → Collect)
pub mod collect;

/// Display (Gantree: L7_Game → Renderer)
pub mod render;

// ============================================================================
// Re-exports
// ============================================================================

pub use collect::{analyze, collect_data, fit_profiles};
pub use config::GameConfig;
pub use engine::{Phase, RoundEngine};
pub use guess::{automatic_guess, manual_guess, GuessSession, Player, PlayerInput, ScriptedPlayer};
pub use render::{LogRenderer, Renderer};
pub use replay::ReplaySource;
pub use source::{LiveSource, PuzzleSource};
pub use state::{GameState, Guess, Puzzle, RoundRecord};
pub use store::{RecordKind, ResultsStore, RunKey};

pub mod prelude {
    //! Convenient imports
    //!
    //! ```rust
    //! use qaw_game::prelude::*;
    //! ```

    pub use crate::config::GameConfig;
    pub use crate::engine::{Phase, RoundEngine};
    pub use crate::guess::{Player, PlayerInput, ScriptedPlayer};
    pub use crate::render::{LogRenderer, Renderer};
    pub use crate::replay::ReplaySource;
    pub use crate::source::{LiveSource, PuzzleSource};
    pub use crate::state::{GameState, Guess, RoundRecord};
    pub use crate::store::{ResultsStore, RunKey};
    pub use qaw_backend::{RetryPolicy, RetryingExecutor, SimulatorExecutor};
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Integration Tests
// ============================================================================
