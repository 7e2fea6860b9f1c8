//! # Quantum Awesomeness Clean
//!
//! Post-processing against readout bias. A cleaning profile applies a
//! per-qubit affine correction that mixes each qubit's excitation
//! probability with that of its most informative neighbour. Profiles
//! are fitted per round against a corpus of stored games.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qaw_clean // L5: Cleaning (완료)
//!     Corpus // 저장된 게임 표본 (완료)
//!     Profile // 정리 계수/라운드별 집합 (완료)
//!     Cleaner // 짝 선택 + 보정 (완료)
//!     Quality // 사전식 품질 목표 (완료)
//!     Fitter // 국소 탐색 피팅 (완료)
//!     Analysis // 코퍼스 분석 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qaw_clean::prelude::*;
//! use qaw_core::get_device;
//! use std::collections::BTreeMap;
//!
//! let device = get_device("line3").unwrap();
//! let mut same = BTreeMap::new();
//! same.insert("A".to_string(), 1.0);
//! same.insert("B".to_string(), 0.5);
//!
//! let raw = vec![0.2, 0.4, 0.5];
//! let cleaned = clean(&CleaningProfile::neutral(3), &raw, &same, device.pairs(), 0.0).unwrap();
//! assert!((cleaned[0] - cleaned[1]).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Stored games (Gantree: L5_Clean → Corpus)
pub mod corpus;

/// Cleaning profiles (Gantree: L5_Clean → Profile)
pub mod profile;

/// Cleaning (Gantree: L5_Clean → Cleaner)
pub mod clean;

/// Quality objective (Gantree: L5_Clean → Quality)
pub mod quality;

/// Profile fitting (Gantree: L5_Clean → Fitter)
pub mod fit;

/// Corpus analysis (Gantree: L5_Clean → Analysis)
pub mod analysis;

pub use analysis::{process_data, RoundAnalysis};
pub use clean::{clean, select_partners};
pub use corpus::{corpus_qubits, GameSample, RoundView};
pub use fit::{fit, fit_all_rounds, fit_with_rng, FitConfig, FitOutcome};
pub use profile::{CleaningProfile, ProfileSet};
pub use quality::{calculate_quality, MeanVar, Quality};

pub mod prelude {
    //! Convenient imports
    pub use crate::analysis::process_data;
    pub use crate::clean::clean;
    pub use crate::corpus::GameSample;
    pub use crate::fit::{fit, fit_all_rounds, FitConfig};
    pub use crate::profile::{CleaningProfile, ProfileSet};
    pub use crate::quality::{calculate_quality, Quality};
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
