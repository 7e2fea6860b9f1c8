//! # Quantum Awesomeness Stats
//!
//! Turns raw backend output into the statistics the game is played on:
//! per-qubit excitation probabilities, per-pair agreement probabilities,
//! pairwise mutual information and round metrics.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qaw_stats // L4: Statistics (완료)
//!     RawResult // 원시 결과 (완료)
//!     Extractor // 통계 추출 (완료)
//!         sample_shots // 샷 잡음 주입 (완료)
//!         marginals // 주변 확률 (완료)
//!     Mutual // 상호정보 (완료)
//!     Metrics // 퍼지/정답률 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qaw_core::get_device;
//! use qaw_stats::prelude::*;
//! use rand::SeedableRng;
//! use std::collections::BTreeMap;
//!
//! let device = get_device("line3").unwrap();
//! let mut probs = BTreeMap::new();
//! probs.insert("000".to_string(), 0.5);
//! probs.insert("110".to_string(), 0.5);
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let snap = extract(&RawResult::Exact(probs), &device, 1000, &mut rng)
//!     .unwrap()
//!     .into_snapshot()
//!     .unwrap();
//! let info = mutual_information(&snap.one_prob, &snap.same_prob, device.pairs()).unwrap();
//! assert!(info["A"] > 0.9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Raw results (Gantree: L4_Stats → RawResult)
pub mod raw;

/// Statistics extraction (Gantree: L4_Stats → Extractor)
pub mod extract;

/// Mutual information (Gantree: L4_Stats → Mutual)
pub mod mutual;

/// Round metrics (Gantree: L4_Stats → Metrics)
pub mod metrics;

pub use extract::{extract, marginals, sample_shots, Extraction, Frequencies, Snapshot};
pub use metrics::{calculate_fuzz, correct_guesses, correctness};
pub use mutual::{
    binary_entropy, entropy, expectations, joint_distribution, mutual_information,
    pair_information, Information,
};
pub use raw::RawResult;

pub mod prelude {
    //! Convenient imports
    pub use crate::extract::{extract, Extraction, Snapshot};
    pub use crate::metrics::{calculate_fuzz, correctness};
    pub use crate::mutual::{mutual_information, Information};
    pub use crate::raw::RawResult;
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use qaw_core::get_device;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{BTreeMap, BTreeSet};

    #[test]
    fn test_correlated_pair_stands_out() {
        // Qubits 0,1 always agree; qubit 2 is an independent coin
        let device = get_device("line3").unwrap();
        let mut probs = BTreeMap::new();
        for key in ["000", "001", "110", "111"] {
            probs.insert(key.to_string(), 0.25);
        }
        let mut rng = StdRng::seed_from_u64(11);
        let snap = extract(&RawResult::Exact(probs), &device, 5000, &mut rng)
            .unwrap()
            .into_snapshot()
            .unwrap();

        let info = mutual_information(&snap.one_prob, &snap.same_prob, device.pairs()).unwrap();
        assert!(info["A"] > 0.95);
        assert!(info["B"] < 0.05);

        let truth: BTreeSet<String> = ["A".to_string()].into_iter().collect();
        let fuzz = calculate_fuzz(&snap.one_prob, device.pairs(), &truth).unwrap();
        assert!(fuzz < 1e-12);
        assert_eq!(correctness(&truth, &truth), 1.0);
    }
}
