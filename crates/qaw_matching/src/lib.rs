//! # Quantum Awesomeness Matching
//!
//! Maximum-weight, maximum-cardinality matching over the pairs of a
//! device. Used to draw random puzzles, to guess pairings from noisy
//! statistics, and as the scoring oracle of the cleaner.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qaw_matching // L2: Matching (완료)
//!     Matcher // 이름 기반 매칭 (완료)
//!         find_matching // 가중치 매칭 (완료)
//!         random_matching // 무작위 매칭 (완료)
//!         weights_from_one_prob // 유사도 가중치 (완료)
//!         make_example // 예제 퍼즐 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qaw_core::get_device;
//! use qaw_matching::prelude::*;
//! use rand::SeedableRng;
//!
//! let device = get_device("ladder6").unwrap();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let matching = random_matching(device.pairs(), &mut rng);
//! assert_eq!(matching.len(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Named-pair matcher (Gantree: L2_Matching → Matcher)
pub mod matcher;

pub use matcher::{
    find_matching, is_disjoint, make_example, matching_from_one_prob, random_matching,
    random_weights, weights_from_one_prob, Matching, Weights, WEIGHT_SCALE,
};

pub mod prelude {
    //! Convenient imports
    pub use crate::matcher::{
        find_matching, is_disjoint, make_example, matching_from_one_prob, random_matching,
        weights_from_one_prob, Matching, Weights,
    };
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use qaw_core::{get_device, supported_devices};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_every_device_matches_disjointly() {
        let mut rng = StdRng::seed_from_u64(2024);
        let names = supported_devices()
            .into_iter()
            .chain(["line9", "ladder8", "square9", "web5"]);
        for name in names {
            let device = get_device(name).unwrap();
            for _ in 0..20 {
                let m = random_matching(device.pairs(), &mut rng);
                assert!(is_disjoint(&m, device.pairs()).unwrap(), "{}", name);
                assert!(!m.is_empty());
            }
        }
    }

    #[test]
    fn test_square_perfect_matching() {
        let device = get_device("square16").unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let m = random_matching(device.pairs(), &mut rng);
            assert_eq!(m.len(), 8);
        }
    }

    #[test]
    fn test_web_odd_leaves_one() {
        let device = get_device("web7").unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let m = random_matching(device.pairs(), &mut rng);
        assert_eq!(m.len(), 3);
    }
}
