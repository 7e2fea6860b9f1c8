//! # Quantum Awesomeness Core
//!
//! Foundation types, device descriptors and layouts for the Quantum
//! Awesomeness benchmarking game.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qaw_core // L0+L1: Foundation + Device (완료)
//!     L0_Foundation // 기반 타입/상수/에러 (완료)
//!         CoreTypes // 핵심 타입 (완료)
//!         Constants // 퍼즐/통계/정리 상수 (완료)
//!         Errors // 에러 타입 (완료)
//!         Frac // 회전 분수 변환 (완료)
//!     L1_Device // 장치 (완료)
//!         DeviceDescriptor // 장치 기술자 (완료)
//!         Layout // 패턴/카탈로그 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qaw_core::prelude::*;
//!
//! let device = get_device("ibmqx4").unwrap();
//! assert_eq!(device.num_qubits(), 5);
//! assert_eq!(device.entangler(), EntanglerType::Cx);
//!
//! // Fraction implied by an excitation probability
//! assert!((frac_from_prob(0.5) - 0.5).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Core types (Gantree: L0_Foundation → CoreTypes)
pub mod types;

/// Constants (Gantree: L0_Foundation → Constants)
pub mod constants;

/// Error types (Gantree: L0_Foundation → Errors)
pub mod error;

/// Rotation fractions (Gantree: L0_Foundation → Frac)
pub mod frac;

/// Device descriptors (Gantree: L1_Device → DeviceDescriptor)
pub mod device;

/// Layout patterns and catalog (Gantree: L1_Device → Layout)
pub mod layout;

// ============================================================================
// Re-exports
// ============================================================================

pub use constants::{cleaning, puzzle, retry, stats};
pub use device::{DeviceDescriptor, EntanglerType, RunSpec, RunTable};
pub use error::{QawError, QawResult};
pub use frac::{entanglement_display, frac_difference, frac_from_prob, prob_from_frac};
pub use layout::{get_device, make_layout, pair_label, supported_devices, Pattern};
pub use types::{
    is_helper_pair, Axis, Bitstring, Frac, MoveMode, OneProb, Pair, PairMap, PairName, QubitId,
    RunMode, SameProb,
};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use qaw_core::prelude::*;
    //! ```

    pub use crate::constants::{cleaning, puzzle, retry, stats};
    pub use crate::device::{DeviceDescriptor, EntanglerType, RunSpec, RunTable};
    pub use crate::error::{QawError, QawResult};
    pub use crate::frac::{entanglement_display, frac_difference, frac_from_prob, prob_from_frac};
    pub use crate::layout::{get_device, make_layout, supported_devices};
    pub use crate::types::{
        is_helper_pair, Axis, Bitstring, Frac, MoveMode, OneProb, Pair, PairMap, PairName,
        QubitId, RunMode, SameProb,
    };
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================
