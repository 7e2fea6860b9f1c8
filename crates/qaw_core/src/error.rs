//! Error types for Quantum Awesomeness
//!
//! Gantree: L0_Foundation → Errors
//!
//! One error enum shared by every crate of the workspace, grouped by how
//! the caller is expected to react: configuration problems are fatal,
//! backend problems are transient, guesses are re-prompted, and missing
//! historical data fails the requesting operation only.

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use thiserror::Error;

/// Main error type
/// Gantree: QawError // enum
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QawError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Entangling-gate family that cannot be lowered
    /// Gantree: UnsupportedEntangler(String) // 지원 안 됨
    #[error("Unsupported entangling gate type '{0}': expected CX, CZ or none")]
    UnsupportedEntangler(String),

    /// Pair references invalid qubits
    #[error("Invalid pair '{name}' ({a}, {b}): {reason}")]
    InvalidPair {
        name: String,
        a: usize,
        b: usize,
        reason: String,
    },

    /// Pair name used twice
    #[error("Duplicate pair name '{0}'")]
    DuplicatePair(String),

    /// Pair name not known to the device
    #[error("Unknown pair '{0}'")]
    UnknownPair(String),

    /// Qubit index out of range
    /// Gantree: QubitOutOfRange{{q,max}} // 큐비트 범위
    #[error("Qubit {qubit} out of range: device has {num_qubits} qubits")]
    QubitOutOfRange { qubit: usize, num_qubits: usize },

    /// Layout pattern cannot be built
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    /// Device name is neither a preset nor a pattern
    #[error("Unknown device '{0}'")]
    UnknownDevice(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Backend Errors
    // ========================================================================
    /// Backend execution error
    /// Gantree: BackendError(String) // 백엔드
    #[error("Backend error: {0}")]
    BackendError(String),

    /// Backend did not answer in time
    #[error("Backend '{backend}' timed out after {seconds}s")]
    BackendTimeout { backend: String, seconds: u64 },

    /// Backend returned something that is not measurement data
    #[error("Malformed backend result: {0}")]
    MalformedResult(String),

    /// Retry budget spent
    #[error("Backend failed after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: usize, last_error: String },

    // ========================================================================
    // Input Errors
    // ========================================================================
    /// Player guess rejected
    #[error("Invalid guess: {0}")]
    InvalidGuess(String),

    // ========================================================================
    // Data Errors
    // ========================================================================
    /// No saved records for the requested replay
    /// Gantree: MissingData{{what}} // 데이터 없음
    #[error("Missing data: {what}")]
    MissingData { what: String },

    /// Gate and conjugate histories do not line up
    #[error("History mismatch: {gates} gate sets for {conjugates} conjugate layers")]
    HistoryMismatch { gates: usize, conjugates: usize },

    /// Probability value out of range [0, 1]
    #[error("Invalid probability {0}: must be in range [0, 1]")]
    InvalidProbability(f64),

    /// Invalid bitstring format
    #[error("Invalid bitstring '{0}': must contain only '0' and '1'")]
    InvalidBitstring(String),

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),

    /// File I/O error
    #[error("File error: {0}")]
    FileError(String),
}

/// Result type alias
/// Gantree: QawResult<T> // type alias
pub type QawResult<T> = Result<T, QawError>;

// ============================================================================
// Error Conversion Helpers
// ============================================================================

impl From<serde_json::Error> for QawError {
    fn from(err: serde_json::Error) -> Self {
        QawError::JsonError(err.to_string())
    }
}

impl From<std::io::Error> for QawError {
    fn from(err: std::io::Error) -> Self {
        QawError::FileError(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl QawError {
    /// Fatal setup problems that must be reported to the operator
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            QawError::UnsupportedEntangler(_)
                | QawError::InvalidPair { .. }
                | QawError::DuplicatePair(_)
                | QawError::UnknownPair(_)
                | QawError::QubitOutOfRange { .. }
                | QawError::InvalidLayout(_)
                | QawError::UnknownDevice(_)
                | QawError::InvalidConfig(_)
        )
    }

    /// Backend failures worth another attempt
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            QawError::BackendError(_)
                | QawError::BackendTimeout { .. }
                | QawError::MalformedResult(_)
        )
    }

    /// Errors handled locally without aborting the game
    pub fn is_recoverable(&self) -> bool {
        matches!(self, QawError::InvalidGuess(_)) || self.is_transient()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QawError::UnsupportedEntangler("iSWAP".into());
        assert!(err.to_string().contains("iSWAP"));
    }

    #[test]
    fn test_qubit_out_of_range() {
        let err = QawError::QubitOutOfRange {
            qubit: 10,
            num_qubits: 5,
        };
        assert!(err.to_string().contains("10"));
        assert!(err.to_string().contains('5'));
    }

    #[test]
    fn test_taxonomy() {
        assert!(QawError::UnsupportedEntangler("x".into()).is_configuration_error());
        assert!(!QawError::UnsupportedEntangler("x".into()).is_transient());

        assert!(QawError::BackendError("down".into()).is_transient());
        assert!(QawError::BackendError("down".into()).is_recoverable());

        assert!(QawError::InvalidGuess("Q".into()).is_recoverable());
        assert!(!QawError::InvalidGuess("Q".into()).is_transient());

        let missing = QawError::MissingData {
            what: "gates".into(),
        };
        assert!(!missing.is_recoverable());
        assert!(!missing.is_configuration_error());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: QawError = io.into();
        assert!(matches!(err, QawError::FileError(_)));
    }
}
