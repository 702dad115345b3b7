//! Error types for the reading-lens library.

use crate::alignment::AlignmentStatus;
use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Camera access was denied by the user or platform
    #[error("Camera permission denied: grant camera access and start again")]
    CameraPermissionDenied,

    /// No usable camera device is attached
    #[error("No camera device found: connect a webcam and start again")]
    CameraNotFound,

    /// Landmark model failed to load or initialize
    #[error("Landmark model initialization failed: {0}")]
    ModelInit(String),

    /// Calibration was attempted while misaligned; carries the blocking
    /// status, the message includes its corrective instruction
    #[error("Cannot calibrate while {}: {}", .0, .0.instruction())]
    Misaligned(AlignmentStatus),

    /// Persisted calibration record failed shape validation
    #[error("Malformed calibration data: {0}")]
    MalformedCalibration(String),

    /// Key-value store operation failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application-specific error type (alias for main Error type)
pub type AppError = Error;

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
