//! Error types for the camera configuration

use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, TypesError>;

/// Configuration errors, raised only while building the static tables
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    /// Camera at the given table position has an empty identifier
    #[error("Camera at position {position} has an empty identifier")]
    EmptyCameraId { position: usize },

    /// Two cameras share the same identifier
    #[error("Duplicate camera identifier: {id}")]
    DuplicateCameraId { id: String },

    /// Disk usage outside 0..=100
    #[error("Disk usage must be between 0 and 100 percent, got {percent}")]
    DiskUsageOutOfRange { percent: u8 },
}
