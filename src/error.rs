// h36m-pose 🚀 AGPL-3.0 License

//! Error types for the pose processing library.

use std::fmt;

/// Result type alias for pose processing operations.
pub type Result<T> = std::result::Result<T, PoseError>;

/// Main error type for the pose processing library.
///
/// Every failure is a local, synchronous, deterministic condition: retrying
/// the same call with the same inputs cannot change the outcome. The caller
/// decides between abort and skip-and-continue.
#[derive(Debug)]
pub enum PoseError {
    /// Pose array joint/coordinate count does not match the contract at a
    /// transform boundary (e.g., standardizing an 18-joint pose).
    ShapeMismatch(String),
    /// Requested mean/std key absent from the loaded statistics table.
    MissingStatistics(String),
    /// A 3D point sits at or behind the camera plane during projection.
    InvalidDepth {
        /// Batch index of the offending sample.
        sample: usize,
        /// Joint index within the sample.
        joint: usize,
        /// The rejected depth value.
        depth: f32,
    },
    /// Root index out of range, zero standard deviation, or a statistics
    /// table inconsistent with the poses it is applied to. Detected eagerly,
    /// before any numeric work.
    ConfigInconsistency(String),
    /// Error reading or writing a statistics/pose archive.
    StatsIo(String),
    /// Wrapped `std::io::Error`.
    Io(std::io::Error),
}

impl fmt::Display for PoseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch(msg) => write!(f, "Shape mismatch: {msg}"),
            Self::MissingStatistics(msg) => write!(f, "Missing statistics: {msg}"),
            Self::InvalidDepth { sample, joint, depth } => write!(
                f,
                "Invalid depth: sample {sample}, joint {joint} has depth {depth} (point at or behind the camera plane)"
            ),
            Self::ConfigInconsistency(msg) => write!(f, "Config inconsistency: {msg}"),
            Self::StatsIo(msg) => write!(f, "Stats IO error: {msg}"),
            Self::Io(err) => write!(f, "IO error: {err}"),
        }
    }
}

impl std::error::Error for PoseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PoseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ndarray_npy::ReadNpzError> for PoseError {
    fn from(err: ndarray_npy::ReadNpzError) -> Self {
        Self::StatsIo(err.to_string())
    }
}

impl From<ndarray_npy::WriteNpzError> for PoseError {
    fn from(err: ndarray_npy::WriteNpzError) -> Self {
        Self::StatsIo(err.to_string())
    }
}
