use thiserror::Error;

/// A result type for sampling operations
pub type Result<T> = std::result::Result<T, LhsError>;

/// An error when building a sampler or drawing samples
#[derive(Error, Debug)]
pub enum LhsError {
    /// When the requested number of samples is not positive
    #[error("Invalid sample count: {0} (at least one sample is required)")]
    InvalidSampleCount(usize),
    /// When no dimension is given
    #[error("Empty dimension set: at least one dimension is required")]
    EmptyDimensionSet,
    /// When a distribution parameter is out of its valid domain
    #[error("Invalid parameter `{parameter}` for dimension {dimension}: {reason}")]
    InvalidParameter {
        /// Index of the offending dimension
        dimension: usize,
        /// Name of the offending parameter
        parameter: &'static str,
        /// Human-readable description of the violated constraint
        reason: String,
    },
    /// When a request document cannot be parsed
    #[cfg(feature = "serializable")]
    #[error("Request error: {0}")]
    RequestError(#[from] serde_json::Error),
}
