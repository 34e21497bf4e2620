//! Error types for the path cache
//!
//! Cache operations themselves never fail; errors only arise while
//! configuring and driving the cache.

use thiserror::Error;

// == Path Cache Error Enum ==
/// Unified error type for the crate.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PathCacheError {
    /// Environment variable present but not parseable
    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: String, value: String },

    /// Configuration parsed but unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, PathCacheError>;
