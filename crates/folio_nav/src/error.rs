//! Navigation error types

use thiserror::Error;

/// Errors raised while building a navigator or loading its configuration
///
/// Runtime navigation never fails: out-of-range requests are clamped and
/// excess input is dropped.
#[derive(Error, Debug)]
pub enum NavError {
    /// A navigator needs at least one section to index into
    #[error("section collection must contain at least one section")]
    NoSections,

    /// Configuration values that cannot work together
    #[error("invalid navigation config: {0}")]
    InvalidConfig(String),

    /// Configuration file is not valid TOML for [`crate::NavConfig`]
    #[error("failed to parse navigation config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration file could not be read
    #[error("failed to read navigation config: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for navigation setup
pub type Result<T> = std::result::Result<T, NavError>;
