//! Error types for corpus model operations.

use thiserror::Error;

/// Errors reported by model-level operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// A contrast-group number that is not a positive integer.
    #[error("Invalid contrast group number: {0}")]
    InvalidContrastGroup(i64),
}
