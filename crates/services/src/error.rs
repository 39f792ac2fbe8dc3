//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;

/// Validation failures raised by exercise handlers.
///
/// Every variant is recovered locally: the handler turns it into a
/// transient message and takes no further action, so the `Display` text is
/// what the learner sees.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExerciseError {
    #[error("Please enter a fraction.")]
    Empty,

    #[error("Invalid fraction format. The correct form is number/number (like 1/2).")]
    InvalidFormat { input: String },

    #[error("The colored part cannot exceed the whole, and the denominator cannot be zero.")]
    OutOfRange { fraction: String },

    #[error("Something went wrong coloring the shape. Please try another one.")]
    TargetNotFound { shape: String },

    #[error("Please select an option.")]
    NoSelection,
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
