//! Inspector errors.

use thiserror::Error;

/// Errors surfaced by inspection.
///
/// Navigation is the only fallible operation: summaries and reference
/// discovery are total over every object shape.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SquintError {
    /// Navigation requested a name absent from the reference table.
    #[error("no reference named {name:?}")]
    AttributeNotFound { name: String },
}
