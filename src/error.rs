use thiserror::Error;

/// Crate-level error type.
///
/// Only programmer-contract failures surface as errors; data-shape
/// irregularities (missing rows, empty reconstruction roots, malformed
/// sub-fields) resolve to `Option`/empty results instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Invalid argument combination passed to a core operation. Indicates a
    /// bug in the calling code, not a data problem.
    #[error("precondition violated: {0}")]
    Precondition(String),
}

impl Error {
    pub fn precondition(message: impl Into<String>) -> Self {
        Error::Precondition(message.into())
    }

    pub fn is_precondition(&self) -> bool {
        matches!(self, Error::Precondition(_))
    }
}
