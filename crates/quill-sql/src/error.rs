//! Error types for statement construction.

/// Errors that can occur while constructing a statement.
///
/// Rendering a built [`Statement`](crate::Statement) never fails: every
/// error surfaces at the builder call that would have made the statement
/// invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An operation was invoked in a builder state that forbids it.
    #[error("{builder}: {message}")]
    ConstructionState {
        /// The builder that rejected the operation.
        builder: &'static str,
        /// Why the operation was rejected.
        message: String,
    },

    /// A value has no SQLite literal rendering.
    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),

    /// An internal lookup table has no entry for the requested key.
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}

impl Error {
    /// Creates a [`Error::ConstructionState`] and logs the rejection.
    pub(crate) fn state(builder: &'static str, message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::debug!(builder, %message, "rejected builder operation");
        Self::ConstructionState { builder, message }
    }

    /// Creates a [`Error::UnsupportedValue`].
    pub(crate) fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedValue(message.into())
    }

    /// Returns `true` for [`Error::ConstructionState`].
    #[must_use]
    pub const fn is_construction_state(&self) -> bool {
        matches!(self, Self::ConstructionState { .. })
    }
}

/// Result type for statement construction.
pub type Result<T> = std::result::Result<T, Error>;
