//! Generation error types.

use nexus_shared::AppError;
use thiserror::Error;

use crate::catalog::{CatalogError, RequestedFormat};
use crate::compose::ComposeError;

/// Errors returned by the report generator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Archetype id is not in the catalogue.
    #[error("Unknown report archetype: {0}")]
    ArchetypeNotFound(String),

    /// No subject was selected.
    #[error("A subject must be selected to generate a report")]
    SubjectRequired,

    /// Archetype cannot be rendered in the requested format.
    #[error("Format '{format}' is not available for {archetype}")]
    FormatNotAllowed {
        /// Archetype id.
        archetype: String,
        /// Requested format.
        format: RequestedFormat,
    },

    /// The composer failed to produce the container.
    #[error("Report composition failed: {0}")]
    CompositionFailure(String),
}

/// Discriminant of [`GenerationError`] for callers that branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationErrorKind {
    /// See [`GenerationError::ArchetypeNotFound`].
    ArchetypeNotFound,
    /// See [`GenerationError::SubjectRequired`].
    SubjectRequired,
    /// See [`GenerationError::FormatNotAllowed`].
    FormatNotAllowed,
    /// See [`GenerationError::CompositionFailure`].
    CompositionFailure,
}

impl GenerationError {
    /// Returns the error kind.
    #[must_use]
    pub const fn kind(&self) -> GenerationErrorKind {
        match self {
            Self::ArchetypeNotFound(_) => GenerationErrorKind::ArchetypeNotFound,
            Self::SubjectRequired => GenerationErrorKind::SubjectRequired,
            Self::FormatNotAllowed { .. } => GenerationErrorKind::FormatNotAllowed,
            Self::CompositionFailure(_) => GenerationErrorKind::CompositionFailure,
        }
    }

    /// Returns true if retrying the same request could succeed.
    ///
    /// Validation failures are deterministic; only composition may be
    /// transient.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::CompositionFailure(_))
    }
}

impl From<CatalogError> for GenerationError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(id) => Self::ArchetypeNotFound(id),
            other => Self::CompositionFailure(other.to_string()),
        }
    }
}

impl From<ComposeError> for GenerationError {
    fn from(err: ComposeError) -> Self {
        Self::CompositionFailure(err.to_string())
    }
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::ArchetypeNotFound(id) => {
                Self::NotFound(format!("Report archetype '{id}'"))
            }
            GenerationError::SubjectRequired => Self::Validation(err.to_string()),
            GenerationError::FormatNotAllowed { .. } => Self::BusinessRule(err.to_string()),
            GenerationError::CompositionFailure(_) => Self::Internal(err.to_string()),
        }
    }
}
