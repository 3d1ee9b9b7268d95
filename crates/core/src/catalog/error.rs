//! Catalogue error types.

use thiserror::Error;

/// Errors raised by catalogue lookups and startup validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// No archetype with the given id.
    #[error("Report archetype not found: {0}")]
    NotFound(String),

    /// Two archetypes share an id.
    #[error("Duplicate report archetype id: {0}")]
    DuplicateArchetype(String),

    /// A section is listed twice in one archetype.
    #[error("Section {section} is listed more than once in {archetype}")]
    DuplicateSection {
        /// Archetype id.
        archetype: String,
        /// Section title.
        section: String,
    },

    /// An archetype cannot be rendered at all.
    #[error("Report archetype {0} allows no output formats")]
    NoFormats(String),
}
