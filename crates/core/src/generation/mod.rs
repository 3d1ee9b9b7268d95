//! Report generation.
//!
//! [`ReportGenerator`] validates an (archetype, subject, format) request
//! against the catalogue and hands it to the composer registered for the
//! output container. Validation always completes before composition, so a
//! failed request never yields a partial artifact.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::{GenerationError, GenerationErrorKind};
pub use service::{ReportGenerator, suggested_file_stem};
pub use types::{GeneratedArtifact, GenerationRecord, MimeKind};
