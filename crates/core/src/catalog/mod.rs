//! Report archetype catalogue.
//!
//! Static registry of report types. Each archetype lists its sections in
//! rendering order and the output containers it may be rendered into.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::CatalogError;
pub use service::ReportCatalog;
pub use types::{OutputFormat, ReportArchetype, RequestedFormat, Section, SectionName, StatementKind};
