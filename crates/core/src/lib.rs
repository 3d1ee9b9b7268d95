//! Report synthesis engine for Nexus Reports.
//!
//! This crate contains pure report composition with ZERO web dependencies.
//! Given an archetype, a subject, and a format, it assembles a paginated
//! document or a multi-sheet workbook from the section catalogue and the
//! financial model library.
//!
//! # Modules
//!
//! - `catalog` - Report archetypes, sections, and output formats
//! - `subject` - Directory of companies reports are generated for
//! - `content` - Section narrative text with deterministic fallback
//! - `financials` - Internally consistent five-year statement tables
//! - `compose` - Flow document (PDF) and workbook (XLSX) composers
//! - `generation` - Request validation and routing to composers

pub mod catalog;
pub mod compose;
pub mod content;
pub mod financials;
pub mod generation;
pub mod subject;

pub use catalog::{OutputFormat, ReportArchetype, ReportCatalog, RequestedFormat, Section, SectionName};
pub use content::ContentResolver;
pub use financials::FinancialModelLibrary;
pub use generation::{GeneratedArtifact, GenerationError, GenerationRecord, ReportGenerator};
pub use subject::SubjectDirectory;
