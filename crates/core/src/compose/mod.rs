//! Report composition.
//!
//! A composer turns an archetype, a subject, and an ordered section list into
//! the bytes of one output container. Each composer first builds an in-memory
//! layout ([`FlowDocument`] or [`Workbook`]) and then serializes it, so the
//! structure can be inspected without parsing the container.
//!
//! Composition is pure: no clock reads, no I/O beyond the output buffer.

pub mod document;
pub mod error;
pub mod metrics;
pub mod pdf;
pub mod workbook;
pub mod xlsx;

#[cfg(test)]
mod workbook_tests;

use chrono::{DateTime, Utc};
use nexus_shared::types::Subject;

pub use document::{DocumentComposer, Element, FlowDocument, Page, PageKind};
pub use error::ComposeError;
pub use metrics::Font;
pub use workbook::{Cell, Sheet, Workbook, WorkbookComposer, sheet_name};

use crate::catalog::{OutputFormat, ReportArchetype, SectionName};

/// Inputs shared by every composer.
#[derive(Debug, Clone)]
pub struct CompositionContext<'a> {
    /// Archetype being rendered.
    pub archetype: &'a ReportArchetype,
    /// Subject the report is about.
    pub subject: &'a Subject,
    /// Sections in rendering order.
    pub sections: Vec<SectionName>,
    /// Timestamp printed on the cover; the only time input.
    pub generated_at: DateTime<Utc>,
}

impl<'a> CompositionContext<'a> {
    /// Context rendering every section of `archetype` in catalogue order.
    #[must_use]
    pub fn new(
        archetype: &'a ReportArchetype,
        subject: &'a Subject,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            archetype,
            subject,
            sections: archetype.sections.iter().copied().map(SectionName::from).collect(),
            generated_at,
        }
    }

    /// Replaces the section list.
    #[must_use]
    pub fn with_sections(mut self, sections: impl IntoIterator<Item = SectionName>) -> Self {
        self.sections = sections.into_iter().collect();
        self
    }

    /// Date printed on covers, e.g. `March 15, 2024`.
    #[must_use]
    pub fn display_date(&self) -> String {
        self.generated_at.format("%B %-d, %Y").to_string()
    }
}

/// Renders a report into one output container.
pub trait Composer: Send + Sync {
    /// Container this composer produces.
    fn output_format(&self) -> OutputFormat;

    /// Renders the report into container bytes.
    ///
    /// # Errors
    ///
    /// Returns `ComposeError` if the container cannot be serialized.
    fn compose(&self, ctx: &CompositionContext<'_>) -> Result<Vec<u8>, ComposeError>;
}
