//! Report generator.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use nexus_shared::types::Subject;
use nexus_shared::{BrandingConfig, ReportsConfig};

use super::error::GenerationError;
use super::types::{GeneratedArtifact, MimeKind};
use crate::catalog::{OutputFormat, ReportCatalog, RequestedFormat};
use crate::compose::{Composer, CompositionContext, DocumentComposer, WorkbookComposer};
use crate::content::ContentResolver;
use crate::financials::FinancialModelLibrary;
use crate::subject::SubjectDirectory;

/// Validates generation requests and routes them to composers.
#[derive(Clone)]
pub struct ReportGenerator {
    catalog: Arc<ReportCatalog>,
    directory: Arc<SubjectDirectory>,
    composers: BTreeMap<OutputFormat, Arc<dyn Composer>>,
    file_name_separator: char,
}

impl ReportGenerator {
    /// Creates a generator with no composers registered.
    #[must_use]
    pub fn new(catalog: Arc<ReportCatalog>, directory: Arc<SubjectDirectory>) -> Self {
        Self {
            catalog,
            directory,
            composers: BTreeMap::new(),
            file_name_separator: ReportsConfig::default().file_name_separator,
        }
    }

    /// Registers the document and workbook composers over shared content.
    #[must_use]
    pub fn with_standard_composers(
        self,
        resolver: &Arc<ContentResolver>,
        library: &Arc<FinancialModelLibrary>,
        branding: &BrandingConfig,
    ) -> Self {
        self.with_composer(Arc::new(DocumentComposer::new(
            Arc::clone(resolver),
            Arc::clone(library),
            branding.clone(),
        )))
        .with_composer(Arc::new(WorkbookComposer::new(
            Arc::clone(resolver),
            Arc::clone(library),
            branding.clone(),
        )))
    }

    /// Registers a composer for its output format, replacing any previous one.
    #[must_use]
    pub fn with_composer(mut self, composer: Arc<dyn Composer>) -> Self {
        self.composers.insert(composer.output_format(), composer);
        self
    }

    /// Applies report settings from configuration.
    #[must_use]
    pub fn with_reports_config(mut self, config: &ReportsConfig) -> Self {
        self.file_name_separator = config.file_name_separator;
        self
    }

    /// The catalogue requests are validated against.
    #[must_use]
    pub fn catalog(&self) -> &ReportCatalog {
        &self.catalog
    }

    /// The subject directory used for lookup, search, and regeneration.
    #[must_use]
    pub fn directory(&self) -> &SubjectDirectory {
        &self.directory
    }

    /// Generates a report.
    ///
    /// Checks, in order, that the archetype exists, that a subject is given,
    /// and that the archetype allows the requested format. Identical inputs
    /// produce byte-identical artifacts.
    ///
    /// # Errors
    ///
    /// Returns the first failed check, or `CompositionFailure` if the
    /// composer cannot serialize the container.
    pub fn generate(
        &self,
        archetype_id: &str,
        subject: Option<&Subject>,
        format: RequestedFormat,
        generated_at: DateTime<Utc>,
    ) -> Result<GeneratedArtifact, GenerationError> {
        let archetype = self.catalog.archetype_by_id(archetype_id).map_err(|err| {
            tracing::warn!(archetype_id, "Unknown report archetype");
            GenerationError::from(err)
        })?;

        let Some(subject) = subject else {
            tracing::warn!(archetype_id, "Generation requested without a subject");
            return Err(GenerationError::SubjectRequired);
        };

        let output = format.output_format();
        if !ReportCatalog::is_request_allowed(archetype, format) {
            tracing::warn!(archetype_id, %format, "Format not allowed for archetype");
            return Err(GenerationError::FormatNotAllowed {
                archetype: archetype.id.clone(),
                format,
            });
        }

        let composer = self.composers.get(&output).ok_or_else(|| {
            tracing::error!(%output, "No composer registered");
            GenerationError::CompositionFailure(format!("no composer registered for {output}"))
        })?;

        let ctx = CompositionContext::new(archetype, subject, generated_at);
        let bytes = composer.compose(&ctx).map_err(|err| {
            tracing::error!(archetype_id, %output, error = %err, "Report composition failed");
            GenerationError::from(err)
        })?;

        let stem = suggested_file_stem(&subject.name, &archetype.name, self.file_name_separator);
        let artifact = GeneratedArtifact {
            suggested_file_name: format!("{stem}.{}", output.extension()),
            mime_kind: MimeKind::from(output),
            format: output,
            requested_format: format,
            archetype_id: archetype.id.clone(),
            archetype_name: archetype.name.clone(),
            subject_name: subject.name.clone(),
            generated_at,
            bytes,
        };

        tracing::info!(
            archetype_id,
            subject = %subject.name,
            %format,
            size = artifact.size(),
            "Report generated"
        );
        Ok(artifact)
    }

    /// Re-creates a previously generated report from its stored subject name.
    ///
    /// The subject is resolved on a best-effort basis (see
    /// [`SubjectDirectory::resolve_by_name`]); unknown names still render.
    ///
    /// # Errors
    ///
    /// As [`ReportGenerator::generate`]; a blank name is `SubjectRequired`.
    pub fn regenerate(
        &self,
        archetype_id: &str,
        subject_name: &str,
        format: RequestedFormat,
        generated_at: DateTime<Utc>,
    ) -> Result<GeneratedArtifact, GenerationError> {
        let subject = (!subject_name.trim().is_empty())
            .then(|| self.directory.resolve_by_name(subject_name));
        self.generate(archetype_id, subject.as_ref(), format, generated_at)
    }
}

impl std::fmt::Debug for ReportGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportGenerator")
            .field("archetypes", &self.catalog.archetypes().len())
            .field("composers", &self.composers.keys().collect::<Vec<_>>())
            .field("file_name_separator", &self.file_name_separator)
            .finish_non_exhaustive()
    }
}

/// `<subject>_<archetype>` with every whitespace run replaced by `separator`.
#[must_use]
pub fn suggested_file_stem(subject_name: &str, archetype_name: &str, separator: char) -> String {
    let raw = format!("{subject_name}{separator}{archetype_name}");
    let mut stem = String::with_capacity(raw.len());
    let mut in_whitespace = false;
    for ch in raw.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                stem.push(separator);
            }
            in_whitespace = true;
        } else {
            stem.push(ch);
            in_whitespace = false;
        }
    }
    stem
}
