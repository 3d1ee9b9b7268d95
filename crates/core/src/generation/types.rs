//! Generated artifacts and history records.

use chrono::{DateTime, Utc};
use nexus_shared::types::ReportId;
use serde::Serialize;

use crate::catalog::{OutputFormat, RequestedFormat};

/// Content type of an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MimeKind {
    /// `application/pdf`.
    Pdf,
    /// Office Open XML spreadsheet.
    Xlsx,
}

impl MimeKind {
    /// MIME type string.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Pdf => OutputFormat::FlowDocument.mime_type(),
            Self::Xlsx => OutputFormat::Workbook.mime_type(),
        }
    }
}

impl From<OutputFormat> for MimeKind {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::FlowDocument => Self::Pdf,
            OutputFormat::Workbook => Self::Xlsx,
        }
    }
}

/// A rendered report, owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// File name to offer for download, with extension.
    pub suggested_file_name: String,
    /// Content type.
    pub mime_kind: MimeKind,
    /// Container the bytes are in.
    pub format: OutputFormat,
    /// Format as requested (keeps the presentation alias).
    pub requested_format: RequestedFormat,
    /// Archetype id.
    pub archetype_id: String,
    /// Archetype display name.
    pub archetype_name: String,
    /// Subject display name.
    pub subject_name: String,
    /// Timestamp the report was generated for.
    pub generated_at: DateTime<Utc>,
    /// Container bytes.
    pub bytes: Vec<u8>,
}

impl GeneratedArtifact {
    /// Size of the container in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Metadata entry for the caller-owned list of generated reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRecord {
    /// Record id.
    pub id: ReportId,
    /// Archetype id, used for regeneration.
    pub archetype_id: String,
    /// `<subject name> <archetype name>`.
    pub display_name: String,
    /// Generation timestamp.
    pub created_at: DateTime<Utc>,
    /// Stored format; the presentation alias is recorded as `document`.
    pub format: RequestedFormat,
    /// Artifact size in bytes.
    pub size_bytes: usize,
}

impl GenerationRecord {
    /// Builds the history entry for a freshly generated artifact.
    #[must_use]
    pub fn for_artifact(artifact: &GeneratedArtifact) -> Self {
        let format = match artifact.requested_format {
            RequestedFormat::Presentation => RequestedFormat::Document,
            other => other,
        };
        Self {
            id: ReportId::new(),
            archetype_id: artifact.archetype_id.clone(),
            display_name: format!("{} {}", artifact.subject_name, artifact.archetype_name),
            created_at: artifact.generated_at,
            format,
            size_bytes: artifact.size(),
        }
    }
}
