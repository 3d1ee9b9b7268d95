//! Report routes.
//!
//! Lists the archetype catalogue and renders reports. Generated artifacts are
//! returned as raw bytes; the history of generated reports stays with the
//! caller, which receives the record id in `X-Report-Id`.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderName, HeaderValue, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use nexus_core::{GeneratedArtifact, GenerationRecord, RequestedFormat};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{AppState, error::ApiError};

/// Header carrying the id of the history record for a generated artifact.
pub const REPORT_ID_HEADER: HeaderName = HeaderName::from_static("x-report-id");

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/archetypes", get(list_archetypes))
        .route("/reports/generate", post(generate_report))
        .route("/reports/regenerate", post(regenerate_report))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Catalogue entry as shown to callers.
#[derive(Debug, Serialize)]
pub struct ArchetypeResponse {
    /// Archetype id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Section titles in rendering order.
    pub sections: Vec<&'static str>,
    /// Formats a caller may request.
    pub formats: Vec<RequestedFormat>,
}

/// Request body for generating a report.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// Archetype id.
    pub archetype_id: String,
    /// Directory id of the subject.
    pub subject_id: Option<String>,
    /// Requested format.
    pub format: RequestedFormat,
}

/// Request body for re-creating a report from a history entry.
#[derive(Debug, Deserialize)]
pub struct RegenerateRequest {
    /// Archetype id stored with the entry.
    pub archetype_id: String,
    /// Subject name stored with the entry.
    pub subject_name: String,
    /// Stored format.
    pub format: RequestedFormat,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /reports/archetypes
async fn list_archetypes(State(state): State<AppState>) -> Json<Vec<ArchetypeResponse>> {
    let archetypes = state
        .generator
        .catalog()
        .archetypes()
        .iter()
        .map(|archetype| ArchetypeResponse {
            id: archetype.id.clone(),
            name: archetype.name.clone(),
            description: archetype.description.clone(),
            sections: archetype.sections.iter().map(|s| s.title()).collect(),
            formats: archetype.selectable_formats(),
        })
        .collect();
    Json(archetypes)
}

/// POST /reports/generate
async fn generate_report(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Response, ApiError> {
    // An unknown id counts as no selection.
    let subject = request.subject_id.as_deref().and_then(|id| {
        let found = state.generator.directory().find_by_id(id);
        if found.is_none() {
            warn!(subject_id = id, "Unknown subject id");
        }
        found
    });

    let artifact = state.generator.generate(
        &request.archetype_id,
        subject,
        request.format,
        Utc::now(),
    )?;
    Ok(artifact_response(&artifact))
}

/// POST /reports/regenerate
async fn regenerate_report(
    State(state): State<AppState>,
    Json(request): Json<RegenerateRequest>,
) -> Result<Response, ApiError> {
    let artifact = state.generator.regenerate(
        &request.archetype_id,
        &request.subject_name,
        request.format,
        Utc::now(),
    )?;
    Ok(artifact_response(&artifact))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn artifact_response(artifact: &GeneratedArtifact) -> Response {
    let record = GenerationRecord::for_artifact(artifact);
    info!(
        report_id = %record.id,
        display_name = %record.display_name,
        format = %record.format,
        size = record.size_bytes,
        "Serving generated report"
    );

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        header_safe_file_name(&artifact.suggested_file_name)
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("attachment"));
    let report_id = HeaderValue::from_str(&record.id.to_string())
        .unwrap_or_else(|_| HeaderValue::from_static(""));

    (
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static(artifact.mime_kind.mime_type()),
            ),
            (header::CONTENT_DISPOSITION, disposition),
            (REPORT_ID_HEADER, report_id),
        ],
        artifact.bytes.clone(),
    )
        .into_response()
}

/// Keeps a file name inside a quoted header parameter: printable ASCII only,
/// without quotes or backslashes.
fn header_safe_file_name(name: &str) -> String {
    name.chars()
        .map(|ch| match ch {
            '"' | '\\' => '_',
            ' '..='~' => ch,
            _ => '_',
        })
        .collect()
}
