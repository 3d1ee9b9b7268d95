//! Subject directory routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use nexus_shared::types::Subject;
use serde::Deserialize;

use crate::AppState;

/// Creates the subject routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/subjects", get(search_subjects))
}

/// Query parameters for subject search.
#[derive(Debug, Default, Deserialize)]
pub struct SubjectQuery {
    /// Case-insensitive substring of the name or short code.
    pub search: Option<String>,
}

/// GET /subjects?search=
async fn search_subjects(
    State(state): State<AppState>,
    Query(query): Query<SubjectQuery>,
) -> Json<Vec<Subject>> {
    let search = query.search.unwrap_or_default();
    Json(state.generator.directory().search(&search).cloned().collect())
}
