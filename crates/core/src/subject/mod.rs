//! Subject directory.
//!
//! Fixed list of companies reports can be generated for. The engine never
//! mutates subjects; it only looks them up.

use nexus_shared::types::Subject;

/// Sector assigned to subjects that cannot be resolved.
pub const UNKNOWN_SECTOR: &str = "Unknown";

/// Immutable directory of known subjects.
#[derive(Debug, Clone)]
pub struct SubjectDirectory {
    subjects: Vec<Subject>,
}

impl SubjectDirectory {
    /// Builds a directory from explicit subjects.
    #[must_use]
    pub const fn new(subjects: Vec<Subject>) -> Self {
        Self { subjects }
    }

    /// The standard company list.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![
            Subject::new("c1", "Acme Corporation", "Technology", "ACME"),
            Subject::new("c2", "Globex Industries", "Industrial", "GLBX"),
            Subject::new("c3", "Stark Industries", "Defense", "STRK"),
            Subject::new("c4", "Wayne Enterprises", "Conglomerate", "WAYN"),
            Subject::new("c5", "Umbrella Corp", "Pharmaceuticals", "UMB"),
            Subject::new("c6", "Cyberdyne Systems", "Technology", "CYBR"),
            Subject::new("c7", "Initech Solutions", "Software", "INIT"),
            Subject::new("c8", "Massive Dynamic", "Conglomerate", "MASS"),
            Subject::new("c9", "Soylent Corp", "Food & Beverage", "SOYL"),
            Subject::new("c10", "Hooli", "Technology", "HULI"),
        ])
    }

    /// All subjects in directory order.
    #[must_use]
    pub fn all(&self) -> &[Subject] {
        &self.subjects
    }

    /// Finds a subject by directory id.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    /// Subjects whose name or short code contains `query`, ignoring case.
    pub fn search<'a>(&'a self, query: &'a str) -> impl Iterator<Item = &'a Subject> + 'a {
        let query = query.trim();
        self.subjects.iter().filter(move |s| s.matches(query))
    }

    /// Resolves a subject from a display name on a best-effort basis.
    ///
    /// Tries an exact (case-insensitive) name match first, then a directory
    /// entry containing the first two words of `name`. Falls back to an
    /// ad-hoc subject with an unknown sector, so regeneration always has a
    /// subject to render.
    #[must_use]
    pub fn resolve_by_name(&self, name: &str) -> Subject {
        let name = name.trim();
        let lowered = name.to_lowercase();

        if let Some(subject) = self
            .subjects
            .iter()
            .find(|s| s.name.to_lowercase() == lowered)
        {
            return subject.clone();
        }

        let prefix = lowered.split_whitespace().take(2).collect::<Vec<_>>().join(" ");
        if !prefix.is_empty()
            && let Some(subject) = self
                .subjects
                .iter()
                .find(|s| s.name.to_lowercase().contains(&prefix))
        {
            return subject.clone();
        }

        tracing::debug!(name, "Subject not in directory, using ad-hoc subject");
        Subject::new(String::new(), name, UNKNOWN_SECTOR, String::new())
    }
}

impl Default for SubjectDirectory {
    fn default() -> Self {
        Self::standard()
    }
}
