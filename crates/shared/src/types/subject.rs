//! Report subjects (companies and deals).

use serde::{Deserialize, Serialize};

/// A company or deal a report is generated for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subject {
    /// Directory identifier (e.g. `c1`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Industry sector.
    pub sector: String,
    /// Ticker-style short code.
    pub short_code: String,
}

impl Subject {
    /// Creates a new subject.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        sector: impl Into<String>,
        short_code: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sector: sector.into(),
            short_code: short_code.into(),
        }
    }

    /// Returns true if the query matches the name or short code, ignoring case.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.short_code.to_lowercase().contains(&query)
    }
}
