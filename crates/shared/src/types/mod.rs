//! Common types used across the application.

pub mod id;
pub mod money;
pub mod subject;

pub use id::ReportId;
pub use money::{format_compact, format_grouped, format_percent};
pub use subject::Subject;
