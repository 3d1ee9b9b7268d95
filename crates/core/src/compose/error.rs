//! Composition error types.

use thiserror::Error;

/// Errors raised while serializing a composed report.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// The zip container could not be written.
    #[error("Container write failed: {0}")]
    Container(#[from] zip::result::ZipError),

    /// Writing into the output buffer failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
