//! Error types for the invoice CLI.

use std::path::PathBuf;

use invoice_core::CoreError;
use invoice_pdf::RenderError;

use crate::config::ConfigError;

/// Invoice CLI errors.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot read {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid form data in {}: {source}", .path.display())]
    ParseInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid invoice: {0}")]
    Invalid(#[from] CoreError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Cannot write {}: {source}", .path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    /// Message shown to the user when generation fails.
    pub fn user_message(&self) -> String {
        match self {
            CliError::Render(err) => err.user_message(),
            other => format!("Error generating PDF: {other}"),
        }
    }
}

/// Convenience type alias for Results with CliError.
pub type CliResult<T> = Result<T, CliError>;
