//! CLI error types.

use logbook_config::ConfigError;
use logbook_site::ResolveError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Resolve(#[from] ResolveError),

    #[error("No document to render at {0:?}")]
    NotRenderable(String),
}
