use thiserror::Error;

use bough::TreeError;

/// Errors that stop the demo.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("Usage: bough-demo <tree.json>")]
    Usage,

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid document: {0}")]
    Document(#[from] serde_json::Error),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("Terminal error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
