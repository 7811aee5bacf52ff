//! Errors surfaced by the `dragboard` binary.

use std::path::PathBuf;

use dragdrop::DragError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to read scenario {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scenario JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("drag failed: {0}")]
    Drag(#[from] DragError),
    #[error("config: {0}")]
    Config(String),
    #[error("scenario references unknown zone `{0}`")]
    UnknownZone(String),
    #[error("zone `{0}` is declared more than once")]
    DuplicateZone(String),
    #[error("drag of `{0}` did not start")]
    NotStarted(String),
}
