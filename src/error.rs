use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("{backend} clipboard unavailable: {reason}")]
    Unavailable { backend: &'static str, reason: String },
    #[error("{backend} clipboard write failed: {reason}")]
    WriteFailed { backend: &'static str, reason: String },
    #[error("no clipboard utility found on PATH")]
    NoUtility,
    #[error("fallback copy disabled")]
    FallbackDisabled,
    #[error("clipboard copy failed ({primary}); fallback also failed ({fallback})")]
    Exhausted {
        primary: Box<ClipboardError>,
        fallback: Box<ClipboardError>,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tick interval must be between 1 and {max} ms, got {got}")]
    TickInterval { got: u64, max: u64 },
    #[error("results title must not be empty")]
    EmptyTitle,
    #[error("can't open log file {path}: {source}")]
    LogFile {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}
