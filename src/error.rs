use thiserror::Error;

/// Errors produced by the planner's model, editor and storage layers.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// The editor form cannot be saved as-is.
    #[error("{0}")]
    Validation(String),

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("no task with id '{0}'")]
    TaskNotFound(String),

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no data directory available on this platform")]
    NoDataDir,
}

pub type Result<T> = std::result::Result<T, PlannerError>;
