use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("SCHEMA: {0}")]
    Schema(String),
    #[error("QUERY: {0}")]
    Query(String),
    #[error("IO_FAILURE: {0}")]
    Io(String),
    #[error("INTERNAL: {0}")]
    Internal(String),
}

impl From<rusqlite::Error> for ReportError {
    fn from(value: rusqlite::Error) -> Self {
        match &value {
            rusqlite::Error::SqliteFailure(_, Some(message))
                if message.contains("no such table") || message.contains("no such column") =>
            {
                Self::Schema(message.clone())
            }
            _ => Self::Query(value.to_string()),
        }
    }
}

impl From<std::io::Error> for ReportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Internal(value.to_string())
    }
}

pub type ReportResult<T> = Result<T, ReportError>;
