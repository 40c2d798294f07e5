use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadinessError {
    #[error("input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed input {}: {message}", path.display())]
    Malformed { path: PathBuf, message: String },

    #[error("schema violation in record '{record}', field '{field}': {message}")]
    SchemaViolation {
        record: String,
        field: String,
        message: String,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ReadinessError {
    pub fn schema(
        record: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ReadinessError::SchemaViolation {
            record: record.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Process exit code the CLI reports for this error.
    ///
    /// `1` means the input could not be obtained, `3` means it was obtained
    /// but is not acceptable. Clap reserves `2` for usage errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReadinessError::InputNotFound(_)
            | ReadinessError::Unreadable { .. }
            | ReadinessError::Io(_) => 1,
            ReadinessError::Malformed { .. }
            | ReadinessError::SchemaViolation { .. }
            | ReadinessError::InvalidConfig(_) => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReadinessError>;
