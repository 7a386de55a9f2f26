use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReltraceError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Engine '{engine}' rejected the dump: {source}")]
    Engine {
        engine: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReltraceError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type ReltraceResult<T> = Result<T, ReltraceError>;
