use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LoadError>;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to open file: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON or a document of the wrong shape
    #[error("Failed to parse JSON{location}: {message}")]
    Json { location: String, message: String },

    /// Well-formed document with nothing in it
    #[error("No {what} parsed{location}")]
    Empty { what: &'static str, location: String },

    /// A record failed schema validation
    #[error("Invalid {field}{location}: {message}")]
    Invalid {
        field: String,
        message: String,
        location: String,
    },

    #[error("Failed to serialize path: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl LoadError {
    pub(crate) fn json(err: serde_json::Error) -> Self {
        let location = match err.line() {
            0 => String::new(),
            line => format!(" at line {} column {}", line, err.column()),
        };
        // serde_json appends the same position to its own message
        let message = err.to_string();
        let message = message.strip_suffix(&location).unwrap_or(&message).to_string();
        Self::Json { location, message }
    }

    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
            location: String::new(),
        }
    }

    /// Attach a file name to errors raised while parsing an in-memory buffer.
    pub(crate) fn in_source(self, source: &str) -> Self {
        let prefix = |location: String| format!(" in {}{}", source, location);
        match self {
            Self::Json { location, message } => Self::Json {
                location: prefix(location),
                message,
            },
            Self::Empty { what, location } => Self::Empty {
                what,
                location: prefix(location),
            },
            Self::Invalid {
                field,
                message,
                location,
            } => Self::Invalid {
                field,
                message,
                location: prefix(location),
            },
            other => other,
        }
    }
}
