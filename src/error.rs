//! Error handling for spacer validation operations.
//!
//! Every failure carries a short user-facing message plus optional details
//! (a joined list of field-level issues) so API consumers can render precise
//! diagnostics. The HTTP status mapping lives in the API layer.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpacerError {
    #[error("Bad request: {message}")]
    BadRequest {
        message: String,
        details: Option<String>,
    },

    #[error("Not found: {message}")]
    NotFound {
        message: String,
        details: Option<String>,
    },

    #[error("Conflict: {message}")]
    Conflict {
        message: String,
        details: Option<String>,
    },

    #[error("Unprocessable entity: {message}")]
    UnprocessableEntity {
        message: String,
        details: Option<String>,
    },

    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse error category, independent of transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    Conflict,
    UnprocessableEntity,
    Internal,
}

impl ErrorKind {
    /// Semantic error code in the `HttpError:<Kind>` format used by API clients
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "HttpError:BadRequest",
            ErrorKind::NotFound => "HttpError:404",
            ErrorKind::Conflict => "HttpError:Conflict",
            ErrorKind::UnprocessableEntity => "HttpError:UnprocessableEntity",
            ErrorKind::Internal => "HttpError:InternalServerError",
        }
    }
}

impl SpacerError {
    /// Create a bad request error without details
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            details: None,
        }
    }

    /// Create a bad request error with a detail list
    pub fn bad_request_with(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Create the aggregated validation failure
    pub fn validation_failed(errors: &[String]) -> Self {
        Self::bad_request_with("Data validation failed", errors.join("; "))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found_with(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            details: Some(details.into()),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
            details: None,
        }
    }

    pub fn conflict_with(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
            details: Some(details.into()),
        }
    }

    pub fn unprocessable(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::UnprocessableEntity {
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Wrap a storage failure with context
    pub fn storage(message: impl Into<String>, source: rusqlite::Error) -> Self {
        Self::Storage {
            message: message.into(),
            source,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BadRequest { .. } => ErrorKind::BadRequest,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::UnprocessableEntity { .. } => ErrorKind::UnprocessableEntity,
            Self::Storage { .. }
            | Self::Configuration { .. }
            | Self::Internal { .. }
            | Self::Io(_) => ErrorKind::Internal,
        }
    }

    /// User-facing message without the kind prefix
    pub fn message(&self) -> String {
        match self {
            Self::BadRequest { message, .. }
            | Self::NotFound { message, .. }
            | Self::Conflict { message, .. }
            | Self::UnprocessableEntity { message, .. }
            | Self::Storage { message, .. }
            | Self::Configuration { message }
            | Self::Internal { message } => message.clone(),
            Self::Io(err) => err.to_string(),
        }
    }

    pub fn details(&self) -> Option<&str> {
        match self {
            Self::BadRequest { details, .. }
            | Self::NotFound { details, .. }
            | Self::Conflict { details, .. }
            | Self::UnprocessableEntity { details, .. } => details.as_deref(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SpacerError>;
