use std::fmt;

use reqwest::StatusCode;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Json(serde_json::Error),
    Http(HttpError),
    Config(String),
    TokenResponse(String),
}

/// Failure reported by the HTTP transport while talking to the token endpoint.
#[derive(Debug)]
pub enum HttpError {
    /// The endpoint answered with a non-2xx status.
    Status { status: StatusCode, body: String },
    /// The request never produced a response (connect, TLS, read failures).
    Transport(reqwest::Error),
}

impl HttpError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            HttpError::Transport(err) => err.status(),
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            HttpError::Status { body, .. } => Some(body.as_str()),
            HttpError::Transport(_) => None,
        }
    }
}

impl Error {
    /// HTTP status carried by the error, if the transport got that far.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Http(err) => err.status(),
            _ => None,
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpError::Status { status, body } if body.is_empty() => {
                write!(f, "token endpoint returned {}", status)
            }
            HttpError::Status { status, body } => {
                write!(f, "token endpoint returned {}: {}", status, body)
            }
            HttpError::Transport(err) => write!(f, "token request failed: {}", err),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "io error: {}", err),
            Error::Json(err) => write!(f, "invalid token response body: {}", err),
            Error::Http(err) => write!(f, "{}", err),
            Error::Config(msg) => write!(f, "configuration error: {}", msg),
            Error::TokenResponse(msg) => write!(f, "invalid token response: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HttpError::Status { .. } => None,
            HttpError::Transport(err) => Some(err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::Http(err) => Some(err),
            Error::Config(_) | Error::TokenResponse(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<HttpError> for Error {
    fn from(err: HttpError) -> Self {
        Error::Http(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(HttpError::Transport(err))
    }
}
