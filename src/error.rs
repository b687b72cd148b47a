use http::{Method, StatusCode};
use std::{error::Error as StdError, fmt};
use thiserror::Error;
use url::Url;

pub type Result<T> = std::result::Result<T, Error>;

/// Controls how much of an unexpected response body is kept for diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct BodySnippetConfig {
    pub enabled: bool,
    pub max_bytes: usize,
}

impl Default for BodySnippetConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_bytes: 4096,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    Auth,
    NotFound,
    Conflict,
    RateLimited,
    Api,
    Transport,
    Decode,
    InvalidConfig,
    InvalidName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Other,
}

#[derive(Debug, Clone)]
pub struct HttpError {
    pub status: StatusCode,
    pub method: Method,
    pub service: Box<str>,
    /// Sanitized URL: no query/fragment/userinfo.
    pub url: Box<Url>,
    pub message: Option<Box<str>>,
    pub request_id: Option<Box<str>>,
    pub body_snippet: Option<Box<str>>,
}

impl HttpError {
    #[must_use]
    pub fn path(&self) -> &str {
        self.url.path()
    }
}

/// All errors returned by the client and its service transports.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("{0}")]
    Auth(HttpError),

    #[error("{0}")]
    NotFound(HttpError),

    #[error("{0}")]
    Conflict(HttpError),

    #[error("{0}")]
    RateLimited(HttpError),

    #[error("{0}")]
    Api(HttpError),

    #[error("Transport error during {method} {path} on service `{service}`: {source}")]
    Transport {
        method: Method,
        service: Box<str>,
        path: Box<str>,
        kind: TransportErrorKind,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("Decode error (HTTP {status}) during {method} {path} on service `{service}`: {source}")]
    Decode {
        status: StatusCode,
        method: Method,
        service: Box<str>,
        path: Box<str>,
        request_id: Option<Box<str>>,
        body_snippet: Option<Box<str>>,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        message: Box<str>,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    #[error("Invalid name `{name}`: {reason}")]
    InvalidName { name: Box<str>, reason: &'static str },
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Auth(_) => ErrorKind::Auth,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::RateLimited(_) => ErrorKind::RateLimited,
            Self::Api(_) => ErrorKind::Api,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::InvalidConfig { .. } => ErrorKind::InvalidConfig,
            Self::InvalidName { .. } => ErrorKind::InvalidName,
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Auth(e)
            | Self::NotFound(e)
            | Self::Conflict(e)
            | Self::RateLimited(e)
            | Self::Api(e) => Some(e.status),
            Self::Decode { status, .. } => Some(*status),
            Self::Transport { .. } | Self::InvalidConfig { .. } | Self::InvalidName { .. } => None,
        }
    }

    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Auth(e)
            | Self::NotFound(e)
            | Self::Conflict(e)
            | Self::RateLimited(e)
            | Self::Api(e) => e.request_id.as_deref(),
            Self::Decode { request_id, .. } => request_id.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Transport {
                kind: TransportErrorKind::Timeout,
                ..
            }
        )
    }

    pub(crate) fn from_http(error: HttpError) -> Self {
        match error.status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Auth(error),
            StatusCode::NOT_FOUND => Self::NotFound(error),
            StatusCode::CONFLICT | StatusCode::PRECONDITION_FAILED => Self::Conflict(error),
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited(error),
            _ => Self::Api(error),
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HTTP {} ({} {} on service `{}`)",
            self.status,
            self.method,
            self.path(),
            self.service
        )?;
        if let Some(message) = self.message.as_deref() {
            write!(f, ": {message}")?;
        }
        if let Some(request_id) = self.request_id.as_deref() {
            write!(f, " [request-id: {request_id}]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http_error(status: StatusCode) -> HttpError {
        HttpError {
            status,
            method: Method::POST,
            service: "jenkins".into(),
            url: Box::new(Url::parse("https://example.com/service/jenkins/job/a/enable").unwrap()),
            message: Some("nope".into()),
            request_id: Some("rid-1".into()),
            body_snippet: None,
        }
    }

    #[test]
    fn from_http_classifies_by_status() {
        assert_eq!(
            Error::from_http(http_error(StatusCode::FORBIDDEN)).kind(),
            ErrorKind::Auth
        );
        assert_eq!(
            Error::from_http(http_error(StatusCode::NOT_FOUND)).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            Error::from_http(http_error(StatusCode::PRECONDITION_FAILED)).kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            Error::from_http(http_error(StatusCode::TOO_MANY_REQUESTS)).kind(),
            ErrorKind::RateLimited
        );
        assert_eq!(
            Error::from_http(http_error(StatusCode::BAD_GATEWAY)).kind(),
            ErrorKind::Api
        );
    }

    #[test]
    fn http_error_display_mentions_service_and_request_id() {
        let err = Error::from_http(http_error(StatusCode::INTERNAL_SERVER_ERROR));
        let text = err.to_string();
        assert!(text.contains("/service/jenkins/job/a/enable"));
        assert!(text.contains("service `jenkins`"));
        assert!(text.contains("nope"));
        assert!(text.contains("[request-id: rid-1]"));
        assert_eq!(err.request_id(), Some("rid-1"));
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
