//! Error types for the Parley SDK.
//!
//! This module defines the error type system for handling all possible
//! failures that can occur when talking to the Parley chatbot backend, plus
//! the [`ErrorKind`] taxonomy that drives retry decisions and the fixed
//! user-facing messages surfaced by chat frontends.

use std::error;
use std::fmt;
use std::io;
use std::sync::Arc;

/// The main error type for the Parley SDK.
#[derive(Clone, Debug)]
pub enum Error {
    /// A generic API error occurred.
    Api {
        /// HTTP status code.
        status_code: u16,
        /// Error type string from the API.
        error_type: Option<String>,
        /// Human-readable error message.
        message: String,
    },

    /// Request parameters failed validation before or at the server.
    Validation {
        /// Human-readable error message.
        message: String,
        /// Parameter that failed validation.
        param: Option<String>,
    },

    /// Resource not found.
    NotFound {
        /// Human-readable error message.
        message: String,
        /// The path that was requested.
        path: Option<String>,
    },

    /// Rate limit exceeded.
    RateLimit {
        /// Human-readable error message.
        message: String,
        /// Time to wait before retrying, in seconds.
        retry_after: Option<u64>,
    },

    /// An attempt exceeded the request time ceiling.
    Timeout {
        /// Human-readable error message.
        message: String,
        /// The client-side attempt ceiling in seconds. `None` when the
        /// timeout was reported by the server as HTTP 408 rather than
        /// measured locally.
        duration: Option<f64>,
    },

    /// No response was received at all.
    Connection {
        /// Human-readable error message.
        message: String,
        /// Underlying cause.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// Server returned a 500 internal error.
    InternalServer {
        /// Human-readable error message.
        message: String,
    },

    /// Server is overloaded or unavailable.
    ServiceUnavailable {
        /// Human-readable error message.
        message: String,
        /// Time to wait before retrying, in seconds.
        retry_after: Option<u64>,
    },

    /// Error during JSON serialization or deserialization.
    Serialization {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// I/O error.
    Io {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Arc<io::Error>,
    },

    /// HTTP client error.
    HttpClient {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// A URL parsing or manipulation error.
    Url {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<url::ParseError>,
    },

    /// Unknown error.
    Unknown {
        /// Human-readable error message.
        message: String,
    },
}

/// The coarse classification of an [`Error`].
///
/// Each error maps onto exactly one kind. The kind determines both whether
/// the client retries the request internally and which fixed message a
/// frontend shows to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or empty input, unknown persona id, or HTTP 400.
    Validation,
    /// An attempt exceeded the time ceiling.
    Timeout,
    /// No response was reachable at all.
    Network,
    /// HTTP 404.
    NotFound,
    /// HTTP 429.
    RateLimit,
    /// HTTP 500 and above.
    Server,
    /// Anything else.
    Unknown,
}

impl ErrorKind {
    /// Returns the fixed user-facing message for this kind.
    pub fn user_message(self) -> &'static str {
        match self {
            ErrorKind::Validation => "Invalid request data.",
            ErrorKind::Timeout => "Request timeout.",
            ErrorKind::Network => "Network error, check connection.",
            ErrorKind::NotFound => "Requested resource not found.",
            ErrorKind::RateLimit => "Too many requests, wait and retry.",
            ErrorKind::Server => "Server error.",
            ErrorKind::Unknown => "Something went wrong.",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Network => "network",
            ErrorKind::NotFound => "not_found",
            ErrorKind::RateLimit => "rate_limit",
            ErrorKind::Server => "server",
            ErrorKind::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

impl Error {
    /// Creates a new API error.
    pub fn api(status_code: u16, error_type: Option<String>, message: String) -> Self {
        Error::Api {
            status_code,
            error_type,
            message,
        }
    }

    /// Creates a new validation error.
    pub fn validation(message: impl Into<String>, param: Option<String>) -> Self {
        Error::Validation {
            message: message.into(),
            param,
        }
    }

    /// Creates a new not found error.
    pub fn not_found(message: impl Into<String>, path: Option<String>) -> Self {
        Error::NotFound {
            message: message.into(),
            path,
        }
    }

    /// Creates a new rate limit error.
    pub fn rate_limit(message: impl Into<String>, retry_after: Option<u64>) -> Self {
        Error::RateLimit {
            message: message.into(),
            retry_after,
        }
    }

    /// Creates a new timeout error.
    pub fn timeout(message: impl Into<String>, duration: Option<f64>) -> Self {
        Error::Timeout {
            message: message.into(),
            duration,
        }
    }

    /// Creates a new connection error.
    pub fn connection(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::Connection {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new internal server error.
    pub fn internal_server(message: impl Into<String>) -> Self {
        Error::InternalServer {
            message: message.into(),
        }
    }

    /// Creates a new service unavailable error.
    pub fn service_unavailable(message: impl Into<String>, retry_after: Option<u64>) -> Self {
        Error::ServiceUnavailable {
            message: message.into(),
            retry_after,
        }
    }

    /// Creates a new serialization error.
    pub fn serialization(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::Serialization {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new I/O error.
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Error::Io {
            message: message.into(),
            source: Arc::new(source),
        }
    }

    /// Creates a new HTTP client error.
    pub fn http_client(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::HttpClient {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new URL error.
    pub fn url(message: impl Into<String>, source: Option<url::ParseError>) -> Self {
        Error::Url {
            message: message.into(),
            source,
        }
    }

    /// Creates a new unknown error.
    pub fn unknown(message: impl Into<String>) -> Self {
        Error::Unknown {
            message: message.into(),
        }
    }

    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation { .. } => ErrorKind::Validation,
            Error::Timeout { .. } => ErrorKind::Timeout,
            Error::Connection { .. } => ErrorKind::Network,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::RateLimit { .. } => ErrorKind::RateLimit,
            Error::InternalServer { .. } | Error::ServiceUnavailable { .. } => ErrorKind::Server,
            Error::Api { status_code, .. } if *status_code >= 500 => ErrorKind::Server,
            _ => ErrorKind::Unknown,
        }
    }

    /// Returns the fixed user-facing message for this error.
    pub fn user_message(&self) -> &'static str {
        self.kind().user_message()
    }

    /// Returns true if this error is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    /// Returns true if this error is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Returns true if this error is related to rate limiting.
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Error::RateLimit { .. })
    }

    /// Returns true if this error is a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }

    /// Returns true if this error is a connection error.
    pub fn is_connection(&self) -> bool {
        matches!(self, Error::Connection { .. })
    }

    /// Returns true if this error is a server error.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            Error::InternalServer { .. } | Error::ServiceUnavailable { .. }
        )
    }

    /// Returns true if the client may retry the request that produced this
    /// error.
    ///
    /// Retryable failures are those where the server never produced a usable
    /// answer: timeouts, connection failures, and 5xx responses. All 4xx
    /// responses, including rate limits, are terminal; the caller decides
    /// whether to offer a user-initiated retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Api { status_code, .. } => *status_code >= 500,
            Error::Timeout { .. } => true,
            Error::Connection { .. } => true,
            Error::InternalServer { .. } => true,
            Error::ServiceUnavailable { .. } => true,
            _ => false,
        }
    }

    /// Returns true if this error indicates the server could not be reached
    /// at the network layer.
    ///
    /// Only these failures flip the connection tracker to unreachable; an
    /// HTTP response of any status proves the server is reachable. That
    /// includes HTTP 408, which classifies as a timeout but carries no
    /// locally measured duration.
    pub fn is_network_layer(&self) -> bool {
        match self {
            Error::Timeout { duration, .. } => duration.is_some(),
            Error::Connection { .. } => true,
            _ => false,
        }
    }

    /// Returns the status code associated with this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api { status_code, .. } => Some(*status_code),
            Error::NotFound { .. } => Some(404),
            Error::RateLimit { .. } => Some(429),
            Error::InternalServer { .. } => Some(500),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Api {
                message,
                error_type,
                status_code,
            } => {
                if let Some(error_type) = error_type {
                    write!(f, "{error_type}: {message} (HTTP {status_code})")
                } else {
                    write!(f, "API error: {message} (HTTP {status_code})")
                }
            }
            Error::Validation { message, param } => {
                if let Some(param) = param {
                    write!(f, "Validation error: {message} (parameter: {param})")
                } else {
                    write!(f, "Validation error: {message}")
                }
            }
            Error::NotFound { message, path } => {
                if let Some(path) = path {
                    write!(f, "Resource not found: {message} [{path}]")
                } else {
                    write!(f, "Resource not found: {message}")
                }
            }
            Error::RateLimit {
                message,
                retry_after,
            } => {
                if let Some(retry_after) = retry_after {
                    write!(
                        f,
                        "Rate limit exceeded: {message} (retry after {retry_after} seconds)"
                    )
                } else {
                    write!(f, "Rate limit exceeded: {message}")
                }
            }
            Error::Timeout { message, duration } => {
                if let Some(duration) = duration {
                    write!(f, "Timeout error: {message} ({duration} seconds)")
                } else {
                    write!(f, "Timeout error: {message}")
                }
            }
            Error::Connection { message, .. } => {
                write!(f, "Connection error: {message}")
            }
            Error::InternalServer { message } => {
                write!(f, "Internal server error: {message}")
            }
            Error::ServiceUnavailable {
                message,
                retry_after,
            } => {
                if let Some(retry_after) = retry_after {
                    write!(
                        f,
                        "Service unavailable: {message} (retry after {retry_after} seconds)"
                    )
                } else {
                    write!(f, "Service unavailable: {message}")
                }
            }
            Error::Serialization { message, .. } => {
                write!(f, "Serialization error: {message}")
            }
            Error::Io { message, .. } => {
                write!(f, "I/O error: {message}")
            }
            Error::HttpClient { message, .. } => {
                write!(f, "HTTP client error: {message}")
            }
            Error::Url { message, .. } => {
                write!(f, "URL error: {message}")
            }
            Error::Unknown { message } => {
                write!(f, "Unknown error: {message}")
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Connection { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::Serialization { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::Io { source, .. } => Some(source),
            Error::HttpClient { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::Url { source, .. } => {
                source.as_ref().map(|e| e as &(dyn error::Error + 'static))
            }
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::io(err.to_string(), err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::serialization(format!("JSON error: {err}"), Some(Box::new(err)))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::url(format!("URL parse error: {err}"), Some(err))
    }
}

/// A specialized Result type for Parley operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_taxonomy() {
        assert_eq!(
            Error::validation("empty message", None).kind(),
            ErrorKind::Validation
        );
        assert_eq!(Error::timeout("slow", None).kind(), ErrorKind::Timeout);
        assert_eq!(Error::connection("refused", None).kind(), ErrorKind::Network);
        assert_eq!(Error::not_found("nope", None).kind(), ErrorKind::NotFound);
        assert_eq!(
            Error::rate_limit("slow down", Some(30)).kind(),
            ErrorKind::RateLimit
        );
        assert_eq!(Error::internal_server("boom").kind(), ErrorKind::Server);
        assert_eq!(
            Error::service_unavailable("overloaded", None).kind(),
            ErrorKind::Server
        );
        assert_eq!(
            Error::api(502, None, "bad gateway".to_string()).kind(),
            ErrorKind::Server
        );
        assert_eq!(
            Error::api(418, None, "teapot".to_string()).kind(),
            ErrorKind::Unknown
        );
        assert_eq!(Error::unknown("mystery").kind(), ErrorKind::Unknown);
    }

    #[test]
    fn user_messages_are_fixed() {
        assert_eq!(
            Error::validation("x", None).user_message(),
            "Invalid request data."
        );
        assert_eq!(Error::timeout("x", None).user_message(), "Request timeout.");
        assert_eq!(
            Error::connection("x", None).user_message(),
            "Network error, check connection."
        );
        assert_eq!(
            Error::not_found("x", None).user_message(),
            "Requested resource not found."
        );
        assert_eq!(
            Error::rate_limit("x", None).user_message(),
            "Too many requests, wait and retry."
        );
        assert_eq!(Error::internal_server("x").user_message(), "Server error.");
        assert_eq!(Error::unknown("x").user_message(), "Something went wrong.");
    }

    #[test]
    fn retryable_follows_taxonomy() {
        assert!(Error::timeout("x", None).is_retryable());
        assert!(Error::connection("x", None).is_retryable());
        assert!(Error::internal_server("x").is_retryable());
        assert!(Error::service_unavailable("x", None).is_retryable());
        assert!(Error::api(503, None, "x".to_string()).is_retryable());

        assert!(!Error::validation("x", None).is_retryable());
        assert!(!Error::not_found("x", None).is_retryable());
        assert!(!Error::rate_limit("x", None).is_retryable());
        assert!(!Error::unknown("x").is_retryable());
    }

    #[test]
    fn network_layer_failures_only() {
        assert!(Error::timeout("x", Some(30.0)).is_network_layer());
        assert!(Error::connection("x", None).is_network_layer());
        // A server-reported 408 is an HTTP response, not a network failure.
        assert!(!Error::timeout("x", None).is_network_layer());
        assert!(!Error::internal_server("x").is_network_layer());
        assert!(!Error::not_found("x", None).is_network_layer());
    }
}
