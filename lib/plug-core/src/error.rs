//! Error types for plug.
//!
//! The chain resolver never catches anything: whatever a hook, the transport
//! or a terminal callback returns as `Err` travels unchanged back to the
//! caller of [`crate::Pipeline::call`].

use derive_more::{Display, Error, From};

/// Main error type for plug operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Missing or inconsistent wiring, such as a pipeline without terminals
    /// or a client without a transport.
    #[display("configuration error: {_0}")]
    #[from(skip)]
    Configuration(#[error(not(source))] String),

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// Invalid request.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// Failure raised by a middleware hook.
    #[display("middleware '{name}' failed: {message}")]
    #[from(skip)]
    Middleware {
        /// Name of the failing middleware.
        name: String,
        /// Error message.
        message: String,
    },

    /// The chain finished without any response reaching the terminal receiver.
    #[display("middleware chain completed without a response")]
    #[from(skip)]
    NoResponse,

    /// JSON serialization or config parsing error.
    #[display("JSON error: {_0}")]
    #[from]
    Json(serde_json::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "user.address.city").
        path: String,
        /// Error message.
        message: String,
    },

    /// Form URL-encoded serialization error.
    #[display("form serialization error: {_0}")]
    #[from]
    FormSerialization(serde_html_form::ser::Error),

    /// I/O error, e.g. while reading a config file.
    #[display("I/O error: {_0}")]
    #[from]
    Io(std::io::Error),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a middleware error.
    #[must_use]
    pub fn middleware(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Middleware {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this is a configuration error.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns `true` if the error comes from the transport layer.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Tls(_) | Self::Timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(Error::Timeout.to_string(), "request timeout");
        assert_eq!(
            Error::connection("failed to connect").to_string(),
            "connection error: failed to connect"
        );
        assert_eq!(
            Error::configuration("terminal receive callback not set").to_string(),
            "configuration error: terminal receive callback not set"
        );
        assert_eq!(
            Error::middleware("cache", "poisoned").to_string(),
            "middleware 'cache' failed: poisoned"
        );
        assert_eq!(
            Error::NoResponse.to_string(),
            "middleware chain completed without a response"
        );
    }

    #[test]
    fn error_predicates() {
        assert!(Error::Timeout.is_timeout());
        assert!(Error::Timeout.is_transport());
        assert!(Error::connection("refused").is_connection());
        assert!(Error::tls("bad cert").is_transport());
        assert!(Error::configuration("no transport").is_configuration());
        assert!(!Error::middleware("auth", "denied").is_transport());
    }

    #[test]
    fn error_from_url_parse() {
        let err: Error = url::Url::parse("not a url").expect_err("invalid").into();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn error_from_io() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert_eq!(err.to_string(), "I/O error: missing");
    }
}
