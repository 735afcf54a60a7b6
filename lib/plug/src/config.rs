//! Transport configuration types.
//!
//! [`TransportConfig`] can be built in code with [`TransportConfig::builder`]
//! or loaded from a JSON file. Every field of the file is optional:
//!
//! ```json
//! {
//!     "timeout_ms": 5000,
//!     "connect_timeout_ms": 1000,
//!     "pool_idle_timeout_ms": 90000,
//!     "pool_idle_per_host": 8,
//!     "http_version": "1.1",
//!     "verify_peer": true,
//!     "headers": ["Accept: application/json", "User-Agent: plug"]
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::{Error, Headers, Result};

/// HTTP protocol version the transport should speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpVersion {
    /// HTTP/1.0.
    Http10,
    /// HTTP/1.1.
    Http11,
    /// HTTP/2 only (prior knowledge on plain connections).
    Http2,
}

impl HttpVersion {
    /// Parses `"1.0"`, `"1.1"` or `"2.0"`. Anything else yields `None`.
    #[must_use]
    pub fn parse(version: &str) -> Option<Self> {
        match version.trim() {
            "1.0" => Some(Self::Http10),
            "1.1" => Some(Self::Http11),
            "2.0" => Some(Self::Http2),
            _ => None,
        }
    }
}

/// Configuration for the HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Request timeout duration.
    pub timeout: Duration,
    /// Connection timeout duration.
    pub connect_timeout: Duration,
    /// Maximum idle connections per host.
    pub pool_idle_per_host: usize,
    /// Idle connection timeout.
    pub pool_idle_timeout: Duration,
    /// Protocol version; `None` lets the transport negotiate.
    pub http_version: Option<HttpVersion>,
    /// Check the server certificate chain and host name on TLS connections.
    ///
    /// Turning this off accepts any certificate; only do that against hosts
    /// you control.
    pub verify_peer: bool,
    /// Headers added to requests that do not already carry them.
    pub default_headers: Headers,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
            http_version: None,
            verify_peer: true,
            default_headers: Headers::new(),
        }
    }
}

impl TransportConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> TransportConfigBuilder {
        TransportConfigBuilder::default()
    }

    /// Parse a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON of the expected shape,
    /// or if a header line has no `:` separator.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(json)?;
        file.into_builder().map(TransportConfigBuilder::build)
    }

    /// Load a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        debug!(path = %path.display(), ?config, "loaded transport config");
        Ok(config)
    }
}

/// On-disk shape of [`TransportConfig`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    timeout_ms: Option<u64>,
    connect_timeout_ms: Option<u64>,
    pool_idle_timeout_ms: Option<u64>,
    pool_idle_per_host: Option<usize>,
    http_version: Option<String>,
    verify_peer: Option<bool>,
    headers: Vec<String>,
}

impl ConfigFile {
    fn into_builder(self) -> Result<TransportConfigBuilder> {
        let mut builder = TransportConfig::builder();
        if let Some(ms) = self.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        if let Some(ms) = self.connect_timeout_ms {
            builder = builder.connect_timeout(Duration::from_millis(ms));
        }
        if let Some(ms) = self.pool_idle_timeout_ms {
            builder = builder.pool_idle_timeout(Duration::from_millis(ms));
        }
        if let Some(count) = self.pool_idle_per_host {
            builder = builder.pool_idle_per_host(count);
        }
        // Unknown versions are ignored, not rejected.
        if let Some(version) = self.http_version.as_deref().and_then(HttpVersion::parse) {
            builder = builder.http_version(version);
        }
        if let Some(verify) = self.verify_peer {
            builder = builder.verify_peer(verify);
        }
        for line in &self.headers {
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| Error::configuration(format!("malformed header line: {line:?}")))?;
            builder = builder.default_header(name.trim(), value.trim());
        }
        Ok(builder)
    }
}

/// Builder for [`TransportConfig`].
#[derive(Debug, Clone, Default)]
pub struct TransportConfigBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    pool_idle_per_host: Option<usize>,
    pool_idle_timeout: Option<Duration>,
    http_version: Option<HttpVersion>,
    verify_peer: Option<bool>,
    default_headers: Headers,
}

impl TransportConfigBuilder {
    /// Set the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.pool_idle_per_host = Some(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(timeout);
        self
    }

    /// Pin the protocol version.
    #[must_use]
    pub fn http_version(mut self, version: HttpVersion) -> Self {
        self.http_version = Some(version);
        self
    }

    /// Enable or disable TLS peer verification.
    #[must_use]
    pub fn verify_peer(mut self, verify: bool) -> Self {
        self.verify_peer = Some(verify);
        self
    }

    /// Add a default header.
    #[must_use]
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.append(name, value);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> TransportConfig {
        let defaults = TransportConfig::default();
        TransportConfig {
            timeout: self.timeout.unwrap_or(defaults.timeout),
            connect_timeout: self.connect_timeout.unwrap_or(defaults.connect_timeout),
            pool_idle_per_host: self
                .pool_idle_per_host
                .unwrap_or(defaults.pool_idle_per_host),
            pool_idle_timeout: self.pool_idle_timeout.unwrap_or(defaults.pool_idle_timeout),
            http_version: self.http_version.or(defaults.http_version),
            verify_peer: self.verify_peer.unwrap_or(defaults.verify_peer),
            default_headers: self.default_headers,
        }
    }
}
