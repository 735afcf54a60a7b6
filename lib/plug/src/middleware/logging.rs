//! Request/response logging middleware.
//!
//! This middleware logs HTTP requests and responses using the `tracing` crate.

use std::time::Instant;

use tracing::{Level, debug, info, span, warn};

use crate::{Middleware, Request, RequestNext, Response, ResponseNext, Result};

/// Log level for the logging middleware.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Log at debug level (request/response details).
    Debug,
    /// Log at info level (summary only).
    #[default]
    Info,
}

/// Middleware that logs requests and responses.
///
/// Registered first, it sees the request as the caller built it and the
/// response as every other middleware left it.
///
/// # Example
///
/// ```
/// use plug::Client;
/// use plug::middleware::Logging;
///
/// let client = Client::builder()
///     .hyper(Default::default())
///     .with(Logging::debug())
///     .build()?;
/// assert_eq!(client.middleware().len(), 1);
/// # Ok::<(), plug::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Logging {
    level: LogLevel,
}

impl Logging {
    /// Create a logging middleware with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a logging middleware that logs at debug level, headers included.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }

    /// Configured level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }
}

impl Middleware for Logging {
    fn name(&self) -> &str {
        "logging"
    }

    fn on_request(&self, request: Request, next: RequestNext<'_>) -> Result<()> {
        let method = request.method();
        let url = request.url().to_string();
        let span = span!(Level::INFO, "http_request", %method, %url);
        let _entered = span.enter();

        match self.level {
            LogLevel::Debug => {
                debug!(
                    method = %method,
                    url = %url,
                    headers = ?request.headers(),
                    body_len = request.body().len(),
                    "sending request"
                );
            }
            LogLevel::Info => {
                info!(method = %method, url = %url, "sending request");
            }
        }

        let start = Instant::now();
        let result = next.run(request);

        // Saturating conversion to u64 (truncates after ~584 million years)
        let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        match &result {
            Ok(()) => debug!(elapsed_ms, "exchange completed"),
            Err(err) => warn!(error = %err, elapsed_ms, "request failed"),
        }

        result
    }

    fn on_response(&self, request: Request, response: Response, next: ResponseNext<'_>) -> Result<()> {
        let status = response.status();
        if response.is_success() {
            info!(status, "request completed");
        } else {
            warn!(status, "request failed with HTTP error");
        }
        if self.level == LogLevel::Debug {
            debug!(
                headers = ?response.headers(),
                body_len = response.body().len(),
                "response details"
            );
        }

        next.run(request, response)
    }
}
