//! Retry middleware for HTTP requests.
//!
//! Re-runs the rest of the request chain when the transport fails to produce
//! a response at all.

use tracing::warn;

use crate::{Error, Middleware, Request, RequestNext, Result};

/// Retries connection and timeout failures.
///
/// Only failures that happen before a response reaches this middleware are
/// retried. Once a response, whatever its status, has passed back through
/// here it counts as delivered, and a later error from a response hook
/// further out is returned without re-sending.
///
/// Place it after middleware that must run once per call (logging) and
/// before middleware that must run once per attempt (authentication with
/// short-lived tokens).
#[derive(Debug, Clone, Copy)]
pub struct Retry {
    max_retries: u32,
}

impl Retry {
    /// Create a retry middleware with the given maximum number of retries.
    #[must_use]
    pub const fn new(max_retries: u32) -> Self {
        Self { max_retries }
    }

    /// Maximum number of retries after the first attempt.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns `true` if the error should be retried.
    fn should_retry_error(error: &Error) -> bool {
        error.is_connection() || error.is_timeout()
    }
}

impl Middleware for Retry {
    fn name(&self) -> &str {
        "retry"
    }

    fn on_request(&self, request: Request, next: RequestNext<'_>) -> Result<()> {
        let mut attempt = 0;
        loop {
            let outcome = next.run_watched(request.clone());
            match outcome.result {
                Err(error)
                    if !outcome.delivered
                        && attempt < self.max_retries
                        && Self::should_retry_error(&error) =>
                {
                    attempt += 1;
                    warn!(
                        error = %error,
                        attempt,
                        max_retries = self.max_retries,
                        url = %request.url(),
                        "retrying request"
                    );
                }
                result => return result,
            }
        }
    }
}
