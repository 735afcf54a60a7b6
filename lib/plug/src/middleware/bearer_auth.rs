//! Bearer token authentication middleware.
//!
//! This middleware sets an `Authorization: Bearer <token>` header on every
//! outgoing request, replacing any value the caller supplied.

use std::fmt;
use std::sync::Arc;

use crate::{Middleware, Request, RequestNext, Result};

/// Middleware that adds bearer token authentication to requests.
#[derive(Clone)]
pub struct BearerAuth {
    token: Arc<str>,
}

impl fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerAuth")
            .field("token", &"<redacted>")
            .finish()
    }
}

impl BearerAuth {
    /// Create a new bearer auth middleware with the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Arc::from(token.into()),
        }
    }
}

impl Middleware for BearerAuth {
    fn name(&self) -> &str {
        "bearer-auth"
    }

    fn on_request(&self, request: Request, next: RequestNext<'_>) -> Result<()> {
        next.run(request.with_header("Authorization", format!("Bearer {}", self.token)))
    }
}
