//! Basic authentication middleware.
//!
//! This middleware sets an `Authorization: Basic <base64(user:pass)>` header
//! on every outgoing request.

use std::fmt;
use std::sync::Arc;

use base64::Engine;

use crate::{Middleware, Request, RequestNext, Result};

/// Middleware that adds basic authentication to requests.
#[derive(Clone)]
pub struct BasicAuth {
    /// Base64-encoded "username:password".
    encoded_credentials: Arc<str>,
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("credentials", &"<redacted>")
            .finish()
    }
}

impl BasicAuth {
    /// Create a new basic auth middleware with the given username and password.
    pub fn new(username: impl AsRef<str>, password: impl AsRef<str>) -> Self {
        let credentials = format!("{}:{}", username.as_ref(), password.as_ref());
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
        Self {
            encoded_credentials: Arc::from(encoded),
        }
    }
}

impl Middleware for BasicAuth {
    fn name(&self) -> &str {
        "basic-auth"
    }

    fn on_request(&self, request: Request, next: RequestNext<'_>) -> Result<()> {
        next.run(request.with_header(
            "Authorization",
            format!("Basic {}", self.encoded_credentials),
        ))
    }
}
