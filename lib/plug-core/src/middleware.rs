//! The middleware unit contract.
//!
//! A [`Middleware`] sits between the caller and the transport with two hooks:
//!
//! - [`Middleware::on_request`] sees the request on the way in and decides
//!   whether (and with which request) to continue through [`RequestNext`].
//! - [`Middleware::on_response`] sees the exchange on the way out and decides
//!   whether (and with which response) to continue through [`ResponseNext`].
//!
//! Not calling the continuation short-circuits the chain. Both hooks default
//! to passing everything through unchanged, so a middleware only overrides
//! the side it cares about.
//!
//! # Example
//!
//! ```
//! use plug_core::{Middleware, Request, RequestNext, Result};
//!
//! struct UserAgent;
//!
//! impl Middleware for UserAgent {
//!     fn name(&self) -> &str {
//!         "user-agent"
//!     }
//!
//!     fn on_request(&self, request: Request, next: RequestNext<'_>) -> Result<()> {
//!         next.run(request.with_header("User-Agent", "plug/0.1"))
//!     }
//! }
//! ```

use std::sync::Arc;

use crate::{Request, RequestNext, Response, ResponseNext, Result};

/// An interceptor around a request/response exchange.
pub trait Middleware: Send + Sync {
    /// Name used in logs and error messages.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Before-send hook.
    ///
    /// Call `next.run(request)` to continue towards the transport. Errors
    /// returned by `next` carry transport and inner-middleware failures;
    /// propagate them with `?` or handle them here.
    fn on_request(&self, request: Request, next: RequestNext<'_>) -> Result<()> {
        next.run(request)
    }

    /// After-receive hook.
    ///
    /// Call `next.run(request, response)` to continue towards the caller.
    fn on_response(&self, request: Request, response: Response, next: ResponseNext<'_>) -> Result<()> {
        next.run(request, response)
    }
}

impl<M: Middleware + ?Sized> Middleware for Arc<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn on_request(&self, request: Request, next: RequestNext<'_>) -> Result<()> {
        (**self).on_request(request, next)
    }

    fn on_response(&self, request: Request, response: Response, next: ResponseNext<'_>) -> Result<()> {
        (**self).on_response(request, response, next)
    }
}

impl<M: Middleware + ?Sized> Middleware for Box<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn on_request(&self, request: Request, next: RequestNext<'_>) -> Result<()> {
        (**self).on_request(request, next)
    }

    fn on_response(&self, request: Request, response: Response, next: ResponseNext<'_>) -> Result<()> {
        (**self).on_response(request, response, next)
    }
}
