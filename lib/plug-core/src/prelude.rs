//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use plug_core::prelude::*;
//! ```

pub use crate::{
    ContentType, Error, Exchange, Headers, Method, Middleware, MiddlewareStack, Request,
    RequestBuilder, RequestNext, Response, ResponseNext, Result, Transport, from_json, to_form,
    to_json,
};
