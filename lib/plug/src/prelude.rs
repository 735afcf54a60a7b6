//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```
//! use plug::prelude::*;
//! ```

pub use crate::{
    Client, ContentType, Error, Exchange, Headers, Method, Middleware, Request, RequestBuilder,
    RequestNext, Response, ResponseNext, Result, StatusCode, Transport, TransportConfig,
    from_json, to_form, to_json,
};
pub use serde::{Deserialize, Serialize};
