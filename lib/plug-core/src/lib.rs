//! Core types and middleware chain resolver for the plug HTTP client.
//!
//! This crate provides the foundational types used by plug:
//! - [`Method`] - HTTP method enum
//! - [`Headers`] - Ordered, case-insensitive header multimap
//! - [`Request`] and [`RequestBuilder`] - Immutable HTTP request
//! - [`Response`] - Immutable HTTP response
//! - [`Error`] and [`Result`] - Error handling
//! - [`Middleware`] - Interceptor with before-send and after-receive hooks
//! - [`MiddlewareStack`] and [`Pipeline`] - Chain resolution around the
//!   [`TerminalSend`] and [`TerminalReceive`] callbacks
//! - [`Transport`] - Where requests actually leave the process
//! - [`Exchange`] and [`ExchangeSlot`] - The pair a pipeline run ends with
//! - [`StatusCode`] - HTTP status codes (re-exported from `http` crate)

mod body;
mod chain;
mod error;
mod exchange;
mod headers;
mod method;
mod middleware;
pub mod prelude;
mod request;
mod response;
mod transport;

pub use body::{ContentType, from_json, to_form, to_json};
pub use chain::{
    Attempt, MiddlewareStack, Pipeline, PipelineBuilder, RequestNext, ResponseNext,
    TerminalReceive, TerminalSend,
};
pub use error::{Error, Result};
pub use exchange::{Exchange, ExchangeSlot};
pub use headers::Headers;
pub use method::Method;
pub use middleware::Middleware;
pub use request::{Request, RequestBuilder};
pub use response::Response;
pub use transport::{Transport, TransportSend};

// Re-export http crate status codes
pub use http::StatusCode;
