//! Built-in middleware for the plug HTTP client.
//!
//! Every type here implements [`crate::Middleware`] and can be registered with
//! [`crate::ClientBuilder::with`] or one of the helper methods. Request hooks
//! run in registration order and response hooks in reverse, so the first
//! middleware registered is the outermost one.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `middleware-basic-auth` | [`BasicAuth`] and `.with_basic_auth()` (default) |
//!
//! # Available Middleware
//!
//! - [`Logging`] - Logs requests/responses using `tracing`
//! - [`BearerAuth`] - Sets `Authorization: Bearer <token>`
//! - [`BasicAuth`] - Sets `Authorization: Basic <base64>`
//! - [`DefaultHeaders`] - Adds headers the request does not carry yet
//! - [`Cache`] - Answers repeated safe requests from memory
//! - [`Retry`] - Re-sends after connection and timeout failures
//!
//! # Example
//!
//! ```
//! use plug::Client;
//!
//! let client = Client::builder()
//!     .hyper(Default::default())
//!     .with_logging()
//!     .with_retry(3)
//!     .with_bearer_auth("my-token")
//!     .build()?;
//!
//! let names: Vec<_> = client.middleware().names().collect();
//! assert_eq!(names, ["logging", "retry", "bearer-auth"]);
//! # Ok::<(), plug::Error>(())
//! ```

#[cfg(feature = "middleware-basic-auth")]
mod basic_auth;
mod bearer_auth;
mod cache;
mod default_headers;
mod logging;
mod retry;

#[cfg(feature = "middleware-basic-auth")]
pub use basic_auth::BasicAuth;
pub use bearer_auth::BearerAuth;
pub use cache::Cache;
pub use default_headers::DefaultHeaders;
pub use logging::{LogLevel, Logging};
pub use retry::Retry;
