//! # Chapter 3: Configuration
//!
//! ## In Code
//!
//! ```
//! use std::time::Duration;
//!
//! use plug::{Client, HttpVersion, TransportConfig};
//!
//! let config = TransportConfig::builder()
//!     .timeout(Duration::from_secs(5))
//!     .connect_timeout(Duration::from_secs(1))
//!     .http_version(HttpVersion::Http11)
//!     .default_header("User-Agent", "my-app/1.0")
//!     .build();
//!
//! let client = Client::with_config(config)?;
//! # Ok::<(), plug::Error>(())
//! ```
//!
//! ## From a File
//!
//! ```json
//! {
//!     "timeout_ms": 5000,
//!     "http_version": "2.0",
//!     "headers": ["Accept: application/json"]
//! }
//! ```
//!
//! ```no_run
//! let client = plug::Client::from_config_file("config/http-plug.conf.json")?;
//! # Ok::<(), plug::Error>(())
//! ```
//!
//! Missing fields keep their defaults. Unknown protocol versions are
//! ignored.
//!
//! ## Custom Transports
//!
//! Anything implementing [`Transport`](crate::Transport) can replace the
//! hyper transport, which is handy in tests:
//!
//! ```
//! use plug::{Client, Headers, Request, Response, Result, Transport};
//!
//! struct Canned;
//!
//! impl Transport for Canned {
//!     fn send(&self, _request: &Request) -> Result<Response> {
//!         Ok(Response::new(200, Headers::new(), "hello"))
//!     }
//! }
//!
//! let client = Client::builder().transport(Canned).build()?;
//! let response = client.get("https://example.com/", Headers::new())?;
//! assert_eq!(response.body().as_ref(), b"hello");
//! # Ok::<(), plug::Error>(())
//! ```
//!
//! ## Logging
//!
//! plug emits `tracing` events and installs no subscriber. Install one in
//! your binary to see them, for example with `tracing-subscriber`.
