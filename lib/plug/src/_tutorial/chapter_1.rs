//! # Chapter 1: Requests & Responses
//!
//! ## Verb Helpers
//!
//! `get` and `head` take a URL and headers; `post`, `put`, `patch` and
//! `delete` also take a body:
//!
//! ```no_run
//! use plug::{Client, Headers};
//!
//! let client = Client::new()?;
//! let headers = Headers::from([("Content-Type", "text/plain")]);
//! let response = client.post("https://api.example.com/notes", headers, "remember the milk")?;
//! assert!(response.is_success());
//! # Ok::<(), plug::Error>(())
//! ```
//!
//! ## Headers
//!
//! [`Headers`](crate::Headers) keeps every value in insertion order and
//! compares names case-insensitively:
//!
//! ```
//! use plug::Headers;
//!
//! let mut headers = Headers::new();
//! headers.append("Accept", "text/html");
//! headers.append("accept", "application/json");
//!
//! assert_eq!(headers.get_all("ACCEPT").count(), 2);
//! ```
//!
//! ## Building Requests
//!
//! For anything richer than the helpers, build a [`Request`](crate::Request)
//! and hand it to [`Client::execute`](crate::Client::execute):
//!
//! ```no_run
//! use plug::{Client, Method, Request};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct NewUser<'a> {
//!     name: &'a str,
//! }
//!
//! let client = Client::new()?;
//! let request = Request::builder(Method::Post, "https://api.example.com/users".parse()?)
//!     .query("notify", "true")
//!     .json(&NewUser { name: "Ada" })?
//!     .build();
//!
//! let exchange = client.execute(request)?;
//! println!("sent {:?}", exchange.request().headers());
//! # Ok::<(), plug::Error>(())
//! ```
//!
//! The [`Exchange`](crate::Exchange) holds the request exactly as it left
//! the middleware chain, so headers added by middleware are visible there.
//!
//! ## Reading JSON
//!
//! ```no_run
//! use plug::{Client, Headers};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! let client = Client::new()?;
//! let user: User = client.get("https://api.example.com/users/42", Headers::new())?.json()?;
//! println!("{} {}", user.id, user.name);
//! # Ok::<(), plug::Error>(())
//! ```
//!
//! Deserialization errors carry the JSON path of the offending field.
//!
//! ## Next Steps
//!
//! Continue to [Chapter 2: Writing Middleware][super::chapter_2].
