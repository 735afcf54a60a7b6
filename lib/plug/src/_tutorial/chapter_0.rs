//! # Chapter 0: Getting Started
//!
//! Your first plug request in 5 minutes.
//!
//! ## What You'll Learn
//!
//! - Build a [`Client`](crate::Client)
//! - Send a `GET` request
//! - Read the response
//!
//! ## Prerequisites
//!
//! Add to `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! plug = "0.1"
//! ```
//!
//! ## Your First Request
//!
//! ```no_run
//! use plug::{Client, Headers};
//!
//! fn main() -> plug::Result<()> {
//!     let client = Client::new()?;
//!     let response = client.get("https://api.example.com/users/42", Headers::new())?;
//!
//!     println!("{} {}", response.status(), response.text().unwrap_or_default());
//!     Ok(())
//! }
//! ```
//!
//! Calls are blocking. From async code, move them to a blocking thread:
//!
//! ```ignore
//! let response = tokio::task::spawn_blocking(move || {
//!     client.get("https://api.example.com/users/42", Headers::new())
//! })
//! .await??;
//! ```
//!
//! ## What Happens on a Call
//!
//! ```text
//! client.get(..)
//!   └─ m0.on_request ─ m1.on_request ─ transport
//!                                         │
//!      exchange ◄─ m0.on_response ◄─ m1.on_response
//! ```
//!
//! Without middleware the request goes straight to the transport and the
//! response straight back to you.
//!
//! ## Next Steps
//!
//! Continue to [Chapter 1: Requests & Responses][super::chapter_1].
