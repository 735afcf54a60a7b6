//! # Tutorial: HTTP Calls Through a Middleware Chain
//!
//! Learn to send requests with plug and to shape them with middleware.
//!
//! ## Chapters
//!
//! 1. [Getting Started][chapter_0] - Your first client and request
//! 2. [Requests & Responses][chapter_1] - Headers, bodies, JSON, exchanges
//! 3. [Writing Middleware][chapter_2] - Request and response hooks
//! 4. [Configuration][chapter_3] - Transport settings and config files
//!
//! Ready? Start with [Chapter 0: Getting Started][chapter_0].

pub mod chapter_0;
pub mod chapter_1;
pub mod chapter_2;
pub mod chapter_3;
