//! Transport trait and the terminal send built on it.
//!
//! - [`Transport`] - Sends one request and returns its response
//! - [`TransportSend`] - The [`TerminalSend`] that calls a transport
//!
//! The chain resolver never talks to the network itself; the only I/O in a
//! pipeline run happens inside [`Transport::send`].

use std::sync::Arc;

use crate::{Request, Response, ResponseNext, Result, TerminalSend};

/// Something that can carry a request to a server and bring back a response.
///
/// Pooling, timeouts and protocol negotiation are the transport's business.
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails for any reason:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    /// - Invalid response
    fn send(&self, request: &Request) -> Result<Response>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, request: &Request) -> Result<Response> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: &Request) -> Result<Response> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &Request) -> Result<Response> {
        (**self).send(request)
    }
}

/// Terminal send that calls a [`Transport`] once, then continues the
/// response chain once with the exchange.
///
/// Transport errors are returned as they are, so they surface through every
/// enclosing `on_request` hook.
#[derive(Debug, Clone, Copy)]
pub struct TransportSend<T> {
    transport: T,
}

impl<T: Transport> TransportSend<T> {
    /// Wraps a transport.
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }
}

impl<T: Transport> TerminalSend for TransportSend<T> {
    fn send(&self, request: Request, next: ResponseNext<'_>) -> Result<()> {
        let response = self.transport.send(&request)?;
        next.run(request, response)
    }
}
