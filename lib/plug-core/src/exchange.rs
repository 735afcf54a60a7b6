//! The (request, response) pair a pipeline run ends with.

use std::cell::RefCell;

use crate::{Request, Response, Result, TerminalReceive};

/// A completed exchange: the request as the transport saw it and the
/// response after every middleware had its turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    request: Request,
    response: Response,
}

impl Exchange {
    /// Pairs a request with its response.
    #[must_use]
    pub const fn new(request: Request, response: Response) -> Self {
        Self { request, response }
    }

    /// The final request.
    #[must_use]
    pub const fn request(&self) -> &Request {
        &self.request
    }

    /// The final response.
    #[must_use]
    pub const fn response(&self) -> &Response {
        &self.response
    }

    /// Consume into the response.
    #[must_use]
    pub fn into_response(self) -> Response {
        self.response
    }

    /// Consume into (request, response).
    #[must_use]
    pub fn into_parts(self) -> (Request, Response) {
        (self.request, self.response)
    }
}

/// Terminal receive that keeps the last exchange it was given.
///
/// A slot lives for one pipeline run and is owned by whoever started it, so
/// concurrent runs never see each other's exchanges. Receiving twice (a
/// retried chain) overwrites the earlier pair.
#[derive(Debug, Default)]
pub struct ExchangeSlot {
    last: RefCell<Option<Exchange>>,
}

impl ExchangeSlot {
    /// Creates an empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: RefCell::new(None),
        }
    }

    /// Takes the recorded exchange, leaving the slot empty.
    pub fn take(&self) -> Option<Exchange> {
        self.last.take()
    }

    /// Consume into the recorded exchange.
    #[must_use]
    pub fn into_inner(self) -> Option<Exchange> {
        self.last.into_inner()
    }
}

impl TerminalReceive for ExchangeSlot {
    fn receive(&self, request: Request, response: Response) -> Result<()> {
        self.last.replace(Some(Exchange::new(request, response)));
        Ok(())
    }
}
