//! Middleware chain resolution.
//!
//! [`MiddlewareStack::resolve`] composes the registered middleware with two
//! terminal callbacks into a [`Pipeline`]:
//!
//! - the request chain runs the `on_request` hooks in registration order and
//!   ends in [`TerminalSend`], which talks to the transport;
//! - the response chain runs the `on_response` hooks in reverse registration
//!   order and ends in [`TerminalReceive`], which records the final exchange.
//!
//! For middleware registered as `[a, b]` a full run is:
//!
//! ```text
//! a.on_request -> b.on_request -> send -> b.on_response -> a.on_response -> receive
//! ```
//!
//! Continuations are plain index cursors over the borrowed middleware slice,
//! so resolving a pipeline allocates nothing. Everything runs on the calling
//! thread; `Pipeline::call` returns once the chain has unwound.

use std::cell::Cell;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::{Error, Middleware, Request, Response, Result};

/// Innermost request-side callback, adjacent to the transport.
///
/// Implementations send the request and then hand the exchange to `next`
/// exactly once.
pub trait TerminalSend {
    /// Sends `request` and continues the response chain.
    fn send(&self, request: Request, next: ResponseNext<'_>) -> Result<()>;
}

/// Innermost response-side callback, reached once the response chain unwinds.
pub trait TerminalReceive {
    /// Records the final exchange.
    fn receive(&self, request: Request, response: Response) -> Result<()>;
}

impl<T: TerminalSend + ?Sized> TerminalSend for &T {
    fn send(&self, request: Request, next: ResponseNext<'_>) -> Result<()> {
        (**self).send(request, next)
    }
}

impl<T: TerminalReceive + ?Sized> TerminalReceive for &T {
    fn receive(&self, request: Request, response: Response) -> Result<()> {
        (**self).receive(request, response)
    }
}

// ============================================================================
// Middleware Stack
// ============================================================================

/// Ordered list of middleware, kept exactly as registered.
#[derive(Clone, Default)]
pub struct MiddlewareStack {
    middlewares: Vec<Arc<dyn Middleware>>,
}

impl fmt::Debug for MiddlewareStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl MiddlewareStack {
    /// Creates an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            middlewares: Vec::new(),
        }
    }

    /// Appends a middleware; it wraps nothing registered before it and
    /// everything registered after it.
    pub fn push(&mut self, middleware: impl Middleware + 'static) {
        self.middlewares.push(Arc::new(middleware));
    }

    /// Appends an already shared middleware.
    pub fn push_shared(&mut self, middleware: Arc<dyn Middleware>) {
        self.middlewares.push(middleware);
    }

    /// Builder-style [`MiddlewareStack::push`].
    #[must_use]
    pub fn with(mut self, middleware: impl Middleware + 'static) -> Self {
        self.push(middleware);
        self
    }

    /// Number of registered middleware.
    #[must_use]
    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }

    /// Middleware names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.middlewares.iter().map(|middleware| middleware.name())
    }

    /// Composes the stack around the two terminal callbacks.
    ///
    /// The stack is only borrowed; resolving again (for the next request)
    /// sees the same middleware in the same order.
    #[must_use]
    pub fn resolve<'a>(
        &'a self,
        send: &'a dyn TerminalSend,
        receive: &'a dyn TerminalReceive,
    ) -> Pipeline<'a> {
        Pipeline {
            links: Links {
                middlewares: &self.middlewares,
                send,
                receive,
                watch: None,
            },
        }
    }

    /// Starts a [`PipelineBuilder`] for when the terminals are chosen later.
    #[must_use]
    pub fn pipeline(&self) -> PipelineBuilder<'_> {
        PipelineBuilder {
            stack: self,
            send: None,
            receive: None,
        }
    }
}

impl<M: Middleware + 'static> FromIterator<M> for MiddlewareStack {
    fn from_iter<I: IntoIterator<Item = M>>(iter: I) -> Self {
        let mut stack = Self::new();
        for middleware in iter {
            stack.push(middleware);
        }
        stack
    }
}

// ============================================================================
// Pipeline
// ============================================================================

#[derive(Clone, Copy)]
struct Links<'a> {
    middlewares: &'a [Arc<dyn Middleware>],
    send: &'a dyn TerminalSend,
    receive: &'a dyn TerminalReceive,
    watch: Option<&'a Watch<'a>>,
}

impl Links<'_> {
    /// The response chain is at `position`: every middleware at or after it
    /// is done with the response.
    fn reached(&self, position: usize) {
        let mut watch = self.watch;
        while let Some(current) = watch {
            if position <= current.boundary {
                current.delivered.set(true);
            }
            watch = current.outer;
        }
    }
}

/// Delivery flag of one [`RequestNext::run_watched`] call.
struct Watch<'a> {
    boundary: usize,
    delivered: Cell<bool>,
    outer: Option<&'a Watch<'a>>,
}

/// Outcome of [`RequestNext::run_watched`].
#[derive(Debug)]
pub struct Attempt {
    /// What the rest of the chain returned.
    pub result: Result<()>,
    /// Whether a response got back past the watching middleware, either
    /// through the response chain or by a short circuit.
    pub delivered: bool,
}

/// A resolved chain, ready to run requests.
#[derive(Clone, Copy)]
pub struct Pipeline<'a> {
    links: Links<'a>,
}

impl fmt::Debug for Pipeline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("middlewares", &self.links.middlewares.len())
            .finish_non_exhaustive()
    }
}

impl<'a> Pipeline<'a> {
    /// Runs `request` through the whole chain.
    ///
    /// Returns once the chain has unwound, or with the first error any hook,
    /// the transport or a terminal produced.
    pub fn call(&self, request: Request) -> Result<()> {
        trace!(
            method = %request.method(),
            url = %request.url(),
            middlewares = self.links.middlewares.len(),
            "running middleware chain"
        );
        self.entry().run(request)
    }

    /// Continuation positioned before the first middleware.
    #[must_use]
    pub fn entry(&self) -> RequestNext<'a> {
        RequestNext {
            links: self.links,
            index: 0,
        }
    }
}

/// Assembles a [`Pipeline`] from a stack and separately supplied terminals.
pub struct PipelineBuilder<'a> {
    stack: &'a MiddlewareStack,
    send: Option<&'a dyn TerminalSend>,
    receive: Option<&'a dyn TerminalReceive>,
}

impl fmt::Debug for PipelineBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineBuilder")
            .field("stack", self.stack)
            .field("send", &self.send.is_some())
            .field("receive", &self.receive.is_some())
            .finish()
    }
}

impl<'a> PipelineBuilder<'a> {
    /// Sets the terminal request-side callback.
    #[must_use]
    pub fn on_send(mut self, send: &'a dyn TerminalSend) -> Self {
        self.send = Some(send);
        self
    }

    /// Sets the terminal response-side callback.
    #[must_use]
    pub fn on_receive(mut self, receive: &'a dyn TerminalReceive) -> Self {
        self.receive = Some(receive);
        self
    }

    /// Resolves the pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if either terminal is missing.
    pub fn build(self) -> Result<Pipeline<'a>> {
        let send = self
            .send
            .ok_or_else(|| Error::configuration("terminal send callback not set"))?;
        let receive = self
            .receive
            .ok_or_else(|| Error::configuration("terminal receive callback not set"))?;
        Ok(self.stack.resolve(send, receive))
    }
}

// ============================================================================
// Continuations
// ============================================================================

/// Continuation of the request chain.
///
/// Handed to [`Middleware::on_request`]; `run` moves on to the next
/// middleware, or to the terminal send once every hook has run. It is `Copy`
/// and can be run more than once, which is how a retrying middleware
/// re-sends after a transport failure.
#[derive(Clone, Copy)]
pub struct RequestNext<'a> {
    links: Links<'a>,
    index: usize,
}

impl fmt::Debug for RequestNext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestNext")
            .field("index", &self.index)
            .field("remaining", &self.remaining())
            .finish()
    }
}

impl RequestNext<'_> {
    /// Continues with `request`.
    pub fn run(&self, request: Request) -> Result<()> {
        match self.links.middlewares.get(self.index) {
            Some(middleware) => {
                let next = RequestNext {
                    links: self.links,
                    index: self.index + 1,
                };
                middleware.on_request(request, next)
            }
            None => {
                let next = ResponseNext {
                    links: self.links,
                    index: self.links.middlewares.len(),
                };
                self.links.send.send(request, next)
            }
        }
    }

    /// Like [`RequestNext::run`], and also reports whether a response made it
    /// back past the calling middleware.
    ///
    /// Once `delivered` is set, any error in `result` came from further out
    /// in the response chain, after the exchange was complete.
    #[must_use]
    pub fn run_watched(&self, request: Request) -> Attempt {
        let watch = Watch {
            boundary: self.index,
            delivered: Cell::new(false),
            outer: self.links.watch,
        };
        let next = RequestNext {
            links: Links {
                middlewares: self.links.middlewares,
                send: self.links.send,
                receive: self.links.receive,
                watch: Some(&watch),
            },
            index: self.index,
        };
        let result = next.run(request);
        Attempt {
            result,
            delivered: watch.delivered.get(),
        }
    }

    /// Ends the chain with a ready-made response.
    ///
    /// The remaining request hooks, the transport and every response hook are
    /// skipped; the pair goes straight to the terminal receive.
    pub fn short_circuit(&self, request: Request, response: Response) -> Result<()> {
        if let Some(middleware) = self
            .index
            .checked_sub(1)
            .and_then(|index| self.links.middlewares.get(index))
        {
            trace!(
                middleware = middleware.name(),
                status = response.status(),
                "short-circuiting middleware chain"
            );
        }
        self.links.reached(0);
        self.links.receive.receive(request, response)
    }

    /// Number of request hooks still ahead of this continuation.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.links.middlewares.len().saturating_sub(self.index)
    }
}

/// Continuation of the response chain.
///
/// Handed to the terminal send and to [`Middleware::on_response`]; `run`
/// moves outwards to the previously registered middleware, or to the
/// terminal receive once the outermost hook has run.
#[derive(Clone, Copy)]
pub struct ResponseNext<'a> {
    links: Links<'a>,
    index: usize,
}

impl fmt::Debug for ResponseNext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseNext")
            .field("remaining", &self.index)
            .finish()
    }
}

impl ResponseNext<'_> {
    /// Continues with `request` and `response`.
    pub fn run(&self, request: Request, response: Response) -> Result<()> {
        self.links.reached(self.index);
        let previous = self.index.checked_sub(1).and_then(|index| {
            self.links
                .middlewares
                .get(index)
                .map(|middleware| (index, middleware))
        });

        match previous {
            Some((index, middleware)) => {
                let next = ResponseNext {
                    links: self.links,
                    index,
                };
                middleware.on_response(request, response, next)
            }
            None => self.links.receive.receive(request, response),
        }
    }
}
