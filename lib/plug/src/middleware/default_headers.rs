//! Default header middleware.

use crate::{Headers, Middleware, Request, RequestNext, Result};

/// Adds headers to requests that do not already carry them.
///
/// A name the request already has, in any case, is left alone together with
/// all of its values. Repeated default names are added in full.
#[derive(Debug, Clone, Default)]
pub struct DefaultHeaders {
    headers: Headers,
}

impl DefaultHeaders {
    /// Create the middleware from a header set.
    #[must_use]
    pub fn new(headers: Headers) -> Self {
        Self { headers }
    }

    /// Headers this middleware adds.
    #[must_use]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }
}

impl<K, V> FromIterator<(K, V)> for DefaultHeaders
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Middleware for DefaultHeaders {
    fn name(&self) -> &str {
        "default-headers"
    }

    fn on_request(&self, request: Request, next: RequestNext<'_>) -> Result<()> {
        let missing: Vec<_> = self
            .headers
            .iter()
            .filter(|(name, _)| !request.headers().contains(name))
            .collect();
        let request = missing
            .into_iter()
            .fold(request, |request, (name, value)| request.with_added_header(name, value));
        next.run(request)
    }
}
