//! Route table and lookup.
//!
//! # Responsibilities
//! - Store registered routes in declaration order
//! - Look up the first route matching a request
//! - Return matched route or explicit no-match

use std::fmt;
use std::sync::Arc;

use axum::http::Method;
use axum::response::Response;

use crate::http::request::RequestContext;
use crate::routing::matcher::{AndMatcher, Matcher, MethodMatcher, PathMatcher};
use crate::store::RecordStore;

/// A request handler bound to a route.
///
/// The returned response is the only write the dispatch loop performs for the
/// request.
pub trait Handler: Send + Sync {
    fn handle(&self, ctx: &RequestContext, store: &RecordStore) -> Response;
}

impl<F> Handler for F
where
    F: Fn(&RequestContext, &RecordStore) -> Response + Send + Sync,
{
    fn handle(&self, ctx: &RequestContext, store: &RecordStore) -> Response {
        self(ctx, store)
    }
}

/// A registered `(method, path, handler)` binding.
pub struct Route {
    method: Method,
    path: String,
    matcher: AndMatcher,
    handler: Arc<dyn Handler>,
}

impl Route {
    fn new(method: Method, path: String, handler: Arc<dyn Handler>) -> Self {
        let matcher = AndMatcher::new(vec![
            Box::new(MethodMatcher::new(method.clone())),
            Box::new(PathMatcher::new(path.clone())),
        ]);
        Self {
            method,
            path,
            matcher,
            handler,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn handler(&self) -> &dyn Handler {
        self.handler.as_ref()
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Ordered route table. First match wins.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route. Identical earlier entries shadow this one.
    pub fn register<H>(mut self, method: Method, path: impl Into<String>, handler: H) -> Self
    where
        H: Handler + 'static,
    {
        self.routes
            .push(Route::new(method, path.into(), Arc::new(handler)));
        self
    }

    /// Find the first route whose method and path both equal the request's.
    pub fn match_route(&self, method: &Method, path: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|route| route.matcher.matches(method, path))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
