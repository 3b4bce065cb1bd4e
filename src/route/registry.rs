//! Route registry with first-match lookup.
//!
//! # Design Decisions
//! - Plain ordered Vec; insertion order is the matching priority
//! - O(n) scan per lookup (acceptable for typical route counts)
//! - The registry itself is not synchronized; the service wraps it in a
//!   read-mostly lock since registration happens at startup

use crate::route::Route;

/// Ordered collection of registered routes.
#[derive(Debug, Default)]
pub struct RouteRegistry {
    routes: Vec<Route>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Append a route. Later registrations only match what earlier ones
    /// did not.
    pub fn register(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// First registered route whose prefix matches `path`.
    pub fn find(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.matches(path))
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
