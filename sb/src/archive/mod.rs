//! In-memory archive of completed routes
//!
//! Lives only for the running session; nothing is written to disk.

use tracing::debug;

use crate::domain::Route;

/// Session-scoped library of completed routes, newest first
#[derive(Debug, Default)]
pub struct Archive {
    routes: Vec<Route>,
}

impl Archive {
    /// Create an empty archive
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a completed route (prepended, newest first)
    pub fn save(&mut self, route: Route) {
        debug!(route_id = %route.id, "Archive::save");
        self.routes.insert(0, route);
    }

    /// All saved routes, newest first
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Look up a route by id
    pub fn get(&self, id: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.id == id)
    }

    /// Delete a route by id; returns whether anything was removed
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.routes.len();
        self.routes.retain(|r| r.id != id);
        before != self.routes.len()
    }

    /// Produce a fresh, re-runnable copy of a saved route
    pub fn reuse(&self, id: &str) -> Option<Route> {
        self.get(id).map(Route::reset_for_reuse)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
