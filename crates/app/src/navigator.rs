//! Route table + gates + session store.
//!
//! A navigation request is resolved to the route that will actually render,
//! following gate redirects. The caller applies the final path (browser
//! history, test assertion); nothing here touches the view layer.

use thiserror::Error;

use chainboard_auth::{
    GateDecision, Session, SessionStore, SessionStoreError, authenticated_gate, public_gate,
};
use chainboard_core::Route;

/// Upper bound on gate redirects for one navigation. The gates settle in at
/// most two hops; anything longer is a routing bug.
pub const MAX_REDIRECTS: usize = 4;

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("redirect loop while navigating to '{requested}' (gave up after {hops} redirects)")]
    RedirectLoop { requested: String, hops: usize },

    #[error(transparent)]
    Session(#[from] SessionStoreError),
}

/// Where a navigation request ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Path as requested by the user or a view.
    pub requested: String,
    /// Route that renders.
    pub route: Route,
    /// Redirect targets followed, in order.
    pub redirects: Vec<&'static str>,
}

impl Navigation {
    /// Path of the rendered route.
    pub fn path(&self) -> &'static str {
        self.route.path()
    }

    pub fn was_redirected(&self) -> bool {
        !self.redirects.is_empty()
    }
}

/// Session-aware router.
#[derive(Debug, Clone)]
pub struct Navigator<S> {
    store: S,
}

impl<S: SessionStore> Navigator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Snapshot of the stored session.
    pub fn session(&self) -> Option<Session> {
        self.store.read()
    }

    /// Gate decision for rendering `route` at `path` with the current session.
    pub fn evaluate(&self, route: Route, path: &str) -> GateDecision {
        let session = self.store.read();
        if route.is_guarded() {
            authenticated_gate(session.as_ref(), path)
        } else {
            public_gate(session.as_ref(), path)
        }
    }

    /// Resolve `path` to the route that renders, following redirects.
    pub fn navigate(&self, path: &str) -> Result<Navigation, NavigationError> {
        let mut redirects = Vec::new();
        let mut current: &str = path;

        loop {
            let target = match Route::from_path(current) {
                // Unknown paths go back to the public entry.
                None => Route::ENTRY.path(),
                Some(route) => match self.evaluate(route, current) {
                    GateDecision::RedirectTo(target) => target,
                    GateDecision::Render => {
                        let navigation = Navigation {
                            requested: path.to_string(),
                            route,
                            redirects,
                        };
                        tracing::info!(
                            requested = %navigation.requested,
                            rendered = navigation.path(),
                            redirects = navigation.redirects.len(),
                            "navigation resolved"
                        );
                        return Ok(navigation);
                    }
                },
            };

            if redirects.len() == MAX_REDIRECTS {
                tracing::error!(requested = path, hops = redirects.len(), "redirect loop");
                return Err(NavigationError::RedirectLoop {
                    requested: path.to_string(),
                    hops: redirects.len(),
                });
            }

            tracing::debug!(from = current, to = target, "gate redirect");
            redirects.push(target);
            current = target;
        }
    }

    /// Store the session returned by a successful login and go to the
    /// role's dashboard.
    pub fn login(&self, session: &Session) -> Result<Navigation, NavigationError> {
        self.store.write(session)?;
        tracing::info!(role = ?session.role(), "session stored");
        self.navigate(session.canonical_route().path())
    }

    /// Clear the session and go back to the public entry.
    pub fn logout(&self) -> Result<Navigation, NavigationError> {
        self.store.clear();
        tracing::info!("session cleared");
        self.navigate(Route::ENTRY.path())
    }
}
