//! Route table and navigation guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every transition goes through [`guard`] before the view layer sees it.
//! The guard owns no state: it is a function of the target route's metadata
//! and the current token. [`Router::navigate`] resolves a path, applies the
//! guard and follows its redirects.

#[cfg(test)]
#[path = "router_test.rs"]
mod router_test;

use crate::state::session::SessionStore;

/// Entry point: the sign-in view, and where an invalidated session lands.
pub const ENTRY_PATH: &str = "/";
/// Where an authenticated visit to the entry point is sent.
pub const LANDING_PATH: &str = "/employees";

const MAX_REDIRECTS: usize = 4;

// =============================================================================
// ROUTE TABLE
// =============================================================================

/// View rendered for a route. Rendering itself belongs to the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Employees,
    Positions,
}

/// Static route descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub view: View,
    pub requires_auth: bool,
}

pub static ROUTES: [Route; 3] = [
    Route { path: ENTRY_PATH, name: "login", view: View::Login, requires_auth: false },
    Route { path: "/employees", name: "employees", view: View::Employees, requires_auth: true },
    Route { path: "/positions", name: "positions", view: View::Positions, requires_auth: true },
];

// =============================================================================
// GUARD
// =============================================================================

/// Guard decision for one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Allow,
    Redirect(&'static str),
}

/// Decide whether a transition to `target` may proceed.
///
/// 1. Protected route without a token: back to the entry point.
/// 2. Entry point with a token: on to the landing route.
/// 3. Anything else proceeds.
pub fn guard(target: &Route, token: Option<&str>) -> Navigation {
    let authenticated = token.is_some_and(|t| !t.is_empty());
    if target.requires_auth && !authenticated {
        Navigation::Redirect(ENTRY_PATH)
    } else if target.path == ENTRY_PATH && authenticated {
        Navigation::Redirect(LANDING_PATH)
    } else {
        Navigation::Allow
    }
}

// =============================================================================
// ROUTER
// =============================================================================

/// Where a navigation ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The guard allowed `route`. `redirected_from` holds the requested path
    /// when the guard sent the navigation elsewhere first.
    Arrived { route: &'static Route, redirected_from: Option<String> },
    /// No route matches the path.
    NotFound { path: String },
    /// The guard kept redirecting; the transition is abandoned.
    Blocked { path: String },
}

impl RouteOutcome {
    pub fn route(&self) -> Option<&'static Route> {
        match self {
            Self::Arrived { route, .. } => Some(*route),
            _ => None,
        }
    }

    pub fn was_redirected(&self) -> bool {
        matches!(self, Self::Arrived { redirected_from: Some(_), .. })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Router {
    routes: &'static [Route],
}

impl Default for Router {
    fn default() -> Self {
        Self { routes: &ROUTES }
    }
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match a path, ignoring query string, fragment and a trailing slash.
    pub fn resolve(&self, path: &str) -> Option<&'static Route> {
        let path = normalize_path(path);
        self.routes.iter().find(|r| r.path == path)
    }

    pub fn by_name(&self, name: &str) -> Option<&'static Route> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Navigate using the session's current token.
    pub fn navigate(&self, path: &str, session: &SessionStore) -> RouteOutcome {
        let token = session.token();
        self.navigate_with_token(path, token.as_deref())
    }

    pub fn navigate_with_token(&self, path: &str, token: Option<&str>) -> RouteOutcome {
        let mut current = path.to_owned();
        for _ in 0..=MAX_REDIRECTS {
            let Some(route) = self.resolve(&current) else {
                return RouteOutcome::NotFound { path: current };
            };
            match guard(route, token) {
                Navigation::Allow => {
                    let redirected_from = (current != path).then(|| path.to_owned());
                    return RouteOutcome::Arrived { route, redirected_from };
                }
                Navigation::Redirect(target) => {
                    tracing::debug!(from = %current, to = target, "navigation redirected");
                    current = target.to_owned();
                }
            }
        }
        tracing::error!(path, "navigation exceeded redirect limit");
        RouteOutcome::Blocked { path: path.to_owned() }
    }
}

fn normalize_path(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { ENTRY_PATH } else { trimmed }
}

// =============================================================================
// NAVIGATOR
// =============================================================================

/// Full-context reset to a path, outside the client-side router.
///
/// Used when the backend rejects the session: the front end must drop
/// whatever it was showing and start over at [`ENTRY_PATH`].
pub trait Navigator {
    fn hard_redirect(&self, path: &str);
}

/// Assigns `window.location.href`, reloading the application.
#[cfg(feature = "hydrate")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocationNavigator;

#[cfg(feature = "hydrate")]
impl Navigator for LocationNavigator {
    fn hard_redirect(&self, path: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if window.location().set_href(path).is_err() {
            tracing::warn!(path, "window.location assignment rejected");
        }
    }
}
