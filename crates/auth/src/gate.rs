//! Route gates.
//!
//! Both gates are pure: they take a session snapshot and the requested path
//! and return a decision. Applying a redirect is the caller's job.
//!
//! - No IO
//! - No panics
//! - Re-evaluated on every navigation, never mid-render

use chainboard_core::canonical_path;

use crate::session::{Session, session_role};

/// Outcome of evaluating a gate for one navigation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Render the wrapped view at the requested path.
    Render,
    /// Navigate to this path instead, replacing the current history entry.
    RedirectTo(&'static str),
}

impl GateDecision {
    pub fn is_render(&self) -> bool {
        matches!(self, GateDecision::Render)
    }

    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            GateDecision::Render => None,
            GateDecision::RedirectTo(path) => Some(path),
        }
    }
}

/// Gate for unauthenticated-only views (login, registration).
///
/// With a session, the user is sent to their dashboard. An unrecognized role
/// resolves to `/`; once there the gate renders, so the redirect settles
/// instead of bouncing.
pub fn public_gate(session: Option<&Session>, requested: &str) -> GateDecision {
    let Some(role) = session_role(session) else {
        return GateDecision::Render;
    };

    let target = canonical_path(Some(role));
    if target == requested {
        GateDecision::Render
    } else {
        GateDecision::RedirectTo(target)
    }
}

/// Gate for role-specific dashboards.
///
/// Evaluated in order:
/// 1. no session (or no role) → `/`
/// 2. requested path is not the role's canonical path → canonical path
/// 3. otherwise render
///
/// An unrecognized role lands in case 2 with `/` as its canonical path. The
/// stored record is left as it is.
pub fn authenticated_gate(session: Option<&Session>, requested: &str) -> GateDecision {
    let Some(role) = session_role(session) else {
        return GateDecision::RedirectTo(canonical_path(None));
    };

    let expected = canonical_path(Some(role));
    if expected != requested {
        return GateDecision::RedirectTo(expected);
    }

    GateDecision::Render
}
