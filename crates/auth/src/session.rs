use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use chainboard_core::{Role, Route};

/// The authenticated identity as returned by the login endpoint.
///
/// Only `role` is interpreted; every other field is kept opaque and written
/// back to storage untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<Role>,

    #[serde(flatten)]
    identity: Map<String, Value>,
}

impl Session {
    pub fn new(role: Role) -> Self {
        Self {
            role: Some(role),
            identity: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.identity.insert(key.into(), value.into());
        self
    }

    /// The session's role. An empty role string counts as no role.
    pub fn role(&self) -> Option<&Role> {
        self.role.as_ref().filter(|role| !role.as_str().is_empty())
    }

    /// A session without a role is treated exactly like no session at all.
    pub fn is_authenticated(&self) -> bool {
        self.role().is_some()
    }

    /// The dashboard this session may view (`Login` for unrecognized roles).
    pub fn canonical_route(&self) -> Route {
        self.role().map_or(Route::ENTRY, Route::for_role)
    }

    /// Bearer token, when the backend issued one.
    pub fn token(&self) -> Option<&str> {
        self.identity.get("token").and_then(Value::as_str)
    }

    pub fn email(&self) -> Option<&str> {
        self.identity.get("email").and_then(Value::as_str)
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.identity.get(key)
    }
}

/// Role of a possibly-absent session, with "no role" folded into `None`.
pub fn session_role(session: Option<&Session>) -> Option<&Role> {
    session.and_then(Session::role)
}
