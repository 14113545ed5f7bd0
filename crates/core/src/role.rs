use core::convert::Infallible;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role carried by a session.
///
/// Recognized roles are matched case-insensitively. Anything else is kept
/// verbatim in [`Role::Unrecognized`] so it round-trips through storage
/// unchanged and resolves to the public entry path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Buyer,
    Supplier,
    Manager,
    Unrecognized(String),
}

impl Role {
    /// Roles a user can register with, in the order the form offers them.
    pub const REGISTRABLE: [Role; 3] = [Role::Supplier, Role::Buyer, Role::Manager];

    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("BUYER") {
            Role::Buyer
        } else if raw.eq_ignore_ascii_case("SUPPLIER") {
            Role::Supplier
        } else if raw.eq_ignore_ascii_case("MANAGER") {
            Role::Manager
        } else {
            Role::Unrecognized(raw.to_string())
        }
    }

    /// Wire form (`BUYER`, `SUPPLIER`, `MANAGER`, or the raw unrecognized value).
    pub fn as_str(&self) -> &str {
        match self {
            Role::Buyer => "BUYER",
            Role::Supplier => "SUPPLIER",
            Role::Manager => "MANAGER",
            Role::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Role::Unrecognized(_))
    }

    /// Human-facing label used by the registration form.
    pub fn label(&self) -> &str {
        match self {
            Role::Buyer => "Buyer",
            Role::Supplier => "Supplier",
            Role::Manager => "Supply Chain Manager",
            Role::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match Role::parse(&value) {
            Role::Unrecognized(_) => Role::Unrecognized(value),
            known => known,
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Role::parse(value)
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        match value {
            Role::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for Role {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Role::parse(s))
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
