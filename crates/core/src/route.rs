//! Page routes and the role-to-path resolver.
//!
//! The resolver is total: every input maps to one of four paths and there
//! are no error cases. Unknown or missing roles resolve to the public entry.

use crate::role::Role;

/// Every page the application can render.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Buyer,
    Supplier,
    Manager,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Login,
        Route::Register,
        Route::Buyer,
        Route::Supplier,
        Route::Manager,
    ];

    /// The public entry path (`/`).
    pub const ENTRY: Route = Route::Login;

    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Register => "/register",
            Route::Buyer => "/buyer",
            Route::Supplier => "/supplier",
            Route::Manager => "/manager",
        }
    }

    /// Exact-match lookup. `None` is the wildcard case, which the router
    /// sends back to the entry path.
    pub fn from_path(path: &str) -> Option<Route> {
        Route::ALL.into_iter().find(|route| route.path() == path)
    }

    /// Dashboards sit behind the authenticated gate; everything else is
    /// public-only.
    pub fn is_guarded(self) -> bool {
        matches!(self, Route::Buyer | Route::Supplier | Route::Manager)
    }

    /// The single dashboard a role may view.
    pub fn for_role(role: &Role) -> Route {
        match role {
            Role::Buyer => Route::Buyer,
            Role::Supplier => Route::Supplier,
            Role::Manager => Route::Manager,
            Role::Unrecognized(_) => Route::ENTRY,
        }
    }
}

impl core::fmt::Display for Route {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.path())
    }
}

/// Canonical path for an already-parsed role; absent resolves to `/`.
pub fn canonical_path(role: Option<&Role>) -> &'static str {
    role.map_or(Route::ENTRY, Route::for_role).path()
}

/// Canonical path for a raw role string, matched case-insensitively.
pub fn resolve(role: Option<&str>) -> &'static str {
    canonical_path(role.map(Role::parse).as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn recognized_roles_resolve_to_distinct_dashboards() {
        assert_eq!(resolve(Some("BUYER")), "/buyer");
        assert_eq!(resolve(Some("SUPPLIER")), "/supplier");
        assert_eq!(resolve(Some("MANAGER")), "/manager");
    }

    #[test]
    fn missing_or_unknown_role_resolves_to_entry() {
        assert_eq!(resolve(None), "/");
        assert_eq!(resolve(Some("")), "/");
        assert_eq!(resolve(Some("admin")), "/");
        assert_eq!(canonical_path(None), "/");
    }

    #[test]
    fn route_table_round_trips_paths() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/unknown"), None);
        assert_eq!(Route::from_path("/buyer/"), None);
    }

    #[test]
    fn only_dashboards_are_guarded() {
        let guarded: Vec<_> = Route::ALL.into_iter().filter(|r| r.is_guarded()).collect();
        assert_eq!(guarded, vec![Route::Buyer, Route::Supplier, Route::Manager]);
    }

    fn random_case(word: &'static str) -> impl Strategy<Value = String> {
        proptest::collection::vec(any::<bool>(), word.len()).prop_map(move |flips| {
            word.chars()
                .zip(flips)
                .map(|(c, upper)| if upper { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn resolve_is_case_insensitive(
            raw in prop_oneof![random_case("buyer"), random_case("supplier"), random_case("manager")]
        ) {
            let expected = resolve(Some(&raw.to_ascii_uppercase()));
            prop_assert_eq!(resolve(Some(&raw)), expected);
            prop_assert_ne!(expected, "/");
        }

        #[test]
        fn resolve_always_lands_on_a_known_path(raw in ".*") {
            let path = resolve(Some(&raw));
            prop_assert!(["/", "/buyer", "/supplier", "/manager"].contains(&path));
        }
    }
}
