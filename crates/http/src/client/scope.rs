//! Which role's credentials a request travels with

use household_core::Role;

/// Token refresh endpoint
pub const REFRESH_TOKEN_PATH: &str = "/api/refresh-token";

/// Registration endpoint
pub const REGISTER_PATH: &str = "/api/register";

/// Endpoints that never carry a token and are never refreshed: they either
/// mint tokens or are meant to be called anonymously.
pub const EXCLUDED_ENDPOINTS: [&str; 5] = [
    "/api/admin/login",
    "/api/professional/login",
    "/api/customer/login",
    REFRESH_TOKEN_PATH,
    REGISTER_PATH,
];

/// Whether `path` targets one of the excluded endpoints
pub fn is_excluded(path: &str) -> bool {
    EXCLUDED_ENDPOINTS
        .iter()
        .any(|endpoint| path.contains(endpoint))
}

/// Credential scope of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Excluded endpoint: no token, no refresh
    Public,
    /// Endpoint owned by a single role
    Role(Role),
    /// Shared endpoint: first available token of admin, professional, customer
    AnyRole,
}

impl Scope {
    /// Derive the scope from the request path
    pub fn classify(path: &str) -> Self {
        if is_excluded(path) {
            return Self::Public;
        }
        Role::ALL
            .into_iter()
            .find(|role| path.contains(role.api_prefix()))
            .map_or(Self::AnyRole, Self::Role)
    }

    pub const fn role(self) -> Option<Role> {
        match self {
            Self::Role(role) => Some(role),
            Self::Public | Self::AnyRole => None,
        }
    }

    pub const fn is_public(self) -> bool {
        matches!(self, Self::Public)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excluded_endpoints_are_public() {
        for path in EXCLUDED_ENDPOINTS {
            assert_eq!(Scope::classify(path), Scope::Public, "{path}");
        }
        // Matching is by containment, like the role prefixes
        assert_eq!(
            Scope::classify("http://backend/api/customer/login"),
            Scope::Public
        );
    }

    #[test]
    fn test_role_prefixes() {
        assert_eq!(
            Scope::classify("/api/admin/services"),
            Scope::Role(Role::Admin)
        );
        assert_eq!(
            Scope::classify("/api/professional/accept_service/3"),
            Scope::Role(Role::Professional)
        );
        assert_eq!(
            Scope::classify("/api/customer/service_requests"),
            Scope::Role(Role::Customer)
        );
        // Logout is not excluded
        assert_eq!(
            Scope::classify("/api/admin/logout"),
            Scope::Role(Role::Admin)
        );
    }

    #[test]
    fn test_unclassified_paths_fall_back() {
        assert_eq!(Scope::classify("/api/home"), Scope::AnyRole);
        assert_eq!(Scope::classify("/api/documents/id.pdf"), Scope::AnyRole);
        assert_eq!(Scope::AnyRole.role(), None);
    }
}
