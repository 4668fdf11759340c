//! Marketplace roles
//!
//! Each role owns one credential pair, one family of API endpoints and one
//! login view. Everything that varies per role hangs off this enum so the
//! rest of the client never matches on strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// A marketplace role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Professional,
    Customer,
}

impl Role {
    /// All roles, in token fallback order
    pub const ALL: [Self; 3] = [Self::Admin, Self::Professional, Self::Customer];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Professional => "professional",
            Self::Customer => "customer",
        }
    }

    /// Storage key of the access token, e.g. `adminToken`
    pub const fn token_key(self) -> &'static str {
        match self {
            Self::Admin => "adminToken",
            Self::Professional => "professionalToken",
            Self::Customer => "customerToken",
        }
    }

    /// Storage key of the refresh token, e.g. `adminRefreshToken`
    pub const fn refresh_token_key(self) -> &'static str {
        match self {
            Self::Admin => "adminRefreshToken",
            Self::Professional => "professionalRefreshToken",
            Self::Customer => "customerRefreshToken",
        }
    }

    /// Path of the role's login view
    pub const fn login_path(self) -> &'static str {
        match self {
            Self::Admin => "/admin/login",
            Self::Professional => "/professional/login",
            Self::Customer => "/customer/login",
        }
    }

    /// Path prefix shared by every endpoint of the role
    pub const fn api_prefix(self) -> &'static str {
        match self {
            Self::Admin => "/api/admin/",
            Self::Professional => "/api/professional/",
            Self::Customer => "/api/customer/",
        }
    }

    /// Message shown when the backend rejects a request with 403
    pub const fn privilege_message(self) -> &'static str {
        match self {
            Self::Admin => {
                "You need admin privileges to access this resource. Please log in as an admin."
            }
            Self::Professional => {
                "You need professional privileges to access this resource. Please log in as a professional."
            }
            Self::Customer => {
                "You need customer privileges to access this resource. Please log in as a customer."
            }
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "professional" => Ok(Self::Professional),
            "customer" => Ok(Self::Customer),
            _ => Err(Error::UnknownRole(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_keys() {
        let keys: Vec<_> = Role::ALL
            .iter()
            .flat_map(|r| [r.token_key(), r.refresh_token_key()])
            .collect();
        assert_eq!(
            keys,
            vec![
                "adminToken",
                "adminRefreshToken",
                "professionalToken",
                "professionalRefreshToken",
                "customerToken",
                "customerRefreshToken",
            ]
        );
    }

    #[test]
    fn test_prefix_and_login_path_agree_with_name() {
        for role in Role::ALL {
            assert_eq!(role.api_prefix(), format!("/api/{role}/"));
            assert_eq!(role.login_path(), format!("/{role}/login"));
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("Customer".parse::<Role>().unwrap(), Role::Customer);
        assert!(matches!(
            "guest".parse::<Role>(),
            Err(Error::UnknownRole(name)) if name == "guest"
        ));
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Role::Professional).unwrap();
        assert_eq!(json, "\"professional\"");
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }
}
