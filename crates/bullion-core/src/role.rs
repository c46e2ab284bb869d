//! # Platform Roles
//!
//! The closed set of roles a user account can carry. Role strings appear in
//! stored user records and inside signed token claims, so resolution is
//! centralized here and fails loudly on anything unrecognized — a token or
//! row carrying an unknown role is corrupt, not "some default user".

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::DomainError;

/// Roles in the Bullion platform.
///
/// Scope checks are set-membership over these variants — there is no
/// privilege ordering between them. An `advisor` is not "more" than an
/// `investor`; an endpoint names exactly the roles it admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Platform administration: imports, reference data, maintenance.
    Admin,
    /// Standard platform user.
    User,
    /// Retail customer with a storefront account.
    Customer,
    /// Licensed advisor operating on behalf of clients.
    Advisor,
    /// Institutional or accredited investor.
    Investor,
}

impl Role {
    /// Return the canonical string representation of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Customer => "customer",
            Self::Advisor => "advisor",
            Self::Investor => "investor",
        }
    }

    /// All roles, in declaration order. Used by tests and schema docs.
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::User,
        Role::Customer,
        Role::Advisor,
        Role::Investor,
    ];
}

impl FromStr for Role {
    type Err = DomainError;

    /// The single resolution path from a role string. Unknown values are a
    /// hard error — never coerced to a fallback role.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            "customer" => Ok(Self::Customer),
            "advisor" => Ok(Self::Advisor),
            "investor" => Ok(Self::Investor),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn role_round_trips_through_str() {
        for role in Role::ALL {
            assert_eq!(Role::from_str(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_is_a_hard_error() {
        let err = Role::from_str("superadmin").unwrap_err();
        assert_eq!(err, DomainError::UnknownRole("superadmin".to_string()));
    }

    #[test]
    fn case_is_significant() {
        // "Admin" is not a role; resolution never normalizes case.
        assert!(Role::from_str("Admin").is_err());
    }

    #[test]
    fn serde_uses_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Advisor).unwrap(), "\"advisor\"");
        let role: Role = serde_json::from_str("\"investor\"").unwrap();
        assert_eq!(role, Role::Investor);
    }

    #[test]
    fn serde_rejects_unknown_role() {
        assert!(serde_json::from_str::<Role>("\"root\"").is_err());
    }

    proptest! {
        #[test]
        fn arbitrary_strings_never_resolve_unless_canonical(s in "\\PC*") {
            match Role::from_str(&s) {
                Ok(role) => prop_assert_eq!(role.as_str(), s),
                Err(DomainError::UnknownRole(echoed)) => prop_assert_eq!(echoed, s),
                Err(other) => prop_assert!(false, "unexpected error: {other}"),
            }
        }
    }
}
