//! # Account Status
//!
//! Lifecycle status of a user account. Only `active` accounts may
//! authenticate; the remaining statuses split into two rejection classes
//! (administrative lockout vs. plain inactivity) so the API can answer with
//! the right error without revealing more than it should.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::DomainError;

/// Account lifecycle status as stored in the user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Account in good standing; the only status that may authenticate.
    Active,
    /// Blocked by an operator.
    Blocked,
    /// Suspended pending review.
    Suspended,
    /// Soft-deleted.
    Deleted,
    /// Deactivated by the user or by inactivity policy.
    Inactive,
    /// Registered but not yet activated.
    Pending,
    /// Locked by security policy.
    Locked,
}

impl AccountStatus {
    /// Whether this status may hold a live session.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Whether this status is an administrative lockout.
    ///
    /// Lockout statuses ({locked, blocked, suspended}) surface as
    /// ACCOUNT_LOCKED; every other non-active status surfaces as
    /// USER_INACTIVE.
    pub fn is_lockout(&self) -> bool {
        matches!(self, Self::Locked | Self::Blocked | Self::Suspended)
    }

    /// Return the canonical string representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Blocked => "blocked",
            Self::Suspended => "suspended",
            Self::Deleted => "deleted",
            Self::Inactive => "inactive",
            Self::Pending => "pending",
            Self::Locked => "locked",
        }
    }
}

impl FromStr for AccountStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "blocked" => Ok(Self::Blocked),
            "suspended" => Ok(Self::Suspended),
            "deleted" => Ok(Self::Deleted),
            "inactive" => Ok(Self::Inactive),
            "pending" => Ok(Self::Pending),
            "locked" => Ok(Self::Locked),
            other => Err(DomainError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
