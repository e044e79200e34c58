//! Account roles and statuses.

use serde::{Deserialize, Serialize};

/// Account role. The set is closed; there is no custom-role support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access including the user-management panel.
    Administrator,
    /// Regular shopper account.
    #[default]
    Customer,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Administrator => write!(f, "administrator"),
            Self::Customer => write!(f, "customer"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "administrator" => Ok(Self::Administrator),
            "customer" => Ok(Self::Customer),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

/// Whether an account may currently sign in and shop.
///
/// Toggled by administrators; an inactive account keeps its data but is
/// treated as signed out by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    #[default]
    Active,
    Inactive,
}

impl AccountStatus {
    /// Returns the opposite status.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}

impl std::str::FromStr for AccountStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(format!("invalid account status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&Role::Administrator).unwrap(),
            "\"administrator\""
        );
        assert_eq!(serde_json::to_string(&Role::Customer).unwrap(), "\"customer\"");
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("administrator".parse::<Role>().unwrap(), Role::Administrator);
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_status_toggled() {
        assert_eq!(AccountStatus::Active.toggled(), AccountStatus::Inactive);
        assert_eq!(AccountStatus::Inactive.toggled(), AccountStatus::Active);
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(
            serde_json::to_string(&AccountStatus::Inactive).unwrap(),
            "\"inactive\""
        );
        let parsed: AccountStatus = serde_json::from_str("\"active\"").unwrap();
        assert_eq!(parsed, AccountStatus::Active);
    }
}
