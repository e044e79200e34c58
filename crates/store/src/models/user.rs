//! User domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use meeple_market_core::{AccountStatus, Email, Role, UserId};

/// A user account as persisted in the `users` collection.
///
/// The password is stored only as a one-way digest, never in plaintext.
/// Records are created at registration (or first-run seeding) and mutated in
/// place; they are never hard-deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique, generated user ID.
    pub id: UserId,
    /// Email address; unique case-insensitively across accounts.
    pub email: Email,
    /// Display username. No uniqueness is enforced.
    pub username: String,
    /// Full name.
    pub full_name: String,
    /// Hex-encoded SHA-256 digest of the password.
    pub password_digest: String,
    /// Account role.
    pub role: Role,
    /// Account status; inactive accounts are gated by the presentation layer.
    pub status: AccountStatus,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// Free-form shipping address.
    #[serde(default)]
    pub address: String,
    /// Birth date as entered (free-form profile field).
    #[serde(default)]
    pub birth_date: String,
}

impl User {
    /// The credential-stripped projection safe to hold as the session.
    #[must_use]
    pub fn to_session(&self) -> SessionUser {
        SessionUser {
            id: self.id,
            email: self.email.clone(),
            username: self.username.clone(),
            full_name: self.full_name.clone(),
            role: self.role,
            status: self.status,
            created_at: self.created_at,
            address: self.address.clone(),
            birth_date: self.birth_date.clone(),
        }
    }

    /// Shallow-merge `patch` into this record. Unset patch fields are kept.
    pub fn apply(&mut self, patch: &UserPatch) {
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(username) = &patch.username {
            self.username = username.clone();
        }
        if let Some(full_name) = &patch.full_name {
            self.full_name = full_name.clone();
        }
        if let Some(password_digest) = &patch.password_digest {
            self.password_digest = password_digest.clone();
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(address) = &patch.address {
            self.address = address.clone();
        }
        if let Some(birth_date) = &patch.birth_date {
            self.birth_date = birth_date.clone();
        }
    }
}

/// The "current user" projection persisted under `currentUser`.
///
/// Deliberately has no digest field, so credential material can never leak
/// into the session slot, whatever record it was built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: UserId,
    pub email: Email,
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub birth_date: String,
}

impl SessionUser {
    /// Whether this session belongs to an active account.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.status, AccountStatus::Active)
    }
}

/// A partial update to a [`User`] record.
///
/// Only set fields are applied; content validation is the caller's
/// responsibility.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub email: Option<Email>,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub password_digest: Option<String>,
    pub role: Option<Role>,
    pub status: Option<AccountStatus>,
    pub address: Option<String>,
    pub birth_date: Option<String>,
}

impl UserPatch {
    /// A patch that only changes the account status.
    #[must_use]
    pub fn status(status: AccountStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// A patch that only changes the password digest.
    #[must_use]
    pub fn password_digest(digest: impl Into<String>) -> Self {
        Self {
            password_digest: Some(digest.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: UserId::generate(),
            email: Email::parse("ana@example.com").unwrap(),
            username: "ana".to_owned(),
            full_name: "Ana Soto".to_owned(),
            password_digest: "abc123".to_owned(),
            role: Role::Customer,
            status: AccountStatus::Active,
            created_at: Utc::now(),
            address: String::new(),
            birth_date: String::new(),
        }
    }

    #[test]
    fn test_session_projection_has_no_digest_field() {
        let user = sample_user();
        let session = user.to_session();
        let json = serde_json::to_value(&session).unwrap();
        assert!(json.get("passwordDigest").is_none());
        assert_eq!(json["email"], "ana@example.com");
    }

    #[test]
    fn test_apply_patches_only_set_fields() {
        let mut user = sample_user();
        let original_email = user.email.clone();

        user.apply(&UserPatch {
            username: Some("ana.s".to_owned()),
            status: Some(AccountStatus::Inactive),
            ..UserPatch::default()
        });

        assert_eq!(user.username, "ana.s");
        assert_eq!(user.status, AccountStatus::Inactive);
        assert_eq!(user.email, original_email);
        assert_eq!(user.full_name, "Ana Soto");
        assert_eq!(user.password_digest, "abc123");
    }

    #[test]
    fn test_empty_patch_changes_nothing() {
        let mut user = sample_user();
        let before = serde_json::to_value(&user).unwrap();
        user.apply(&UserPatch::default());
        assert_eq!(serde_json::to_value(&user).unwrap(), before);
    }

    #[test]
    fn test_user_deserializes_without_optional_profile_fields() {
        let user = sample_user();
        let mut json = serde_json::to_value(&user).unwrap();
        json.as_object_mut().unwrap().remove("address");
        json.as_object_mut().unwrap().remove("birthDate");

        let parsed: User = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.address, "");
        assert_eq!(parsed.birth_date, "");
    }
}
