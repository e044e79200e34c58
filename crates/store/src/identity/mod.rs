//! Identity store: user accounts, the active session, and reset codes.
//!
//! Single source of truth for everything under the `users`, `currentUser`,
//! and `resetCodes` storage keys. The low-level operations mirror the storage
//! layout one-to-one and never fail; the high-level flows (register, login,
//! password reset, profile updates) layer validation and [`AuthError`] on
//! top.
//!
//! Callers are responsible for read-modify-write consistency: there is no
//! version check, and concurrent writers clobber each other last-write-wins.

mod error;

pub use error::AuthError;

use std::collections::BTreeMap;

use chrono::Utc;
use rand::Rng;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

use meeple_market_core::{AccountStatus, Email, Role, UserId};

use crate::models::{SessionUser, User, UserPatch};
use crate::storage::{KeyValueStorage, read_json_or_default, write_json};

const USERS_KEY: &str = "users";
const CURRENT_USER_KEY: &str = "currentUser";
const RESET_CODES_KEY: &str = "resetCodes";

/// Default administrator seeded into an empty user collection.
pub const SEED_ADMIN_EMAIL: &str = "admin@local.com";
/// Password of the seeded administrator.
pub const SEED_ADMIN_PASSWORD: &str = "Admin123";

const MIN_PASSWORD_LENGTH: usize = 6;
const MAX_PASSWORD_LENGTH: usize = 18;

/// Compute the hex-encoded SHA-256 digest of a plaintext secret.
///
/// Deterministic: identical input always yields identical output, which is
/// what makes stored digests comparable at login. This is a single unsalted
/// pass kept for compatibility with the existing stored records; it is not a
/// password-hashing recommendation.
#[allow(clippy::unused_async)]
pub async fn password_digest(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Registration input for [`IdentityStore::register`].
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub password: SecretString,
    pub birth_date: String,
    pub address: String,
}

/// Store for user accounts, the current session, and reset codes.
///
/// Cheap to construct; holds only a handle to the backing storage.
#[derive(Debug, Clone)]
pub struct IdentityStore<S: KeyValueStorage> {
    storage: S,
}

impl<S: KeyValueStorage> IdentityStore<S> {
    /// Create a store over the given storage.
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    // =========================================================================
    // User collection
    // =========================================================================

    /// All user records in storage order. Empty on absent or corrupt storage.
    #[must_use]
    pub fn users(&self) -> Vec<User> {
        read_json_or_default(&self.storage, USERS_KEY)
    }

    /// Replace the stored user collection wholesale.
    pub fn save_users(&self, users: &[User]) {
        write_json(&self.storage, USERS_KEY, &users);
    }

    /// Find a user by email, case-insensitively and ignoring surrounding
    /// whitespace. Blank input always misses.
    #[must_use]
    pub fn find_by_email(&self, email: &str) -> Option<User> {
        let target = email.trim().to_lowercase();
        if target.is_empty() {
            return None;
        }
        self.users()
            .into_iter()
            .find(|u| u.email.normalized() == target)
    }

    /// Shallow-merge `patch` into the record with the given id and persist
    /// the collection. Returns whether a record matched.
    pub fn update_by_id(&self, id: UserId, patch: &UserPatch) -> bool {
        let mut users = self.users();
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return false;
        };
        user.apply(patch);
        self.save_users(&users);
        true
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Set (or clear, with `None`) the current session.
    ///
    /// The persisted projection never carries the password digest.
    pub fn set_current_user(&self, user: Option<&User>) {
        let session = user.map(User::to_session);
        write_json(&self.storage, CURRENT_USER_KEY, &session);
    }

    /// The current session projection, or `None` if absent or corrupt.
    #[must_use]
    pub fn current_user(&self) -> Option<SessionUser> {
        read_json_or_default(&self.storage, CURRENT_USER_KEY)
    }

    /// Re-read the session's backing record and re-apply it, so the session
    /// reflects out-of-band edits. Clears the session if the record is gone.
    pub fn refresh_current_user(&self) -> Option<SessionUser> {
        let current = self.current_user()?;
        let backing = self.users().into_iter().find(|u| u.id == current.id);
        self.set_current_user(backing.as_ref());
        backing.map(|u| u.to_session())
    }

    /// Clear the current session.
    pub fn logout(&self) {
        self.set_current_user(None);
    }

    // =========================================================================
    // Reset codes
    // =========================================================================

    /// Store `code` as the pending reset code for `email`, replacing any
    /// previous one.
    pub fn set_reset_code(&self, email: &str, code: &str) {
        let mut codes: BTreeMap<String, String> =
            read_json_or_default(&self.storage, RESET_CODES_KEY);
        codes.insert(email.trim().to_lowercase(), code.to_owned());
        write_json(&self.storage, RESET_CODES_KEY, &codes);
    }

    /// The pending reset code for `email`, if any.
    #[must_use]
    pub fn reset_code(&self, email: &str) -> Option<String> {
        let codes: BTreeMap<String, String> =
            read_json_or_default(&self.storage, RESET_CODES_KEY);
        codes.get(&email.trim().to_lowercase()).cloned()
    }

    /// Delete the pending reset code for `email`, if any.
    pub fn clear_reset_code(&self, email: &str) {
        let mut codes: BTreeMap<String, String> =
            read_json_or_default(&self.storage, RESET_CODES_KEY);
        codes.remove(&email.trim().to_lowercase());
        write_json(&self.storage, RESET_CODES_KEY, &codes);
    }

    // =========================================================================
    // Seeding
    // =========================================================================

    /// Create the default administrator if and only if no users exist.
    ///
    /// Idempotent: once any account exists, including non-admin ones, this is
    /// a no-op forever after.
    pub async fn ensure_admin_seed(&self) {
        if !self.users().is_empty() {
            return;
        }
        let digest = password_digest(SEED_ADMIN_PASSWORD).await;
        let admin = User {
            id: UserId::generate(),
            email: Email::parse(SEED_ADMIN_EMAIL).expect("seed email is well-formed"),
            username: "admin".to_owned(),
            full_name: "Administrator".to_owned(),
            password_digest: digest,
            role: Role::Administrator,
            status: AccountStatus::Active,
            created_at: Utc::now(),
            address: String::new(),
            birth_date: String::new(),
        };
        self.save_users(std::slice::from_ref(&admin));
        tracing::info!(email = SEED_ADMIN_EMAIL, "seeded default administrator");
    }

    // =========================================================================
    // High-level flows
    // =========================================================================

    /// Register a new customer account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email is malformed,
    /// `AuthError::WeakPassword` if the password fails the policy, and
    /// `AuthError::UserAlreadyExists` on a case-insensitive email collision.
    pub async fn register(&self, registration: Registration) -> Result<User, AuthError> {
        let email = Email::parse(&registration.email)?;
        validate_password(registration.password.expose_secret())?;

        if self.find_by_email(email.as_str()).is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let user = User {
            id: UserId::generate(),
            email,
            username: registration.username,
            full_name: registration.full_name,
            password_digest: password_digest(registration.password.expose_secret()).await,
            role: Role::Customer,
            status: AccountStatus::Active,
            created_at: Utc::now(),
            address: registration.address,
            birth_date: registration.birth_date,
        };

        let mut users = self.users();
        users.push(user.clone());
        self.save_users(&users);

        Ok(user)
    }

    /// Login with email and password, setting the session on success.
    ///
    /// Account status is not checked here: the original flow admits inactive
    /// accounts and leaves gating to the presentation layer, which consults
    /// `status` on the returned projection.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email is unknown or the
    /// password does not match.
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<SessionUser, AuthError> {
        let user = self
            .find_by_email(email)
            .ok_or(AuthError::InvalidCredentials)?;

        let digest = password_digest(password.expose_secret()).await;
        if user.password_digest != digest {
            return Err(AuthError::InvalidCredentials);
        }

        self.set_current_user(Some(&user));
        Ok(user.to_session())
    }

    /// Begin a password reset: store and return a fresh six-digit code for
    /// the account, or `None` if the email is unknown.
    ///
    /// The demo has no mail transport; the caller is expected to show the
    /// code to the user. Codes do not expire and are not attempt-limited.
    #[must_use]
    pub fn start_password_reset(&self, email: &str) -> Option<String> {
        let user = self.find_by_email(email)?;
        let code = format!("{:06}", rand::rng().random_range(0..1_000_000u32));
        self.set_reset_code(user.email.as_str(), &code);
        Some(code)
    }

    /// Complete a password reset, consuming the code on success.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidResetCode` if no code is pending or it does
    /// not match, `AuthError::WeakPassword` if the new password fails the
    /// policy, and `AuthError::UserNotFound` if the account vanished.
    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &SecretString,
    ) -> Result<(), AuthError> {
        validate_password(new_password.expose_secret())?;

        let stored = self.reset_code(email).ok_or(AuthError::InvalidResetCode)?;
        if stored != code.trim() {
            return Err(AuthError::InvalidResetCode);
        }

        let user = self.find_by_email(email).ok_or(AuthError::UserNotFound)?;
        let digest = password_digest(new_password.expose_secret()).await;
        self.update_by_id(user.id, &UserPatch::password_digest(digest));
        self.clear_reset_code(email);

        Ok(())
    }

    /// Change the signed-in user's password after verifying the current one.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotSignedIn` without a session,
    /// `AuthError::UserNotFound` if the backing record vanished,
    /// `AuthError::InvalidCredentials` if the current password is wrong, and
    /// `AuthError::WeakPassword` if the new password fails the policy.
    pub async fn change_password(
        &self,
        current: &SecretString,
        new: &SecretString,
    ) -> Result<(), AuthError> {
        let session = self.current_user().ok_or(AuthError::NotSignedIn)?;
        let users = self.users();
        let user = users
            .iter()
            .find(|u| u.id == session.id)
            .ok_or(AuthError::UserNotFound)?;

        let current_digest = password_digest(current.expose_secret()).await;
        if user.password_digest != current_digest {
            return Err(AuthError::InvalidCredentials);
        }
        validate_password(new.expose_secret())?;

        let digest = password_digest(new.expose_secret()).await;
        self.update_by_id(user.id, &UserPatch::password_digest(digest));
        Ok(())
    }

    /// Patch the signed-in user's profile fields, then refresh the session so
    /// it reflects the stored record.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotSignedIn` without a session and
    /// `AuthError::UserNotFound` if the backing record vanished.
    pub fn update_profile(&self, patch: &UserPatch) -> Result<SessionUser, AuthError> {
        let session = self.current_user().ok_or(AuthError::NotSignedIn)?;
        if !self.update_by_id(session.id, patch) {
            return Err(AuthError::UserNotFound);
        }
        self.refresh_current_user().ok_or(AuthError::UserNotFound)
    }

    /// Set an account's status and refresh the session, so an admin disabling
    /// the signed-in account is observed immediately. Returns whether a
    /// record matched.
    pub fn set_status(&self, id: UserId, status: AccountStatus) -> bool {
        let matched = self.update_by_id(id, &UserPatch::status(status));
        self.refresh_current_user();
        matched
    }
}

/// Validate the password policy: 6-18 characters with at least one uppercase
/// letter and one digit. Length is counted in characters, not bytes.
fn validate_password(password: &str) -> Result<(), AuthError> {
    let length = password.chars().count();
    if length < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    if length > MAX_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at most {MAX_PASSWORD_LENGTH} characters"
        )));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(AuthError::WeakPassword(
            "password must contain an uppercase letter".to_owned(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AuthError::WeakPassword(
            "password must contain a digit".to_owned(),
        ));
    }
    Ok(())
}
