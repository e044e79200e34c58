//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during the high-level authentication flows.
///
/// The low-level store operations (list, save, lookup, session, reset-code
/// CRUD) never fail; misses are sentinel returns and corrupt storage degrades
/// to empty state.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] meeple_market_core::EmailError),

    /// Password does not meet the policy.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// An account with this email already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Wrong email/password combination.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No account matches the given email or id.
    #[error("user not found")]
    UserNotFound,

    /// Reset code missing or mismatched.
    #[error("invalid reset code")]
    InvalidResetCode,

    /// Operation requires an active session.
    #[error("not signed in")]
    NotSignedIn,
}
