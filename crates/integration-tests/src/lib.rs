//! Integration tests for Meeple Market.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p meeple-market-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `identity_flows` - registration, login, sessions, password reset,
//!   seeding
//! - `cart_flows` - line-item merging, quantities, totals, notifications
//! - `rbac` - policy table checks
//!
//! All tests run against in-memory storage; no external services are needed.

#![cfg_attr(not(test), forbid(unsafe_code))]

use meeple_market_store::{IdentityStore, MemoryStorage, Registration};
use secrecy::SecretString;

/// Fresh identity store over its own in-memory storage.
#[must_use]
pub fn identity_store() -> IdentityStore<MemoryStorage> {
    IdentityStore::new(MemoryStorage::new())
}

/// A valid registration for `email` with the shared test password.
#[must_use]
pub fn registration(email: &str) -> Registration {
    Registration {
        email: email.to_owned(),
        username: email.split('@').next().unwrap_or("user").to_owned(),
        full_name: "Test User".to_owned(),
        password: SecretString::from(TEST_PASSWORD),
        birth_date: "1990-05-14".to_owned(),
        address: String::new(),
    }
}

/// Password used by [`registration`]; satisfies the policy.
pub const TEST_PASSWORD: &str = "Secret1";
