//! Meeple Market Store - identity, RBAC policy, and cart state containers.
//!
//! This crate holds the data-and-policy core of the demo storefront. It has
//! no UI dependencies: presentation code (the CLI, or any other front end)
//! calls into [`identity::IdentityStore`] to authenticate and manage users
//! and into [`cart::CartStore`] to manage line items. Both persist
//! synchronously to a [`storage::KeyValueStorage`] on every mutation and are
//! the sole source of truth read back by presentation code.
//!
//! # Storage layout
//!
//! | Key | Contents |
//! |---|---|
//! | `users` | all accounts |
//! | `currentUser` | active session (credential-stripped) or `null` |
//! | `resetCodes` | pending password-reset codes, keyed by email |
//! | `cart` | active cart line items |
//!
//! Corrupt values degrade to empty defaults on read; writes are
//! fire-and-forget with last-writer-wins semantics and no coordination
//! between concurrent writers. That limitation is deliberate: the backing
//! store models browser local storage.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod identity;
pub mod models;
pub mod rbac;
pub mod storage;

pub use cart::CartStore;
pub use catalog::{Product, ProductCatalog, StaticCatalog};
pub use identity::{
    AuthError, IdentityStore, Registration, SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD, password_digest,
};
pub use models::{CartItem, SessionUser, User, UserPatch};
pub use storage::{JsonFileStorage, KeyValueStorage, MemoryStorage};
