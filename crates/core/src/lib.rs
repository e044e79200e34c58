//! Meeple Market Core - Shared types library.
//!
//! This crate provides common types used across all Meeple Market components:
//! - `store` - Identity, RBAC policy, and cart state containers
//! - `cli` - Command-line demo front end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, prices, roles,
//!   and account statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
