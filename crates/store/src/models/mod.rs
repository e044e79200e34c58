//! Persisted domain records.
//!
//! These are the typed shapes written to storage, separate from the catalog
//! types the cart snapshots from.

mod cart;
mod user;

pub use cart::CartItem;
pub use user::{SessionUser, User, UserPatch};
