//! Role-based access control.
//!
//! Permissions come from a fixed action-name to allowed-roles table consulted
//! at runtime. The table is not user-editable and unknown actions always
//! deny.

use meeple_market_core::Role;

use crate::models::SessionUser;

/// View or edit one's own profile.
pub const PROFILE_SELF: &str = "profile:self";
/// List all user accounts (admin panel).
pub const USER_LIST: &str = "user:list";
/// Activate or deactivate an account (admin panel).
pub const USER_SET_STATUS: &str = "user:set-status";

const POLICY: &[(&str, &[Role])] = &[
    (PROFILE_SELF, &[Role::Administrator, Role::Customer]),
    (USER_LIST, &[Role::Administrator]),
    (USER_SET_STATUS, &[Role::Administrator]),
];

/// The roles permitted to perform `action`. Empty for unknown actions.
#[must_use]
pub fn allowed_roles(action: &str) -> &'static [Role] {
    POLICY
        .iter()
        .find(|(name, _)| *name == action)
        .map_or(&[], |(_, roles)| roles)
}

/// Whether `user` may perform `action`.
///
/// An absent user is always denied. Status is not consulted here: gating
/// inactive accounts is the caller's concern, as is everywhere else.
#[must_use]
pub fn can(user: Option<&SessionUser>, action: &str) -> bool {
    user.is_some_and(|u| allowed_roles(action).contains(&u.role))
}
