//! Admin user-management commands.

use tracing::info;

use meeple_market_core::{AccountStatus, UserId};
use meeple_market_store::{IdentityStore, JsonFileStorage, SessionUser, rbac};

type Identity = IdentityStore<JsonFileStorage>;
type CommandResult = Result<(), Box<dyn std::error::Error>>;

fn require_admin(identity: &Identity, action: &str) -> Result<(), Box<dyn std::error::Error>> {
    let session = identity.refresh_current_user();
    let active = session.as_ref().is_some_and(SessionUser::is_active);
    if active && rbac::can(session.as_ref(), action) {
        Ok(())
    } else {
        Err("access denied: administrators only".into())
    }
}

/// List all accounts.
pub fn list(identity: &Identity) -> CommandResult {
    require_admin(identity, rbac::USER_LIST)?;

    let users = identity.users();
    info!(count = users.len(), "registered accounts");
    for user in users {
        info!(
            id = %user.id,
            email = %user.email,
            username = %user.username,
            role = %user.role,
            status = %user.status,
        );
    }
    Ok(())
}

/// Activate or deactivate an account.
pub fn set_status(identity: &Identity, id: &str, status: &str) -> CommandResult {
    require_admin(identity, rbac::USER_SET_STATUS)?;

    let id: UserId = id.parse().map_err(|_| "invalid user id")?;
    let status: AccountStatus = status.parse()?;

    if identity.set_status(id, status) {
        info!(%id, %status, "account status updated");
    } else {
        return Err("no account with this id".into());
    }
    Ok(())
}
