//! Session and account commands.

use secrecy::SecretString;
use tracing::{info, warn};

use meeple_market_store::{
    CartStore, IdentityStore, JsonFileStorage, Registration, StaticCatalog, UserPatch, rbac,
};

type Identity = IdentityStore<JsonFileStorage>;
type Cart = CartStore<JsonFileStorage, StaticCatalog>;
type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Create the default administrator if the user collection is empty.
pub async fn seed(identity: &Identity) -> CommandResult {
    identity.ensure_admin_seed().await;
    info!(users = identity.users().len(), "seed complete");
    Ok(())
}

/// Register a new customer account.
pub async fn register(identity: &Identity, registration: Registration) -> CommandResult {
    let user = identity.register(registration).await?;
    info!(id = %user.id, email = %user.email, "account created, you can now log in");
    Ok(())
}

/// Sign in and start a session.
pub async fn login(identity: &Identity, email: &str, password: &SecretString) -> CommandResult {
    let session = identity.login(email, password).await?;
    if session.is_active() {
        info!(username = %session.username, role = %session.role, "signed in");
    } else {
        warn!("this account is disabled; contact an administrator");
    }
    Ok(())
}

/// Clear the session and empty the cart, like the header's logout button.
pub fn logout(identity: &Identity, mut cart: Cart) -> CommandResult {
    cart.clear();
    identity.logout();
    info!("signed out");
    Ok(())
}

/// Show the signed-in user, after resyncing the session with storage.
pub fn whoami(identity: &Identity) -> CommandResult {
    match identity.refresh_current_user() {
        Some(session) => {
            info!(
                id = %session.id,
                email = %session.email,
                username = %session.username,
                role = %session.role,
                status = %session.status,
                "current session"
            );
        }
        None => info!("not signed in"),
    }
    Ok(())
}

/// Update profile fields of the signed-in user.
pub fn update_profile(
    identity: &Identity,
    username: Option<String>,
    full_name: Option<String>,
    birth_date: Option<String>,
    address: Option<String>,
) -> CommandResult {
    let session = identity.refresh_current_user();
    if !rbac::can(session.as_ref(), rbac::PROFILE_SELF) {
        return Err("sign in to edit your profile".into());
    }

    let patch = UserPatch {
        username,
        full_name,
        birth_date,
        address,
        ..UserPatch::default()
    };
    let session = identity.update_profile(&patch)?;
    info!(username = %session.username, "profile updated");
    Ok(())
}

/// Change the signed-in user's password.
pub async fn change_password(
    identity: &Identity,
    current: &SecretString,
    new: &SecretString,
) -> CommandResult {
    identity.change_password(current, new).await?;
    info!("password updated");
    Ok(())
}

/// Request a reset code. The demo has no mail transport, so the code is
/// shown directly.
pub fn reset_start(identity: &Identity, email: &str) -> CommandResult {
    match identity.start_password_reset(email) {
        Some(code) => info!(email, code, "reset code issued"),
        None => warn!(email, "no account with this email"),
    }
    Ok(())
}

/// Complete the reset with the issued code.
pub async fn reset_complete(
    identity: &Identity,
    email: &str,
    code: &str,
    password: &SecretString,
) -> CommandResult {
    identity.reset_password(email, code, password).await?;
    info!("password updated, you can now log in");
    Ok(())
}
