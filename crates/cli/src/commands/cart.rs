//! Shopping cart commands.

use tracing::info;

use meeple_market_core::ProductId;
use meeple_market_store::{CartStore, IdentityStore, JsonFileStorage, StaticCatalog};

type Identity = IdentityStore<JsonFileStorage>;
type Cart = CartStore<JsonFileStorage, StaticCatalog>;
type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// The cart requires an active session, like the header's cart button.
fn require_active_session(identity: &Identity) -> Result<(), Box<dyn std::error::Error>> {
    match identity.refresh_current_user() {
        Some(session) if session.is_active() => Ok(()),
        Some(_) => Err("your account is disabled; contact an administrator".into()),
        None => Err("sign in to access the cart".into()),
    }
}

/// Show the catalog.
pub fn products() -> CommandResult {
    for product in crate::catalog::demo_catalog().products() {
        info!(id = %product.id, name = %product.name, price = %product.price);
    }
    Ok(())
}

/// List cart lines with count and total.
pub fn list(identity: &Identity, cart: &Cart) -> CommandResult {
    require_active_session(identity)?;

    for item in cart.items() {
        info!(id = %item.id, name = %item.name, qty = item.qty, unit = %item.price);
    }
    info!(count = cart.count(), total = %cart.total(), "cart");
    Ok(())
}

/// Add a product by catalog id.
pub fn add(identity: &Identity, mut cart: Cart, id: &str, qty: u32) -> CommandResult {
    require_active_session(identity)?;

    cart.add(&ProductId::from(id), qty);
    info!(count = cart.count(), "cart updated");
    Ok(())
}

/// Overwrite a line's quantity.
pub fn set_qty(identity: &Identity, mut cart: Cart, id: &str, qty: u32) -> CommandResult {
    require_active_session(identity)?;

    cart.set_qty(&ProductId::from(id), qty);
    info!(count = cart.count(), "cart updated");
    Ok(())
}

/// Remove a line.
pub fn remove(identity: &Identity, mut cart: Cart, id: &str) -> CommandResult {
    require_active_session(identity)?;

    cart.remove(&ProductId::from(id));
    info!(count = cart.count(), "cart updated");
    Ok(())
}

/// Empty the cart.
pub fn clear(identity: &Identity, mut cart: Cart) -> CommandResult {
    require_active_session(identity)?;

    cart.clear();
    info!("cart emptied");
    Ok(())
}
