//! Cart store: the ordered set of unique product line items.
//!
//! Owns the working copy of the `cart` storage key, independent of identity.
//! Every mutation persists synchronously and then notifies subscribers with
//! an empty broadcast; subscribers re-fetch whatever state they need via
//! [`CartStore::items`], [`CartStore::count`], or [`CartStore::total`].

use rust_decimal::Decimal;

use meeple_market_core::ProductId;

use crate::catalog::ProductCatalog;
use crate::models::CartItem;
use crate::storage::{KeyValueStorage, read_json_or_default, write_json};

const CART_KEY: &str = "cart";

type Subscriber = Box<dyn Fn() + Send + Sync>;

/// State container for the active cart.
///
/// An explicit instance with injected storage and catalog, so tests (and any
/// second front end) construct isolated carts instead of sharing process-wide
/// state.
pub struct CartStore<S: KeyValueStorage, C: ProductCatalog> {
    storage: S,
    catalog: C,
    items: Vec<CartItem>,
    subscribers: Vec<Subscriber>,
}

impl<S: KeyValueStorage, C: ProductCatalog> CartStore<S, C> {
    /// Create a cart over the given storage and catalog, loading the
    /// persisted line items (empty on absence or corruption).
    pub fn new(storage: S, catalog: C) -> Self {
        let items = read_json_or_default(&storage, CART_KEY);
        Self {
            storage,
            catalog,
            items,
            subscribers: Vec::new(),
        }
    }

    /// Register a change listener. The broadcast carries no payload.
    ///
    /// The listener is invoked once immediately, so late subscribers observe
    /// the initial load the same way they observe every later mutation.
    pub fn subscribe(&mut self, listener: impl Fn() + Send + Sync + 'static) {
        listener();
        self.subscribers.push(Box::new(listener));
    }

    /// Snapshot of the current line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.items.clone()
    }

    /// Add `qty` units of a product.
    ///
    /// An existing line for the product has its quantity increased; otherwise
    /// a new line is appended with the product's display fields captured as
    /// of now. Unknown product ids are a logged no-op.
    pub fn add(&mut self, id: &ProductId, qty: u32) {
        let Some(product) = self.catalog.product(id) else {
            tracing::warn!(product_id = %id, "product not found, ignoring add");
            return;
        };

        if let Some(line) = self.items.iter_mut().find(|it| &it.id == id) {
            line.qty += qty;
        } else {
            self.items.push(CartItem {
                id: product.id,
                name: product.name,
                price: product.price,
                image: product.image,
                qty,
            });
        }
        self.persist_and_notify();
    }

    /// Overwrite the quantity of an existing line, clamped to a minimum
    /// of 1. Unknown ids are a no-op.
    pub fn set_qty(&mut self, id: &ProductId, qty: u32) {
        let Some(line) = self.items.iter_mut().find(|it| &it.id == id) else {
            return;
        };
        line.qty = qty.max(1);
        self.persist_and_notify();
    }

    /// Remove the line for a product. Persists and notifies whether or not a
    /// match existed.
    pub fn remove(&mut self, id: &ProductId) {
        self.items.retain(|it| &it.id != id);
        self.persist_and_notify();
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist_and_notify();
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.items.iter().map(|it| it.qty).sum()
    }

    /// Sum of unit price times quantity across all lines, using each line's
    /// captured price.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(|it| it.price.line_total(it.qty)).sum()
    }

    fn persist_and_notify(&self) {
        write_json(&self.storage, CART_KEY, &self.items);
        self.notify();
    }

    fn notify(&self) {
        for listener in &self.subscribers {
            listener();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use meeple_market_core::{CurrencyCode, Price};

    use crate::catalog::{Product, StaticCatalog};
    use crate::storage::MemoryStorage;

    fn catalog() -> StaticCatalog {
        StaticCatalog::new(vec![
            Product {
                id: ProductId::from("catan"),
                name: "Catan".to_owned(),
                price: Price::new(Decimal::from(24990), CurrencyCode::CLP),
                image: "img/catan.webp".to_owned(),
            },
            Product {
                id: ProductId::from("azul"),
                name: "Azul".to_owned(),
                price: Price::new(Decimal::from(21990), CurrencyCode::CLP),
                image: "img/azul.webp".to_owned(),
            },
        ])
    }

    fn cart() -> CartStore<MemoryStorage, StaticCatalog> {
        CartStore::new(MemoryStorage::new(), catalog())
    }

    #[test]
    fn test_add_merges_lines_for_same_product() {
        let mut cart = cart();
        cart.add(&ProductId::from("catan"), 2);
        cart.add(&ProductId::from("catan"), 3);

        let items = cart.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items.first().unwrap().qty, 5);
    }

    #[test]
    fn test_add_unknown_product_is_noop() {
        let mut cart = cart();
        cart.add(&ProductId::from("ghost"), 1);
        assert!(cart.items().is_empty());
    }

    #[test]
    fn test_set_qty_clamps_to_one() {
        let mut cart = cart();
        cart.add(&ProductId::from("azul"), 4);
        cart.set_qty(&ProductId::from("azul"), 0);
        assert_eq!(cart.items().first().unwrap().qty, 1);
    }

    #[test]
    fn test_set_qty_unknown_id_is_noop() {
        let mut cart = cart();
        cart.add(&ProductId::from("azul"), 2);
        cart.set_qty(&ProductId::from("ghost"), 7);
        assert_eq!(cart.items().first().unwrap().qty, 2);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = cart();
        cart.add(&ProductId::from("catan"), 1);
        cart.add(&ProductId::from("azul"), 1);

        cart.remove(&ProductId::from("catan"));
        assert_eq!(cart.items().len(), 1);

        cart.clear();
        assert!(cart.items().is_empty());
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn test_count_and_total() {
        let mut cart = cart();
        cart.add(&ProductId::from("catan"), 2);
        cart.add(&ProductId::from("azul"), 1);

        assert_eq!(cart.count(), 3);
        assert_eq!(cart.total(), Decimal::from(24990 * 2 + 21990));
    }

    #[test]
    fn test_items_snapshot_is_defensive() {
        let mut cart = cart();
        cart.add(&ProductId::from("catan"), 1);

        let mut snapshot = cart.items();
        snapshot.first_mut().unwrap().qty = 99;
        assert_eq!(cart.items().first().unwrap().qty, 1);
    }

    #[test]
    fn test_subscribers_notified_on_subscribe_and_after_each_mutation() {
        let mut cart = cart();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        cart.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        // One broadcast replays the current state to the new subscriber.
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        cart.add(&ProductId::from("catan"), 1);
        cart.set_qty(&ProductId::from("catan"), 3);
        cart.remove(&ProductId::from("catan"));
        cart.clear();

        assert_eq!(hits.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_persisted_items_reload_in_new_instance() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::new(storage.clone(), catalog());
        cart.add(&ProductId::from("azul"), 2);
        drop(cart);

        let reloaded = CartStore::new(storage, catalog());
        assert_eq!(reloaded.count(), 2);
    }

    #[test]
    fn test_corrupt_cart_loads_empty() {
        let storage = MemoryStorage::new();
        storage.set("cart", "][");
        let cart = CartStore::new(storage, catalog());
        assert!(cart.items().is_empty());
    }

    #[test]
    fn test_total_uses_captured_price_not_catalog() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::new(storage.clone(), catalog());
        cart.add(&ProductId::from("catan"), 1);
        drop(cart);

        // Reload against a catalog with a different price for the same id.
        let repriced = StaticCatalog::new(vec![Product {
            id: ProductId::from("catan"),
            name: "Catan".to_owned(),
            price: Price::new(Decimal::from(99_999), CurrencyCode::CLP),
            image: "img/catan.webp".to_owned(),
        }]);
        let reloaded = CartStore::new(storage, repriced);
        assert_eq!(reloaded.total(), Decimal::from(24990));
    }
}
