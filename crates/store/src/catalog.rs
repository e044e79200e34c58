//! Product catalog boundary.
//!
//! The cart resolves product ids against a read-only catalog and copies the
//! display fields it needs at add time. The catalog itself (where products
//! come from, categories, discounts) is outside the core; only the lookup
//! contract lives here.

use meeple_market_core::{Price, ProductId};

/// A product as seen by the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
}

/// Read-only product lookup.
pub trait ProductCatalog {
    /// Resolve a product by id. `None` if the id is unknown.
    fn product(&self, id: &ProductId) -> Option<Product>;
}

/// A catalog backed by a fixed in-memory list.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    /// Create a catalog from a fixed product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

impl ProductCatalog for StaticCatalog {
    fn product(&self, id: &ProductId) -> Option<Product> {
        self.products.iter().find(|p| &p.id == id).cloned()
    }
}

impl<C: ProductCatalog + ?Sized> ProductCatalog for &C {
    fn product(&self, id: &ProductId) -> Option<Product> {
        (**self).product(id)
    }
}
