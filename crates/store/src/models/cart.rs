//! Cart line item.

use serde::{Deserialize, Serialize};

use meeple_market_core::{Price, ProductId};

/// One row in the cart: a unique product and its quantity.
///
/// Display fields are copied from the catalog when the line is created, so a
/// later catalog change does not affect lines already in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Catalog id of the product.
    pub id: ProductId,
    /// Product name at add time.
    pub name: String,
    /// Unit price at add time.
    pub price: Price,
    /// Image reference at add time.
    pub image: String,
    /// Quantity, always >= 1.
    pub qty: u32,
}
