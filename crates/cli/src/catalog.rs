//! Built-in demo catalog.
//!
//! Stands in for the real product feed; prices are in CLP.

use rust_decimal::Decimal;

use meeple_market_core::{CurrencyCode, Price, ProductId};
use meeple_market_store::{Product, StaticCatalog};

fn product(id: &str, name: &str, price: i64, image: &str) -> Product {
    Product {
        id: ProductId::from(id),
        name: name.to_owned(),
        price: Price::new(Decimal::from(price), CurrencyCode::CLP),
        image: image.to_owned(),
    }
}

/// The fixed demo product list.
#[must_use]
pub fn demo_catalog() -> StaticCatalog {
    StaticCatalog::new(vec![
        product("catan", "Catan", 24_990, "img/catan.webp"),
        product("carcassonne", "Carcassonne", 19_990, "img/carcassonne.webp"),
        product("azul", "Azul", 21_990, "img/azul.webp"),
        product("wingspan", "Wingspan", 39_990, "img/wingspan.webp"),
        product("dixit", "Dixit", 17_990, "img/dixit.webp"),
        product("virus", "Virus!", 8_990, "img/virus.webp"),
    ])
}
