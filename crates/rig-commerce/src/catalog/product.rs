//! Product types.

use crate::ids::{CategoryId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Specification key holding the CPU/motherboard socket name.
pub const SOCKET_SPEC: &str = "socket";

/// A product in the catalog.
///
/// Invariants: `stock >= 0` and `price` is non-negative. Hardware details
/// live in the `specifications` map (e.g., `socket`, `wattage`, `capacity`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Category this product belongs to.
    pub category_id: CategoryId,
    /// Manufacturer brand (e.g., "AMD").
    pub brand: String,
    /// Model designation (e.g., "Ryzen 7 9800X3D").
    pub model: String,
    /// Full display name.
    pub name: String,
    /// Description for listings.
    pub description: String,
    /// Unit price.
    pub price: Money,
    /// Units in stock (never negative).
    pub stock: i64,
    /// Image URL for listings.
    pub image_url: String,
    /// Hardware specifications as key/value pairs.
    pub specifications: BTreeMap<String, String>,
}

impl Product {
    /// Create a new product with empty description and specifications.
    pub fn new(
        id: impl Into<ProductId>,
        category_id: impl Into<CategoryId>,
        brand: impl Into<String>,
        model: impl Into<String>,
        name: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            id: id.into(),
            category_id: category_id.into(),
            brand: brand.into(),
            model: model.into(),
            name: name.into(),
            description: String::new(),
            price,
            stock: 0,
            image_url: String::new(),
            specifications: BTreeMap::new(),
        }
    }

    /// Set the stock level.
    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = stock.max(0);
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the image URL.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = url.into();
        self
    }

    /// Add a specification entry.
    pub fn with_spec(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.specifications.insert(key.into(), value.into());
        self
    }

    /// Check if at least one unit is in stock.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Check if a specific quantity can be fulfilled from stock.
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        quantity > 0 && self.stock >= quantity
    }

    /// Get the socket specification, if any.
    pub fn socket(&self) -> Option<&str> {
        self.specifications.get(SOCKET_SPEC).map(String::as_str)
    }

    /// Case-insensitive substring match over name, brand, model, and
    /// description.
    pub fn matches_search(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.brand.to_lowercase().contains(&term)
            || self.model.to_lowercase().contains(&term)
            || self.description.to_lowercase().contains(&term)
    }
}
