//! Cart and cart line types.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// One product-id/quantity pairing held in the cart.
///
/// This is also the persisted wire shape: the cart is stored on the device
/// as a JSON array of `{"productId": ..., "quantity": ...}` objects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Referenced product.
    #[serde(rename = "productId")]
    pub product_id: ProductId,
    /// Units of the product (always positive).
    pub quantity: i64,
}

/// A cart line joined against the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLine {
    /// The resolved product.
    pub product: Product,
    /// Units of the product.
    pub quantity: i64,
}

/// A shopping cart: an ordered set of product/quantity lines, at most one
/// line per product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from persisted lines, discarding non-positive
    /// quantities and collapsing duplicate product ids.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            if line.quantity > 0 {
                // saturate rather than fail on malformed persisted data
                match cart.lines.iter_mut().find(|l| l.product_id == line.product_id) {
                    Some(existing) => {
                        existing.quantity = existing.quantity.saturating_add(line.quantity)
                    }
                    None => cart.lines.push(line),
                }
            }
        }
        cart
    }

    /// The current lines, in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Add units of a product, incrementing an existing line or appending a
    /// new one.
    ///
    /// Returns an error if the quantity is not positive or the increment
    /// would overflow.
    pub fn add(&mut self, product_id: ProductId, quantity: i64) -> Result<(), CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        if let Some(existing) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            existing.quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;
            return Ok(());
        }

        self.lines.push(CartLine {
            product_id,
            quantity,
        });
        Ok(())
    }

    /// Overwrite a line's quantity.
    ///
    /// A quantity of zero or less removes the line. Stock is not re-checked
    /// here; callers validate against stock before mutating the cart.
    /// Returns whether the cart changed.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(product_id);
        }

        if let Some(line) = self.lines.iter_mut().find(|l| &l.product_id == product_id) {
            line.quantity = quantity;
            true
        } else {
            false
        }
    }

    /// Remove a line. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| &l.product_id != product_id);
        self.lines.len() < len_before
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Get a line by product id.
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product_id == product_id)
    }

    /// The quantity held for a product (zero if absent).
    pub fn quantity_of(&self, product_id: &ProductId) -> i64 {
        self.line(product_id).map(|l| l.quantity).unwrap_or(0)
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Number of distinct products.
    pub fn unique_count(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Join the lines against the catalog, keeping only lines whose product
    /// resolves.
    pub fn resolve<'a>(
        &self,
        lookup: impl Fn(&ProductId) -> Option<&'a Product>,
    ) -> Vec<ResolvedLine> {
        self.lines
            .iter()
            .filter_map(|l| {
                lookup(&l.product_id).map(|product| ResolvedLine {
                    product: product.clone(),
                    quantity: l.quantity,
                })
            })
            .collect()
    }

    /// Drop lines whose product no longer resolves against the catalog.
    /// Returns how many lines were dropped.
    pub fn retain_resolvable<'a>(
        &mut self,
        lookup: impl Fn(&ProductId) -> Option<&'a Product>,
    ) -> usize {
        let len_before = self.lines.len();
        self.lines.retain(|l| lookup(&l.product_id).is_some());
        len_before - self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    fn product(id: &str) -> Product {
        Product::new(
            id,
            "cat-1",
            "Brand",
            "Model",
            format!("Product {id}"),
            Money::new(1000, Currency::Ars),
        )
        .with_stock(10)
    }

    #[test]
    fn test_add_appends_line() {
        let mut cart = Cart::new();
        cart.add(ProductId::new("p1"), 2).unwrap();

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.unique_count(), 1);
    }

    #[test]
    fn test_add_same_product_sums_quantities() {
        let mut cart = Cart::new();
        cart.add(ProductId::new("p1"), 3).unwrap();
        cart.add(ProductId::new("p1"), 4).unwrap();

        assert_eq!(cart.unique_count(), 1);
        assert_eq!(cart.quantity_of(&ProductId::new("p1")), 7);
    }

    #[test]
    fn test_add_rejects_non_positive() {
        let mut cart = Cart::new();
        assert!(cart.add(ProductId::new("p1"), 0).is_err());
        assert!(cart.add(ProductId::new("p1"), -2).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add(ProductId::new("p1"), 2).unwrap();

        let mut by_update = cart.clone();
        by_update.update_quantity(&ProductId::new("p1"), 0);

        let mut by_remove = cart;
        by_remove.remove(&ProductId::new("p1"));

        assert_eq!(by_update, by_remove);
        assert!(by_update.is_empty());
    }

    #[test]
    fn test_update_quantity_overwrites() {
        let mut cart = Cart::new();
        cart.add(ProductId::new("p1"), 2).unwrap();
        assert!(cart.update_quantity(&ProductId::new("p1"), 5));
        assert_eq!(cart.quantity_of(&ProductId::new("p1")), 5);
    }

    #[test]
    fn test_update_quantity_unknown_product() {
        let mut cart = Cart::new();
        assert!(!cart.update_quantity(&ProductId::new("ghost"), 5));
    }

    #[test]
    fn test_resolve_drops_unknown_products() {
        let mut cart = Cart::new();
        cart.add(ProductId::new("p1"), 1).unwrap();
        cart.add(ProductId::new("gone"), 2).unwrap();

        let catalog = vec![product("p1")];
        let resolved = cart.resolve(|id| catalog.iter().find(|p| &p.id == id));

        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].product.id.as_str(), "p1");
    }

    #[test]
    fn test_retain_resolvable() {
        let mut cart = Cart::new();
        cart.add(ProductId::new("p1"), 1).unwrap();
        cart.add(ProductId::new("gone"), 2).unwrap();

        let catalog = vec![product("p1")];
        let dropped = cart.retain_resolvable(|id| catalog.iter().find(|p| &p.id == id));

        assert_eq!(dropped, 1);
        assert_eq!(cart.unique_count(), 1);
    }

    #[test]
    fn test_from_lines_sanitizes() {
        let cart = Cart::from_lines(vec![
            CartLine {
                product_id: ProductId::new("p1"),
                quantity: 2,
            },
            CartLine {
                product_id: ProductId::new("p2"),
                quantity: 0,
            },
            CartLine {
                product_id: ProductId::new("p1"),
                quantity: 1,
            },
        ]);

        assert_eq!(cart.unique_count(), 1);
        assert_eq!(cart.quantity_of(&ProductId::new("p1")), 3);
    }

    #[test]
    fn test_persisted_wire_shape() {
        let mut cart = Cart::new();
        cart.add(ProductId::new("p1"), 2).unwrap();

        let json = serde_json::to_string(cart.lines()).unwrap();
        assert_eq!(json, r#"[{"productId":"p1","quantity":2}]"#);
    }
}
