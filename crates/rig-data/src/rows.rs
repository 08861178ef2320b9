//! Remote row shapes and their mapping into the domain model.
//!
//! The hosted database's column names live here and nowhere else; each row
//! type has exactly one mapping function into the canonical domain shape.

use rig_commerce::catalog::{Category, Product};
use rig_commerce::{Currency, Money};
use serde::Deserialize;
use std::collections::BTreeMap;

/// A row of the remote `categories` table.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRow {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

impl CategoryRow {
    /// Map into the canonical domain category.
    pub fn into_domain(self) -> Category {
        Category {
            id: self.id.into(),
            name: self.name,
            slug: self.slug,
            description: self.description,
            icon: self.icon,
        }
    }
}

/// A row of the remote `products` table. Prices are integer minor units.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRow {
    pub id: String,
    pub category_id: String,
    pub brand: String,
    pub model: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: i64,
    pub stock: i64,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub specifications: BTreeMap<String, String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl ProductRow {
    /// Map into the canonical domain product.
    pub fn into_domain(self, currency: Currency) -> Product {
        Product {
            id: self.id.into(),
            category_id: self.category_id.into(),
            brand: self.brand,
            model: self.model,
            name: self.name,
            description: self.description,
            price: Money::new(self.price.max(0), currency),
            stock: self.stock.max(0),
            image_url: self.image_url,
            specifications: self.specifications,
        }
    }
}

/// Map category rows into domain categories.
pub fn map_categories(rows: Vec<CategoryRow>) -> Vec<Category> {
    rows.into_iter().map(CategoryRow::into_domain).collect()
}

/// Map product rows into domain products, skipping inactive rows.
pub fn map_products(rows: Vec<ProductRow>, currency: Currency) -> Vec<Product> {
    rows.into_iter()
        .filter(|r| r.active)
        .map(|r| r.into_domain(currency))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_row_mapping() {
        let json = r#"{
            "id": "p1",
            "category_id": "cat-cpu",
            "brand": "AMD",
            "model": "Ryzen 5 7600",
            "name": "AMD Ryzen 5 7600",
            "description": "6-core processor",
            "price": 22999900,
            "stock": 4,
            "image_url": "https://img.example/p1.jpg",
            "specifications": {"socket": "AM5", "cores": "6"}
        }"#;

        let row: ProductRow = serde_json::from_str(json).unwrap();
        assert!(row.active); // defaulted

        let product = row.into_domain(Currency::Ars);
        assert_eq!(product.id.as_str(), "p1");
        assert_eq!(product.price.amount_cents, 22999900);
        assert_eq!(product.socket(), Some("AM5"));
    }

    #[test]
    fn test_negative_values_clamped() {
        let json = r#"{
            "id": "p1",
            "category_id": "c",
            "brand": "B",
            "model": "M",
            "name": "N",
            "price": -5,
            "stock": -2
        }"#;

        let product: Product = serde_json::from_str::<ProductRow>(json)
            .unwrap()
            .into_domain(Currency::Ars);
        assert_eq!(product.price.amount_cents, 0);
        assert_eq!(product.stock, 0);
    }

    #[test]
    fn test_map_products_skips_inactive() {
        let rows = vec![
            serde_json::from_str::<ProductRow>(
                r#"{"id":"p1","category_id":"c","brand":"B","model":"M","name":"N","price":1,"stock":1,"active":true}"#,
            )
            .unwrap(),
            serde_json::from_str::<ProductRow>(
                r#"{"id":"p2","category_id":"c","brand":"B","model":"M","name":"N","price":1,"stock":1,"active":false}"#,
            )
            .unwrap(),
        ];

        let products = map_products(rows, Currency::Ars);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id.as_str(), "p1");
    }

    #[test]
    fn test_category_row_mapping() {
        let json = r#"{"id":"c1","name":"Processors","slug":"cpu","icon":"chip"}"#;
        let category = serde_json::from_str::<CategoryRow>(json)
            .unwrap()
            .into_domain();
        assert_eq!(category.slug, "cpu");
        assert_eq!(category.icon.as_deref(), Some("chip"));
        assert!(category.description.is_none());
    }
}
