//! Category types for product organization.

use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A product category in the catalog.
///
/// Categories are sourced from the remote database and read-only from the
/// storefront's perspective; the unique `slug` identifies them in URLs and
/// builder slots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// URL-friendly slug (unique).
    pub slug: String,
    /// Category description.
    pub description: Option<String>,
    /// Icon name for listings.
    pub icon: Option<String>,
}

impl Category {
    /// Create a new category.
    pub fn new(
        id: impl Into<CategoryId>,
        name: impl Into<String>,
        slug: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
            description: None,
            icon: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the icon.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_creation() {
        let cat = Category::new("cat-1", "Processors", "cpu");
        assert_eq!(cat.slug, "cpu");
        assert_eq!(cat.name, "Processors");
        assert!(cat.description.is_none());
    }

    #[test]
    fn test_category_builder() {
        let cat = Category::new("cat-2", "Graphics Cards", "gpu")
            .with_description("Discrete graphics")
            .with_icon("gpu-chip");

        assert_eq!(cat.description.as_deref(), Some("Discrete graphics"));
        assert_eq!(cat.icon.as_deref(), Some("gpu-chip"));
    }
}
