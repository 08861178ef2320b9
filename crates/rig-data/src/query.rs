//! REST query-URL construction for the hosted database.

use std::fmt::Write as _;

/// A select query against one table of the hosted database's REST surface.
///
/// Builds URLs of the form
/// `{base}/rest/v1/{table}?select=*&{col}=eq.{value}&order={col}`.
#[derive(Debug, Clone)]
pub struct SelectQuery {
    table: String,
    filters: Vec<(String, String)>,
    order: Option<String>,
}

impl SelectQuery {
    /// Create a query selecting all columns of a table.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            filters: Vec::new(),
            order: None,
        }
    }

    /// Add an equality filter on a column.
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((column.into(), value.into()));
        self
    }

    /// Order results by a column, ascending.
    pub fn order(mut self, column: impl Into<String>) -> Self {
        self.order = Some(column.into());
        self
    }

    /// Build the request URL against a base URL.
    pub fn build(&self, base_url: &str) -> String {
        let mut url = format!(
            "{}/rest/v1/{}?select=*",
            base_url.trim_end_matches('/'),
            self.table
        );
        for (column, value) in &self.filters {
            let _ = write!(url, "&{}=eq.{}", column, encode(value));
        }
        if let Some(order) = &self.order {
            let _ = write!(url, "&order={}", order);
        }
        url
    }
}

/// Minimal percent-encoding for filter values (ids and slugs).
fn encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for b in value.bytes() {
        match b {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => {
                let _ = write!(out, "%{:02X}", b);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_all() {
        let url = SelectQuery::new("categories")
            .order("name")
            .build("https://db.example");
        assert_eq!(url, "https://db.example/rest/v1/categories?select=*&order=name");
    }

    #[test]
    fn test_filters() {
        let url = SelectQuery::new("products")
            .eq("active", "true")
            .eq("category_id", "cat-1")
            .order("name")
            .build("https://db.example/");

        assert_eq!(
            url,
            "https://db.example/rest/v1/products?select=*&active=eq.true&category_id=eq.cat-1&order=name"
        );
    }

    #[test]
    fn test_encodes_filter_values() {
        let url = SelectQuery::new("products")
            .eq("name", "a b/c")
            .build("https://db.example");
        assert!(url.ends_with("&name=eq.a%20b%2Fc"));
    }
}
