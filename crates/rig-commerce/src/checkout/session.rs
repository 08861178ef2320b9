//! Payment-session payloads and return-flow parsing.

use crate::cart::ResolvedLine;
use serde::{Deserialize, Serialize};

/// One provider line item, priced in minor currency units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentItem {
    /// Display title.
    pub title: String,
    /// Unit price in minor currency units.
    pub unit_price: i64,
    /// Units purchased.
    pub quantity: i64,
    /// Product image shown in the provider's flow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
}

/// Map resolved cart lines to provider line items.
pub fn payment_items(lines: &[ResolvedLine]) -> Vec<PaymentItem> {
    lines
        .iter()
        .map(|line| PaymentItem {
            title: line.product.name.clone(),
            unit_price: line.product.price.amount_cents,
            quantity: line.quantity,
            picture_url: if line.product.image_url.is_empty() {
                None
            } else {
                Some(line.product.image_url.clone())
            },
        })
        .collect()
}

/// Customer data forwarded to the payment provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Request body for the payment-session endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionRequest {
    pub line_items: Vec<PaymentItem>,
    pub customer_data: CustomerInfo,
    pub success_url: String,
    pub cancel_url: String,
    /// Arbitrary metadata (user id, serialized order summary).
    pub metadata: serde_json::Value,
}

/// Response body from the payment-session endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionResponse {
    /// Provider-hosted URL to redirect the browser to.
    pub url: String,
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

/// Payment status reported on the provider's return redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Approved,
    Other(String),
}

impl PaymentStatus {
    pub fn from_str(s: &str) -> Self {
        if s == "approved" {
            PaymentStatus::Approved
        } else {
            PaymentStatus::Other(s.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PaymentStatus::Approved => "approved",
            PaymentStatus::Other(s) => s,
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, PaymentStatus::Approved)
    }
}

/// Query parameters the provider appends to the return-page URL.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentReturn {
    pub payment_id: Option<String>,
    pub status: PaymentStatus,
    pub status_detail: Option<String>,
    pub external_reference: Option<String>,
}

impl PaymentReturn {
    /// Parse a return-page query string (with or without a leading `?`).
    ///
    /// Unknown parameters are ignored; a missing `status` parses as a
    /// non-approved status.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);

        let mut payment_id = None;
        let mut status = None;
        let mut status_detail = None;
        let mut external_reference = None;

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = match pair.split_once('=') {
                Some((k, v)) => (k, percent_decode(v)),
                None => (pair, String::new()),
            };
            match key {
                "payment_id" => payment_id = Some(value),
                "status" => status = Some(value),
                "status_detail" => status_detail = Some(value),
                "external_reference" => external_reference = Some(value),
                _ => {}
            }
        }

        Self {
            payment_id,
            status: PaymentStatus::from_str(status.as_deref().unwrap_or("")),
            status_detail,
            external_reference,
        }
    }
}

/// Decode `%XX` escapes and `+` in a query-string value. Malformed escapes
/// pass through unchanged.
fn percent_decode(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                if let Some(hex) = value.get(i + 1..i + 3) {
                    if let Ok(byte) = u8::from_str_radix(hex, 16) {
                        out.push(byte);
                        i += 3;
                        continue;
                    }
                }
                out.push(b'%');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::money::{Currency, Money};

    #[test]
    fn test_payment_items_from_lines() {
        let lines = vec![ResolvedLine {
            product: Product::new(
                "p1",
                "cat-1",
                "AMD",
                "Ryzen 5",
                "AMD Ryzen 5 7600",
                Money::new(22999900, Currency::Ars),
            )
            .with_image_url("https://img.example/p1.jpg"),
            quantity: 2,
        }];

        let items = payment_items(&lines);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "AMD Ryzen 5 7600");
        assert_eq!(items[0].unit_price, 22999900);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(
            items[0].picture_url.as_deref(),
            Some("https://img.example/p1.jpg")
        );
    }

    #[test]
    fn test_payment_items_omit_empty_image() {
        let lines = vec![ResolvedLine {
            product: Product::new(
                "p1",
                "cat-1",
                "Brand",
                "Model",
                "Name",
                Money::new(100, Currency::Ars),
            ),
            quantity: 1,
        }];

        assert!(payment_items(&lines)[0].picture_url.is_none());
    }

    #[test]
    fn test_session_response_wire_shape() {
        let json = r#"{"url":"https://pay.example/s/1","sessionId":"sess-1"}"#;
        let resp: SessionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.session_id, "sess-1");
    }

    #[test]
    fn test_return_query_approved() {
        let ret = PaymentReturn::from_query(
            "?payment_id=12345&status=approved&status_detail=accredited&external_reference=order-9",
        );
        assert_eq!(ret.payment_id.as_deref(), Some("12345"));
        assert!(ret.status.is_approved());
        assert_eq!(ret.status_detail.as_deref(), Some("accredited"));
        assert_eq!(ret.external_reference.as_deref(), Some("order-9"));
    }

    #[test]
    fn test_return_query_rejected() {
        let ret = PaymentReturn::from_query("payment_id=9&status=rejected&ignored=x");
        assert!(!ret.status.is_approved());
        assert_eq!(ret.status.as_str(), "rejected");
    }

    #[test]
    fn test_return_query_missing_status() {
        let ret = PaymentReturn::from_query("payment_id=9");
        assert!(!ret.status.is_approved());
    }

    #[test]
    fn test_percent_decode() {
        assert_eq!(percent_decode("a%20b+c"), "a b c");
        assert_eq!(percent_decode("100%"), "100%");
    }
}
