//! Remote data access for the RigForge storefront.
//!
//! Consumes the hosted database's `categories`/`products` read endpoints
//! and the payment-session endpoint through the [`CatalogApi`] and
//! [`PaymentApi`] collaborator traits. Remote rows are deserialized into
//! row structs and mapped once into the canonical domain model at this
//! boundary.
//!
//! The HTTP implementations ride the platform fetch API on the wasm32
//! target; native builds get the traits and the pure pieces (rows, query
//! construction, retry policy) for wiring and tests.

mod api;
mod error;
mod http;
mod query;
mod retry;
mod rows;

pub use api::{CatalogApi, PaymentApi};
pub use error::DataError;
pub use http::RemoteConfig;
pub use query::SelectQuery;
pub use retry::RetryPolicy;
pub use rows::{map_categories, map_products, CategoryRow, ProductRow};

#[cfg(target_arch = "wasm32")]
pub use http::{HttpCatalogApi, HttpPaymentApi};
