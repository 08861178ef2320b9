//! Collaborator traits for remote services.

use crate::DataError;
use async_trait::async_trait;
use rig_commerce::catalog::{Category, Product};
use rig_commerce::checkout::{SessionRequest, SessionResponse};
use rig_commerce::CategoryId;

/// Read access to the hosted catalog database.
///
/// Futures are `?Send`: the storefront is single-threaded and suspends
/// cooperatively at these boundaries.
#[async_trait(?Send)]
pub trait CatalogApi {
    /// Fetch all categories.
    async fn fetch_categories(&self) -> Result<Vec<Category>, DataError>;

    /// Fetch active products, optionally filtered to one category.
    async fn fetch_products(
        &self,
        category: Option<&CategoryId>,
    ) -> Result<Vec<Product>, DataError>;
}

/// The payment provider's session endpoint.
#[async_trait(?Send)]
pub trait PaymentApi {
    /// Create a provider-hosted checkout session and return its redirect
    /// URL.
    async fn create_session(
        &self,
        request: &SessionRequest,
    ) -> Result<SessionResponse, DataError>;
}
