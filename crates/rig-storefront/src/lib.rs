//! Application stores and checkout orchestration for the RigForge
//! PC-hardware storefront.
//!
//! Each store is a cheaply-cloneable handle over single-threaded shared
//! state, wired to its collaborators by explicit injection:
//!
//! - [`CatalogStore`]: categories/products from the hosted database, with
//!   text search, debounced reloads, and stale-response discarding
//! - [`CartStore`]: the persisted shopping cart, resolved against the
//!   catalog
//! - [`BuilderStore`]: the guided PC-builder flow with
//!   validation-as-state
//! - [`CheckoutStore`]: payment-session creation and the return flow
//!
//! # Example
//!
//! ```rust,ignore
//! use rig_storefront::prelude::*;
//!
//! let catalog = CatalogStore::new(api.clone());
//! let cart = CartStore::new(catalog.clone(), storage, config.currency);
//! let builder = BuilderStore::new(catalog.clone(), cart.clone());
//! let checkout = CheckoutStore::new(payment, cart.clone(), config);
//!
//! catalog.load_products(None).await;
//! cart.load_cart().await;
//! ```

mod builder;
mod cart;
mod catalog;
mod checkout;
mod config;
mod debounce;
pub mod messages;

pub use builder::BuilderStore;
pub use cart::CartStore;
pub use catalog::{CatalogStore, DEBOUNCE_WINDOW};
pub use checkout::CheckoutStore;
pub use config::StorefrontConfig;
pub use debounce::Debouncer;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        BuilderStore, CartStore, CatalogStore, CheckoutStore, StorefrontConfig,
    };
    pub use rig_commerce::prelude::*;
}
