//! Domain types and logic for the RigForge PC-hardware storefront.
//!
//! This crate holds the pure (I/O-free) core of the storefront:
//!
//! - **Catalog**: products, categories, hardware specifications
//! - **Cart**: product/quantity lines, catalog resolution, totals
//! - **Builder**: the guided PC-assembly flow with per-slot quantity rules
//!   and the CPU/motherboard socket compatibility check
//! - **Checkout**: payment line items, session payloads, return-flow
//!   parsing, and the checkout phase machine
//!
//! # Example
//!
//! ```rust,ignore
//! use rig_commerce::prelude::*;
//!
//! let mut cart = Cart::new();
//! cart.add(cpu.id.clone(), 1)?;
//! cart.add(case.id.clone(), 1)?;
//!
//! let lines = cart.resolve(|id| catalog.iter().find(|p| &p.id == id));
//! let totals = cart_totals(&lines, Currency::Ars)?;
//! println!("Total: {}", totals.subtotal.display());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod builder;
pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Category, Product, SOCKET_SPEC};

    // Cart
    pub use crate::cart::{cart_totals, Cart, CartLine, CartTotals, ResolvedLine};

    // Builder
    pub use crate::builder::{
        Build, BuildReadiness, ComponentSlot, QuantityRule, Selection, SelectionRejection,
        SocketConflict,
    };

    // Checkout
    pub use crate::checkout::{
        payment_items, CheckoutFlow, CheckoutPhase, CustomerInfo, PaymentItem, PaymentReturn,
        PaymentStatus, SessionRequest, SessionResponse,
    };
}
