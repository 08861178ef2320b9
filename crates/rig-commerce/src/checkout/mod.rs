//! Checkout module.
//!
//! Contains payment line items, session payloads, return-flow parsing, and
//! the checkout phase machine.

mod flow;
mod session;

pub use flow::{CheckoutFlow, CheckoutPhase};
pub use session::{
    payment_items, CustomerInfo, PaymentItem, PaymentReturn, PaymentStatus, SessionRequest,
    SessionResponse,
};
