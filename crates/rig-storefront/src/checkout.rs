//! Checkout store: payment-session creation and the return flow.

use crate::cart::CartStore;
use crate::config::StorefrontConfig;
use crate::messages;
use rig_commerce::checkout::{
    payment_items, CheckoutFlow, CheckoutPhase, CustomerInfo, PaymentItem, PaymentReturn,
    SessionRequest,
};
use rig_commerce::UserId;
use rig_data::PaymentApi;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct CheckoutState {
    flow: CheckoutFlow,
}

/// Store orchestrating checkout against the payment collaborator.
///
/// The cart is cleared only when the provider confirms payment on the
/// return page, never at session-creation time.
#[derive(Clone)]
pub struct CheckoutStore {
    state: Rc<RefCell<CheckoutState>>,
    api: Rc<dyn PaymentApi>,
    cart: CartStore,
    config: StorefrontConfig,
}

impl CheckoutStore {
    /// Create a checkout store over the given collaborator and cart.
    pub fn new(api: Rc<dyn PaymentApi>, cart: CartStore, config: StorefrontConfig) -> Self {
        Self {
            state: Rc::new(RefCell::new(CheckoutState::default())),
            api,
            cart,
            config,
        }
    }

    /// Provider line items for the current cart.
    pub fn line_items(&self) -> Vec<PaymentItem> {
        payment_items(&self.cart.resolved_lines())
    }

    /// Create a payment session and return the redirect URL.
    ///
    /// Refuses on an empty cart and on a submission already in flight. Any
    /// collaborator failure records a short message, recoverable by
    /// resubmitting; the cart is left untouched either way.
    pub async fn submit(&self, customer: &CustomerInfo, user: Option<&UserId>) -> Option<String> {
        if self.cart.is_empty() {
            tracing::warn!("checkout submit ignored: cart is empty");
            return None;
        }
        if self.state.borrow_mut().flow.begin().is_err() {
            tracing::debug!("checkout submit ignored: already processing");
            return None;
        }

        let lines = self.cart.resolved_lines();
        let order_summary: Vec<serde_json::Value> = lines
            .iter()
            .map(|l| json!({ "name": l.product.name, "quantity": l.quantity }))
            .collect();
        let request = SessionRequest {
            line_items: payment_items(&lines),
            customer_data: customer.clone(),
            success_url: self.config.success_url.clone(),
            cancel_url: self.config.cancel_url.clone(),
            metadata: json!({
                "user_id": user.map(|u| u.as_str()),
                "order_summary": order_summary,
                "total_cents": self.cart.total_price().amount_cents,
            }),
        };

        match self.api.create_session(&request).await {
            Ok(response) => {
                self.state
                    .borrow_mut()
                    .flow
                    .succeed(response.url.clone())
                    .ok();
                Some(response.url)
            }
            Err(e) => {
                tracing::error!(error = %e, "payment session creation failed");
                self.state
                    .borrow_mut()
                    .flow
                    .fail(messages::CHECKOUT_FAILED)
                    .ok();
                None
            }
        }
    }

    /// The current checkout phase.
    pub fn phase(&self) -> CheckoutPhase {
        self.state.borrow().flow.phase().clone()
    }

    /// The redirect URL, when a session has been created.
    pub fn redirect_url(&self) -> Option<String> {
        self.state.borrow().flow.redirect_url().map(String::from)
    }

    /// The failure message, when the last submission failed.
    pub fn error(&self) -> Option<String> {
        self.state.borrow().flow.error().map(String::from)
    }

    /// Return to idle so the form can be resubmitted.
    pub fn reset(&self) {
        self.state.borrow_mut().flow.reset();
    }

    /// Parse the provider's return-page query parameters; an approved
    /// payment clears the cart.
    pub fn handle_return(&self, query: &str) -> PaymentReturn {
        let payment_return = PaymentReturn::from_query(query);
        if payment_return.status.is_approved() {
            tracing::info!(
                payment_id = payment_return.payment_id.as_deref().unwrap_or("unknown"),
                "payment approved; clearing cart"
            );
            self.cart.clear_cart();
        }
        payment_return
    }
}
