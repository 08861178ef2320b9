//! Builder store: the guided PC-assembly flow.

use crate::cart::CartStore;
use crate::catalog::CatalogStore;
use crate::messages;
use rig_commerce::builder::{Build, ComponentSlot, Selection};
use rig_commerce::catalog::Product;
use rig_commerce::ProductId;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Debug, Default)]
struct BuilderState {
    build: Build,
    step: usize,
    /// Per-product validation messages (stock/limit rejections).
    product_errors: BTreeMap<ProductId, String>,
    /// CPU/motherboard socket conflict message.
    socket_error: Option<String>,
    /// Aggregated missing/over-limit summary from the last commit attempt.
    summary_error: Option<String>,
    /// Generic failure message for an I/O error during commit.
    commit_error: Option<String>,
}

/// Store for the seven-step guided builder flow.
///
/// Validation failures are state, not errors: rejected selections and the
/// socket rule land in per-product/per-rule message fields that the UI
/// renders inline, and `commit_to_cart` aggregates anything still missing.
#[derive(Clone)]
pub struct BuilderStore {
    state: Rc<RefCell<BuilderState>>,
    catalog: CatalogStore,
    cart: CartStore,
}

impl BuilderStore {
    /// Create an empty builder over the given catalog and cart.
    pub fn new(catalog: CatalogStore, cart: CartStore) -> Self {
        Self {
            state: Rc::new(RefCell::new(BuilderState::default())),
            catalog,
            cart,
        }
    }

    /// The slot the guided flow is currently on.
    pub fn current_step(&self) -> ComponentSlot {
        ComponentSlot::ALL[self.state.borrow().step]
    }

    /// Advance to the next slot (no-op on the last).
    pub fn next_step(&self) {
        let mut state = self.state.borrow_mut();
        if state.step + 1 < ComponentSlot::ALL.len() {
            state.step += 1;
        }
    }

    /// Go back to the previous slot (no-op on the first).
    pub fn prev_step(&self) {
        let mut state = self.state.borrow_mut();
        state.step = state.step.saturating_sub(1);
    }

    /// The catalog products belonging to a slot's category.
    pub fn products_for(&self, slot: ComponentSlot) -> Vec<Product> {
        match self.catalog.category_by_slug(slot.slug()) {
            Some(category) => self
                .catalog
                .products()
                .into_iter()
                .filter(|p| p.category_id == category.id)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Record a selection for a slot, replacing any prior one there.
    ///
    /// A rejected quantity (over stock or over the slot limit) is recorded
    /// as a per-product message and the prior selection is kept.
    pub fn select_component(&self, slot: ComponentSlot, product_id: &ProductId, quantity: i64) {
        let Some(product) = self.catalog.product_by_id(product_id) else {
            tracing::warn!(product = %product_id, "selection ignored: unknown product");
            return;
        };

        {
            let mut state = self.state.borrow_mut();
            match state.build.select(slot, &product, quantity) {
                Ok(()) => {
                    state.product_errors.remove(&product.id);
                    state.summary_error = None;
                }
                Err(rejection) => {
                    state
                        .product_errors
                        .insert(product.id.clone(), messages::rejection(rejection));
                }
            }
        }
        self.validate_compatibility();
    }

    /// Increase the slot's quantity by one, clamped by stock and the slot
    /// maximum.
    pub fn increase_quantity(&self, slot: ComponentSlot) {
        let product = self
            .selection(slot)
            .and_then(|sel| self.catalog.product_by_id(&sel.product_id));
        if let Some(product) = product {
            self.state.borrow_mut().build.increase(slot, &product);
        }
    }

    /// Decrease the slot's quantity by one; reaching zero removes the
    /// selection.
    pub fn decrease_quantity(&self, slot: ComponentSlot) {
        self.state.borrow_mut().build.decrease(slot);
    }

    /// Re-run the CPU/motherboard socket rule and update its message.
    pub fn validate_compatibility(&self) {
        let products = self.catalog.products();
        let conflict = self
            .state
            .borrow()
            .build
            .socket_conflict(|id| products.iter().find(|p| &p.id == id));
        self.state.borrow_mut().socket_error = conflict.as_ref().map(messages::socket_mismatch);
    }

    /// The slot's current selection, if any.
    pub fn selection(&self, slot: ComponentSlot) -> Option<Selection> {
        self.state.borrow().build.selection(slot).cloned()
    }

    /// The validation message recorded for a product, if any.
    pub fn product_error(&self, product_id: &ProductId) -> Option<String> {
        self.state.borrow().product_errors.get(product_id).cloned()
    }

    /// The socket-conflict message, if the rule currently fails.
    pub fn socket_error(&self) -> Option<String> {
        self.state.borrow().socket_error.clone()
    }

    /// The aggregated missing/over-limit summary from the last commit
    /// attempt.
    pub fn summary_error(&self) -> Option<String> {
        self.state.borrow().summary_error.clone()
    }

    /// The generic failure message from an I/O error during commit.
    pub fn commit_error(&self) -> Option<String> {
        self.state.borrow().commit_error.clone()
    }

    /// Check if no slot has a selection.
    pub fn is_empty(&self) -> bool {
        self.state.borrow().build.is_empty()
    }

    /// Validate the whole build and, if it passes, forward every selection
    /// to the cart and clear the builder.
    ///
    /// Returns whether the build was committed. Slots below their minimum
    /// (or above their maximum) and socket conflicts block the commit and
    /// are recorded as state; the only hard failure is the catalog being
    /// unavailable for the stock re-check.
    pub async fn commit_to_cart(&self) -> bool {
        self.state.borrow_mut().commit_error = None;

        // selections may be stale relative to the catalog
        if !self.catalog.has_products() {
            self.catalog.load_products(None).await;
            if self.catalog.error().is_some() {
                tracing::error!("catalog unavailable during build commit");
                self.state.borrow_mut().commit_error =
                    Some(messages::BUILD_COMMIT_FAILED.to_string());
                return false;
            }
        }
        let products = self.catalog.products();

        let readiness = self
            .state
            .borrow()
            .build
            .readiness(|id| products.iter().find(|p| &p.id == id));

        if !readiness.missing.is_empty() {
            self.state.borrow_mut().summary_error =
                Some(messages::missing_components(&readiness.missing));
            return false;
        }
        if !readiness.over_limit.is_empty() {
            self.state.borrow_mut().summary_error =
                Some(messages::too_many_components(&readiness.over_limit));
            return false;
        }
        if let Some(conflict) = &readiness.socket_conflict {
            self.state.borrow_mut().socket_error = Some(messages::socket_mismatch(conflict));
            return false;
        }

        // stock re-check against the current catalog
        let selections: Vec<(ComponentSlot, Selection)> = self
            .state
            .borrow()
            .build
            .selections()
            .map(|(slot, sel)| (slot, sel.clone()))
            .collect();
        for (_, sel) in &selections {
            match products.iter().find(|p| p.id == sel.product_id) {
                None => {
                    self.state
                        .borrow_mut()
                        .product_errors
                        .insert(sel.product_id.clone(), messages::PRODUCT_UNAVAILABLE.into());
                    return false;
                }
                Some(product) if !product.can_fulfill(sel.quantity) => {
                    self.state.borrow_mut().product_errors.insert(
                        sel.product_id.clone(),
                        messages::rejection(rig_commerce::builder::SelectionRejection::ExceedsStock {
                            available: product.stock,
                            requested: sel.quantity,
                        }),
                    );
                    return false;
                }
                Some(_) => {}
            }
        }

        for (_, sel) in &selections {
            self.cart.add_to_cart(&sel.product_id, sel.quantity);
        }

        self.clear();
        true
    }

    /// Drop all selections, messages, and return to the first step.
    pub fn clear(&self) {
        let mut state = self.state.borrow_mut();
        state.build.clear();
        state.step = 0;
        state.product_errors.clear();
        state.socket_error = None;
        state.summary_error = None;
        state.commit_error = None;
    }
}
