//! Cart store: persisted lines resolved against the catalog.

use crate::catalog::CatalogStore;
use rig_cache::{KeyValue, KeyValueExt};
use rig_commerce::cart::{cart_totals, Cart, CartLine, ResolvedLine};
use rig_commerce::{Currency, Money, ProductId};
use std::cell::RefCell;
use std::rc::Rc;

/// The single device-local key the cart is persisted under.
const STORAGE_KEY: &str = "shopping-cart";

#[derive(Debug)]
struct CartState {
    cart: Cart,
    loading: bool,
}

/// Store for the shopping cart.
///
/// Sole writer of the persisted cart representation: every mutation is
/// written through to storage so the in-memory state and the persisted
/// lines stay consistent. Storage write failures are logged, never
/// surfaced.
#[derive(Clone)]
pub struct CartStore {
    state: Rc<RefCell<CartState>>,
    storage: Rc<dyn KeyValue>,
    catalog: CatalogStore,
    currency: Currency,
}

impl CartStore {
    /// Create an empty cart store over the given storage and catalog.
    pub fn new(catalog: CatalogStore, storage: Rc<dyn KeyValue>, currency: Currency) -> Self {
        Self {
            state: Rc::new(RefCell::new(CartState {
                cart: Cart::new(),
                loading: false,
            })),
            storage,
            catalog,
            currency,
        }
    }

    /// Read the persisted lines and resolve them against the catalog,
    /// loading products first when none are loaded yet.
    ///
    /// Lines whose product no longer resolves are dropped and the cleaned
    /// set re-persisted. When the catalog itself failed to load, the
    /// persisted lines are kept untouched so a transient outage cannot
    /// wipe the cart.
    pub async fn load_cart(&self) {
        self.state.borrow_mut().loading = true;

        if !self.catalog.has_products() {
            self.catalog.load_products(None).await;
        }

        let persisted: Vec<CartLine> = match self.storage.get_json(STORAGE_KEY) {
            Ok(Some(lines)) => lines,
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read persisted cart");
                Vec::new()
            }
        };
        let mut cart = Cart::from_lines(persisted);

        if self.catalog.error().is_none() {
            let products = self.catalog.products();
            let dropped = cart.retain_resolvable(|id| products.iter().find(|p| &p.id == id));
            if dropped > 0 {
                tracing::debug!(dropped, "dropped cart lines no longer in the catalog");
                self.write_through(&cart);
            }
        }

        let mut state = self.state.borrow_mut();
        state.cart = cart;
        state.loading = false;
    }

    /// Add units of a product. Unknown products are ignored with a logged
    /// warning.
    pub fn add_to_cart(&self, product_id: &ProductId, quantity: i64) {
        if self.catalog.product_by_id(product_id).is_none() {
            tracing::warn!(product = %product_id, "add_to_cart ignored: unknown product");
            return;
        }

        {
            let mut state = self.state.borrow_mut();
            if let Err(e) = state.cart.add(product_id.clone(), quantity) {
                tracing::warn!(product = %product_id, error = %e, "add_to_cart rejected");
                return;
            }
        }
        self.persist();
    }

    /// Remove a line.
    pub fn remove_from_cart(&self, product_id: &ProductId) {
        let removed = self.state.borrow_mut().cart.remove(product_id);
        if removed {
            self.persist();
        }
    }

    /// Overwrite a line's quantity; zero or less removes the line.
    ///
    /// Stock is not re-validated here — callers check against stock before
    /// mutating (see the builder's commit path).
    pub fn update_quantity(&self, product_id: &ProductId, quantity: i64) {
        let changed = self
            .state
            .borrow_mut()
            .cart
            .update_quantity(product_id, quantity);
        if changed {
            self.persist();
        }
    }

    /// Empty the cart.
    pub fn clear_cart(&self) {
        self.state.borrow_mut().cart.clear();
        self.persist();
    }

    /// The current lines.
    pub fn lines(&self) -> Vec<CartLine> {
        self.state.borrow().cart.lines().to_vec()
    }

    /// The lines joined against the current catalog; unresolvable lines
    /// are omitted.
    pub fn resolved_lines(&self) -> Vec<ResolvedLine> {
        let products = self.catalog.products();
        self.state
            .borrow()
            .cart
            .resolve(|id| products.iter().find(|p| &p.id == id))
    }

    /// Sum of `price * quantity` over the resolved lines.
    pub fn total_price(&self) -> Money {
        let lines = self.resolved_lines();
        match cart_totals(&lines, self.currency) {
            Ok(totals) => totals.subtotal,
            Err(e) => {
                tracing::error!(error = %e, "cart total calculation failed");
                Money::zero(self.currency)
            }
        }
    }

    /// Sum of quantities over all present lines.
    pub fn total_item_count(&self) -> i64 {
        self.state.borrow().cart.item_count()
    }

    /// The quantity held for a product (zero if absent).
    pub fn quantity_of(&self, product_id: &ProductId) -> i64 {
        self.state.borrow().cart.quantity_of(product_id)
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.state.borrow().cart.is_empty()
    }

    /// Check if a load is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// Write the current in-memory lines through to storage.
    fn persist(&self) {
        let state = self.state.borrow();
        self.write_through(&state.cart);
    }

    fn write_through(&self, cart: &Cart) {
        if let Err(e) = self.storage.set_json(STORAGE_KEY, cart.lines()) {
            tracing::warn!(error = %e, "could not persist cart");
        }
    }
}
