//! Catalog store: categories, products, and search.

use crate::debounce::Debouncer;
use crate::messages;
use rig_commerce::catalog::{Category, Product};
use rig_commerce::{CategoryId, ProductId};
use rig_data::{CatalogApi, DataError};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Coalescing window for catalog reloads on rapid navigation.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(150);

/// Debounce key used when no category filter is applied.
const ALL_PRODUCTS_KEY: &str = "__all__";

#[derive(Debug)]
struct CatalogState {
    categories: Vec<Category>,
    products: Vec<Product>,
    selected_category: Option<String>,
    search_term: String,
    loading: bool,
    error: Option<String>,
    /// Sequence number of the latest admitted product load. A completed
    /// load only applies while its tag is still the latest; a slower stale
    /// response is discarded.
    load_seq: u64,
    debounce: Debouncer,
}

/// Store for the remotely-sourced catalog.
///
/// A cheaply-cloneable handle over single-threaded shared state. All
/// collaborator failures are recorded as an error message; nothing here
/// panics or propagates I/O errors to the UI layer.
#[derive(Clone)]
pub struct CatalogStore {
    state: Rc<RefCell<CatalogState>>,
    api: Rc<dyn CatalogApi>,
}

impl CatalogStore {
    /// Create an empty store reading from the given collaborator.
    pub fn new(api: Rc<dyn CatalogApi>) -> Self {
        Self {
            state: Rc::new(RefCell::new(CatalogState {
                categories: Vec::new(),
                products: Vec::new(),
                selected_category: None,
                search_term: String::new(),
                loading: false,
                error: None,
                load_seq: 0,
                debounce: Debouncer::new(DEBOUNCE_WINDOW),
            })),
            api,
        }
    }

    /// Fetch all categories. A failure leaves the current category list
    /// untouched and records an error message.
    pub async fn load_categories(&self) {
        match self.api.fetch_categories().await {
            Ok(categories) => {
                let mut state = self.state.borrow_mut();
                state.categories = categories;
                state.error = None;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load categories");
                self.state.borrow_mut().error = Some(messages::CATALOG_LOAD_FAILED.to_string());
            }
        }
    }

    /// Fetch active products, optionally filtered to one category by slug.
    ///
    /// Rapid repeat requests for the same filter are coalesced; when
    /// admitted requests overlap, only the latest one's response is
    /// applied. A failure keeps previously loaded products and records an
    /// error message.
    pub async fn load_products(&self, category_slug: Option<&str>) {
        let key = category_slug.unwrap_or(ALL_PRODUCTS_KEY);
        let Some(seq) = self.begin_load(key) else {
            return;
        };

        let category_id = match self.resolve_category(category_slug).await {
            Ok(id) => id,
            Err(message) => {
                self.fail_load(seq, message);
                return;
            }
        };

        let result = self.api.fetch_products(category_id.as_ref()).await;
        self.apply_products(seq, category_slug.map(String::from), result);
    }

    /// Store the text filter applied by `filtered_products`.
    pub fn set_search_term(&self, term: impl Into<String>) {
        self.state.borrow_mut().search_term = term.into();
    }

    /// The loaded products matching the current search term (all loaded
    /// products when the term is empty).
    pub fn filtered_products(&self) -> Vec<Product> {
        let state = self.state.borrow();
        state
            .products
            .iter()
            .filter(|p| p.matches_search(&state.search_term))
            .cloned()
            .collect()
    }

    /// Look up a product by id.
    pub fn product_by_id(&self, id: &ProductId) -> Option<Product> {
        self.state
            .borrow()
            .products
            .iter()
            .find(|p| &p.id == id)
            .cloned()
    }

    /// Look up a category by slug.
    pub fn category_by_slug(&self, slug: &str) -> Option<Category> {
        self.state
            .borrow()
            .categories
            .iter()
            .find(|c| c.slug == slug)
            .cloned()
    }

    /// All loaded categories.
    pub fn categories(&self) -> Vec<Category> {
        self.state.borrow().categories.clone()
    }

    /// All loaded products.
    pub fn products(&self) -> Vec<Product> {
        self.state.borrow().products.clone()
    }

    /// The slug the current product list was filtered by, if any.
    pub fn selected_category(&self) -> Option<String> {
        self.state.borrow().selected_category.clone()
    }

    /// The current search term.
    pub fn search_term(&self) -> String {
        self.state.borrow().search_term.clone()
    }

    /// Check if any products are loaded.
    pub fn has_products(&self) -> bool {
        !self.state.borrow().products.is_empty()
    }

    /// Check if a load is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// The recorded error message, if the last operation failed.
    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Admit a product load, returning its sequence tag, or `None` when
    /// the request was coalesced by the debounce window.
    fn begin_load(&self, key: &str) -> Option<u64> {
        let mut state = self.state.borrow_mut();
        if !state.debounce.admit(key, Instant::now()) {
            tracing::debug!(filter = key, "coalesced catalog reload");
            return None;
        }
        state.load_seq += 1;
        state.loading = true;
        state.error = None;
        Some(state.load_seq)
    }

    /// Resolve a category slug to its id, fetching categories first when
    /// none are loaded yet. Returns the message to record on failure.
    async fn resolve_category(&self, slug: Option<&str>) -> Result<Option<CategoryId>, &'static str> {
        let Some(slug) = slug else {
            return Ok(None);
        };
        if self.state.borrow().categories.is_empty() {
            self.load_categories().await;
            if self.state.borrow().error.is_some() {
                return Err(messages::CATALOG_LOAD_FAILED);
            }
        }
        match self.category_by_slug(slug) {
            Some(category) => Ok(Some(category.id)),
            None => {
                tracing::warn!(slug, "unknown category slug");
                Err(messages::CATEGORY_NOT_FOUND)
            }
        }
    }

    /// Apply a completed product load unless a newer load has been
    /// admitted since.
    fn apply_products(
        &self,
        seq: u64,
        selected: Option<String>,
        result: Result<Vec<Product>, DataError>,
    ) {
        let mut state = self.state.borrow_mut();
        if state.load_seq != seq {
            tracing::debug!(seq, latest = state.load_seq, "discarding stale catalog response");
            return;
        }
        state.loading = false;
        match result {
            Ok(products) => {
                state.products = products;
                state.selected_category = selected;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load products");
                state.error = Some(messages::CATALOG_LOAD_FAILED.to_string());
            }
        }
    }

    /// Record a failed load for a still-current sequence tag.
    fn fail_load(&self, seq: u64, message: &str) {
        let mut state = self.state.borrow_mut();
        if state.load_seq != seq {
            return;
        }
        state.loading = false;
        state.error = Some(message.to_string());
    }
}
