//! Device-local key-value persistence for the RigForge storefront.
//!
//! The cart is persisted under a single key as JSON; this crate provides
//! the `KeyValue` seam the stores write through, with a platform-backed
//! store on wasm32 and an in-memory store for native builds and tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use rig_cache::{KeyValue, KeyValueExt, MemoryStore};
//!
//! let store = MemoryStore::new();
//! store.set_json("cart", &lines)?;
//! let lines: Option<Vec<CartLine>> = store.get_json("cart")?;
//! ```

mod error;
mod kv;

pub use error::CacheError;
pub use kv::{KeyValue, KeyValueExt, MemoryStore};

#[cfg(target_arch = "wasm32")]
pub use kv::DeviceStore;
