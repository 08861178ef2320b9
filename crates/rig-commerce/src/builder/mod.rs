//! PC-builder module.
//!
//! Contains the component slots with their quantity rules, the transient
//! per-slot selections, and the compatibility/readiness checks that gate
//! committing a build to the cart.

mod build;
mod slots;

pub use build::{Build, BuildReadiness, Selection, SelectionRejection, SocketConflict};
pub use slots::{ComponentSlot, QuantityRule};
