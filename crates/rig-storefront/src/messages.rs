//! User-visible error messages.
//!
//! All short messages shown by the stores live here; raw collaborator
//! error text never reaches user-facing state.

use rig_commerce::builder::{ComponentSlot, SelectionRejection, SocketConflict};

pub const CATALOG_LOAD_FAILED: &str = "Could not load the catalog. Please try again.";
pub const CATEGORY_NOT_FOUND: &str = "That category is not available.";
pub const CHECKOUT_FAILED: &str = "The payment could not be started. Please try again.";
pub const BUILD_COMMIT_FAILED: &str =
    "Your build could not be added to the cart. Please try again.";
pub const PRODUCT_UNAVAILABLE: &str = "This product is no longer available.";

/// Message for a rejected builder selection.
pub fn rejection(rejection: SelectionRejection) -> String {
    match rejection {
        SelectionRejection::ExceedsStock { available, .. } => {
            format!("Only {available} in stock")
        }
        SelectionRejection::ExceedsSlotLimit { limit, .. } => {
            format!("At most {limit} per build")
        }
        SelectionRejection::NotPositive { .. } => "Select at least one unit".to_string(),
    }
}

/// Message for a CPU/motherboard socket conflict.
pub fn socket_mismatch(conflict: &SocketConflict) -> String {
    format!(
        "Incompatible socket: the CPU uses {} but the motherboard uses {}",
        conflict.cpu_socket, conflict.motherboard_socket
    )
}

/// Aggregated message for slots below their minimum.
pub fn missing_components(slots: &[ComponentSlot]) -> String {
    format!("Missing required components: {}", slot_list(slots))
}

/// Aggregated message for slots above their maximum.
pub fn too_many_components(slots: &[ComponentSlot]) -> String {
    format!("Too many units selected for: {}", slot_list(slots))
}

fn slot_list(slots: &[ComponentSlot]) -> String {
    slots
        .iter()
        .map(|s| s.display_name())
        .collect::<Vec<_>>()
        .join(", ")
}
