//! Build selections and validation.

use crate::builder::{ComponentSlot, QuantityRule};
use crate::catalog::Product;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A per-slot selection: one product and its quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Selection {
    /// Selected product.
    pub product_id: ProductId,
    /// Units selected (always positive).
    pub quantity: i64,
}

/// Why a selection was not accepted.
///
/// Rejections are reported as state by the storefront layer, not raised as
/// errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionRejection {
    /// Requested quantity exceeds the product's stock.
    ExceedsStock { available: i64, requested: i64 },
    /// Requested quantity exceeds the slot's maximum.
    ExceedsSlotLimit { limit: i64, requested: i64 },
    /// Quantity was zero or negative.
    NotPositive { requested: i64 },
}

/// A CPU/motherboard socket mismatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketConflict {
    pub cpu_socket: String,
    pub motherboard_socket: String,
}

/// Aggregated commit-gating state for a build.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BuildReadiness {
    /// Slots whose selected quantity is below the slot minimum.
    pub missing: Vec<ComponentSlot>,
    /// Slots whose selected quantity exceeds the slot maximum.
    pub over_limit: Vec<ComponentSlot>,
    /// CPU/motherboard socket conflict, if both are selected and differ.
    pub socket_conflict: Option<SocketConflict>,
}

impl BuildReadiness {
    /// Whether the build may be committed to the cart.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.over_limit.is_empty() && self.socket_conflict.is_none()
    }
}

/// The transient, per-session PC build: at most one product per slot, each
/// with its own quantity. Never persisted; merged into the cart only on an
/// explicit commit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Build {
    selections: BTreeMap<ComponentSlot, Selection>,
}

impl Build {
    /// Create an empty build.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a selection for a slot, replacing any prior selection there.
    ///
    /// Rejects quantities above the product's stock or the slot's maximum.
    pub fn select(
        &mut self,
        slot: ComponentSlot,
        product: &Product,
        quantity: i64,
    ) -> Result<(), SelectionRejection> {
        if quantity <= 0 {
            return Err(SelectionRejection::NotPositive {
                requested: quantity,
            });
        }
        if quantity > product.stock {
            return Err(SelectionRejection::ExceedsStock {
                available: product.stock,
                requested: quantity,
            });
        }
        let rule = slot.quantity_rule();
        if !rule.within_max(quantity) {
            return Err(SelectionRejection::ExceedsSlotLimit {
                // within_max only fails when a max exists
                limit: rule.max.unwrap_or(i64::MAX),
                requested: quantity,
            });
        }

        self.selections.insert(
            slot,
            Selection {
                product_id: product.id.clone(),
                quantity,
            },
        );
        Ok(())
    }

    /// Increase the slot's quantity by one, clamped to
    /// `min(stock, slot max)`. No-op when nothing is selected or the cap is
    /// already reached.
    pub fn increase(&mut self, slot: ComponentSlot, product: &Product) {
        let cap = slot.quantity_rule().cap(product.stock);
        if let Some(sel) = self.selections.get_mut(&slot) {
            if sel.quantity < cap {
                sel.quantity += 1;
            }
        }
    }

    /// Decrease the slot's quantity by one. Reaching zero, or decrementing a
    /// single-unit slot, removes the selection entirely.
    pub fn decrease(&mut self, slot: ComponentSlot) {
        let remove = match self.selections.get_mut(&slot) {
            Some(sel) => {
                if sel.quantity <= 1 || slot.quantity_rule().max == Some(1) {
                    true
                } else {
                    sel.quantity -= 1;
                    false
                }
            }
            None => false,
        };
        if remove {
            self.selections.remove(&slot);
        }
    }

    /// Remove the slot's selection.
    pub fn remove(&mut self, slot: ComponentSlot) -> Option<Selection> {
        self.selections.remove(&slot)
    }

    /// Drop all selections.
    pub fn clear(&mut self) {
        self.selections.clear();
    }

    /// Get the slot's selection, if any.
    pub fn selection(&self, slot: ComponentSlot) -> Option<&Selection> {
        self.selections.get(&slot)
    }

    /// Iterate all selections in slot order.
    pub fn selections(&self) -> impl Iterator<Item = (ComponentSlot, &Selection)> {
        self.selections.iter().map(|(slot, sel)| (*slot, sel))
    }

    /// Check if no slot has a selection.
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Compare CPU and motherboard sockets.
    ///
    /// Returns a conflict only when both slots are selected, both products
    /// resolve, and both carry a socket specification that differs. A
    /// missing socket specification is treated as compatible (unknown).
    pub fn socket_conflict<'a>(
        &self,
        lookup: impl Fn(&ProductId) -> Option<&'a Product>,
    ) -> Option<SocketConflict> {
        let cpu = self.selection(ComponentSlot::Cpu)?;
        let board = self.selection(ComponentSlot::Motherboard)?;

        let cpu_socket = lookup(&cpu.product_id)?.socket()?;
        let board_socket = lookup(&board.product_id)?.socket()?;

        if cpu_socket != board_socket {
            Some(SocketConflict {
                cpu_socket: cpu_socket.to_string(),
                motherboard_socket: board_socket.to_string(),
            })
        } else {
            None
        }
    }

    /// Evaluate all commit gates: slot minimums, slot maximums, and the
    /// socket rule.
    pub fn readiness<'a>(
        &self,
        lookup: impl Fn(&ProductId) -> Option<&'a Product>,
    ) -> BuildReadiness {
        let mut readiness = BuildReadiness::default();

        for slot in ComponentSlot::ALL {
            let rule: QuantityRule = slot.quantity_rule();
            let quantity = self.selection(slot).map(|s| s.quantity).unwrap_or(0);
            if !rule.meets_min(quantity) {
                readiness.missing.push(slot);
            } else if !rule.within_max(quantity) {
                readiness.over_limit.push(slot);
            }
        }

        readiness.socket_conflict = self.socket_conflict(lookup);
        readiness
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SOCKET_SPEC;
    use crate::money::{Currency, Money};

    fn part(id: &str, category: &str, stock: i64) -> Product {
        Product::new(
            id,
            category,
            "Brand",
            "Model",
            format!("Part {id}"),
            Money::new(10000, Currency::Ars),
        )
        .with_stock(stock)
    }

    fn cpu(socket: &str) -> Product {
        part("cpu-1", "cpu", 5).with_spec(SOCKET_SPEC, socket)
    }

    fn motherboard(socket: &str) -> Product {
        part("mobo-1", "motherboard", 5).with_spec(SOCKET_SPEC, socket)
    }

    /// Lookup over a fixed product slice.
    fn lookup<'a>(products: &'a [Product]) -> impl Fn(&ProductId) -> Option<&'a Product> + 'a {
        move |id| products.iter().find(|p| &p.id == id)
    }

    #[test]
    fn test_select_replaces_prior() {
        let mut build = Build::new();
        let a = part("gpu-a", "gpu", 3);
        let b = part("gpu-b", "gpu", 3);

        build.select(ComponentSlot::Gpu, &a, 1).unwrap();
        build.select(ComponentSlot::Gpu, &b, 1).unwrap();

        let sel = build.selection(ComponentSlot::Gpu).unwrap();
        assert_eq!(sel.product_id.as_str(), "gpu-b");
    }

    #[test]
    fn test_select_rejects_over_stock() {
        let mut build = Build::new();
        let ssd = part("ssd-1", "storage", 2);

        let rejection = build.select(ComponentSlot::Storage, &ssd, 3).unwrap_err();
        assert_eq!(
            rejection,
            SelectionRejection::ExceedsStock {
                available: 2,
                requested: 3
            }
        );
        assert!(build.is_empty());
    }

    #[test]
    fn test_select_rejects_over_slot_limit() {
        let mut build = Build::new();
        let gpu = part("gpu-1", "gpu", 10);

        let rejection = build.select(ComponentSlot::Gpu, &gpu, 3).unwrap_err();
        assert_eq!(
            rejection,
            SelectionRejection::ExceedsSlotLimit {
                limit: 1,
                requested: 3
            }
        );
        assert!(build.selection(ComponentSlot::Gpu).is_none());
    }

    #[test]
    fn test_ram_allows_two() {
        let mut build = Build::new();
        let ram = part("ram-1", "ram", 10);

        build.select(ComponentSlot::Ram, &ram, 2).unwrap();
        assert_eq!(build.selection(ComponentSlot::Ram).unwrap().quantity, 2);
        assert!(build.select(ComponentSlot::Ram, &ram, 3).is_err());
    }

    #[test]
    fn test_increase_clamps_to_stock_and_limit() {
        let mut build = Build::new();
        let ram = part("ram-1", "ram", 1);

        build.select(ComponentSlot::Ram, &ram, 1).unwrap();
        build.increase(ComponentSlot::Ram, &ram);
        // stock of 1 wins over the slot max of 2
        assert_eq!(build.selection(ComponentSlot::Ram).unwrap().quantity, 1);

        let storage = part("ssd-1", "storage", 4);
        build.select(ComponentSlot::Storage, &storage, 3).unwrap();
        build.increase(ComponentSlot::Storage, &storage);
        build.increase(ComponentSlot::Storage, &storage);
        assert_eq!(build.selection(ComponentSlot::Storage).unwrap().quantity, 4);
    }

    #[test]
    fn test_decrease_removes_at_zero() {
        let mut build = Build::new();
        let ram = part("ram-1", "ram", 10);

        build.select(ComponentSlot::Ram, &ram, 2).unwrap();
        build.decrease(ComponentSlot::Ram);
        assert_eq!(build.selection(ComponentSlot::Ram).unwrap().quantity, 1);
        build.decrease(ComponentSlot::Ram);
        assert!(build.selection(ComponentSlot::Ram).is_none());
    }

    #[test]
    fn test_decrease_single_unit_slot_removes() {
        let mut build = Build::new();
        let gpu = part("gpu-1", "gpu", 5);

        build.select(ComponentSlot::Gpu, &gpu, 1).unwrap();
        build.decrease(ComponentSlot::Gpu);
        assert!(build.selection(ComponentSlot::Gpu).is_none());
    }

    #[test]
    fn test_socket_mismatch_detected() {
        let products = vec![cpu("AM5"), motherboard("LGA1700")];
        let mut build = Build::new();
        build.select(ComponentSlot::Cpu, &products[0], 1).unwrap();
        build
            .select(ComponentSlot::Motherboard, &products[1], 1)
            .unwrap();

        let conflict = build.socket_conflict(lookup(&products)).unwrap();
        assert_eq!(conflict.cpu_socket, "AM5");
        assert_eq!(conflict.motherboard_socket, "LGA1700");
    }

    #[test]
    fn test_socket_match_is_clear() {
        let products = vec![cpu("AM5"), motherboard("AM5")];
        let mut build = Build::new();
        build.select(ComponentSlot::Cpu, &products[0], 1).unwrap();
        build
            .select(ComponentSlot::Motherboard, &products[1], 1)
            .unwrap();

        assert!(build.socket_conflict(lookup(&products)).is_none());
    }

    #[test]
    fn test_socket_unknown_is_compatible() {
        // motherboard without a socket specification
        let products = vec![cpu("AM5"), part("mobo-1", "motherboard", 5)];
        let mut build = Build::new();
        build.select(ComponentSlot::Cpu, &products[0], 1).unwrap();
        build
            .select(ComponentSlot::Motherboard, &products[1], 1)
            .unwrap();

        assert!(build.socket_conflict(lookup(&products)).is_none());
    }

    #[test]
    fn test_readiness_reports_missing_slots() {
        let products = vec![cpu("AM5")];
        let mut build = Build::new();
        build.select(ComponentSlot::Cpu, &products[0], 1).unwrap();

        let readiness = build.readiness(lookup(&products));
        assert!(!readiness.is_complete());
        assert_eq!(readiness.missing.len(), 6);
        assert!(!readiness.missing.contains(&ComponentSlot::Cpu));
    }

    #[test]
    fn test_readiness_complete_build() {
        let products = vec![
            cpu("AM5"),
            motherboard("AM5"),
            part("ram-1", "ram", 4),
            part("gpu-1", "gpu", 2),
            part("psu-1", "psu", 2),
            part("case-1", "case", 2),
            part("ssd-1", "storage", 2),
        ];
        let mut build = Build::new();
        build.select(ComponentSlot::Cpu, &products[0], 1).unwrap();
        build
            .select(ComponentSlot::Motherboard, &products[1], 1)
            .unwrap();
        build.select(ComponentSlot::Ram, &products[2], 2).unwrap();
        build.select(ComponentSlot::Gpu, &products[3], 1).unwrap();
        build.select(ComponentSlot::Psu, &products[4], 1).unwrap();
        build.select(ComponentSlot::Case, &products[5], 1).unwrap();
        build
            .select(ComponentSlot::Storage, &products[6], 1)
            .unwrap();

        let readiness = build.readiness(lookup(&products));
        assert!(readiness.is_complete());
    }

    #[test]
    fn test_readiness_blocks_on_socket_conflict() {
        let products = vec![
            cpu("AM5"),
            motherboard("LGA1700"),
            part("ram-1", "ram", 4),
            part("gpu-1", "gpu", 2),
            part("psu-1", "psu", 2),
            part("case-1", "case", 2),
            part("ssd-1", "storage", 2),
        ];
        let mut build = Build::new();
        for (slot, p) in ComponentSlot::ALL.iter().zip(products.iter()) {
            build.select(*slot, p, 1).unwrap();
        }

        let readiness = build.readiness(lookup(&products));
        assert!(readiness.missing.is_empty());
        assert!(readiness.socket_conflict.is_some());
        assert!(!readiness.is_complete());
    }
}
