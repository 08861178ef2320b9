//! Component slots and their quantity rules.

use serde::{Deserialize, Serialize};

/// The seven component slots of the guided PC-builder flow, in step order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ComponentSlot {
    Cpu,
    Motherboard,
    Ram,
    Gpu,
    Psu,
    Case,
    Storage,
}

impl ComponentSlot {
    /// All slots in guided-flow order.
    pub const ALL: [ComponentSlot; 7] = [
        ComponentSlot::Cpu,
        ComponentSlot::Motherboard,
        ComponentSlot::Ram,
        ComponentSlot::Gpu,
        ComponentSlot::Psu,
        ComponentSlot::Case,
        ComponentSlot::Storage,
    ];

    /// The category slug this slot is scoped to.
    pub fn slug(&self) -> &'static str {
        match self {
            ComponentSlot::Cpu => "cpu",
            ComponentSlot::Motherboard => "motherboard",
            ComponentSlot::Ram => "ram",
            ComponentSlot::Gpu => "gpu",
            ComponentSlot::Psu => "psu",
            ComponentSlot::Case => "case",
            ComponentSlot::Storage => "storage",
        }
    }

    /// Resolve a slot from a category slug.
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.slug() == slug)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ComponentSlot::Cpu => "Processor",
            ComponentSlot::Motherboard => "Motherboard",
            ComponentSlot::Ram => "Memory",
            ComponentSlot::Gpu => "Graphics Card",
            ComponentSlot::Psu => "Power Supply",
            ComponentSlot::Case => "Case",
            ComponentSlot::Storage => "Storage",
        }
    }

    /// Get the step number (1-indexed).
    pub fn step_number(&self) -> u8 {
        match self {
            ComponentSlot::Cpu => 1,
            ComponentSlot::Motherboard => 2,
            ComponentSlot::Ram => 3,
            ComponentSlot::Gpu => 4,
            ComponentSlot::Psu => 5,
            ComponentSlot::Case => 6,
            ComponentSlot::Storage => 7,
        }
    }

    /// The next slot in the guided flow, if any.
    pub fn next(&self) -> Option<Self> {
        Self::ALL.get(self.step_number() as usize).copied()
    }

    /// The previous slot in the guided flow, if any.
    pub fn prev(&self) -> Option<Self> {
        let step = self.step_number() as usize;
        if step >= 2 {
            Self::ALL.get(step - 2).copied()
        } else {
            None
        }
    }

    /// The quantity rule for this slot.
    pub fn quantity_rule(&self) -> QuantityRule {
        match self {
            ComponentSlot::Ram => QuantityRule::new(1, Some(2)),
            ComponentSlot::Storage => QuantityRule::new(1, None),
            _ => QuantityRule::new(1, Some(1)),
        }
    }
}

/// Per-slot cardinality bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityRule {
    /// Minimum units required for a complete build.
    pub min: i64,
    /// Maximum units allowed; `None` means unbounded.
    pub max: Option<i64>,
}

impl QuantityRule {
    pub fn new(min: i64, max: Option<i64>) -> Self {
        Self { min, max }
    }

    /// Check if a quantity is within the maximum bound.
    pub fn within_max(&self, quantity: i64) -> bool {
        self.max.map(|max| quantity <= max).unwrap_or(true)
    }

    /// Check if a quantity meets the minimum bound.
    pub fn meets_min(&self, quantity: i64) -> bool {
        quantity >= self.min
    }

    /// Clamp a quantity to the maximum allowed given the available stock.
    pub fn cap(&self, stock: i64) -> i64 {
        self.max.map(|max| max.min(stock)).unwrap_or(stock)
    }
}
