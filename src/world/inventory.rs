//! Inventory Contents
//!
//! Ordered, nullable item slots as captured in duel snapshots.

use serde::{Deserialize, Serialize};

/// A stack of items occupying one inventory slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Item identifier (e.g. "iron_sword").
    pub item: String,
    /// Stack size.
    pub count: u8,
}

impl ItemStack {
    /// Create a stack.
    pub fn new(item: impl Into<String>, count: u8) -> Self {
        Self {
            item: item.into(),
            count,
        }
    }

    /// Create a single-item stack.
    pub fn single(item: impl Into<String>) -> Self {
        Self::new(item, 1)
    }
}

/// Full inventory contents: one entry per slot, `None` for empty slots.
///
/// Slot indices are significant; restores reapply items at their
/// original indices and skip empty slots.
pub type Inventory = Vec<Option<ItemStack>>;

/// Iterate the occupied slots of an inventory with their indices.
pub fn occupied_slots(inventory: &Inventory) -> impl Iterator<Item = (usize, &ItemStack)> {
    inventory
        .iter()
        .enumerate()
        .filter_map(|(slot, item)| item.as_ref().map(|item| (slot, item)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occupied_slots_skips_empty() {
        let inventory: Inventory = vec![
            Some(ItemStack::single("iron_sword")),
            None,
            Some(ItemStack::new("apple", 12)),
        ];

        let occupied: Vec<_> = occupied_slots(&inventory).collect();
        assert_eq!(occupied.len(), 2);
        assert_eq!(occupied[0].0, 0);
        assert_eq!(occupied[1].0, 2);
        assert_eq!(occupied[1].1.count, 12);
    }
}
