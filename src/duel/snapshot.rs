//! Pre-Duel Snapshots
//!
//! Per-player saved inventory and location, captured at duel start and
//! consumed at duel end or on reconnect. An entry exists for a player iff
//! that player has an unrestored pre-duel state pending.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::world::{Inventory, Location, PlayerId};

/// Store of pending pre-duel snapshots.
///
/// Inventory and location are tracked separately because restores apply
/// them at different times: inventory immediately, teleport-back after a
/// settling delay.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SnapshotStore {
    inventories: BTreeMap<PlayerId, Inventory>,
    locations: BTreeMap<PlayerId, Location>,
}

impl SnapshotStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a player's pre-duel state, overwriting any prior entry.
    pub fn save(&mut self, id: PlayerId, inventory: Inventory, location: Location) {
        self.inventories.insert(id, inventory);
        self.locations.insert(id, location);
    }

    /// Whether an unrestored snapshot is pending for the player.
    pub fn has_pending(&self, id: PlayerId) -> bool {
        self.inventories.contains_key(&id)
    }

    /// Saved inventory without consuming it (used when re-arming a round
    /// mid-duel).
    pub fn inventory(&self, id: PlayerId) -> Option<&Inventory> {
        self.inventories.get(&id)
    }

    /// Remove and return the saved inventory.
    pub fn take_inventory(&mut self, id: PlayerId) -> Option<Inventory> {
        self.inventories.remove(&id)
    }

    /// Remove and return the saved location.
    pub fn take_location(&mut self, id: PlayerId) -> Option<Location> {
        self.locations.remove(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::ItemStack;

    fn id(n: u8) -> PlayerId {
        PlayerId::new([n; 16])
    }

    fn kit() -> Inventory {
        vec![Some(ItemStack::single("iron_sword")), None]
    }

    #[test]
    fn test_save_then_take() {
        let mut store = SnapshotStore::new();
        let home = Location::overworld(5.0, 64.0, -3.0);
        store.save(id(1), kit(), home);

        assert!(store.has_pending(id(1)));
        assert_eq!(store.take_inventory(id(1)), Some(kit()));
        assert_eq!(store.take_location(id(1)), Some(home));

        // Consumed: a second take is a no-op
        assert!(!store.has_pending(id(1)));
        assert_eq!(store.take_inventory(id(1)), None);
        assert_eq!(store.take_location(id(1)), None);
    }

    #[test]
    fn test_save_overwrites_prior_entry() {
        let mut store = SnapshotStore::new();
        store.save(id(1), kit(), Location::overworld(0.0, 64.0, 0.0));
        store.save(id(1), Vec::new(), Location::overworld(9.0, 70.0, 9.0));

        assert_eq!(store.take_inventory(id(1)), Some(Vec::new()));
        assert_eq!(
            store.take_location(id(1)),
            Some(Location::overworld(9.0, 70.0, 9.0))
        );
    }

    #[test]
    fn test_peek_inventory_leaves_entry() {
        let mut store = SnapshotStore::new();
        store.save(id(1), kit(), Location::overworld(0.0, 64.0, 0.0));

        assert!(store.inventory(id(1)).is_some());
        assert!(store.has_pending(id(1)));
    }
}
