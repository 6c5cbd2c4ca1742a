//! In-Memory Host
//!
//! A complete [`Host`] implementation backed by plain maps, used by the
//! demo binary and the test suite. World mutations follow the semantics
//! the duel core expects from a real server: effects on offline players
//! are silently dropped, counters persist across disconnects.

use std::collections::BTreeMap;

use crate::menu::Menu;
use crate::world::{BarId, Host, Inventory, ItemStack, Location, PlayerId};

/// Default maximum health for simulated players.
const MAX_HEALTH: f32 = 20.0;

/// Number of inventory slots per simulated player.
const INVENTORY_SLOTS: usize = 36;

/// One simulated player.
#[derive(Clone, Debug)]
pub struct SimPlayer {
    /// Display name.
    pub name: String,
    /// Whether the player is currently connected.
    pub online: bool,
    /// Current location.
    pub location: Location,
    /// Current health.
    pub health: f32,
    /// Maximum health.
    pub max_health: f32,
    /// Current inventory contents.
    pub inventory: Inventory,
}

/// One simulated boss bar.
#[derive(Clone, Debug)]
struct SimBar {
    title: String,
    visible: bool,
    members: Vec<PlayerId>,
}

/// In-memory world state implementing [`Host`].
#[derive(Clone, Debug, Default)]
pub struct SimHost {
    players: BTreeMap<PlayerId, SimPlayer>,
    counters: BTreeMap<String, BTreeMap<PlayerId, i32>>,
    bars: BTreeMap<BarId, SimBar>,
    next_bar: BarId,
    keep_inventory: bool,
    broadcasts: Vec<String>,
    messages: Vec<(PlayerId, String)>,
    titles: Vec<(PlayerId, String, String)>,
    shown_menus: Vec<(PlayerId, Menu)>,
}

impl SimHost {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connected player at full health with an empty inventory.
    pub fn add_player(&mut self, name: impl Into<String>, location: Location) -> PlayerId {
        let id = PlayerId::random();
        self.players.insert(
            id,
            SimPlayer {
                name: name.into(),
                online: true,
                location,
                health: MAX_HEALTH,
                max_health: MAX_HEALTH,
                inventory: vec![None; INVENTORY_SLOTS],
            },
        );
        id
    }

    /// Access a player's state.
    pub fn player(&self, id: PlayerId) -> Option<&SimPlayer> {
        self.players.get(&id)
    }

    /// Connect or disconnect a player.
    pub fn set_online(&mut self, id: PlayerId, online: bool) {
        if let Some(player) = self.players.get_mut(&id) {
            player.online = online;
        }
    }

    /// Put an item stack in a specific slot, online or not.
    pub fn give_item(&mut self, id: PlayerId, slot: usize, item: ItemStack) {
        if let Some(player) = self.players.get_mut(&id) {
            if slot < player.inventory.len() {
                player.inventory[slot] = Some(item);
            }
        }
    }

    /// Reduce a player's health.
    pub fn hurt(&mut self, id: PlayerId, amount: f32) {
        if let Some(player) = self.players.get_mut(&id) {
            player.health = (player.health - amount).max(0.0);
        }
    }

    /// Current state of the keep-inventory world rule.
    pub fn keep_inventory(&self) -> bool {
        self.keep_inventory
    }

    /// All broadcast messages so far.
    pub fn broadcasts(&self) -> &[String] {
        &self.broadcasts
    }

    /// All direct messages so far.
    pub fn messages(&self) -> &[(PlayerId, String)] {
        &self.messages
    }

    /// All title banners so far.
    pub fn titles(&self) -> &[(PlayerId, String, String)] {
        &self.titles
    }

    /// All menus displayed so far.
    pub fn shown_menus(&self) -> &[(PlayerId, Menu)] {
        &self.shown_menus
    }

    /// The most recently displayed menu for a player.
    pub fn last_menu(&self, id: PlayerId) -> Option<&Menu> {
        self.shown_menus
            .iter()
            .rev()
            .find(|(player, _)| *player == id)
            .map(|(_, menu)| menu)
    }

    /// Number of live boss bars.
    pub fn bar_count(&self) -> usize {
        self.bars.len()
    }

    /// Title of a live bar.
    pub fn bar_title(&self, bar: BarId) -> Option<String> {
        self.bars.get(&bar).map(|b| b.title.clone())
    }

    /// Visibility of a live bar.
    pub fn bar_visible(&self, bar: BarId) -> bool {
        self.bars.get(&bar).is_some_and(|b| b.visible)
    }
}

impl Host for SimHost {
    fn is_online(&self, id: PlayerId) -> bool {
        self.players.get(&id).is_some_and(|p| p.online)
    }

    fn display_name(&self, id: PlayerId) -> String {
        self.players
            .get(&id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| id.to_uuid_string())
    }

    fn online_players(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|(_, p)| p.online)
            .map(|(id, _)| *id)
            .collect()
    }

    fn find_by_name(&self, name: &str) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|(_, p)| p.online && p.name == name)
            .map(|(id, _)| *id)
    }

    fn location_of(&self, id: PlayerId) -> Option<Location> {
        self.players
            .get(&id)
            .filter(|p| p.online)
            .map(|p| p.location)
    }

    fn teleport(&mut self, id: PlayerId, location: Location) {
        if let Some(player) = self.players.get_mut(&id).filter(|p| p.online) {
            player.location = location;
        }
    }

    fn heal_full(&mut self, id: PlayerId) {
        if let Some(player) = self.players.get_mut(&id).filter(|p| p.online) {
            player.health = player.max_health;
        }
    }

    fn inventory_of(&self, id: PlayerId) -> Inventory {
        self.players
            .get(&id)
            .map(|p| p.inventory.clone())
            .unwrap_or_default()
    }

    fn clear_inventory(&mut self, id: PlayerId) {
        if let Some(player) = self.players.get_mut(&id) {
            player.inventory.fill(None);
        }
    }

    fn set_inventory_slot(&mut self, id: PlayerId, slot: usize, item: ItemStack) {
        if let Some(player) = self.players.get_mut(&id) {
            if slot < player.inventory.len() {
                player.inventory[slot] = Some(item);
            }
        }
    }

    fn send_message(&mut self, id: PlayerId, text: &str) {
        self.messages.push((id, text.to_string()));
    }

    fn send_title(&mut self, id: PlayerId, title: &str, subtitle: &str) {
        self.titles
            .push((id, title.to_string(), subtitle.to_string()));
    }

    fn broadcast(&mut self, text: &str) {
        self.broadcasts.push(text.to_string());
    }

    fn set_keep_inventory(&mut self, enabled: bool) -> anyhow::Result<()> {
        self.keep_inventory = enabled;
        Ok(())
    }

    fn create_bar(&mut self, title: &str) -> BarId {
        let bar = self.next_bar;
        self.next_bar += 1;
        self.bars.insert(
            bar,
            SimBar {
                title: title.to_string(),
                visible: false,
                members: Vec::new(),
            },
        );
        bar
    }

    fn add_bar_player(&mut self, bar: BarId, id: PlayerId) {
        if let Some(bar) = self.bars.get_mut(&bar) {
            if !bar.members.contains(&id) {
                bar.members.push(id);
            }
        }
    }

    fn remove_bar_player(&mut self, bar: BarId, id: PlayerId) {
        if let Some(bar) = self.bars.get_mut(&bar) {
            bar.members.retain(|member| *member != id);
        }
    }

    fn set_bar_title(&mut self, bar: BarId, title: &str) {
        if let Some(bar) = self.bars.get_mut(&bar) {
            title.clone_into(&mut bar.title);
        }
    }

    fn set_bar_visible(&mut self, bar: BarId, visible: bool) {
        if let Some(bar) = self.bars.get_mut(&bar) {
            bar.visible = visible;
        }
    }

    fn remove_bar(&mut self, bar: BarId) {
        self.bars.remove(&bar);
    }

    fn counter(&self, objective: &str, id: PlayerId) -> Option<i32> {
        self.counters.get(objective)?.get(&id).copied()
    }

    fn set_counter(&mut self, objective: &str, id: PlayerId, value: i32) {
        self.counters
            .entry(objective.to_string())
            .or_default()
            .insert(id, value);
    }

    fn counter_entries(&self, objective: &str) -> Vec<(String, i32)> {
        let Some(entries) = self.counters.get(objective) else {
            return Vec::new();
        };
        entries
            .iter()
            .map(|(id, value)| (self.display_name(*id), *value))
            .collect()
    }

    fn show_menu(&mut self, id: PlayerId, menu: Menu) {
        self.shown_menus.push((id, menu));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offline_players_resist_world_effects() {
        let mut host = SimHost::new();
        let id = host.add_player("Mira", Location::overworld(0.0, 64.0, 0.0));
        host.set_online(id, false);

        host.teleport(id, Location::overworld(9.0, 70.0, 9.0));
        assert_eq!(host.player(id).unwrap().location.x, 0.0);
        assert_eq!(host.location_of(id), None);
        assert_eq!(host.find_by_name("Mira"), None);
    }

    #[test]
    fn test_counters_survive_disconnect() {
        let mut host = SimHost::new();
        let id = host.add_player("Mira", Location::overworld(0.0, 64.0, 0.0));
        host.set_counter("pvp_wins", id, 3);
        host.set_online(id, false);

        assert_eq!(host.counter("pvp_wins", id), Some(3));
        assert_eq!(host.counter_or("elo_rating", id, 1000), 1000);
    }

    #[test]
    fn test_inventory_slots() {
        let mut host = SimHost::new();
        let id = host.add_player("Mira", Location::overworld(0.0, 64.0, 0.0));
        host.give_item(id, 2, ItemStack::single("bow"));

        let inventory = host.inventory_of(id);
        assert_eq!(inventory[2], Some(ItemStack::single("bow")));

        host.clear_inventory(id);
        assert!(host.inventory_of(id).iter().all(Option::is_none));
    }
}
