//! Host Server Contract
//!
//! The interface the surrounding game server presents to the duel core:
//! player directory, world effects, boss bars, persistent counters, and
//! menu display. The core calls these as black-box effects and never
//! models the world's internal representation.

use serde::{Deserialize, Serialize};

use crate::menu::Menu;
use crate::world::inventory::{Inventory, ItemStack};
use crate::world::location::Location;

/// Scoreboard objective backing win counts.
pub const WINS_OBJECTIVE: &str = "pvp_wins";

/// Scoreboard objective backing Elo ratings.
pub const RATING_OBJECTIVE: &str = "elo_rating";

/// Stable unique identifier for a connected or recently-connected player
/// (UUID as bytes).
///
/// Survives reconnects; all duel state is keyed by this, never by display
/// name. Implements Ord for deterministic BTreeMap ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub [u8; 16]);

impl PlayerId {
    /// Create from raw bytes.
    pub const fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Create a fresh random identity.
    pub fn random() -> Self {
        Self(*uuid::Uuid::new_v4().as_bytes())
    }

    /// Create from UUID string.
    pub fn from_uuid_str(s: &str) -> Option<Self> {
        uuid::Uuid::parse_str(s).ok().map(|u| Self(*u.as_bytes()))
    }

    /// Convert to UUID string.
    pub fn to_uuid_string(&self) -> String {
        uuid::Uuid::from_bytes(self.0).to_string()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_uuid_string())
    }
}

/// Handle to a boss bar created by the host.
pub type BarId = u32;

/// Everything the duel core needs from the surrounding server.
///
/// All calls are delivered on the same single logical tick stream as the
/// world events themselves; implementations need no internal locking on
/// behalf of the core.
pub trait Host {
    // =========================================================================
    // Player directory
    // =========================================================================

    /// Whether the identity currently resolves to a live, connected player.
    fn is_online(&self, id: PlayerId) -> bool;

    /// Last-known display name for the identity, online or not.
    fn display_name(&self, id: PlayerId) -> String;

    /// Identities of all currently-connected players.
    fn online_players(&self) -> Vec<PlayerId>;

    /// Resolve a display name to a connected player's identity.
    fn find_by_name(&self, name: &str) -> Option<PlayerId>;

    // =========================================================================
    // World effects
    // =========================================================================

    /// Current location, or `None` if the player is offline.
    fn location_of(&self, id: PlayerId) -> Option<Location>;

    /// Teleport a player. No-op for offline players.
    fn teleport(&mut self, id: PlayerId, location: Location);

    /// Restore a player to full health.
    fn heal_full(&mut self, id: PlayerId);

    /// Snapshot of the player's current inventory contents.
    fn inventory_of(&self, id: PlayerId) -> Inventory;

    /// Empty every slot of the player's inventory.
    fn clear_inventory(&mut self, id: PlayerId);

    /// Place an item stack in a specific inventory slot.
    fn set_inventory_slot(&mut self, id: PlayerId, slot: usize, item: ItemStack);

    // =========================================================================
    // Messaging
    // =========================================================================

    /// Send a short tip message to one player.
    fn send_message(&mut self, id: PlayerId, text: &str);

    /// Send a title/subtitle banner to one player.
    fn send_title(&mut self, id: PlayerId, title: &str, subtitle: &str);

    /// Broadcast a message to every connected player.
    fn broadcast(&mut self, text: &str);

    // =========================================================================
    // World rules
    // =========================================================================

    /// Toggle the global "no item loss on death" rule. Best effort: the
    /// core logs failures and carries on.
    fn set_keep_inventory(&mut self, enabled: bool) -> anyhow::Result<()>;

    // =========================================================================
    // Boss bars
    // =========================================================================

    /// Create a boss bar with the given title.
    fn create_bar(&mut self, title: &str) -> BarId;

    /// Attach a player to a bar.
    fn add_bar_player(&mut self, bar: BarId, id: PlayerId);

    /// Detach a player from a bar.
    fn remove_bar_player(&mut self, bar: BarId, id: PlayerId);

    /// Retitle a bar.
    fn set_bar_title(&mut self, bar: BarId, title: &str);

    /// Show or hide a bar.
    fn set_bar_visible(&mut self, bar: BarId, visible: bool);

    /// Destroy a bar, detaching any remaining players.
    fn remove_bar(&mut self, bar: BarId);

    // =========================================================================
    // Persistent counters
    // =========================================================================

    /// Read a counter, or `None` if never set for this player.
    fn counter(&self, objective: &str, id: PlayerId) -> Option<i32>;

    /// Write a counter.
    fn set_counter(&mut self, objective: &str, id: PlayerId, value: i32);

    /// All recorded `(display name, value)` entries for an objective.
    fn counter_entries(&self, objective: &str) -> Vec<(String, i32)>;

    /// Read a counter with a default for unset entries.
    fn counter_or(&self, objective: &str, id: PlayerId, default: i32) -> i32 {
        self.counter(objective, id).unwrap_or(default)
    }

    // =========================================================================
    // Menus
    // =========================================================================

    /// Display a selection menu to a player. Fire and forget; the chosen
    /// index (or a dismissal) comes back later through
    /// [`DuelLifecycle::on_menu_response`](crate::duel::DuelLifecycle::on_menu_response).
    fn show_menu(&mut self, id: PlayerId, menu: Menu);
}
