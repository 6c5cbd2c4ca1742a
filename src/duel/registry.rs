//! Duel Registry
//!
//! The authoritative pairing map: player identity to opponent identity.
//! Uses BTreeMap for deterministic iteration order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::world::PlayerId;

/// Symmetric map of active duels.
///
/// Invariants: if `a -> b` then `b -> a`; an identity appears as a key at
/// most once (at most one active duel per player); absence of a key means
/// "not currently duelling".
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DuelRegistry {
    pairs: BTreeMap<PlayerId, PlayerId>,
}

impl DuelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a duel between two players.
    ///
    /// # Panics
    ///
    /// Panics if either player is already duelling or if both sides are
    /// the same identity. Silent overwrite would leak a stale duel, so a
    /// violated precondition is a caller bug and fails loudly.
    pub fn pair(&mut self, a: PlayerId, b: PlayerId) {
        assert!(a != b, "cannot pair player {a} with themselves");
        assert!(
            !self.pairs.contains_key(&a),
            "player {a} is already in a duel"
        );
        assert!(
            !self.pairs.contains_key(&b),
            "player {b} is already in a duel"
        );

        self.pairs.insert(a, b);
        self.pairs.insert(b, a);
    }

    /// Current opponent of a player, if they are duelling.
    pub fn opponent_of(&self, id: PlayerId) -> Option<PlayerId> {
        self.pairs.get(&id).copied()
    }

    /// Whether the player is currently duelling.
    pub fn contains(&self, id: PlayerId) -> bool {
        self.pairs.contains_key(&id)
    }

    /// Remove a player's duel, both directions. Safe to call for players
    /// not in any duel; returns the opponent that was removed, if any.
    pub fn unpair(&mut self, id: PlayerId) -> Option<PlayerId> {
        let opponent = self.pairs.remove(&id)?;
        self.pairs.remove(&opponent);
        Some(opponent)
    }

    /// Whether no duels are active.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of active duels.
    pub fn active_duels(&self) -> usize {
        self.pairs.len() / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u8) -> PlayerId {
        PlayerId::new([n; 16])
    }

    #[test]
    fn test_pair_is_symmetric() {
        let mut registry = DuelRegistry::new();
        registry.pair(id(1), id(2));

        assert_eq!(registry.opponent_of(id(1)), Some(id(2)));
        assert_eq!(registry.opponent_of(id(2)), Some(id(1)));
        assert_eq!(registry.active_duels(), 1);
    }

    #[test]
    fn test_unpair_removes_both_directions() {
        let mut registry = DuelRegistry::new();
        registry.pair(id(1), id(2));

        assert_eq!(registry.unpair(id(1)), Some(id(2)));
        assert_eq!(registry.opponent_of(id(1)), None);
        assert_eq!(registry.opponent_of(id(2)), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unpair_unknown_player_is_noop() {
        let mut registry = DuelRegistry::new();
        assert_eq!(registry.unpair(id(9)), None);

        registry.pair(id(1), id(2));
        assert_eq!(registry.unpair(id(9)), None);
        assert_eq!(registry.active_duels(), 1);
    }

    #[test]
    fn test_unpair_is_idempotent() {
        let mut registry = DuelRegistry::new();
        registry.pair(id(1), id(2));

        assert_eq!(registry.unpair(id(1)), Some(id(2)));
        assert_eq!(registry.unpair(id(1)), None);
        assert_eq!(registry.unpair(id(2)), None);
    }

    #[test]
    #[should_panic(expected = "already in a duel")]
    fn test_pair_rejects_active_duellist() {
        let mut registry = DuelRegistry::new();
        registry.pair(id(1), id(2));
        registry.pair(id(1), id(3));
    }

    #[test]
    fn test_independent_duels() {
        let mut registry = DuelRegistry::new();
        registry.pair(id(1), id(2));
        registry.pair(id(3), id(4));

        registry.unpair(id(2));
        assert_eq!(registry.opponent_of(id(3)), Some(id(4)));
        assert!(!registry.is_empty());
        assert_eq!(registry.active_duels(), 1);
    }
}
