//! World Events and Duel Outcomes
//!
//! Events the host feeds into the duel lifecycle, and the outcome records
//! the lifecycle produces when a duel resolves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::world::PlayerId;

/// A world event delivered to the duel core on the logical tick stream.
///
/// Death carries two variants because hosts expose a primary player-death
/// signal and a coarser actor-death fallback that may both fire for one
/// death. Both funnel into the same idempotent resolution routine; the
/// re-check of pairing state there, not the entry-point distinction, is
/// what prevents double counting.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorldEvent {
    /// Primary death signal for a player.
    PlayerDeath {
        /// Who died.
        victim: PlayerId,
        /// Attacking player, if the death had one.
        killer: Option<PlayerId>,
    },

    /// Fallback death signal, fired when the primary signal was missed.
    ActorDeath {
        /// Who died.
        victim: PlayerId,
        /// Attacking player, if the death had one.
        killer: Option<PlayerId>,
    },

    /// A player disconnected.
    PlayerQuit {
        /// Who left.
        player: PlayerId,
    },

    /// A player connected.
    PlayerJoin {
        /// Who joined.
        player: PlayerId,
    },
}

/// How a duel was decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// The loser was killed by the winner (or by the environment while
    /// duelling, awarding the opponent).
    Kill,
    /// The loser disconnected mid-duel.
    Forfeit,
    /// An administrative forced end.
    Forced,
}

/// Record of one resolved duel.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DuelOutcome {
    /// Winning identity.
    pub winner: PlayerId,
    /// Losing identity.
    pub loser: PlayerId,
    /// How the duel was decided.
    pub kind: OutcomeKind,
    /// Winner's rating after the update.
    pub winner_rating: i32,
    /// Loser's rating after the update.
    pub loser_rating: i32,
    /// When the duel resolved.
    pub at: DateTime<Utc>,
}

impl DuelOutcome {
    /// Record an outcome resolved now.
    pub fn new(
        winner: PlayerId,
        loser: PlayerId,
        kind: OutcomeKind,
        winner_rating: i32,
        loser_rating: i32,
    ) -> Self {
        Self {
            winner,
            loser,
            kind,
            winner_rating,
            loser_rating,
            at: Utc::now(),
        }
    }
}
