//! Duel Lifecycle Controller
//!
//! The state machine driving duels from challenge acceptance to restored
//! aftermath. Consumes world events (death, quit, join), owns the
//! registry/snapshot/presentation state, applies rating updates, and runs
//! the bounded retry loop for outcome resolution.
//!
//! Resolution is deliberately not synchronous with the death event: it is
//! deferred a couple of ticks so the world settles, which opens a window
//! where a duel is logically won but still registered. Every deferred
//! resolution therefore re-checks current pairing state when it fires,
//! making the whole path idempotent per duel.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::duel::challenge::ChallengeDirectory;
use crate::duel::events::{DuelOutcome, OutcomeKind, WorldEvent};
use crate::duel::presentation::PresentationState;
use crate::duel::rating::{self, DEFAULT_RATING};
use crate::duel::registry::DuelRegistry;
use crate::duel::snapshot::SnapshotStore;
use crate::menu::{Menu, MenuKind};
use crate::world::{
    occupied_slots, Host, Inventory, Location, PlayerId, TickScheduler, RATING_OBJECTIVE,
    WINS_OBJECTIVE,
};

/// Tunables for the duel lifecycle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DuelConfig {
    /// Fixed arena location both duellists are teleported to.
    pub arena: Location,
    /// Ticks between a death signal and the first resolution attempt,
    /// and between retries.
    pub resolve_delay_ticks: u64,
    /// Resolution attempts before giving up on an unresolvable pair.
    pub resolve_attempts: u8,
    /// Ticks between inventory restore and the teleport-home-and-heal
    /// final step.
    pub restore_delay_ticks: u64,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            arena: Location::overworld(0.0, 100.0, 0.0),
            resolve_delay_ticks: 2,
            resolve_attempts: 5,
            restore_delay_ticks: 40,
        }
    }
}

/// Failures reported back to a requesting player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DuelError {
    /// The requester has no active duel.
    #[error("You are not in a duel")]
    NotInDuel,
    /// The requester's opponent is offline.
    #[error("Opponent not online")]
    OpponentOffline,
    /// A participant could not be resolved to a live player.
    #[error("Player not online")]
    PlayerOffline,
    /// A participant already has an open duel.
    #[error("Player is already in a duel")]
    AlreadyInDuel,
}

/// Chat commands dispatched to the lifecycle. Parsing and permission
/// checks stay with the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Open the duel menu.
    Pvp,
    /// Force-finish the sender's active duel.
    ForceEnd,
}

/// Deferred work queued on the tick scheduler.
#[derive(Clone, Debug)]
pub enum ScheduledTask {
    /// Attempt to resolve a decided duel, retrying while participants are
    /// transiently unavailable.
    ResolveDuel {
        /// Identity awarded the win.
        winner: PlayerId,
        /// Identity that lost.
        loser: PlayerId,
        /// Remaining retry budget.
        attempts_left: u8,
    },
    /// Final restore step: teleport a player to their pre-duel location
    /// and heal them. Delayed so restored gear never coexists with the
    /// arena.
    FinishRestore {
        /// Who to restore.
        player: PlayerId,
        /// Saved pre-duel location, if one was recorded.
        location: Option<Location>,
    },
}

/// The duel lifecycle controller.
///
/// Owns every piece of duel state and the host handle; all methods are
/// invoked from the host's single logical tick stream.
pub struct DuelLifecycle<H: Host> {
    host: H,
    config: DuelConfig,
    registry: DuelRegistry,
    snapshots: SnapshotStore,
    challenges: ChallengeDirectory,
    presentation: PresentationState,
    scheduler: TickScheduler<ScheduledTask>,
    open_menus: BTreeMap<PlayerId, Menu>,
    history: Vec<DuelOutcome>,
}

impl<H: Host> DuelLifecycle<H> {
    /// Create a controller around a host.
    pub fn new(host: H, config: DuelConfig) -> Self {
        Self {
            host,
            config,
            registry: DuelRegistry::new(),
            snapshots: SnapshotStore::new(),
            challenges: ChallengeDirectory::new(),
            presentation: PresentationState::new(),
            scheduler: TickScheduler::new(),
            open_menus: BTreeMap::new(),
            history: Vec::new(),
        }
    }

    /// The host handle.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host handle.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Active duel pairings.
    pub fn registry(&self) -> &DuelRegistry {
        &self.registry
    }

    /// Pending pre-duel snapshots.
    pub fn snapshots(&self) -> &SnapshotStore {
        &self.snapshots
    }

    /// Resolved duels, oldest first.
    pub fn history(&self) -> &[DuelOutcome] {
        &self.history
    }

    /// Lifecycle configuration.
    pub fn config(&self) -> &DuelConfig {
        &self.config
    }

    // =========================================================================
    // Event ingestion
    // =========================================================================

    /// Feed one world event into the lifecycle.
    pub fn on_event(&mut self, event: WorldEvent) {
        match event {
            WorldEvent::PlayerDeath { victim, killer } => self.on_player_death(victim, killer),
            WorldEvent::ActorDeath { victim, killer } => self.on_actor_death(victim, killer),
            WorldEvent::PlayerQuit { player } => self.on_quit(player),
            WorldEvent::PlayerJoin { player } => self.on_join(player),
        }
    }

    /// Advance one tick: run every deferred task that became due.
    pub fn on_tick(&mut self) {
        for task in self.scheduler.advance() {
            self.run_task(task);
        }
    }

    /// Primary death signal.
    pub fn on_player_death(&mut self, victim: PlayerId, killer: Option<PlayerId>) {
        info!(
            "death: {} killed by {}",
            self.host.display_name(victim),
            killer
                .map(|k| self.host.display_name(k))
                .unwrap_or_else(|| "<none>".to_string())
        );
        self.handle_death(victim, killer);
    }

    /// Fallback death signal, for hosts where the primary signal can be
    /// missed. Funnels into the same resolution routine; the pairing
    /// re-check there makes a duplicate signal harmless.
    pub fn on_actor_death(&mut self, victim: PlayerId, killer: Option<PlayerId>) {
        warn!(
            "death fallback triggered for {}",
            self.host.display_name(victim)
        );
        self.handle_death(victim, killer);
    }

    fn handle_death(&mut self, victim: PlayerId, killer: Option<PlayerId>) {
        match killer {
            Some(killer) => {
                let opponent = self.registry.opponent_of(killer);
                if opponent == Some(victim) {
                    debug!(
                        "duel over: {} defeated {}",
                        self.host.display_name(killer),
                        self.host.display_name(victim)
                    );
                    self.schedule_resolution(killer, victim);
                } else {
                    // Stray kill outside the pairing; never guess a winner.
                    warn!(
                        "duel state mismatch for kill: killer={killer} victim={victim} opponent={opponent:?}"
                    );
                }
            }
            None => {
                // Environmental death. If the victim was duelling, their
                // opponent wins by forfeit.
                let Some(opponent) = self.registry.opponent_of(victim) else {
                    return;
                };
                if self.host.is_online(opponent) {
                    warn!(
                        "no killer for {}; awarding duel to {}",
                        self.host.display_name(victim),
                        self.host.display_name(opponent)
                    );
                    self.schedule_resolution(opponent, victim);
                } else {
                    warn!("opponent {opponent} offline during fallback duel end");
                }
            }
        }
    }

    fn schedule_resolution(&mut self, winner: PlayerId, loser: PlayerId) {
        self.scheduler.after(
            self.config.resolve_delay_ticks,
            ScheduledTask::ResolveDuel {
                winner,
                loser,
                attempts_left: self.config.resolve_attempts,
            },
        );
    }

    fn run_task(&mut self, task: ScheduledTask) {
        match task {
            ScheduledTask::ResolveDuel {
                winner,
                loser,
                attempts_left,
            } => self.try_resolve(winner, loser, attempts_left),
            ScheduledTask::FinishRestore { player, location } => {
                self.finish_restore(player, location)
            }
        }
    }

    fn try_resolve(&mut self, winner: PlayerId, loser: PlayerId, attempts_left: u8) {
        // The duel may have been resolved through another path (quit, a
        // duplicate death signal) while this attempt was queued.
        if self.registry.opponent_of(winner) != Some(loser) {
            debug!("duel {winner} vs {loser} no longer registered; skipping resolution");
            return;
        }

        if self.host.is_online(winner) && self.host.is_online(loser) {
            self.end_duel(winner, loser, OutcomeKind::Kill);
        } else if attempts_left > 0 {
            debug!(
                "players unavailable, retrying resolution in {} ticks ({attempts_left} attempts left)",
                self.config.resolve_delay_ticks
            );
            self.scheduler.after(
                self.config.resolve_delay_ticks,
                ScheduledTask::ResolveDuel {
                    winner,
                    loser,
                    attempts_left: attempts_left - 1,
                },
            );
        } else {
            warn!(
                "cannot resolve duel, players offline (winner={winner}, loser={loser}); giving up"
            );
        }
    }

    fn finish_restore(&mut self, player: PlayerId, location: Option<Location>) {
        if !self.host.is_online(player) {
            debug!("skipping delayed restore for offline player {player}");
            return;
        }
        if let Some(location) = location {
            self.host.teleport(player, location);
            info!(
                "teleported {} back to {location}",
                self.host.display_name(player)
            );
        }
        self.host.heal_full(player);
    }

    // =========================================================================
    // Duel start
    // =========================================================================

    /// Start a duel between two idle, connected players: snapshot both,
    /// register the pairing, enable the no-item-loss rule for the first
    /// active duel, and arm the first round.
    pub fn start_duel(&mut self, a: PlayerId, b: PlayerId) -> Result<(), DuelError> {
        if a == b || self.registry.contains(a) || self.registry.contains(b) {
            return Err(DuelError::AlreadyInDuel);
        }
        let loc_a = self.host.location_of(a).ok_or(DuelError::PlayerOffline)?;
        let loc_b = self.host.location_of(b).ok_or(DuelError::PlayerOffline)?;

        debug!(
            "starting duel between {} and {}",
            self.host.display_name(a),
            self.host.display_name(b)
        );

        self.snapshots.save(a, self.host.inventory_of(a), loc_a);
        self.snapshots.save(b, self.host.inventory_of(b), loc_b);
        self.registry.pair(a, b);

        if self.registry.active_duels() == 1 {
            self.apply_keep_inventory(true);
        }

        self.reset_round(a, b);
        Ok(())
    }

    /// Arm a round: re-apply both saved kits, heal fully, teleport both
    /// to the arena, and show the duel banner and shared boss bar. Reuses
    /// the existing snapshots, so later rounds of the same duel go
    /// through here without re-snapshotting.
    pub fn reset_round(&mut self, a: PlayerId, b: PlayerId) {
        for player in [a, b] {
            if let Some(kit) = self.snapshots.inventory(player).cloned() {
                self.apply_inventory(player, &kit);
            }
            self.host.heal_full(player);
            self.host.teleport(player, self.config.arena);
        }

        let banner = format!(
            "{} vs {}",
            self.host.display_name(a),
            self.host.display_name(b)
        );
        self.host.send_title(a, &banner, "Fight!");
        self.host.send_title(b, &banner, "Fight!");
        self.presentation.show_pair(&mut self.host, a, b);
    }

    // =========================================================================
    // Duel end
    // =========================================================================

    /// Resolve a decided duel with both participants live: apply win
    /// count and ratings, tear down presentation, restore inventories
    /// now, schedule the delayed teleport-home, and unregister the pair.
    fn end_duel(&mut self, winner: PlayerId, loser: PlayerId, kind: OutcomeKind) {
        let winner_name = self.host.display_name(winner);
        let loser_name = self.host.display_name(loser);
        info!("ending duel: {winner_name} defeated {loser_name}");

        let wins = self.host.counter_or(WINS_OBJECTIVE, winner, 0) + 1;
        self.host.set_counter(WINS_OBJECTIVE, winner, wins);
        debug!("win count for {winner_name} now {wins}");

        let (winner_rating, loser_rating) = self.apply_rating_update(winner, loser);

        self.presentation.clear_pair(&mut self.host, winner, loser);

        for player in [winner, loser] {
            if let Some(saved) = self.snapshots.take_inventory(player) {
                self.apply_inventory(player, &saved);
            }
            let location = self.snapshots.take_location(player);
            self.scheduler.after(
                self.config.restore_delay_ticks,
                ScheduledTask::FinishRestore { player, location },
            );
            self.registry.unpair(player);
        }

        self.host.send_title(winner, "Duel Won", "");
        self.host.send_title(loser, "Duel Lost", "");
        self.host
            .broadcast(&format!("{winner_name} defeated {loser_name} in a duel!"));

        self.history.push(DuelOutcome::new(
            winner,
            loser,
            kind,
            winner_rating,
            loser_rating,
        ));

        if self.registry.is_empty() {
            self.apply_keep_inventory(false);
        }
    }

    /// Abbreviated end-duel path when the loser disconnected: only the
    /// winner is live, so their restore happens immediately, no delay.
    fn end_duel_forfeit(&mut self, winner: PlayerId, loser: PlayerId) {
        let winner_name = self.host.display_name(winner);
        let loser_name = self.host.display_name(loser);

        let wins = self.host.counter_or(WINS_OBJECTIVE, winner, 0) + 1;
        self.host.set_counter(WINS_OBJECTIVE, winner, wins);

        let (winner_rating, loser_rating) = self.apply_rating_update(winner, loser);

        if let Some(saved) = self.snapshots.take_inventory(winner) {
            self.apply_inventory(winner, &saved);
        }
        if let Some(location) = self.snapshots.take_location(winner) {
            self.host.teleport(winner, location);
        }
        self.host.heal_full(winner);

        self.host.broadcast(&format!(
            "{winner_name} defeated {loser_name} in a duel (opponent disconnected)!"
        ));
        info!("duel ended: {loser_name} disconnected");

        self.history.push(DuelOutcome::new(
            winner,
            loser,
            OutcomeKind::Forfeit,
            winner_rating,
            loser_rating,
        ));

        if self.registry.is_empty() {
            self.apply_keep_inventory(false);
        }
    }

    /// Force-finish the requester's active duel, awarding them the win.
    /// Failures are surfaced to the requester instead of retried.
    pub fn force_end(&mut self, requester: PlayerId) -> Result<(), DuelError> {
        let opponent = self
            .registry
            .opponent_of(requester)
            .ok_or(DuelError::NotInDuel)?;
        if !self.host.is_online(opponent) {
            return Err(DuelError::OpponentOffline);
        }
        self.end_duel(requester, opponent, OutcomeKind::Forced);
        Ok(())
    }

    // =========================================================================
    // Connection events
    // =========================================================================

    /// A player disconnected. If they were duelling, the duel resolves
    /// immediately: forfeit to the opponent if the opponent is still
    /// connected, otherwise the duel simply evaporates.
    pub fn on_quit(&mut self, player: PlayerId) {
        self.open_menus.remove(&player);

        let Some(opponent) = self.registry.unpair(player) else {
            return;
        };
        self.presentation.clear_pair(&mut self.host, player, opponent);

        if self.host.is_online(opponent) {
            info!(
                "{} disconnected, awarding duel to {}",
                self.host.display_name(player),
                self.host.display_name(opponent)
            );
            self.end_duel_forfeit(opponent, player);
        } else {
            info!(
                "both duelists offline after {} quit; duel evaporates",
                self.host.display_name(player)
            );
            if self.registry.is_empty() {
                self.apply_keep_inventory(false);
            }
        }
    }

    /// A player connected. If an unrestored pre-duel snapshot is still
    /// recorded for them, restore it now; this is the safety net ensuring
    /// no player permanently loses their pre-duel items.
    pub fn on_join(&mut self, player: PlayerId) {
        if !self.snapshots.has_pending(player) {
            return;
        }
        if let Some(saved) = self.snapshots.take_inventory(player) {
            self.apply_inventory(player, &saved);
        }
        if let Some(location) = self.snapshots.take_location(player) {
            self.host.teleport(player, location);
        }
        self.host.heal_full(player);
        info!(
            "restored pre-duel state for {} on join",
            self.host.display_name(player)
        );
    }

    // =========================================================================
    // Challenges and menus
    // =========================================================================

    /// Dispatch a chat command from a player.
    pub fn on_command(&mut self, sender: PlayerId, command: Command) {
        match command {
            Command::Pvp => self.show_menu(sender, Menu::main()),
            Command::ForceEnd => {
                if let Err(err) = self.force_end(sender) {
                    self.host.send_message(sender, &err.to_string());
                }
            }
        }
    }

    /// Record a challenge and notify both players.
    pub fn send_challenge(&mut self, challenger: PlayerId, target: PlayerId) {
        let challenger_name = self.host.display_name(challenger);
        let target_name = self.host.display_name(target);
        self.challenges.challenge(&challenger_name, &target_name);

        self.host
            .send_message(challenger, &format!("Duel request sent to {target_name}"));
        self.host.send_message(
            target,
            &format!("{challenger_name} challenged you. Use /pvp to respond."),
        );
    }

    /// Accept a pending challenge: remove it from the directory and start
    /// the duel. A start failure (challenger went offline or got into
    /// another duel meanwhile) is reported to the accepting player.
    pub fn accept_challenge(&mut self, target: PlayerId, challenger: PlayerId) {
        let target_name = self.host.display_name(target);
        let challenger_name = self.host.display_name(challenger);
        self.challenges.resolve(&target_name, &challenger_name);

        if let Err(err) = self.start_duel(challenger, target) {
            self.host.send_message(target, &err.to_string());
        }
    }

    /// Decline a pending challenge: remove it without pairing.
    pub fn decline_challenge(&mut self, target: PlayerId, challenger: PlayerId) {
        let target_name = self.host.display_name(target);
        let challenger_name = self.host.display_name(challenger);
        self.challenges.resolve(&target_name, &challenger_name);
    }

    /// A player answered (or dismissed) the menu most recently shown to
    /// them. The response resolves against the option list captured when
    /// the menu was built.
    pub fn on_menu_response(&mut self, player: PlayerId, choice: Option<usize>) {
        let Some(menu) = self.open_menus.remove(&player) else {
            return;
        };
        let Some(index) = choice else {
            return;
        };

        match menu.kind {
            MenuKind::Main => match index {
                0 => self.show_opponent_select(player),
                1 => self.show_pending_requests(player),
                2 => self.show_menu(player, Menu::leaderboards()),
                _ => {}
            },
            MenuKind::OpponentSelect { candidates } => {
                if let Some(target) = candidates.get(index).copied() {
                    self.send_challenge(player, target);
                }
            }
            MenuKind::PendingRequests { challengers } => {
                if let Some(challenger) = challengers.get(index).copied() {
                    self.accept_challenge(player, challenger);
                }
            }
            MenuKind::Leaderboards => match index {
                0 => {
                    let entries = self.host.counter_entries(RATING_OBJECTIVE);
                    self.show_menu(player, Menu::leaderboard("ELO Leaderboard", entries));
                }
                1 => {
                    let entries = self.host.counter_entries(WINS_OBJECTIVE);
                    self.show_menu(player, Menu::leaderboard("Win Leaderboard", entries));
                }
                _ => {}
            },
            MenuKind::LeaderboardDisplay => {}
        }
    }

    fn show_menu(&mut self, player: PlayerId, menu: Menu) {
        self.open_menus.insert(player, menu.clone());
        self.host.show_menu(player, menu);
    }

    fn show_opponent_select(&mut self, viewer: PlayerId) {
        let mut entries = Vec::new();
        for other in self.host.online_players() {
            if other == viewer {
                continue;
            }
            let rating = self.rating_of(other);
            let name = self.host.display_name(other);
            entries.push((other, format!("{name} ({rating})")));
        }
        self.show_menu(viewer, Menu::opponent_select(entries));
    }

    fn show_pending_requests(&mut self, viewer: PlayerId) {
        let viewer_name = self.host.display_name(viewer);
        let pending = self.challenges.pending_for(&viewer_name).to_vec();

        // Names only resolve for currently-connected challengers;
        // everyone else is hidden from the list.
        let mut entries = Vec::new();
        for name in pending {
            if let Some(id) = self.host.find_by_name(&name) {
                entries.push((id, name));
            }
        }
        self.show_menu(viewer, Menu::pending_requests(entries));
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// A player's rating, assigning the default lazily on first read.
    pub fn rating_of(&mut self, id: PlayerId) -> i32 {
        match self.host.counter(RATING_OBJECTIVE, id) {
            Some(rating) => rating,
            None => {
                self.host.set_counter(RATING_OBJECTIVE, id, DEFAULT_RATING);
                DEFAULT_RATING
            }
        }
    }

    fn apply_rating_update(&mut self, winner: PlayerId, loser: PlayerId) -> (i32, i32) {
        let old_winner = self.rating_of(winner);
        let old_loser = self.rating_of(loser);
        let (new_winner, new_loser) = rating::update(old_winner, old_loser);
        self.host.set_counter(RATING_OBJECTIVE, winner, new_winner);
        self.host.set_counter(RATING_OBJECTIVE, loser, new_loser);
        debug!("ratings updated: winner {old_winner} -> {new_winner}, loser {old_loser} -> {new_loser}");
        (new_winner, new_loser)
    }

    /// Clear a player's inventory and reapply saved contents at their
    /// original slot indices, skipping empty slots.
    fn apply_inventory(&mut self, player: PlayerId, saved: &Inventory) {
        self.host.clear_inventory(player);
        for (slot, item) in occupied_slots(saved) {
            self.host.set_inventory_slot(player, slot, item.clone());
        }
    }

    /// Toggle the no-item-loss rule; a failed toggle is cosmetic and must
    /// not abort the surrounding transition.
    fn apply_keep_inventory(&mut self, enabled: bool) {
        if let Err(err) = self.host.set_keep_inventory(enabled) {
            error!("failed to set keep-inventory rule: {err:#}");
        }
    }
}
