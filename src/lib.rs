//! # Duel Arena Server
//!
//! Orchestration core for head-to-head player duels: challenges, arena
//! rounds, Elo ratings, and crash-safe restoration of each player's
//! pre-duel state.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    DUEL ARENA SERVER                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  world/            - Host abstraction                        │
//! │  ├── host.rs       - Host trait, player identity, counters   │
//! │  ├── location.rs   - Dimensions and world coordinates        │
//! │  ├── inventory.rs  - Slot-indexed item stacks                │
//! │  └── scheduler.rs  - Tick-based deferred task queue          │
//! │                                                              │
//! │  duel/             - Duel state and lifecycle                │
//! │  ├── challenge.rs  - Pending challenge directory             │
//! │  ├── registry.rs   - Active duel pairings                    │
//! │  ├── snapshot.rs   - Pre-duel inventory/location snapshots   │
//! │  ├── rating.rs     - Elo rating updates                      │
//! │  ├── presentation.rs - Shared boss bars per duel             │
//! │  ├── events.rs     - World events and duel outcomes          │
//! │  └── lifecycle.rs  - The controller tying it all together    │
//! │                                                              │
//! │  menu/             - Menu trees as plain data                │
//! │  sim/              - In-memory host for tests and demos      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Execution Model
//!
//! All duel state is mutated from a single logical tick stream: the host
//! delivers events and advances [`DuelLifecycle::on_tick`] in order, so
//! the state machine needs no internal locking. Deferred work (round
//! resolution, delayed restores) goes through the tick scheduler, and
//! every deferred resolution re-checks current pairing state before
//! acting, making duplicate death signals harmless.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod duel;
pub mod menu;
pub mod sim;
pub mod world;

// Re-export commonly used types
pub use duel::{
    Command, DuelConfig, DuelError, DuelLifecycle, DuelOutcome, DuelRegistry, OutcomeKind,
    SnapshotStore, WorldEvent,
};
pub use menu::{Menu, MenuKind};
pub use world::{Host, Location, PlayerId, RATING_OBJECTIVE, WINS_OBJECTIVE};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Host tick rate (Hz)
pub const TICK_RATE: u32 = 20;
