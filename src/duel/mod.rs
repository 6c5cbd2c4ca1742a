//! Duel State and Lifecycle
//!
//! Everything that makes a duel a duel: challenge bookkeeping, the
//! active-pair registry, pre-duel snapshots, Elo ratings, boss-bar
//! presentation, and the lifecycle controller that ties them to the
//! host's event and tick stream.

pub mod challenge;
pub mod events;
pub mod lifecycle;
pub mod presentation;
pub mod rating;
pub mod registry;
pub mod snapshot;

pub use challenge::ChallengeDirectory;
pub use events::{DuelOutcome, OutcomeKind, WorldEvent};
pub use lifecycle::{Command, DuelConfig, DuelError, DuelLifecycle, ScheduledTask};
pub use presentation::PresentationState;
pub use registry::DuelRegistry;
pub use snapshot::SnapshotStore;
