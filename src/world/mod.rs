//! World-Facing Types and Contracts
//!
//! Value types the core exchanges with the surrounding server, the host
//! collaborator contract, and the tick scheduler.
//!
//! ## Module Structure
//!
//! - `location`: dimensions and world positions
//! - `inventory`: item stacks and slot contents
//! - `host`: the `Host` trait and player identities
//! - `scheduler`: one-shot delayed tasks on the tick stream

pub mod host;
pub mod inventory;
pub mod location;
pub mod scheduler;

// Re-export key types
pub use host::{BarId, Host, PlayerId, RATING_OBJECTIVE, WINS_OBJECTIVE};
pub use inventory::{occupied_slots, Inventory, ItemStack};
pub use location::{Dimension, Location};
pub use scheduler::TickScheduler;
