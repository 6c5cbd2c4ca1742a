//! Challenge Directory
//!
//! Pending duel requests, keyed by target display name. Display names are
//! what the menu layer presents, so this map deliberately uses names
//! rather than identities; duel state proper is always identity-keyed.

use std::collections::BTreeMap;

/// Per-target ordered lists of pending challenger names.
///
/// Repeated challenges from the same challenger produce repeated entries;
/// duplicates and stale names are left to the menu layer, which filters
/// to currently-connected players when listing.
#[derive(Clone, Debug, Default)]
pub struct ChallengeDirectory {
    pending: BTreeMap<String, Vec<String>>,
}

impl ChallengeDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a challenge from `challenger` to `target`.
    pub fn challenge(&mut self, challenger: &str, target: &str) {
        self.pending
            .entry(target.to_string())
            .or_default()
            .push(challenger.to_string());
    }

    /// Pending challenger names for a target, in insertion order.
    pub fn pending_for(&self, target: &str) -> &[String] {
        self.pending.get(target).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Remove the first pending entry from `challenger` to `target`.
    /// Returns whether an entry was removed; an unknown name is a no-op.
    pub fn resolve(&mut self, target: &str, challenger: &str) -> bool {
        let Some(list) = self.pending.get_mut(target) else {
            return false;
        };
        let Some(index) = list.iter().position(|name| name == challenger) else {
            return false;
        };
        list.remove(index);
        true
    }
}
