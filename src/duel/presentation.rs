//! Duel Presentation State
//!
//! Tracks which boss-bar handle is assigned to which duellist and issues
//! the create/attach/detach/destroy calls. Both participants of a duel
//! share one bar, recorded under each identity.

use std::collections::BTreeMap;

use crate::world::{BarId, Host, PlayerId};

/// Per-identity boss-bar handle assignments.
#[derive(Clone, Debug, Default)]
pub struct PresentationState {
    bars: BTreeMap<PlayerId, BarId>,
}

impl PresentationState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bar currently assigned to a player.
    pub fn bar_for(&self, id: PlayerId) -> Option<BarId> {
        self.bars.get(&id).copied()
    }

    /// Create or update the shared bar for a duelling pair and make it
    /// visible with a "A vs B" title.
    pub fn show_pair<H: Host>(&mut self, host: &mut H, a: PlayerId, b: PlayerId) {
        let title = format!("{} vs {}", host.display_name(a), host.display_name(b));

        match self.bars.get(&a).copied() {
            Some(bar) => {
                host.set_bar_title(bar, &title);
                host.set_bar_visible(bar, true);
            }
            None => {
                let bar = host.create_bar(&title);
                host.add_bar_player(bar, a);
                host.add_bar_player(bar, b);
                host.set_bar_visible(bar, true);
                self.bars.insert(a, bar);
                self.bars.insert(b, bar);
            }
        }
    }

    /// Tear down the shared bar for a pair: detach both players, hide it,
    /// and destroy it. No-op if neither player has a bar assigned.
    pub fn clear_pair<H: Host>(&mut self, host: &mut H, a: PlayerId, b: PlayerId) {
        let bar = self.bars.remove(&a);
        let bar = match self.bars.remove(&b) {
            Some(other) => Some(bar.unwrap_or(other)),
            None => bar,
        };

        if let Some(bar) = bar {
            host.remove_bar_player(bar, a);
            host.remove_bar_player(bar, b);
            host.set_bar_visible(bar, false);
            host.remove_bar(bar);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimHost;
    use crate::world::Location;

    fn host_with_pair() -> (SimHost, PlayerId, PlayerId) {
        let mut host = SimHost::new();
        let a = host.add_player("Mira", Location::overworld(0.0, 64.0, 0.0));
        let b = host.add_player("Bren", Location::overworld(8.0, 64.0, 8.0));
        (host, a, b)
    }

    #[test]
    fn test_show_pair_creates_shared_bar() {
        let (mut host, a, b) = host_with_pair();
        let mut presentation = PresentationState::new();

        presentation.show_pair(&mut host, a, b);

        let bar = presentation.bar_for(a).unwrap();
        assert_eq!(presentation.bar_for(b), Some(bar));
        assert_eq!(host.bar_title(bar), Some("Mira vs Bren".to_string()));
        assert!(host.bar_visible(bar));
    }

    #[test]
    fn test_show_pair_reuses_existing_bar() {
        let (mut host, a, b) = host_with_pair();
        let mut presentation = PresentationState::new();

        presentation.show_pair(&mut host, a, b);
        let bar = presentation.bar_for(a).unwrap();
        presentation.show_pair(&mut host, a, b);

        assert_eq!(presentation.bar_for(a), Some(bar));
        assert_eq!(host.bar_count(), 1);
    }

    #[test]
    fn test_clear_pair_destroys_bar_and_entries() {
        let (mut host, a, b) = host_with_pair();
        let mut presentation = PresentationState::new();

        presentation.show_pair(&mut host, a, b);
        presentation.clear_pair(&mut host, a, b);

        assert_eq!(presentation.bar_for(a), None);
        assert_eq!(presentation.bar_for(b), None);
        assert_eq!(host.bar_count(), 0);

        // Clearing again is a no-op
        presentation.clear_pair(&mut host, a, b);
    }
}
