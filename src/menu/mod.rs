//! Selection Menus
//!
//! Plain-data menu model for the host's UI layer. The core builds a
//! [`Menu`], the host renders it however it likes, and the chosen button
//! index (or a dismissal) comes back through the lifecycle. Each menu
//! carries the option identities captured at display time, so a response
//! resolves against exactly what the player saw.

use serde::{Deserialize, Serialize};

use crate::world::PlayerId;

/// Maximum rows shown on a leaderboard.
const LEADERBOARD_LIMIT: usize = 10;

/// What a menu's buttons mean when a response arrives.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MenuKind {
    /// Top-level menu: challenge / pending / leaderboards.
    Main,
    /// Opponent selection; one button per candidate.
    OpponentSelect {
        /// Candidate identities, in button order.
        candidates: Vec<PlayerId>,
    },
    /// Pending challenge review; one button per challenger.
    PendingRequests {
        /// Challenger identities, in button order.
        challengers: Vec<PlayerId>,
    },
    /// Leaderboard selection: rating or win count.
    Leaderboards,
    /// Content-only leaderboard display; no actionable buttons.
    LeaderboardDisplay,
}

/// A titled list of labeled options shown to one player.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Menu {
    /// Menu title.
    pub title: String,
    /// Body text shown above the buttons, if any.
    pub content: Option<String>,
    /// Button labels, in order.
    pub buttons: Vec<String>,
    /// What the buttons mean.
    pub kind: MenuKind,
}

impl Menu {
    /// The top-level duel menu.
    pub fn main() -> Self {
        Self {
            title: "PvP Menu".to_string(),
            content: None,
            buttons: vec![
                "Challenge Player".to_string(),
                "Pending Requests".to_string(),
                "Leaderboards".to_string(),
            ],
            kind: MenuKind::Main,
        }
    }

    /// Opponent selection over `(identity, label)` candidates. Labels
    /// normally carry the candidate's rating, e.g. "Bren (1000)".
    pub fn opponent_select(entries: Vec<(PlayerId, String)>) -> Self {
        let (candidates, buttons): (Vec<_>, Vec<_>) = entries.into_iter().unzip();
        Self {
            title: "Select Opponent".to_string(),
            content: candidates.is_empty().then(|| "No players online".to_string()),
            buttons,
            kind: MenuKind::OpponentSelect { candidates },
        }
    }

    /// Pending challenge review over `(identity, name)` challengers.
    pub fn pending_requests(entries: Vec<(PlayerId, String)>) -> Self {
        let (challengers, buttons): (Vec<_>, Vec<_>) = entries.into_iter().unzip();
        Self {
            title: "Pending Requests".to_string(),
            content: challengers
                .is_empty()
                .then(|| "No pending requests".to_string()),
            buttons,
            kind: MenuKind::PendingRequests { challengers },
        }
    }

    /// Leaderboard type selection.
    pub fn leaderboards() -> Self {
        Self {
            title: "Leaderboards".to_string(),
            content: None,
            buttons: vec!["ELO Rating".to_string(), "Win Count".to_string()],
            kind: MenuKind::Leaderboards,
        }
    }

    /// A rendered leaderboard.
    pub fn leaderboard(title: &str, entries: Vec<(String, i32)>) -> Self {
        Self {
            title: title.to_string(),
            content: Some(format_leaderboard(entries)),
            buttons: Vec::new(),
            kind: MenuKind::LeaderboardDisplay,
        }
    }
}

/// Render counter entries as leaderboard text: highest first, top ten.
fn format_leaderboard(mut entries: Vec<(String, i32)>) -> String {
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(LEADERBOARD_LIMIT);

    if entries.is_empty() {
        return "No scores".to_string();
    }

    entries
        .iter()
        .map(|(name, score)| format!("{name}: {score}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_select_pairs_buttons_with_candidates() {
        let a = PlayerId::new([1; 16]);
        let b = PlayerId::new([2; 16]);
        let menu = Menu::opponent_select(vec![
            (a, "Mira (1000)".to_string()),
            (b, "Bren (1016)".to_string()),
        ]);

        assert_eq!(menu.buttons, ["Mira (1000)", "Bren (1016)"]);
        let MenuKind::OpponentSelect { candidates } = menu.kind else {
            panic!("wrong kind");
        };
        assert_eq!(candidates, [a, b]);
        assert!(menu.content.is_none());
    }

    #[test]
    fn test_empty_opponent_select_has_placeholder_content() {
        let menu = Menu::opponent_select(Vec::new());
        assert_eq!(menu.content.as_deref(), Some("No players online"));
        assert!(menu.buttons.is_empty());
    }

    #[test]
    fn test_leaderboard_sorted_and_truncated() {
        let entries: Vec<(String, i32)> =
            (0..12).map(|i| (format!("p{i}"), i * 10)).collect();
        let menu = Menu::leaderboard("Win Leaderboard", entries);

        let content = menu.content.unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "p11: 110");
        assert_eq!(lines[9], "p2: 20");
    }

    #[test]
    fn test_empty_leaderboard() {
        let menu = Menu::leaderboard("ELO Leaderboard", Vec::new());
        assert_eq!(menu.content.as_deref(), Some("No scores"));
    }
}
