//! Elo Rating Updates
//!
//! Pure rating math: new integer ratings from two current ratings and a
//! win/lose outcome. Storage lives in the host's counter store.

/// Rating assigned to a player with no recorded rating, lazily on first
/// read.
pub const DEFAULT_RATING: i32 = 1000;

/// Fixed K-factor.
const K: f64 = 32.0;

/// Compute updated ratings for a decided duel.
///
/// Uses the standard Elo expectation with K = 32. Results round half away
/// from zero (`f64::round`), which the fixtures below pin down.
pub fn update(winner: i32, loser: i32) -> (i32, i32) {
    let expected_win = 1.0 / (1.0 + 10f64.powf(f64::from(loser - winner) / 400.0));
    let expected_lose = 1.0 - expected_win;

    let new_winner = f64::from(winner) + K * (1.0 - expected_win);
    let new_loser = f64::from(loser) + K * (0.0 - expected_lose);

    (new_winner.round() as i32, new_loser.round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_equal_ratings() {
        assert_eq!(update(1000, 1000), (1016, 984));
    }

    #[test]
    fn test_favorite_wins() {
        assert_eq!(update(1200, 1000), (1208, 992));
    }

    #[test]
    fn test_underdog_wins() {
        // Mirror of the favorite-wins fixture: the underdog gains what the
        // favorite would have gained less, and vice versa.
        let (new_winner, new_loser) = update(1000, 1200);
        assert_eq!((new_winner, new_loser), (1024, 1176));
    }

    #[test]
    fn test_large_gap_changes_little() {
        let (new_winner, new_loser) = update(2400, 1000);
        assert_eq!(new_winner, 2400);
        assert_eq!(new_loser, 1000);
    }

    proptest! {
        #[test]
        fn prop_winner_never_loses_points(w in 0i32..4000, l in 0i32..4000) {
            let (new_w, new_l) = update(w, l);
            prop_assert!(new_w >= w);
            prop_assert!(new_l <= l);
        }

        #[test]
        fn prop_changes_bounded_by_k(w in 0i32..4000, l in 0i32..4000) {
            let (new_w, new_l) = update(w, l);
            prop_assert!(new_w - w <= 32);
            prop_assert!(l - new_l <= 32);
        }

        #[test]
        fn prop_equal_ratings_are_zero_sum(r in 0i32..4000) {
            let (new_w, new_l) = update(r, r);
            prop_assert_eq!(new_w - r, r - new_l);
        }
    }
}
