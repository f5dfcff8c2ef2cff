//! Services orchestrating repos and domain rules.

pub mod game_rounds;
pub mod players;

pub use game_rounds::{GameService, LeaderboardEntry, LeaderboardPage, RoundOutcome};
pub use players::{normalize_username, PlayerService, PlayerStats};

/// Rounds returned by history reads when no positive limit is given.
pub const DEFAULT_HISTORY_LIMIT: u64 = 20;
/// Players returned by the leaderboard when no positive limit is given.
pub const DEFAULT_LEADERBOARD_LIMIT: u64 = 10;
/// Upper bound on any single page.
pub const MAX_PAGE_LIMIT: u64 = 100;

/// Missing or non-positive limits fall back to `default`; large ones are capped.
pub fn effective_limit(requested: Option<i64>, default: u64) -> u64 {
    match requested {
        Some(n) if n > 0 => (n as u64).min(MAX_PAGE_LIMIT),
        _ => default,
    }
}
