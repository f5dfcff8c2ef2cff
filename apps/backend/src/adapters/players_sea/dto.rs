//! DTOs for players_sea adapter.

/// DTO for inserting a fresh, zeroed player.
#[derive(Debug, Clone)]
pub struct PlayerCreate {
    pub username: String,
}

impl PlayerCreate {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// New aggregate values for a player, guarded by the lock version read earlier.
#[derive(Debug, Clone)]
pub struct PlayerProgressUpdate {
    pub id: i64,
    pub current_lock_version: i32,
    pub total_coins: i64,
    pub current_streak: i32,
    pub games_played: i64,
    pub games_won: i64,
}
