//! Player registration and read paths.

use sea_orm::ConnectionTrait;
use tracing::info;
use unicode_normalization::UnicodeNormalization;

use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::repos::players::{self, Player};

pub const USERNAME_MIN_CHARS: usize = 3;
pub const USERNAME_MAX_CHARS: usize = 20;

/// Trim and NFKC-normalize, then enforce the 3..=20 character rule.
pub fn normalize_username(raw: &str) -> Result<String, DomainError> {
    let normalized: String = raw.trim().nfkc().collect();
    let len = normalized.chars().count();
    if len < USERNAME_MIN_CHARS {
        return Err(DomainError::validation(
            ValidationKind::InvalidUsername,
            format!("Username must be at least {USERNAME_MIN_CHARS} characters"),
        ));
    }
    if len > USERNAME_MAX_CHARS {
        return Err(DomainError::validation(
            ValidationKind::InvalidUsername,
            format!("Username must be at most {USERNAME_MAX_CHARS} characters"),
        ));
    }
    Ok(normalized)
}

/// Player plus the derived figures shown on the stats page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStats {
    pub player: Player,
    pub win_rate: f64,
    pub rank: u64,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PlayerService;

impl PlayerService {
    pub fn new() -> Self {
        Self
    }

    /// Register a zeroed player. A taken name is `Conflict(UniqueUsername)`,
    /// whether caught by the pre-check or by the unique index.
    pub async fn create_player<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        raw_username: &str,
    ) -> Result<Player, DomainError> {
        let username = normalize_username(raw_username)?;

        if players::find_by_username(conn, &username).await?.is_some() {
            return Err(DomainError::conflict(
                ConflictKind::UniqueUsername,
                "Username already exists",
            ));
        }

        let player = players::create_player(conn, &username).await?;
        info!(player_id = player.id, username = %player.username, "player created");
        Ok(player)
    }

    pub async fn get_player<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        raw_username: &str,
    ) -> Result<Player, DomainError> {
        let username = normalize_username(raw_username)?;
        players::require_by_username(conn, &username).await
    }

    pub async fn player_stats<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        raw_username: &str,
    ) -> Result<PlayerStats, DomainError> {
        let player = self.get_player(conn, raw_username).await?;
        let rank = players::rank_of(conn, &player).await?;
        Ok(PlayerStats {
            win_rate: player.win_rate(),
            rank,
            player,
        })
    }
}
