//! Player repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::players_sea::{self as players_adapter, PlayerCreate};
use crate::domain::Aggregate;
use crate::entities::players;
use crate::errors::domain::DomainError;

/// Player domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: i64,
    pub username: String,
    pub total_coins: i64,
    pub current_streak: u32,
    pub games_played: i64,
    pub games_won: i64,
    pub lock_version: i32,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
}

impl Player {
    pub fn aggregate(&self) -> Aggregate {
        Aggregate {
            total_coins: self.total_coins,
            current_streak: self.current_streak,
            games_played: self.games_played,
            games_won: self.games_won,
        }
    }

    /// Wins over games played; 0.0 before the first game.
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.games_won as f64 / self.games_played as f64
        }
    }
}

impl TryFrom<players::Model> for Player {
    type Error = DomainError;

    fn try_from(model: players::Model) -> Result<Self, Self::Error> {
        let current_streak = u32::try_from(model.current_streak).map_err(|_| {
            DomainError::corrupt(format!(
                "player {} has negative streak {}",
                model.id, model.current_streak
            ))
        })?;
        if model.total_coins < 0
            || model.games_played < 0
            || model.games_won < 0
            || model.games_won > model.games_played
        {
            return Err(DomainError::corrupt(format!(
                "player {} has inconsistent counters",
                model.id
            )));
        }
        Ok(Self {
            id: model.id,
            username: model.username,
            total_coins: model.total_coins,
            current_streak,
            games_played: model.games_played,
            games_won: model.games_won,
            lock_version: model.lock_version,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<Player, DomainError> {
    let model = players_adapter::create_player(conn, PlayerCreate::new(username)).await?;
    Player::try_from(model)
}

pub async fn find_by_username<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<Option<Player>, DomainError> {
    players_adapter::find_by_username(conn, username)
        .await?
        .map(Player::try_from)
        .transpose()
}

/// Like `find_by_username` but a missing player is `NotFound(Player)`.
pub async fn require_by_username<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<Player, DomainError> {
    let model = players_adapter::require_by_username(conn, username).await?;
    Player::try_from(model)
}

/// Players ordered for the leaderboard, paired with their 1-based rank.
pub async fn leaderboard<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
) -> Result<Vec<(u64, Player)>, DomainError> {
    let models = players_adapter::leaderboard(conn, limit).await?;
    models
        .into_iter()
        .zip(1u64..)
        .map(|(model, rank)| Player::try_from(model).map(|p| (rank, p)))
        .collect()
}

pub async fn count_players<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<u64, DomainError> {
    Ok(players_adapter::count_players(conn).await?)
}

/// 1-based leaderboard position of `player`.
pub async fn rank_of<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player: &Player,
) -> Result<u64, DomainError> {
    let ahead =
        players_adapter::count_ahead_of(conn, player.id, player.total_coins, player.games_won)
            .await?;
    Ok(ahead + 1)
}
