//! Round resolution: one call resolves a hand and commits the player's progress.

use std::sync::Arc;

use sea_orm::{ConnectionTrait, TransactionTrait};
use tracing::{debug, info, warn};

use crate::domain::{result_message, settle_round, Hand, HandSource, Outcome};
use crate::errors::domain::DomainError;
use crate::repos::players::{self, Player};
use crate::repos::progression;
use crate::repos::rounds::{self, RoundRecord};
use crate::services::{effective_limit, normalize_username};
use crate::services::{DEFAULT_HISTORY_LIMIT, DEFAULT_LEADERBOARD_LIMIT};

/// Everything the caller learns from one resolved round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub player_choice: Hand,
    pub computer_choice: Hand,
    pub outcome: Outcome,
    pub coins_earned: i64,
    pub streak_multiplier: u8,
    pub new_streak: u32,
    pub total_coins: i64,
    pub message: String,
    pub player: Player,
    pub round: RoundRecord,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub rank: u64,
    pub player: Player,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardPage {
    pub entries: Vec<LeaderboardEntry>,
    pub total_players: u64,
}

/// Plays rounds against the computer, whose hands come from `hands`.
#[derive(Clone)]
pub struct GameService {
    hands: Arc<dyn HandSource>,
}

impl GameService {
    pub fn new(hands: Arc<dyn HandSource>) -> Self {
        Self { hands }
    }

    /// Resolve one round for `raw_username` and commit the result atomically.
    ///
    /// The hand is validated before the store is touched. Store failures,
    /// including a lost race with a concurrent round for the same player,
    /// come back unchanged and leave the stored state as it was.
    pub async fn play_round<C>(
        &self,
        conn: &C,
        raw_username: &str,
        raw_choice: &str,
    ) -> Result<RoundOutcome, DomainError>
    where
        C: ConnectionTrait + TransactionTrait + Send + Sync,
    {
        let player_choice: Hand = raw_choice.parse()?;
        let username = normalize_username(raw_username)?;

        let player = players::require_by_username(conn, &username).await?;
        let computer_choice = self.hands.next_hand();
        let settlement = settle_round(player.aggregate(), player_choice, computer_choice);
        debug!(
            player_id = player.id,
            lock_version = player.lock_version,
            "settled round, committing"
        );

        let (player, round) = progression::commit_round(conn, &player, &settlement)
            .await
            .inspect_err(|e| {
                warn!(player_id = player.id, error = %e, "round commit failed");
            })?;

        info!(
            player_id = player.id,
            player_choice = %settlement.player_choice,
            computer_choice = %settlement.computer_choice,
            outcome = %settlement.outcome,
            coins_earned = settlement.coins_earned,
            multiplier = settlement.multiplier,
            streak = player.current_streak,
            "round resolved"
        );

        Ok(RoundOutcome {
            player_choice: settlement.player_choice,
            computer_choice: settlement.computer_choice,
            outcome: settlement.outcome,
            coins_earned: settlement.coins_earned,
            streak_multiplier: settlement.multiplier,
            new_streak: player.current_streak,
            total_coins: player.total_coins,
            message: result_message(
                settlement.player_choice,
                settlement.computer_choice,
                settlement.outcome,
                settlement.coins_earned,
            ),
            player,
            round,
        })
    }

    /// Newest rounds for a player id; limit defaults to 20.
    pub async fn list_rounds<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        player_id: i64,
        limit: Option<i64>,
    ) -> Result<Vec<RoundRecord>, DomainError> {
        let limit = effective_limit(limit, DEFAULT_HISTORY_LIMIT);
        rounds::list_recent(conn, player_id, limit).await
    }

    /// Resolve the player by name, then list their newest rounds.
    pub async fn list_rounds_by_username<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        raw_username: &str,
        limit: Option<i64>,
    ) -> Result<(Player, Vec<RoundRecord>), DomainError> {
        let username = normalize_username(raw_username)?;
        let player = players::require_by_username(conn, &username).await?;
        let history = self.list_rounds(conn, player.id, limit).await?;
        Ok((player, history))
    }

    /// Top players by coins then wins; limit defaults to 10.
    pub async fn leaderboard<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        limit: Option<i64>,
    ) -> Result<LeaderboardPage, DomainError> {
        let limit = effective_limit(limit, DEFAULT_LEADERBOARD_LIMIT);
        let entries = players::leaderboard(conn, limit)
            .await?
            .into_iter()
            .map(|(rank, player)| LeaderboardEntry { rank, player })
            .collect();
        let total_players = players::count_players(conn).await?;
        Ok(LeaderboardPage {
            entries,
            total_players,
        })
    }
}
