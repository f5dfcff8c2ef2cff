//! Atomic per-round commit of a player's aggregate and its history record.

use sea_orm::{ConnectionTrait, TransactionTrait};

use crate::adapters::players_sea::{self as players_adapter, PlayerProgressUpdate};
use crate::adapters::rounds_sea::{self as rounds_adapter, RoundRecordCreate};
use crate::domain::Settlement;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::repos::players::Player;
use crate::repos::rounds::RoundRecord;

/// Apply `settlement` to `player` and append the round, as one unit.
///
/// The update is guarded by `player.lock_version`; if another commit landed
/// since the player was read this fails with `Conflict(OptimisticLock)` and
/// writes nothing. Runs in its own transaction (a savepoint when `conn` is
/// already a transaction).
pub async fn commit_round<C>(
    conn: &C,
    player: &Player,
    settlement: &Settlement,
) -> Result<(Player, RoundRecord), DomainError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    let aggregate = settlement.aggregate;
    let current_streak = i32::try_from(aggregate.current_streak).map_err(|_| {
        DomainError::infra(
            InfraErrorKind::Check,
            format!("streak {} out of range", aggregate.current_streak),
        )
    })?;
    let update = PlayerProgressUpdate {
        id: player.id,
        current_lock_version: player.lock_version,
        total_coins: aggregate.total_coins,
        current_streak,
        games_played: aggregate.games_played,
        games_won: aggregate.games_won,
    };

    let txn = conn.begin().await?;
    let written = async {
        let updated = players_adapter::update_progress(&txn, update).await?;
        let round = rounds_adapter::insert_round(
            &txn,
            RoundRecordCreate {
                player_id: player.id,
                player_choice: settlement.player_choice.into(),
                computer_choice: settlement.computer_choice.into(),
                outcome: settlement.outcome.into(),
                coins_earned: settlement.coins_earned,
                streak_multiplier: i16::from(settlement.multiplier),
                played_at: updated.updated_at,
            },
        )
        .await?;
        Ok::<_, sea_orm::DbErr>((updated, round))
    }
    .await;

    match written {
        Ok((updated, round)) => {
            txn.commit().await?;
            Ok((Player::try_from(updated)?, RoundRecord::try_from(round)?))
        }
        Err(e) => {
            if let Err(rb) = txn.rollback().await {
                tracing::warn!(error = %rb, "commit_round rollback failed");
            }
            Err(e.into())
        }
    }
}
