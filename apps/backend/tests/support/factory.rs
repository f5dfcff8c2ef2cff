use std::sync::Arc;

use roshambo::domain::{Hand, HandSource, ScriptedHands};
use roshambo::repos::players::Player;
use roshambo::services::{GameService, PlayerService, RoundOutcome};
use roshambo::DomainError;
use sea_orm::{ConnectionTrait, TransactionTrait};

use crate::common::unique_username;

/// Register a fresh player under a unique name derived from `prefix`.
pub async fn seed_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    prefix: &str,
) -> Result<Player, DomainError> {
    PlayerService::new()
        .create_player(conn, &unique_username(prefix))
        .await
}

/// Play `player_hand` against a computer fixed on `computer_hand`.
pub async fn play_against<C>(
    conn: &C,
    username: &str,
    player_hand: Hand,
    computer_hand: Hand,
) -> Result<RoundOutcome, DomainError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    let hands: Arc<dyn HandSource> = Arc::new(ScriptedHands::always(computer_hand));
    GameService::new(hands)
        .play_round(conn, username, player_hand.as_str())
        .await
}

/// Give `username` `wins` straight wins (rock over scissors).
pub async fn win_rounds<C>(conn: &C, username: &str, wins: usize) -> Result<(), DomainError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    for _ in 0..wins {
        play_against(conn, username, Hand::Rock, Hand::Scissors).await?;
    }
    Ok(())
}
