use std::sync::Arc;

use futures_util::future::join_all;
use roshambo::db::require_db;
use roshambo::domain::{Hand, ScriptedHands};
use roshambo::errors::domain::{ConflictKind, DomainError};
use roshambo::repos::rounds;
use roshambo::services::{GameService, PlayerService};
use roshambo::AppError;

use crate::support::build_test_state_with_hands;
use crate::support::factory::seed_player;

#[tokio::test]
async fn distinct_players_all_succeed() -> Result<(), AppError> {
    let state = build_test_state_with_hands(Arc::new(ScriptedHands::always(Hand::Scissors))).await?;
    let db = require_db(&state)?;
    let service = GameService::new(state.hands());

    let mut roster = Vec::new();
    for _ in 0..6 {
        roster.push(seed_player(db, "para").await?);
    }

    let results = join_all(
        roster
            .iter()
            .map(|p| service.play_round(db, &p.username, "rock")),
    )
    .await;

    for (player, result) in roster.iter().zip(results) {
        let out = result?;
        assert_eq!(out.player.id, player.id);
        assert_eq!(out.total_coins, 10);
        assert_eq!(out.player.games_played, 1);
        assert_eq!(rounds::count_for_player(db, player.id).await?, 1);
    }
    Ok(())
}

#[tokio::test]
async fn same_player_never_loses_an_update() -> Result<(), AppError> {
    let state = build_test_state_with_hands(Arc::new(ScriptedHands::new([
        Hand::Scissors,
        Hand::Rock,
        Hand::Paper,
    ])))
    .await?;
    let db = require_db(&state)?;
    let service = GameService::new(state.hands());
    let player = seed_player(db, "race").await?;

    let results = join_all((0..8).map(|_| service.play_round(db, &player.username, "rock"))).await;

    let mut successes = 0i64;
    let mut coins = 0i64;
    for result in results {
        match result {
            Ok(out) => {
                successes += 1;
                coins += out.coins_earned;
            }
            Err(DomainError::Conflict(ConflictKind::OptimisticLock, _)) => {}
            Err(other) => panic!("unexpected failure: {other:?}"),
        }
    }
    assert!(successes >= 1);

    let after = PlayerService::new().get_player(db, &player.username).await?;
    assert_eq!(after.games_played, successes);
    assert_eq!(after.total_coins, coins);
    assert_eq!(
        rounds::count_for_player(db, player.id).await?,
        successes as u64
    );
    assert_eq!(after.lock_version, player.lock_version + successes as i32);
    Ok(())
}
