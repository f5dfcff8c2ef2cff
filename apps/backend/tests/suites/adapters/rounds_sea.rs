use roshambo::adapters::players_sea::{self, PlayerCreate};
use roshambo::adapters::rounds_sea::{self, RoundRecordCreate};
use roshambo::db::require_db;
use roshambo::entities::round_records::{HandValue, OutcomeValue};
use roshambo::errors::domain::{DomainError, InfraErrorKind};
use roshambo::infra::db_errors::map_db_err;
use roshambo::AppError;
use time::{Duration, OffsetDateTime};

use crate::common::unique_username;
use crate::support::build_test_state;

fn round(player_id: i64, played_at: OffsetDateTime, coins: i64) -> RoundRecordCreate {
    RoundRecordCreate {
        player_id,
        player_choice: HandValue::Rock,
        computer_choice: HandValue::Scissors,
        outcome: OutcomeValue::Win,
        coins_earned: coins,
        streak_multiplier: 1,
        played_at,
    }
}

#[tokio::test]
async fn insert_and_read_back() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let player = players_sea::create_player(db, PlayerCreate::new(unique_username("hist"))).await?;

    let now = OffsetDateTime::now_utc();
    let stored = rounds_sea::insert_round(db, round(player.id, now, 10)).await?;
    assert_eq!(stored.player_choice, HandValue::Rock);
    assert_eq!(stored.outcome, OutcomeValue::Win);
    assert_eq!(stored.coins_earned, 10);

    let recent = rounds_sea::find_recent_by_player(db, player.id, 5).await?;
    assert_eq!(recent, vec![stored]);
    assert_eq!(rounds_sea::count_by_player(db, player.id).await?, 1);
    Ok(())
}

#[tokio::test]
async fn recent_rounds_newest_first_and_limited() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let player = players_sea::create_player(db, PlayerCreate::new(unique_username("order"))).await?;

    let base = OffsetDateTime::now_utc();
    for i in 0..5 {
        rounds_sea::insert_round(db, round(player.id, base + Duration::seconds(i), i * 10)).await?;
    }
    // Same timestamp as the newest: id breaks the tie.
    let twin = rounds_sea::insert_round(db, round(player.id, base + Duration::seconds(4), 99)).await?;

    let recent = rounds_sea::find_recent_by_player(db, player.id, 3).await?;
    let coins: Vec<i64> = recent.iter().map(|r| r.coins_earned).collect();
    assert_eq!(coins, vec![99, 40, 30]);
    assert_eq!(recent[0].id, twin.id);
    Ok(())
}

#[tokio::test]
async fn rounds_are_scoped_to_player() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let a = players_sea::create_player(db, PlayerCreate::new(unique_username("a"))).await?;
    let b = players_sea::create_player(db, PlayerCreate::new(unique_username("b"))).await?;

    let now = OffsetDateTime::now_utc();
    rounds_sea::insert_round(db, round(a.id, now, 10)).await?;
    rounds_sea::insert_round(db, round(a.id, now, 20)).await?;

    assert_eq!(rounds_sea::count_by_player(db, a.id).await?, 2);
    assert!(rounds_sea::find_recent_by_player(db, b.id, 10).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn multiplier_outside_range_violates_check() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let player = players_sea::create_player(db, PlayerCreate::new(unique_username("mult"))).await?;

    let mut bad = round(player.id, OffsetDateTime::now_utc(), 10);
    bad.streak_multiplier = 6;
    let err = rounds_sea::insert_round(db, bad).await.expect_err("check");
    assert!(matches!(
        map_db_err(err),
        DomainError::Infra(InfraErrorKind::Check, _)
    ));
    Ok(())
}
