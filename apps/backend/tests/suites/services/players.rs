use roshambo::db::require_db;
use roshambo::domain::{Aggregate, Hand};
use roshambo::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use roshambo::services::PlayerService;
use roshambo::AppError;

use crate::common::unique_username;
use crate::support::build_test_state;
use crate::support::factory::{play_against, seed_player};

#[tokio::test]
async fn create_then_get() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let name = unique_username("newbie");
    let service = PlayerService::new();

    let created = service.create_player(db, &name).await?;
    assert_eq!(created.username, name);
    assert_eq!(created.aggregate(), Aggregate::default());

    let fetched = service.get_player(db, &name).await?;
    assert_eq!(fetched, created);
    Ok(())
}

#[tokio::test]
async fn get_is_idempotent_without_rounds() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let player = seed_player(db, "idem").await?;
    let service = PlayerService::new();

    let a = service.get_player(db, &player.username).await?;
    let b = service.get_player(db, &player.username).await?;
    assert_eq!(a, b);
    assert_eq!(a.aggregate(), b.aggregate());
    Ok(())
}

#[tokio::test]
async fn duplicate_username_conflicts() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let name = unique_username("twin");
    let service = PlayerService::new();

    service.create_player(db, &name).await?;
    let err = service.create_player(db, &name).await.expect_err("duplicate");
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::UniqueUsername, _)
    ));

    // Surrounding whitespace is trimmed, so this is the same name.
    let err = service
        .create_player(db, &format!("  {name}  "))
        .await
        .expect_err("duplicate after trim");
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::UniqueUsername, _)
    ));
    Ok(())
}

#[tokio::test]
async fn username_length_is_validated() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let service = PlayerService::new();

    for bad in ["", "  ", "ab", "x_is_too_long_for_this_rule"] {
        let err = service.create_player(db, bad).await.expect_err(bad);
        assert!(
            matches!(err, DomainError::Validation(ValidationKind::InvalidUsername, _)),
            "{bad:?} gave {err:?}"
        );
    }
    Ok(())
}

#[tokio::test]
async fn missing_player_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let err = PlayerService::new()
        .get_player(db, &unique_username("nobody"))
        .await
        .expect_err("missing");
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Player, _)));
    Ok(())
}

#[tokio::test]
async fn stats_include_win_rate_and_rank() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let player = seed_player(db, "stats").await?;
    let service = PlayerService::new();

    let fresh = service.player_stats(db, &player.username).await?;
    assert_eq!(fresh.win_rate, 0.0);
    assert!(fresh.rank >= 1);

    play_against(db, &player.username, Hand::Rock, Hand::Scissors).await?;
    play_against(db, &player.username, Hand::Rock, Hand::Paper).await?;
    play_against(db, &player.username, Hand::Rock, Hand::Scissors).await?;
    play_against(db, &player.username, Hand::Rock, Hand::Rock).await?;

    let stats = service.player_stats(db, &player.username).await?;
    assert_eq!(stats.player.games_played, 4);
    assert_eq!(stats.player.games_won, 2);
    assert!((stats.win_rate - 0.5).abs() < f64::EPSILON);
    assert!(stats.rank <= fresh.rank, "earning coins never drops rank");
    Ok(())
}
