use std::sync::Arc;

use roshambo::db::require_db;
use roshambo::domain::{Hand, Outcome, ScriptedHands};
use roshambo::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use roshambo::repos::rounds;
use roshambo::services::{GameService, PlayerService};
use roshambo::AppError;

use crate::common::unique_username;
use crate::support::build_test_state_with_hands;
use crate::support::factory::{play_against, seed_player, win_rounds};

#[tokio::test]
async fn win_then_loss_walkthrough() -> Result<(), AppError> {
    let hands = Arc::new(ScriptedHands::new([Hand::Scissors, Hand::Paper]));
    let state = build_test_state_with_hands(hands.clone()).await?;
    let db = require_db(&state)?;
    let name = unique_username("gamer123");
    PlayerService::new().create_player(db, &name).await?;
    let service = GameService::new(hands);

    let first = service.play_round(db, &name, "rock").await?;
    assert_eq!(first.computer_choice, Hand::Scissors);
    assert_eq!(first.outcome, Outcome::Win);
    assert_eq!(first.coins_earned, 10);
    assert_eq!(first.streak_multiplier, 1);
    assert_eq!(first.new_streak, 1);
    assert_eq!(first.total_coins, 10);
    assert_eq!(first.player.games_played, 1);
    assert_eq!(first.player.games_won, 1);
    assert_eq!(
        first.message,
        "You chose rock, computer chose scissors. Rock crushes Scissors! You won! +10 coins"
    );

    let second = service.play_round(db, &name, "rock").await?;
    assert_eq!(second.computer_choice, Hand::Paper);
    assert_eq!(second.outcome, Outcome::Lose);
    assert_eq!(second.coins_earned, 0);
    assert_eq!(second.new_streak, 0);
    assert_eq!(second.total_coins, 10);
    assert_eq!(second.player.games_played, 2);
    assert_eq!(second.player.games_won, 1);
    assert_eq!(
        second.message,
        "You chose rock, computer chose paper. Paper covers Rock! You lost. +0 coins"
    );
    Ok(())
}

#[tokio::test]
async fn streak_prices_with_pre_round_value_and_caps() -> Result<(), AppError> {
    let hands = Arc::new(ScriptedHands::always(Hand::Scissors));
    let state = build_test_state_with_hands(hands.clone()).await?;
    let db = require_db(&state)?;
    let player = seed_player(db, "streak").await?;
    let service = GameService::new(hands);

    let mut earned = Vec::new();
    for _ in 0..7 {
        let out = service.play_round(db, &player.username, "rock").await?;
        earned.push((out.coins_earned, out.streak_multiplier));
    }
    assert_eq!(
        earned,
        vec![(10, 1), (20, 2), (30, 3), (40, 4), (50, 5), (50, 5), (50, 5)]
    );

    let after = PlayerService::new().get_player(db, &player.username).await?;
    assert_eq!(after.total_coins, 250);
    assert_eq!(after.current_streak, 7);
    Ok(())
}

#[tokio::test]
async fn tie_preserves_streak() -> Result<(), AppError> {
    let state = build_test_state_with_hands(Arc::new(ScriptedHands::always(Hand::Rock))).await?;
    let db = require_db(&state)?;
    let player = seed_player(db, "tie").await?;
    win_rounds(db, &player.username, 2).await?;

    let tie = play_against(db, &player.username, Hand::Paper, Hand::Paper).await?;
    assert_eq!(tie.outcome, Outcome::Tie);
    assert_eq!(tie.coins_earned, 0);
    assert_eq!(tie.new_streak, 2);
    assert_eq!(tie.player.games_played, 3);
    assert_eq!(tie.player.games_won, 2);
    assert_eq!(
        tie.message,
        "You chose paper, computer chose paper. It's a tie! No coins earned, streak preserved."
    );

    // Streak survived the tie: next win pays at multiplier 3.
    let win = play_against(db, &player.username, Hand::Scissors, Hand::Paper).await?;
    assert_eq!(win.coins_earned, 30);
    Ok(())
}

#[tokio::test]
async fn history_matches_returned_outcome() -> Result<(), AppError> {
    let state = build_test_state_with_hands(Arc::new(ScriptedHands::always(Hand::Rock))).await?;
    let db = require_db(&state)?;
    let player = seed_player(db, "hist").await?;

    let out = play_against(db, &player.username, Hand::Scissors, Hand::Rock).await?;
    let latest = GameService::new(state.hands())
        .list_rounds(db, player.id, Some(1))
        .await?;

    assert_eq!(latest.len(), 1);
    let r = &latest[0];
    assert_eq!(r, &out.round);
    assert_eq!(r.player_choice, Hand::Scissors);
    assert_eq!(r.computer_choice, Hand::Rock);
    assert_eq!(r.outcome, Outcome::Lose);
    assert_eq!(r.coins_earned, 0);
    assert_eq!(r.streak_multiplier, 1);
    Ok(())
}

#[tokio::test]
async fn invalid_hand_rejected_before_store() -> Result<(), AppError> {
    let state = build_test_state_with_hands(Arc::new(ScriptedHands::always(Hand::Rock))).await?;
    let db = require_db(&state)?;
    let player = seed_player(db, "bad").await?;

    let err = GameService::new(state.hands())
        .play_round(db, &player.username, "lizard")
        .await
        .expect_err("invalid hand");
    match err {
        DomainError::Validation(ValidationKind::InvalidHand, detail) => {
            assert_eq!(
                detail,
                "Invalid choice 'lizard', must be 'rock', 'paper', or 'scissors'"
            );
        }
        other => panic!("unexpected {other:?}"),
    }

    // Nothing recorded
    let unchanged = PlayerService::new().get_player(db, &player.username).await?;
    assert_eq!(unchanged, player);
    assert_eq!(rounds::count_for_player(db, player.id).await?, 0);
    Ok(())
}

#[tokio::test]
async fn invalid_hand_wins_over_unknown_player() -> Result<(), AppError> {
    let state = build_test_state_with_hands(Arc::new(ScriptedHands::always(Hand::Rock))).await?;
    let db = require_db(&state)?;

    let err = GameService::new(state.hands())
        .play_round(db, "ghost_player", "spock")
        .await
        .expect_err("invalid");
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidHand, _)
    ));
    Ok(())
}

#[tokio::test]
async fn unknown_player_is_not_found() -> Result<(), AppError> {
    let state = build_test_state_with_hands(Arc::new(ScriptedHands::always(Hand::Rock))).await?;
    let db = require_db(&state)?;

    let err = GameService::new(state.hands())
        .play_round(db, &unique_username("ghost"), "ROCK ")
        .await
        .expect_err("no such player");
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Player, _)));
    Ok(())
}

#[tokio::test]
async fn hand_parsing_is_case_insensitive() -> Result<(), AppError> {
    let state = build_test_state_with_hands(Arc::new(ScriptedHands::always(Hand::Paper))).await?;
    let db = require_db(&state)?;
    let player = seed_player(db, "case").await?;

    let out = GameService::new(state.hands())
        .play_round(db, &player.username, "  SCISSORS ")
        .await?;
    assert_eq!(out.player_choice, Hand::Scissors);
    assert_eq!(out.outcome, Outcome::Win);
    Ok(())
}

#[tokio::test]
async fn history_default_limit_is_twenty() -> Result<(), AppError> {
    let state = build_test_state_with_hands(Arc::new(ScriptedHands::always(Hand::Rock))).await?;
    let db = require_db(&state)?;
    let player = seed_player(db, "many").await?;
    for _ in 0..23 {
        play_against(db, &player.username, Hand::Rock, Hand::Rock).await?;
    }
    let service = GameService::new(state.hands());

    assert_eq!(service.list_rounds(db, player.id, None).await?.len(), 20);
    assert_eq!(service.list_rounds(db, player.id, Some(0)).await?.len(), 20);
    assert_eq!(service.list_rounds(db, player.id, Some(-1)).await?.len(), 20);
    assert_eq!(service.list_rounds(db, player.id, Some(5)).await?.len(), 5);
    assert_eq!(service.list_rounds(db, player.id, Some(50)).await?.len(), 23);

    let (found, history) = service
        .list_rounds_by_username(db, &player.username, Some(3))
        .await?;
    assert_eq!(found.id, player.id);
    assert_eq!(history.len(), 3);
    assert!(history.windows(2).all(|w| w[0].played_at >= w[1].played_at));
    Ok(())
}
