use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use roshambo::db::require_db;
use roshambo::domain::{Hand, ScriptedHands};
use roshambo::repos::rounds;
use serde_json::{json, Value};

use crate::common::{assert_problem_details_from_service_response, unique_username};
use crate::support::factory::seed_player;
use crate::support::{build_test_state_with_hands, create_test_app};

#[actix_web::test]
async fn play_walkthrough_over_http() -> Result<(), Box<dyn std::error::Error>> {
    let hands = Arc::new(ScriptedHands::new([Hand::Scissors, Hand::Paper]));
    let state = build_test_state_with_hands(hands).await?;
    let player = seed_player(require_db(&state)?, "http").await?;
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::post()
        .uri("/api/play")
        .set_json(json!({ "username": player.username, "player_choice": "rock" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({
            "player_choice": "rock",
            "computer_choice": "scissors",
            "result": "win",
            "coins_earned": 10,
            "streak_multiplier": 1,
            "new_streak": 1,
            "total_coins": 10,
            "message": "You chose rock, computer chose scissors. Rock crushes Scissors! You won! +10 coins",
        })
    );

    let req = test::TestRequest::post()
        .uri("/api/play")
        .set_json(json!({ "username": player.username, "player_choice": "Rock" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["result"], "lose");
    assert_eq!(body["coins_earned"], 0);
    assert_eq!(body["new_streak"], 0);
    assert_eq!(body["total_coins"], 10);

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}", player.username))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["games_played"], 2);
    assert_eq!(body["games_won"], 1);
    Ok(())
}

#[actix_web::test]
async fn invalid_hand_is_400_and_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state_with_hands(Arc::new(ScriptedHands::always(Hand::Rock))).await?;
    let db = require_db(&state)?.clone();
    let player = seed_player(&db, "lizard").await?;
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::post()
        .uri("/api/play")
        .set_json(json!({ "username": player.username, "player_choice": "lizard" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_HAND",
        StatusCode::BAD_REQUEST,
        Some("must be 'rock', 'paper', or 'scissors'"),
    )
    .await;

    assert_eq!(rounds::count_for_player(&db, player.id).await?, 0);
    Ok(())
}

#[actix_web::test]
async fn unknown_player_is_404() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state_with_hands(Arc::new(ScriptedHands::always(Hand::Rock))).await?;
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::post()
        .uri("/api/play")
        .set_json(json!({ "username": unique_username("ghost"), "player_choice": "paper" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "PLAYER_NOT_FOUND",
        StatusCode::NOT_FOUND,
        None,
    )
    .await;
    Ok(())
}
