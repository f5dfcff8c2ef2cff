use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::domain::{Hand, Outcome};
use crate::error::AppError;
use crate::services::{GameService, RoundOutcome};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct PlayRequest {
    pub username: String,
    pub player_choice: String,
}

#[derive(Debug, Serialize)]
struct PlayResponse {
    player_choice: Hand,
    computer_choice: Hand,
    result: Outcome,
    coins_earned: i64,
    streak_multiplier: u8,
    new_streak: u32,
    total_coins: i64,
    message: String,
}

impl From<RoundOutcome> for PlayResponse {
    fn from(o: RoundOutcome) -> Self {
        Self {
            player_choice: o.player_choice,
            computer_choice: o.computer_choice,
            result: o.outcome,
            coins_earned: o.coins_earned,
            streak_multiplier: o.streak_multiplier,
            new_streak: o.new_streak,
            total_coins: o.total_coins,
            message: o.message,
        }
    }
}

/// POST /api/play
async fn play(
    body: web::Json<PlayRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let PlayRequest {
        username,
        player_choice,
    } = body.into_inner();
    let service = GameService::new(app_state.hands());

    let outcome = with_txn(&app_state, move |txn| {
        Box::pin(async move { Ok(service.play_round(txn, &username, &player_choice).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(PlayResponse::from(outcome)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/play", web::post().to(play));
}
