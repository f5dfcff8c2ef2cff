//! Player registration, lookup, stats and history routes.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::domain::{Hand, Outcome};
use crate::error::AppError;
use crate::repos::players::Player;
use crate::repos::rounds::RoundRecord;
use crate::services::{GameService, PlayerService, PlayerStats};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePlayerRequest {
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PlayerResponse {
    pub id: i64,
    pub username: String,
    pub total_coins: i64,
    pub current_streak: u32,
    pub games_played: i64,
    pub games_won: i64,
    pub win_rate: f64,
}

impl From<&Player> for PlayerResponse {
    fn from(p: &Player) -> Self {
        Self {
            id: p.id,
            username: p.username.clone(),
            total_coins: p.total_coins,
            current_streak: p.current_streak,
            games_played: p.games_played,
            games_won: p.games_won,
            win_rate: p.win_rate(),
        }
    }
}

#[derive(Debug, Serialize)]
struct StatsResponse {
    #[serde(flatten)]
    player: PlayerResponse,
    rank: u64,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

impl From<PlayerStats> for StatsResponse {
    fn from(stats: PlayerStats) -> Self {
        let mut player = PlayerResponse::from(&stats.player);
        player.win_rate = stats.win_rate;
        Self {
            player,
            rank: stats.rank,
            created_at: stats.player.created_at,
            updated_at: stats.player.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RoundRecordResponse {
    pub id: i64,
    pub player_choice: Hand,
    pub computer_choice: Hand,
    pub result: Outcome,
    pub coins_earned: i64,
    pub streak_multiplier: u8,
    #[serde(with = "time::serde::rfc3339")]
    pub played_at: OffsetDateTime,
}

impl From<RoundRecord> for RoundRecordResponse {
    fn from(r: RoundRecord) -> Self {
        Self {
            id: r.id,
            player_choice: r.player_choice,
            computer_choice: r.computer_choice,
            result: r.outcome,
            coins_earned: r.coins_earned,
            streak_multiplier: r.streak_multiplier,
            played_at: r.played_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct HistoryResponse {
    username: String,
    games: Vec<RoundRecordResponse>,
    total_games: usize,
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

/// POST /api/users
async fn create_player(
    body: web::Json<CreatePlayerRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let username = body.into_inner().username;
    let player = with_txn(&app_state, move |txn| {
        Box::pin(async move { Ok(PlayerService::new().create_player(txn, &username).await?) })
    })
    .await?;

    Ok(HttpResponse::Created().json(PlayerResponse::from(&player)))
}

/// GET /api/users/{username}
async fn get_player(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<PlayerResponse>, AppError> {
    let db = require_db(&app_state)?;
    let player = PlayerService::new().get_player(db, &path).await?;
    Ok(web::Json(PlayerResponse::from(&player)))
}

/// GET /api/stats/{username}
async fn get_stats(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let stats = PlayerService::new().player_stats(db, &path).await?;
    Ok(HttpResponse::Ok().json(StatsResponse::from(stats)))
}

/// GET /api/users/{username}/games?limit=N
async fn get_history(
    path: web::Path<String>,
    query: web::Query<LimitQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let service = GameService::new(app_state.hands());
    let (player, rounds) = service
        .list_rounds_by_username(db, &path, query.limit)
        .await?;

    let games: Vec<RoundRecordResponse> = rounds.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(HistoryResponse {
        username: player.username,
        total_games: games.len(),
        games,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/users", web::post().to(create_player))
        .route("/users/{username}", web::get().to(get_player))
        .route("/users/{username}/games", web::get().to(get_history))
        .route("/stats/{username}", web::get().to(get_stats));
}
