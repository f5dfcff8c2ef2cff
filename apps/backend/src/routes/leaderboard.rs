use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::db::require_db;
use crate::error::AppError;
use crate::routes::players::LimitQuery;
use crate::services::{GameService, LeaderboardEntry};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct LeaderboardRow {
    rank: u64,
    username: String,
    total_coins: i64,
    games_played: i64,
    games_won: i64,
    win_rate: f64,
    current_streak: u32,
}

impl From<LeaderboardEntry> for LeaderboardRow {
    fn from(entry: LeaderboardEntry) -> Self {
        let win_rate = entry.player.win_rate();
        let p = entry.player;
        Self {
            rank: entry.rank,
            username: p.username,
            total_coins: p.total_coins,
            games_played: p.games_played,
            games_won: p.games_won,
            win_rate,
            current_streak: p.current_streak,
        }
    }
}

#[derive(Debug, Serialize)]
struct LeaderboardResponse {
    leaderboard: Vec<LeaderboardRow>,
    total_users: u64,
}

/// GET /api/leaderboard?limit=N
async fn leaderboard(
    query: web::Query<LimitQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let page = GameService::new(app_state.hands())
        .leaderboard(db, query.limit)
        .await?;

    Ok(HttpResponse::Ok().json(LeaderboardResponse {
        leaderboard: page.entries.into_iter().map(Into::into).collect(),
        total_users: page.total_players,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/leaderboard", web::get().to(leaderboard));
}
