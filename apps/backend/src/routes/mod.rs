use actix_web::{error, web, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod health;
pub mod leaderboard;
pub mod play;
pub mod players;

fn json_error(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::bad_request(ErrorCode::BadRequest, format!("Invalid JSON body: {err}")).into()
}

fn query_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::bad_request(ErrorCode::BadRequest, format!("Invalid query string: {err}")).into()
}

/// Register every route. Shared by `main.rs` and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error));

    // Health check: /health
    cfg.configure(health::configure_routes);

    // Game API: /api/**
    cfg.service(
        web::scope("/api")
            .configure(players::configure_routes)
            .configure(play::configure_routes)
            .configure(leaderboard::configure_routes),
    );
}
