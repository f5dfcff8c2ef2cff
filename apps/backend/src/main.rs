use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use roshambo::config::db::{DbKind, RuntimeEnv};
use roshambo::config::server::ServerConfig;
use roshambo::domain::RandomHands;
use roshambo::infra::state::build_state;
use roshambo::middleware::{cors_middleware, RequestTrace, StructuredLogger, TraceSpan};
use roshambo::routes;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Configuration comes from the process environment only.
    let server = match ServerConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "invalid server configuration");
            std::process::exit(1);
        }
    };
    let db_kind = match DbKind::from_env("ROSHAMBO_DB", DbKind::Postgres) {
        Ok(kind) => kind,
        Err(e) => {
            error!(error = %e, "invalid ROSHAMBO_DB");
            std::process::exit(1);
        }
    };

    let app_state = match build_state()
        .with_env(RuntimeEnv::Prod)
        .with_db(db_kind)
        .with_hands(Arc::new(RandomHands::new(server.rng_seed)))
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(
        host = %server.host,
        port = server.port,
        db = db_kind.engine(),
        seeded = server.rng_seed.is_some(),
        "starting roshambo backend"
    );

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind(server.bind_addr())?
    .run()
    .await
}
