use std::future::Future;
use std::process;
use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use tracing::{info, warn};

use crate::config::db::{db_url, DbKind, DbOwner, RuntimeEnv};
use crate::error::AppError;

const SQLITE_BUSY_TIMEOUT_MS: u32 = 5_000;
const POSTGRES_MAX_CONNECTIONS: u32 = 10;

/// Retry a connection attempt with fixed interval delays.
/// Returns the error of the last attempt once `max_attempts` are used up.
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(attempt, interval_ms, "connection_retry=success");
                }
                return Ok(result);
            }
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(_) => {
                warn!(attempt, max_attempts, interval_ms, "connection_retry=failed");
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
        }
    }
}

/// Session statements applied right after connecting.
fn session_statements(kind: DbKind) -> Vec<String> {
    match kind {
        DbKind::SqliteFile | DbKind::SqliteMemory => vec![
            "PRAGMA foreign_keys = ON;".to_string(),
            format!("PRAGMA busy_timeout = {SQLITE_BUSY_TIMEOUT_MS};"),
        ],
        // Postgres timeouts travel in the URL so every pooled connection gets them.
        DbKind::Postgres => Vec::new(),
    }
}

fn connect_options(url: &str, kind: DbKind) -> ConnectOptions {
    let mut opt = ConnectOptions::new(url);
    // SQLite gets a single connection: in-memory databases are per-connection
    // and file databases serialize writers anyway.
    let max = if kind.is_sqlite() {
        1
    } else {
        POSTGRES_MAX_CONNECTIONS
    };
    opt.min_connections(1)
        .max_connections(max)
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    opt
}

/// Connect without running migrations.
pub async fn connect_db(
    kind: DbKind,
    env: RuntimeEnv,
    owner: DbOwner,
) -> Result<DatabaseConnection, AppError> {
    let url = db_url(kind, env, owner)?;

    if kind == DbKind::SqliteFile {
        let path = crate::config::db::sqlite_file_path(env);
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| {
                AppError::config(format!(
                    "failed to create SQLite directory '{}': {e}",
                    dir.display()
                ))
            })?;
        }
    }

    let opt = connect_options(&url, kind);
    let conn = if kind == DbKind::Postgres {
        retry_connection(
            || {
                let opt = opt.clone();
                async move { Database::connect(opt).await.map_err(AppError::from) }
            },
            5,
            500,
        )
        .await?
    } else {
        Database::connect(opt).await?
    };

    for stmt in session_statements(kind) {
        conn.execute(Statement::from_string(conn.get_database_backend(), stmt))
            .await?;
    }
    Ok(conn)
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(
    kind: DbKind,
    env: RuntimeEnv,
) -> Result<DatabaseConnection, AppError> {
    info!(
        env = ?env,
        db_kind = ?kind,
        engine = kind.engine(),
        pid = process::id(),
        "bootstrap=start"
    );

    // In-memory SQLite must migrate on the connection it hands back.
    let conn = if kind == DbKind::SqliteMemory {
        let conn = connect_db(kind, env, DbOwner::App).await?;
        run_migrations(&conn, MigrationCommand::Up).await?;
        conn
    } else {
        let admin = connect_db(kind, env, DbOwner::Owner).await?;
        run_migrations(&admin, MigrationCommand::Up).await?;
        if let Err(e) = admin.close().await {
            warn!(error = %e, "failed to close admin connection");
        }
        connect_db(kind, env, DbOwner::App).await?
    };

    info!("bootstrap=ready");
    Ok(conn)
}

/// Run one migration command against `conn`.
pub async fn run_migrations(
    conn: &DatabaseConnection,
    command: MigrationCommand,
) -> Result<(), AppError> {
    migrate(conn, command)
        .await
        .map_err(|e| AppError::config(format!("migration {command:?} failed: {e}")))
}
