use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use migration::{count_applied_migrations, MigrationCommand};
use roshambo::config::db::{DbKind, DbOwner, RuntimeEnv};
use roshambo::infra::db::{connect_db, run_migrations};
use tracing::{error, info};

#[derive(Clone, Copy, ValueEnum)]
enum Env {
    Prod,
    Test,
}

/// In-memory SQLite is not offered: the database would vanish when the command exits.
#[derive(Clone, Copy, ValueEnum)]
enum Db {
    Postgres,
    SqliteFile,
}

#[derive(Parser)]
#[command(name = "migration")]
#[command(about = "Roshambo database migration tool")]
struct Args {
    /// Migration command: up | down | fresh | reset | refresh | status
    #[arg(value_parser = parse_command)]
    command: MigrationCommand,

    /// Runtime environment
    #[arg(short, long, value_enum, default_value = "test")]
    env: Env,

    /// Database type
    #[arg(short, long, value_enum, default_value = "postgres")]
    db: Db,
}

fn parse_command(raw: &str) -> Result<MigrationCommand, String> {
    raw.parse()
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,roshambo=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let env = match args.env {
        Env::Prod => RuntimeEnv::Prod,
        Env::Test => RuntimeEnv::Test,
    };
    let db_kind = match args.db {
        Db::Postgres => DbKind::Postgres,
        Db::SqliteFile => DbKind::SqliteFile,
    };

    let conn = match connect_db(db_kind, env, DbOwner::Owner).await {
        Ok(conn) => conn,
        Err(e) => {
            error!(error = %e, "could not connect");
            return ExitCode::FAILURE;
        }
    };

    let before = count_applied_migrations(&conn).await.unwrap_or(0);
    if let Err(e) = run_migrations(&conn, args.command).await {
        error!(error = %e, "migration failed");
        return ExitCode::FAILURE;
    }
    let after = count_applied_migrations(&conn).await.unwrap_or(0);

    info!(
        command = ?args.command,
        engine = db_kind.engine(),
        before,
        after,
        "migration finished"
    );
    ExitCode::SUCCESS
}
