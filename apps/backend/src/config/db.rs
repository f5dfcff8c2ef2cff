//! Database selection and URL construction from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::AppError;

/// Per-connection Postgres settings (UTC, statement and lock timeouts).
const PG_SESSION_OPTIONS: &str =
    "options=-c%20timezone%3DUTC%20-c%20statement_timeout%3D15s%20-c%20lock_timeout%3D5s";

/// Which database engine backs the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    SqliteFile,
    SqliteMemory,
}

impl DbKind {
    pub const fn engine(&self) -> &'static str {
        match self {
            DbKind::Postgres => "postgresql",
            DbKind::SqliteFile | DbKind::SqliteMemory => "sqlite",
        }
    }

    pub const fn is_sqlite(&self) -> bool {
        matches!(self, DbKind::SqliteFile | DbKind::SqliteMemory)
    }

    /// Read `var` as a kind, falling back to `default` when unset.
    pub fn from_env(var: &str, default: DbKind) -> Result<DbKind, AppError> {
        match env::var(var) {
            Ok(raw) if !raw.trim().is_empty() => raw.parse(),
            _ => Ok(default),
        }
    }
}

impl FromStr for DbKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(DbKind::Postgres),
            "sqlite" | "sqlite-file" | "sqlite_file" | "file" => Ok(DbKind::SqliteFile),
            "sqlite-memory" | "sqlite_memory" | "memory" | "mem" => Ok(DbKind::SqliteMemory),
            other => Err(AppError::config(format!(
                "Unknown database kind '{other}' (expected postgres, sqlite-file or sqlite-memory)"
            ))),
        }
    }
}

/// Runtime environment; `Test` enforces test-database naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Prod,
    Test,
}

/// Database owner enum for different access levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbOwner {
    /// Application-level access (limited permissions)
    App,
    /// Owner-level access (full permissions for migrations)
    Owner,
}

/// Builds a database URL for the given kind, environment and owner.
pub fn db_url(kind: DbKind, env: RuntimeEnv, owner: DbOwner) -> Result<String, AppError> {
    match kind {
        DbKind::Postgres => {
            let host = var_or("POSTGRES_HOST", "localhost");
            let port = var_or("POSTGRES_PORT", "5432");
            let db_name = db_name(env)?;
            let (username, password) = credentials(owner)?;
            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}?{PG_SESSION_OPTIONS}"
            ))
        }
        DbKind::SqliteFile => {
            let path = sqlite_file_path(env);
            Ok(format!("sqlite://{}?mode=rwc", path.display()))
        }
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
    }
}

/// Location of the SQLite database file for `env`.
pub fn sqlite_file_path(env: RuntimeEnv) -> PathBuf {
    let dir = var_or("SQLITE_DB_DIR", "data");
    let file = match env {
        RuntimeEnv::Prod => "roshambo.db",
        RuntimeEnv::Test => "roshambo_test.db",
    };
    PathBuf::from(dir).join(file)
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn db_name(env: RuntimeEnv) -> Result<String, AppError> {
    match env {
        RuntimeEnv::Prod => must_var("PROD_DB"),
        RuntimeEnv::Test => {
            let db_name = must_var("TEST_DB")?;
            if !db_name.ends_with("_test") {
                return Err(AppError::config(format!(
                    "Test environment requires database name to end with '_test', but got: '{db_name}'"
                )));
            }
            Ok(db_name)
        }
    }
}

fn credentials(owner: DbOwner) -> Result<(String, String), AppError> {
    match owner {
        DbOwner::App => Ok((must_var("APP_DB_USER")?, must_var("APP_DB_PASSWORD")?)),
        DbOwner::Owner => Ok((
            must_var("ROSHAMBO_OWNER_USER")?,
            must_var("ROSHAMBO_OWNER_PASSWORD")?,
        )),
    }
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
