//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; repos convert it into
//! `crate::errors::domain::DomainError` here, and handlers map that to
//! `AppError` via `From`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::trace_ctx;

/// Prefix for the structured "player missing" error raised by adapters.
pub const PLAYER_NOT_FOUND_PREFIX: &str = "PLAYER_NOT_FOUND:";
/// Prefix for the structured lock-version mismatch raised by adapters.
pub const OPTIMISTIC_LOCK_PREFIX: &str = "OPTIMISTIC_LOCK:";

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Extract `table.column` from SQLite "UNIQUE constraint failed: table.column".
fn extract_sqlite_table_column(error_msg: &str) -> Option<&str> {
    let marker = "UNIQUE constraint failed: ";
    let start = error_msg.find(marker)? + marker.len();
    error_msg[start..].split_whitespace().next()
}

fn is_username_conflict(error_msg: &str) -> bool {
    if let Some(table_column) = extract_sqlite_table_column(error_msg) {
        if table_column.trim_end_matches(['"', '\'', ')']) == "players.username" {
            return true;
        }
    }
    error_msg.contains("ux_players_username")
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(
                NotFoundKind::Other("Record".into()),
                "Record not found",
            );
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with(PLAYER_NOT_FOUND_PREFIX) => {
            let who = msg.trim_start_matches(PLAYER_NOT_FOUND_PREFIX);
            warn!(trace_id = %trace_id, player = %who, "Player not found");
            return DomainError::player_not_found(format!("Player '{who}' not found"));
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with(OPTIMISTIC_LOCK_PREFIX) => {
            #[derive(serde::Deserialize)]
            struct LockInfo {
                expected: i32,
                actual: i32,
            }

            let json_str = msg.trim_start_matches(OPTIMISTIC_LOCK_PREFIX);
            if let Ok(info) = serde_json::from_str::<LockInfo>(json_str) {
                warn!(
                    trace_id = %trace_id,
                    expected = info.expected,
                    actual = info.actual,
                    "Optimistic lock conflict detected"
                );
                return DomainError::conflict(
                    ConflictKind::OptimisticLock,
                    format!(
                        "Player was modified concurrently (expected version {}, actual version {}). Please retry.",
                        info.expected, info.actual
                    ),
                );
            }

            warn!(trace_id = %trace_id, "Optimistic lock conflict detected (version info unavailable)");
            return DomainError::conflict(
                ConflictKind::OptimisticLock,
                "Player was modified by another transaction; please retry",
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Unique constraint violation");
        if is_username_conflict(&error_msg) {
            return DomainError::conflict(ConflictKind::UniqueUsername, "Username already exists");
        }
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23503")
        || error_msg.contains("FOREIGN KEY constraint failed")
        || error_msg.contains("violates foreign key constraint")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Foreign key constraint violation");
        return DomainError::infra(
            InfraErrorKind::ForeignKey,
            "Foreign key constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23514")
        || error_msg.contains("CHECK constraint failed")
        || error_msg.contains("violates check constraint")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Check constraint violation");
        return DomainError::infra(InfraErrorKind::Check, "Check constraint violation");
    }

    if error_msg.contains("timeout") || error_msg.contains("database is locked") {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}
