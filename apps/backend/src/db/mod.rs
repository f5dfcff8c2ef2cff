pub mod txn;

use sea_orm::DatabaseConnection;

use crate::error::AppError;
use crate::state::app_state::AppState;

/// Borrow the database connection from `AppState`, or fail with `DB_UNAVAILABLE`.
pub fn require_db(state: &AppState) -> Result<&DatabaseConnection, AppError> {
    state
        .db()
        .ok_or_else(|| AppError::db_unavailable("Database is not configured"))
}
