use std::sync::Arc;

use roshambo::config::db::{DbKind, RuntimeEnv};
use roshambo::domain::HandSource;
use roshambo::infra::state::{build_state, StateBuilder};
use roshambo::state::app_state::AppState;
use roshambo::AppError;

/// `ROSHAMBO_TEST_DB` picks the backing store; defaults to a private in-memory SQLite.
pub fn resolve_test_db_kind() -> Result<DbKind, AppError> {
    DbKind::from_env("ROSHAMBO_TEST_DB", DbKind::SqliteMemory)
}

/// True when every state gets its own empty database, so global counts are exact.
pub fn is_isolated_db() -> bool {
    matches!(resolve_test_db_kind(), Ok(DbKind::SqliteMemory))
}

pub fn test_state_builder() -> Result<StateBuilder, AppError> {
    let db_kind = resolve_test_db_kind()?;
    Ok(build_state().with_env(RuntimeEnv::Test).with_db(db_kind))
}

pub async fn build_test_state() -> Result<AppState, AppError> {
    test_state_builder()?.build().await
}

pub async fn build_test_state_with_hands(
    hands: Arc<dyn HandSource>,
) -> Result<AppState, AppError> {
    test_state_builder()?.with_hands(hands).build().await
}
