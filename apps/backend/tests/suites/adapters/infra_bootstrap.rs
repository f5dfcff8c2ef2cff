use roshambo::config::db::{DbKind, RuntimeEnv};
use roshambo::infra::db::bootstrap_db;
use roshambo::AppError;
use sea_orm::{ConnectionTrait, Statement};

#[tokio::test]
async fn in_memory_bootstrap_creates_tables() -> Result<(), AppError> {
    let conn = bootstrap_db(DbKind::SqliteMemory, RuntimeEnv::Test).await?;

    for table in ["players", "round_records"] {
        let row = conn
            .query_one(Statement::from_string(
                conn.get_database_backend(),
                format!("SELECT COUNT(*) AS n FROM {table}"),
            ))
            .await?
            .expect("count row");
        let n: i64 = row.try_get("", "n")?;
        assert_eq!(n, 0, "{table} should start empty");
    }

    let version = migration::get_latest_migration_version(&conn).await?;
    assert!(version.is_some_and(|v| v.contains("progression")));
    Ok(())
}

#[tokio::test]
async fn foreign_keys_are_enforced() -> Result<(), AppError> {
    let conn = bootstrap_db(DbKind::SqliteMemory, RuntimeEnv::Test).await?;
    let err = conn
        .execute(Statement::from_string(
            conn.get_database_backend(),
            "INSERT INTO round_records (player_id, player_choice, computer_choice, outcome, coins_earned, streak_multiplier, played_at) \
             VALUES (424242, 'rock', 'paper', 'lose', 0, 1, '2025-01-01T00:00:00Z')"
                .to_string(),
        ))
        .await
        .expect_err("orphan round must be rejected");

    let app: AppError = err.into();
    assert_eq!(app.code().as_str(), "FK_VIOLATION");
    assert_eq!(app.status().as_u16(), 500);
    Ok(())
}
