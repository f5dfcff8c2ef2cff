//! SeaORM adapter for the players table.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::players;
use crate::infra::db_errors::{OPTIMISTIC_LOCK_PREFIX, PLAYER_NOT_FOUND_PREFIX};

pub mod dto;

pub use dto::{PlayerCreate, PlayerProgressUpdate};

pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PlayerCreate,
) -> Result<players::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let player = players::ActiveModel {
        id: NotSet,
        username: Set(dto.username),
        total_coins: Set(0),
        current_streak: Set(0),
        games_played: Set(0),
        games_won: Set(0),
        lock_version: Set(1),
        created_at: Set(now),
        updated_at: Set(now),
    };
    player.insert(conn).await
}

pub async fn find_by_username<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<Option<players::Model>, sea_orm::DbErr> {
    players::Entity::find()
        .filter(players::Column::Username.eq(username))
        .one(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<players::Model>, sea_orm::DbErr> {
    players::Entity::find_by_id(id).one(conn).await
}

/// Find by username or fail with the structured `PLAYER_NOT_FOUND:` error.
pub async fn require_by_username<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<players::Model, sea_orm::DbErr> {
    find_by_username(conn, username)
        .await?
        .ok_or_else(|| sea_orm::DbErr::Custom(format!("{PLAYER_NOT_FOUND_PREFIX}{username}")))
}

/// Write new aggregate values if `lock_version` still matches, bumping it by one.
///
/// Zero affected rows means the player vanished (`PLAYER_NOT_FOUND:`) or someone
/// else committed first (`OPTIMISTIC_LOCK:{expected,actual}`).
pub async fn update_progress<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PlayerProgressUpdate,
) -> Result<players::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let result = players::Entity::update_many()
        .col_expr(players::Column::TotalCoins, Expr::value(dto.total_coins))
        .col_expr(players::Column::CurrentStreak, Expr::value(dto.current_streak))
        .col_expr(players::Column::GamesPlayed, Expr::value(dto.games_played))
        .col_expr(players::Column::GamesWon, Expr::value(dto.games_won))
        .col_expr(players::Column::UpdatedAt, Expr::value(now))
        .col_expr(
            players::Column::LockVersion,
            Expr::col(players::Column::LockVersion).add(1),
        )
        .filter(players::Column::Id.eq(dto.id))
        .filter(players::Column::LockVersion.eq(dto.current_lock_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return match find_by_id(conn, dto.id).await? {
            Some(current) => Err(sea_orm::DbErr::Custom(format!(
                "{OPTIMISTIC_LOCK_PREFIX}{{\"expected\":{},\"actual\":{}}}",
                dto.current_lock_version, current.lock_version
            ))),
            None => Err(sea_orm::DbErr::Custom(format!(
                "{PLAYER_NOT_FOUND_PREFIX}#{}",
                dto.id
            ))),
        };
    }

    find_by_id(conn, dto.id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("Player {} not found", dto.id)))
}

/// Top `limit` players: coins desc, wins desc, id asc.
pub async fn leaderboard<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
) -> Result<Vec<players::Model>, sea_orm::DbErr> {
    players::Entity::find()
        .order_by_desc(players::Column::TotalCoins)
        .order_by_desc(players::Column::GamesWon)
        .order_by_asc(players::Column::Id)
        .limit(limit)
        .all(conn)
        .await
}

pub async fn count_players<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<u64, sea_orm::DbErr> {
    players::Entity::find().count(conn).await
}

/// Number of players ordered strictly ahead of the given position on the leaderboard.
pub async fn count_ahead_of<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    total_coins: i64,
    games_won: i64,
) -> Result<u64, sea_orm::DbErr> {
    let ahead = Condition::any()
        .add(players::Column::TotalCoins.gt(total_coins))
        .add(
            Condition::all()
                .add(players::Column::TotalCoins.eq(total_coins))
                .add(players::Column::GamesWon.gt(games_won)),
        )
        .add(
            Condition::all()
                .add(players::Column::TotalCoins.eq(total_coins))
                .add(players::Column::GamesWon.eq(games_won))
                .add(players::Column::Id.lt(id)),
        );

    players::Entity::find().filter(ahead).count(conn).await
}
