//! SeaORM adapter for the round_records table.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::round_records;

pub mod dto;

pub use dto::RoundRecordCreate;

pub async fn insert_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoundRecordCreate,
) -> Result<round_records::Model, sea_orm::DbErr> {
    let round = round_records::ActiveModel {
        id: NotSet,
        player_id: Set(dto.player_id),
        player_choice: Set(dto.player_choice),
        computer_choice: Set(dto.computer_choice),
        outcome: Set(dto.outcome),
        coins_earned: Set(dto.coins_earned),
        streak_multiplier: Set(dto.streak_multiplier),
        played_at: Set(dto.played_at),
    };
    round.insert(conn).await
}

/// Most recent rounds first (played_at desc, id desc).
pub async fn find_recent_by_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    limit: u64,
) -> Result<Vec<round_records::Model>, sea_orm::DbErr> {
    round_records::Entity::find()
        .filter(round_records::Column::PlayerId.eq(player_id))
        .order_by_desc(round_records::Column::PlayedAt)
        .order_by_desc(round_records::Column::Id)
        .limit(limit)
        .all(conn)
        .await
}

pub async fn count_by_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    round_records::Entity::find()
        .filter(round_records::Column::PlayerId.eq(player_id))
        .count(conn)
        .await
}
