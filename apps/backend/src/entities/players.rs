use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "players")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(column_name = "total_coins")]
    pub total_coins: i64,
    #[sea_orm(column_name = "current_streak")]
    pub current_streak: i32,
    #[sea_orm(column_name = "games_played")]
    pub games_played: i64,
    #[sea_orm(column_name = "games_won")]
    pub games_won: i64,
    #[sea_orm(column_name = "lock_version")]
    pub lock_version: i32,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::round_records::Entity")]
    RoundRecords,
}

impl Related<super::round_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoundRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
