use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum HandValue {
    #[sea_orm(string_value = "rock")]
    Rock,
    #[sea_orm(string_value = "paper")]
    Paper,
    #[sea_orm(string_value = "scissors")]
    Scissors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
pub enum OutcomeValue {
    #[sea_orm(string_value = "win")]
    Win,
    #[sea_orm(string_value = "lose")]
    Lose,
    #[sea_orm(string_value = "tie")]
    Tie,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "round_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "player_id")]
    pub player_id: i64,
    #[sea_orm(column_name = "player_choice")]
    pub player_choice: HandValue,
    #[sea_orm(column_name = "computer_choice")]
    pub computer_choice: HandValue,
    pub outcome: OutcomeValue,
    #[sea_orm(column_name = "coins_earned")]
    pub coins_earned: i64,
    #[sea_orm(column_name = "streak_multiplier", column_type = "SmallInteger")]
    pub streak_multiplier: i16,
    #[sea_orm(column_name = "played_at")]
    pub played_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::players::Entity",
        from = "Column::PlayerId",
        to = "super::players::Column::Id",
        on_delete = "Cascade"
    )]
    Player,
}

impl Related<super::players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Player.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
