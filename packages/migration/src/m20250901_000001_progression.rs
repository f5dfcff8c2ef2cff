use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Expr, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Players {
    Table,
    Id,
    Username,
    TotalCoins,
    CurrentStreak,
    GamesPlayed,
    GamesWon,
    LockVersion,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum RoundRecords {
    Table,
    Id,
    PlayerId,
    PlayerChoice,
    ComputerChoice,
    Outcome,
    CoinsEarned,
    StreakMultiplier,
    PlayedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // players
        manager
            .create_table(
                Table::create()
                    .table(Players::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Players::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Players::Username).string().not_null())
                    .col(
                        ColumnDef::new(Players::TotalCoins)
                            .big_integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Players::TotalCoins).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Players::CurrentStreak)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Players::CurrentStreak).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Players::GamesPlayed)
                            .big_integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Players::GamesPlayed).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Players::GamesWon)
                            .big_integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Players::GamesWon).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Players::LockVersion)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Players::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Players::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // One player per username
        manager
            .create_index(
                Index::create()
                    .name("ux_players_username")
                    .table(Players::Table)
                    .col(Players::Username)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Leaderboard ordering
        manager
            .create_index(
                Index::create()
                    .name("ix_players_total_coins")
                    .table(Players::Table)
                    .col(Players::TotalCoins)
                    .col(Players::GamesWon)
                    .to_owned(),
            )
            .await?;

        // round_records
        manager
            .create_table(
                Table::create()
                    .table(RoundRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RoundRecords::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(RoundRecords::PlayerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoundRecords::PlayerChoice)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoundRecords::ComputerChoice)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(RoundRecords::Outcome).string_len(8).not_null())
                    .col(
                        ColumnDef::new(RoundRecords::CoinsEarned)
                            .big_integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(RoundRecords::CoinsEarned).gte(0)),
                    )
                    .col(
                        ColumnDef::new(RoundRecords::StreakMultiplier)
                            .small_integer()
                            .not_null()
                            .default(1)
                            .check(Expr::col(RoundRecords::StreakMultiplier).between(1, 5)),
                    )
                    .col(
                        ColumnDef::new(RoundRecords::PlayedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_round_records_player_id")
                            .from(RoundRecords::Table, RoundRecords::PlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // History reads: newest rounds for one player
        manager
            .create_index(
                Index::create()
                    .name("ix_round_records_player_played_at")
                    .table(RoundRecords::Table)
                    .col(RoundRecords::PlayerId)
                    .col(RoundRecords::PlayedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order + drop index before table
        manager
            .drop_index(
                Index::drop()
                    .name("ix_round_records_player_played_at")
                    .table(RoundRecords::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(RoundRecords::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ix_players_total_coins")
                    .table(Players::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ux_players_username")
                    .table(Players::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Players::Table).to_owned())
            .await?;

        Ok(())
    }
}
