//! SeaORM adapters. Functions here return `sea_orm::DbErr`; repos map it to
//! `DomainError`.

pub mod players_sea;
pub mod rounds_sea;
