//! Round history repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::rounds_sea as rounds_adapter;
use crate::domain::{Hand, Outcome};
use crate::entities::round_records::{self, HandValue, OutcomeValue};
use crate::errors::domain::DomainError;

/// One resolved round as stored in the history log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundRecord {
    pub id: i64,
    pub player_id: i64,
    pub player_choice: Hand,
    pub computer_choice: Hand,
    pub outcome: Outcome,
    pub coins_earned: i64,
    pub streak_multiplier: u8,
    pub played_at: time::OffsetDateTime,
}

impl From<Hand> for HandValue {
    fn from(hand: Hand) -> Self {
        match hand {
            Hand::Rock => HandValue::Rock,
            Hand::Paper => HandValue::Paper,
            Hand::Scissors => HandValue::Scissors,
        }
    }
}

impl From<HandValue> for Hand {
    fn from(value: HandValue) -> Self {
        match value {
            HandValue::Rock => Hand::Rock,
            HandValue::Paper => Hand::Paper,
            HandValue::Scissors => Hand::Scissors,
        }
    }
}

impl From<Outcome> for OutcomeValue {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Win => OutcomeValue::Win,
            Outcome::Lose => OutcomeValue::Lose,
            Outcome::Tie => OutcomeValue::Tie,
        }
    }
}

impl From<OutcomeValue> for Outcome {
    fn from(value: OutcomeValue) -> Self {
        match value {
            OutcomeValue::Win => Outcome::Win,
            OutcomeValue::Lose => Outcome::Lose,
            OutcomeValue::Tie => Outcome::Tie,
        }
    }
}

impl TryFrom<round_records::Model> for RoundRecord {
    type Error = DomainError;

    fn try_from(model: round_records::Model) -> Result<Self, Self::Error> {
        let streak_multiplier = u8::try_from(model.streak_multiplier)
            .ok()
            .filter(|m| (1..=5).contains(m))
            .ok_or_else(|| {
                DomainError::corrupt(format!(
                    "round {} has multiplier {} outside 1..=5",
                    model.id, model.streak_multiplier
                ))
            })?;
        Ok(Self {
            id: model.id,
            player_id: model.player_id,
            player_choice: model.player_choice.into(),
            computer_choice: model.computer_choice.into(),
            outcome: model.outcome.into(),
            coins_earned: model.coins_earned,
            streak_multiplier,
            played_at: model.played_at,
        })
    }
}

/// Most recent rounds for a player, newest first.
pub async fn list_recent<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    limit: u64,
) -> Result<Vec<RoundRecord>, DomainError> {
    rounds_adapter::find_recent_by_player(conn, player_id, limit)
        .await?
        .into_iter()
        .map(RoundRecord::try_from)
        .collect()
}

pub async fn count_for_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<u64, DomainError> {
    Ok(rounds_adapter::count_by_player(conn, player_id).await?)
}
