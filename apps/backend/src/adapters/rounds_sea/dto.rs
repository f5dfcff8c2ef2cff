//! DTOs for rounds_sea adapter.

use crate::entities::round_records::{HandValue, OutcomeValue};

/// DTO for appending one resolved round to the history log.
#[derive(Debug, Clone)]
pub struct RoundRecordCreate {
    pub player_id: i64,
    pub player_choice: HandValue,
    pub computer_choice: HandValue,
    pub outcome: OutcomeValue,
    pub coins_earned: i64,
    pub streak_multiplier: i16,
    pub played_at: time::OffsetDateTime,
}
