//! Domain layer: pure round rules and the reward economy.

pub mod economy;
pub mod hand_source;
pub mod hands;

#[cfg(test)]
mod test_prelude;

// Re-exports for ergonomics
pub use economy::{
    coins_earned, multiplier_for, next_streak, result_message, settle_round, Aggregate,
    Settlement, BASE_COINS, MAX_MULTIPLIER,
};
pub use hand_source::{HandSource, RandomHands, ScriptedHands};
pub use hands::{resolve, Hand, Outcome};
