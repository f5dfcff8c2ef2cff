//! Streak-based reward economy.
//!
//! Rewards are always priced from the streak a player carries *into* a
//! round. The streak the round produces only affects the next round.

use super::hands::{resolve, Hand, Outcome};

/// Coins for a win before the streak multiplier.
pub const BASE_COINS: i64 = 10;

/// Highest multiplier any streak can reach.
pub const MAX_MULTIPLIER: u8 = 5;

/// Reward multiplier for a pre-round streak: 0→1, 1→2, 2→3, 3→4, 4+→5.
pub fn multiplier_for(streak: u32) -> u8 {
    match streak {
        0 => 1,
        1 => 2,
        2 => 3,
        3 => 4,
        _ => MAX_MULTIPLIER,
    }
}

/// Coins paid for a round. Zero unless the player won.
pub fn coins_earned(outcome: Outcome, streak: u32) -> i64 {
    match outcome {
        Outcome::Win => BASE_COINS * i64::from(multiplier_for(streak)),
        Outcome::Lose | Outcome::Tie => 0,
    }
}

/// Streak after a round: wins extend it, losses reset it, ties leave it alone.
pub fn next_streak(streak: u32, outcome: Outcome) -> u32 {
    match outcome {
        Outcome::Win => streak.saturating_add(1),
        Outcome::Lose => 0,
        Outcome::Tie => streak,
    }
}

/// "X beats Y" clause for an unordered pair of distinct hands.
pub fn beat_clause(a: Hand, b: Hand) -> Option<&'static str> {
    let (winner, loser) = if a.beats(b) {
        (a, b)
    } else if b.beats(a) {
        (b, a)
    } else {
        return None;
    };

    match (winner, loser) {
        (Hand::Rock, Hand::Scissors) => Some("Rock crushes Scissors!"),
        (Hand::Paper, Hand::Rock) => Some("Paper covers Rock!"),
        (Hand::Scissors, Hand::Paper) => Some("Scissors cut Paper!"),
        _ => None,
    }
}

/// Human-readable summary of a round.
pub fn result_message(player: Hand, computer: Hand, outcome: Outcome, coins_earned: i64) -> String {
    let base = format!("You chose {player}, computer chose {computer}.");
    let clause = beat_clause(player, computer).unwrap_or_default();

    match outcome {
        Outcome::Win => format!("{base} {clause} You won! +{coins_earned} coins"),
        Outcome::Lose => format!("{base} {clause} You lost. +{coins_earned} coins"),
        Outcome::Tie => format!("{base} It's a tie! No coins earned, streak preserved."),
    }
}

/// A player's cumulative progression fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Aggregate {
    pub total_coins: i64,
    pub current_streak: u32,
    pub games_played: i64,
    pub games_won: i64,
}

/// Everything one round changes, computed before anything is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub player_choice: Hand,
    pub computer_choice: Hand,
    pub outcome: Outcome,
    pub coins_earned: i64,
    pub multiplier: u8,
    pub aggregate: Aggregate,
}

/// Resolve a round against the aggregate the player carries into it.
pub fn settle_round(before: Aggregate, player: Hand, computer: Hand) -> Settlement {
    let outcome = resolve(player, computer);
    let coins = coins_earned(outcome, before.current_streak);
    let multiplier = multiplier_for(before.current_streak);

    let aggregate = Aggregate {
        total_coins: before.total_coins + coins,
        current_streak: next_streak(before.current_streak, outcome),
        games_played: before.games_played + 1,
        games_won: before.games_won + i64::from(outcome.is_win()),
    };

    Settlement {
        player_choice: player,
        computer_choice: computer,
        outcome,
        coins_earned: coins,
        multiplier,
        aggregate,
    }
}
