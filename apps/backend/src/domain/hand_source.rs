//! Sources for the computer's hand.
//!
//! Services take a [`HandSource`] rather than reaching for a global RNG so
//! tests can script the computer's draws.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::hands::Hand;

/// Produces a fresh computer hand on every call.
pub trait HandSource: Send + Sync {
    fn next_hand(&self) -> Hand;
}

/// Uniform draw over the three hands.
///
/// `Mutex<StdRng>` gives interior mutability behind `&self`; the generator
/// is seeded independently of any game state.
pub struct RandomHands {
    rng: Mutex<StdRng>,
}

impl RandomHands {
    /// `Some(seed)` for reproducible draws, `None` to seed from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl Default for RandomHands {
    fn default() -> Self {
        Self::new(None)
    }
}

impl HandSource for RandomHands {
    fn next_hand(&self) -> Hand {
        // A poisoned lock still holds a usable generator
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Hand::ALL[rng.random_range(0..Hand::ALL.len())]
    }
}

/// Replays a fixed sequence of hands, wrapping around at the end.
///
/// An empty script always yields [`Hand::Rock`].
pub struct ScriptedHands {
    hands: Vec<Hand>,
    cursor: AtomicUsize,
}

impl ScriptedHands {
    pub fn new(hands: impl IntoIterator<Item = Hand>) -> Self {
        Self {
            hands: hands.into_iter().collect(),
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn always(hand: Hand) -> Self {
        Self::new([hand])
    }
}

impl HandSource for ScriptedHands {
    fn next_hand(&self) -> Hand {
        if self.hands.is_empty() {
            return Hand::Rock;
        }
        let i = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.hands[i % self.hands.len()]
    }
}
