//! Dice values and dice sources.
//!
//! The core never rolls dice itself. A [`Dice`] value is validated once at
//! the boundary and then handed to the move generator and the engine.

use std::fmt;

use thiserror::Error;

use crate::constants::DICE_PAIRS;

/// Invalid dice input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiceError {
    #[error("die value {0} is outside 1..=6")]
    OutOfRange(u8),
}

/// A roll of two dice, each in `1..=6`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Dice {
    first: u8,
    second: u8,
}

impl Dice {
    pub fn new(first: u8, second: u8) -> Result<Self, DiceError> {
        for value in [first, second] {
            if !(1..=6).contains(&value) {
                return Err(DiceError::OutOfRange(value));
            }
        }
        Ok(Dice { first, second })
    }

    pub fn first(self) -> u8 {
        self.first
    }

    pub fn second(self) -> u8 {
        self.second
    }

    pub fn is_double(self) -> bool {
        self.first == self.second
    }

    /// The die sequences a turn is searched over.
    ///
    /// A double is one sequence of four uses of the same value; otherwise
    /// both orders are returned, rolled order first.
    pub fn orderings(self) -> Vec<Vec<u8>> {
        if self.is_double() {
            vec![vec![self.first; 4]]
        } else {
            vec![
                vec![self.first, self.second],
                vec![self.second, self.first],
            ]
        }
    }

    /// All 21 unordered pairs `{a, b}` with `a <= b`, each exactly once.
    ///
    /// Doubles are not weighted against the non-doubles.
    pub fn all_pairs() -> [Dice; DICE_PAIRS] {
        let mut pairs = [Dice { first: 1, second: 1 }; DICE_PAIRS];
        let mut k = 0;
        for a in 1..=6 {
            for b in a..=6 {
                pairs[k] = Dice { first: a, second: b };
                k += 1;
            }
        }
        pairs
    }
}

impl TryFrom<[u8; 2]> for Dice {
    type Error = DiceError;

    fn try_from(values: [u8; 2]) -> Result<Self, Self::Error> {
        Dice::new(values[0], values[1])
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.second)
    }
}

/// Anything that can produce a roll.
pub trait DiceSource {
    fn roll(&mut self) -> Dice;
}

/// Uniform dice from a seedable generator.
pub struct RandomDice {
    rng: fastrand::Rng,
}

impl Default for RandomDice {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomDice {
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl DiceSource for RandomDice {
    fn roll(&mut self) -> Dice {
        Dice {
            first: self.rng.u8(1..=6),
            second: self.rng.u8(1..=6),
        }
    }
}

/// Replays a fixed list of rolls, wrapping around at the end.
pub struct ScriptedDice {
    rolls: Vec<Dice>,
    next: usize,
}

impl ScriptedDice {
    /// Panics if `rolls` is empty.
    pub fn new(rolls: Vec<Dice>) -> Self {
        assert!(!rolls.is_empty(), "scripted dice need at least one roll");
        Self { rolls, next: 0 }
    }
}

impl DiceSource for ScriptedDice {
    fn roll(&mut self) -> Dice {
        let dice = self.rolls[self.next];
        self.next = (self.next + 1) % self.rolls.len();
        dice
    }
}
