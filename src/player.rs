//! The two sides of a backgammon game.
//!
//! Each side is described by a row of constant data (sign, direction, home
//! range) looked up by index, so no per-variant dispatch is needed.

use std::fmt;
use std::ops::RangeInclusive;

use crate::constants::POINTS;

/// One of the two players.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    White,
    Black,
}

/// Constant description of one side.
struct Side {
    /// Sign of this side's checkers in `Position::points`.
    sign: i8,
    /// Index step of a forward move.
    dir: isize,
    /// First index of the home quadrant.
    home_start: usize,
    /// Last index of the home quadrant (inclusive).
    home_end: usize,
    label: &'static str,
}

const SIDES: [Side; 2] = [
    Side {
        sign: 1,
        dir: -1,
        home_start: 0,
        home_end: 5,
        label: "White",
    },
    Side {
        sign: -1,
        dir: 1,
        home_start: 18,
        home_end: 23,
        label: "Black",
    },
];

impl Player {
    /// Both players, White first.
    pub const ALL: [Player; 2] = [Player::White, Player::Black];

    /// Index of this player into per-player arrays (`bar`, `off`).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Player::White => 0,
            Player::Black => 1,
        }
    }

    #[inline]
    fn side(self) -> &'static Side {
        &SIDES[self.index()]
    }

    #[inline]
    pub const fn opponent(self) -> Player {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// +1 for White, -1 for Black.
    #[inline]
    pub fn sign(self) -> i8 {
        self.side().sign
    }

    /// Index step of a forward move: -1 for White, +1 for Black.
    #[inline]
    pub fn direction(self) -> isize {
        self.side().dir
    }

    /// Inclusive index range of the home quadrant.
    #[inline]
    pub fn home(self) -> RangeInclusive<usize> {
        let side = self.side();
        side.home_start..=side.home_end
    }

    #[inline]
    pub fn in_home(self, idx: usize) -> bool {
        self.home().contains(&idx)
    }

    /// Point a checker entering from the bar lands on for a die value.
    ///
    /// White enters on 23..=18, Black on 0..=5.
    #[inline]
    pub fn entry_point(self, die: u8) -> usize {
        match self {
            Player::White => POINTS - die as usize,
            Player::Black => die as usize - 1,
        }
    }

    /// Pips a checker on `idx` still has to travel before it is borne off.
    #[inline]
    pub fn distance_to_off(self, idx: usize) -> u32 {
        match self {
            Player::White => idx as u32 + 1,
            Player::Black => (POINTS - idx) as u32,
        }
    }

    /// Board indices ordered furthest-from-home first.
    pub fn points_furthest_first(self) -> impl Iterator<Item = usize> {
        let white = self == Player::White;
        (0..POINTS).map(move |i| if white { POINTS - 1 - i } else { i })
    }

    pub fn label(self) -> &'static str {
        self.side().label
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
