//! Backgammon position representation and move application.
//!
//! A position is a plain value: 24 signed point counts (positive = White,
//! negative = Black, magnitude = checker count), plus per-player bar and
//! borne-off counters. Applying a move never mutates the source position;
//! it returns a fresh copy, which is what lets the move generator branch
//! and backtrack freely.

use std::fmt;

use thiserror::Error;

use crate::constants::{BAR_PIPS, BLOCK_COUNT, CHECKERS, POINTS};
use crate::moves::{Move, Source, Target, Turn};
use crate::player::Player;

/// A raw position that breaks the board invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("{player} has {count} checkers in play, expected 15")]
    Conservation { player: Player, count: u32 },
    #[error("point index {point} holds {value}, more than 15 checkers")]
    Overfull { point: usize, value: i8 },
}

/// A move that cannot be applied to the position it was given.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("{0} has no checker on the bar")]
    EmptyBar(Player),
    #[error("{0} must enter from the bar first")]
    MustEnter(Player),
    #[error("point index {0} is off the board")]
    InvalidPoint(usize),
    #[error("{player} has no checker on point index {point}")]
    NoChecker { player: Player, point: usize },
    #[error("point index {point} is blocked for {player}")]
    Blocked { player: Player, point: usize },
    #[error("{0} cannot bear off yet")]
    BearOffNotAllowed(Player),
}

/// A backgammon position (board state).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    /// Signed checker counts per point: `> 0` White, `< 0` Black.
    pub points: [i8; POINTS],
    /// Checkers waiting to re-enter, indexed by `Player::index`.
    pub bar: [u8; 2],
    /// Checkers borne off, indexed by `Player::index`.
    pub off: [u8; 2],
}

impl Default for Position {
    fn default() -> Self {
        Self::initial()
    }
}

impl Position {
    /// The standard starting layout.
    ///
    /// White holds points 24:2, 13:5, 8:3, 6:5; Black the mirror image.
    pub fn initial() -> Self {
        let mut points = [0i8; POINTS];
        points[23] = 2;
        points[12] = 5;
        points[7] = 3;
        points[5] = 5;

        points[0] = -2;
        points[11] = -5;
        points[16] = -3;
        points[18] = -5;
        Position {
            points,
            bar: [0, 0],
            off: [0, 0],
        }
    }

    /// Build a position from raw parts, checking that no point holds more
    /// than 15 checkers and that each player accounts for exactly 15.
    pub fn from_parts(
        points: [i8; POINTS],
        bar: [u8; 2],
        off: [u8; 2],
    ) -> Result<Self, PositionError> {
        if let Some(point) = points.iter().position(|v| v.unsigned_abs() > CHECKERS) {
            return Err(PositionError::Overfull {
                point,
                value: points[point],
            });
        }
        let pos = Position { points, bar, off };
        for player in Player::ALL {
            let count = pos.checkers_on_board(player)
                + pos.bar(player) as u32
                + pos.off(player) as u32;
            if count != CHECKERS as u32 {
                return Err(PositionError::Conservation { player, count });
            }
        }
        Ok(pos)
    }

    /// Point count seen from `player`'s side: positive for own checkers.
    #[inline]
    fn signed_for(&self, idx: usize, player: Player) -> i32 {
        i32::from(self.points[idx]) * i32::from(player.sign())
    }

    /// Number of `player`'s checkers on point `idx`.
    #[inline]
    pub fn checkers_at(&self, idx: usize, player: Player) -> u32 {
        self.signed_for(idx, player).max(0) as u32
    }

    #[inline]
    pub fn bar(&self, player: Player) -> u8 {
        self.bar[player.index()]
    }

    #[inline]
    pub fn off(&self, player: Player) -> u8 {
        self.off[player.index()]
    }

    pub fn checkers_on_board(&self, player: Player) -> u32 {
        (0..POINTS).map(|i| self.checkers_at(i, player)).sum()
    }

    /// A point is blocked for `player` when the opponent holds two or more
    /// checkers on it.
    #[inline]
    pub fn is_blocked_for(&self, idx: usize, player: Player) -> bool {
        self.signed_for(idx, player.opponent()) >= i32::from(BLOCK_COUNT)
    }

    /// Whether `player` has exactly one checker on `idx`.
    #[inline]
    pub fn is_blot_of(&self, idx: usize, player: Player) -> bool {
        self.signed_for(idx, player) == 1
    }

    /// Whether every checker of `player` still in play is inside the home
    /// quadrant and none wait on the bar.
    pub fn can_bear_off(&self, player: Player) -> bool {
        self.bar(player) == 0
            && (0..POINTS)
                .filter(|&i| !player.in_home(i))
                .all(|i| self.checkers_at(i, player) == 0)
    }

    /// Total distance to bear off; a checker on the bar counts 25.
    pub fn pip_count(&self, player: Player) -> u32 {
        let board: u32 = (0..POINTS)
            .map(|i| self.checkers_at(i, player) * player.distance_to_off(i))
            .sum();
        board + self.bar(player) as u32 * BAR_PIPS
    }

    /// Number of points holding exactly one of `player`'s checkers.
    pub fn blots(&self, player: Player) -> u32 {
        (0..POINTS).filter(|&i| self.is_blot_of(i, player)).count() as u32
    }

    /// Length of the longest run of consecutive points each holding two or
    /// more of `player`'s checkers.
    pub fn prime_length(&self, player: Player) -> u32 {
        let mut run = 0;
        let mut best = 0;
        for i in 0..POINTS {
            if self.checkers_at(i, player) >= BLOCK_COUNT as u32 {
                run += 1;
                best = best.max(run);
            } else {
                run = 0;
            }
        }
        best
    }

    pub fn is_terminal(&self) -> bool {
        self.winner().is_some()
    }

    /// The player who has borne off all 15 checkers, if any.
    pub fn winner(&self) -> Option<Player> {
        Player::ALL.into_iter().find(|&p| self.off(p) >= CHECKERS)
    }

    /// Apply one already-legal move for `player`, returning the new position.
    ///
    /// A lone opposing checker on the destination (judged before the move)
    /// is sent to the bar.
    pub fn apply_move(&self, player: Player, mv: &Move) -> Position {
        let mut next = *self;
        match mv.from {
            Source::Bar => next.bar[player.index()] -= 1,
            Source::Point(i) => next.points[i] -= player.sign(),
        }
        let to = match mv.to {
            Target::Off => {
                next.off[player.index()] += 1;
                return next;
            }
            Target::Point(j) => j,
        };
        let opp = player.opponent();
        if self.is_blot_of(to, opp) {
            next.points[to] = 0;
            next.bar[opp.index()] += 1;
        }
        next.points[to] += player.sign();
        next
    }

    /// Check that `mv` can be applied by `player` here.
    ///
    /// This is a structural check (checker present, destination open,
    /// bear-off eligibility), not a full legality proof of the die use.
    pub fn check_move(&self, player: Player, mv: &Move) -> Result<(), MoveError> {
        match mv.from {
            Source::Bar => {
                if self.bar(player) == 0 {
                    return Err(MoveError::EmptyBar(player));
                }
            }
            Source::Point(i) => {
                if i >= POINTS {
                    return Err(MoveError::InvalidPoint(i));
                }
                if self.bar(player) > 0 {
                    return Err(MoveError::MustEnter(player));
                }
                if self.checkers_at(i, player) == 0 {
                    return Err(MoveError::NoChecker { player, point: i });
                }
            }
        }
        match mv.to {
            Target::Point(j) if j >= POINTS => Err(MoveError::InvalidPoint(j)),
            Target::Point(j) if self.is_blocked_for(j, player) => {
                Err(MoveError::Blocked { player, point: j })
            }
            Target::Point(_) => Ok(()),
            Target::Off if !self.can_bear_off(player) => {
                Err(MoveError::BearOffNotAllowed(player))
            }
            Target::Off => Ok(()),
        }
    }

    /// Apply every move of `turn` in order, rejecting the first move that
    /// does not fit the position it is applied to.
    pub fn apply_turn(&self, player: Player, turn: &Turn) -> Result<Position, MoveError> {
        turn.iter().try_fold(*self, |pos, mv| {
            pos.check_move(player, mv)?;
            Ok(pos.apply_move(player, mv))
        })
    }
}

/// Compact cell: `.` when empty, `nW` / `nB` otherwise.
fn cell(v: i8) -> String {
    match v {
        0 => " .".to_string(),
        v if v > 0 => format!("{v:2}W"),
        v => format!("{:2}B", v.unsigned_abs()),
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "     ")?;
        for p in (13..=24).rev() {
            write!(f, "{p:>4}")?;
        }
        write!(f, "\nTOP :")?;
        for i in (12..POINTS).rev() {
            write!(f, "{:>4}", cell(self.points[i]))?;
        }
        writeln!(f)?;
        writeln!(f, "----+------------------------------------------------")?;
        write!(f, "BOT :")?;
        for i in (0..12).rev() {
            write!(f, "{:>4}", cell(self.points[i]))?;
        }
        write!(f, "\n     ")?;
        for p in (1..=12).rev() {
            write!(f, "{p:>4}")?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "Bar: W={} B={}   |   Off: W={} B={}",
            self.bar(Player::White),
            self.bar(Player::Black),
            self.off(Player::White),
            self.off(Player::Black)
        )?;
        write!(
            f,
            "Pips: W={} B={}",
            self.pip_count(Player::White),
            self.pip_count(Player::Black)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(from: usize, to: usize, die: u8) -> Move {
        Move {
            from: Source::Point(from),
            to: Target::Point(to),
            die,
            hit: false,
        }
    }

    #[test]
    fn test_initial_position() {
        let pos = Position::initial();
        for p in Player::ALL {
            assert_eq!(pos.checkers_on_board(p), 15);
            assert_eq!(pos.pip_count(p), 167);
            assert_eq!(pos.blots(p), 0);
            assert_eq!(pos.prime_length(p), 1);
            assert_eq!(pos.bar(p), 0);
            assert_eq!(pos.off(p), 0);
        }
        assert!(!pos.is_terminal());
        assert_eq!(pos.winner(), None);
    }

    #[test]
    fn test_from_parts_checks_conservation() {
        let mut points = [0i8; POINTS];
        points[0] = 14;
        points[23] = -15;
        let err = Position::from_parts(points, [0, 0], [0, 0]).unwrap_err();
        assert_eq!(
            err,
            PositionError::Conservation {
                player: Player::White,
                count: 14
            }
        );
        assert!(Position::from_parts(points, [1, 0], [0, 0]).is_ok());
    }

    #[test]
    fn test_from_parts_rejects_overfull_point() {
        for value in [i8::MIN, -16, 16, i8::MAX] {
            let mut points = [0i8; POINTS];
            points[0] = value;
            let err = Position::from_parts(points, [0, 0], [15, 15]).unwrap_err();
            assert_eq!(err, PositionError::Overfull { point: 0, value });
        }
    }

    #[test]
    fn test_queries_on_extreme_counts() {
        // Built directly, bypassing from_parts
        let mut pos = Position::initial();
        pos.points[3] = i8::MIN;
        pos.points[4] = i8::MAX;
        assert_eq!(pos.checkers_at(3, Player::Black), 128);
        assert_eq!(pos.checkers_at(3, Player::White), 0);
        assert_eq!(pos.checkers_at(4, Player::White), 127);
        assert!(pos.is_blocked_for(3, Player::White));
        assert!(pos.is_blocked_for(4, Player::Black));
        assert!(!pos.is_blot_of(3, Player::Black));
    }

    #[test]
    fn test_apply_move_hit() {
        let mut points = [0i8; POINTS];
        points[10] = 15;
        points[7] = -1;
        points[23] = -14;
        let pos = Position::from_parts(points, [0, 0], [0, 0]).unwrap();

        let next = pos.apply_move(Player::White, &step(10, 7, 3));
        assert_eq!(next.points[7], 1);
        assert_eq!(next.points[10], 14);
        assert_eq!(next.bar(Player::Black), 1);
        // Source is untouched
        assert_eq!(pos.points[7], -1);
        assert_eq!(pos.bar(Player::Black), 0);
    }

    #[test]
    fn test_apply_move_bear_off() {
        let mut points = [0i8; POINTS];
        points[2] = 15;
        points[23] = -15;
        let pos = Position::from_parts(points, [0, 0], [0, 0]).unwrap();
        let mv = Move {
            from: Source::Point(2),
            to: Target::Off,
            die: 5,
            hit: false,
        };
        let next = pos.apply_move(Player::White, &mv);
        assert_eq!(next.off(Player::White), 1);
        assert_eq!(next.points[2], 14);
    }

    #[test]
    fn test_prime_length_counts_longest_run() {
        let mut points = [0i8; POINTS];
        points[3] = 2;
        points[4] = 3;
        points[5] = 2;
        points[7] = 2;
        points[8] = 2;
        points[10] = 1;
        points[20] = 3;
        points[23] = -15;
        let pos = Position::from_parts(points, [0, 0], [0, 0]).unwrap();
        assert_eq!(pos.prime_length(Player::White), 3);
        assert_eq!(pos.blots(Player::White), 1);
        assert_eq!(pos.prime_length(Player::Black), 1);
    }

    #[test]
    fn test_pip_count_with_bar() {
        let mut points = [0i8; POINTS];
        points[0] = 14;
        points[23] = -15;
        let pos = Position::from_parts(points, [1, 0], [0, 0]).unwrap();
        assert_eq!(pos.pip_count(Player::White), 14 + 25);
        assert_eq!(pos.pip_count(Player::Black), 15);
    }

    #[test]
    fn test_winner() {
        let mut points = [0i8; POINTS];
        points[23] = -15;
        let pos = Position::from_parts(points, [0, 0], [15, 0]).unwrap();
        assert!(pos.is_terminal());
        assert_eq!(pos.winner(), Some(Player::White));
    }

    #[test]
    fn test_apply_turn_rejects_foreign_turn() {
        let pos = Position::initial();
        // White has nothing on P1 (index 0 belongs to Black)
        let turn = Turn::from(vec![step(0, 0, 1)]);
        assert_eq!(
            pos.apply_turn(Player::White, &turn),
            Err(MoveError::NoChecker {
                player: Player::White,
                point: 0
            })
        );
        // P24 -> P19 lands on Black's 5-checker point
        let turn = Turn::from(vec![step(23, 18, 5)]);
        assert_eq!(
            pos.apply_turn(Player::White, &turn),
            Err(MoveError::Blocked {
                player: Player::White,
                point: 18
            })
        );
        let off = Turn::from(vec![Move {
            from: Source::Point(5),
            to: Target::Off,
            die: 6,
            hit: false,
        }]);
        assert_eq!(
            pos.apply_turn(Player::White, &off),
            Err(MoveError::BearOffNotAllowed(Player::White))
        );
    }

    #[test]
    fn test_display_mentions_counts() {
        let text = Position::initial().to_string();
        assert!(text.contains(" 2W"));
        assert!(text.contains(" 5B"));
        assert!(text.contains("Pips: W=167 B=167"));
    }
}
