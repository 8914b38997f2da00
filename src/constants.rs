//! Constants for board geometry and evaluation weights.
//!
//! Points are indexed 0..24 from White's perspective: index `i` is the
//! classic point number `i + 1` for White. White travels towards index 0,
//! Black towards index 23.

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of points on the board.
pub const POINTS: usize = 24;

/// Checkers per player.
pub const CHECKERS: u8 = 15;

/// Pip distance of a checker waiting on the bar.
pub const BAR_PIPS: u32 = 25;

/// Checkers on one point needed to block it for the opponent.
pub const BLOCK_COUNT: i8 = 2;

/// Number of unordered dice pairs `{a, b}` with `1 <= a <= b <= 6`.
pub const DICE_PAIRS: usize = 21;

// =============================================================================
// Evaluation Weights
// =============================================================================

/// Score returned when the viewpoint player has borne off every checker.
/// Dominates any combination of the linear terms.
pub const WIN_SCORE: i32 = 100_000;

/// Penalty per own checker on the bar.
pub const BAR_WEIGHT: i32 = 25;

/// Penalty per own blot.
pub const BLOT_WEIGHT: i32 = 2;

/// Bonus per point of longest prime.
pub const PRIME_WEIGHT: i32 = 3;

/// Bonus per checker borne off.
pub const OFF_WEIGHT: i32 = 5;

/// Evaluation margin above which one side is shown as clearly ahead.
pub const CLEAR_ADVANTAGE: i32 = 50;

// =============================================================================
// Game Driver
// =============================================================================

/// Turn cap used by self-play unless overridden.
pub const MAX_GAME_TURNS: usize = 2_000;
