//! Static position evaluation.
//!
//! A hand-tuned linear score: pip difference and bar checkers dominate,
//! blots and primes are secondary, borne-off checkers act as a small bonus.

use crate::constants::{
    BAR_WEIGHT, BLOT_WEIGHT, CHECKERS, CLEAR_ADVANTAGE, OFF_WEIGHT, PRIME_WEIGHT, WIN_SCORE,
};
use crate::player::Player;
use crate::position::Position;

/// Score `pos` from `viewpoint`'s side; higher is better for `viewpoint`.
pub fn evaluate(pos: &Position, viewpoint: Player) -> i32 {
    let opp = viewpoint.opponent();
    if pos.off(viewpoint) >= CHECKERS {
        return WIN_SCORE;
    }
    if pos.off(opp) >= CHECKERS {
        return -WIN_SCORE;
    }

    let pips = pos.pip_count(opp) as i32 - pos.pip_count(viewpoint) as i32;
    let bar = BAR_WEIGHT * (pos.bar(opp) as i32 - pos.bar(viewpoint) as i32);
    let blots = BLOT_WEIGHT * (pos.blots(opp) as i32 - pos.blots(viewpoint) as i32);
    let primes =
        PRIME_WEIGHT * (pos.prime_length(viewpoint) as i32 - pos.prime_length(opp) as i32);
    let off = OFF_WEIGHT * (pos.off(viewpoint) as i32 - pos.off(opp) as i32);
    pips + bar + blots + primes + off
}

/// One-line verdict on who is ahead, judged from White's score.
pub fn verdict(pos: &Position) -> &'static str {
    match evaluate(pos, Player::White) {
        s if s > CLEAR_ADVANTAGE => "Clear advantage: White",
        s if s > 0 => "Slightly better: White",
        s if s < -CLEAR_ADVANTAGE => "Clear advantage: Black",
        s if s < 0 => "Slightly better: Black",
        _ => "Balanced game",
    }
}
