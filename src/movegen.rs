//! Legal move and turn generation.
//!
//! A turn is found by a depth-first search over the die sequence: each die
//! is tried against the position left by the previous ones, so the order of
//! two different dice matters and both orders are searched. Afterwards only
//! the turns that use as many dice as possible survive, and turns that land
//! on the same position are collapsed to the first one found.

use rustc_hash::FxHashSet;

use crate::constants::POINTS;
use crate::dice::Dice;
use crate::moves::{Move, Source, Target, Turn};
use crate::player::Player;
use crate::position::Position;

/// Every legal use of a single `die` by `player`.
///
/// Checkers on the bar must enter before anything else moves. Otherwise
/// origins are scanned furthest-from-home first.
///
/// # Panics
///
/// Panics if `die` is not in `1..=6`.
pub fn legal_moves(pos: &Position, player: Player, die: u8) -> Vec<Move> {
    assert!((1..=6).contains(&die), "die value {die} out of range");
    let opp = player.opponent();
    let mut moves = Vec::new();

    if pos.bar(player) > 0 {
        let dest = player.entry_point(die);
        if !pos.is_blocked_for(dest, player) {
            moves.push(Move {
                from: Source::Bar,
                to: Target::Point(dest),
                die,
                hit: pos.is_blot_of(dest, opp),
            });
        }
        return moves;
    }

    let bear_off = pos.can_bear_off(player);
    for from in player.points_furthest_first() {
        if pos.checkers_at(from, player) == 0 {
            continue;
        }
        let to = from as isize + player.direction() * die as isize;
        if (0..POINTS as isize).contains(&to) {
            let to = to as usize;
            if !pos.is_blocked_for(to, player) {
                moves.push(Move {
                    from: Source::Point(from),
                    to: Target::Point(to),
                    die,
                    hit: pos.is_blot_of(to, opp),
                });
            }
        } else if bear_off {
            let needed = player.distance_to_off(from);
            let die_pips = die as u32;
            let overshoot_ok = die_pips > needed && !has_checker_further(pos, player, from);
            if die_pips == needed || overshoot_ok {
                moves.push(Move {
                    from: Source::Point(from),
                    to: Target::Off,
                    die,
                    hit: false,
                });
            }
        }
    }
    moves
}

/// Whether `player` has a checker in the home quadrant strictly further
/// from off than `from`.
fn has_checker_further(pos: &Position, player: Player, from: usize) -> bool {
    let dist = player.distance_to_off(from);
    player
        .home()
        .filter(|&i| player.distance_to_off(i) > dist)
        .any(|i| pos.checkers_at(i, player) > 0)
}

/// Extend `prefix` with every line of play for the remaining `dice`.
///
/// A branch stops as soon as the next die has no legal use; the unused
/// dice are dropped rather than recorded.
fn extend_turns(
    pos: &Position,
    player: Player,
    dice: &[u8],
    prefix: Turn,
    out: &mut Vec<(Turn, Position)>,
) {
    let Some((&die, rest)) = dice.split_first() else {
        out.push((prefix, *pos));
        return;
    };
    let moves = legal_moves(pos, player, die);
    if moves.is_empty() {
        out.push((prefix, *pos));
        return;
    }
    for mv in moves {
        let next = pos.apply_move(player, &mv);
        extend_turns(&next, player, rest, prefix.extended(mv), out);
    }
}

/// Every maximal legal turn together with the position it produces.
///
/// Turns are in generation order: rolled die order first, then the
/// swapped order, each depth-first. Only one turn is kept per resulting
/// position. An empty result means no die can be used (a forced pass).
pub fn generate_outcomes(pos: &Position, player: Player, dice: Dice) -> Vec<(Turn, Position)> {
    let mut lines = Vec::new();
    for order in dice.orderings() {
        extend_turns(pos, player, &order, Turn::pass(), &mut lines);
    }

    let longest = lines.iter().map(|(turn, _)| turn.len()).max().unwrap_or(0);
    if longest == 0 {
        return Vec::new();
    }

    // The side to move is the same for every line, so the position alone
    // identifies an outcome.
    let mut seen = FxHashSet::default();
    lines
        .into_iter()
        .filter(|(turn, after)| turn.len() == longest && seen.insert(*after))
        .collect()
}

/// Every maximal legal turn for `player` with `dice`, deduplicated by the
/// resulting position.
pub fn generate_turns(pos: &Position, player: Player, dice: Dice) -> Vec<Turn> {
    generate_outcomes(pos, player, dice)
        .into_iter()
        .map(|(turn, _)| turn)
        .collect()
}
