//! Two-ply maximin turn selection.
//!
//! For every candidate turn the engine looks at all 21 unordered opponent
//! rolls. For each roll the opponent's reply is scored from the engine's
//! side and the best-scoring reply is taken; a candidate is worth the
//! lowest of those 21 values. The candidate with the highest worth wins,
//! earlier candidates winning ties.

use log::{debug, trace};

use crate::dice::Dice;
use crate::eval::evaluate;
use crate::movegen::generate_outcomes;
use crate::moves::Turn;
use crate::player::Player;
use crate::position::Position;

/// A candidate turn with its worst-case value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoredTurn {
    pub turn: Turn,
    pub after: Position,
    pub value: i32,
}

/// Turn selector playing one fixed side.
#[derive(Copy, Clone, Debug)]
pub struct Engine {
    player: Player,
}

impl Engine {
    pub fn new(player: Player) -> Self {
        Self { player }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    /// Value of the opponent's reply to `pos` with `dice`, scored from the
    /// engine's side. A position where the opponent cannot move is scored
    /// as it stands.
    fn reply_value(&self, pos: &Position, dice: Dice) -> i32 {
        generate_outcomes(pos, self.player.opponent(), dice)
            .iter()
            .map(|(_, after)| evaluate(after, self.player))
            .max()
            .unwrap_or_else(|| evaluate(pos, self.player))
    }

    /// Worst reply value over every opponent roll.
    fn worst_case(&self, pos: &Position) -> i32 {
        Dice::all_pairs()
            .into_iter()
            .map(|dice| self.reply_value(pos, dice))
            .min()
            .unwrap_or_else(|| evaluate(pos, self.player))
    }

    /// Every legal turn for `dice` with its worst-case value, in generation
    /// order.
    pub fn analyze(&self, pos: &Position, dice: Dice) -> Vec<ScoredTurn> {
        generate_outcomes(pos, self.player, dice)
            .into_iter()
            .map(|(turn, after)| {
                let value = self.worst_case(&after);
                trace!("{} candidate {turn} -> {value}", self.player);
                ScoredTurn { turn, after, value }
            })
            .collect()
    }

    /// Pick the turn whose worst case is best. Returns a pass when no die
    /// can be used.
    pub fn choose_turn(&self, pos: &Position, dice: Dice) -> Turn {
        let mut best: Option<ScoredTurn> = None;
        for candidate in self.analyze(pos, dice) {
            if best.as_ref().is_none_or(|b| candidate.value > b.value) {
                best = Some(candidate);
            }
        }
        match best {
            Some(best) => {
                debug!(
                    "{} rolls {dice}: plays {} (value {})",
                    self.player, best.turn, best.value
                );
                best.turn
            }
            None => {
                debug!("{} rolls {dice}: no legal turn", self.player);
                Turn::pass()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::POINTS;
    use crate::movegen::generate_turns;

    fn dice(a: u8, b: u8) -> Dice {
        Dice::new(a, b).unwrap()
    }

    #[test]
    fn test_pass_when_no_legal_turn() {
        let mut points = [0i8; POINTS];
        points[5] = 14;
        points[18] = -2;
        points[19] = -2;
        points[0] = -11;
        let pos = Position::from_parts(points, [1, 0], [0, 0]).unwrap();
        let engine = Engine::new(Player::White);
        assert!(engine.analyze(&pos, dice(6, 5)).is_empty());
        assert!(engine.choose_turn(&pos, dice(6, 5)).is_empty());
    }

    #[test]
    fn test_choice_is_a_generated_turn() {
        let pos = Position::initial();
        let engine = Engine::new(Player::Black);
        let roll = dice(3, 1);
        let chosen = engine.choose_turn(&pos, roll);
        assert!(generate_turns(&pos, Player::Black, roll).contains(&chosen));
    }

    #[test]
    fn test_choice_has_maximal_value_and_first_on_ties() {
        let pos = Position::initial();
        let engine = Engine::new(Player::White);
        let roll = dice(4, 2);
        let scored = engine.analyze(&pos, roll);
        let best = scored.iter().map(|s| s.value).max().unwrap();
        let first_best = scored.iter().find(|s| s.value == best).unwrap();
        assert_eq!(engine.choose_turn(&pos, roll), first_best.turn);
    }

    #[test]
    fn test_takes_the_win() {
        // Bearing off the last two checkers beats any other line
        let mut points = [0i8; POINTS];
        points[0] = 1;
        points[1] = 1;
        points[23] = -15;
        let pos = Position::from_parts(points, [0, 0], [13, 0]).unwrap();
        let engine = Engine::new(Player::White);
        let turn = engine.choose_turn(&pos, dice(2, 1));
        let after = pos.apply_turn(Player::White, &turn).unwrap();
        assert_eq!(after.winner(), Some(Player::White));
    }
}
