//! Game driver: alternating turns between two controllers.
//!
//! White always moves first. A side whose roll allows no legal turn passes.
//! The game ends once a player has borne off all 15 checkers.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use log::info;

use crate::constants::MAX_GAME_TURNS;
use crate::dice::{Dice, DiceSource};
use crate::engine::Engine;
use crate::movegen::generate_turns;
use crate::moves::Turn;
use crate::player::Player;
use crate::position::Position;

/// Whoever picks a turn for one side.
pub trait Controller {
    fn name(&self) -> String;

    /// Pick a turn for `player` from `pos` with `dice`. Must return one of
    /// the generated turns, or a pass when none exist.
    fn choose_turn(&mut self, pos: &Position, player: Player, dice: Dice) -> Result<Turn>;
}

/// Plays the engine's maximin choice.
pub struct EngineController;

impl Controller for EngineController {
    fn name(&self) -> String {
        "engine".to_string()
    }

    fn choose_turn(&mut self, pos: &Position, player: Player, dice: Dice) -> Result<Turn> {
        Ok(Engine::new(player).choose_turn(pos, dice))
    }
}

/// Plays a uniformly random legal turn.
pub struct RandomController {
    rng: fastrand::Rng,
}

impl RandomController {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Controller for RandomController {
    fn name(&self) -> String {
        "random".to_string()
    }

    fn choose_turn(&mut self, pos: &Position, player: Player, dice: Dice) -> Result<Turn> {
        let mut turns = generate_turns(pos, player, dice);
        if turns.is_empty() {
            return Ok(Turn::pass());
        }
        let pick = self.rng.usize(..turns.len());
        Ok(turns.swap_remove(pick))
    }
}

/// Lists the generated turns and reads an index from the user.
pub struct HumanController<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanController<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Controller for HumanController<R, W> {
    fn name(&self) -> String {
        "human".to_string()
    }

    fn choose_turn(&mut self, pos: &Position, player: Player, dice: Dice) -> Result<Turn> {
        let mut turns = generate_turns(pos, player, dice);
        if turns.is_empty() {
            writeln!(self.output, "No legal moves with {dice}. You pass.")?;
            return Ok(Turn::pass());
        }
        for (i, turn) in turns.iter().enumerate() {
            writeln!(self.output, "[{i}] {turn}")?;
        }
        loop {
            write!(self.output, "Pick a turn by index: ")?;
            self.output.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line).context("reading turn index")? == 0 {
                bail!("input closed while waiting for a turn");
            }
            match line.trim().parse::<usize>() {
                Ok(i) if i < turns.len() => return Ok(turns.swap_remove(i)),
                _ => writeln!(self.output, "Enter a number from 0 to {}.", turns.len() - 1)?,
            }
        }
    }
}

/// What happened in one turn.
#[derive(Clone, Debug)]
pub struct TurnRecord {
    pub number: usize,
    pub player: Player,
    pub dice: Dice,
    pub turn: Turn,
    pub after: Position,
}

/// A game in progress.
pub struct Game<D> {
    position: Position,
    to_move: Player,
    dice: D,
    turns_played: usize,
}

impl<D: DiceSource> Game<D> {
    pub fn new(dice: D) -> Self {
        Self::from_position(Position::initial(), Player::White, dice)
    }

    pub fn from_position(position: Position, to_move: Player, dice: D) -> Self {
        Self {
            position,
            to_move,
            dice,
            turns_played: 0,
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn turns_played(&self) -> usize {
        self.turns_played
    }

    pub fn is_over(&self) -> bool {
        self.position.is_terminal()
    }

    pub fn winner(&self) -> Option<Player> {
        self.position.winner()
    }

    /// Roll, let `controller` pick a turn for the side to move, apply it.
    pub fn play_turn(&mut self, controller: &mut dyn Controller) -> Result<TurnRecord> {
        if self.is_over() {
            bail!("the game is already over");
        }
        let player = self.to_move;
        let dice = self.dice.roll();
        let turn = controller.choose_turn(&self.position, player, dice)?;
        let after = self
            .position
            .apply_turn(player, &turn)
            .with_context(|| format!("{} returned an unplayable turn: {turn}", controller.name()))?;

        self.turns_played += 1;
        info!("#{} {player} rolls {dice}: {turn}", self.turns_played);
        self.position = after;
        self.to_move = player.opponent();
        Ok(TurnRecord {
            number: self.turns_played,
            player,
            dice,
            turn,
            after,
        })
    }
}

/// Result of a game played to the end or to the turn cap.
#[derive(Clone, Debug)]
pub struct GameOutcome {
    pub winner: Option<Player>,
    pub turns: usize,
    pub final_position: Position,
}

/// Play until someone wins or `max_turns` turns have been played.
pub fn play_out<'a, D: DiceSource>(
    game: &mut Game<D>,
    white: &'a mut dyn Controller,
    black: &'a mut dyn Controller,
    max_turns: usize,
) -> Result<GameOutcome> {
    while !game.is_over() && game.turns_played() < max_turns {
        let controller = match game.to_move() {
            Player::White => &mut *white,
            Player::Black => &mut *black,
        };
        game.play_turn(controller)?;
    }
    if let Some(winner) = game.winner() {
        info!("{winner} wins after {} turns", game.turns_played());
    }
    Ok(GameOutcome {
        winner: game.winner(),
        turns: game.turns_played(),
        final_position: *game.position(),
    })
}

/// Play a fresh game with the default turn cap.
pub fn play_game<'a, D: DiceSource>(
    dice: D,
    white: &'a mut dyn Controller,
    black: &'a mut dyn Controller,
) -> Result<GameOutcome> {
    play_out(&mut Game::new(dice), white, black, MAX_GAME_TURNS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::POINTS;
    use crate::dice::{RandomDice, ScriptedDice};
    use std::io::Cursor;

    #[test]
    fn test_white_moves_first_and_sides_alternate() {
        let mut game = Game::new(RandomDice::with_seed(3));
        let mut white = RandomController::with_seed(1);
        let mut black = RandomController::with_seed(2);
        let first = game.play_turn(&mut white).unwrap();
        assert_eq!(first.player, Player::White);
        assert_eq!(game.to_move(), Player::Black);
        let second = game.play_turn(&mut black).unwrap();
        assert_eq!(second.player, Player::Black);
        assert_eq!(second.number, 2);
    }

    #[test]
    fn test_play_out_mixes_borrowed_and_boxed_controllers() {
        let mut white = EngineController;
        let mut black: Box<dyn Controller> = Box::new(RandomController::with_seed(5));
        let mut game = Game::new(RandomDice::with_seed(9));
        let outcome = play_out(&mut game, &mut white, black.as_mut(), 4).unwrap();
        assert_eq!(outcome.turns, 4);
        assert_eq!(game.to_move(), Player::White);
    }

    #[test]
    fn test_random_game_finishes() {
        let mut white = RandomController::with_seed(11);
        let mut black = RandomController::with_seed(12);
        let outcome = play_game(RandomDice::with_seed(13), &mut white, &mut black).unwrap();
        let winner = outcome.winner.expect("random game should finish within the cap");
        assert_eq!(outcome.final_position.off(winner), 15);
    }

    #[test]
    fn test_engine_finishes_bear_off() {
        let mut points = [0i8; POINTS];
        points[0] = 2;
        points[1] = 1;
        points[23] = -15;
        let pos = Position::from_parts(points, [0, 0], [12, 0]).unwrap();
        let dice = ScriptedDice::new(vec![Dice::new(2, 1).unwrap(), Dice::new(1, 1).unwrap()]);
        let mut game = Game::from_position(pos, Player::White, dice);
        let mut white = EngineController;
        let mut black = EngineController;
        let outcome = play_out(&mut game, &mut white, &mut black, 10).unwrap();
        assert_eq!(outcome.winner, Some(Player::White));
        assert_eq!(outcome.turns, 3);
    }

    #[test]
    fn test_human_picks_by_index_after_bad_input() {
        let input = Cursor::new("x\n99\n0\n");
        let mut output = Vec::new();
        let mut human = HumanController::new(input, &mut output);
        let pos = Position::initial();
        let dice = Dice::new(6, 5).unwrap();
        let turn = human.choose_turn(&pos, Player::White, dice).unwrap();
        assert_eq!(turn, generate_turns(&pos, Player::White, dice)[0]);
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("[0] "));
        assert!(shown.matches("Pick a turn by index").count() == 3);
    }

    #[test]
    fn test_human_closed_input_is_an_error() {
        let mut human = HumanController::new(Cursor::new(""), Vec::new());
        let dice = Dice::new(1, 2).unwrap();
        let result = human.choose_turn(&Position::initial(), Player::White, dice);
        assert!(result.is_err());
    }

    #[test]
    fn test_finished_game_refuses_more_turns() {
        let mut points = [0i8; POINTS];
        points[23] = -15;
        let pos = Position::from_parts(points, [0, 0], [15, 0]).unwrap();
        let mut game = Game::from_position(pos, Player::Black, RandomDice::with_seed(1));
        assert!(game.play_turn(&mut EngineController).is_err());
    }
}
