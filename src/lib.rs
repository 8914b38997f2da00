//! Backgammon-Minimax: a rules-correct backgammon move generator and a
//! two-ply maximin turn selector.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry and evaluation weights
//! - [`player`] - The two sides and their constant data
//! - [`dice`] - Validated rolls and injectable dice sources
//! - [`moves`] - Single die-moves and whole turns
//! - [`position`] - Board state, queries, and move application
//! - [`movegen`] - Legal move and maximal turn generation
//! - [`eval`] - Static position evaluation
//! - [`engine`] - Maximin turn selection over all opponent rolls
//! - [`game`] - Game driver and turn controllers
//!
//! ## Example
//!
//! ```
//! use backgammon_minimax::dice::Dice;
//! use backgammon_minimax::engine::Engine;
//! use backgammon_minimax::movegen::generate_turns;
//! use backgammon_minimax::player::Player;
//! use backgammon_minimax::position::Position;
//!
//! let pos = Position::initial();
//! let dice = Dice::new(6, 5).unwrap();
//!
//! // Every maximal legal turn for White
//! let turns = generate_turns(&pos, Player::White, dice);
//! assert!(!turns.is_empty());
//!
//! // Let the engine pick one and play it
//! let turn = Engine::new(Player::White).choose_turn(&pos, dice);
//! let next = pos.apply_turn(Player::White, &turn).unwrap();
//! println!("{turn}\n{next}");
//! ```

pub mod constants;
pub mod dice;
pub mod engine;
pub mod eval;
pub mod game;
pub mod movegen;
pub mod moves;
pub mod player;
pub mod position;
