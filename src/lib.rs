//! game-2048: the 4x4 sliding-tile game with a persisted high score
//!
//! This crate provides:
//! - A `Board` value type with pure transitions (`shift`, `with_random_tile`, `is_terminal`, ...)
//! - A `Game` session that tracks score and high score across moves (`game` module)
//! - A JSON high-score store (`leaderboard` module)
//! - TOML session configuration (`config` module)
//! - A line-oriented text front end (`session` module)
//!
//! Quick start:
//! ```
//! use game_2048::engine::{Board, Move};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic board initialization with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let b0 = Board::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
//! let s = b0.shift(Move::Left);
//! assert_eq!(s.board.count_empty(), 14 + s.merges as usize);
//! ```
//!
//! Full session:
//! ```
//! use game_2048::engine::Move;
//! use game_2048::game::{Difficulty, Game, MoveOutcome};
//! use game_2048::leaderboard::Leaderboard;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let store = Leaderboard::new(dir.path().join("leaderboard.json"));
//! let mut rng = StdRng::seed_from_u64(123);
//! let mut game = Game::start(Difficulty::Medium, store.load(), &mut rng);
//!
//! let mut moves = 0;
//! while moves < 8 {
//!     match game.make_move(Move::ALL[moves % 4], &mut rng) {
//!         MoveOutcome::GameOver => break,
//!         _ => moves += 1,
//!     }
//! }
//!
//! store.save(game.into_high_score()).unwrap();
//! ```
//!
pub mod config;
pub mod engine;
pub mod game;
pub mod leaderboard;
pub mod session;
