//! A single play session: the board plus running score and high score.
//!
//! [`Game`] owns all mutable state and is driven one input at a time through
//! [`Game::make_move`] (or the lower-level [`Game::shift`] / [`Game::spawn_tile`]
//! / [`Game::is_terminal`] triple). The high score is passed in at
//! construction and read back with [`Game::into_high_score`] at teardown.
//!
//! ```
//! use game_2048::engine::Move;
//! use game_2048::game::{Difficulty, Game, MoveOutcome};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut game = Game::start(Difficulty::Easy, 0, &mut rng);
//! assert_eq!(game.board().count_empty(), 14);
//!
//! for dir in [Move::Left, Move::Up, Move::Right, Move::Down] {
//!     if game.make_move(dir, &mut rng) == MoveOutcome::GameOver {
//!         break;
//!     }
//! }
//! assert!(game.high_score() >= game.score());
//! ```

use std::fmt;
use std::str::FromStr;

use log::{debug, info, trace};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::{Board, Move, Score, SIZE};

/// Pre-session setting that biases the opening board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Number of extra `4` tiles dropped onto the opening board.
    #[inline]
    pub fn extra_fours(self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(s)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown difficulty {0:?} (expected easy, medium or hard)")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Difficulty {
    type Error = ParseDifficultyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// What a single input did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The board did not change; nothing spawned.
    Ignored,
    /// Tiles moved and a new tile spawned.
    Moved,
    /// Tiles moved, a new tile spawned, and no further move is possible.
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    score: Score,
    high_score: Score,
}

impl Game {
    /// A zeroed board with score 0, carrying the previously persisted high score.
    pub fn new(high_score: Score) -> Self {
        Game { board: Board::EMPTY, score: 0, high_score }
    }

    /// Resume from an existing board, e.g. for tests or replays.
    pub fn from_board(board: Board, score: Score, high_score: Score) -> Self {
        Game { board, score, high_score: high_score.max(score) }
    }

    /// Build a fresh session: difficulty seeding first, then the two standard tiles.
    pub fn start<R: Rng + ?Sized>(difficulty: Difficulty, high_score: Score, rng: &mut R) -> Self {
        let mut game = Game::new(high_score);
        game.seed(difficulty, rng);
        game.spawn_tile(rng);
        game.spawn_tile(rng);
        game
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn score(&self) -> Score {
        self.score
    }

    #[inline]
    pub fn high_score(&self) -> Score {
        self.high_score
    }

    /// Consume the session, returning the high score to persist.
    pub fn into_high_score(self) -> Score {
        self.high_score
    }

    /// Slide and merge in `dir`. Returns whether any tile moved.
    ///
    /// Every merge adds the merged tile's value to the score; the high score
    /// follows the score upward.
    pub fn shift(&mut self, dir: Move) -> bool {
        let shifted = self.board.shift(dir);
        if !shifted.moved_from(self.board) {
            return false;
        }
        if shifted.merges > 0 {
            trace!("{dir}: {} merge(s), +{}", shifted.merges, shifted.gained);
        }
        self.board = shifted.board;
        self.score += shifted.gained;
        if self.score > self.high_score {
            self.high_score = self.score;
        }
        true
    }

    /// Place a 2 (90%) or 4 in a random empty cell. No-op on a full board.
    pub fn spawn_tile<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let before = self.board;
        self.board = before.with_random_tile(rng);
        if self.board == before {
            trace!("spawn skipped: board is full");
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.board.is_terminal()
    }

    /// Drop `difficulty.extra_fours()` tiles of value 4 on uniformly random cells.
    ///
    /// Placement ignores occupancy: a seed may overwrite an existing tile,
    /// including an earlier seed.
    pub fn seed<R: Rng + ?Sized>(&mut self, difficulty: Difficulty, rng: &mut R) {
        for _ in 0..difficulty.extra_fours() {
            let row = rng.gen_range(0..SIZE);
            let col = rng.gen_range(0..SIZE);
            debug!("{difficulty} seed: 4 at ({row}, {col})");
            self.board = self.board.with_tile_at(row, col, 4);
        }
    }

    /// One input event: move, then (only if something moved) spawn and check for game over.
    pub fn make_move<R: Rng + ?Sized>(&mut self, dir: Move, rng: &mut R) -> MoveOutcome {
        if !self.shift(dir) {
            return MoveOutcome::Ignored;
        }
        self.spawn_tile(rng);
        if self.is_terminal() {
            info!("game over: score {}, highest tile {}", self.score, self.board.highest_tile());
            MoveOutcome::GameOver
        } else {
            MoveOutcome::Moved
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)?;
        writeln!(f, "Score: {}  High Score: {}", self.score, self.high_score)
    }
}
