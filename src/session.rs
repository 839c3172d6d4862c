//! Line-oriented text front end: read one direction per line, print the board.

use std::io::{self, BufRead, Write};

use log::debug;
use rand::Rng;

use crate::engine::Move;
use crate::game::{Game, MoveOutcome};

const HELP: &str = "Move with w/a/s/d, h/j/k/l or up/down/left/right; q quits.";

/// Why [`play`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Quit,
    Eof,
    GameOver,
}

/// Drive `game` from `input` until quit, end of input, or game over.
///
/// Lines are decoded lossily, so bytes that are not UTF-8 are just another
/// unrecognized input. The game is borrowed, not consumed: on an I/O error
/// the caller still holds the score and high score reached so far.
pub fn play<R, I, W>(
    game: &mut Game,
    rng: &mut R,
    mut input: I,
    out: &mut W,
    quiet: bool,
) -> io::Result<SessionEnd>
where
    R: Rng + ?Sized,
    I: BufRead,
    W: Write,
{
    if !quiet {
        write!(out, "{game}")?;
        writeln!(out, "{HELP}")?;
    }

    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(SessionEnd::Eof);
        }
        let line = String::from_utf8_lossy(&buf);
        let text = line.trim();
        if text.eq_ignore_ascii_case("q") || text.eq_ignore_ascii_case("quit") {
            return Ok(SessionEnd::Quit);
        }
        let Ok(dir) = text.parse::<Move>() else {
            debug!("ignoring input {text:?}");
            continue;
        };
        match game.make_move(dir, rng) {
            MoveOutcome::Ignored => {}
            MoveOutcome::Moved => {
                if !quiet {
                    write!(out, "{game}")?;
                }
            }
            MoveOutcome::GameOver => {
                if !quiet {
                    write!(out, "{game}")?;
                }
                writeln!(out, "Game Over! Your Score: {}", game.score())?;
                return Ok(SessionEnd::GameOver);
            }
        }
    }
}
