use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Orientation normalization for this direction as `(transpose, reverse)`.
    ///
    /// Up/Down work on columns, so they transpose; Down/Right compact toward
    /// the far end, so they reverse each line first.
    #[inline]
    fn transforms(self) -> (bool, bool) {
        match self {
            Move::Up => (true, false),
            Move::Down => (true, true),
            Move::Left => (false, false),
            Move::Right => (false, true),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        };
        f.write_str(s)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized direction: {0:?}")]
pub struct ParseMoveError(pub String);

impl FromStr for Move {
    type Err = ParseMoveError;

    /// Accepts direction names in any case plus the `wasd` and `hjkl` keys.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "w" | "k" => Ok(Move::Up),
            "down" | "s" | "j" => Ok(Move::Down),
            "left" | "a" | "h" => Ok(Move::Left),
            "right" | "d" | "l" => Ok(Move::Right),
            _ => Err(ParseMoveError(s.to_string())),
        }
    }
}

pub const SIZE: usize = 4;
pub const CELLS: usize = SIZE * SIZE;

pub type Tile = u32;
pub type Line = [Tile; SIZE];
pub type Score = u64;

/// A 4x4 2048 board holding actual tile values (`0` = empty, else `2^k`, `k >= 1`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board([Line; SIZE]);

/// Result of sliding a board in one direction, without any random insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shifted {
    pub board: Board,
    /// Sum of the values of every tile produced by a merge.
    pub gained: Score,
    pub merges: u32,
}

impl Shifted {
    /// True if the shift changed at least one cell of `before`.
    #[inline]
    pub fn moved_from(&self, before: Board) -> bool {
        self.board != before
    }
}

impl Board {
    /// A constant empty board (all zeros).
    pub const EMPTY: Board = Board([[0; SIZE]; SIZE]);

    /// Build a board from explicit rows.
    ///
    /// Cells are expected to be `0` or `2^k` with `1 <= k <= 31`. A pair of
    /// `2^31` tiles has no representable merge and is left unmerged.
    #[inline]
    pub fn from_rows(rows: [Line; SIZE]) -> Self {
        Board(rows)
    }

    #[inline]
    pub fn rows(&self) -> &[Line; SIZE] {
        &self.0
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Tile {
        self.0[row][col]
    }

    /// Value at a row-major index in `0..16`.
    #[inline]
    pub fn tile_value(&self, idx: usize) -> Tile {
        self.0[idx / SIZE][idx % SIZE]
    }

    /// Return the board resulting from sliding/merging tiles in `dir` (no random insert).
    ///
    /// All four directions reduce to the left-compaction rule: the board is
    /// transposed and/or each row reversed, every row is compacted, and the
    /// transforms are undone in reverse order.
    ///
    /// ```
    /// use game_2048::engine::{Board, Move};
    /// let b = Board::from_rows([[2, 2, 2, 2], [0; 4], [0; 4], [0; 4]]);
    /// let s = b.shift(Move::Left);
    /// assert_eq!(s.board.rows()[0], [4, 4, 0, 0]);
    /// assert_eq!(s.gained, 8);
    /// ```
    pub fn shift(self, dir: Move) -> Shifted {
        let (transposed, reversed) = dir.transforms();
        let mut grid = self;
        if transposed {
            grid = grid.transpose();
        }
        if reversed {
            grid = grid.reverse_rows();
        }

        let mut gained = 0;
        let mut merges = 0;
        for row in grid.0.iter_mut() {
            let (line, line_gain, line_merges) = compact_line(*row);
            *row = line;
            gained += line_gain;
            merges += line_merges;
        }

        if reversed {
            grid = grid.reverse_rows();
        }
        if transposed {
            grid = grid.transpose();
        }
        Shifted { board: grid, gained, merges }
    }

    /// Insert a 2 (90%) or 4 (10%) tile into a uniformly random empty cell.
    ///
    /// A full board is returned unchanged.
    ///
    /// ```
    /// use game_2048::engine::Board;
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let b = Board::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
    /// assert_eq!(b.count_empty(), 14);
    /// ```
    pub fn with_random_tile<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        let empty = self.empty_cells();
        if empty.is_empty() {
            return self;
        }
        let (row, col) = empty[rng.gen_range(0..empty.len())];
        self.with_tile_at(row, col, generate_random_tile(rng))
    }

    /// Overwrite a single cell regardless of what it holds.
    #[inline]
    pub fn with_tile_at(mut self, row: usize, col: usize, value: Tile) -> Self {
        debug_assert!(value == 0 || (value >= 2 && value.is_power_of_two()));
        self.0[row][col] = value;
        self
    }

    /// True when the board is full and no two orthogonal neighbours are equal.
    ///
    /// ```
    /// use game_2048::engine::Board;
    /// assert!(!Board::EMPTY.is_terminal());
    /// ```
    pub fn is_terminal(&self) -> bool {
        for r in 0..SIZE {
            for c in 0..SIZE {
                let v = self.0[r][c];
                if v == 0 {
                    return false;
                }
                if c + 1 < SIZE && v == self.0[r][c + 1] {
                    return false;
                }
                if r + 1 < SIZE && v == self.0[r + 1][c] {
                    return false;
                }
            }
        }
        true
    }

    /// Coordinates of every empty cell in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        (0..CELLS)
            .map(|idx| (idx / SIZE, idx % SIZE))
            .filter(|&(r, c)| self.0[r][c] == 0)
            .collect()
    }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(&self) -> usize {
        self.0.iter().flatten().filter(|&&v| v == 0).count()
    }

    /// Return the highest tile value present on the board (0 if empty).
    #[inline]
    pub fn highest_tile(&self) -> Tile {
        self.0.iter().flatten().copied().max().unwrap_or(0)
    }

    pub(crate) fn transpose(self) -> Self {
        let mut out = [[0; SIZE]; SIZE];
        for (r, row) in self.0.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                out[c][r] = v;
            }
        }
        Board(out)
    }

    pub(crate) fn reverse_rows(mut self) -> Self {
        for row in self.0.iter_mut() {
            row.reverse();
        }
        self
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:?})", self.0)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = "-".repeat(SIZE * 8 - 1);
        for (r, row) in self.0.iter().enumerate() {
            if r > 0 {
                writeln!(f, "{}", sep)?;
            }
            let cells: Vec<String> = row.iter().map(format_val).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

/// Compact one line toward index 0 and merge equal neighbours once each.
///
/// Returns the new line, the points gained, and the number of merges.
/// Merges scan left to right, so `[2, 2, 2, 0]` becomes `[4, 2, 0, 0]`.
/// Equal tiles whose sum would not fit in a `Tile` stay apart.
pub fn compact_line(line: Line) -> (Line, Score, u32) {
    let mut out = [0; SIZE];
    let mut gained = 0;
    let mut merges = 0;
    let mut len = 0;
    let mut tiles = line.iter().copied().filter(|&v| v != 0).peekable();
    while let Some(v) = tiles.next() {
        match v.checked_mul(2) {
            Some(merged) if tiles.peek() == Some(&v) => {
                tiles.next();
                out[len] = merged;
                gained += Score::from(merged);
                merges += 1;
            }
            _ => out[len] = v,
        }
        len += 1;
    }
    (out, gained, merges)
}

fn generate_random_tile<R: Rng + ?Sized>(rng: &mut R) -> Tile {
    if rng.gen_range(0..10) < 9 { 2 } else { 4 }
}

fn format_val(val: &Tile) -> String {
    match val {
        0 => String::from("       "),
        x => format!("{:^7}", x),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn row(line: Line) -> Board {
        Board::from_rows([line, [0; 4], [0; 4], [0; 4]])
    }

    #[test]
    fn it_compact_line() {
        assert_eq!(compact_line([0, 0, 0, 0]), ([0, 0, 0, 0], 0, 0));
        assert_eq!(compact_line([2, 4, 2, 4]), ([2, 4, 2, 4], 0, 0));
        assert_eq!(compact_line([2, 2, 4, 4]), ([4, 8, 0, 0], 12, 2));
        assert_eq!(compact_line([2, 0, 0, 2]), ([4, 0, 0, 0], 4, 1));
        assert_eq!(compact_line([0, 2, 2, 2]), ([4, 2, 0, 0], 4, 1));
        assert_eq!(compact_line([4, 4, 8, 0]), ([8, 8, 0, 0], 8, 1));
    }

    #[test]
    fn largest_tiles_do_not_overflow() {
        let top = 1u32 << 31;
        assert_eq!(compact_line([top, top, 0, 0]), ([top, top, 0, 0], 0, 0));
        assert_eq!(compact_line([0, top, 0, top]), ([top, top, 0, 0], 0, 0));
        let s = row([1 << 30, 1 << 30, top, 0]).shift(Move::Left);
        assert_eq!(s.board.rows()[0], [top, top, 0, 0]);
        assert_eq!(s.gained, u64::from(top));
    }

    #[test]
    fn four_equal_tiles_merge_pairwise() {
        let s = row([2, 2, 2, 2]).shift(Move::Left);
        assert_eq!(s.board.rows()[0], [4, 4, 0, 0]);
        assert_eq!(s.gained, 8);
        assert_eq!(s.merges, 2);
    }

    #[test]
    fn trailing_pair_slides_and_merges() {
        let b = row([0, 0, 2, 2]);
        let s = b.shift(Move::Left);
        assert_eq!(s.board.rows()[0], [4, 0, 0, 0]);
        assert!(s.moved_from(b));
    }

    #[test]
    fn test_shift_right() {
        assert_eq!(row([2, 0, 0, 0]).shift(Move::Right).board.rows()[0], [0, 0, 0, 2]);
        assert_eq!(row([2, 0, 2, 0]).shift(Move::Right).board.rows()[0], [0, 0, 0, 4]);
        assert_eq!(row([2, 8, 8, 4]).shift(Move::Right).board.rows()[0], [0, 2, 16, 4]);
        assert_eq!(row([2, 2, 2, 0]).shift(Move::Right).board.rows()[0], [0, 0, 2, 4]);
        assert_eq!(row([2, 4, 8, 16]).shift(Move::Right).board.rows()[0], [2, 4, 8, 16]);
    }

    #[test]
    fn test_move_left() {
        let game = Board::from_rows([[2, 4, 8, 16], [2, 8, 8, 4], [4, 0, 0, 4], [2, 0, 0, 4]]);
        let s = game.shift(Move::Left);
        assert_eq!(
            s.board,
            Board::from_rows([[2, 4, 8, 16], [2, 16, 4, 0], [8, 0, 0, 0], [2, 4, 0, 0]])
        );
        assert_eq!(s.gained, 24);
    }

    #[test]
    fn test_move_right() {
        let game = Board::from_rows([[2, 4, 8, 16], [2, 8, 8, 4], [4, 0, 0, 4], [2, 0, 0, 4]]);
        let s = game.shift(Move::Right);
        assert_eq!(
            s.board,
            Board::from_rows([[2, 4, 8, 16], [0, 2, 16, 4], [0, 0, 0, 8], [0, 0, 2, 4]])
        );
    }

    #[test]
    fn test_move_up() {
        let game = Board::from_rows([[2, 2, 4, 2], [4, 8, 0, 0], [8, 8, 0, 0], [16, 4, 4, 4]]);
        let s = game.shift(Move::Up);
        assert_eq!(
            s.board,
            Board::from_rows([[2, 2, 8, 2], [4, 16, 0, 4], [8, 4, 0, 0], [16, 0, 0, 0]])
        );
        assert_eq!(s.gained, 24);
    }

    #[test]
    fn test_move_down() {
        let game = Board::from_rows([[2, 2, 4, 2], [4, 8, 0, 0], [8, 8, 0, 0], [16, 4, 4, 4]]);
        let s = game.shift(Move::Down);
        assert_eq!(
            s.board,
            Board::from_rows([[2, 0, 0, 0], [4, 2, 0, 0], [8, 16, 0, 2], [16, 4, 8, 4]])
        );
    }

    #[test]
    fn blocked_shift_reports_not_moved() {
        let b = row([2, 4, 8, 16]);
        let s = b.shift(Move::Left);
        assert!(!s.moved_from(b));
        assert_eq!(s.gained, 0);
    }

    #[test]
    fn transpose_is_an_involution() {
        let b = Board::from_rows([[2, 4, 8, 16], [32, 64, 128, 256], [0, 2, 0, 4], [8, 0, 0, 2]]);
        assert_eq!(b.transpose().transpose(), b);
        assert_eq!(b.transpose().get(0, 1), 32);
        assert_eq!(b.reverse_rows().get(0, 0), 16);
    }

    #[test]
    fn it_test_insert_random_tile() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut game = Board::EMPTY;
        for _ in 0..16 {
            game = game.with_random_tile(&mut rng);
        }
        assert_eq!(game.count_empty(), 0);
        assert!(game.rows().iter().flatten().all(|&v| v == 2 || v == 4));
        // full board: silently unchanged
        assert_eq!(game.with_random_tile(&mut rng), game);
    }

    #[test]
    fn single_empty_cell_is_always_filled() {
        let mut rng = StdRng::seed_from_u64(99);
        let full = Board::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 0]]);
        for _ in 0..50 {
            let b = full.with_random_tile(&mut rng);
            assert!(b.get(3, 3) == 2 || b.get(3, 3) == 4);
        }
    }

    #[test]
    fn it_is_terminal() {
        let stuck = Board::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(stuck.is_terminal());
        let vertical_pair = stuck.with_tile_at(1, 0, 2);
        assert!(!vertical_pair.is_terminal());
        let horizontal_pair = stuck.with_tile_at(3, 3, 4);
        assert!(!horizontal_pair.is_terminal());
        assert!(!stuck.with_tile_at(2, 2, 0).is_terminal());
    }

    #[test]
    fn it_count_empty() {
        let game = Board::from_rows([[2, 2, 2, 2], [0; 4], [2, 2, 2, 2], [0; 4]]);
        assert_eq!(game.count_empty(), 8);
        assert_eq!(game.empty_cells().len(), 8);
        assert_eq!(game.empty_cells()[0], (1, 0));
    }

    #[test]
    fn it_get_tile_val() {
        let game = Board::from_rows([[0, 2, 4, 8], [16, 32, 64, 128], [256, 512, 1024, 2048], [0; 4]]);
        assert_eq!(game.tile_value(3), 8);
        assert_eq!(game.tile_value(10), 1024);
        assert_eq!(game.highest_tile(), 2048);
        assert_eq!(Board::EMPTY.highest_tile(), 0);
    }

    #[test]
    fn parse_moves() {
        assert_eq!("Up".parse::<Move>(), Ok(Move::Up));
        assert_eq!("s".parse::<Move>(), Ok(Move::Down));
        assert_eq!(" LEFT ".parse::<Move>(), Ok(Move::Left));
        assert_eq!("l".parse::<Move>(), Ok(Move::Right));
        assert!("sideways".parse::<Move>().is_err());
        assert!("".parse::<Move>().is_err());
    }

    #[test]
    fn display_renders_four_rows() {
        let text = row([2, 0, 0, 2048]).to_string();
        assert_eq!(text.lines().count(), 7);
        assert!(text.lines().next().unwrap().contains("2048"));
    }
}
