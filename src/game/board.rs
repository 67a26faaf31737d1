use std::fmt;

use super::mark::Mark;
use crate::error::{BoardError, MoveError};

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
pub const CONNECT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    /// The mark occupying this cell, if any
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Mark::X),
            Cell::O => Some(Mark::O),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }
}

/// Horizontal, vertical, and the two diagonals. Each is walked both ways.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// A Connect Four grid with gravity.
///
/// Row 0 is the top of the board and row `rows - 1` the bottom; discs dropped
/// into a column land in the lowest empty row. Per-column heights are tracked
/// so legality checks and drops never scan a column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    connect: usize,
    cells: Vec<Cell>,
    heights: Vec<usize>,
    discs: usize,
}

impl Board {
    /// Create an empty board with the given dimensions and connect length.
    pub fn new(rows: usize, cols: usize, connect: usize) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::EmptyDimensions { rows, cols });
        }
        if connect == 0 || connect > rows.max(cols) {
            return Err(BoardError::ConnectLength {
                connect,
                rows,
                cols,
            });
        }
        let size = rows
            .checked_mul(cols)
            .ok_or(BoardError::TooLarge { rows, cols })?;

        Ok(Board {
            rows,
            cols,
            connect,
            cells: vec![Cell::Empty; size],
            heights: vec![0; cols],
            discs: 0,
        })
    }

    /// The classic 6x7 board, four in a row to win.
    pub fn standard() -> Self {
        Board {
            rows: ROWS,
            cols: COLS,
            connect: CONNECT,
            cells: vec![Cell::Empty; ROWS * COLS],
            heights: vec![0; COLS],
            discs: 0,
        }
    }

    /// Build a board from a top-to-bottom text diagram using `.`, `X` and `O`.
    /// Whitespace inside a row is ignored.
    pub fn from_diagram(diagram: &[&str], connect: usize) -> Result<Self, BoardError> {
        let parsed: Vec<Vec<char>> = diagram
            .iter()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect())
            .collect();
        let rows = parsed.len();
        let cols = parsed.first().map_or(0, Vec::len);
        let mut board = Board::new(rows, cols, connect)?;

        for (row, line) in parsed.iter().enumerate() {
            if line.len() != cols {
                return Err(BoardError::RaggedDiagram {
                    row,
                    found: line.len(),
                    expected: cols,
                });
            }
            for (col, &c) in line.iter().enumerate() {
                let cell = match c {
                    '.' => Cell::Empty,
                    other => Mark::from_symbol(other)
                        .ok_or(BoardError::UnknownCell(other))?
                        .to_cell(),
                };
                let idx = board.index(row, col);
                board.cells[idx] = cell;
            }
        }

        // Recompute heights bottom-up; a disc above a gap is not a reachable position.
        for col in 0..cols {
            let mut height = 0;
            for row in (0..rows).rev() {
                if board.get(row, col) == Cell::Empty {
                    if let Some(floating) = (0..row).find(|&r| board.get(r, col) != Cell::Empty)
                    {
                        return Err(BoardError::FloatingDisc { row: floating, col });
                    }
                    break;
                }
                height += 1;
            }
            board.heights[col] = height;
            board.discs += height;
        }

        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of aligned discs needed to win
    pub fn connect(&self) -> usize {
        self.connect
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Get the cell at a specific position. Panics when out of range.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    /// Get the cell at a position, or `None` when it is off the board
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        (row < self.rows && col < self.cols).then(|| self.get(row, col))
    }

    /// Number of discs in a column
    pub fn column_height(&self, col: usize) -> usize {
        self.heights.get(col).copied().unwrap_or(0)
    }

    /// Total number of discs on the board
    pub fn disc_count(&self) -> usize {
        self.discs
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        col >= self.cols || self.heights[col] == self.rows
    }

    /// Playable columns in ascending order
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..self.cols)
            .filter(|&col| self.heights[col] < self.rows)
            .collect()
    }

    /// Drop a disc in a column, returns the row where it landed
    pub fn drop(&mut self, col: usize, mark: Mark) -> Result<usize, MoveError> {
        if col >= self.cols {
            return Err(MoveError::InvalidColumn {
                column: col as i64,
                cols: self.cols,
            });
        }
        if self.is_column_full(col) {
            return Err(MoveError::ColumnFull(col));
        }

        let row = self.rows - 1 - self.heights[col];
        let idx = self.index(row, col);
        self.cells[idx] = mark.to_cell();
        self.heights[col] += 1;
        self.discs += 1;
        Ok(row)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.discs == self.rows * self.cols
    }

    /// Check if the disc at (row, col) is part of a winning line.
    ///
    /// Only lines through that cell are inspected, which is all that can
    /// change after a drop.
    pub fn check_win_from(&self, row: usize, col: usize) -> bool {
        let cell = match self.cell(row, col) {
            Some(Cell::Empty) | None => return false,
            Some(cell) => cell,
        };

        DIRECTIONS.iter().any(|&(dr, dc)| {
            1 + self.run_length(row, col, dr, dc, cell) + self.run_length(row, col, -dr, -dc, cell)
                >= self.connect
        })
    }

    /// Count consecutive `cell`s starting next to (row, col) in one direction.
    fn run_length(&self, row: usize, col: usize, dr: isize, dc: isize, cell: Cell) -> usize {
        let mut count = 0;
        let mut r = row as isize + dr;
        let mut c = col as isize + dc;
        while r >= 0
            && c >= 0
            && (r as usize) < self.rows
            && (c as usize) < self.cols
            && self.get(r as usize, c as usize) == cell
        {
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }

    /// Every row, column and diagonal that is at least `min_len` cells long.
    pub fn lines(&self, min_len: usize) -> Vec<Vec<Cell>> {
        let mut starts: Vec<(usize, usize, isize, isize)> = Vec::new();
        starts.extend((0..self.rows).map(|r| (r, 0, 0, 1)));
        starts.extend((0..self.cols).map(|c| (0, c, 1, 0)));
        // Top-left to bottom-right
        starts.extend((0..self.rows).map(|r| (r, 0, 1, 1)));
        starts.extend((1..self.cols).map(|c| (0, c, 1, 1)));
        // Top-right to bottom-left
        starts.extend((0..self.cols).map(|c| (0, c, 1, -1)));
        starts.extend((1..self.rows).map(|r| (r, self.cols - 1, 1, -1)));

        starts
            .into_iter()
            .map(|(row, col, dr, dc)| {
                let mut line = vec![self.get(row, col)];
                let mut r = row as isize + dr;
                let mut c = col as isize + dc;
                while r >= 0 && c >= 0 && (r as usize) < self.rows && (c as usize) < self.cols {
                    line.push(self.get(r as usize, c as usize));
                    r += dr;
                    c += dc;
                }
                line
            })
            .filter(|line| line.len() >= min_len)
            .collect()
    }

    /// Scan the whole board for a completed line.
    pub fn winner(&self) -> Option<Mark> {
        for line in self.lines(self.connect) {
            let mut run = 0;
            let mut previous = Cell::Empty;
            for cell in line {
                run = if cell == previous { run + 1 } else { 1 };
                previous = cell;
                if run >= self.connect {
                    if let Some(mark) = cell.mark() {
                        return Some(mark);
                    }
                }
            }
        }
        None
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: Vec<String> = (1..=self.cols).map(|c| format!("{c:<2}")).collect();
        writeln!(f, "{}", header.join(" ").trim_end())?;
        for row in 0..self.rows {
            let cells: Vec<String> = (0..self.cols)
                .map(|col| self.get(row, col).symbol().to_string())
                .collect();
            write!(f, "{}", cells.join("  "))?;
            if row + 1 < self.rows {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
