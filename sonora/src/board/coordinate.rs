//! Coordinates on the fixed 10x10 grid.
use std::{convert::TryFrom, fmt, str::FromStr};

#[cfg(feature = "rng_gen")]
use rand::{
    distributions::{Distribution, Standard},
    Rng,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of rows on the board. Rows are numbered from 1 at the top.
pub const ROWS: i32 = 10;

/// Letters used to label the columns, left to right.
pub const COLS: &str = "ABCDEFGHIJ";

/// Error returned when a coordinate or column can't be parsed.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum ParseCoordinateError {
    /// The column was not one of `A` through `J`.
    #[error("invalid column {0:?}, expected A through J")]
    Column(char),
    /// The row was not a number from 1 through 10.
    #[error("invalid row {0:?}, expected 1 through 10")]
    Row(String),
    /// Nothing to parse.
    #[error("coordinate is empty")]
    Empty,
}

/// One of the ten lettered columns. Arithmetic on columns never wraps: stepping off either
/// edge of the alphabet is an error rather than a clamp.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Column(u8);

impl Column {
    /// Number of columns on the board.
    pub const COUNT: usize = 10;

    /// Get the column at the given zero-based index, if it is on the board.
    pub fn from_index(idx: usize) -> Option<Self> {
        if idx < Self::COUNT {
            Some(Column(idx as u8))
        } else {
            None
        }
    }

    /// Zero-based index of this column.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Letter label of this column.
    pub fn letter(self) -> char {
        (b'A' + self.0) as char
    }

    /// Step `delta` columns to the right (negative steps go left). Returns `None` if that
    /// leaves the alphabet.
    pub fn offset(self, delta: i32) -> Option<Self> {
        let idx = self.0 as i32 + delta;
        if idx >= 0 && (idx as usize) < Self::COUNT {
            Some(Column(idx as u8))
        } else {
            None
        }
    }

    /// Iterate all columns from `A` to `J`.
    pub fn all() -> impl Iterator<Item = Column> {
        (0..Self::COUNT as u8).map(Column)
    }
}

impl TryFrom<char> for Column {
    type Error = ParseCoordinateError;

    fn try_from(letter: char) -> Result<Self, Self::Error> {
        let upper = letter.to_ascii_uppercase();
        COLS.find(upper)
            .map(|idx| Column(idx as u8))
            .ok_or(ParseCoordinateError::Column(letter))
    }
}

impl From<Column> for char {
    fn from(col: Column) -> Self {
        col.letter()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// The coordinates of a square on the board.
///
/// The row is signed and unbounded here so that template offsets can be applied before
/// anything checks whether the result lands on the board. Only the column is restricted at
/// this level. Use [`Coordinate::in_bounds`] to check the row.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    /// Row of the square, 1 through 10 when on the board.
    pub row: i32,
    /// Column of the square.
    pub col: Column,
}

impl Coordinate {
    /// Construct a [`Coordinate`] from the given `row` and `col`.
    pub fn new(row: i32, col: Column) -> Self {
        Self { row, col }
    }

    /// Whether the row lies on the board.
    pub fn in_bounds(&self) -> bool {
        self.row >= 1 && self.row <= ROWS
    }

    /// Apply a relative offset. Fails if the column leaves the alphabet or the row
    /// overflows; rows off the board are otherwise allowed.
    pub fn offset(&self, drow: i32, dcol: i32) -> Option<Self> {
        let row = self.row.checked_add(drow)?;
        self.col.offset(dcol).map(|col| Self { row, col })
    }

    /// Index of this coordinate in a row-major layout of the board, if it is on the board.
    pub(crate) fn linearize(&self) -> Option<usize> {
        if self.in_bounds() {
            Some((self.row - 1) as usize * Column::COUNT + self.col.index())
        } else {
            None
        }
    }

    /// Get an iterator over rows of the board. Each row is an iterator over the
    /// coordinates of that row.
    pub fn rows() -> impl Iterator<Item = impl Iterator<Item = Coordinate>> {
        (1..=ROWS).map(|row| Column::all().map(move |col| Coordinate { row, col }))
    }

    /// Iterate every square of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        Self::rows().flatten()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.col, self.row)
    }
}

impl FromStr for Coordinate {
    type Err = ParseCoordinateError;

    /// Parse a coordinate written as a column letter followed by a row, such as `C5`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let col = Column::try_from(chars.next().ok_or(ParseCoordinateError::Empty)?)?;
        let rest = chars.as_str().trim();
        match rest.parse::<i32>() {
            Ok(row) if row >= 1 && row <= ROWS => Ok(Self { row, col }),
            _ => Err(ParseCoordinateError::Row(rest.to_owned())),
        }
    }
}

#[cfg(feature = "rng_gen")]
impl Distribution<Coordinate> for Standard {
    /// Sample a uniformly random square on the board.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Coordinate {
        Coordinate {
            row: rng.gen_range(1, ROWS + 1),
            col: Column(rng.gen_range(0, Column::COUNT as u8)),
        }
    }
}
