use std::{
    fmt::{Display, Write},
    str::FromStr,
};

use seq_macro::seq;

use crate::error::ParseSquareError;

/// A square on the 8×8 board, addressed by `(row, col)`.
///
/// Row 0 is the eighth rank (Black's back rank) and row 7 is the first rank
/// (White's back rank). Column 0 is the a-file. Internally the square is stored
/// as the row-major index `8 * row + col`, so a [`Square`] can never refer to
/// a location off the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "String", try_from = "String")
)]
pub struct Square(u8);

impl Square {
    seq!(N in 1..=8 {
        pub const A~N: Self = Self::new_unchecked(8 - N, 0);
        pub const B~N: Self = Self::new_unchecked(8 - N, 1);
        pub const C~N: Self = Self::new_unchecked(8 - N, 2);
        pub const D~N: Self = Self::new_unchecked(8 - N, 3);
        pub const E~N: Self = Self::new_unchecked(8 - N, 4);
        pub const F~N: Self = Self::new_unchecked(8 - N, 5);
        pub const G~N: Self = Self::new_unchecked(8 - N, 6);
        pub const H~N: Self = Self::new_unchecked(8 - N, 7);
    });

    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row >= 8 || col >= 8 {
            None
        } else {
            Some(Self(8 * row + col))
        }
    }

    pub const fn new_unchecked(row: u8, col: u8) -> Self {
        Self(row.overflowing_mul(8).0.overflowing_add(col).0 % 64)
    }

    pub const fn index(self) -> usize {
        self.0 as _
    }

    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    pub const fn col(self) -> u8 {
        self.0 % 8
    }

    /// Returns the square `rows` rows and `cols` columns away from this one,
    /// or [`None`] if that would leave the board. Never wraps around an edge.
    pub const fn offset(self, rows: i8, cols: i8) -> Option<Self> {
        let (Some(row), Some(col)) = (
            (self.row() as i8).checked_add(rows),
            (self.col() as i8).checked_add(cols),
        ) else {
            return None;
        };
        if row < 0 || row >= 8 || col < 0 || col >= 8 {
            None
        } else {
            Some(Self::new_unchecked(row as u8, col as u8))
        }
    }

    /// Signed `(row, col)` displacement from this square to `other`.
    pub const fn delta(self, other: Square) -> (i8, i8) {
        (
            other.row() as i8 - self.row() as i8,
            other.col() as i8 - self.col() as i8,
        )
    }

    /// Iterates over all 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char((self.col() + b'a') as _)?;
        f.write_char((b'8' - self.row()) as _)
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars = s.chars().collect::<Vec<_>>();
        let &[file, rank] = chars.as_slice() else {
            return Err(ParseSquareError::IncorrectLength(chars.len()));
        };

        if !('a'..='h').contains(&file) {
            return Err(ParseSquareError::InvalidFile(file));
        }
        if !('1'..='8').contains(&rank) {
            return Err(ParseSquareError::InvalidRank(rank));
        }

        let col = file as u8 - b'a';
        let row = b'8' - rank as u8;
        Ok(Square::new_unchecked(row, col))
    }
}

impl From<Square> for String {
    fn from(value: Square) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Square {
    type Error = ParseSquareError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
