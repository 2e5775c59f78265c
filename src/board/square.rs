use std::fmt;

/// A board coordinate. Row 0 is Black's home rank (rank 8), row 7 is
/// White's home rank (rank 1); column 0 is the a-file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Checked constructor from host coordinates; `None` when off the board.
    #[inline]
    pub fn new(row: i32, col: i32) -> Option<Square> {
        if is_on_board(row, col) {
            Some(Square { row: row as u8, col: col as u8 })
        } else {
            None
        }
    }

    /// Unchecked constructor for compile-time known squares.
    #[inline]
    pub const fn at(row: u8, col: u8) -> Square {
        debug_assert!(row < 8 && col < 8);
        Square { row, col }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    #[inline]
    pub fn offset(self, dr: i8, dc: i8) -> Option<Square> {
        Square::new(self.row as i32 + dr as i32, self.col as i32 + dc as i32)
    }

    /// Same file, row flipped. Used to read White-oriented tables for Black.
    #[inline]
    pub const fn mirrored(self) -> Square {
        Square { row: 7 - self.row, col: self.col }
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square { row, col }))
    }

    /// Parse algebraic notation like "e4".
    pub fn from_algebraic(s: &str) -> Option<Square> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if file < 8 && rank < 8 {
            Some(Square { row: 7 - rank, col: file })
        } else {
            None
        }
    }

    pub fn to_algebraic(self) -> String {
        let file = (b'a' + self.col) as char;
        let rank = (b'8' - self.row) as char;
        format!("{file}{rank}")
    }
}

#[inline]
pub fn is_on_board(row: i32, col: i32) -> bool {
    (0..8).contains(&row) && (0..8).contains(&col)
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algebraic_maps_rows_to_ranks() {
        assert_eq!(Square::from_algebraic("e2"), Some(Square::at(6, 4)));
        assert_eq!(Square::from_algebraic("a8"), Some(Square::at(0, 0)));
        assert_eq!(Square::from_algebraic("h1"), Some(Square::at(7, 7)));
        assert_eq!(Square::at(4, 4).to_algebraic(), "e4");
        assert!(Square::from_algebraic("i1").is_none());
        assert!(Square::from_algebraic("a9").is_none());
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert!(Square::new(-1, 0).is_none());
        assert!(Square::new(0, 8).is_none());
        assert!(Square::at(0, 7).offset(0, 1).is_none());
        assert_eq!(Square::at(6, 4).offset(-2, 0), Some(Square::at(4, 4)));
    }
}
