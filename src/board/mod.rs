pub mod fen;
pub mod piece;
pub mod square;
pub mod state;
pub mod undo;

use std::fmt;

pub use piece::{Color, Piece, PieceKind};
pub use square::{is_on_board, Square};
pub use state::{CastlingRights, GameState};
pub use undo::{SquareLog, Undo};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// 8x8 mailbox indexed `[row][col]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self { squares: [[None; 8]; 8] }
    }

    pub fn startpos() -> Self {
        let mut b = Self::empty();
        for (col, &kind) in BACK_RANK.iter().enumerate() {
            let col = col as u8;
            b.set(Square::at(0, col), Some(Piece::new(kind, Color::Black)));
            b.set(Square::at(1, col), Some(Piece::new(PieceKind::Pawn, Color::Black)));
            b.set(Square::at(6, col), Some(Piece::new(PieceKind::Pawn, Color::White)));
            b.set(Square::at(7, col), Some(Piece::new(kind, Color::White)));
        }
        b
    }

    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.row() as usize][sq.col() as usize]
    }

    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.row() as usize][sq.col() as usize] = piece;
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    /// Host encoding of a square: 0 for empty or off-board coordinates.
    pub fn piece_code(&self, row: i32, col: i32) -> i32 {
        Square::new(row, col).and_then(|sq| self.get(sq)).map_or(0, Piece::encode)
    }

    /// Occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|p| (sq, p)))
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|&(_, p)| p.kind == PieceKind::King && p.color == color)
            .map(|(sq, _)| sq)
    }

    pub fn count_kings(&self, color: Color) -> usize {
        self.pieces().filter(|&(_, p)| p.kind == PieceKind::King && p.color == color).count()
    }

    /// Pieces other than kings, both colors.
    pub fn non_king_count(&self) -> usize {
        self.pieces().filter(|&(_, p)| p.kind != PieceKind::King).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8u8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8u8 {
                let c = self.get(Square::at(row, col)).map_or('.', Piece::to_char);
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
