use crate::board::{Board, CastlingRights, Color, Piece, Square};
use crate::movegen::Move;

const LOG_CAPACITY: usize = 4;

/// Previous occupants of every square a move touched, in the order they
/// were overwritten. Restoring walks the log backwards, so a square written
/// twice still ends up with its original occupant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SquareLog {
    entries: [(Square, Option<Piece>); LOG_CAPACITY],
    len: u8,
}

impl Default for SquareLog {
    fn default() -> Self {
        Self { entries: [(Square::at(0, 0), None); LOG_CAPACITY], len: 0 }
    }
}

impl SquareLog {
    /// Overwrite `sq`, remembering what was there.
    pub fn set(&mut self, board: &mut Board, sq: Square, piece: Option<Piece>) {
        let i = self.len as usize;
        assert!(i < LOG_CAPACITY, "square log overflow");
        self.entries[i] = (sq, board.get(sq));
        self.len += 1;
        board.set(sq, piece);
    }

    pub fn restore(self, board: &mut Board) {
        for &(sq, prev) in self.entries[..self.len as usize].iter().rev() {
            board.set(sq, prev);
        }
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Relocate the pieces a move displaces: the mover (placed on the
    /// destination as `placed`), an en-passant victim, and a castling rook.
    /// `mark_rook` sets the castling rook's `has_moved` flag.
    pub fn relocate(board: &mut Board, mv: &Move, placed: Piece, mark_rook: bool) -> SquareLog {
        let mut log = SquareLog::default();
        log.set(board, mv.from, None);
        log.set(board, mv.to, Some(placed));
        if mv.is_en_passant {
            log.set(board, en_passant_victim(mv.from, mv.to), None);
        }
        if mv.is_castling {
            let (rook_from, rook_to) = castling_rook_squares(mv.to);
            let rook = board
                .get(rook_from)
                .map(|r| Piece { has_moved: r.has_moved || mark_rook, ..r });
            log.set(board, rook_from, None);
            log.set(board, rook_to, rook);
        }
        log
    }
}

/// Square of the pawn taken by an en-passant capture from `from` to `to`:
/// beside the capturer, one rank behind the destination.
#[inline]
pub fn en_passant_victim(from: Square, to: Square) -> Square {
    Square::at(from.row(), to.col())
}

/// Rook source and destination for a castling king landing on `king_to`.
#[inline]
pub fn castling_rook_squares(king_to: Square) -> (Square, Square) {
    let row = king_to.row();
    if king_to.col() == 6 {
        (Square::at(row, 7), Square::at(row, 5))
    } else {
        (Square::at(row, 0), Square::at(row, 3))
    }
}

/// Everything one applied move changed, enough to put the state back
/// exactly as it was.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Undo {
    pub mv: Move,
    pub squares: SquareLog,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub side_to_move: Color,
}
