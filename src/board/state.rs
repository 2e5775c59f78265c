use log::{debug, trace};

use crate::board::undo::en_passant_victim;
use crate::board::{Board, Color, Piece, PieceKind, Square, SquareLog, Undo};
use crate::errors::{ChessError, Result};
use crate::movegen::{parse_coordinate_move, Move};

/// Castling flags. Each one only ever goes from `false` to `true` during a
/// game; castling is allowed while the king and the relevant rook are unmoved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub white_king_moved: bool,
    pub black_king_moved: bool,
    pub white_rook_a_moved: bool,
    pub white_rook_h_moved: bool,
    pub black_rook_a_moved: bool,
    pub black_rook_h_moved: bool,
}

impl CastlingRights {
    /// Every flag set: nobody may castle.
    pub const NONE: CastlingRights = CastlingRights {
        white_king_moved: true,
        black_king_moved: true,
        white_rook_a_moved: true,
        white_rook_h_moved: true,
        black_rook_a_moved: true,
        black_rook_h_moved: true,
    };

    pub fn king_moved(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_king_moved,
            Color::Black => self.black_king_moved,
        }
    }

    pub fn rook_moved(&self, color: Color, kingside: bool) -> bool {
        match (color, kingside) {
            (Color::White, true) => self.white_rook_h_moved,
            (Color::White, false) => self.white_rook_a_moved,
            (Color::Black, true) => self.black_rook_h_moved,
            (Color::Black, false) => self.black_rook_a_moved,
        }
    }

    pub fn can_castle(&self, color: Color, kingside: bool) -> bool {
        !self.king_moved(color) && !self.rook_moved(color, kingside)
    }

    pub(crate) fn mark_king(&mut self, color: Color) {
        match color {
            Color::White => self.white_king_moved = true,
            Color::Black => self.black_king_moved = true,
        }
    }

    pub(crate) fn mark_rook(&mut self, color: Color, kingside: bool) {
        match (color, kingside) {
            (Color::White, true) => self.white_rook_h_moved = true,
            (Color::White, false) => self.white_rook_a_moved = true,
            (Color::Black, true) => self.black_rook_h_moved = true,
            (Color::Black, false) => self.black_rook_a_moved = true,
        }
    }

    /// Mark the rook of `color` whose home corner is `sq`, if any. Called
    /// when a rook leaves its corner or gets captured on it.
    pub(crate) fn touch_corner(&mut self, color: Color, sq: Square) {
        if sq.row() != color.home_row() {
            return;
        }
        match sq.col() {
            0 => self.mark_rook(color, false),
            7 => self.mark_rook(color, true),
            _ => {}
        }
    }
}

/// The authoritative game: board plus turn, castling flags, en-passant
/// target, clocks and the list of executed moves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) history: Vec<Move>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Standard starting position, White to move.
    pub fn new() -> Self {
        Self {
            board: Board::startpos(),
            side_to_move: Color::White,
            castling: CastlingRights::default(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board { &self.board }
    pub fn side_to_move(&self) -> Color { self.side_to_move }
    pub fn castling(&self) -> CastlingRights { self.castling }
    pub fn en_passant(&self) -> Option<Square> { self.en_passant }
    pub fn halfmove_clock(&self) -> u32 { self.halfmove_clock }
    pub fn fullmove_number(&self) -> u32 { self.fullmove_number }
    pub fn history(&self) -> &[Move] { &self.history }

    /// Host encoding of a square, 0 for empty or off-board.
    pub fn piece_at(&self, row: i32, col: i32) -> i32 {
        self.board.piece_code(row, col)
    }

    /// Apply a move's full effect without recording it in history.
    /// `promotion` is used only when the move promotes; kinds that a pawn
    /// cannot become fall back to a queen. A move from an empty square
    /// changes nothing and returns an undo that restores nothing.
    pub fn apply(&mut self, mv: &Move, promotion: PieceKind) -> Undo {
        let Some(piece) = self.board.get(mv.from) else {
            debug_assert!(false, "apply {mv}: no piece on {}", mv.from);
            return self.snapshot(mv, SquareLog::default());
        };
        let victim = if mv.is_en_passant {
            self.board.get(en_passant_victim(mv.from, mv.to))
        } else {
            self.board.get(mv.to)
        };
        let mut undo = self.snapshot(mv, SquareLog::default());

        let kind = if mv.is_promotion {
            if promotion.is_promotion_target() { promotion } else { PieceKind::Queen }
        } else {
            piece.kind
        };
        let placed = Piece { kind, color: piece.color, has_moved: true };
        undo.squares = SquareLog::relocate(&mut self.board, mv, placed, true);

        self.en_passant = None;
        if piece.kind == PieceKind::Pawn && mv.from.row().abs_diff(mv.to.row()) == 2 {
            self.en_passant = Some(Square::at((mv.from.row() + mv.to.row()) / 2, mv.from.col()));
        }

        if piece.kind == PieceKind::Pawn || mv.is_capture {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }

        match piece.kind {
            PieceKind::King => self.castling.mark_king(piece.color),
            PieceKind::Rook => self.castling.touch_corner(piece.color, mv.from),
            _ => {}
        }
        if let Some(v) = victim {
            if v.kind == PieceKind::Rook {
                self.castling.touch_corner(v.color, mv.to);
            }
        }

        if self.side_to_move == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = !self.side_to_move;
        undo
    }

    fn snapshot(&self, mv: &Move, squares: SquareLog) -> Undo {
        Undo {
            mv: *mv,
            squares,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            side_to_move: self.side_to_move,
        }
    }

    pub fn undo(&mut self, undo: Undo) {
        undo.squares.restore(&mut self.board);
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;
        self.side_to_move = undo.side_to_move;
    }

    /// Play a move for real: apply it and append it to history.
    pub fn execute(&mut self, mv: &Move, promotion: PieceKind) {
        self.apply(mv, promotion);
        self.history.push(Move { score: 0, ..*mv });
        debug_assert!(
            self.board.count_kings(Color::White) == 1 && self.board.count_kings(Color::Black) == 1,
            "king count broken after {mv}"
        );
        trace!("executed {mv}, {} to move", self.side_to_move);
    }

    /// Play `from -> to` if it is currently legal; promotions become queens.
    pub fn make_move(&mut self, from: Square, to: Square) -> bool {
        self.make_move_with_promotion(from, to, PieceKind::Queen)
    }

    pub fn make_move_with_promotion(&mut self, from: Square, to: Square, promotion: PieceKind) -> bool {
        let found = self.legal_moves(from).into_iter().find(|m| m.to == to);
        match found {
            Some(mv) => {
                self.execute(&mv, promotion);
                true
            }
            None => {
                debug!("rejected move {from}{to}");
                false
            }
        }
    }

    /// Play a move written in coordinate notation ("e2e4", "e7e8n").
    pub fn play_text(&mut self, text: &str) -> Result<Move> {
        let (from, to, promotion) = parse_coordinate_move(text)?;
        let found = self.legal_moves(from).into_iter().find(|m| m.to == to);
        let Some(mv) = found else {
            return Err(ChessError::IllegalMove(text.trim().to_string()));
        };
        self.execute(&mv, promotion.unwrap_or(PieceKind::Queen));
        Ok(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn double_push_sets_en_passant_then_clears() {
        let mut g = GameState::new();
        assert!(g.make_move(sq("e2"), sq("e4")));
        assert_eq!(g.en_passant(), Some(Square::at(5, 4)));
        assert_eq!(g.side_to_move(), Color::Black);
        assert!(g.make_move(sq("g8"), sq("f6")));
        assert_eq!(g.en_passant(), None);
        assert_eq!(g.fullmove_number(), 2);
        assert_eq!(g.halfmove_clock(), 1);
    }

    #[test]
    fn apply_then_undo_restores_everything() {
        let mut g = GameState::new();
        let before = g.clone();
        let mv = g.legal_moves(sq("g1")).into_iter().find(|m| m.to == sq("f3")).unwrap();
        let undo = g.apply(&mv, PieceKind::Queen);
        assert_ne!(g, before);
        g.undo(undo);
        assert_eq!(g, before);
    }

    #[test]
    fn illegal_request_is_a_no_op() {
        let mut g = GameState::new();
        let before = g.clone();
        assert!(!g.make_move(sq("e2"), sq("e5")));
        assert!(!g.make_move(sq("e7"), sq("e5")));
        assert!(!g.make_move(sq("e4"), sq("e5")));
        assert_eq!(g, before);
    }

    #[test]
    fn play_text_reports_errors() {
        let mut g = GameState::new();
        assert!(matches!(g.play_text("e2e5"), Err(ChessError::IllegalMove(_))));
        assert!(matches!(g.play_text("zz"), Err(ChessError::InvalidMoveText(_))));
        let mv = g.play_text("e2e4").unwrap();
        assert_eq!(mv.to, sq("e4"));
        assert_eq!(g.history().len(), 1);
    }

    #[test]
    fn rook_moves_only_set_their_own_flag() {
        let mut g = GameState::new();
        for m in ["h2h4", "a7a5", "h1h3", "a8a6"] {
            g.play_text(m).unwrap();
        }
        let c = g.castling();
        assert!(c.white_rook_h_moved && !c.white_rook_a_moved && !c.white_king_moved);
        assert!(c.black_rook_a_moved && !c.black_rook_h_moved && !c.black_king_moved);
    }

    #[test]
    fn captures_and_pawn_moves_reset_the_halfmove_clock() {
        let mut g = GameState::from_fen("4k3/8/8/3n4/8/8/4P3/3RK3 w - - 7 20").unwrap();
        assert!(g.make_move(sq("d1"), sq("d5")));
        assert_eq!(g.halfmove_clock(), 0);
        assert!(g.make_move(sq("e8"), sq("f7")));
        assert_eq!(g.halfmove_clock(), 1);
        assert!(g.make_move(sq("e2"), sq("e3")));
        assert_eq!(g.halfmove_clock(), 0);
    }

    #[test]
    fn move_counters_saturate() {
        let mut g = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 4294967295 1").unwrap();
        assert!(g.make_move(sq("e1"), sq("d1")));
        assert_eq!(g.halfmove_clock(), u32::MAX);

        let mut g = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 4294967295").unwrap();
        assert!(g.make_move(sq("e8"), sq("d8")));
        assert_eq!(g.fullmove_number(), u32::MAX);
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "no piece"))]
    fn apply_from_empty_square_changes_nothing() {
        let mut g = GameState::new();
        let before = g.clone();
        let undo = g.apply(&Move::new(sq("e4"), sq("e5"), None), PieceKind::Queen);
        assert_eq!(g, before);
        g.undo(undo);
        assert_eq!(g, before);
    }

    #[test]
    fn occupied_en_passant_target_yields_one_capture() {
        let mut g = GameState::from_fen("4k3/8/3n4/3pP3/8/8/8/4K3 w - - 0 1").unwrap();
        g.en_passant = Some(sq("d6"));
        let to_d6: Vec<Move> = g.legal_moves(sq("e5")).into_iter().filter(|m| m.to == sq("d6")).collect();
        assert_eq!(to_d6.len(), 1);
        assert!(!to_d6[0].is_en_passant);
        assert_eq!(to_d6[0].captured.map(|p| p.kind), Some(PieceKind::Knight));
    }
}
