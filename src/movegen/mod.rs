pub mod attacks;
pub mod legal;

use std::fmt;
use std::ops::ControlFlow;

use crate::board::undo::en_passant_victim;
use crate::board::{Board, Color, GameState, Piece, PieceKind, Square};
use crate::errors::{ChessError, Result};

pub const KNIGHT_OFFSETS: [(i8, i8); 8] =
    [(-2, -1), (-2, 1), (-1, -2), (-1, 2), (1, -2), (1, 2), (2, -1), (2, 1)];
pub const KING_OFFSETS: [(i8, i8); 8] =
    [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)];
pub const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub const ORTHOGONALS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// A candidate or executed move. The promotion piece is not part of the
/// move; the executor picks it (queen unless told otherwise).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub is_capture: bool,
    pub is_castling: bool,
    pub is_en_passant: bool,
    pub is_promotion: bool,
    /// Snapshot of the captured piece, if any.
    pub captured: Option<Piece>,
    /// Ordering score, only meaningful inside the search.
    pub score: i32,
}

impl Move {
    /// Sentinel coordinates reported when there is no move.
    pub const NONE_COORDS: [i32; 4] = [-1, -1, -1, -1];

    pub fn new(from: Square, to: Square, captured: Option<Piece>) -> Self {
        Self {
            from,
            to,
            is_capture: captured.is_some(),
            is_castling: false,
            is_en_passant: false,
            is_promotion: false,
            captured,
            score: 0,
        }
    }

    pub fn coords(&self) -> [i32; 4] {
        [
            self.from.row() as i32,
            self.from.col() as i32,
            self.to.row() as i32,
            self.to.col() as i32,
        ]
    }

    /// Captures and promotions, the moves quiescence looks at.
    #[inline]
    pub fn is_tactical(&self) -> bool {
        self.is_capture || self.is_promotion
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Parse coordinate notation: "e2e4", optionally followed by a promotion
/// letter ("e7e8n").
pub fn parse_coordinate_move(text: &str) -> Result<(Square, Square, Option<PieceKind>)> {
    let t = text.trim();
    let bad = || ChessError::InvalidMoveText(t.to_string());
    if !t.is_ascii() || (t.len() != 4 && t.len() != 5) {
        return Err(bad());
    }
    let from = Square::from_algebraic(&t[0..2]).ok_or_else(bad)?;
    let to = Square::from_algebraic(&t[2..4]).ok_or_else(bad)?;
    let promotion = match t[4..].chars().next() {
        None => None,
        Some(c) => match PieceKind::from_char(c) {
            Some(k) if k.is_promotion_target() => Some(k),
            _ => return Err(bad()),
        },
    };
    Ok((from, to, promotion))
}

/// Walk the destinations a non-pawn piece reaches by its movement pattern,
/// castling excluded: empty squares and enemy-occupied squares (captures).
/// Sliders stop at the first occupied square. The visitor may break early.
pub fn for_each_target<F>(board: &Board, from: Square, piece: Piece, mut visit: F) -> ControlFlow<()>
where
    F: FnMut(Square, Option<Piece>) -> ControlFlow<()>,
{
    match piece.kind {
        PieceKind::Knight => step(board, from, piece.color, &KNIGHT_OFFSETS, &mut visit),
        PieceKind::King => step(board, from, piece.color, &KING_OFFSETS, &mut visit),
        PieceKind::Bishop => slide(board, from, piece.color, &DIAGONALS, &mut visit),
        PieceKind::Rook => slide(board, from, piece.color, &ORTHOGONALS, &mut visit),
        PieceKind::Queen => slide(board, from, piece.color, &KING_OFFSETS, &mut visit),
        PieceKind::Pawn => ControlFlow::Continue(()),
    }
}

fn step<F>(board: &Board, from: Square, color: Color, offsets: &[(i8, i8)], visit: &mut F) -> ControlFlow<()>
where
    F: FnMut(Square, Option<Piece>) -> ControlFlow<()>,
{
    for &(dr, dc) in offsets {
        let Some(to) = from.offset(dr, dc) else { continue };
        match board.get(to) {
            Some(p) if p.color == color => {}
            occupant => visit(to, occupant)?,
        }
    }
    ControlFlow::Continue(())
}

fn slide<F>(board: &Board, from: Square, color: Color, dirs: &[(i8, i8)], visit: &mut F) -> ControlFlow<()>
where
    F: FnMut(Square, Option<Piece>) -> ControlFlow<()>,
{
    for &(dr, dc) in dirs {
        let mut cur = from;
        while let Some(to) = cur.offset(dr, dc) {
            match board.get(to) {
                None => visit(to, None)?,
                Some(p) => {
                    if p.color != color {
                        visit(to, Some(p))?;
                    }
                    break;
                }
            }
            cur = to;
        }
    }
    ControlFlow::Continue(())
}

impl GameState {
    /// Moves consistent with the piece's movement pattern, ignoring whether
    /// they leave the mover's king in check. Empty for an empty square.
    pub fn pseudo_legal_moves(&self, from: Square) -> Vec<Move> {
        let mut moves = Vec::with_capacity(28);
        let Some(piece) = self.board.get(from) else { return moves };
        match piece.kind {
            PieceKind::Pawn => self.pawn_moves(from, piece.color, &mut moves),
            _ => {
                let _ = for_each_target(&self.board, from, piece, |to, victim| {
                    moves.push(Move::new(from, to, victim));
                    ControlFlow::Continue(())
                });
                if piece.kind == PieceKind::King {
                    self.castling_moves(from, piece.color, &mut moves);
                }
            }
        }
        moves
    }

    fn pawn_moves(&self, from: Square, color: Color, moves: &mut Vec<Move>) {
        let dir = color.forward();
        let promotes = |sq: Square| sq.row() == color.promotion_row();

        if let Some(one) = from.offset(dir, 0) {
            if self.board.is_empty(one) {
                let mut mv = Move::new(from, one, None);
                mv.is_promotion = promotes(one);
                moves.push(mv);
                if from.row() == color.pawn_row() {
                    if let Some(two) = from.offset(2 * dir, 0) {
                        if self.board.is_empty(two) {
                            moves.push(Move::new(from, two, None));
                        }
                    }
                }
            }
        }

        for dc in [-1, 1] {
            let Some(to) = from.offset(dir, dc) else { continue };
            if let Some(victim) = self.board.get(to) {
                if victim.color != color {
                    let mut mv = Move::new(from, to, Some(victim));
                    mv.is_promotion = promotes(to);
                    moves.push(mv);
                }
            }
            if self.en_passant == Some(to) && self.board.is_empty(to) {
                // Only a pawn of the other side can sit behind the target.
                let behind = en_passant_victim(from, to);
                if let Some(victim) = self.board.get(behind) {
                    if victim.kind == PieceKind::Pawn && victim.color != color {
                        let mut mv = Move::new(from, to, Some(victim));
                        mv.is_en_passant = true;
                        moves.push(mv);
                    }
                }
            }
        }
    }

    fn castling_moves(&self, from: Square, color: Color, moves: &mut Vec<Move>) {
        let row = color.home_row();
        if from != Square::at(row, 4) || self.castling.king_moved(color) {
            return;
        }
        let mut in_check = None;
        // (kingside, rook column, squares that must be empty, squares the king crosses)
        let wings: [(bool, u8, &[u8], [u8; 2]); 2] =
            [(true, 7, &[5, 6], [5, 6]), (false, 0, &[1, 2, 3], [3, 2])];
        for (kingside, rook_col, between, path) in wings {
            if self.castling.rook_moved(color, kingside) {
                continue;
            }
            let rook_home = self.board.get(Square::at(row, rook_col));
            if !matches!(rook_home, Some(p) if p.kind == PieceKind::Rook && p.color == color) {
                continue;
            }
            if !between.iter().all(|&c| self.board.is_empty(Square::at(row, c))) {
                continue;
            }
            let checked = *in_check.get_or_insert_with(|| self.is_in_check(color));
            if checked {
                return;
            }
            if path.iter().any(|&c| self.is_square_attacked(Square::at(row, c), !color)) {
                continue;
            }
            let mut mv = Move::new(from, Square::at(row, path[1]), None);
            mv.is_castling = true;
            moves.push(mv);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn targets(g: &GameState, from: &str) -> Vec<String> {
        let mut v: Vec<String> = g.pseudo_legal_moves(sq(from)).iter().map(|m| m.to.to_algebraic()).collect();
        v.sort();
        v
    }

    #[test]
    fn knight_from_start() {
        let g = GameState::new();
        assert_eq!(targets(&g, "g1"), vec!["f3", "h3"]);
    }

    #[test]
    fn sliders_stop_at_blockers() {
        let g = GameState::from_fen("4k3/8/8/3p4/8/1P6/8/3RK2B w - - 0 1").unwrap();
        // Rook d1: up the d-file until the pawn on d5 (capture), left to a1.
        assert_eq!(targets(&g, "d1"), vec!["a1", "b1", "c1", "d2", "d3", "d4", "d5"]);
        let d5 = g.pseudo_legal_moves(sq("d1")).into_iter().find(|m| m.to == sq("d5")).unwrap();
        assert!(d5.is_capture);
        assert_eq!(d5.captured.map(|p| p.kind), Some(PieceKind::Pawn));
        // Bishop h1 runs the long diagonal to d5.
        assert_eq!(targets(&g, "h1"), vec!["d5", "e4", "f3", "g2"]);
    }

    #[test]
    fn pawn_pushes_captures_and_promotion_flag() {
        let g = GameState::from_fen("1n2k3/P7/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        assert_eq!(targets(&g, "e2"), vec!["e3", "e4"]);
        let a7 = g.pseudo_legal_moves(sq("a7"));
        assert_eq!(a7.len(), 2);
        assert!(a7.iter().all(|m| m.is_promotion));
        assert!(a7.iter().any(|m| m.to == sq("b8") && m.is_capture));
    }

    #[test]
    fn blocked_double_push() {
        let g = GameState::from_fen("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1").unwrap();
        assert_eq!(targets(&g, "e2"), vec!["e3"]);
        let g = GameState::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").unwrap();
        assert!(targets(&g, "e2").is_empty());
    }

    #[test]
    fn en_passant_is_generated_for_the_right_side_only() {
        let mut g = GameState::new();
        for m in ["e2e4", "a7a6", "e4e5", "d7d5"] {
            g.play_text(m).unwrap();
        }
        let ep = g.pseudo_legal_moves(sq("e5")).into_iter().find(|m| m.is_en_passant).unwrap();
        assert_eq!(ep.to, sq("d6"));
        assert_eq!(ep.captured.map(|p| p.color), Some(Color::Black));
        // A black pawn next to the target must not take its own pawn.
        assert!(g.pseudo_legal_moves(sq("c7")).iter().all(|m| !m.is_en_passant));
    }

    #[test]
    fn castling_conditions() {
        let g = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let castles: Vec<_> = g.pseudo_legal_moves(sq("e1")).into_iter().filter(|m| m.is_castling).collect();
        assert_eq!(castles.len(), 2);

        // Transit square f1 attacked by the rook on f8.
        let g = GameState::from_fen("r3kr2/8/8/8/8/8/8/R3K2R w KQq - 0 1").unwrap();
        let to: Vec<_> = g.pseudo_legal_moves(sq("e1")).into_iter().filter(|m| m.is_castling).map(|m| m.to).collect();
        assert_eq!(to, vec![sq("c1")]);

        // b1 attacked does not stop queenside castling; only c1 and d1 matter.
        let g = GameState::from_fen("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
        assert!(g.pseudo_legal_moves(sq("e1")).iter().any(|m| m.is_castling));

        // No castling out of check.
        let g = GameState::from_fen("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        assert!(g.pseudo_legal_moves(sq("e1")).iter().all(|m| !m.is_castling));
    }

    #[test]
    fn parse_coordinates() {
        assert_eq!(parse_coordinate_move("e2e4").unwrap(), (sq("e2"), sq("e4"), None));
        assert_eq!(parse_coordinate_move(" a7a8n ").unwrap(), (sq("a7"), sq("a8"), Some(PieceKind::Knight)));
        assert!(parse_coordinate_move("a7a8k").is_err());
        assert!(parse_coordinate_move("e2").is_err());
        assert!(parse_coordinate_move("e2e9").is_err());
    }
}
