use std::ops::ControlFlow;

use crate::board::{Board, Color, GameState, PieceKind, Square};
use crate::movegen::for_each_target;

/// Whether any piece of `attacker` could move to (or capture on) `target`.
/// Pawns attack their two forward diagonals only; every other piece is
/// tested against its movement destinations, which never include castling.
pub fn is_square_attacked(board: &Board, target: Square, attacker: Color) -> bool {
    for (sq, piece) in board.pieces() {
        if piece.color != attacker {
            continue;
        }
        let hit = if piece.kind == PieceKind::Pawn {
            let dir = attacker.forward();
            sq.offset(dir, -1) == Some(target) || sq.offset(dir, 1) == Some(target)
        } else {
            for_each_target(board, sq, piece, |to, _| {
                if to == target { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
            })
            .is_break()
        };
        if hit {
            return true;
        }
    }
    false
}

/// Whether `color`'s king is attacked. A board without that king answers
/// `false`; this only happens transiently while a king capture is simulated.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    match board.king_square(color) {
        Some(k) => is_square_attacked(board, k, !color),
        None => false,
    }
}

impl GameState {
    pub fn is_square_attacked(&self, target: Square, attacker: Color) -> bool {
        is_square_attacked(&self.board, target, attacker)
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        is_in_check(&self.board, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn pawn_attacks_diagonals_not_pushes() {
        let g = GameState::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        assert!(g.is_square_attacked(sq("d3"), Color::White));
        assert!(g.is_square_attacked(sq("f3"), Color::White));
        assert!(!g.is_square_attacked(sq("e3"), Color::White));
        assert!(!g.is_square_attacked(sq("e4"), Color::White));
    }

    #[test]
    fn sliders_are_blocked() {
        let g = GameState::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        assert!(g.is_square_attacked(sq("a8"), Color::White));
        assert!(g.is_square_attacked(sq("d1"), Color::White));
        assert!(g.is_square_attacked(sq("f1"), Color::White));
        assert!(!g.is_square_attacked(sq("h1"), Color::White));
        assert!(!g.is_in_check(Color::Black));
    }

    #[test]
    fn start_position_has_no_checks() {
        let g = GameState::new();
        assert!(!g.is_in_check(Color::White));
        assert!(!g.is_in_check(Color::Black));
        assert!(g.is_square_attacked(sq("f3"), Color::White));
        assert!(g.is_square_attacked(sq("f6"), Color::Black));
        assert!(!g.is_square_attacked(sq("e4"), Color::White));
    }

    #[test]
    fn check_by_knight() {
        let g = GameState::from_fen("4k3/8/3N4/8/8/8/8/4K3 b - - 0 1").unwrap();
        assert!(g.is_in_check(Color::Black));
        assert!(!g.is_in_check(Color::White));
    }
}
