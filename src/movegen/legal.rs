use crate::board::{GameState, Square, SquareLog};
use crate::movegen::Move;

impl GameState {
    /// Simulate the move's board effect, test whether the mover's king is
    /// left attacked, then restore the board from the square log. Only board
    /// squares are touched; turn, castling flags and en-passant target are not.
    pub fn is_legal_move(&mut self, mv: &Move) -> bool {
        let Some(piece) = self.board.get(mv.from) else { return false };
        let log = SquareLog::relocate(&mut self.board, mv, piece, false);
        let legal = !self.is_in_check(piece.color);
        log.restore(&mut self.board);
        legal
    }

    /// Legal moves of whatever piece stands on `from`, regardless of whose
    /// turn it is. Used for mobility, where each side is scored as if it
    /// were to move.
    pub fn legal_moves_of_piece(&mut self, from: Square) -> Vec<Move> {
        let mut moves = self.pseudo_legal_moves(from);
        moves.retain(|m| self.is_legal_move(m));
        moves
    }

    /// Legal moves from `from`; empty unless the square holds a piece of the
    /// side to move.
    pub fn legal_moves(&mut self, from: Square) -> Vec<Move> {
        match self.board.get(from) {
            Some(p) if p.color == self.side_to_move => self.legal_moves_of_piece(from),
            _ => Vec::new(),
        }
    }

    /// Every legal move of the side to move, in board scan order.
    pub fn all_legal_moves(&mut self) -> Vec<Move> {
        let side = self.side_to_move;
        let origins: Vec<Square> = self.board.pieces().filter(|(_, p)| p.color == side).map(|(sq, _)| sq).collect();
        let mut moves = Vec::with_capacity(48);
        for from in origins {
            moves.extend(self.legal_moves_of_piece(from));
        }
        moves
    }

    pub fn has_legal_move(&mut self) -> bool {
        let side = self.side_to_move;
        let origins: Vec<Square> = self.board.pieces().filter(|(_, p)| p.color == side).map(|(sq, _)| sq).collect();
        for from in origins {
            let pseudo = self.pseudo_legal_moves(from);
            if pseudo.iter().any(|m| self.is_legal_move(m)) {
                return true;
            }
        }
        false
    }

    /// The side to move has no legal move anywhere.
    pub fn is_game_over(&mut self) -> bool {
        !self.has_legal_move()
    }

    pub fn is_checkmate(&mut self) -> bool {
        self.is_game_over() && self.is_in_check(self.side_to_move)
    }

    pub fn is_stalemate(&mut self) -> bool {
        self.is_game_over() && !self.is_in_check(self.side_to_move)
    }
}
