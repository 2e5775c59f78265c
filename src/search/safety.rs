use crate::board::{GameState, SquareLog};
use crate::movegen::attacks::is_square_attacked;
use crate::movegen::Move;

/// Returns true if, after moving the piece from `mv.from` to `mv.to` on the
/// board alone, the opponent attacks `mv.to`. Turn, flags and en-passant
/// target are untouched and the board is restored before returning.
pub fn destination_attacked_after(state: &mut GameState, mv: &Move) -> bool {
    let Some(piece) = state.board.get(mv.from) else { return false };
    let log = SquareLog::relocate(&mut state.board, mv, piece, false);
    let attacked = is_square_attacked(&state.board, mv.to, !piece.color);
    log.restore(&mut state.board);
    attacked
}
