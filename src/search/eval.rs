use crate::board::{Color, GameState, PieceKind, Square};
use crate::search::pst::{self, Phase};

/// Per legal move of each piece.
pub const MOBILITY_WEIGHT: i32 = 2;
/// Applied to a side in check, outside the endgame.
pub const CHECK_PENALTY: i32 = 50;
/// Endgame once fewer than this many non-king pieces are left.
pub const ENDGAME_PIECES: usize = 12;

// Mate scoring helpers
pub const MATE_SCORE: i32 = 999_999;
pub const DRAW_SCORE: i32 = 0;

pub fn phase(state: &GameState) -> Phase {
    if state.board().non_king_count() < ENDGAME_PIECES { Phase::Endgame } else { Phase::Middlegame }
}

pub fn is_endgame(state: &GameState) -> bool {
    phase(state) == Phase::Endgame
}

// Side-agnostic material in centipawns: positive means White has more material.
pub fn material(state: &GameState) -> i32 {
    state
        .board()
        .pieces()
        .filter(|(_, p)| p.kind != PieceKind::King)
        .map(|(_, p)| signed(p.color, p.kind.value()))
        .sum()
}

/// Static evaluation, positive favours White: material, piece-square
/// bonuses, mobility and a king-in-check term outside the endgame.
pub fn evaluate(state: &mut GameState) -> i32 {
    let phase = phase(state);
    let pieces: Vec<_> = state.board().pieces().collect();
    let mut score = 0;
    for (sq, piece) in pieces {
        let mut value = piece.kind.value() + pst::value(piece.kind, piece.color, sq, phase);
        value += MOBILITY_WEIGHT * mobility(state, sq);
        score += signed(piece.color, value);
    }
    if phase == Phase::Middlegame {
        if state.is_in_check(Color::White) {
            score -= CHECK_PENALTY;
        }
        if state.is_in_check(Color::Black) {
            score += CHECK_PENALTY;
        }
    }
    score
}

/// Evaluation from the side to move's perspective (negamax-friendly).
pub fn evaluate_relative(state: &mut GameState) -> i32 {
    let side = state.side_to_move();
    signed(side, evaluate(state))
}

/// Legal move count of the piece on `sq`, as if its side were to move.
fn mobility(state: &mut GameState, sq: Square) -> i32 {
    state.legal_moves_of_piece(sq).len() as i32
}

#[inline]
fn signed(color: Color, v: i32) -> i32 {
    match color {
        Color::White => v,
        Color::Black => -v,
    }
}
