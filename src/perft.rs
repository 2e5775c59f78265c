use crate::board::{GameState, PieceKind};
use crate::movegen::Move;

/// Leaf count of the legal move tree, using apply/undo (no cloning).
pub fn perft(state: &mut GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = state.all_legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0u64;
    for mv in &moves {
        let undo = state.apply(mv, PieceKind::Queen);
        nodes += perft(state, depth - 1);
        state.undo(undo);
    }
    nodes
}

/// Per-root-move breakdown of `perft(depth)`, in generation order.
pub fn divide(state: &mut GameState, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let moves = state.all_legal_moves();
    let mut out = Vec::with_capacity(moves.len());
    for mv in moves {
        let undo = state.apply(&mv, PieceKind::Queen);
        let n = perft(state, depth - 1);
        state.undo(undo);
        out.push((mv, n));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shallow_start_counts() {
        let mut g = GameState::new();
        assert_eq!(perft(&mut g, 0), 1);
        assert_eq!(perft(&mut g, 1), 20);
        assert_eq!(perft(&mut g, 2), 400);
    }

    #[test]
    fn divide_sums_to_perft() {
        let mut g = GameState::new();
        let parts = divide(&mut g, 2);
        assert_eq!(parts.len(), 20);
        assert_eq!(parts.iter().map(|(_, n)| n).sum::<u64>(), 400);
        assert_eq!(g, GameState::new());
    }
}
