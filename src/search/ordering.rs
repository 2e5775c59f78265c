use crate::board::{GameState, PieceKind};
use crate::movegen::Move;
use crate::search::safety::destination_attacked_after;

const PROMOTION_BONUS: i32 = 800;
const CENTER_BONUS: i32 = 20;
const ATTACKED_PENALTY: i32 = 50;

#[inline]
fn is_center(row: u8, col: u8) -> bool {
    (3..=4).contains(&row) && (3..=4).contains(&col)
}

/// Heuristic ordering score; higher is searched first.
pub fn score_move(state: &mut GameState, mv: &Move) -> i32 {
    let attacker = state.board.get(mv.from).map_or(PieceKind::Pawn, |p| p.kind);
    let mut score = 0;
    if let Some(victim) = mv.captured {
        score += 10 * victim.kind.value() - attacker.value();
    }
    if mv.is_promotion {
        score += PROMOTION_BONUS;
    }
    if is_center(mv.to.row(), mv.to.col()) {
        score += CENTER_BONUS;
    }
    if destination_attacked_after(state, mv) {
        score -= ATTACKED_PENALTY;
    }
    score
}

/// Score every move and sort descending. The sort is stable, so equal
/// scores keep generation order.
pub fn order_moves(state: &mut GameState, moves: &mut [Move]) {
    for mv in moves.iter_mut() {
        mv.score = score_move(state, mv);
    }
    moves.sort_by(|a, b| b.score.cmp(&a.score));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn captures_of_big_pieces_come_first() {
        let mut g = GameState::from_fen("4k3/8/8/3q1r2/4P3/8/8/4K3 w - - 0 1").unwrap();
        let mut moves = g.all_legal_moves();
        order_moves(&mut g, &mut moves);
        assert_eq!(moves[0].to, sq("d5"));
        assert_eq!(moves[1].to, sq("f5"));
        assert!(moves.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn promotion_and_safety_terms() {
        let mut g = GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let promo = g.legal_moves(sq("a7"))[0];
        assert_eq!(score_move(&mut g, &promo), PROMOTION_BONUS);

        let mut g = GameState::from_fen("4k3/8/3p4/8/8/2N5/8/4K3 w - - 0 1").unwrap();
        let e4 = g.legal_moves(sq("c3")).into_iter().find(|m| m.to == sq("e4")).unwrap();
        // e4 is a centre square, guarded by nothing.
        assert_eq!(score_move(&mut g, &e4), CENTER_BONUS);
        let d5 = g.legal_moves(sq("c3")).into_iter().find(|m| m.to == sq("d5")).unwrap();
        assert_eq!(score_move(&mut g, &d5), CENTER_BONUS);
        let e2 = g.legal_moves(sq("c3")).into_iter().find(|m| m.to == sq("e2")).unwrap();
        assert_eq!(score_move(&mut g, &e2), 0);
    }

    #[test]
    fn stable_for_equal_scores() {
        let mut g = GameState::new();
        let generated = g.all_legal_moves();
        let mut ordered = generated.clone();
        order_moves(&mut g, &mut ordered);
        let quiet_edge: Vec<_> = generated.iter().filter(|m| m.to.col() == 0 || m.to.col() == 7).map(|m| m.to).collect();
        let ordered_edge: Vec<_> = ordered.iter().filter(|m| m.to.col() == 0 || m.to.col() == 7).map(|m| m.to).collect();
        assert_eq!(quiet_edge, ordered_edge);
    }
}
