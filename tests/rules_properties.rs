use checkmate::board::{CastlingRights, Color, Square};
use checkmate::movegen::Move;
use checkmate::GameState;
use pretty_assertions::assert_eq;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const PLAYOUTS: u64 = 12;
const MAX_PLIES: usize = 80;

fn flags(c: CastlingRights) -> [bool; 6] {
    [
        c.white_king_moved,
        c.black_king_moved,
        c.white_rook_a_moved,
        c.white_rook_h_moved,
        c.black_rook_a_moved,
        c.black_rook_h_moved,
    ]
}

fn origins(g: &GameState) -> Vec<Square> {
    g.board().pieces().map(|(sq, _)| sq).collect()
}

/// Random legal playout; `visit` sees each position before the move is
/// played together with the chosen move.
fn playout<F: FnMut(&mut GameState, &Move)>(seed: u64, start: &str, mut visit: F) -> GameState {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut g = GameState::from_fen(start).unwrap();
    for _ in 0..MAX_PLIES {
        let moves = g.all_legal_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.gen_range(0..moves.len())];
        visit(&mut g, &mv);
        assert!(g.make_move(mv.from, mv.to), "legal move {mv} rejected");
    }
    g
}

const STARTS: [&str; 3] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "r3k2r/8/8/3pP3/8/8/8/R3K2R w KQkq d6 0 1",
];

#[test]
fn legality_test_leaves_state_identical() {
    for (i, start) in STARTS.iter().enumerate() {
        playout(100 + i as u64, start, |g, _| {
            let snapshot = g.clone();
            for from in origins(g) {
                for mv in g.pseudo_legal_moves(from) {
                    g.is_legal_move(&mv);
                    assert_eq!(*g, snapshot);
                }
            }
        });
    }
}

#[test]
fn turn_alternates_and_history_grows() {
    for seed in 0..PLAYOUTS {
        let mut plies = 0;
        let end = playout(seed, STARTS[0], |g, _| {
            let expected = if plies % 2 == 0 { Color::White } else { Color::Black };
            assert_eq!(g.side_to_move(), expected);
            assert_eq!(g.history().len(), plies);
            plies += 1;
        });
        assert_eq!(end.history().len(), plies);
    }
}

#[test]
fn castling_flags_never_reset() {
    for seed in 0..PLAYOUTS {
        let mut last = flags(GameState::new().castling());
        let end = playout(seed, STARTS[1 + (seed as usize % 2)], |g, _| {
            let now = flags(g.castling());
            for (was, is) in last.iter().zip(now.iter()) {
                assert!(!was || *is, "castling flag went back to false");
            }
            last = now;
        });
        let now = flags(end.castling());
        assert!(last.iter().zip(now.iter()).all(|(was, is)| !was || *is));
    }
}

#[test]
fn en_passant_target_only_after_double_push() {
    for seed in 0..PLAYOUTS {
        let mut g = GameState::new();
        let mut rng = SmallRng::seed_from_u64(seed);
        for _ in 0..MAX_PLIES {
            let moves = g.all_legal_moves();
            if moves.is_empty() {
                break;
            }
            let mv = moves[rng.gen_range(0..moves.len())];
            let was_pawn = g.board().get(mv.from).map(|p| p.kind) == Some(checkmate::PieceKind::Pawn);
            g.make_move(mv.from, mv.to);
            let double = was_pawn && mv.from.row().abs_diff(mv.to.row()) == 2;
            if double {
                let mid = Square::at((mv.from.row() + mv.to.row()) / 2, mv.from.col());
                assert_eq!(g.en_passant(), Some(mid));
            } else {
                assert_eq!(g.en_passant(), None);
            }
        }
    }
}

#[test]
fn no_legal_move_leaves_own_king_attacked() {
    for seed in 0..PLAYOUTS {
        playout(200 + seed, STARTS[(seed % 3) as usize], |g, _| {
            let side = g.side_to_move();
            for mv in g.all_legal_moves() {
                let mut child = g.clone();
                child.apply(&mv, checkmate::PieceKind::Queen);
                assert!(!child.is_in_check(side), "{mv} leaves {side} in check");
            }
        });
    }
}

#[test]
fn terminal_predicates_agree() {
    for seed in 0..PLAYOUTS {
        let mut end = playout(300 + seed, STARTS[0], |_, _| {});
        let none = end.all_legal_moves().is_empty();
        assert_eq!(end.is_game_over(), none);
        let in_check = end.is_in_check(end.side_to_move());
        assert_eq!(end.is_checkmate(), none && in_check);
        assert_eq!(end.is_stalemate(), none && !in_check);
        assert!(!(end.is_checkmate() && end.is_stalemate()));
    }
}
