use log::debug;
use rand::Rng;

use crate::board::{Color, GameState, PieceKind};
use crate::movegen::Move;
use crate::search::difficulty::Difficulty;
use crate::search::eval::{evaluate_relative, DRAW_SCORE, MATE_SCORE};
use crate::search::noise::{coin_flip, difficulty_noise};
use crate::search::ordering::order_moves;

/// Wider than any reachable score, used as the full window.
pub const INFINITY: i32 = MATE_SCORE + 1;
pub const DEFAULT_QUIESCENCE_DEPTH: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    pub depth: u32,
    pub difficulty: Difficulty,
    pub quiescence_depth: u32,
}

impl SearchParams {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self { depth: difficulty.search_depth(), difficulty, quiescence_depth: DEFAULT_QUIESCENCE_DEPTH }
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::default())
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub best: Option<Move>,
    /// White-positive score of the chosen move, noise excluded.
    pub score: i32,
    pub nodes: u64,
}

/// Alpha-beta searcher. Internally every node is scored for the side to
/// move and the sign flips each ply; the public entry points speak the
/// White-positive convention.
pub struct Searcher {
    pub(crate) nodes: u64,
    quiescence_depth: u32,
}

impl Default for Searcher {
    fn default() -> Self {
        Self { nodes: 0, quiescence_depth: DEFAULT_QUIESCENCE_DEPTH }
    }
}

#[inline]
fn white_positive(side: Color, relative: i32) -> i32 {
    if side == Color::White { relative } else { -relative }
}

impl Searcher {
    pub fn new(quiescence_depth: u32) -> Self {
        Self { nodes: 0, quiescence_depth }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn quiescence_depth(&self) -> u32 {
        self.quiescence_depth
    }

    /// Minimax value of `state`, positive favours White. `maximizing` must
    /// be true exactly when White is to move.
    pub fn minimax(&mut self, state: &mut GameState, depth: u32, alpha: i32, beta: i32, maximizing: bool) -> i32 {
        debug_assert_eq!(maximizing, state.side_to_move() == Color::White);
        if maximizing {
            self.negamax(state, depth, alpha, beta, 0)
        } else {
            -self.negamax(state, depth, -beta, -alpha, 0)
        }
    }

    /// Capture/promotion-only search below the horizon, White-positive.
    pub fn quiescence(&mut self, state: &mut GameState, alpha: i32, beta: i32, depth_limit: u32) -> i32 {
        if state.side_to_move() == Color::White {
            self.qsearch(state, alpha, beta, depth_limit)
        } else {
            -self.qsearch(state, -beta, -alpha, depth_limit)
        }
    }

    /// Full-window quiescence value with the configured depth limit.
    pub fn qsearch_eval(&mut self, state: &mut GameState) -> i32 {
        let limit = self.quiescence_depth;
        self.quiescence(state, -INFINITY, INFINITY, limit)
    }

    fn negamax(&mut self, state: &mut GameState, depth: u32, mut alpha: i32, beta: i32, ply: i32) -> i32 {
        self.nodes += 1;
        if depth == 0 {
            let limit = self.quiescence_depth;
            return self.qsearch(state, alpha, beta, limit);
        }
        let mut moves = state.all_legal_moves();
        if moves.is_empty() {
            return terminal_score(state, ply);
        }
        order_moves(state, &mut moves);

        let mut best = -INFINITY;
        for mv in &moves {
            let undo = state.apply(mv, PieceKind::Queen);
            let score = -self.negamax(state, depth - 1, -beta, -alpha, ply + 1);
            state.undo(undo);
            if score > best {
                best = score;
            }
            if best > alpha {
                alpha = best;
            }
            if alpha >= beta {
                break;
            }
        }
        best
    }

    fn qsearch(&mut self, state: &mut GameState, mut alpha: i32, beta: i32, depth_limit: u32) -> i32 {
        self.nodes += 1;
        // Stand pat
        let stand = evaluate_relative(state);
        if depth_limit == 0 {
            return stand;
        }
        if stand >= beta {
            return beta;
        }
        if stand > alpha {
            alpha = stand;
        }

        let mut tactical: Vec<Move> = state.all_legal_moves().into_iter().filter(Move::is_tactical).collect();
        order_moves(state, &mut tactical);
        for mv in &tactical {
            let undo = state.apply(mv, PieceKind::Queen);
            let score = -self.qsearch(state, -beta, -alpha, depth_limit - 1);
            state.undo(undo);
            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }
        alpha
    }

    /// Pick a move for the side to move. Every ordered root move is searched
    /// with a full window; difficulty noise is added to the mover's score
    /// and exact ties are settled by a coin flip.
    pub fn search<R: Rng + ?Sized>(&mut self, state: &mut GameState, params: SearchParams, rng: &mut R) -> SearchResult {
        self.nodes = 0;
        self.quiescence_depth = params.quiescence_depth;
        let side = state.side_to_move();
        let depth = params.depth.max(1);

        let mut moves = state.all_legal_moves();
        if moves.is_empty() {
            let score = white_positive(side, terminal_score(state, 0));
            debug!("search: no legal move for {side}, score {score}");
            return SearchResult { best: None, score, nodes: self.nodes };
        }
        order_moves(state, &mut moves);

        let mut best: Option<(Move, i32, i32)> = None;
        for mv in &moves {
            let undo = state.apply(mv, PieceKind::Queen);
            let raw = -self.negamax(state, depth - 1, -INFINITY, INFINITY, 1);
            state.undo(undo);
            let noisy = raw + difficulty_noise(params.difficulty, rng);
            let take = match best {
                None => true,
                Some((_, _, b)) if noisy > b => true,
                Some((_, _, b)) if noisy == b => coin_flip(rng),
                _ => false,
            };
            if take {
                best = Some((*mv, raw, noisy));
            }
        }

        let (best, raw) = match best {
            Some((mv, raw, _)) => (Some(mv), raw),
            None => (None, DRAW_SCORE),
        };
        let score = white_positive(side, raw);
        debug!(
            "search: {side} depth {depth} ({}) nodes {} score {score} best {}",
            params.difficulty,
            self.nodes,
            best.map_or_else(|| "-".to_string(), |m| m.to_string())
        );
        SearchResult { best, score, nodes: self.nodes }
    }

    pub fn best_move<R: Rng + ?Sized>(&mut self, state: &mut GameState, depth: u32, difficulty: Difficulty, rng: &mut R) -> Option<Move> {
        let params = SearchParams { depth, difficulty, quiescence_depth: self.quiescence_depth };
        self.search(state, params, rng).best
    }
}

/// Score of a node without legal moves, for the side to move: mated
/// (sooner is worse) or stalemate.
fn terminal_score(state: &GameState, ply: i32) -> i32 {
    if state.is_in_check(state.side_to_move()) {
        -(MATE_SCORE - ply)
    } else {
        DRAW_SCORE
    }
}
