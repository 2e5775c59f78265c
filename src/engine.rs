//! Session object for a host application: one game, one difficulty, one
//! RNG. Coordinates are raw `(row, col)` integers; anything off the board
//! answers with an empty list, `0` or `false` rather than an error.

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::{Color, GameState, PieceKind, Square};
use crate::config::EngineConfig;
use crate::movegen::Move;
use crate::search::{Difficulty, SearchParams, SearchResult, Searcher};

pub struct Engine {
    state: GameState,
    difficulty: Difficulty,
    depth_override: Option<u32>,
    searcher: Searcher,
    rng: SmallRng,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }

    /// Deterministic move choice for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    pub fn from_config(cfg: &EngineConfig) -> Self {
        let mut engine = match cfg.seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        };
        engine.difficulty = cfg.difficulty();
        engine.depth_override = cfg.depth_override;
        engine.searcher = Searcher::new(cfg.quiescence_depth);
        info!(
            "engine configured: difficulty {}, quiescence depth {}, depth override {:?}",
            engine.difficulty, cfg.quiescence_depth, engine.depth_override
        );
        engine
    }

    fn with_rng(rng: SmallRng) -> Self {
        Self {
            state: GameState::new(),
            difficulty: Difficulty::default(),
            depth_override: None,
            searcher: Searcher::default(),
            rng,
        }
    }

    /// Continue from an arbitrary position (e.g. parsed from FEN).
    pub fn with_state(mut self, state: GameState) -> Self {
        self.state = state;
        self
    }

    /// Discard the current game and start from the standard position.
    pub fn init_game(&mut self) {
        self.state = GameState::new();
        info!("new game, difficulty {}", self.difficulty);
    }

    pub fn set_difficulty(&mut self, level: i32) {
        self.difficulty = Difficulty::from_level(level);
        debug!("difficulty set to {} (requested level {level})", self.difficulty);
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn piece_at(&self, row: i32, col: i32) -> i32 {
        self.state.piece_at(row, col)
    }

    /// Destinations of the piece on `(row, col)` as flat `row, col` pairs.
    pub fn legal_moves(&mut self, row: i32, col: i32) -> Vec<i32> {
        let Some(from) = Square::new(row, col) else { return Vec::new() };
        self.state
            .legal_moves(from)
            .iter()
            .flat_map(|m| [m.to.row() as i32, m.to.col() as i32])
            .collect()
    }

    /// Play a move if legal; promotions become queens.
    pub fn make_move(&mut self, from_row: i32, from_col: i32, to_row: i32, to_col: i32) -> bool {
        self.make_move_with_promotion(from_row, from_col, to_row, to_col, PieceKind::Queen)
    }

    pub fn make_move_with_promotion(
        &mut self,
        from_row: i32,
        from_col: i32,
        to_row: i32,
        to_col: i32,
        promotion: PieceKind,
    ) -> bool {
        match (Square::new(from_row, from_col), Square::new(to_row, to_col)) {
            (Some(from), Some(to)) => self.state.make_move_with_promotion(from, to, promotion),
            _ => {
                debug!("rejected off-board move ({from_row},{from_col}) -> ({to_row},{to_col})");
                false
            }
        }
    }

    fn search_params(&self) -> SearchParams {
        SearchParams {
            depth: self.depth_override.unwrap_or_else(|| self.difficulty.search_depth()),
            difficulty: self.difficulty,
            quiescence_depth: self.searcher.quiescence_depth(),
        }
    }

    /// Full search report for the side to move. The game is not advanced.
    pub fn search(&mut self) -> SearchResult {
        let params = self.search_params();
        self.searcher.search(&mut self.state, params, &mut self.rng)
    }

    pub fn best_move(&mut self) -> Option<Move> {
        self.search().best
    }

    /// The engine's choice as `[from_row, from_col, to_row, to_col]`, or
    /// all `-1` when the side to move has no legal move. Not played.
    pub fn computer_move(&mut self) -> [i32; 4] {
        self.best_move().map_or(Move::NONE_COORDS, |m| m.coords())
    }

    pub fn current_player(&self) -> Color {
        self.state.side_to_move()
    }

    pub fn is_game_over(&mut self) -> bool {
        self.state.is_game_over()
    }

    pub fn is_checkmate(&mut self) -> bool {
        self.state.is_checkmate()
    }

    pub fn is_stalemate(&mut self) -> bool {
        self.state.is_stalemate()
    }

    /// Whether the side to move is in check.
    pub fn is_in_check(&self) -> bool {
        self.state.is_in_check(self.state.side_to_move())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn boundary_sentinels() {
        let mut e = Engine::with_seed(1);
        assert_eq!(e.piece_at(8, 0), 0);
        assert_eq!(e.piece_at(-1, 3), 0);
        assert_eq!(e.piece_at(7, 4), 16);
        assert_eq!(e.piece_at(0, 3), 25);
        assert!(e.legal_moves(9, 9).is_empty());
        assert!(!e.make_move(6, 4, 8, 4));
        assert_eq!(e.current_player(), Color::White);
    }

    #[test]
    fn pawn_and_king_from_start() {
        let mut e = Engine::with_seed(1);
        assert_eq!(e.legal_moves(6, 4), vec![5, 4, 4, 4]);
        assert!(e.legal_moves(7, 4).is_empty());
        assert!(e.make_move(6, 4, 4, 4));
        assert_eq!(e.current_player(), Color::Black);
        assert_eq!(e.state().en_passant(), Some(Square::at(5, 4)));
    }

    #[test]
    fn computer_move_does_not_play() {
        let mut e = Engine::with_seed(5);
        e.set_difficulty(1);
        let before = e.state().clone();
        let mv = e.computer_move();
        assert_ne!(mv, Move::NONE_COORDS);
        assert_eq!(e.state(), &before);
        assert!(e.make_move(mv[0], mv[1], mv[2], mv[3]));
    }

    #[test]
    fn init_game_resets() {
        let mut e = Engine::with_seed(2);
        assert!(e.make_move(6, 3, 4, 3));
        e.init_game();
        assert_eq!(e.state(), &GameState::new());
    }

    #[test]
    fn config_applies() {
        let cfg = EngineConfig { difficulty: 3, seed: Some(11), quiescence_depth: 1, depth_override: Some(1) };
        let e = Engine::from_config(&cfg);
        assert_eq!(e.difficulty(), Difficulty::Hard);
        assert_eq!(e.search_params().depth, 1);
        assert_eq!(e.search_params().quiescence_depth, 1);
    }
}
