// Mailbox chess engine: rules, alpha-beta search and a host-facing session
pub mod board;
pub mod config;
pub mod engine;
pub mod errors;
pub mod movegen;
pub mod perft;
pub mod search;
pub mod selfplay;

pub use board::{Color, GameState, Piece, PieceKind, Square};
pub use config::EngineConfig;
pub use engine::Engine;
pub use errors::{ChessError, Result};
pub use movegen::Move;
pub use search::{Difficulty, SearchParams, SearchResult, Searcher};
