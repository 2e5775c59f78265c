pub mod alphabeta;
pub mod difficulty;
pub mod eval;
pub mod noise;
pub mod ordering;
pub mod pst;
pub mod safety;

pub use alphabeta::{SearchParams, SearchResult, Searcher};
pub use difficulty::Difficulty;
pub use eval::{evaluate, MATE_SCORE};
