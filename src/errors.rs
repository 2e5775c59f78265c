use thiserror::Error;

/// Failures of the text, file and configuration surfaces. The board-facing API
/// never returns these; it answers with empty/zero/false sentinels instead.
#[derive(Debug, Error)]
pub enum ChessError {
    #[error("invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("invalid move text '{0}' (expected coordinates like e2e4 or e7e8q)")]
    InvalidMoveText(String),

    #[error("illegal move {0} in the current position")]
    IllegalMove(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ChessError>;

impl ChessError {
    pub(crate) fn fen(fen: &str, reason: impl Into<String>) -> Self {
        ChessError::InvalidFen { fen: fen.to_string(), reason: reason.into() }
    }
}
