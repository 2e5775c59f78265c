use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::board::{Color, GameState, PieceKind};
use crate::errors::Result;
use crate::search::{Difficulty, SearchParams, Searcher};

#[derive(Clone, Debug)]
pub struct SelfPlayParams {
    pub games: usize,
    pub max_plies: usize,
    pub white: Difficulty,
    pub black: Difficulty,
    /// Root depth for both sides instead of the difficulty's.
    pub depth: Option<u32>,
    pub quiescence_depth: u32,
    pub seed: u64,
    /// Uniformly random moves played before the engines take over.
    pub random_plies: usize,
    /// Optional FEN/EPD list (one per line) to start games from.
    pub openings_path: Option<PathBuf>,
}

impl Default for SelfPlayParams {
    fn default() -> Self {
        Self {
            games: 10,
            max_plies: 200,
            white: Difficulty::Medium,
            black: Difficulty::Medium,
            depth: None,
            quiescence_depth: crate::search::alphabeta::DEFAULT_QUIESCENCE_DEPTH,
            seed: 42,
            random_plies: 0,
            openings_path: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Coordinate notation, e.g. "e2e4".
    pub moves: Vec<String>,
    /// "1-0", "0-1", "1/2-1/2", or "*" when the ply cap was hit.
    pub result: String,
    pub plies: usize,
    pub final_fen: String,
}

fn outcome(state: &mut GameState) -> Option<&'static str> {
    if state.is_checkmate() {
        return Some(match state.side_to_move() {
            Color::White => "0-1",
            Color::Black => "1-0",
        });
    }
    if state.is_stalemate() || state.halfmove_clock() >= 100 {
        return Some("1/2-1/2");
    }
    None
}

/// Play one engine-vs-engine game from `start`.
pub fn play_game<R: Rng>(start: GameState, params: &SelfPlayParams, rng: &mut R) -> GameRecord {
    let mut state = start;
    let mut searcher = Searcher::new(params.quiescence_depth);
    let mut moves = Vec::new();
    let result = loop {
        if let Some(r) = outcome(&mut state) {
            break r;
        }
        if moves.len() >= params.max_plies {
            break "*";
        }
        let mv = if moves.len() < params.random_plies {
            let legal = state.all_legal_moves();
            legal[rng.gen_range(0..legal.len())]
        } else {
            let difficulty = match state.side_to_move() {
                Color::White => params.white,
                Color::Black => params.black,
            };
            let depth = params.depth.unwrap_or_else(|| difficulty.search_depth());
            let sp = SearchParams { depth, difficulty, quiescence_depth: params.quiescence_depth };
            match searcher.search(&mut state, sp, rng).best {
                Some(mv) => mv,
                None => break "*",
            }
        };
        state.execute(&mv, PieceKind::Queen);
        moves.push(mv.to_string());
    };
    debug!("self-play game finished: {result} after {} plies", moves.len());
    GameRecord { plies: moves.len(), moves, result: result.to_string(), final_fen: state.to_fen() }
}

/// Play `params.games` games; `on_game` sees each record as it completes.
pub fn generate_games<F: FnMut(&GameRecord)>(params: &SelfPlayParams, mut on_game: F) -> Result<Vec<GameRecord>> {
    let mut rng = SmallRng::seed_from_u64(params.seed);
    let openings = load_openings(params)?;
    let mut games = Vec::with_capacity(params.games);
    for gi in 0..params.games {
        let start = if openings.is_empty() {
            GameState::new()
        } else {
            openings[gi % openings.len()].clone()
        };
        let record = play_game(start, params, &mut rng);
        on_game(&record);
        games.push(record);
    }
    Ok(games)
}

fn load_openings(params: &SelfPlayParams) -> Result<Vec<GameState>> {
    let Some(path) = params.openings_path.as_ref() else { return Ok(Vec::new()) };
    let text = fs::read_to_string(path)?;
    let mut out = Vec::new();
    for line in text.lines() {
        let raw = line.trim();
        if raw.is_empty() || raw.starts_with('#') {
            continue;
        }
        match GameState::from_fen(raw) {
            Ok(state) => out.push(state),
            Err(e) => warn!("skipping opening line: {e}"),
        }
    }
    Ok(out)
}

/// One JSON object per line.
pub fn write_jsonl<P: AsRef<Path>>(games: &[GameRecord], path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let mut w = BufWriter::new(File::create(path)?);
    for g in games {
        serde_json::to_writer(&mut w, g)?;
        w.write_all(b"\n")?;
    }
    w.flush()?;
    Ok(())
}

pub fn read_jsonl<P: AsRef<Path>>(path: P) -> Result<Vec<GameRecord>> {
    let reader = BufReader::new(File::open(path)?);
    let mut games = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        games.push(serde_json::from_str(&line)?);
    }
    Ok(games)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finished_game_reports_the_mate() {
        // White mates in one from here.
        let start = GameState::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let params = SelfPlayParams { white: Difficulty::Hard, depth: Some(2), ..Default::default() };
        let mut rng = SmallRng::seed_from_u64(0);
        let rec = play_game(start, &params, &mut rng);
        assert_eq!(rec.result, "1-0");
        assert_eq!(rec.moves, vec!["a1a8".to_string()]);
        assert_eq!(rec.plies, 1);
        assert_eq!(rec.final_fen, "R5k1/5ppp/8/8/8/8/8/6K1 b - - 1 1");
    }

    #[test]
    fn ply_cap_leaves_the_game_open() {
        let params = SelfPlayParams { games: 1, max_plies: 2, random_plies: 2, ..Default::default() };
        let games = generate_games(&params, |_| {}).unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].result, "*");
        assert_eq!(games[0].plies, 2);
    }
}
