use checkmate::selfplay::{generate_games, write_jsonl, SelfPlayParams};
use checkmate::Difficulty;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "checkmate-selfplay", about = "Play engine-vs-engine games and write them as JSON lines")]
struct Args {
    #[arg(long, default_value_t = 10)]
    games: usize,
    #[arg(long, default_value_t = 200)]
    max_plies: usize,
    /// White's level (1-4)
    #[arg(long, default_value_t = 2)]
    white: i32,
    /// Black's level (1-4)
    #[arg(long, default_value_t = 2)]
    black: i32,
    /// Fixed root depth for both sides
    #[arg(long)]
    depth: Option<u32>,
    #[arg(long, default_value_t = 2)]
    quiescence_depth: u32,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Random opening plies before the engines start searching
    #[arg(long, default_value_t = 0)]
    random_plies: usize,
    #[arg(long)]
    openings: Option<PathBuf>,
    #[arg(long, default_value = "out/selfplay.jsonl")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    let params = SelfPlayParams {
        games: a.games,
        max_plies: a.max_plies,
        white: Difficulty::from_level(a.white),
        black: Difficulty::from_level(a.black),
        depth: a.depth,
        quiescence_depth: a.quiescence_depth,
        seed: a.seed,
        random_plies: a.random_plies,
        openings_path: a.openings,
    };
    eprintln!(
        "Generating {} games (white={}, black={}, depth={:?}, seed={})",
        a.games, params.white, params.black, a.depth, a.seed
    );

    let pb = ProgressBar::new(a.games as u64);
    pb.set_style(ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} [{elapsed_precise}] {msg}")?.progress_chars("##-"));
    let (mut white_wins, mut black_wins, mut draws) = (0usize, 0usize, 0usize);
    let games = generate_games(&params, |g| {
        match g.result.as_str() {
            "1-0" => white_wins += 1,
            "0-1" => black_wins += 1,
            "1/2-1/2" => draws += 1,
            _ => {}
        }
        pb.set_message(format!("+{white_wins} -{black_wins} ={draws}"));
        pb.inc(1);
    })?;
    pb.finish_with_message(format!("+{white_wins} -{black_wins} ={draws}"));

    write_jsonl(&games, &a.out)?;
    eprintln!("Wrote {} games to {}", games.len(), a.out.display());
    Ok(())
}
