use anyhow::Result;
use checkmate::board::fen::STARTPOS_FEN;
use checkmate::movegen::parse_coordinate_move;
use checkmate::{Color, Engine, EngineConfig, GameState, PieceKind};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play chess against the checkmate engine", long_about = None)]
struct Args {
    /// Engine level: 1 easy, 2 medium, 3 hard, 4 expert
    #[arg(long)]
    difficulty: Option<i32>,

    /// Your color: 'w' for white, 'b' for black, 'n' to watch the engine play itself
    #[arg(long, default_value = "w")]
    color: String,

    /// Seed for the engine's move choice
    #[arg(long)]
    seed: Option<u64>,

    /// Starting FEN position
    #[arg(long)]
    fen: Option<String>,

    /// JSON engine config; --difficulty and --seed override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print search statistics
    #[arg(long)]
    verbose: bool,
}

fn parse_color(color_str: &str) -> Result<Option<Color>> {
    match color_str.to_lowercase().as_str() {
        "w" | "white" => Ok(Some(Color::White)),
        "b" | "black" => Ok(Some(Color::Black)),
        "n" | "none" => Ok(None),
        _ => anyhow::bail!("Invalid color: use 'w', 'b' or 'n'"),
    }
}

/// Read moves until the user types a legal one. `None` on end of input or "quit".
fn get_human_move(engine: &mut Engine) -> Result<Option<(i32, i32, i32, i32, PieceKind)>> {
    loop {
        print!("Enter your move (e.g., e2e4): ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(None);
        }
        let input = input.trim();
        if input == "quit" || input == "q" {
            return Ok(None);
        }

        match parse_coordinate_move(input) {
            Ok((from, to, promo)) => {
                let (fr, fc) = (from.row() as i32, from.col() as i32);
                let targets = engine.legal_moves(fr, fc);
                let (tr, tc) = (to.row() as i32, to.col() as i32);
                if targets.chunks(2).any(|t| t[0] == tr && t[1] == tc) {
                    return Ok(Some((fr, fc, tr, tc, promo.unwrap_or(PieceKind::Queen))));
                }
                println!("Illegal move!");
            }
            Err(e) => println!("{e}"),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let human_color = parse_color(&args.color)?;

    let mut cfg = match &args.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(level) = args.difficulty {
        cfg.difficulty = level.clamp(1, 4);
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }

    let start = match &args.fen {
        Some(fen) => GameState::from_fen(fen)?,
        None => GameState::from_fen(STARTPOS_FEN)?,
    };
    let mut engine = Engine::from_config(&cfg).with_state(start);
    println!("Difficulty: {}", engine.difficulty());

    loop {
        if engine.is_game_over() {
            println!("\n{}", engine.state().board());
            if engine.is_checkmate() {
                println!("\nCheckmate! {} wins!", !engine.current_player());
            } else {
                println!("\nGame is a stalemate!");
            }
            break;
        }

        let side = engine.current_player();
        println!("\n{side}'s turn");
        println!("\n{}", engine.state().board());
        if engine.is_in_check() {
            println!("{side} is in check.");
        }

        if human_color == Some(side) {
            let Some((fr, fc, tr, tc, promo)) = get_human_move(&mut engine)? else {
                println!("Bye.");
                break;
            };
            if !engine.make_move_with_promotion(fr, fc, tr, tc, promo) {
                println!("Illegal move!");
            }
        } else {
            if args.verbose {
                println!("Thinking...");
            }
            let start_time = Instant::now();
            let result = engine.search();
            let elapsed = start_time.elapsed();

            if args.verbose {
                let nps = result.nodes as f32 / elapsed.as_secs_f32().max(f32::EPSILON);
                println!(
                    "nodes: {}, score: {}, elapsed: {:.2}s, NPS: {:.0}",
                    result.nodes,
                    result.score,
                    elapsed.as_secs_f32(),
                    nps
                );
            }

            let Some(best_move) = result.best else {
                println!("No legal moves available!");
                break;
            };
            println!("Computer plays: {best_move}");
            let [fr, fc, tr, tc] = best_move.coords();
            if !engine.make_move(fr, fc, tr, tc) {
                anyhow::bail!("engine produced an illegal move {best_move}");
            }
        }
    }

    Ok(())
}
