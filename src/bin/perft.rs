use checkmate::board::PieceKind;
use checkmate::perft::{divide, perft};
use checkmate::GameState;

#[derive(clap::Parser, Debug)]
#[command(name = "perft", about = "Perft driver for the checkmate move generator")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// FEN string or "startpos"
    #[arg(value_name = "FEN", default_value = "startpos")]
    fen: String,
    /// Number of threads for root-split
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Report elapsed time and NPS
    #[arg(long, default_value_t = false)]
    nps: bool,
    /// Print the node count below each root move
    #[arg(long, default_value_t = false)]
    divide: bool,
}

fn main() -> anyhow::Result<()> {
    use clap::Parser;
    use rayon::prelude::*;
    use std::time::Instant;

    env_logger::init();
    let args = Args::parse();
    let depth = args.depth;

    let mut base = if args.fen == "startpos" { GameState::new() } else { GameState::from_fen(&args.fen)? };

    if args.divide {
        let parts = divide(&mut base, depth);
        for (mv, n) in &parts {
            println!("{mv}: {n}");
        }
        println!("\nmoves: {} nodes: {}", parts.len(), parts.iter().map(|(_, n)| n).sum::<u64>());
        return Ok(());
    }

    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build()?;
    let (nodes, dt) = pool.install(|| {
        let t0 = Instant::now();
        let nodes = if args.threads <= 1 || depth < 2 {
            perft(&mut base.clone(), depth)
        } else {
            let root_moves = base.clone().all_legal_moves();
            root_moves
                .par_iter()
                .map(|mv| {
                    let mut child = base.clone();
                    child.apply(mv, PieceKind::Queen);
                    perft(&mut child, depth - 1)
                })
                .sum()
        };
        (nodes, t0.elapsed().as_secs_f64())
    });

    if args.nps {
        println!("nodes: {nodes} elapsed: {:.3}s nps: {:.1}", dt, nodes as f64 / dt.max(f64::EPSILON));
    } else {
        println!("nodes: {nodes}");
    }
    Ok(())
}
