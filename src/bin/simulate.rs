use clap::Parser;
use env_logger::Env;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;
use slide_2048::engine::{Direction, WIN_VALUE};
use slide_2048::{Board, BoardConfig};
use std::time::{Duration, Instant};

#[derive(Debug, Parser)]
#[command(name = "simulate", about = "Run many random-move 2048 games in parallel and check engine invariants")]
struct Args {
    /// Number of games to play
    #[arg(long, default_value_t = 1000)]
    games: u64,

    /// Base seed; game i uses seed + i
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Grid dimension
    #[arg(long, default_value_t = 4)]
    size: usize,

    /// Per-game cap on attempted moves
    #[arg(long, default_value_t = 100_000)]
    max_moves: u64,

    /// Suppress the progress bar
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct GameSummary {
    score: u64,
    highest_tile: u32,
    moves: u64,
    won: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    BoardConfig { size: args.size, seed: None }.validate()?;
    if args.games == 0 {
        anyhow::bail!("--games must be at least 1");
    }

    let pb = if !args.quiet {
        let pb = ProgressBar::new(args.games);
        pb.set_style(
            ProgressStyle::with_template("{spinner} {elapsed_precise} [{bar:40}] {pos}/{len} games")?
                .tick_chars("⠁⠃⠇⠧⠷⠿⠻⠟⠯⠷⠧⠇⠃"),
        );
        pb.enable_steady_tick(Duration::from_millis(120));
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    let summaries: Vec<GameSummary> = (0..args.games)
        .into_par_iter()
        .map(|i| {
            let summary = play_game(args.size, args.seed.wrapping_add(i), args.max_moves);
            if let Some(pb) = &pb { pb.inc(1); }
            summary
        })
        .collect::<anyhow::Result<_>>()?;
    if let Some(pb) = pb { pb.finish_and_clear(); }
    let elapsed = start.elapsed().as_secs_f64().max(1e-6);

    let games = summaries.len() as f64;
    let total_moves: u64 = summaries.iter().map(|s| s.moves).sum();
    let mean_score = summaries.iter().map(|s| s.score as f64).sum::<f64>() / games;
    let max_score = summaries.iter().map(|s| s.score).max().unwrap_or(0);
    let highest_tile = summaries.iter().map(|s| s.highest_tile).max().unwrap_or(0);
    let wins = summaries.iter().filter(|s| s.won).count();

    info!(
        "games: {} | moves/sec: {:.1} | mean score: {:.1} | max score: {} | highest tile: {} | reached {}: {:.2}%",
        summaries.len(),
        total_moves as f64 / elapsed,
        mean_score,
        max_score,
        highest_tile,
        WIN_VALUE,
        100.0 * wins as f64 / games,
    );
    Ok(())
}

/// Play one game with uniformly random directions, checking per-move invariants.
fn play_game(size: usize, seed: u64, max_moves: u64) -> anyhow::Result<GameSummary> {
    let mut board = Board::from_config(&BoardConfig { size, seed: Some(seed) })?;
    let mut chooser = StdRng::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15);
    let mut summary = GameSummary::default();

    while !board.is_terminated() && summary.moves < max_moves {
        let sum_before = board.tile_sum();
        let score_before = board.score();
        let dir = Direction::ALL[chooser.gen_range(0..Direction::ALL.len())];
        let outcome = board.move_tiles(dir);
        summary.moves += 1;

        if board.tile_sum() < sum_before {
            anyhow::bail!("seed {seed}: tile sum fell from {sum_before} to {} on {dir}", board.tile_sum());
        }
        if board.score() != score_before + outcome.score_delta {
            anyhow::bail!("seed {seed}: score {} does not match delta {}", board.score(), outcome.score_delta);
        }
        for tile in board.tiles() {
            if let Some((a, b)) = tile.merged_from() {
                let doubled = a.value() == b.value() && tile.value() == a.value() * 2;
                if !doubled || a.merged_from().is_some() || b.merged_from().is_some() {
                    anyhow::bail!("seed {seed}: bad merge lineage at {tile}");
                }
            }
        }
        if outcome.won && !board.keep_playing() {
            board.set_keep_playing(true);
            summary.won = true;
        }
    }
    if summary.moves >= max_moves {
        warn!("seed {seed}: stopped at move cap {max_moves}");
    }

    summary.score = board.score();
    summary.highest_tile = board.highest_tile();
    Ok(summary)
}
