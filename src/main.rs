use clap::Parser;
use env_logger::Env;
use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};
use slide_2048::engine::Direction;
use slide_2048::{Board, BoardConfig};

#[derive(Debug, Parser)]
#[command(name = "slide-2048", about = "Play one 2048 game with random moves, printing every board")]
struct Args {
    /// Seed for tile spawns and move choice (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Grid dimension
    #[arg(long, default_value_t = 4)]
    size: usize,

    /// Stop after this many moves
    #[arg(long)]
    max_moves: Option<u64>,

    /// Keep playing after reaching 2048
    #[arg(long)]
    keep_playing: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = BoardConfig { size: args.size, seed: args.seed };
    let mut board = Board::from_config(&config)?;
    let mut chooser = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_entropy(),
    };
    println!("{}", board);

    let mut move_count: u64 = 0;
    while !board.is_terminated() {
        if args.max_moves.is_some_and(|limit| move_count >= limit) {
            break;
        }
        let dir = Direction::ALL[chooser.gen_range(0..Direction::ALL.len())];
        let outcome = board.move_tiles(dir);
        move_count += 1;
        if !outcome.moved {
            continue;
        }
        println!("{dir}:{}", board);
        if outcome.won && args.keep_playing && !board.keep_playing() {
            board.set_keep_playing(true);
        }
    }

    info!(
        "moves attempted: {}, score: {}, highest tile: {}",
        move_count,
        board.score(),
        board.highest_tile()
    );
    Ok(())
}
