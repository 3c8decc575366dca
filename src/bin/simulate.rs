//! Headless simulation on the demonstration board.
//!
//! ```text
//! simulate [--config PATH] [--seed N] [--frames N] [--manual]
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use pacmann::config::GameConfig;
use pacmann::constants::{DEMO_BOARD, FRAME_DURATION_MS};
use pacmann::entity::PlayerStrategy;
use pacmann::game::{Game, GameEvent};
use pacmann::logging::setup_logging;
use pacmann::map::{BoardParser, MazeGraph};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(about = "Runs a headless Pac-Mann game on the demonstration board")]
struct Args {
    /// JSON file overriding the default tuning values.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, default_value_t = 3_600)]
    frames: usize,
    /// Use the manual strategy. Without commands Pac-Mann runs straight until it hits a wall.
    #[arg(long)]
    manual: bool,
}

/// A gentle repeating slope so that edge weights vary across the board.
fn demo_elevation() -> Vec<String> {
    DEMO_BOARD
        .iter()
        .enumerate()
        .map(|(row, line)| {
            (0..line.chars().count())
                .map(|column| char::from(b'0' + ((column + 2 * row) % 7) as u8))
                .collect()
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    setup_logging();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            GameConfig::from_json(&json).with_context(|| format!("parsing {}", path.display()))?
        }
        None => GameConfig::default(),
    };
    let strategy = if args.manual {
        PlayerStrategy::Manual
    } else {
        PlayerStrategy::Ai
    };

    let grid = BoardParser::parse_with_elevation(&DEMO_BOARD, &demo_elevation())?;
    let graph = MazeGraph::new(&grid)?;
    let mut game = Game::new(graph, strategy, config, StdRng::seed_from_u64(args.seed))?;
    game.populate_items();

    let mut score = 0;
    let mut captures = 0;
    for frame in 0..args.frames {
        for event in game.update_actors(FRAME_DURATION_MS) {
            debug!(frame, ?event, "Event");
            match event {
                GameEvent::ItemEaten { item, .. } => score += item.score(),
                GameEvent::PlayerCaught(_) => captures += 1,
                _ => {}
            }
        }
        if game.items().is_empty() {
            info!(frame, "Board cleared");
            break;
        }
    }

    info!(
        score,
        captures,
        remaining = game.items().len(),
        seed = args.seed,
        "Simulation finished"
    );
    Ok(())
}
