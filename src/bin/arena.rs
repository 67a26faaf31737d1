use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use serde::Serialize;

use connect_four_minimax::ai::{build_computer_player, MinimaxConfig, Player, PlayerKind};
use connect_four_minimax::config::AppConfig;
use connect_four_minimax::game::{Game, GameState, GameStatus, Mark};

/// Play a series of headless matches between two computer players.
#[derive(Parser)]
#[command(name = "arena", about = "Pit two Connect Four engines against each other")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// First engine (plays X in even-numbered games)
    #[arg(long, value_enum, default_value = "minimax")]
    a: PlayerKind,

    /// Second engine
    #[arg(long, value_enum, default_value = "random")]
    b: PlayerKind,

    /// Search depth for engine A, if it is minimax
    #[arg(long)]
    depth_a: Option<usize>,

    /// Search depth for engine B, if it is minimax
    #[arg(long)]
    depth_b: Option<usize>,

    /// Number of games to play
    #[arg(long, default_value_t = 100)]
    games: usize,

    /// Swap colors every game instead of A always moving first
    #[arg(long)]
    alternate: bool,

    /// Base seed for random engines
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Emit the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Default, Serialize)]
struct Summary {
    games: usize,
    a_wins: usize,
    b_wins: usize,
    draws: usize,
    average_moves: f64,
    elapsed_ms: u128,
}

fn engine(
    kind: PlayerKind,
    minimax: &MinimaxConfig,
    depth: Option<usize>,
    seed: u64,
) -> Result<Box<dyn Player>> {
    let mut minimax = minimax.clone();
    if let Some(depth) = depth {
        minimax.depth = depth;
    }
    build_computer_player(kind, &minimax, Some(seed))
        .with_context(|| format!("no computer player for {kind:?}"))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if cli.games == 0 {
        bail!("--games must be at least 1");
    }
    for kind in [cli.a, cli.b] {
        if !kind.is_computer() {
            bail!("the arena only runs computer players, got {kind:?}");
        }
    }
    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    let start = Instant::now();
    let mut summary = Summary {
        games: cli.games,
        ..Summary::default()
    };
    let mut total_moves = 0;

    for game_idx in 0..cli.games {
        let seed = cli.seed.wrapping_add(2 * game_idx as u64);
        let a = engine(cli.a, &config.minimax, cli.depth_a, seed)?;
        let b = engine(cli.b, &config.minimax, cli.depth_b, seed.wrapping_add(1))?;
        let a_mark = if cli.alternate && game_idx % 2 == 1 {
            Mark::O
        } else {
            Mark::X
        };
        let (x, o) = match a_mark {
            Mark::X => (a, b),
            Mark::O => (b, a),
        };

        let board = config.board.build()?;
        let mut game = Game::from_state(GameState::new(board, Mark::X), x, o);
        let status = game
            .run()
            .with_context(|| format!("game {} aborted", game_idx + 1))?;
        total_moves += game.history().len();

        match status {
            GameStatus::Won(mark) if mark == a_mark => summary.a_wins += 1,
            GameStatus::Won(_) => summary.b_wins += 1,
            _ => summary.draws += 1,
        }
        info!("game {}: {:?}", game_idx + 1, status);
    }

    summary.average_moves = total_moves as f64 / cli.games as f64;
    summary.elapsed_ms = start.elapsed().as_millis();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{} games: {:?} vs {:?}", summary.games, cli.a, cli.b);
        println!("  A wins:  {}", summary.a_wins);
        println!("  B wins:  {}", summary.b_wins);
        println!("  draws:   {}", summary.draws);
        println!("  average moves per game: {:.1}", summary.average_moves);
        println!("  elapsed: {} ms", summary.elapsed_ms);
    }
    Ok(())
}
