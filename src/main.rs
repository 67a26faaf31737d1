use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use connect_four_minimax::ai::{
    build_computer_player, HeuristicKind, HumanPlayer, MoveInput, Player, PlayerKind,
};
use connect_four_minimax::config::AppConfig;
use connect_four_minimax::error::{MoveError, PlayerError};
use connect_four_minimax::game::{Game, GameState, GameStatus, Mark};

/// Play Connect Four in the terminal.
#[derive(Parser)]
#[command(name = "connect-four", about = "Play Connect Four against a minimax engine")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Who plays X (moves first)
    #[arg(long, value_enum)]
    x: Option<PlayerKind>,

    /// Who plays O
    #[arg(long, value_enum)]
    o: Option<PlayerKind>,

    /// Override the minimax search depth in plies
    #[arg(long)]
    depth: Option<usize>,

    /// Disable alpha-beta pruning
    #[arg(long)]
    no_pruning: bool,

    /// Override the minimax evaluation function
    #[arg(long, value_enum)]
    heuristic: Option<HeuristicKind>,

    /// Seed for random players
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    rows: Option<usize>,

    #[arg(long)]
    cols: Option<usize>,

    /// Discs in a row needed to win
    #[arg(long)]
    connect: Option<usize>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

/// Reads 1-based column numbers from stdin.
struct StdinInput;

impl MoveInput for StdinInput {
    fn read_column(&mut self, state: &GameState) -> Result<Option<i64>, PlayerError> {
        let stdin = io::stdin();
        loop {
            print!("{}'s turn. Please choose a column: ", state.current_mark());
            io::stdout().flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                return Ok(None);
            }
            match line.trim().parse::<i64>() {
                Ok(n) => return Ok(Some(n.saturating_sub(1))),
                Err(_) => println!("Invalid choice."),
            }
        }
    }

    fn reject(&mut self, _raw: i64, reason: &MoveError) {
        println!("Invalid choice: {reason}");
    }
}

fn build_player(kind: PlayerKind, config: &AppConfig, seed: Option<u64>) -> Box<dyn Player> {
    match build_computer_player(kind, &config.minimax, seed) {
        Some(player) => player,
        None => Box::new(HumanPlayer::new(StdinInput)),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    // Load configuration
    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(x) = cli.x {
        config.players.x = x;
    }
    if let Some(o) = cli.o {
        config.players.o = o;
    }
    if let Some(depth) = cli.depth {
        config.minimax.depth = depth;
    }
    if cli.no_pruning {
        config.minimax.pruning = false;
    }
    if let Some(heuristic) = cli.heuristic {
        config.minimax.heuristic = heuristic;
    }
    if cli.seed.is_some() {
        config.players.seed = cli.seed;
    }
    if let Some(rows) = cli.rows {
        config.board.rows = rows;
    }
    if let Some(cols) = cli.cols {
        config.board.cols = cols;
    }
    if let Some(connect) = cli.connect {
        config.board.connect = connect;
    }
    config.validate().context("invalid configuration")?;

    if cli.print_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let board = config.board.build()?;
    // Distinct streams when both sides are random
    let x = build_player(config.players.x, &config, config.players.seed);
    let o = build_player(
        config.players.o,
        &config,
        config.players.seed.map(|s| s.wrapping_add(1)),
    );
    let mut game = Game::from_state(GameState::new(board, Mark::X), x, o);

    while !game.state().is_terminal() {
        println!("{}", game.state().board());
        let turn = game.play_turn().context("game aborted")?;
        println!("Player {} plays in column {}.", turn.mark, turn.column + 1);
        println!();
    }

    println!("{}", game.state().board());
    match game.status() {
        GameStatus::Won(mark) => println!("Player {mark} won the game!"),
        _ => println!("It's a draw."),
    }
    Ok(())
}
