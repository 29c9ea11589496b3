//! Woodoku-Rust: a block-placement puzzle engine with an MCTS solver.
//!
//! ## Usage
//!
//! - `woodoku-rust` - Run a quick demo game
//! - `woodoku-rust play --solver mcts --seconds 2` - Play a full game
//! - `woodoku-rust demo` - Run the demo explicitly

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use woodoku_rust::constants::{DEFAULT_BRANCHING_CAP, DEFAULT_SECONDS_PER_MOVE};
use woodoku_rust::environment::{Environment, TextObserver};
use woodoku_rust::game::{GameState, HandKind};
use woodoku_rust::mcts::MctsSolver;
use woodoku_rust::solver::{FirstFit, RandomSolver, Solver};

/// Woodoku-Rust: a block-placement puzzle engine with an MCTS solver
#[derive(Parser)]
#[command(name = "woodoku-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a full game with the chosen solver and report the final score
    Play {
        #[arg(long, value_enum, default_value_t = SolverKind::Mcts)]
        solver: SolverKind,
        #[arg(long, value_enum, default_value_t = Variant::Classic)]
        variant: Variant,
        /// Wall-clock budget per MCTS move decision, in seconds
        #[arg(long, default_value_t = DEFAULT_SECONDS_PER_MOVE)]
        seconds: f64,
        /// Cap on expanded children per search node
        #[arg(long, default_value_t = DEFAULT_BRANCHING_CAP)]
        cap: usize,
        /// RNG seed for the game's hand draws and the solver
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Suppress board rendering between moves
        #[arg(long)]
        quiet: bool,
    },
    /// Run a quick demo game with the first-match solver
    Demo,
}

#[derive(Clone, Copy, ValueEnum)]
enum SolverKind {
    Random,
    FirstFit,
    Mcts,
}

#[derive(Clone, Copy, ValueEnum)]
enum Variant {
    Classic,
    Reduced,
}

fn main() -> Result<()> {
    flexi_logger::Logger::try_with_env_or_str("info")?.start()?;

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Play {
            solver,
            variant,
            seconds,
            cap,
            seed,
            quiet,
        }) => run_play(solver, variant, seconds, cap, seed, quiet),
        Some(Commands::Demo) | None => run_demo(),
    }
}

fn run_play(
    solver: SolverKind,
    variant: Variant,
    seconds: f64,
    cap: usize,
    seed: u64,
    quiet: bool,
) -> Result<()> {
    let kind = match variant {
        Variant::Classic => HandKind::Classic,
        Variant::Reduced => HandKind::Reduced,
    };
    let mut game = GameState::new(kind, seed);

    let mut solver: Box<dyn Solver> = match solver {
        SolverKind::Random => Box::new(RandomSolver::new(seed)),
        SolverKind::FirstFit => Box::new(FirstFit),
        SolverKind::Mcts => Box::new(MctsSolver::new(seconds, seed).with_branching_cap(cap)),
    };

    let mut env = if quiet {
        Environment::new()
    } else {
        Environment::with_observers(vec![Box::new(TextObserver)])
    };

    let score = env.run_game(solver.as_mut(), &mut game)?;
    println!("Final score: {score}");
    Ok(())
}

fn run_demo() -> Result<()> {
    println!("Woodoku-Rust: block-placement puzzle with MCTS\n");

    // Demo 1: a full game with the first-match baseline
    println!("=== First-match baseline ===");
    let mut game = GameState::new(HandKind::Classic, 1);
    let mut env = Environment::new();
    let score = env.run_game(&mut FirstFit, &mut game)?;
    println!("First-match final score: {score}\n");

    // Demo 2: one MCTS decision under a short budget
    println!("=== MCTS decision ===");
    let game = GameState::new(HandKind::Classic, 1);
    let mut solver = MctsSolver::new(0.5, 1);
    if let Some((piece, pos)) = solver.choose(&game)? {
        println!("MCTS places at {pos}:");
        print!("{piece}");
    }
    Ok(())
}
