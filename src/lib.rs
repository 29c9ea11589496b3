//! Woodoku-Rust: a block-placement puzzle engine with an MCTS solver.
//!
//! This crate implements the Woodoku puzzle (place polyomino pieces on a
//! 9x9 grid, clear full rows, columns, and 3x3 squares, chain clears for a
//! score multiplier) together with solvers that play it, including a
//! time-bounded Monte Carlo Tree Search.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, scoring, and solver parameters
//! - [`piece`] - Immutable piece shapes and board positions
//! - [`catalog`] - The fixed, pre-expanded piece table
//! - [`game`] - Core game logic (placement, clears, hand management)
//! - [`solver`] - Move enumeration and the simple selection policies
//! - [`mcts`] - Time-bounded Monte Carlo Tree Search
//! - [`environment`] - Turn loop and observers
//!
//! ## Example
//!
//! ```
//! use woodoku_rust::game::{GameState, HandKind};
//! use woodoku_rust::mcts::MctsSolver;
//! use woodoku_rust::solver::Solver;
//!
//! // Start a fresh classic game
//! let game = GameState::new(HandKind::Classic, 0);
//!
//! // Ask MCTS for a move under a 50ms budget
//! let mut solver = MctsSolver::new(0.05, 0);
//! let (piece, pos) = solver.choose(&game).unwrap().unwrap();
//! assert!(game.fits(&piece, pos));
//! ```

pub mod catalog;
pub mod constants;
pub mod environment;
pub mod game;
pub mod mcts;
pub mod piece;
pub mod solver;
