//! The turn loop wiring a solver to a game.
//!
//! The environment owns the orchestration the core engine deliberately
//! does not: ask the solver for a move, validate it, apply it, notify the
//! observers, and aggregate the total score until the game is over.

use log::{info, warn};

use crate::game::{GameState, MoveError};
use crate::solver::Solver;

/// A read-only sink for game snapshots, notified after every move
/// (including the initial state). The core never depends on its output.
pub trait Observer {
    fn receive_state(&mut self, state: &GameState);
}

/// Renders the occupancy grid as filled/empty glyphs, one row per line.
pub struct TextObserver;

impl Observer for TextObserver {
    fn receive_state(&mut self, state: &GameState) {
        println!("{state}");
    }
}

/// Runs games to completion, forwarding every state to its observers.
#[derive(Default)]
pub struct Environment {
    observers: Vec<Box<dyn Observer>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_observers(observers: Vec<Box<dyn Observer>>) -> Self {
        Self { observers }
    }

    pub fn add_observer(&mut self, observer: Box<dyn Observer>) {
        self.observers.push(observer);
    }

    /// Run `solver` on `game` until the game is over, returning the total
    /// score.
    ///
    /// A solver-proposed move that fails validation invalidates the
    /// episode: the error propagates and the score is discarded, never
    /// auto-corrected.
    pub fn run_game(
        &mut self,
        solver: &mut dyn Solver,
        game: &mut GameState,
    ) -> Result<u64, MoveError> {
        self.notify(game);

        let mut score = 0u64;
        let mut turn = 0u64;
        while !game.is_over() {
            let Some((piece, pos)) = solver.choose(game)? else {
                break;
            };
            if !game.fits(&piece, pos) {
                warn!("solver proposed an illegal move at {pos}, failing the run");
                return Err(MoveError::DoesNotFit { pos });
            }

            let reward = game.place(&piece, pos)?;
            score += u64::from(reward);
            turn += 1;
            info!("turn {turn}: placed at {pos} for {reward}, total {score}");
            self.notify(game);
        }

        Ok(score)
    }

    fn notify(&mut self, game: &GameState) {
        for observer in &mut self.observers {
            observer.receive_state(game);
        }
    }
}
