//! Move enumeration and the simple move-selection policies.
//!
//! A move pairs a hand piece with the board position for its bounding
//! box's top-left corner. [`legal_moves`] materializes every legal move of
//! a state; the solvers here pick from that list. The MCTS solver lives in
//! [`crate::mcts`] and consumes the same contract.

use crate::constants::N;
use crate::game::{GameState, MoveError};
use crate::piece::{Piece, Position};

/// A candidate placement: which piece, and where.
pub type Move = (Piece, Position);

/// Every legal move of `state`: for each piece of the observable hand in
/// hand order, every position where it fits in row-major order.
///
/// The list is fully materialized; an empty list means no legal move
/// exists (which coincides with [`GameState::is_over`]).
pub fn legal_moves(state: &GameState) -> Vec<Move> {
    let mut moves = Vec::new();
    for piece in state.hand() {
        for row in 0..N {
            for col in 0..N {
                let pos = Position::new(row, col);
                if state.fits(piece, pos) {
                    moves.push((piece.clone(), pos));
                }
            }
        }
    }
    moves
}

/// A move-selection policy.
///
/// `choose` returns `Ok(None)` when the state has no legal move; callers
/// are expected to check [`GameState::is_over`] before asking for a move.
/// An `Err` signals an engine/enumerator inconsistency and must propagate
/// to the caller rather than being skipped.
pub trait Solver {
    fn choose(&mut self, state: &GameState) -> Result<Option<Move>, MoveError>;
}

/// Uniform-random policy: any legal move, each equally likely.
pub struct RandomSolver {
    rng: fastrand::Rng,
}

impl RandomSolver {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Solver for RandomSolver {
    fn choose(&mut self, state: &GameState) -> Result<Option<Move>, MoveError> {
        let mut moves = legal_moves(state);
        if moves.is_empty() {
            return Ok(None);
        }
        let idx = self.rng.usize(..moves.len());
        Ok(Some(moves.swap_remove(idx)))
    }
}

/// Deterministic first-match policy: the earliest piece in hand order at
/// the earliest position in row-major order.
///
/// Used both as a baseline and as the default fast rollout policy inside
/// the MCTS solver.
pub struct FirstFit;

impl Solver for FirstFit {
    fn choose(&mut self, state: &GameState) -> Result<Option<Move>, MoveError> {
        let mut moves = legal_moves(state);
        if moves.is_empty() {
            return Ok(None);
        }
        Ok(Some(moves.swap_remove(0)))
    }
}
