//! Game state and placement rules.
//!
//! This module provides the core game logic: board occupancy, the current
//! hand of pieces, placement legality, clear detection across rows, columns
//! and 3x3 squares, and the consecutive-clear score multiplier.
//!
//! The board state is deliberately small and `Clone`; search code takes
//! deep copies freely and explores them without touching the real game.

use std::fmt;

use log::trace;
use thiserror::Error;

use crate::catalog;
use crate::constants::{CLEAR_REWARD, HAND_SIZE, N, SECTION};
use crate::piece::{Piece, Position};

/// Raised when a placement is illegal. The state is never partially
/// mutated when this error occurs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The piece's occupied cells would land out of bounds or on an
    /// occupied board cell.
    #[error("piece does not fit at {pos}")]
    DoesNotFit { pos: Position },
    /// The piece is not currently in the hand (by structural equality).
    #[error("piece is not in the current hand")]
    NotInHand,
}

/// Which hand the game exposes to solvers.
///
/// `Classic` plays the full 3-piece hand. `Reduced` is a simplified
/// variant that exposes only the front piece of the hand; the remaining
/// pieces stay an implementation detail until the hand cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandKind {
    Classic,
    Reduced,
}

/// A Woodoku game state: 9x9 occupancy grid, current hand, and the
/// consecutive-clear counter driving the score multiplier.
///
/// Mutated exclusively through [`GameState::place`]. `Clone` produces the
/// deep copy search code needs (cells and hand element-wise, plus the RNG,
/// so cloned games replay their own hand draws independently).
#[derive(Debug, Clone)]
pub struct GameState {
    cells: [[bool; N]; N],
    hand: Vec<Piece>,
    consecutive_clears: u32,
    kind: HandKind,
    rng: fastrand::Rng,
}

impl GameState {
    /// Fresh game: empty board, full hand drawn from the catalog.
    pub fn new(kind: HandKind, seed: u64) -> Self {
        Self::from_parts([[false; N]; N], Vec::new(), 0, kind, seed)
    }

    /// Reconstruct a game from an explicit snapshot.
    ///
    /// An empty `hand` is treated as exhausted and redrawn in full, so the
    /// hand invariant (1..=3 pieces) holds from construction onward.
    pub fn from_parts(
        cells: [[bool; N]; N],
        hand: Vec<Piece>,
        consecutive_clears: u32,
        kind: HandKind,
        seed: u64,
    ) -> Self {
        let mut state = Self {
            cells,
            hand,
            consecutive_clears,
            kind,
            rng: fastrand::Rng::with_seed(seed),
        };
        if state.hand.is_empty() {
            state.redraw_hand();
        }
        state
    }

    /// The board occupancy grid.
    pub fn cells(&self) -> &[[bool; N]; N] {
        &self.cells
    }

    /// The externally observable hand.
    ///
    /// Classic games expose the whole hand; reduced games expose only the
    /// front piece.
    pub fn hand(&self) -> &[Piece] {
        match self.kind {
            HandKind::Classic => &self.hand,
            HandKind::Reduced => &self.hand[..1],
        }
    }

    /// Count of immediately-preceding moves that each cleared at least
    /// one section.
    pub fn consecutive_clears(&self) -> u32 {
        self.consecutive_clears
    }

    /// Whether `piece` can be placed with its bounding box's top-left
    /// corner at `pos`: every occupied cell of the mask must land in
    /// bounds on an empty board cell. No side effects, and false for any
    /// position whose offset arithmetic would leave the address space.
    pub fn fits(&self, piece: &Piece, pos: Position) -> bool {
        piece.filled_cells().all(|(dr, dc)| {
            let (Some(row), Some(col)) =
                (pos.row.checked_add(dr), pos.col.checked_add(dc))
            else {
                return false;
            };
            row < N && col < N && !self.cells[row][col]
        })
    }

    /// Place `piece` at `pos` and return the reward for the move:
    /// the piece's fill count plus `2N * (consecutive_clears + 1)` for
    /// every section (row, column, or 3x3 square) the placement completes.
    ///
    /// Completed sections are detected independently on the post-placement
    /// board and then reset to empty; a cell belonging to several cleared
    /// sections is counted once per section but cleared once.
    ///
    /// Removing the placed piece from an exhausted hand triggers a full
    /// redraw of [`HAND_SIZE`] uniform catalog picks.
    ///
    /// # Errors
    /// [`MoveError::DoesNotFit`] or [`MoveError::NotInHand`] if the move is
    /// illegal; the state is unmodified in both cases.
    pub fn place(&mut self, piece: &Piece, pos: Position) -> Result<u32, MoveError> {
        if !self.fits(piece, pos) {
            return Err(MoveError::DoesNotFit { pos });
        }
        let Some(idx) = self.hand.iter().position(|p| p == piece) else {
            return Err(MoveError::NotInHand);
        };

        for (dr, dc) in piece.filled_cells() {
            self.cells[pos.row + dr][pos.col + dc] = true;
        }

        self.hand.remove(idx);
        if self.hand.is_empty() {
            self.redraw_hand();
        }

        let clear_bonus = self.clear_sections();
        if clear_bonus > 0 {
            self.consecutive_clears += 1;
        } else {
            self.consecutive_clears = 0;
        }

        let reward = clear_bonus + piece.fill_count();
        trace!("placed piece at {pos}, reward {reward}");
        Ok(reward)
    }

    /// True iff no piece of the observable hand fits anywhere on the board.
    pub fn is_over(&self) -> bool {
        !self.hand().iter().any(|piece| {
            (0..N).any(|row| (0..N).any(|col| self.fits(piece, Position::new(row, col))))
        })
    }

    fn redraw_hand(&mut self) {
        for _ in 0..HAND_SIZE {
            self.hand.push(catalog::draw(&mut self.rng));
        }
    }

    /// Detect and reset every completed section, returning the clear bonus
    /// under the current multiplier.
    fn clear_sections(&mut self) -> u32 {
        let multiplier = self.consecutive_clears + 1;
        let mut to_clear = [[false; N]; N];
        let mut sections = 0u32;

        for row in 0..N {
            if (0..N).all(|col| self.cells[row][col]) {
                sections += 1;
                for col in 0..N {
                    to_clear[row][col] = true;
                }
            }
        }

        for col in 0..N {
            if (0..N).all(|row| self.cells[row][col]) {
                sections += 1;
                for row in 0..N {
                    to_clear[row][col] = true;
                }
            }
        }

        for sq_row in (0..N).step_by(SECTION) {
            for sq_col in (0..N).step_by(SECTION) {
                let full = (0..SECTION).all(|i| {
                    (0..SECTION).all(|j| self.cells[sq_row + i][sq_col + j])
                });
                if full {
                    sections += 1;
                    for i in 0..SECTION {
                        for j in 0..SECTION {
                            to_clear[sq_row + i][sq_col + j] = true;
                        }
                    }
                }
            }
        }

        for row in 0..N {
            for col in 0..N {
                if to_clear[row][col] {
                    self.cells[row][col] = false;
                }
            }
        }

        sections * CLEAR_REWARD * multiplier
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for &cell in row {
                write!(f, "{}", if cell { '■' } else { '□' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
