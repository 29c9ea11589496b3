//! Constants for board geometry, scoring, and solver parameters.
//!
//! The board is a fixed 9x9 grid partitioned three ways for clear
//! detection: 9 rows, 9 columns, and 9 disjoint 3x3 squares.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board side length. The classic game is always played on 9x9.
pub const N: usize = 9;

/// Side length of the disjoint sub-squares (N must be divisible by this).
pub const SECTION: usize = 3;

// =============================================================================
// Hand and Scoring
// =============================================================================

/// Number of pieces drawn into a fresh hand.
pub const HAND_SIZE: usize = 3;

/// Points for one cleared section before the consecutive-clear multiplier.
pub const CLEAR_REWARD: u32 = 2 * N as u32;

// =============================================================================
// MCTS (Monte Carlo Tree Search) Parameters
// =============================================================================

/// UCB1 exploration constant.
pub const UCB_C: f64 = std::f64::consts::SQRT_2;

/// Default wall-clock budget per move decision, in seconds.
pub const DEFAULT_SECONDS_PER_MOVE: f64 = 5.0;

/// Default cap on children per expanded node (shuffle, then truncate).
/// Bounds tree growth at large branching factors; a quality/speed trade-off.
pub const DEFAULT_BRANCHING_CAP: usize = 50;
