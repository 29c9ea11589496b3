//! Monte Carlo Tree Search move selection.
//!
//! Each real-game decision builds a fresh search tree over cloned game
//! states: the root is expanded unconditionally, then
//! select / expand / rollout / backpropagate cycles run until a wall-clock
//! budget elapses. Selection prefers unvisited children and otherwise
//! maximizes UCB1; rollouts play a full game to termination with a cheap
//! policy and their cumulative score is propagated back to the root.
//!
//! The tree holds no parent pointers. Selection records the index path
//! from the root, and expansion and backpropagation walk that path, so
//! ownership stays strictly parent-to-child and backpropagation is an
//! iterative loop rather than a recursion.

use std::time::{Duration, Instant};

use log::debug;

use crate::constants::{DEFAULT_BRANCHING_CAP, DEFAULT_SECONDS_PER_MOVE, UCB_C};
use crate::game::{GameState, MoveError};
use crate::solver::{legal_moves, Move, Solver};

/// A node in the search tree.
///
/// Owns an exclusive clone of the game state it represents; cloning on
/// expansion is what keeps tree branches from aliasing each other.
pub struct TreeNode {
    /// The game state at this node
    pub state: GameState,
    /// Sum of rollout rewards propagated through this node
    pub total_reward: u64,
    /// Number of visits
    pub visits: u32,
    /// Child nodes in encounter order, one per expanded move
    pub children: Vec<(Move, TreeNode)>,
}

impl TreeNode {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            total_reward: 0,
            visits: 0,
            children: Vec::new(),
        }
    }

    /// Mean rollout reward through this node.
    pub fn mean_reward(&self) -> f64 {
        if self.visits > 0 {
            self.total_reward as f64 / self.visits as f64
        } else {
            0.0
        }
    }
}

/// The fast policy used to finish games from a search leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RolloutPolicy {
    /// First legal move in hand/row-major order. Deterministic and cheap.
    #[default]
    FirstFit,
    /// Uniform-random legal move.
    Random,
}

/// Time-bounded MCTS solver.
///
/// The budget is polled between iterations only; an in-progress cycle
/// always completes, so a slow rollout can overrun the nominal budget.
/// That is an accepted latency/quality trade-off. A negative or NaN
/// budget counts as zero and still yields a legal move.
pub struct MctsSolver {
    seconds_per_move: f64,
    branching_cap: usize,
    rollout: RolloutPolicy,
    rng: fastrand::Rng,
}

impl MctsSolver {
    pub fn new(seconds_per_move: f64, seed: u64) -> Self {
        Self {
            seconds_per_move,
            branching_cap: DEFAULT_BRANCHING_CAP,
            rollout: RolloutPolicy::default(),
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Override the per-node expansion cap.
    pub fn with_branching_cap(mut self, cap: usize) -> Self {
        self.branching_cap = cap;
        self
    }

    /// Override the rollout policy.
    pub fn with_rollout(mut self, rollout: RolloutPolicy) -> Self {
        self.rollout = rollout;
        self
    }

    /// Play a full game from `start` with the rollout policy, returning
    /// the cumulative score from there to game over.
    fn rollout(&mut self, start: &GameState) -> Result<u64, MoveError> {
        let mut game = start.clone();
        let mut score = 0u64;
        loop {
            let moves = legal_moves(&game);
            if moves.is_empty() {
                break;
            }
            let idx = match self.rollout {
                RolloutPolicy::FirstFit => 0,
                RolloutPolicy::Random => self.rng.usize(..moves.len()),
            };
            let (piece, pos) = &moves[idx];
            score += u64::from(game.place(piece, *pos)?);
        }
        Ok(score)
    }
}

impl Default for MctsSolver {
    fn default() -> Self {
        Self::new(DEFAULT_SECONDS_PER_MOVE, 0)
    }
}

impl Solver for MctsSolver {
    fn choose(&mut self, state: &GameState) -> Result<Option<Move>, MoveError> {
        let start = Instant::now();
        // Negative and NaN budgets clamp to zero, infinite ones to the
        // maximum; from_secs_f64 would panic on either.
        let budget = Duration::try_from_secs_f64(self.seconds_per_move.max(0.0))
            .unwrap_or(Duration::MAX);

        // Root expansion happens unconditionally, before the budget check,
        // so even a zero budget yields a legal decision.
        let mut root = TreeNode::new(state.clone());
        expand(&mut root, self.branching_cap, &mut self.rng)?;
        if root.children.is_empty() {
            return Ok(None);
        }

        let mut iterations = 0u64;
        while start.elapsed() < budget {
            let path = select_path(&root);
            let leaf_state = {
                let leaf = node_at_mut(&mut root, &path);
                expand(leaf, self.branching_cap, &mut self.rng)?;
                leaf.state.clone()
            };
            let reward = self.rollout(&leaf_state)?;
            backpropagate(&mut root, &path, reward);
            iterations += 1;
        }

        debug!(
            "mcts decision: {iterations} iterations over {} root children in {:.2?}",
            root.children.len(),
            start.elapsed()
        );
        Ok(Some(best_move(&root).clone()))
    }
}

/// Populate a node's children from its legal moves, one child per move.
///
/// Above `cap` candidate moves, a random subset of `cap` is kept
/// (shuffle, then truncate) to bound tree growth. A node that already has
/// children, or whose state is terminal, is left unchanged.
fn expand(
    node: &mut TreeNode,
    cap: usize,
    rng: &mut fastrand::Rng,
) -> Result<(), MoveError> {
    if !node.children.is_empty() {
        return Ok(());
    }

    let mut moves = legal_moves(&node.state);
    if moves.len() > cap {
        rng.shuffle(&mut moves);
        moves.truncate(cap);
    }

    for (piece, pos) in moves {
        let mut child_state = node.state.clone();
        // The enumerator guarantees legality; a failure here is an engine
        // inconsistency and must surface to the caller.
        child_state.place(&piece, pos)?;
        node.children.push(((piece, pos), TreeNode::new(child_state)));
    }
    Ok(())
}

/// Descend from the root to the leaf to evaluate next, returning the
/// index path taken.
///
/// At each level: the first unvisited child if any exist, otherwise the
/// child maximizing UCB1 (first maximal element on ties). The walk stops
/// at the first node without children.
fn select_path(root: &TreeNode) -> Vec<usize> {
    let mut path = Vec::new();
    let mut node = root;
    while !node.children.is_empty() {
        let idx = match node.children.iter().position(|(_, c)| c.visits == 0) {
            Some(unvisited) => unvisited,
            None => most_urgent(node),
        };
        path.push(idx);
        node = &node.children[idx].1;
    }
    path
}

/// Index of the child with the highest UCB1 score. Only called when every
/// child has at least one visit.
fn most_urgent(parent: &TreeNode) -> usize {
    let mut best = 0;
    let mut best_score = f64::NEG_INFINITY;
    for (idx, (_, child)) in parent.children.iter().enumerate() {
        let score = ucb1(child, parent.visits);
        if score > best_score {
            best_score = score;
            best = idx;
        }
    }
    best
}

/// UCB1: mean reward plus the exploration bonus.
fn ucb1(child: &TreeNode, parent_visits: u32) -> f64 {
    child.mean_reward()
        + UCB_C * ((parent_visits as f64).ln() / child.visits as f64).sqrt()
}

/// Walk `path` from the root, returning the node it ends at.
fn node_at_mut<'a>(root: &'a mut TreeNode, path: &[usize]) -> &'a mut TreeNode {
    path.iter().fold(root, |node, &idx| &mut node.children[idx].1)
}

/// Add the rollout result to every node along `path`, root included.
fn backpropagate(root: &mut TreeNode, path: &[usize], reward: u64) {
    root.visits += 1;
    root.total_reward += reward;
    let mut node = root;
    for &idx in path {
        node = &mut node.children[idx].1;
        node.visits += 1;
        node.total_reward += reward;
    }
}

/// The move whose child has the best mean reward, skipping unvisited
/// children; first-encountered wins ties. Falls back to the first child
/// when nothing was visited (zero-budget case).
fn best_move(root: &TreeNode) -> &Move {
    let mut best = &root.children[0].0;
    let mut best_mean = f64::NEG_INFINITY;
    for (mv, child) in &root.children {
        if child.visits == 0 {
            continue;
        }
        let mean = child.mean_reward();
        if mean > best_mean {
            best_mean = mean;
            best = mv;
        }
    }
    best
}
