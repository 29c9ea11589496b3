//! Integration tests for woodoku-rust
//!
//! These exercise the public API end to end: placement legality, clear
//! scoring with the consecutive-clear multiplier, hand management, the
//! move enumerator, and the solvers driving full games.

use woodoku_rust::constants::{HAND_SIZE, N};
use woodoku_rust::environment::Environment;
use woodoku_rust::game::{GameState, HandKind, MoveError};
use woodoku_rust::mcts::MctsSolver;
use woodoku_rust::piece::{Piece, Position};
use woodoku_rust::solver::{legal_moves, FirstFit, RandomSolver, Solver};

// =============================================================================
// Helper functions for building pieces and states
// =============================================================================

fn h_line(len: usize) -> Piece {
    Piece::new(&[vec![true; len]]).unwrap()
}

fn v_line(len: usize) -> Piece {
    Piece::new(&vec![vec![true]; len]).unwrap()
}

fn dot() -> Piece {
    Piece::new(&[vec![true]]).unwrap()
}

fn classic(cells: [[bool; N]; N], hand: Vec<Piece>) -> GameState {
    GameState::from_parts(cells, hand, 0, HandKind::Classic, 0)
}

// =============================================================================
// Placement legality
// =============================================================================

#[test]
fn test_fits_rejects_out_of_bounds() {
    let game = classic([[false; N]; N], vec![h_line(3)]);

    // Every occupied cell must land inside [0, N) x [0, N).
    assert!(game.fits(&h_line(3), Position::new(0, 6)));
    assert!(!game.fits(&h_line(3), Position::new(0, 7)));
    assert!(game.fits(&v_line(3), Position::new(6, 0)));
    assert!(!game.fits(&v_line(3), Position::new(7, 0)));
}

#[test]
fn test_fits_ignores_unoccupied_bounding_box_cells() {
    let game = classic([[false; N]; N], vec![dot()]);

    // The mask's empty right half may hang off the board edge.
    let half = Piece::new(&[vec![true, false]]).unwrap();
    assert!(game.fits(&half, Position::new(0, 8)));
}

#[test]
fn test_failed_place_is_side_effect_free() {
    let mut cells = [[false; N]; N];
    cells[2][2] = true;
    let mut game = classic(cells, vec![h_line(3)]);

    let before = *game.cells();
    let fits_before = game.fits(&h_line(3), Position::new(5, 5));

    assert_eq!(
        game.place(&h_line(3), Position::new(2, 0)),
        Err(MoveError::DoesNotFit { pos: Position::new(2, 0) })
    );

    assert_eq!(*game.cells(), before, "board must be byte-for-byte identical");
    assert_eq!(game.fits(&h_line(3), Position::new(5, 5)), fits_before);
    assert_eq!(game.hand().len(), 1);
    assert_eq!(game.consecutive_clears(), 0);
}

// =============================================================================
// Clear scoring and the consecutive-clear multiplier
// =============================================================================

#[test]
fn test_single_row_clear_scenario() {
    // Row 0 is complete after placing the horizontal 3-line at (0, 0):
    // reward is 18 * 1 for the row plus 3 for the placed cells, and the
    // row resets to empty.
    let mut cells = [[false; N]; N];
    for col in 3..N {
        cells[0][col] = true;
    }
    let mut game = classic(cells, vec![h_line(3)]);

    assert_eq!(game.place(&h_line(3), Position::new(0, 0)), Ok(21));
    assert!(game.cells().iter().flatten().all(|&c| !c));
    assert_eq!(game.consecutive_clears(), 1);
}

#[test]
fn test_consecutive_clears_scale_linearly() {
    // Two nearly-complete rows; keeping row 2 empty leaves every 3x3
    // square incomplete until the rows themselves clear.
    let mut cells = [[false; N]; N];
    for col in 3..N {
        cells[0][col] = true;
        cells[1][col] = true;
    }
    let mut game = classic(cells, vec![h_line(3), h_line(3), h_line(3)]);

    // 18, then 36: the clear component scales with consecutive_clears + 1.
    assert_eq!(game.place(&h_line(3), Position::new(0, 0)), Ok(18 + 3));
    assert_eq!(game.place(&h_line(3), Position::new(1, 0)), Ok(36 + 3));
    assert_eq!(game.consecutive_clears(), 2);

    // A non-clearing placement resets the chain.
    assert_eq!(game.place(&h_line(3), Position::new(5, 0)), Ok(3));
    assert_eq!(game.consecutive_clears(), 0);
}

#[test]
fn test_hand_replenishes_when_exhausted() {
    let mut game = classic([[false; N]; N], vec![dot(), dot()]);

    game.place(&dot(), Position::new(0, 0)).unwrap();
    assert_eq!(game.hand().len(), 1);

    game.place(&dot(), Position::new(1, 1)).unwrap();
    assert_eq!(game.hand().len(), HAND_SIZE, "empty hand redraws in full");
}

// =============================================================================
// Move enumeration and termination
// =============================================================================

#[test]
fn test_legal_moves_empty_iff_game_over() {
    // Play a full game with the deterministic baseline and check the
    // equivalence at every step along the way.
    let mut game = GameState::new(HandKind::Classic, 17);
    let mut solver = FirstFit;

    loop {
        let moves = legal_moves(&game);
        assert_eq!(
            moves.is_empty(),
            game.is_over(),
            "enumerator emptiness must coincide with game over"
        );
        match solver.choose(&game).unwrap() {
            Some((piece, pos)) => {
                game.place(&piece, pos).unwrap();
            }
            None => break,
        }
    }
    assert!(game.is_over());
}

#[test]
fn test_legal_moves_are_all_placeable() {
    let game = GameState::new(HandKind::Classic, 23);
    for (piece, pos) in legal_moves(&game) {
        assert!(game.fits(&piece, pos));
        let mut probe = game.clone();
        assert!(probe.place(&piece, pos).is_ok());
    }
}

// =============================================================================
// Solvers driving full games
// =============================================================================

#[test]
fn test_random_solver_finishes_a_game() {
    let mut game = GameState::new(HandKind::Classic, 5);
    let mut env = Environment::new();
    let score = env.run_game(&mut RandomSolver::new(5), &mut game).unwrap();
    assert!(score > 0, "a fresh game always scores at least the first piece");
    assert!(game.is_over());
}

#[test]
fn test_reduced_variant_finishes_a_game() {
    let mut game = GameState::new(HandKind::Reduced, 5);
    let mut env = Environment::new();
    let score = env.run_game(&mut FirstFit, &mut game).unwrap();
    assert!(score > 0);
    assert!(game.is_over());
    assert_eq!(game.hand().len(), 1, "reduced games expose a single piece");
}

#[test]
fn test_mcts_zero_budget_returns_root_child() {
    // Root expansion happens before the budget check, so even a 0-second
    // budget must produce a legal move.
    let game = GameState::new(HandKind::Classic, 2);
    let mut solver = MctsSolver::new(0.0, 2);

    let (piece, pos) = solver.choose(&game).unwrap().expect("fresh game has moves");
    assert!(game.fits(&piece, pos));
    assert!(game.hand().contains(&piece));
}

#[test]
fn test_mcts_plays_a_legal_opening_under_small_budget() {
    let mut game = GameState::new(HandKind::Classic, 3);
    let mut solver = MctsSolver::new(0.05, 3).with_branching_cap(10);

    for _ in 0..3 {
        if game.is_over() {
            break;
        }
        let (piece, pos) = solver.choose(&game).unwrap().expect("game not over");
        game.place(&piece, pos).unwrap();
    }
}

#[test]
fn test_mcts_reports_no_move_on_dead_state() {
    let cells = [[true; N]; N];
    let game = GameState::from_parts(cells, vec![dot()], 0, HandKind::Classic, 0);
    assert!(game.is_over());

    let mut solver = MctsSolver::new(0.0, 0);
    assert_eq!(solver.choose(&game).unwrap(), None);
}
