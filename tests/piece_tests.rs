//! Piece tests - rotation correction, support lookahead, atomic transforms

use blockfall::core::types::{Cell, Direction, Rotation, Shape};
use blockfall::core::{Grid, Occupancy, Piece};
use blockfall::types::Color;

fn sorted(cells: &[Cell]) -> Vec<Cell> {
    let mut v = cells.to_vec();
    v.sort();
    v
}

/// A piece of `shape` moved `down` rows from its unrotated origin
fn piece_at(shape: Shape, right: u32, down: u32, grid: &Grid) -> Piece {
    let mut piece = Piece::new(shape);
    piece.translate(Direction::Right, right, grid);
    piece.translate(Direction::Down, down, grid);
    piece
}

#[test]
fn test_four_rotations_are_identity_on_open_board() {
    let grid = Grid::new(10, 20);
    for shape in Shape::ALL {
        for rotation in [Rotation::Clockwise, Rotation::Anticlockwise] {
            let mut piece = piece_at(shape, 4, 8, &grid);
            let before = piece.clone();
            for _ in 0..4 {
                assert!(piece.rotate(rotation, &grid), "{shape} {rotation:?}");
            }
            assert_eq!(piece, before, "{shape} {rotation:?}");
        }
    }
}

#[test]
fn test_rotation_then_inverse_restores_piece() {
    let grid = Grid::new(10, 20);
    for shape in Shape::ALL {
        let mut piece = piece_at(shape, 3, 10, &grid);
        let before = piece.clone();
        assert!(piece.rotate(Rotation::Clockwise, &grid));
        assert!(piece.rotate(Rotation::Clockwise.inverse(), &grid));
        assert_eq!(piece, before, "{shape}");
    }
}

#[test]
fn test_rotation_against_left_wall_is_nudged_right() {
    let grid = Grid::new(10, 20);
    let mut piece = piece_at(Shape::I, 0, 5, &grid);

    assert!(piece.rotate(Rotation::Clockwise, &grid));
    assert_eq!(sorted(piece.cells()), vec![(0, 6), (1, 6), (2, 6), (3, 6)]);
    assert_eq!(piece.left(), 0);
}

#[test]
fn test_rejected_rotation_leaves_piece_untouched() {
    let mut grid = Grid::new(10, 20);
    // Blocks the only spot the corrective nudge can reach.
    grid.set((3, 6), Some(Color::Red));
    let mut piece = piece_at(Shape::I, 0, 5, &grid);
    let before = piece.clone();

    assert!(!piece.rotate(Rotation::Clockwise, &grid));
    assert_eq!(piece.cells(), before.cells());
    assert_eq!(piece.center_halves(), before.center_halves());
}

#[test]
fn test_rotation_rejected_when_supported_at_top() {
    // Turning a fresh T needs a nudge down, which a supported piece may not take.
    let mut grid = Grid::new(10, 20);
    grid.set((1, 2), Some(Color::Red));
    let mut piece = Piece::new(Shape::T);
    assert!(piece.supported(&grid));
    let before = piece.clone();

    assert!(!piece.rotate(Rotation::Clockwise, &grid));
    assert_eq!(piece, before);

    // The same turn on an open board is nudged down instead.
    assert!(piece.rotate(Rotation::Clockwise, &Grid::new(10, 20)));
    assert_eq!(piece.top(), 0);
}

#[test]
fn test_supported_is_a_one_step_lookahead() {
    let mut grid = Grid::new(6, 12);
    for &cell in &[(0, 11), (1, 11), (2, 10), (4, 7), (5, 11)] {
        grid.set(cell, Some(Color::Blue));
    }

    for shape in Shape::ALL {
        for right in 0..4 {
            let mut piece = Piece::new(shape);
            piece.translate(Direction::Right, right, &grid);
            for _ in 0..grid.height() {
                let before = piece.clone();
                let supported = piece.supported(&grid);
                let motion = piece.translate(Direction::Down, 1, &grid);

                assert_eq!(motion.landed, supported);
                if supported {
                    assert_eq!(piece, before);
                    break;
                }
                assert!(piece.in_bounds(&grid));
                assert!(!piece.collides(&grid));
            }
        }
    }
}

#[test]
fn test_sideways_move_blocked_by_cell() {
    let mut grid = Grid::new(10, 20);
    grid.set((1, 2), Some(Color::Green));
    let mut piece = Piece::new(Shape::I);
    let before = piece.clone();

    piece.translate(Direction::Right, 1, &grid);
    assert_eq!(piece, before);
    assert!(!grid.contains((0, 2)));
}
