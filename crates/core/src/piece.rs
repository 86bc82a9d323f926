//! Piece module - the live instance of a tetromino
//!
//! A piece is a rigid set of four cells plus a rotation center that travels with
//! them. Every transform is atomic: it is either fully applied or fully
//! reverted, never partially kept.
//!
//! Rotation turns the cells a quarter turn about the stored center (not the
//! bounding box), then nudges the piece back inside the walls with at most one
//! corrective shift per edge. There is no kick table.

use arrayvec::ArrayVec;

use crate::grid::{collides, Grid, Occupancy};
use crate::types::{Cell, Color, Direction, Rotation, Shape};

/// Raised while correcting a rotation; converted into "no effect" by
/// [`Piece::rotate`] and never seen outside this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RotationRejected;

/// Result of a translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Motion {
    /// The piece was already supported: one more step down merges it
    pub landed: bool,
    /// Rows travelled downwards (soft-drop reward)
    pub fallen: u32,
}

impl Motion {
    const STILL: Motion = Motion {
        landed: false,
        fallen: 0,
    };
}

/// A falling or queued tetromino
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    shape: Shape,
    color: Color,
    cells: ArrayVec<Cell, 4>,
    /// Rotation center in half-cell units
    center: (i32, i32),
}

impl Piece {
    /// Create a piece with its unrotated silhouette anchored at the origin
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            color: shape.color(),
            cells: shape.cells().into_iter().collect(),
            center: shape.center_halves(),
        }
    }

    /// Create a piece horizontally centered over a board of the given width
    pub fn spawn(shape: Shape, width: i32) -> Self {
        let mut piece = Self::new(shape);
        piece.center_on(width);
        piece
    }

    /// Shift the piece so its middle column sits over the middle of the board
    pub fn center_on(&mut self, width: i32) {
        let center_x = self.left() + (self.right() - self.left()) / 2;
        self.shift(width / 2 - center_x, 0);
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Rotation center in half-cell units (`(3, 1)` is `(1.5, 0.5)`)
    pub fn center_halves(&self) -> (i32, i32) {
        self.center
    }

    /// Rotation center in cell units
    pub fn center(&self) -> (f32, f32) {
        (self.center.0 as f32 / 2.0, self.center.1 as f32 / 2.0)
    }

    /// The leftmost x-position of the piece
    pub fn left(&self) -> i32 {
        self.cells.iter().map(|&(x, _)| x).min().unwrap_or(0)
    }

    /// The rightmost x-position of the piece
    pub fn right(&self) -> i32 {
        self.cells.iter().map(|&(x, _)| x).max().unwrap_or(0)
    }

    /// The topmost y-position of the piece
    pub fn top(&self) -> i32 {
        self.cells.iter().map(|&(_, y)| y).min().unwrap_or(0)
    }

    /// The bottommost y-position of the piece
    pub fn bottom(&self) -> i32 {
        self.cells.iter().map(|&(_, y)| y).max().unwrap_or(0)
    }

    /// True iff any cell of the piece is occupied on the grid
    pub fn collides(&self, grid: &Grid) -> bool {
        collides(&self.cells, grid)
    }

    /// True iff every cell lies inside the grid's bounds
    pub fn in_bounds(&self, grid: &Grid) -> bool {
        self.cells.iter().all(|&cell| grid.in_bounds(cell))
    }

    /// True iff one more step down would merge the piece: some cell rests on
    /// the floor or on an occupied cell
    pub fn supported(&self, grid: &Grid) -> bool {
        self.cells
            .iter()
            .any(|&(x, y)| y + 1 == grid.height() || grid.contains((x, y + 1)))
    }

    fn shift(&mut self, dx: i32, dy: i32) {
        for cell in &mut self.cells {
            cell.0 += dx;
            cell.1 += dy;
        }
        self.center.0 += 2 * dx;
        self.center.1 += 2 * dy;
    }

    /// Move the piece `count` steps in `direction`.
    ///
    /// Sideways moves that would leave the board or hit a cell are undone and
    /// report no drop. A downward move on a supported piece does nothing and
    /// reports a landing; otherwise the piece falls row by row, at most `count`
    /// rows, and stops early once supported. [`Direction::Drop`] falls until
    /// supported and always lands.
    pub fn translate(&mut self, direction: Direction, count: u32, grid: &Grid) -> Motion {
        let count = count as i32;
        match direction {
            Direction::Left | Direction::Right => {
                let dx = if direction == Direction::Left {
                    -count
                } else {
                    count
                };
                self.shift(dx, 0);
                if !self.in_bounds(grid) || self.collides(grid) {
                    self.shift(-dx, 0);
                }
                Motion::STILL
            }
            Direction::Down => {
                if self.supported(grid) {
                    return Motion {
                        landed: true,
                        fallen: 0,
                    };
                }
                let mut fallen = 0;
                while fallen < count as u32 && !self.supported(grid) {
                    self.shift(0, 1);
                    fallen += 1;
                }
                Motion {
                    landed: false,
                    fallen,
                }
            }
            Direction::Drop => self.drop(grid),
        }
    }

    /// Fall until supported, then report a landing
    pub fn drop(&mut self, grid: &Grid) -> Motion {
        let mut fallen = 0;
        while !self.supported(grid) {
            self.shift(0, 1);
            fallen += 1;
        }
        Motion {
            landed: true,
            fallen,
        }
    }

    /// Rotate a quarter turn about the center, correcting against the walls.
    ///
    /// Returns false, with cells and center untouched, when no correction
    /// yields a legal position.
    pub fn rotate(&mut self, rotation: Rotation, grid: &Grid) -> bool {
        let saved = self.clone();
        match self.try_rotate(rotation, grid) {
            Ok(()) => true,
            Err(RotationRejected) => {
                *self = saved;
                false
            }
        }
    }

    fn try_rotate(&mut self, rotation: Rotation, grid: &Grid) -> Result<(), RotationRejected> {
        self.turn(rotation);

        let left = self.left();
        if left < 0 {
            self.nudge_sideways(-left, grid)?;
        }

        let right = self.right();
        if right >= grid.width() {
            self.nudge_sideways(grid.width() - 1 - right, grid)?;
        }

        let top = self.top();
        if top < 0 {
            if self.supported(grid) {
                return Err(RotationRejected);
            }
            self.shift(0, -top);
        }

        if self.bottom() >= grid.height() || self.collides(grid) {
            return Err(RotationRejected);
        }
        Ok(())
    }

    fn nudge_sideways(&mut self, dx: i32, grid: &Grid) -> Result<(), RotationRejected> {
        self.shift(dx, 0);
        if self.left() < 0 || self.right() >= grid.width() || self.collides(grid) {
            return Err(RotationRejected);
        }
        Ok(())
    }

    /// Rigid quarter turn in half-cell space; odd results floor to a cell.
    fn turn(&mut self, rotation: Rotation) {
        let (cx, cy) = self.center;
        for cell in &mut self.cells {
            let rx = 2 * cell.0 - cx;
            let ry = 2 * cell.1 - cy;
            let (nx, ny) = match rotation {
                Rotation::Clockwise => (cx - ry, cy + rx),
                Rotation::Anticlockwise => (cx + ry, cy - rx),
            };
            *cell = (nx.div_euclid(2), ny.div_euclid(2));
        }
    }
}

impl Occupancy for Piece {
    fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }
}
