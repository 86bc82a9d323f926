//! Grid module - occupied cells and their colors
//!
//! The grid is a `width x height` array of cells where each slot is either empty
//! or holds the color of the piece that left it there. Uses a flat row-major
//! array, so a cell and its color can never drift apart and nothing can be
//! stored outside the board.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom;
//! row `height - 1` is the floor.

use crate::types::{Cell, Color};

/// Anything that can answer "is this cell taken?".
pub trait Occupancy {
    fn contains(&self, cell: Cell) -> bool;
}

impl Occupancy for [Cell] {
    fn contains(&self, cell: Cell) -> bool {
        self.iter().any(|&c| c == cell)
    }
}

/// True iff any cell of `cells` is a member of `other`.
pub fn collides<'a, A, B>(cells: A, other: &B) -> bool
where
    A: IntoIterator<Item = &'a Cell>,
    B: Occupancy + ?Sized,
{
    cells.into_iter().any(|&cell| other.contains(cell))
}

/// Occupied cells of a board, with one color per occupied cell
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: i32,
    height: i32,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Option<Color>>,
}

impl Grid {
    /// Create an empty grid. Dimensions are clamped to at least one cell.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            cells: vec![None; (width * height) as usize],
        }
    }

    #[inline(always)]
    fn index(&self, (x, y): Cell) -> Option<usize> {
        if self.in_bounds((x, y)) {
            Some((y * self.width + x) as usize)
        } else {
            None
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Check if position lies inside `[0, width) x [0, height)`
    pub fn in_bounds(&self, (x, y): Cell) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Color stored at `cell`, `None` when empty or out of bounds
    pub fn color(&self, cell: Cell) -> Option<Color> {
        self.index(cell).and_then(|idx| self.cells[idx])
    }

    /// Set or clear a cell. Returns false if out of bounds.
    pub fn set(&mut self, cell: Cell, color: Option<Color>) -> bool {
        match self.index(cell) {
            Some(idx) => {
                self.cells[idx] = color;
                true
            }
            None => false,
        }
    }

    /// Occupied cells with their colors, top row first
    pub fn occupied(&self) -> impl Iterator<Item = (Cell, Color)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().filter_map(move |(idx, slot)| {
            let idx = idx as i32;
            slot.map(|color| ((idx % width, idx / width), color))
        })
    }

    /// Number of occupied cells
    pub fn len(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_none())
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: i32) -> bool {
        if y < 0 || y >= self.height {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    fn row(&self, y: i32) -> &[Option<Color>] {
        let start = (y * self.width) as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Delete row `y` and shift every row above it down by one.
    ///
    /// Rows below `y` are untouched; the top row becomes empty.
    pub fn remove_row(&mut self, y: i32) {
        if y < 0 || y >= self.height {
            return;
        }
        let width = self.width as usize;
        let y = y as usize;

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            self.cells
                .copy_within(src_start..src_start + width, row * width);
        }
        for cell in &mut self.cells[..width] {
            *cell = None;
        }
    }

    /// Height of every column: distance from the floor to the topmost
    /// occupied cell, 0 for an empty column
    pub fn column_heights(&self) -> Vec<u32> {
        (0..self.width)
            .map(|x| {
                (0..self.height)
                    .find(|&y| self.contains((x, y)))
                    .map_or(0, |y| (self.height - y) as u32)
            })
            .collect()
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}

impl Occupancy for Grid {
    fn contains(&self, cell: Cell) -> bool {
        self.color(cell).is_some()
    }
}
