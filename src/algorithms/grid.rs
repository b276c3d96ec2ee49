//! Dense row-major matrix for the full-matrix dynamic programs.

use std::ops::{Index, IndexMut};

/// Maximum sequence length per side for O(m*n) space algorithms.
/// Longer inputs are refused rather than allocating without bound.
pub const MAX_QUADRATIC_LENGTH: usize = 10_000;

/// `rows x cols` matrix stored in a single allocation, indexed by `(row, col)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    #[must_use]
    pub fn new(rows: usize, cols: usize, fill: T) -> Self {
        Self {
            rows,
            cols,
            cells: vec![fill; rows * cols],
        }
    }
}

impl<T> Grid<T> {
    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Borrow one row as a slice
    #[inline]
    #[must_use]
    pub fn row(&self, row: usize) -> &[T] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "grid index ({}, {}) out of bounds for {}x{}",
            row,
            col,
            self.rows,
            self.cols
        );
        row * self.cols + col
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.cells[self.offset(row, col)]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        let offset = self.offset(row, col);
        &mut self.cells[offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        let mut grid = Grid::new(3, 4, 0usize);
        grid[(2, 3)] = 7;
        grid[(0, 1)] = 1;
        assert_eq!(grid[(2, 3)], 7);
        assert_eq!(grid.row(0), &[0, 1, 0, 0]);
        assert_eq!((grid.rows(), grid.cols()), (3, 4));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_out_of_bounds_panics() {
        let grid = Grid::new(2, 2, 0u8);
        let _ = grid[(0, 2)];
    }
}
