//! Index Matrices: Last Column per Multi-Grade
//!
//! Cell (x, y) holds the last boundary-matrix column whose simplex is born
//! at or before (x, y) in the sweep order, or -1 when none is. A
//! consumer reads the boundary map at grade (x, y) as the column prefix
//! 0..=cell without storing one matrix per grade.

use ndarray::Array2;

/// Dense integer matrix over the grade lattice, stored as `cells[[y, x]]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMatrix {
    cells: Array2<i64>,
}

impl IndexMatrix {
    /// Matrix of the given width (x) and height (y) filled with -1
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: Array2::from_elem((height, width), -1),
        }
    }

    /// Number of x grades
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of y grades
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    pub fn get(&self, x: usize, y: usize) -> i64 {
        self.cells[[y, x]]
    }

    pub fn set(&mut self, x: usize, y: usize, value: i64) {
        self.cells[[y, x]] = value;
    }

    /// Last column at (x, y), `None` where the cell is -1
    pub fn last_column(&self, x: usize, y: usize) -> Option<usize> {
        usize::try_from(self.get(x, y)).ok()
    }

    /// Raw cells, indexed `[[y, x]]`
    pub fn cells(&self) -> &Array2<i64> {
        &self.cells
    }

    /// Set the cell at linear position `y * width + x`
    pub(crate) fn set_linear(&mut self, position: usize, value: i64) {
        let width = self.width();
        self.cells[[position / width, position % width]] = value;
    }
}
