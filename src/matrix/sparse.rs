//! Sparse Matrices over Z/2Z
//!
//! Column-major storage: each column keeps the row indices of its nonzero
//! entries in a `BTreeSet`, so the lowest nonzero ("low") of a column is
//! its last element.

use std::collections::BTreeSet;
use std::fmt;

use ndarray::Array2;

/// Sparse column representation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparseColumn {
    /// Non-zero row indices
    rows: BTreeSet<usize>,
}

impl SparseColumn {
    pub fn new() -> Self {
        Self {
            rows: BTreeSet::new(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the lowest (maximum) non-zero index
    pub fn low(&self) -> Option<usize> {
        self.rows.iter().next_back().copied()
    }

    pub fn contains(&self, row: usize) -> bool {
        self.rows.contains(&row)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Non-zero row indices, ascending
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().copied()
    }
}

/// Binary matrix with rows × columns shape and column-major sparse storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseBinaryMatrix {
    n_rows: usize,
    columns: Vec<SparseColumn>,
}

impl SparseBinaryMatrix {
    /// Zero matrix
    pub fn new(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            columns: vec![SparseColumn::new(); n_cols],
        }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Set the entry at (row, col) to 1.
    ///
    /// # Panics
    /// Panics if (row, col) lies outside the matrix.
    pub fn set(&mut self, row: usize, col: usize) {
        assert!(
            row < self.n_rows,
            "row {row} out of range (n_rows={})",
            self.n_rows
        );
        self.columns[col].rows.insert(row);
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.columns
            .get(col)
            .map(|c| c.contains(row))
            .unwrap_or(false)
    }

    pub fn column(&self, col: usize) -> &SparseColumn {
        &self.columns[col]
    }

    pub fn columns(&self) -> &[SparseColumn] {
        &self.columns
    }

    /// Lowest nonzero row of a column, `None` for a zero column
    pub fn low(&self, col: usize) -> Option<usize> {
        self.columns[col].low()
    }

    /// Number of nonzero entries
    pub fn nnz(&self) -> usize {
        self.columns.iter().map(SparseColumn::len).sum()
    }

    /// Dense 0/1 copy
    pub fn to_dense(&self) -> Array2<u8> {
        let mut dense = Array2::<u8>::zeros((self.n_rows, self.n_cols()));
        for (j, column) in self.columns.iter().enumerate() {
            for i in column.iter() {
                dense[[i, j]] = 1;
            }
        }
        dense
    }
}

impl fmt::Display for SparseBinaryMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.n_rows {
            let row: Vec<&str> = self
                .columns
                .iter()
                .map(|c| if c.contains(i) { "1" } else { "0" })
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}
