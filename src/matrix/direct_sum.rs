//! Merge and Split Matrices for Direct-Sum Decomposition
//!
//! At a grade (x, y) the multi-graded Betti computation compares the
//! complex D = K(x, y) with the direct sum of two coarsened complexes
//!
//!   B = K(x - 1, y),    C = K(x, y - 1)
//!
//! Here every simplex of a band is placed twice: once in B (shifted one
//! step along x) and once in C (shifted one step along y). Grid cells are
//! swept y outer, x inner; within a cell B placements come before C.
//!
//! - merge: ∂(B ⊕ C) in dimension hom_dim and the map B ⊕ C → D
//! - split: ∂(B ⊕ C) in dimension hom_dim + 1 and the map A → B ⊕ C

use tracing::debug;

use super::index::IndexMatrix;
use super::sparse::SparseBinaryMatrix;
use crate::error::TreeResult;
use crate::topology::{Axis, NodeId, SimplexTree};

/// Which coarsened summand a placement belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Summand {
    /// Shifted to (x + 1, y)
    B,
    /// Shifted to (x, y + 1)
    C,
}

/// Boundary, map and index matrices for one direct-sum step
#[derive(Debug, Clone)]
pub struct DirectSumMatrices {
    /// Block boundary matrix of B ⊕ C (B rows first, then C rows)
    pub boundary: SparseBinaryMatrix,
    /// Merge map [B ⊕ C → D] or split map [A → B ⊕ C]
    pub map: SparseBinaryMatrix,
    /// Last B ⊕ C column per grade, over a lattice one larger on each axis
    pub index: IndexMatrix,
}

impl SimplexTree {
    /// Matrices for the merge map B ⊕ C → D in dimension hom_dim.
    pub fn merge_matrices(&self) -> TreeResult<DirectSumMatrices> {
        let bands = self.bands()?;
        let (low, mid) = (bands.low(), bands.mid());
        let num_rows = low.len();
        let num_cols = mid.len();

        let mut boundary = SparseBinaryMatrix::new(2 * num_rows, 2 * num_cols);
        let mut map = SparseBinaryMatrix::new(num_cols, 2 * num_cols);
        let mut index = IndexMatrix::new(self.axis_size(Axis::X) + 1, self.axis_size(Axis::Y) + 1);

        self.sweep_direct_sum(
            mid,
            |summand, k, col| {
                let offset = match summand {
                    Summand::B => 0,
                    Summand::C => num_rows,
                };
                self.write_boundary_column(&mut boundary, mid[k], col, offset)?;
                map.set(k, col);
                Ok(())
            },
            |x, y, placed| index.set(x, y, placed as i64 - 1),
        )?;

        debug!(rows = num_rows, cols = num_cols, "exported merge matrices");
        Ok(DirectSumMatrices {
            boundary,
            map,
            index,
        })
    }

    /// Matrices for the split map A → B ⊕ C, with the B ⊕ C boundary in
    /// dimension hom_dim + 1.
    pub fn split_matrices(&self) -> TreeResult<DirectSumMatrices> {
        let bands = self.bands()?;
        let (mid, high) = (bands.mid(), bands.high());
        let num_rows = mid.len();
        let num_cols = high.len();

        let mut boundary = SparseBinaryMatrix::new(2 * num_rows, 2 * num_cols);
        let mut index = IndexMatrix::new(self.axis_size(Axis::X) + 1, self.axis_size(Axis::Y) + 1);
        self.sweep_direct_sum(
            high,
            |summand, k, col| {
                let offset = match summand {
                    Summand::B => 0,
                    Summand::C => num_rows,
                };
                self.write_boundary_column(&mut boundary, high[k], col, offset)
            },
            |x, y, placed| index.set(x, y, placed as i64 - 1),
        )?;

        // Each hom_dim simplex of A maps to its B copy plus its C copy
        let mut map = SparseBinaryMatrix::new(2 * num_rows, num_rows);
        self.sweep_direct_sum(
            mid,
            |_, k, row| {
                map.set(row, k);
                Ok(())
            },
            |_, _, _| {},
        )?;

        debug!(rows = num_rows, cols = num_cols, "exported split matrices");
        Ok(DirectSumMatrices {
            boundary,
            map,
            index,
        })
    }

    /// Place every simplex of `band` in B and in C, in sweep order.
    ///
    /// `place(summand, k, position)` receives the band position `k` of the
    /// simplex and its running position in B ⊕ C; `cell_done(x, y, placed)`
    /// runs after each cell with the number of placements so far.
    fn sweep_direct_sum<P, D>(
        &self,
        band: &[NodeId],
        mut place: P,
        mut cell_done: D,
    ) -> TreeResult<()>
    where
        P: FnMut(Summand, usize, usize) -> TreeResult<()>,
        D: FnMut(usize, usize, usize),
    {
        let width = self.axis_size(Axis::X) + 1;
        let height = self.axis_size(Axis::Y) + 1;
        let grade = |k: usize| self.node(band[k]).grade();

        let (mut b, mut c, mut placed) = (0usize, 0usize, 0usize);
        for y in 0..height {
            for x in 0..width {
                while b < band.len() && x.checked_sub(1) == Some(grade(b).0) && grade(b).1 == y {
                    place(Summand::B, b, placed)?;
                    b += 1;
                    placed += 1;
                }
                while c < band.len() && grade(c).0 == x && y.checked_sub(1) == Some(grade(c).1) {
                    place(Summand::C, c, placed)?;
                    c += 1;
                    placed += 1;
                }
                cell_done(x, y, placed);
            }
        }
        debug_assert_eq!(placed, 2 * band.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TreeConfig;

    /// Edges {0,1} at (0,0), {1,2} at (1,0), {2,3} at (0,1)
    fn staircase(hom_dim: usize) -> SimplexTree {
        let mut st = SimplexTree::new(TreeConfig::new(hom_dim));
        st.insert(&[0, 1], 0.0, 0.0).unwrap();
        st.insert(&[1, 2], 1.0, 0.0).unwrap();
        st.insert(&[2, 3], 0.0, 1.0).unwrap();
        st.update_dim_indexes();
        st
    }

    #[test]
    fn test_merge_interleaves_b_before_c() {
        let st = staircase(1);
        let dsm = st.merge_matrices().unwrap();

        // placements: B{0,1}, B{1,2}, C{0,1}, B{2,3}, C{1,2}, C{2,3}
        assert_eq!((dsm.map.n_rows(), dsm.map.n_cols()), (3, 6));
        let map_cols: Vec<Vec<usize>> = (0..3)
            .map(|k| (0..6).filter(|&col| dsm.map.get(k, col)).collect())
            .collect();
        assert_eq!(map_cols, vec![vec![0, 2], vec![1, 4], vec![3, 5]]);

        // vertex dim indexes: 0, 1 at (0,0); 2 at (1,0); 3 at (0,1)
        assert_eq!((dsm.boundary.n_rows(), dsm.boundary.n_cols()), (8, 6));
        let rows = |col: usize| dsm.boundary.column(col).iter().collect::<Vec<_>>();
        assert_eq!(rows(0), vec![0, 1]);
        assert_eq!(rows(1), vec![1, 2]);
        assert_eq!(rows(2), vec![4, 5]);
        assert_eq!(rows(3), vec![2, 3]);
        assert_eq!(rows(4), vec![5, 6]);
        assert_eq!(rows(5), vec![6, 7]);
    }

    #[test]
    fn test_merge_index_matrix() {
        let st = staircase(1);
        let idx = st.merge_matrices().unwrap().index;
        assert_eq!((idx.width(), idx.height()), (3, 3));

        let expected = [[-1, 0, 1], [2, 4, 4], [5, 5, 5]];
        for (y, row) in expected.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                assert_eq!(idx.get(x, y), value, "cell ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_split_map_places_each_simplex_twice() {
        let st = staircase(0);
        let dsm = st.split_matrices().unwrap();

        // vertices: B0, B1, B2, C0, C1, B3, C2, C3
        assert_eq!((dsm.map.n_rows(), dsm.map.n_cols()), (8, 4));
        let expected = [(0, 0), (1, 1), (2, 2), (3, 0), (4, 1), (5, 3), (6, 2), (7, 3)];
        for &(row, k) in &expected {
            assert!(dsm.map.get(row, k), "row {row}, column {k}");
        }
        assert_eq!(dsm.map.nnz(), 8);
    }

    #[test]
    fn test_split_boundary_matches_merge_one_dimension_down() {
        let split = staircase(0).split_matrices().unwrap();
        let merge = staircase(1).merge_matrices().unwrap();
        assert_eq!(split.boundary, merge.boundary);
        assert_eq!(split.index, merge.index);
    }

    #[test]
    fn test_empty_bands() {
        let mut st = SimplexTree::new(TreeConfig::new(1));
        st.insert(&[0], 0.0, 0.0).unwrap();
        st.update_dim_indexes();

        let merge = st.merge_matrices().unwrap();
        assert_eq!(merge.boundary.n_cols(), 0);
        assert!(merge.index.cells().iter().all(|&c| c == -1));

        let split = st.split_matrices().unwrap();
        assert_eq!(split.map.n_rows(), 0);
    }

    #[test]
    fn test_direct_sum_requires_dim_indexes() {
        let mut st = staircase(1);
        st.insert(&[4], 1.0, 1.0).unwrap();
        assert!(st.merge_matrices().is_err());
        assert!(st.split_matrices().is_err());
    }
}
