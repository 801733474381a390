//! Boundary and Index Matrix Export
//!
//! The boundary matrix ∂_d has one column per d-simplex and one row per
//! (d-1)-simplex, with a 1 where the row simplex is a facet of the column
//! simplex. Over Z/2Z:
//!
//!   ∂[v₀, ..., vₖ] = Σᵢ [v₀, ..., v̂ᵢ, ..., vₖ]
//!
//! Columns and rows follow the dimension index (multi-grade sweep order),
//! which is the order the downstream reduction expects.

use std::collections::HashMap;

use tracing::debug;

use super::index::IndexMatrix;
use super::sparse::SparseBinaryMatrix;
use crate::error::{TreeError, TreeResult};
use crate::topology::{Axis, NodeId, SimplexTree};

/// Every facet of a sorted vertex list, dropping vertex 0, 1, ... in turn
fn facets(vertices: &[usize]) -> impl Iterator<Item = Vec<usize>> + '_ {
    (0..vertices.len()).map(move |skip| {
        vertices
            .iter()
            .enumerate()
            .filter(|&(k, _)| k != skip)
            .map(|(_, &v)| v)
            .collect()
    })
}

impl SimplexTree {
    /// Boundary matrix of the `dim`-simplices, `dim ∈ {hom_dim, hom_dim + 1}`,
    /// with rows and columns in dimension-index order.
    pub fn boundary_matrix(&self, dim: usize) -> TreeResult<SparseBinaryMatrix> {
        self.check_export_dim(dim)?;
        let columns = self.dimension_band(dim)?;
        let n_rows = match dim.checked_sub(1) {
            Some(face_dim) => self.dimension_band(face_dim)?.len(),
            None => 0,
        };

        let mut mat = SparseBinaryMatrix::new(n_rows, columns.len());
        for (col, &id) in columns.iter().enumerate() {
            self.write_boundary_column(&mut mat, id, col, 0)?;
        }

        debug!(
            dim,
            rows = n_rows,
            cols = columns.len(),
            nnz = mat.nnz(),
            "exported boundary matrix"
        );
        Ok(mat)
    }

    /// Boundary matrix against caller-chosen orders.
    ///
    /// `coface_global[j]` is the global index of the simplex in column j;
    /// `face_order` maps the global index of each face to its row.
    pub fn boundary_matrix_with_order(
        &self,
        coface_global: &[usize],
        face_order: &HashMap<usize, usize>,
    ) -> TreeResult<SparseBinaryMatrix> {
        let n_rows = face_order.len();
        let mut mat = SparseBinaryMatrix::new(n_rows, coface_global.len());

        for (col, &global_index) in coface_global.iter().enumerate() {
            let vertices = self.find_vertices(global_index)?;
            if vertices.len() < 2 {
                continue;
            }
            for facet in facets(&vertices) {
                let facet_node = self.find_simplex(&facet).ok_or_else(|| TreeError::MissingFacet {
                    simplex: vertices.clone(),
                    facet: facet.clone(),
                })?;
                let face_global = self.node(facet_node).global_index();
                let row = face_order
                    .get(&face_global)
                    .copied()
                    .ok_or(TreeError::UnorderedFace {
                        global_index: face_global,
                    })?;
                if row >= n_rows {
                    return Err(TreeError::FaceRowOutOfRange {
                        global_index: face_global,
                        row,
                        n_rows,
                    });
                }
                mat.set(row, col);
            }
        }
        Ok(mat)
    }

    /// Boundary matrix of the `dim`-simplices present at grade (x, y).
    ///
    /// Columns are the `dim`-simplices dominated by (x, y) and rows the
    /// dominated (dim-1)-simplices, both in preorder. Fails with
    /// `GradeInversion` if a column simplex has a facet born after it.
    pub fn boundary_matrix_at(
        &self,
        x: usize,
        y: usize,
        dim: usize,
    ) -> TreeResult<SparseBinaryMatrix> {
        let columns = self.find_nodes_at(x, y, dim)?;
        for &global_index in &columns {
            self.check_face_grades(self.node_by_global(global_index)?)?;
        }
        let faces = match dim.checked_sub(1) {
            Some(face_dim) => self.find_nodes_at(x, y, face_dim)?,
            None => Vec::new(),
        };
        let face_order: HashMap<usize, usize> = faces
            .into_iter()
            .enumerate()
            .map(|(row, global_index)| (global_index, row))
            .collect();
        self.boundary_matrix_with_order(&columns, &face_order)
    }

    /// Index matrix of the `dim`-simplices over the full grade lattice.
    ///
    /// Filled by one forward sweep over the dimension-ordered simplices in
    /// linear cell order (y outer, x inner): cells before a simplex's grade
    /// carry the previous column, the cell at its grade gets its column,
    /// cells after the last simplex carry the final column.
    pub fn index_matrix(&self, dim: usize) -> TreeResult<IndexMatrix> {
        self.check_export_dim(dim)?;
        let simplices = self.dimension_band(dim)?;
        let width = self.axis_size(Axis::X);
        let height = self.axis_size(Axis::Y);
        let mut mat = IndexMatrix::new(width, height);

        let mut cur_entry = 0usize;
        for (col, &id) in simplices.iter().enumerate() {
            let node = self.node(id);
            let cell = node.grade_x() + node.grade_y() * width;
            while cur_entry < cell {
                mat.set_linear(cur_entry, col as i64 - 1);
                cur_entry += 1;
            }
            mat.set(node.grade_x(), node.grade_y(), col as i64);
        }

        let last = simplices.len() as i64 - 1;
        while cur_entry < width * height {
            mat.set_linear(cur_entry, last);
            cur_entry += 1;
        }

        debug!(dim, width, height, columns = simplices.len(), "exported index matrix");
        Ok(mat)
    }

    /// Write the facets of `simplex` into column `col`, rows shifted by `offset`.
    pub(crate) fn write_boundary_column(
        &self,
        mat: &mut SparseBinaryMatrix,
        simplex: NodeId,
        col: usize,
        offset: usize,
    ) -> TreeResult<()> {
        let vertices = self.vertices_of(simplex);
        if vertices.len() < 2 {
            return Ok(());
        }
        for facet in facets(&vertices) {
            let row = self
                .find_simplex(&facet)
                .and_then(|id| self.node(id).dim_index())
                .ok_or_else(|| TreeError::MissingFacet {
                    simplex: vertices.clone(),
                    facet: facet.clone(),
                })?;
            mat.set(row + offset, col);
        }
        Ok(())
    }

    /// Every facet of `simplex` must be born no later than the simplex.
    fn check_face_grades(&self, simplex: NodeId) -> TreeResult<()> {
        let vertices = self.vertices_of(simplex);
        if vertices.len() < 2 {
            return Ok(());
        }
        let (x, y) = self.node(simplex).grade();
        for facet in facets(&vertices) {
            let facet_node = self.find_simplex(&facet).ok_or_else(|| TreeError::MissingFacet {
                simplex: vertices.clone(),
                facet: facet.clone(),
            })?;
            let (fx, fy) = self.node(facet_node).grade();
            if fx > x || fy > y {
                return Err(TreeError::GradeInversion {
                    simplex: vertices.clone(),
                    facet,
                });
            }
        }
        Ok(())
    }

    fn check_export_dim(&self, dim: usize) -> TreeResult<()> {
        let hom_dim = self.hom_dim();
        if dim == hom_dim || dim == hom_dim + 1 {
            Ok(())
        } else {
            Err(TreeError::InvalidDimension {
                requested: dim,
                hom_dim,
            })
        }
    }
}
