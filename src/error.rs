//! Error Taxonomy
//!
//! Fatal conditions are either API misuse (asking for a matrix in a
//! dimension the tree was not indexed for, feeding unsorted vertices) or
//! structural corruption (a facet that closure promised but cannot be
//! found). None of them are retried. Legitimate absence is not an error:
//! lookups return `Option` or an empty list instead.

use thiserror::Error;

use crate::topology::Axis;

/// Root error type for simplex tree construction, lookup and export.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    /// Boundary or index matrix requested outside `{hom_dim, hom_dim + 1}`.
    #[error("invalid dimension request: {requested} (tree indexed for hom_dim = {hom_dim})")]
    InvalidDimension { requested: usize, hom_dim: usize },

    /// A facet guaranteed by closure could not be located.
    #[error("facet {facet:?} of simplex {simplex:?} not found in simplex tree")]
    MissingFacet {
        simplex: Vec<usize>,
        facet: Vec<usize>,
    },

    /// A global-index descent found no child at or below the key, so the
    /// sibling global indexes are not in preorder.
    #[error("traversal for global index {global_index} found no child at or below it")]
    EmptyTraversal { global_index: usize },

    /// Global index outside `[0, simplex_count)`.
    #[error("global index {global_index} out of range (tree holds {count} simplices)")]
    GlobalIndexOutOfRange { global_index: usize, count: usize },

    /// Vertex list is empty, unsorted or has duplicates.
    #[error("invalid simplex: {0}")]
    InvalidSimplex(String),

    /// Grade would break the strict ordering of an axis grid.
    #[error("grade {value} on {axis} axis is below the largest grid value {last}")]
    UnorderedGrade { axis: Axis, value: f64, last: f64 },

    /// Grade value that construction expected on an axis grid is missing.
    #[error("grade {value} not found on {axis} axis")]
    GradeNotFound { axis: Axis, value: f64 },

    /// NaN or infinite grade.
    #[error("non-finite grade {value} on {axis} axis")]
    NonFiniteGrade { axis: Axis, value: f64 },

    /// An exporter needs dimension indexes that a mutation invalidated.
    #[error("dimension indexes are stale; call update_dim_indexes() after mutating the tree")]
    StaleIndexes,

    /// Custom face ordering does not cover a facet.
    #[error("face with global index {global_index} missing from the supplied face ordering")]
    UnorderedFace { global_index: usize },

    /// Custom face ordering maps a face to a row past the matrix height.
    #[error("face {global_index} mapped to row {row} of a {n_rows}-row face ordering")]
    FaceRowOutOfRange {
        global_index: usize,
        row: usize,
        n_rows: usize,
    },

    /// A face is born strictly after one of its cofaces.
    #[error("facet {facet:?} is born after its coface {simplex:?}")]
    GradeInversion {
        simplex: Vec<usize>,
        facet: Vec<usize>,
    },

    /// Point births and positions disagree, or a coordinate is not finite.
    #[error("invalid point cloud: {0}")]
    InvalidPointCloud(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),
}

pub type TreeResult<T> = Result<T, TreeError>;
