//! # TDA-Bifiltration
//!
//! Combinatorial core of two-parameter persistent homology: bifiltered
//! simplicial complexes stored in a simplex tree, and the sparse matrices
//! a multi-graded Betti number computation reduces.
//!
//! ## Theoretical Framework
//!
//! A bifiltration assigns every simplex σ a grade (x_σ, y_σ) such that
//! faces are born no later than their cofaces. The Vietoris-Rips builder
//! guarantees this; explicit insertion leaves it to the caller, since a
//! face already present keeps its grade. For a point cloud with
//! birth times, the bifiltered Vietoris-Rips complex uses
//!
//!   x_σ = max birth(v),   y_σ = max d(vᵢ, vⱼ)   over vertices of σ
//!
//! ### Pipeline
//!
//! 1. **Build**: explicit insertion with face closure, or Vietoris-Rips
//!    construction from a point cloud with a distance cutoff
//!
//! 2. **Index**: global index (preorder rank) and dimension index
//!    (multi-grade rank in dimensions hom_dim - 1, hom_dim, hom_dim + 1)
//!
//! 3. **Export**: boundary matrices over Z/2Z, index matrices over the
//!    grade lattice, merge / split matrices for the direct-sum step
//!
//! Reduction of the exported matrices and the Betti numbers themselves
//! are left to the consumer.
//!
//! ## Example
//!
//! ```
//! use tda_bifiltration::{SimplexTree, TreeConfig};
//!
//! let mut tree = SimplexTree::new(TreeConfig::new(1));
//! tree.insert(&[1, 2, 4], 0.0, 0.0).unwrap();
//! tree.update_dim_indexes();
//!
//! let d2 = tree.boundary_matrix(2).unwrap();
//! assert_eq!(d2.column(0).len(), 3);
//! ```
//!
//! ## References
//!
//! - Carlsson & Zomorodian, "The Theory of Multidimensional Persistence" (2009)
//! - Boissonnat & Maria, "The Simplex Tree" (2014)
//! - Lesnick & Wright, "Computing Minimal Presentations and Bigraded Betti
//!   Numbers of 2-Parameter Persistent Homology" (2019)

pub mod config;
pub mod error;
pub mod matrix;
pub mod topology;

pub use config::{RipsConfig, TreeConfig};
pub use error::{TreeError, TreeResult};

// Re-exports from topology
pub use topology::{
    multigrade_order,
    Axis,
    AxisGrid,
    DimensionBands,
    DistanceTable,
    Grid,
    NodeId,
    PointCloud,
    SimplexData,
    SimplexNode,
    SimplexTree,
    VietorisRips,
};

// Re-exports from matrix
pub use matrix::{
    DirectSumMatrices,
    IndexMatrix,
    SparseBinaryMatrix,
    SparseColumn,
    Summand,
};
