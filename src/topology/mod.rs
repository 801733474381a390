//! Topology Module: Bifiltered Simplicial Complexes
//!
//! Implements the combinatorial structures of two-parameter persistence:
//! - Axis grids of real filtration values
//! - Simplex tree with multi-graded simplices
//! - Vietoris-Rips bifiltration (birth time × distance)
//!
//! ## Mathematical Background
//!
//! A bifiltration is a family of simplicial complexes K(x, y) indexed by
//! two parameters with K(x, y) ⊆ K(x', y') whenever x ≤ x' and y ≤ y'.
//! Every simplex σ enters at a single minimal grade (x_σ, y_σ), stored on
//! its tree node as a pair of indices into the axis grids.
//!
//! ## Two Orders
//!
//! - Global index: preorder rank of a simplex in the tree
//! - Dimension index: rank within the simplices of one dimension when
//!   sorted by grade, y ascending first and x ascending second

mod grid;
mod node;
mod simplex_tree;
mod vietoris_rips;

pub use grid::{Axis, AxisGrid, Grid};
pub use node::{NodeId, SimplexNode};
pub use simplex_tree::{multigrade_order, DimensionBands, SimplexData, SimplexTree};
pub use vietoris_rips::{DistanceTable, PointCloud, VietorisRips};
