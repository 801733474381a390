//! Matrix Module: Export for Multi-Parameter Reduction
//!
//! Read-only exporters over a re-indexed `SimplexTree`. Every call
//! allocates fresh matrices owned by the caller; nothing aliases the tree.
//!
//! - `boundary`: boundary matrices ∂_d in dimension-index order, against
//!   caller orders, or restricted to one grade; index matrices
//! - `direct_sum`: merge / split matrices for the B ⊕ C decomposition step
//!
//! Column order is the multi-grade sweep order (y outer, x inner), so an
//! index matrix cell addresses a prefix of the boundary matrix columns.

mod boundary;
mod direct_sum;
mod index;
mod sparse;

pub use direct_sum::{DirectSumMatrices, Summand};
pub use index::IndexMatrix;
pub use sparse::{SparseBinaryMatrix, SparseColumn};
