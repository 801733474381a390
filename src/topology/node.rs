//! Simplex Tree Nodes
//!
//! Nodes live in an arena owned by the tree and refer to each other by
//! `NodeId`. A node at depth d (vertices have depth 0) represents the
//! d-simplex spelled by the vertex labels on the path from the root.

/// Stable handle into the simplex tree arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub(crate) const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// One simplex of the tree
#[derive(Debug, Clone)]
pub struct SimplexNode {
    /// Last vertex label of the simplex (unique among siblings)
    pub(crate) vertex: usize,
    pub(crate) parent: Option<NodeId>,
    /// Sorted by vertex label
    pub(crate) children: Vec<NodeId>,
    /// Grade index on the x axis
    pub(crate) grade_x: usize,
    /// Grade index on the y axis
    pub(crate) grade_y: usize,
    /// Simplex dimension (= depth below the root)
    pub(crate) dimension: usize,
    /// Preorder rank over the whole tree
    pub(crate) global_index: usize,
    /// Rank within the multi-grade ordered dimension band, if in a band
    pub(crate) dim_index: Option<usize>,
}

impl SimplexNode {
    pub(crate) fn root() -> Self {
        Self {
            vertex: usize::MAX,
            parent: None,
            children: Vec::new(),
            grade_x: 0,
            grade_y: 0,
            dimension: 0,
            global_index: usize::MAX,
            dim_index: None,
        }
    }

    pub(crate) fn new(
        vertex: usize,
        parent: NodeId,
        dimension: usize,
        grade_x: usize,
        grade_y: usize,
        global_index: usize,
    ) -> Self {
        Self {
            vertex,
            parent: Some(parent),
            children: Vec::new(),
            grade_x,
            grade_y,
            dimension,
            global_index,
            dim_index: None,
        }
    }

    pub fn vertex(&self) -> usize {
        self.vertex
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn grade_x(&self) -> usize {
        self.grade_x
    }

    pub fn grade_y(&self) -> usize {
        self.grade_y
    }

    /// Multi-grade as (x, y) grid indices
    pub fn grade(&self) -> (usize, usize) {
        (self.grade_x, self.grade_y)
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn global_index(&self) -> usize {
        self.global_index
    }

    pub fn dim_index(&self) -> Option<usize> {
        self.dim_index
    }
}
