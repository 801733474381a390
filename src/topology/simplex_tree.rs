//! Simplex Tree with Multi-Graded Simplices
//!
//! A simplex [v₀ < v₁ < ... < vₖ] is stored as the path root → v₀ → ... → vₖ,
//! so every prefix of a simplex is itself a node and each node's children
//! are sorted by vertex label.
//!
//! Every node carries two ranks:
//!
//! - **global index**: preorder rank over the whole tree, recomputed wholesale
//!   after mutation
//! - **dimension index**: rank inside one of the three dimension bands
//!   (hom_dim - 1, hom_dim, hom_dim + 1), ordered by multi-grade
//!
//! Neither rank is maintained incrementally. Any insertion invalidates both
//! until `update_global_indexes` / `update_dim_indexes` run again.

use std::cmp::Ordering;
use std::fmt;

use tracing::debug;

use super::grid::{Axis, Grid};
use super::node::{NodeId, SimplexNode};
use crate::config::TreeConfig;
use crate::error::{TreeError, TreeResult};

/// Grade indices and dimension of a simplex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimplexData {
    pub x: usize,
    pub y: usize,
    pub dimension: usize,
}

/// Multi-grade sweep order used for dimension indexes.
///
/// Ascending in y, then x, then global index: the order in which a sweep
/// over grid cells with y as the outer loop and x as the inner loop meets
/// the simplices.
pub fn multigrade_order(a: &SimplexNode, b: &SimplexNode) -> Ordering {
    a.grade_y
        .cmp(&b.grade_y)
        .then(a.grade_x.cmp(&b.grade_x))
        .then(a.global_index.cmp(&b.global_index))
}

/// Simplices of dimension hom_dim - 1, hom_dim and hom_dim + 1 in
/// multi-grade order
#[derive(Debug, Clone, Default)]
pub struct DimensionBands {
    pub(crate) low: Vec<NodeId>,
    pub(crate) mid: Vec<NodeId>,
    pub(crate) high: Vec<NodeId>,
}

impl DimensionBands {
    pub fn low(&self) -> &[NodeId] {
        &self.low
    }

    pub fn mid(&self) -> &[NodeId] {
        &self.mid
    }

    pub fn high(&self) -> &[NodeId] {
        &self.high
    }
}

/// Bifiltered simplicial complex stored as a simplex tree
#[derive(Debug, Clone)]
pub struct SimplexTree {
    config: TreeConfig,
    /// Arena; `nodes[0]` is the root and represents no simplex
    nodes: Vec<SimplexNode>,
    grid: Grid,
    /// Global index → node, valid while `global_stale` is false
    by_global: Vec<NodeId>,
    global_stale: bool,
    /// `None` until `update_dim_indexes` runs after the last mutation
    bands: Option<DimensionBands>,
}

impl SimplexTree {
    /// Create an empty tree with empty axis grids
    pub fn new(config: TreeConfig) -> Self {
        Self::with_grid(config, Grid::new())
    }

    pub(crate) fn with_grid(config: TreeConfig, grid: Grid) -> Self {
        Self {
            config,
            nodes: vec![SimplexNode::root()],
            grid,
            by_global: Vec::new(),
            global_stale: false,
            bands: None,
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn hom_dim(&self) -> usize {
        self.config.hom_dim
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Value → grade index on `axis`, `None` if the value is not a grid value
    pub fn grade_to_index(&self, axis: Axis, value: f64) -> Option<usize> {
        self.grid.grade_to_index(axis, value)
    }

    /// Grade index → value on `axis`
    pub fn index_to_grade(&self, axis: Axis, index: usize) -> Option<f64> {
        self.grid.index_to_grade(axis, index)
    }

    /// Number of distinct grade values on `axis`
    pub fn axis_size(&self, axis: Axis) -> usize {
        self.grid.axis_size(axis)
    }

    /// Total number of simplices
    pub fn simplex_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Number of simplices of dimension `dim`
    pub fn count_in_dimension(&self, dim: usize) -> usize {
        self.nodes[1..].iter().filter(|n| n.dimension == dim).count()
    }

    pub fn node(&self, id: NodeId) -> &SimplexNode {
        &self.nodes[id.0]
    }

    /// Vertices (top-level children of the root)
    pub fn vertices(&self) -> &[NodeId] {
        &self.nodes[NodeId::ROOT.0].children
    }

    /// Vertex labels of a node, read along its parent chain
    pub fn vertices_of(&self, id: NodeId) -> Vec<usize> {
        let mut vertices = Vec::with_capacity(self.nodes[id.0].dimension + 1);
        let mut cursor = id;
        while let Some(parent) = self.nodes[cursor.0].parent {
            vertices.push(self.nodes[cursor.0].vertex);
            cursor = parent;
        }
        vertices.reverse();
        vertices
    }

    // ── Insertion ──────────────────────────────────────────────────

    /// Insert a simplex and all of its faces born at grade (x, y), then
    /// recompute global indexes.
    ///
    /// `x` and `y` are real grade values. Values already on an axis reuse
    /// their index; values above the axis maximum are appended.
    ///
    /// Faces already in the tree keep their grade. The caller must not
    /// insert a simplex at a grade below that of an existing face;
    /// `boundary_matrix_at` reports such a pair as `GradeInversion`.
    pub fn insert(&mut self, vertices: &[usize], x: f64, y: f64) -> TreeResult<()> {
        self.insert_unindexed(vertices, x, y)?;
        self.update_global_indexes();
        Ok(())
    }

    /// Closure insertion without re-indexing. Global and dimension indexes
    /// are stale until `update_global_indexes` runs.
    pub fn insert_unindexed(&mut self, vertices: &[usize], x: f64, y: f64) -> TreeResult<()> {
        if vertices.is_empty() {
            return Err(TreeError::InvalidSimplex("empty vertex list".to_string()));
        }
        if vertices.windows(2).any(|w| w[0] >= w[1]) {
            return Err(TreeError::InvalidSimplex(format!(
                "vertices must be strictly increasing, got {vertices:?}"
            )));
        }
        self.grid.axis(Axis::X).admits(Axis::X, x)?;
        self.grid.axis(Axis::Y).admits(Axis::Y, y)?;
        let gx = self.grid.axis_mut(Axis::X).resolve_or_append(Axis::X, x)?;
        let gy = self.grid.axis_mut(Axis::Y).resolve_or_append(Axis::Y, y)?;

        self.add_faces(vertices, gx, gy);
        self.global_stale = true;
        self.bands = None;

        debug!(?vertices, x = gx, y = gy, simplices = self.simplex_count(), "inserted simplex");
        Ok(())
    }

    /// Walk/extend the tree along `vertices`, then ensure every facet exists.
    fn add_faces(&mut self, vertices: &[usize], x: usize, y: usize) {
        let mut node = NodeId::ROOT;
        let mut created = false;
        for (depth, &vertex) in vertices.iter().enumerate() {
            let (child, new) = self.add_child(node, vertex, depth, x, y);
            node = child;
            created = new;
        }

        // An existing simplex already has all of its faces
        if !created || vertices.len() < 2 {
            return;
        }

        // The facet missing the last vertex is the parent path, already present
        for skip in 0..vertices.len() - 1 {
            let facet: Vec<usize> = vertices
                .iter()
                .enumerate()
                .filter(|&(k, _)| k != skip)
                .map(|(_, &v)| v)
                .collect();
            self.add_faces(&facet, x, y);
        }
    }

    /// Child of `parent` labelled `vertex`, created if absent.
    fn add_child(
        &mut self,
        parent: NodeId,
        vertex: usize,
        dimension: usize,
        x: usize,
        y: usize,
    ) -> (NodeId, bool) {
        let search = {
            let nodes = &self.nodes;
            nodes[parent.0]
                .children
                .binary_search_by_key(&vertex, |c| nodes[c.0].vertex)
        };
        match search {
            Ok(pos) => (self.nodes[parent.0].children[pos], false),
            Err(pos) => {
                let id = NodeId(self.nodes.len());
                self.nodes
                    .push(SimplexNode::new(vertex, parent, dimension, x, y, usize::MAX));
                self.nodes[parent.0].children.insert(pos, id);
                (id, true)
            }
        }
    }

    /// Append a child carrying a preassigned global index. Children must
    /// arrive in increasing vertex order.
    pub(crate) fn push_child(
        &mut self,
        parent: NodeId,
        vertex: usize,
        x: usize,
        y: usize,
        global_index: usize,
    ) -> NodeId {
        let dimension = if parent == NodeId::ROOT {
            0
        } else {
            self.nodes[parent.0].dimension + 1
        };
        let id = NodeId(self.nodes.len());
        self.nodes
            .push(SimplexNode::new(vertex, parent, dimension, x, y, global_index));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Accept global indexes assigned during construction.
    pub(crate) fn adopt_global_indexes(&mut self) {
        let mut by_global = vec![NodeId::ROOT; self.simplex_count()];
        for (k, node) in self.nodes.iter().enumerate().skip(1) {
            by_global[node.global_index] = NodeId(k);
        }
        self.by_global = by_global;
        self.global_stale = false;
        self.bands = None;
    }

    // ── Re-indexing ────────────────────────────────────────────────

    /// Assign preorder ranks 0..N to every simplex.
    pub fn update_global_indexes(&mut self) {
        let mut by_global = Vec::with_capacity(self.simplex_count());
        let next = self.assign_global(NodeId::ROOT, 0, &mut by_global);
        debug_assert_eq!(next, self.simplex_count());
        self.by_global = by_global;
        self.global_stale = false;
        self.bands = None;
    }

    /// Number the subtree below `node` starting at `next`; returns the next
    /// free index.
    fn assign_global(&mut self, node: NodeId, mut next: usize, order: &mut Vec<NodeId>) -> usize {
        for k in 0..self.nodes[node.0].children.len() {
            let child = self.nodes[node.0].children[k];
            self.nodes[child.0].global_index = next;
            order.push(child);
            next = self.assign_global(child, next + 1, order);
        }
        next
    }

    /// Collect the three dimension bands, sort them by multi-grade and
    /// number each band from 0.
    pub fn update_dim_indexes(&mut self) {
        if self.global_stale {
            self.update_global_indexes();
        }

        let hom_dim = self.config.hom_dim;
        let mut bands = DimensionBands::default();
        for (k, node) in self.nodes.iter_mut().enumerate().skip(1) {
            node.dim_index = None;
            let id = NodeId(k);
            if Some(node.dimension) == hom_dim.checked_sub(1) {
                bands.low.push(id);
            } else if node.dimension == hom_dim {
                bands.mid.push(id);
            } else if node.dimension == hom_dim + 1 {
                bands.high.push(id);
            }
        }

        for band in [&mut bands.low, &mut bands.mid, &mut bands.high] {
            let nodes = &self.nodes;
            band.sort_by(|a, b| multigrade_order(&nodes[a.0], &nodes[b.0]));
            for (i, id) in band.iter().enumerate() {
                self.nodes[id.0].dim_index = Some(i);
            }
        }

        debug!(
            hom_dim,
            low = bands.low.len(),
            mid = bands.mid.len(),
            high = bands.high.len(),
            "updated dimension indexes"
        );
        self.bands = Some(bands);
    }

    /// Ordered bands; fails if the tree changed since `update_dim_indexes`
    pub fn bands(&self) -> TreeResult<&DimensionBands> {
        match (&self.bands, self.global_stale) {
            (Some(bands), false) => Ok(bands),
            _ => Err(TreeError::StaleIndexes),
        }
    }

    /// Multi-grade ordered simplices of dimension `dim`, which must be one
    /// of hom_dim - 1, hom_dim, hom_dim + 1.
    pub fn dimension_band(&self, dim: usize) -> TreeResult<&[NodeId]> {
        let bands = self.bands()?;
        let hom_dim = self.config.hom_dim;
        if dim == hom_dim {
            Ok(&bands.mid)
        } else if dim == hom_dim + 1 {
            Ok(&bands.high)
        } else if Some(dim) == hom_dim.checked_sub(1) {
            Ok(&bands.low)
        } else {
            Err(TreeError::InvalidDimension {
                requested: dim,
                hom_dim,
            })
        }
    }

    // ── Lookup ─────────────────────────────────────────────────────

    /// Node of the simplex with the given sorted vertex labels
    pub fn find_simplex(&self, vertices: &[usize]) -> Option<NodeId> {
        if vertices.is_empty() {
            return None;
        }
        let mut node = NodeId::ROOT;
        for &vertex in vertices {
            let kids = &self.nodes[node.0].children;
            let pos = kids
                .binary_search_by_key(&vertex, |c| self.nodes[c.0].vertex)
                .ok()?;
            node = kids[pos];
        }
        Some(node)
    }

    /// Node holding global index `global_index`
    pub fn node_by_global(&self, global_index: usize) -> TreeResult<NodeId> {
        self.check_global(global_index)?;
        Ok(self.by_global[global_index])
    }

    /// Vertex labels of the simplex with global index `global_index`
    pub fn find_vertices(&self, global_index: usize) -> TreeResult<Vec<usize>> {
        let mut vertices = Vec::new();
        self.descend(global_index, |node| vertices.push(node.vertex))?;
        Ok(vertices)
    }

    /// Grade indices and dimension of the simplex with `global_index`
    pub fn simplex_data(&self, global_index: usize) -> TreeResult<SimplexData> {
        let mut depth = 0usize;
        let target = self.descend(global_index, |_| depth += 1)?;
        let node = &self.nodes[target.0];
        Ok(SimplexData {
            x: node.grade_x,
            y: node.grade_y,
            dimension: depth - 1,
        })
    }

    /// Descend from the root by global index: at each level take the child
    /// with the greatest global index ≤ `key`, stopping on an exact match.
    /// `visit` sees every node on the path, target included.
    fn descend(&self, key: usize, mut visit: impl FnMut(&SimplexNode)) -> TreeResult<NodeId> {
        self.check_global(key)?;
        let mut node = NodeId::ROOT;
        loop {
            let kids = &self.nodes[node.0].children;
            let pos = kids.partition_point(|c| self.nodes[c.0].global_index <= key);
            if pos == 0 {
                return Err(TreeError::EmptyTraversal { global_index: key });
            }
            let child = kids[pos - 1];
            let child_node = &self.nodes[child.0];
            visit(child_node);
            if child_node.global_index == key {
                return Ok(child);
            }
            node = child;
        }
    }

    fn check_global(&self, global_index: usize) -> TreeResult<()> {
        if self.global_stale {
            return Err(TreeError::StaleIndexes);
        }
        let count = self.simplex_count();
        if global_index >= count {
            return Err(TreeError::GlobalIndexOutOfRange {
                global_index,
                count,
            });
        }
        Ok(())
    }

    /// Global indexes, in preorder, of the `dim`-simplices whose grade is
    /// dominated by (x, y).
    pub fn find_nodes_at(&self, x: usize, y: usize, dim: usize) -> TreeResult<Vec<usize>> {
        if self.global_stale {
            return Err(TreeError::StaleIndexes);
        }
        let mut found = Vec::new();
        self.collect_dominated(NodeId::ROOT, 0, x, y, dim, &mut found);
        Ok(found)
    }

    fn collect_dominated(
        &self,
        node: NodeId,
        depth: usize,
        x: usize,
        y: usize,
        dim: usize,
        found: &mut Vec<usize>,
    ) {
        for &child in &self.nodes[node.0].children {
            let c = &self.nodes[child.0];
            if depth == dim {
                if c.grade_x <= x && c.grade_y <= y {
                    found.push(c.global_index);
                }
            } else {
                self.collect_dominated(child, depth + 1, x, y, dim, found);
            }
        }
    }

    fn fmt_subtree(&self, f: &mut fmt::Formatter<'_>, node: NodeId, indent: usize) -> fmt::Result {
        for &child in &self.nodes[node.0].children {
            let c = &self.nodes[child.0];
            write!(
                f,
                "{:indent$}{} grade=({}, {}) gi={}",
                "",
                c.vertex,
                c.grade_x,
                c.grade_y,
                c.global_index,
                indent = 2 * indent
            )?;
            if let Some(di) = c.dim_index {
                write!(f, " di={di}")?;
            }
            writeln!(f)?;
            self.fmt_subtree(f, child, indent + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for SimplexTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "SimplexTree: {} simplices, grid {}x{}, hom_dim {}",
            self.simplex_count(),
            self.axis_size(Axis::X),
            self.axis_size(Axis::Y),
            self.config.hom_dim
        )?;
        self.fmt_subtree(f, NodeId::ROOT, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(hom_dim: usize) -> SimplexTree {
        SimplexTree::new(TreeConfig::new(hom_dim))
    }

    #[test]
    fn test_insert_triangle_closure() {
        let mut st = tree(1);
        st.insert(&[1, 2, 4], 0.0, 0.0).unwrap();

        assert_eq!(st.simplex_count(), 7);
        for face in [
            vec![1],
            vec![2],
            vec![4],
            vec![1, 2],
            vec![1, 4],
            vec![2, 4],
            vec![1, 2, 4],
        ] {
            let id = st.find_simplex(&face).expect("face present");
            assert_eq!(st.vertices_of(id), face);
        }
        assert!(st.find_simplex(&[1, 3]).is_none());
        assert!(st.find_simplex(&[]).is_none());
    }

    #[test]
    fn test_reinsert_is_noop() {
        let mut st = tree(1);
        st.insert(&[0, 1], 0.0, 1.0).unwrap();
        st.insert(&[0, 1], 2.0, 3.0).unwrap();
        st.insert(&[1], 5.0, 5.0).unwrap();

        assert_eq!(st.simplex_count(), 3);
        let edge = st.find_simplex(&[0, 1]).unwrap();
        assert_eq!(st.node(edge).grade(), (0, 0));
    }

    #[test]
    fn test_invalid_vertex_lists() {
        let mut st = tree(1);
        assert!(matches!(st.insert(&[], 0.0, 0.0), Err(TreeError::InvalidSimplex(_))));
        assert!(matches!(st.insert(&[2, 1], 0.0, 0.0), Err(TreeError::InvalidSimplex(_))));
        assert!(matches!(st.insert(&[1, 1], 0.0, 0.0), Err(TreeError::InvalidSimplex(_))));
        assert_eq!(st.simplex_count(), 0);
        assert_eq!(st.axis_size(Axis::X), 0);
    }

    #[test]
    fn test_rejected_grade_leaves_grids_untouched() {
        let mut st = tree(1);
        st.insert(&[0], 1.0, 1.0).unwrap();
        let err = st.insert(&[1], 2.0, 0.5).unwrap_err();
        assert!(matches!(err, TreeError::UnorderedGrade { axis: Axis::Y, .. }));
        assert_eq!(st.axis_size(Axis::X), 1);
        assert_eq!(st.simplex_count(), 1);
    }

    #[test]
    fn test_global_indexes_are_preorder() {
        let mut st = tree(1);
        st.insert(&[2, 3], 0.0, 0.0).unwrap();
        st.insert(&[0, 1, 2], 1.0, 1.0).unwrap();

        // preorder: 0, 01, 012, 02, 1, 12, 2, 23, 3
        let expected: Vec<Vec<usize>> = vec![
            vec![0],
            vec![0, 1],
            vec![0, 1, 2],
            vec![0, 2],
            vec![1],
            vec![1, 2],
            vec![2],
            vec![2, 3],
            vec![3],
        ];
        for (gi, verts) in expected.iter().enumerate() {
            let id = st.find_simplex(verts).unwrap();
            assert_eq!(st.node(id).global_index(), gi);
            assert_eq!(st.find_vertices(gi).unwrap(), *verts);
            assert_eq!(st.node_by_global(gi).unwrap(), id);
        }
    }

    #[test]
    fn test_batched_insertion_matches_incremental() {
        let simplices: [&[usize]; 3] = [&[0, 1, 2], &[1, 3], &[2, 3, 4]];

        let mut incremental = tree(1);
        for s in simplices {
            incremental.insert(s, 0.0, 0.0).unwrap();
        }

        let mut batched = tree(1);
        for s in simplices.iter().rev() {
            batched.insert_unindexed(s, 0.0, 0.0).unwrap();
        }
        assert!(matches!(batched.find_vertices(0), Err(TreeError::StaleIndexes)));
        batched.update_global_indexes();

        assert_eq!(incremental.simplex_count(), batched.simplex_count());
        for gi in 0..incremental.simplex_count() {
            assert_eq!(
                incremental.find_vertices(gi).unwrap(),
                batched.find_vertices(gi).unwrap()
            );
        }
    }

    #[test]
    fn test_find_vertices_first_child() {
        let mut st = tree(1);
        st.insert(&[3, 5], 0.0, 0.0).unwrap();
        st.insert(&[7], 0.0, 0.0).unwrap();
        let first = st.vertices()[0];
        let gi = st.node(first).global_index();
        assert_eq!(st.find_vertices(gi).unwrap(), vec![3]);
    }

    #[test]
    fn test_simplex_data() {
        let mut st = tree(1);
        st.insert(&[0, 1], 0.0, 0.0).unwrap();
        st.insert(&[0, 1, 2], 1.0, 2.5).unwrap();

        let id = st.find_simplex(&[0, 1, 2]).unwrap();
        let data = st.simplex_data(st.node(id).global_index()).unwrap();
        assert_eq!(data, SimplexData { x: 1, y: 1, dimension: 2 });

        let vertex = st.find_simplex(&[0]).unwrap();
        let data = st.simplex_data(st.node(vertex).global_index()).unwrap();
        assert_eq!(data, SimplexData { x: 0, y: 0, dimension: 0 });

        assert!(matches!(
            st.simplex_data(st.simplex_count()),
            Err(TreeError::GlobalIndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_dimension_indexes_follow_multigrade_order() {
        let mut st = tree(1);
        // vertices and {2,3} at (0,0); {0,1} at (1,0); {1,2} at (0,1); {0,2} at (1,1)
        st.insert(&[0], 0.0, 0.0).unwrap();
        st.insert(&[1], 0.0, 0.0).unwrap();
        st.insert(&[2, 3], 0.0, 0.0).unwrap();
        st.insert_unindexed(&[0, 1], 1.0, 0.0).unwrap();
        st.insert_unindexed(&[1, 2], 0.0, 1.0).unwrap();
        st.insert_unindexed(&[0, 2], 1.0, 1.0).unwrap();
        st.update_dim_indexes();

        // (1,0) precedes (0,1): y is the outer sweep
        let band = st.dimension_band(1).unwrap();
        let order: Vec<Vec<usize>> = band.iter().map(|&id| st.vertices_of(id)).collect();
        assert_eq!(order, vec![vec![2, 3], vec![0, 1], vec![1, 2], vec![0, 2]]);
        for (i, &id) in band.iter().enumerate() {
            assert_eq!(st.node(id).dim_index(), Some(i));
        }

        // all vertices at (0,0): ties fall back to global index
        let low = st.dimension_band(0).unwrap();
        let low_order: Vec<usize> = low.iter().map(|&id| st.node(id).vertex()).collect();
        assert_eq!(low_order, vec![0, 1, 2, 3]);
        assert!(st.dimension_band(2).unwrap().is_empty());
        assert!(matches!(
            st.dimension_band(3),
            Err(TreeError::InvalidDimension { requested: 3, hom_dim: 1 })
        ));
    }

    #[test]
    fn test_bands_stale_after_insert() {
        let mut st = tree(0);
        st.insert(&[0, 1], 0.0, 0.0).unwrap();
        st.update_dim_indexes();
        assert_eq!(st.dimension_band(0).unwrap().len(), 2);
        st.insert(&[2], 0.0, 0.0).unwrap();
        assert!(matches!(st.bands(), Err(TreeError::StaleIndexes)));
    }

    #[test]
    fn test_find_nodes_at() {
        let mut st = tree(1);
        st.insert(&[0, 1], 0.0, 0.0).unwrap();
        st.insert(&[1, 2], 1.0, 0.0).unwrap();
        st.insert(&[0, 2], 1.0, 1.0).unwrap();

        let gi = |verts: &[usize]| st.node(st.find_simplex(verts).unwrap()).global_index();

        assert_eq!(st.find_nodes_at(0, 0, 1).unwrap(), vec![gi(&[0, 1])]);
        assert_eq!(st.find_nodes_at(1, 0, 1).unwrap(), vec![gi(&[0, 1]), gi(&[1, 2])]);
        assert_eq!(st.find_nodes_at(1, 1, 1).unwrap().len(), 3);
        assert_eq!(st.find_nodes_at(1, 1, 0).unwrap().len(), 3);
        assert!(st.find_nodes_at(1, 1, 2).unwrap().is_empty());
    }

    #[test]
    fn test_display_lists_every_simplex() {
        let mut st = tree(1);
        st.insert(&[0, 1], 0.0, 0.0).unwrap();
        let dump = st.to_string();
        assert!(dump.starts_with("SimplexTree: 3 simplices"));
        assert_eq!(dump.lines().count(), 4);
    }

    #[test]
    fn test_descent_without_candidate_child() {
        // Vertex 0 carries index 1 and its only child carries index 0
        let mut st = tree(1);
        let v0 = st.push_child(NodeId::ROOT, 0, 0, 0, 1);
        st.push_child(v0, 1, 0, 0, 0);
        st.adopt_global_indexes();

        assert_eq!(
            st.find_vertices(0),
            Err(TreeError::EmptyTraversal { global_index: 0 })
        );
        assert_eq!(
            st.simplex_data(0),
            Err(TreeError::EmptyTraversal { global_index: 0 })
        );
        assert_eq!(st.find_vertices(1).unwrap(), vec![0]);
    }
}
