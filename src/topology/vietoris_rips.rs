//! Vietoris-Rips Bifiltration Construction
//!
//! Each point p carries a birth time b(p) and a position. The bifiltered
//! Vietoris-Rips complex contains a simplex σ at grade (t, ε) iff
//!
//! - every vertex of σ is born by time t: max b(v) ≤ t
//! - every pairwise distance in σ is at most ε: max d(vᵢ, vⱼ) ≤ ε
//!
//! so each simplex has a single minimal grade (max birth, max edge length).
//! The x axis of the grid holds the distinct birth times, the y axis the
//! distinct pairwise distances up to the cutoff (plus zero).

use ndarray::{Array2, ArrayView1};
use tracing::{info, trace};

use super::grid::{Axis, AxisGrid, Grid};
use super::node::NodeId;
use super::simplex_tree::SimplexTree;
use crate::config::{RipsConfig, TreeConfig};
use crate::error::{TreeError, TreeResult};

/// Points with a birth time each
#[derive(Debug, Clone)]
pub struct PointCloud {
    births: Vec<f64>,
    /// One row per point, one column per spatial coordinate
    positions: Array2<f64>,
}

impl PointCloud {
    pub fn new(births: Vec<f64>, positions: Array2<f64>) -> TreeResult<Self> {
        if births.len() != positions.nrows() {
            return Err(TreeError::InvalidPointCloud(format!(
                "{} birth times for {} points",
                births.len(),
                positions.nrows()
            )));
        }
        if positions.iter().any(|c| !c.is_finite()) {
            return Err(TreeError::InvalidPointCloud(
                "non-finite coordinate".to_string(),
            ));
        }
        if let Some(&bad) = births.iter().find(|b| !b.is_finite()) {
            return Err(TreeError::NonFiniteGrade {
                axis: Axis::X,
                value: bad,
            });
        }
        Ok(Self { births, positions })
    }

    /// All points born at time 0
    pub fn from_positions(positions: Array2<f64>) -> TreeResult<Self> {
        Self::new(vec![0.0; positions.nrows()], positions)
    }

    pub fn len(&self) -> usize {
        self.births.len()
    }

    pub fn is_empty(&self) -> bool {
        self.births.is_empty()
    }

    /// Ambient dimension of the positions
    pub fn spatial_dim(&self) -> usize {
        self.positions.ncols()
    }

    pub fn birth(&self, i: usize) -> f64 {
        self.births[i]
    }

    pub fn births(&self) -> &[f64] {
        &self.births
    }

    pub fn position(&self, i: usize) -> ArrayView1<'_, f64> {
        self.positions.row(i)
    }

    /// Euclidean distance between points i and j
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        let mut dist_sq = 0.0;
        for d in 0..self.spatial_dim() {
            let diff = self.positions[[i, d]] - self.positions[[j, d]];
            dist_sq += diff * diff;
        }
        dist_sq.sqrt()
    }
}

/// Pairwise distances stored as the strict upper triangle, row by row
#[derive(Debug, Clone)]
pub struct DistanceTable {
    n: usize,
    values: Vec<f64>,
}

impl DistanceTable {
    pub fn from_cloud(cloud: &PointCloud) -> Self {
        let n = cloud.len();
        let mut values = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            for j in i + 1..n {
                values.push(cloud.distance(i, j));
            }
        }
        Self { n, values }
    }

    /// Position of the pair (i, j), i < j, in the flattened triangle
    fn offset(&self, i: usize, j: usize) -> usize {
        self.n * i - i * (i + 3) / 2 + j - 1
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        match i.cmp(&j) {
            std::cmp::Ordering::Less => self.values[self.offset(i, j)],
            std::cmp::Ordering::Greater => self.values[self.offset(j, i)],
            std::cmp::Ordering::Equal => 0.0,
        }
    }

    pub fn n_points(&self) -> usize {
        self.n
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Vietoris-Rips bifiltration builder
pub struct VietorisRips {
    births: Vec<f64>,
    /// Distance table (precomputed)
    distances: DistanceTable,
    config: RipsConfig,
}

impl VietorisRips {
    /// Precompute all pairwise distances of the cloud
    pub fn from_points(cloud: &PointCloud, config: RipsConfig) -> TreeResult<Self> {
        config.validate()?;
        Ok(Self {
            births: cloud.births().to_vec(),
            distances: DistanceTable::from_cloud(cloud),
            config,
        })
    }

    pub fn n_points(&self) -> usize {
        self.births.len()
    }

    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.distances.get(i, j)
    }

    pub fn config(&self) -> &RipsConfig {
        &self.config
    }

    /// Axis grids: distinct births on x; zero and the distinct distances
    /// within the cutoff on y.
    pub fn grid(&self) -> TreeResult<Grid> {
        let max = self.config.max_distance;
        let x = AxisGrid::from_values(Axis::X, self.births.iter().copied())?;
        let y = AxisGrid::from_values(
            Axis::Y,
            std::iter::once(0.0).chain(
                self.distances
                    .values()
                    .iter()
                    .copied()
                    .filter(|&d| d <= max),
            ),
        )?;
        Ok(Grid::from_axes(x, y))
    }

    /// Build the simplex tree, assigning global indexes in the same
    /// preorder pass.
    pub fn build(&self, tree_config: TreeConfig) -> TreeResult<SimplexTree> {
        let mut tree = SimplexTree::with_grid(tree_config, self.grid()?);
        let mut next = 0usize;

        for i in 0..self.n_points() {
            let birth = self.births[i];
            let x = grade_index(&tree, Axis::X, birth)?;
            let node = tree.push_child(NodeId::ROOT, i, x, 0, next);
            next += 1;
            trace!(vertex = i, x, "added vertex");

            if self.config.max_simplex_dim >= 1 {
                let mut path = vec![i];
                next = self.build_subtree(&mut tree, node, &mut path, birth, 0.0, 1, next)?;
            }
        }

        tree.adopt_global_indexes();
        info!(
            points = self.n_points(),
            simplices = tree.simplex_count(),
            x_grades = tree.axis_size(Axis::X),
            y_grades = tree.axis_size(Axis::Y),
            "built Vietoris-Rips bifiltration"
        );
        Ok(tree)
    }

    /// Add every admissible coface of the simplex spelled by `path` whose new
    /// vertex exceeds the last one, recursing up to the dimension cap.
    /// Returns the next free global index.
    #[allow(clippy::too_many_arguments)]
    fn build_subtree(
        &self,
        tree: &mut SimplexTree,
        parent: NodeId,
        path: &mut Vec<usize>,
        prev_time: f64,
        prev_dist: f64,
        dim: usize,
        mut next: usize,
    ) -> TreeResult<usize> {
        let last = path.last().copied().unwrap_or(0);
        for j in last + 1..self.n_points() {
            let current_dist = path
                .iter()
                .map(|&p| self.distances.get(p, j))
                .fold(prev_dist, f64::max);

            if current_dist > self.config.max_distance {
                continue;
            }

            let current_time = prev_time.max(self.births[j]);
            let x = grade_index(tree, Axis::X, current_time)?;
            let y = grade_index(tree, Axis::Y, current_dist)?;
            let node = tree.push_child(parent, j, x, y, next);
            next += 1;
            trace!(vertex = j, parent = last, dim, current_dist, "added simplex");

            if dim < self.config.max_simplex_dim {
                path.push(j);
                next = self.build_subtree(
                    tree,
                    node,
                    path,
                    current_time,
                    current_dist,
                    dim + 1,
                    next,
                )?;
                path.pop();
            }
        }
        Ok(next)
    }
}

fn grade_index(tree: &SimplexTree, axis: Axis, value: f64) -> TreeResult<usize> {
    tree.grade_to_index(axis, value)
        .ok_or(TreeError::GradeNotFound { axis, value })
}

impl SimplexTree {
    /// Vietoris-Rips bifiltration of `cloud`, truncated at
    /// `rips.max_simplex_dim` and `rips.max_distance`
    pub fn build_vietoris_rips(
        config: TreeConfig,
        cloud: &PointCloud,
        rips: RipsConfig,
    ) -> TreeResult<Self> {
        VietorisRips::from_points(cloud, rips)?.build(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn scalene() -> PointCloud {
        // d(0,1) = √2, d(0,2) = √13, d(1,2) = √5
        PointCloud::from_positions(array![[0.0, 0.0], [1.0, 1.0], [3.0, 2.0]]).unwrap()
    }

    #[test]
    fn test_distance_table_offsets() {
        let cloud = PointCloud::from_positions(array![[0.0], [1.0], [3.0], [7.0]]).unwrap();
        let table = DistanceTable::from_cloud(&cloud);
        assert_eq!(table.values().len(), 6);
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(table.get(i, j), cloud.distance(i, j));
            }
        }
        assert_eq!(table.get(2, 3), 4.0);
        assert_eq!(table.get(3, 0), 7.0);
    }

    #[test]
    fn test_threshold_excludes_long_edge() {
        let st = SimplexTree::build_vietoris_rips(
            TreeConfig::new(1),
            &scalene(),
            RipsConfig::new(2, 3.0),
        )
        .unwrap();

        assert!(st.find_simplex(&[0, 1]).is_some());
        assert!(st.find_simplex(&[1, 2]).is_some());
        assert!(st.find_simplex(&[0, 2]).is_none());
        assert!(st.find_simplex(&[0, 1, 2]).is_none());
        assert_eq!(st.simplex_count(), 5);

        // y grid: 0, √2, √5
        assert_eq!(st.axis_size(Axis::Y), 3);
        let edge = st.node(st.find_simplex(&[1, 2]).unwrap());
        assert_eq!(st.index_to_grade(Axis::Y, edge.grade_y()), Some(5.0_f64.sqrt()));
    }

    #[test]
    fn test_triangle_grade_is_longest_edge() {
        let st = SimplexTree::build_vietoris_rips(
            TreeConfig::new(1),
            &scalene(),
            RipsConfig::new(2, 4.0),
        )
        .unwrap();

        assert_eq!(st.simplex_count(), 7);
        let tri = st.node(st.find_simplex(&[0, 1, 2]).unwrap());
        assert_eq!(st.index_to_grade(Axis::Y, tri.grade_y()), Some(13.0_f64.sqrt()));
    }

    #[test]
    fn test_dimension_cap() {
        let cloud = scalene();
        let rips = RipsConfig::new(0, 10.0);
        let st = SimplexTree::build_vietoris_rips(TreeConfig::new(0), &cloud, rips).unwrap();
        assert_eq!(st.simplex_count(), 3);


        let rips = RipsConfig::new(1, 10.0);
        let st = SimplexTree::build_vietoris_rips(TreeConfig::new(0), &cloud, rips).unwrap();
        assert_eq!(st.simplex_count(), 6);
        assert_eq!(st.count_in_dimension(2), 0);
    }

    #[test]
    fn test_birth_times_raise_grades() {
        let cloud = PointCloud::new(
            vec![0.0, 2.0, 1.0],
            array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
        )
        .unwrap();
        let rips = RipsConfig::new(2, 2.0);
        let st = SimplexTree::build_vietoris_rips(TreeConfig::new(1), &cloud, rips).unwrap();

        assert_eq!(st.grid().axis(Axis::X).values(), &[0.0, 1.0, 2.0]);
        let v1 = st.node(st.find_simplex(&[1]).unwrap());
        assert_eq!(v1.grade(), (2, 0));

        let e02 = st.node(st.find_simplex(&[0, 2]).unwrap());
        assert_eq!(st.index_to_grade(Axis::X, e02.grade_x()), Some(1.0));
        assert_eq!(st.index_to_grade(Axis::Y, e02.grade_y()), Some(1.0));

        let tri = st.node(st.find_simplex(&[0, 1, 2]).unwrap());
        assert_eq!(st.index_to_grade(Axis::X, tri.grade_x()), Some(2.0));
        assert_eq!(st.index_to_grade(Axis::Y, tri.grade_y()), Some(2.0_f64.sqrt()));
    }

    #[test]
    fn test_construction_global_indexes_match_reindex() {
        let cloud = PointCloud::from_positions(array![
            [0.0, 0.0],
            [1.0, 0.0],
            [1.0, 1.0],
            [0.0, 1.0],
            [0.5, 0.5]
        ])
        .unwrap();
        let rips = RipsConfig::new(3, 1.2);
        let built = SimplexTree::build_vietoris_rips(TreeConfig::new(1), &cloud, rips).unwrap();
        let mut reindexed = built.clone();
        reindexed.update_global_indexes();

        for gi in 0..built.simplex_count() {
            assert_eq!(built.find_vertices(gi).unwrap(), reindexed.find_vertices(gi).unwrap());
        }
    }

    #[test]
    fn test_mismatched_cloud_rejected() {
        let err = PointCloud::new(vec![0.0], array![[0.0], [1.0]]).unwrap_err();
        assert!(matches!(err, TreeError::InvalidPointCloud(_)));
        let err = PointCloud::new(vec![f64::NAN], array![[0.0]]).unwrap_err();
        assert!(matches!(err, TreeError::NonFiniteGrade { axis: Axis::X, .. }));
    }

    #[test]
    fn test_empty_cloud() {
        let cloud = PointCloud::from_positions(Array2::zeros((0, 2))).unwrap();
        let rips = RipsConfig::default();
        let st = SimplexTree::build_vietoris_rips(TreeConfig::default(), &cloud, rips).unwrap();
        assert_eq!(st.simplex_count(), 0);
        assert_eq!(st.axis_size(Axis::Y), 1);
    }
}
