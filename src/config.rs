//! Configuration for simplex trees and Vietoris-Rips bifiltrations

use serde::{Deserialize, Serialize};

use crate::error::{TreeError, TreeResult};
use crate::topology::PointCloud;

/// Simplex tree configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Homology dimension the dimension indexes are prepared for.
    /// Bands at hom_dim - 1, hom_dim and hom_dim + 1 receive dimension indexes.
    pub hom_dim: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self { hom_dim: 1 }
    }
}

impl TreeConfig {
    pub fn new(hom_dim: usize) -> Self {
        Self { hom_dim }
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> TreeResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| TreeError::Config(format!("JSON parse error: {e}")))
    }
}

/// Vietoris-Rips construction parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RipsConfig {
    /// Largest simplex dimension built
    pub max_simplex_dim: usize,
    /// Largest edge length admitted into the complex
    pub max_distance: f64,
}

impl Default for RipsConfig {
    fn default() -> Self {
        Self {
            max_simplex_dim: 2,
            max_distance: 1.0,
        }
    }
}

impl RipsConfig {
    pub fn new(max_simplex_dim: usize, max_distance: f64) -> Self {
        Self {
            max_simplex_dim,
            max_distance,
        }
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> TreeResult<()> {
        if !self.max_distance.is_finite() {
            return Err(TreeError::Config(format!(
                "max_distance must be finite, got {}",
                self.max_distance
            )));
        }
        if self.max_distance < 0.0 {
            return Err(TreeError::Config(format!(
                "max_distance must be >= 0, got {}",
                self.max_distance
            )));
        }
        Ok(())
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> TreeResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| TreeError::Config(format!("JSON parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Auto-configure from a point cloud.
    ///
    /// `max_distance` is twice the median k-th nearest neighbour distance;
    /// simplices are built one dimension above the homology dimension so
    /// that the hom_dim + 1 boundary matrix is populated.
    pub fn auto_configure(cloud: &PointCloud, k: usize, tree: &TreeConfig) -> Self {
        Self {
            max_simplex_dim: tree.hom_dim + 1,
            max_distance: 2.0 * suggested_distance(cloud, k),
        }
    }
}

/// Median of k-th nearest neighbour distances
fn suggested_distance(cloud: &PointCloud, k: usize) -> f64 {
    let n = cloud.len();
    if n < 2 {
        return 0.0;
    }

    if k == 0 || n < k + 1 {
        // Fallback for small clouds
        let mut max = 0.0_f64;
        for i in 0..n {
            for j in i + 1..n {
                max = max.max(cloud.distance(i, j));
            }
        }
        return max / 2.0;
    }

    let mut knn_distances = Vec::with_capacity(n);
    for i in 0..n {
        let mut distances: Vec<f64> = (0..n)
            .filter(|&j| j != i)
            .map(|j| cloud.distance(i, j))
            .collect();
        distances.sort_by(|a, b| a.total_cmp(b));
        knn_distances.push(distances[k - 1]);
    }

    knn_distances.sort_by(|a, b| a.total_cmp(b));
    let mid = knn_distances.len() / 2;
    if knn_distances.len() % 2 == 0 {
        (knn_distances[mid - 1] + knn_distances[mid]) / 2.0
    } else {
        knn_distances[mid]
    }
}
