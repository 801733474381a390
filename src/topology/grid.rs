//! Axis Grids: Real Coordinates of the Bifiltration
//!
//! Each filtration axis keeps a strictly increasing list of the distinct
//! real values at which simplices are born. Simplices store positions in
//! these lists (grade indices) rather than raw values, so the rest of the
//! crate works on a dense integer lattice.
//!
//! - x axis: appearance time (point birth)
//! - y axis: scale (Rips distance)

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TreeError, TreeResult};

/// One of the two filtration parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// First parameter (time / birth)
    X,
    /// Second parameter (distance / scale)
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Maps -0.0 onto 0.0 so `total_cmp` agrees with `==` on zero.
fn canonical(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

/// Strictly increasing, append-only sequence of grade values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisGrid {
    values: Vec<f64>,
}

impl AxisGrid {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Build from arbitrary values: sorted ascending, duplicates removed.
    pub fn from_values(axis: Axis, values: impl IntoIterator<Item = f64>) -> TreeResult<Self> {
        let mut values: Vec<f64> = values.into_iter().map(canonical).collect();
        if let Some(&bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(TreeError::NonFiniteGrade { axis, value: bad });
        }
        values.sort_by(|a, b| a.total_cmp(b));
        values.dedup();
        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Largest value on the axis
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Binary search for `value`; `None` if it is not a grid value.
    pub fn index_of(&self, value: f64) -> Option<usize> {
        if !value.is_finite() {
            return None;
        }
        let value = canonical(value);
        self.values
            .binary_search_by(|probe| probe.total_cmp(&value))
            .ok()
    }

    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Grade index of `value`, appending it if it exceeds every grid value.
    ///
    /// A value below the current maximum that is not already present would
    /// shift the grade indices of existing simplices, so it is rejected.
    pub(crate) fn resolve_or_append(&mut self, axis: Axis, value: f64) -> TreeResult<usize> {
        match self.slot(axis, value)? {
            Some(index) => Ok(index),
            None => {
                self.values.push(canonical(value));
                Ok(self.values.len() - 1)
            }
        }
    }

    /// Checks `value` could be resolved without mutating the grid.
    pub(crate) fn admits(&self, axis: Axis, value: f64) -> TreeResult<()> {
        self.slot(axis, value).map(|_| ())
    }

    /// `Some(index)` for an existing value, `None` when it must be appended.
    fn slot(&self, axis: Axis, value: f64) -> TreeResult<Option<usize>> {
        if !value.is_finite() {
            return Err(TreeError::NonFiniteGrade { axis, value });
        }
        let value = canonical(value);
        match self.values.last() {
            Some(&last) => match value.total_cmp(&last) {
                Ordering::Greater => Ok(None),
                Ordering::Equal => Ok(Some(self.values.len() - 1)),
                Ordering::Less => self
                    .index_of(value)
                    .map(Some)
                    .ok_or(TreeError::UnorderedGrade { axis, value, last }),
            },
            None => Ok(None),
        }
    }
}

/// The pair of axis grids spanning the bifiltration lattice
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    x: AxisGrid,
    y: AxisGrid,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_axes(x: AxisGrid, y: AxisGrid) -> Self {
        Self { x, y }
    }

    pub fn axis(&self, axis: Axis) -> &AxisGrid {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    pub(crate) fn axis_mut(&mut self, axis: Axis) -> &mut AxisGrid {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }

    /// Value → grade index, `None` when the value is not on the axis
    pub fn grade_to_index(&self, axis: Axis, value: f64) -> Option<usize> {
        self.axis(axis).index_of(value)
    }

    /// Grade index → value
    pub fn index_to_grade(&self, axis: Axis, index: usize) -> Option<f64> {
        self.axis(axis).value_at(index)
    }

    pub fn axis_size(&self, axis: Axis) -> usize {
        self.axis(axis).len()
    }
}
