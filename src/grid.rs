//! A lattice of numbered points, built from an ASCII-art layout.
//!
//! Test scenarios draw a layout such as
//!
//! ```text
//! 1 . 2
//! . . .
//! 3 . 4
//! ```
//!
//! and then refer to the corners by id instead of spelling out coordinates.
//! Row `r` and column `c` map to the coordinate `(c * spacing, r * spacing)`.

use std::collections::HashMap;

use geo::{coord, Coord};
use serde::{Deserialize, Serialize};

use crate::error::{GeoFixtureError, GeoFixtureResult};

/// Rows of cell labels, read top to bottom and left to right.
///
/// Only labels made entirely of ASCII decimal digits are addressable. Every other label, including
/// the empty string, is a placeholder that occupies a cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    rows: Vec<Vec<String>>,
}

impl Layout {
    /// Construct from rows holding one label per cell.
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Construct from text lines where every character is one cell.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows = lines
            .into_iter()
            .map(|line| line.as_ref().chars().map(String::from).collect())
            .collect();
        Self { rows }
    }

    /// Access the rows of this layout.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Iterate over `(row, column, label)` for every cell.
    fn cells(&self) -> impl Iterator<Item = (usize, usize, &str)> {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, label)| (r, c, label.as_str()))
        })
    }
}

impl From<&str> for Layout {
    fn from(value: &str) -> Self {
        Self::from_lines(value.lines())
    }
}

impl From<Vec<Vec<String>>> for Layout {
    fn from(value: Vec<Vec<String>>) -> Self {
        Self::new(value)
    }
}

/// The id addressed by a cell label, if any.
fn label_id(label: &str) -> Option<i64> {
    if label.is_empty() || !label.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    label.parse().ok()
}

/// Mapping from point id to grid coordinate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridStore {
    nodes: HashMap<i64, Coord>,
}

impl GridStore {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole grid with the points of `layout`.
    ///
    /// Non-digit labels are skipped. When an id appears more than once, the last cell in reading
    /// order wins.
    pub fn rebuild(&mut self, layout: &Layout, spacing: f64) {
        let mut nodes = HashMap::new();
        for (r, c, label) in layout.cells() {
            let Some(id) = label_id(label) else {
                continue;
            };
            let position = coord! { x: c as f64 * spacing, y: r as f64 * spacing };
            if let Some(previous) = nodes.insert(id, position) {
                tracing::debug!(
                    id,
                    previous = ?previous,
                    current = ?position,
                    "grid id defined twice, keeping the later cell"
                );
            }
        }
        tracing::debug!(
            rows = layout.rows().len(),
            nodes = nodes.len(),
            spacing,
            "rebuilt grid"
        );
        self.nodes = nodes;
    }

    /// The coordinate of grid point `id`, or `None` when the grid has no such point.
    pub fn lookup(&self, id: i64) -> Option<Coord> {
        self.nodes.get(&id).copied()
    }

    /// The number of addressable points.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no point is addressable.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over `(id, coordinate)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, Coord)> + '_ {
        self.nodes.iter().map(|(id, coord)| (*id, *coord))
    }

    /// Remove all points.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

/// Serialized description of a grid: ASCII-art lines plus the distance between neighbouring cells.
///
/// ```json
/// { "lines": ["1.2", "...", "3.4"], "spacing": 0.1 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// One string per row, one character per cell.
    pub lines: Vec<String>,

    /// Distance between neighbouring cells along both axes.
    pub spacing: f64,
}

impl GridSpec {
    /// Construct a new grid specification.
    pub fn new(lines: Vec<String>, spacing: f64) -> Self {
        Self { lines, spacing }
    }

    /// Parse and validate a JSON grid specification.
    pub fn from_json(value: &str) -> GeoFixtureResult<Self> {
        let spec: Self = serde_json::from_str(value)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Check that the spacing describes a usable lattice.
    pub fn validate(&self) -> GeoFixtureResult<()> {
        if !self.spacing.is_finite() || self.spacing <= 0.0 {
            return Err(GeoFixtureError::InvalidGridSpec(format!(
                "spacing must be a positive finite number, got {}",
                self.spacing
            )));
        }
        Ok(())
    }

    /// The layout described by [`lines`][Self::lines].
    pub fn layout(&self) -> Layout {
        Layout::from_lines(&self.lines)
    }
}
