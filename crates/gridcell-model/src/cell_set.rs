//! CellSet - an in-memory collection enforcing the GridCell constraints

use crate::cell::GridCell;
use gridcell_core::{GridError, Result};
use gridcell_schema::check_geometry;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Match cells on shape, level and projection; unset criteria match anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellFilter {
    pub shape: Option<i32>,
    pub level: Option<i32>,
    pub proj: Option<i32>,
}

impl CellFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shape(mut self, shape: i32) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn level(mut self, level: i32) -> Self {
        self.level = Some(level);
        self
    }

    pub fn proj(mut self, proj: i32) -> Self {
        self.proj = Some(proj);
        self
    }

    pub fn matches(&self, cell: &GridCell) -> bool {
        self.shape.map_or(true, |s| s == cell.shape)
            && self.level.map_or(true, |l| l == cell.level)
            && self.proj.map_or(true, |p| p == cell.proj)
    }
}

/// Grid cells keyed by `hash`, in insertion order.
#[derive(Debug, Default, Clone)]
pub struct CellSet {
    cells: HashMap<i64, GridCell>,
    order: Vec<i64>,
}

impl CellSet {
    /// Create a new empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a cell, rejecting an empty geometry or a hash that is
    /// already present
    pub fn insert(&mut self, cell: GridCell) -> Result<()> {
        check_geometry("geom", &cell.geom)?;
        if self.cells.contains_key(&cell.hash) {
            return Err(GridError::UniqueConstraintViolation {
                field: "hash".to_string(),
                value: cell.hash.to_string(),
            });
        }

        self.order.push(cell.hash);
        self.cells.insert(cell.hash, cell);
        Ok(())
    }

    /// Validate a JSON document and insert the resulting cell
    pub fn insert_json(&mut self, doc: &Value) -> Result<()> {
        self.insert(GridCell::from_json(doc)?)
    }

    /// Insert a cell, skipping it when it cannot be added.
    ///
    /// Returns whether the cell was added. Generators that revisit the same
    /// cell along tile seams use this instead of handling the error.
    pub fn insert_lenient(&mut self, cell: GridCell) -> bool {
        let hash = cell.hash;
        match self.insert(cell) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(hash, error = %err, "skipping cell");
                false
            }
        }
    }

    /// Build a set from JSON documents, failing on the first bad record
    pub fn from_json_records(docs: &[Value]) -> Result<Self> {
        let mut set = Self::new();
        for doc in docs {
            set.insert_json(doc)?;
        }
        Ok(set)
    }

    /// Get a cell by hash
    pub fn get(&self, hash: i64) -> Option<&GridCell> {
        self.cells.get(&hash)
    }

    pub fn contains(&self, hash: i64) -> bool {
        self.cells.contains_key(&hash)
    }

    /// Remove a cell by hash
    pub fn remove(&mut self, hash: i64) -> Option<GridCell> {
        let cell = self.cells.remove(&hash)?;
        self.order.retain(|h| *h != hash);
        Some(cell)
    }

    /// All cells matching the filter, in insertion order
    pub fn find(&self, filter: &CellFilter) -> Vec<&GridCell> {
        self.iter().filter(|c| filter.matches(c)).collect()
    }

    /// Remove every cell of one shape, level and projection.
    ///
    /// Returns how many cells were removed.
    pub fn clear(&mut self, shape: i32, level: i32, proj: i32) -> usize {
        let filter = CellFilter::new().shape(shape).level(level).proj(proj);
        let before = self.cells.len();

        self.cells.retain(|_, cell| !filter.matches(cell));
        let cells = &self.cells;
        self.order.retain(|h| cells.contains_key(h));

        let removed = before - self.cells.len();
        tracing::debug!(shape, level, proj, removed, "cleared cells");
        removed
    }

    /// Cell counts per (shape, level, proj)
    pub fn groups(&self) -> BTreeMap<(i32, i32, i32), usize> {
        let mut groups = BTreeMap::new();
        for cell in self.cells.values() {
            *groups.entry((cell.shape, cell.level, cell.proj)).or_insert(0) += 1;
        }
        groups
    }

    /// Iterate cells in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &GridCell> {
        self.order.iter().filter_map(|h| self.cells.get(h))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
