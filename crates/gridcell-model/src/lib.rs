//! GridCell Model - Typed grid cell records
//!
//! `GridCell` is the strongly-typed form of the `GridCell` entity: required
//! fields are not optional, so a constructed cell always satisfies the
//! schema's required constraints. `CellSet` adds the uniqueness constraint
//! on `hash` for a collection of cells.

mod cell;
mod cell_set;

pub use cell::GridCell;
pub use cell_set::{CellFilter, CellSet};
