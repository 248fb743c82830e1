//! GridCell Schema - Entity schema registry and record validation
//!
//! This crate holds the statically known `GridCell` entity descriptor, a
//! registry for loading further entity definitions from TOML, and the
//! validation rules (required fields, type tags, uniqueness) that a
//! persistence layer enforces on write.

mod builtin;
mod entity;
mod geometry;
mod registry;
mod report;
mod validation;

pub use builtin::{grid_cell_schema, GRID_CELL};
pub use entity::{ConstraintDef, EntitySchema, FieldDef, FieldType};
pub use geometry::{check_geometry, geometry_to_wkt, parse_geometry};
pub use registry::SchemaRegistry;
pub use report::{ValidationReport, Violation, ViolationKind};
pub use validation::{check_unique, validate_record, validate_records};
