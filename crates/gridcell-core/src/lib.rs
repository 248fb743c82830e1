//! GridCell Core - Foundational types for grid cell records
//!
//! This crate provides the types every other GridCell crate depends on:
//! - `RecordId` - Storage row identifiers
//! - `Shape` - Cell shape class codes
//! - `Projection` - SRID resolution and the well-known projection catalogue
//! - Error types and Result alias

mod error;
mod id;
mod projection;
mod shape;

pub use error::{GridError, Result};
pub use id::RecordId;
pub use projection::{KnownProjection, Projection, KNOWN_PROJECTIONS};
pub use shape::Shape;
