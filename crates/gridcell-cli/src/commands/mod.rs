//! CLI command implementations

pub mod proj;
pub mod schema;
pub mod validate;

use anyhow::{Context, Result};
use gridcell_schema::SchemaRegistry;
use std::path::Path;

/// Built-in entities, plus any definitions under `schemas`
pub fn load_registry(schemas: Option<&Path>) -> Result<SchemaRegistry> {
    match schemas {
        Some(dir) => {
            if !dir.exists() {
                anyhow::bail!("Schemas directory not found: {}", dir.display());
            }
            SchemaRegistry::load_from_directory(dir)
                .with_context(|| format!("Failed to load schemas from {}", dir.display()))
        }
        None => Ok(SchemaRegistry::with_builtin()),
    }
}
