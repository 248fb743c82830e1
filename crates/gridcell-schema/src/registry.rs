//! Schema registry for loading and managing entity schemas

use crate::builtin::grid_cell_schema;
use crate::entity::{EntitySchema, EntitySchemaFile};
use gridcell_core::{GridError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Registry that holds all known entity schemas
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    entities: HashMap<String, EntitySchema>,
}

impl SchemaRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in `GridCell` entity
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(grid_cell_schema().clone());
        registry
    }

    /// Built-in entities plus everything under `path/entities/*.toml`.
    /// Loaded definitions override built-ins of the same name.
    pub fn load_from_directory<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut registry = Self::with_builtin();
        registry.load_directory(path)?;
        Ok(registry)
    }

    /// Load entity schemas from a directory into this registry (additive/override)
    ///
    /// Expects `path/entities/*.toml`; a missing `entities` directory is not
    /// an error.
    pub fn load_directory<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let entities_path = path.as_ref().join("entities");
        if !entities_path.exists() {
            tracing::debug!(path = %entities_path.display(), "no entity schema directory");
            return Ok(());
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&entities_path)? {
            let file_path = entry?.path();
            if file_path.extension().map(|e| e == "toml").unwrap_or(false) {
                files.push(file_path);
            }
        }
        // read_dir order is platform dependent; overrides should not be
        files.sort();

        // Parse every file before registering so a bad file leaves the registry untouched
        let mut loaded = Vec::new();
        for file_path in &files {
            loaded.extend(parse_entity_file(file_path)?);
        }
        self.register_all(loaded);
        Ok(())
    }

    /// Load entity schemas from a TOML file
    pub fn load_entity_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let loaded = parse_entity_file(path.as_ref())?;
        self.register_all(loaded);
        Ok(())
    }

    /// Load entity schemas from a TOML string
    pub fn load_entity_string(&mut self, content: &str) -> Result<()> {
        let loaded = parse_entity_string(content)?;
        self.register_all(loaded);
        Ok(())
    }

    fn register_all(&mut self, loaded: Vec<EntitySchema>) {
        for schema in loaded {
            tracing::debug!(
                entity = %schema.name,
                fields = schema.fields.len(),
                constraints = schema.constraints.len(),
                "loaded entity schema"
            );
            self.register(schema);
        }
    }

    /// Register an entity schema directly
    pub fn register(&mut self, schema: EntitySchema) {
        self.entities.insert(schema.name.clone(), schema);
    }

    /// Get an entity schema by name
    pub fn get(&self, name: &str) -> Option<&EntitySchema> {
        self.entities.get(name)
    }

    /// Get an entity schema by name, or fail with `EntityNotFound`
    pub fn require(&self, name: &str) -> Result<&EntitySchema> {
        self.get(name)
            .ok_or_else(|| GridError::EntityNotFound(name.to_string()))
    }

    /// List all entity names, sorted
    pub fn entity_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entities.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Build every definition in a TOML string without registering any
fn parse_entity_string(content: &str) -> Result<Vec<EntitySchema>> {
    let file: EntitySchemaFile = toml::from_str(content)?;
    file.entity
        .into_iter()
        .map(|(name, def)| def.to_entity_schema(name))
        .collect()
}

fn parse_entity_file(path: &Path) -> Result<Vec<EntitySchema>> {
    let content = fs::read_to_string(path)?;
    parse_entity_string(&content).map_err(|e| match e {
        GridError::TomlParseError(msg) => {
            GridError::TomlParseError(format!("{}: {}", path.display(), msg))
        }
        GridError::SchemaError(msg) => {
            GridError::SchemaError(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })
}
