//! Entity schema definitions

use gridcell_core::{GridError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashSet};

/// The type tag of a field in an entity schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    #[serde(rename = "int")]
    Integer,
    #[serde(rename = "geo")]
    Geometry,
    #[serde(rename = "json")]
    Document,
}

impl FieldType {
    /// The short tag used in descriptors (`int`, `geo`, `json`)
    pub fn tag(&self) -> &'static str {
        match self {
            FieldType::Integer => "int",
            FieldType::Geometry => "geo",
            FieldType::Document => "json",
        }
    }

    /// Parse a type tag, accepting the long names as well
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "int" | "integer" => Some(FieldType::Integer),
            "geo" | "geometry" => Some(FieldType::Geometry),
            "json" | "document" => Some(FieldType::Document),
            _ => None,
        }
    }
}

/// A single field of an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// Write-time constraint on one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintDef {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub unique: bool,
}

impl ConstraintDef {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            unique: false,
        }
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}

/// Schema definition for an entity: ordered fields plus ordered constraints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySchema {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<FieldDef>,
    pub constraints: Vec<ConstraintDef>,
}

impl EntitySchema {
    /// Build a schema, checking that field names are unique and that every
    /// constraint targets a declared field exactly once.
    pub fn new(
        name: impl Into<String>,
        fields: Vec<FieldDef>,
        constraints: Vec<ConstraintDef>,
    ) -> Result<Self> {
        let name = name.into();

        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(GridError::SchemaError(format!(
                    "Entity '{}' declares field '{}' more than once",
                    name, field.name
                )));
            }
        }

        let mut constrained = HashSet::new();
        for constraint in &constraints {
            if !seen.contains(constraint.name.as_str()) {
                return Err(GridError::SchemaError(format!(
                    "Entity '{}' has a constraint on unknown field '{}'",
                    name, constraint.name
                )));
            }
            if !constrained.insert(constraint.name.as_str()) {
                return Err(GridError::SchemaError(format!(
                    "Entity '{}' constrains field '{}' more than once",
                    name, constraint.name
                )));
            }
        }

        Ok(Self {
            name,
            description: None,
            fields,
            constraints,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Get a field definition by name
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Get the constraint entry for a field, if it has one
    pub fn constraint(&self, name: &str) -> Option<&ConstraintDef> {
        self.constraints.iter().find(|c| c.name == name)
    }

    /// Field names in declaration order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Names of required fields, in constraint order
    pub fn required_fields(&self) -> Vec<&str> {
        self.constraints
            .iter()
            .filter(|c| c.required)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Names of unique fields, in constraint order
    pub fn unique_fields(&self) -> Vec<&str> {
        self.constraints
            .iter()
            .filter(|c| c.unique)
            .map(|c| c.name.as_str())
            .collect()
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.constraint(name).map(|c| c.required).unwrap_or(false)
    }

    pub fn is_unique(&self, name: &str) -> bool {
        self.constraint(name).map(|c| c.unique).unwrap_or(false)
    }

    /// Storage name for the entity: `GridCell` becomes `grid_cell`
    pub fn table_name(&self) -> String {
        let mut out = String::with_capacity(self.name.len() + 4);
        let mut prev_lower = false;
        for ch in self.name.chars() {
            if ch.is_ascii_uppercase() {
                if prev_lower {
                    out.push('_');
                }
                out.push(ch.to_ascii_lowercase());
                prev_lower = false;
            } else {
                out.push(ch);
                // Digits attach to the word before them ("Tile3D" -> "tile3d")
                prev_lower = ch.is_ascii_lowercase();
            }
        }
        out
    }

    /// Descriptor as consumed by external persistence layers:
    /// `{name, fields: [{name, type}], constraints: [{name, required, unique?}]}`
    pub fn to_json(&self) -> Value {
        let fields: Vec<Value> = self
            .fields
            .iter()
            .map(|f| json!({ "name": f.name, "type": f.field_type.tag() }))
            .collect();

        let constraints: Vec<Value> = self
            .constraints
            .iter()
            .map(|c| {
                let mut entry = json!({ "name": c.name, "required": c.required });
                if c.unique {
                    entry["unique"] = Value::Bool(true);
                }
                entry
            })
            .collect();

        json!({
            "name": self.name,
            "fields": fields,
            "constraints": constraints,
        })
    }
}

/// TOML file format for entity schemas
#[derive(Debug, Deserialize)]
pub struct EntitySchemaFile {
    pub entity: BTreeMap<String, EntitySchemaDefinition>,
}

#[derive(Debug, Deserialize)]
pub struct EntitySchemaDefinition {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    #[serde(default)]
    pub constraints: Vec<ConstraintDef>,
}

/// Field definition as it appears in TOML files
#[derive(Debug, Clone, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
}

impl EntitySchemaDefinition {
    pub fn to_entity_schema(self, name: String) -> Result<EntitySchema> {
        let mut fields = Vec::with_capacity(self.fields.len());
        for def in self.fields {
            let field_type = FieldType::parse(&def.field_type).ok_or_else(|| {
                GridError::SchemaError(format!(
                    "Entity '{}': field '{}' has unknown type '{}'",
                    name, def.name, def.field_type
                ))
            })?;
            fields.push(FieldDef::new(def.name, field_type));
        }

        let schema = EntitySchema::new(name, fields, self.constraints)?;
        Ok(match self.description {
            Some(desc) => schema.with_description(desc),
            None => schema,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn road() -> EntitySchema {
        EntitySchema::new(
            "RoadSegment",
            vec![
                FieldDef::new("id", FieldType::Integer),
                FieldDef::new("geom", FieldType::Geometry),
                FieldDef::new("tags", FieldType::Document),
            ],
            vec![ConstraintDef::required("id").unique()],
        )
        .unwrap()
    }

    #[test]
    fn test_field_type_parse() {
        assert_eq!(FieldType::parse("int"), Some(FieldType::Integer));
        assert_eq!(FieldType::parse("Geometry"), Some(FieldType::Geometry));
        assert_eq!(FieldType::parse("json"), Some(FieldType::Document));
        assert_eq!(FieldType::parse("float"), None);
    }

    #[test]
    fn test_lookups() {
        let schema = road();
        assert_eq!(schema.field_names(), vec!["id", "geom", "tags"]);
        assert!(schema.is_required("id"));
        assert!(schema.is_unique("id"));
        assert!(!schema.is_required("tags"));
        assert!(schema.constraint("tags").is_none());
        assert_eq!(schema.field("geom").unwrap().field_type, FieldType::Geometry);
    }

    #[test]
    fn test_table_name() {
        assert_eq!(road().table_name(), "road_segment");
        let tile = EntitySchema::new("Tile3D", vec![], vec![]).unwrap();
        assert_eq!(tile.table_name(), "tile3d");
        let cell = EntitySchema::new("GridCell2", vec![], vec![]).unwrap();
        assert_eq!(cell.table_name(), "grid_cell2");
        let level = EntitySchema::new("Level2Cell", vec![], vec![]).unwrap();
        assert_eq!(level.table_name(), "level2cell");
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let result = EntitySchema::new(
            "Bad",
            vec![
                FieldDef::new("a", FieldType::Integer),
                FieldDef::new("a", FieldType::Document),
            ],
            vec![],
        );
        assert!(matches!(result, Err(GridError::SchemaError(_))));
    }

    #[test]
    fn test_constraint_on_unknown_field_rejected() {
        let result = EntitySchema::new(
            "Bad",
            vec![FieldDef::new("a", FieldType::Integer)],
            vec![ConstraintDef::required("b")],
        );
        assert!(matches!(result, Err(GridError::SchemaError(_))));
    }

    #[test]
    fn test_unique_omitted_from_descriptor_when_false() {
        let schema = EntitySchema::new(
            "Pair",
            vec![
                FieldDef::new("a", FieldType::Integer),
                FieldDef::new("b", FieldType::Integer),
            ],
            vec![ConstraintDef::required("a"), ConstraintDef::required("b").unique()],
        )
        .unwrap();

        let json = schema.to_json();
        assert!(json["constraints"][0].get("unique").is_none());
        assert_eq!(json["constraints"][1]["unique"], Value::Bool(true));
    }

    #[test]
    fn test_definition_with_unknown_type() {
        let def: EntitySchemaFile = toml::from_str(
            r#"
[entity.Thing]
fields = [ { name = "size", type = "float" } ]
"#,
        )
        .unwrap();
        let (name, def) = def.entity.into_iter().next().unwrap();
        assert!(matches!(
            def.to_entity_schema(name),
            Err(GridError::SchemaError(_))
        ));
    }
}
