//! The built-in `GridCell` entity

use crate::entity::{ConstraintDef, EntitySchema, FieldDef, FieldType};
use std::sync::LazyLock;

pub const GRID_CELL: &str = "GridCell";

static GRID_CELL_SCHEMA: LazyLock<EntitySchema> = LazyLock::new(|| EntitySchema {
    name: GRID_CELL.to_string(),
    description: Some("One cell of a spatial grid at a given level and projection".to_string()),
    fields: vec![
        FieldDef::new("shape", FieldType::Integer),
        FieldDef::new("level", FieldType::Integer),
        FieldDef::new("geom", FieldType::Geometry),
        FieldDef::new("proj", FieldType::Integer),
        FieldDef::new("hash", FieldType::Integer),
        FieldDef::new("info", FieldType::Document),
    ],
    constraints: vec![
        ConstraintDef::required("shape"),
        ConstraintDef::required("level"),
        ConstraintDef::required("proj"),
        ConstraintDef::required("geom"),
        ConstraintDef::required("hash").unique(),
    ],
});

/// The process-wide `GridCell` schema
pub fn grid_cell_schema() -> &'static EntitySchema {
    &GRID_CELL_SCHEMA
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_and_types() {
        let schema = grid_cell_schema();
        assert_eq!(schema.name, "GridCell");

        let fields: Vec<(&str, &str)> = schema
            .fields
            .iter()
            .map(|f| (f.name.as_str(), f.field_type.tag()))
            .collect();
        assert_eq!(
            fields,
            vec![
                ("shape", "int"),
                ("level", "int"),
                ("geom", "geo"),
                ("proj", "int"),
                ("hash", "int"),
                ("info", "json"),
            ]
        );
    }

    #[test]
    fn test_constraints() {
        let schema = grid_cell_schema();
        assert_eq!(
            schema.required_fields(),
            vec!["shape", "level", "proj", "geom", "hash"]
        );
        assert_eq!(schema.unique_fields(), vec!["hash"]);
        assert!(schema.constraint("info").is_none());
        assert!(!schema.is_required("info"));
    }

    #[test]
    fn test_passes_own_consistency_checks() {
        let schema = grid_cell_schema();
        let rebuilt = EntitySchema::new(
            schema.name.clone(),
            schema.fields.clone(),
            schema.constraints.clone(),
        )
        .unwrap();
        assert_eq!(rebuilt.fields, schema.fields);
    }

    #[test]
    fn test_descriptor_json() {
        let json = grid_cell_schema().to_json();
        assert_eq!(json["name"], "GridCell");
        assert_eq!(json["fields"][2]["name"], "geom");
        assert_eq!(json["fields"][2]["type"], "geo");
        assert_eq!(json["constraints"][4]["name"], "hash");
        assert_eq!(json["constraints"][4]["unique"], true);
        assert_eq!(json["constraints"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_table_name() {
        assert_eq!(grid_cell_schema().table_name(), "grid_cell");
    }
}
