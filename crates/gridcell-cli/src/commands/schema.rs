//! Schema introspection command

use super::load_registry;
use crate::config::OutputFormat;
use anyhow::Result;
use gridcell_schema::EntitySchema;
use std::path::PathBuf;

pub struct SchemaArgs {
    pub name: String,
    pub schemas: Option<PathBuf>,
    pub format: OutputFormat,
}

pub fn run(args: SchemaArgs) -> Result<()> {
    let registry = load_registry(args.schemas.as_deref())?;

    let Some(entity) = registry.get(&args.name) else {
        println!("Entity '{}' not found.", args.name);
        println!();
        println!("Available entities:");
        for name in registry.entity_names() {
            println!("  - {}", name);
        }
        return Ok(());
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entity.to_json())?),
        OutputFormat::Text => print!("{}", format_entity(entity)),
    }
    Ok(())
}

fn format_entity(entity: &EntitySchema) -> String {
    let mut out = format!("Entity: {}\n", entity.name);
    if let Some(desc) = &entity.description {
        out.push_str(&format!("Description: {}\n", desc));
    }
    out.push_str(&format!("Table: {}\n\nFields:\n", entity.table_name()));

    for field in &entity.fields {
        let mut flags = Vec::new();
        if entity.is_required(&field.name) {
            flags.push("required");
        }
        if entity.is_unique(&field.name) {
            flags.push("unique");
        }

        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" ({})", flags.join(", "))
        };
        out.push_str(&format!("  {} : {}{}\n", field.name, field.field_type.tag(), flags));
    }
    out
}
