//! Record validation command

use super::load_registry;
use crate::config::OutputFormat;
use anyhow::{Context, Result};
use gridcell_model::{CellSet, GridCell};
use gridcell_schema::{validate_records, EntitySchema, ValidationReport, Violation, GRID_CELL};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub struct ValidateArgs {
    pub file: PathBuf,
    pub entity: String,
    pub schemas: Option<PathBuf>,
    pub format: OutputFormat,
}

/// Returns whether every record passed
pub fn run(args: ValidateArgs) -> Result<bool> {
    let registry = load_registry(args.schemas.as_deref())?;
    let schema = registry.require(&args.entity)?;

    let records = load_records(&args.file)?;
    tracing::info!(
        file = %args.file.display(),
        entity = %schema.name,
        records = records.len(),
        "validating records"
    );

    let (report, cells) = check_records(schema, &records);

    match args.format {
        OutputFormat::Json => print_report_json(&report, cells.as_ref())?,
        OutputFormat::Text => print_report_text(&report, cells.as_ref()),
    }

    Ok(report.is_valid())
}

/// Validate records against the schema. For `GridCell`, records that pass
/// are also converted to typed cells; conversion failures (integers wider
/// than the typed fields) become violations. The cell breakdown is only
/// returned when every record passed.
pub fn check_records(schema: &EntitySchema, records: &[Value]) -> (ValidationReport, Option<CellSet>) {
    let mut report = validate_records(schema, records);
    if schema.name != GRID_CELL {
        return (report, None);
    }

    let flagged: HashSet<usize> = report.violations.iter().map(|v| v.record).collect();
    let mut cells = CellSet::new();
    for (index, record) in records.iter().enumerate() {
        if flagged.contains(&index) {
            continue;
        }
        let converted = GridCell::from_json(record).and_then(|cell| cells.insert(cell));
        if let Err(err) = converted {
            report.violations.push(Violation::from_error(index, &err));
        }
    }
    report.violations.sort_by_key(|v| v.record);

    let cells = report.is_valid().then_some(cells);
    (report, cells)
}

/// Read candidate records: a JSON array, a single object, or NDJSON
pub fn load_records(path: &Path) -> Result<Vec<Value>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let line_delimited = path
        .extension()
        .map(|e| e == "ndjson" || e == "jsonl")
        .unwrap_or(false);

    if line_delimited {
        return content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str(line)
                    .with_context(|| format!("{}:{}: invalid JSON", path.display(), i + 1))
            })
            .collect();
    }

    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(match value {
        Value::Array(records) => records,
        other => vec![other],
    })
}

fn print_report_text(report: &ValidationReport, cells: Option<&CellSet>) {
    if report.is_valid() {
        println!("All {} record(s) passed.", report.records_checked);
        if let Some(cells) = cells {
            for ((shape, level, proj), count) in cells.groups() {
                println!("  shape={} level={} proj={}: {} cell(s)", shape, level, proj, count);
            }
        }
        return;
    }

    println!("{}", report.summary());
    println!();

    for violation in &report.violations {
        println!(
            "  [{:<8}] record {}: {}",
            violation.kind.label(),
            violation.record,
            violation.message
        );
    }
}

fn print_report_json(report: &ValidationReport, cells: Option<&CellSet>) -> Result<()> {
    let groups: Vec<Value> = cells
        .map(|cells| {
            cells
                .groups()
                .into_iter()
                .map(|((shape, level, proj), count)| {
                    serde_json::json!({ "shape": shape, "level": level, "proj": proj, "cells": count })
                })
                .collect()
        })
        .unwrap_or_default();

    let output = serde_json::json!({
        "entity": report.entity,
        "valid": report.is_valid(),
        "summary": report.summary(),
        "records": report.records_checked,
        "violations": report.violations,
        "groups": groups,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
