//! Validation of record documents against entity schemas

use crate::entity::{EntitySchema, FieldType};
use crate::geometry::parse_geometry;
use crate::report::{ValidationReport, Violation};
use gridcell_core::{GridError, Result};
use serde_json::Value;
use std::collections::HashMap;

/// Validate a single record document against its schema.
///
/// Required fields are checked first, in constraint order, so the reported
/// field is deterministic. A null value counts as missing.
pub fn validate_record(schema: &EntitySchema, record: &Value) -> Result<()> {
    match record_violations(schema, record).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Check that no two records share a value of any unique field.
///
/// Records lacking the field are skipped; `validate_record` reports those.
pub fn check_unique(schema: &EntitySchema, records: &[Value]) -> Result<()> {
    match duplicate_violations(schema, records).into_iter().next() {
        Some((_, err)) => Err(err),
        None => Ok(()),
    }
}

/// Validate a whole record set, collecting every violation
pub fn validate_records(schema: &EntitySchema, records: &[Value]) -> ValidationReport {
    let mut report = ValidationReport::new(schema.name.clone());
    report.records_checked = records.len();

    for (index, record) in records.iter().enumerate() {
        for err in record_violations(schema, record) {
            report.violations.push(Violation::from_error(index, &err));
        }
    }

    for (index, err) in duplicate_violations(schema, records) {
        report.violations.push(Violation::from_error(index, &err));
    }

    report.violations.sort_by_key(|v| v.record);
    tracing::debug!(
        entity = %schema.name,
        records = report.records_checked,
        violations = report.violations.len(),
        "validated record set"
    );
    report
}

/// Every violation in one record: missing required fields, then field values
fn record_violations(schema: &EntitySchema, record: &Value) -> Vec<GridError> {
    let Some(table) = record.as_object() else {
        return vec![GridError::InvalidRecord(format!(
            "{} record must be a JSON object, got {}",
            schema.name,
            value_type_name(record)
        ))];
    };

    let mut errors = Vec::new();

    for constraint in &schema.constraints {
        if !constraint.required {
            continue;
        }
        let present = table.get(&constraint.name).map(|v| !v.is_null()).unwrap_or(false);
        if !present {
            errors.push(GridError::MissingField(constraint.name.clone()));
        }
    }

    // Unknown keys (a storage `id`, say) are ignored
    for field in &schema.fields {
        match table.get(&field.name) {
            Some(Value::Null) | None => {}
            Some(value) => {
                if let Err(err) = validate_field_value(&field.name, field.field_type, value) {
                    errors.push(err);
                }
            }
        }
    }

    errors
}

/// Later occurrences of a unique value, keyed by record index
fn duplicate_violations(schema: &EntitySchema, records: &[Value]) -> Vec<(usize, GridError)> {
    let mut out = Vec::new();

    for field in schema.unique_fields() {
        let mut seen: HashMap<String, usize> = HashMap::new();
        for (index, record) in records.iter().enumerate() {
            let Some(value) = record.get(field).filter(|v| !v.is_null()) else {
                continue;
            };
            let key = value.to_string();
            if let Some(first) = seen.get(&key) {
                tracing::debug!(field, value = %key, first, duplicate = index, "duplicate unique value");
                out.push((
                    index,
                    GridError::UniqueConstraintViolation {
                        field: field.to_string(),
                        value: key,
                    },
                ));
            } else {
                seen.insert(key, index);
            }
        }
    }

    out
}

fn validate_field_value(field_name: &str, field_type: FieldType, value: &Value) -> Result<()> {
    match (field_type, value) {
        (FieldType::Integer, Value::Number(n)) if n.is_i64() || n.is_u64() => Ok(()),
        (FieldType::Geometry, Value::String(text)) => parse_geometry(field_name, text).map(|_| ()),
        (FieldType::Document, Value::Object(_)) => Ok(()),
        _ => Err(GridError::InvalidFieldType {
            field: field_name.to_string(),
            expected: field_type.tag().to_string(),
            got: value_type_name(value).to_string(),
        }),
    }
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
