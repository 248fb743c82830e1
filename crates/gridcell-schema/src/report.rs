//! Validation report types

use gridcell_core::GridError;
use serde::Serialize;

/// What kind of rule a record broke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    MissingField,
    UniqueConstraint,
    InvalidType,
    InvalidGeometry,
    InvalidRecord,
}

impl ViolationKind {
    pub fn label(&self) -> &'static str {
        match self {
            ViolationKind::MissingField => "missing",
            ViolationKind::UniqueConstraint => "unique",
            ViolationKind::InvalidType => "type",
            ViolationKind::InvalidGeometry => "geometry",
            ViolationKind::InvalidRecord => "record",
        }
    }
}

/// A single violation found in a record set
#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    /// Zero-based position of the offending record
    pub record: usize,
    pub field: Option<String>,
    pub kind: ViolationKind,
    pub message: String,
}

impl Violation {
    pub fn from_error(record: usize, err: &GridError) -> Self {
        let kind = match err {
            GridError::MissingField(_) => ViolationKind::MissingField,
            GridError::UniqueConstraintViolation { .. } => ViolationKind::UniqueConstraint,
            GridError::InvalidGeometry { .. } => ViolationKind::InvalidGeometry,
            GridError::InvalidFieldType { .. } | GridError::ValueOutOfRange { .. } => {
                ViolationKind::InvalidType
            }
            _ => ViolationKind::InvalidRecord,
        };

        Self {
            record,
            field: err.field().map(str::to_string),
            kind,
            message: err.to_string(),
        }
    }
}

/// A complete validation report over a record set
#[derive(Debug, Default, Serialize)]
pub struct ValidationReport {
    pub entity: String,
    pub records_checked: usize,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Create an empty report
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            ..Self::default()
        }
    }

    /// Check if every record passed
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Count violations of one kind
    pub fn count(&self, kind: ViolationKind) -> usize {
        self.violations.iter().filter(|v| v.kind == kind).count()
    }

    /// Number of distinct records with at least one violation
    pub fn invalid_records(&self) -> usize {
        let mut records: Vec<usize> = self.violations.iter().map(|v| v.record).collect();
        records.sort_unstable();
        records.dedup();
        records.len()
    }

    /// Get a human-readable summary
    pub fn summary(&self) -> String {
        let total = self.violations.len();
        if total == 0 {
            return format!("{} record(s) checked, no violations found.", self.records_checked);
        }

        format!(
            "{} violation(s) in {} of {} record(s): {} missing, {} unique, {} type, {} geometry",
            total,
            self.invalid_records(),
            self.records_checked,
            self.count(ViolationKind::MissingField),
            self.count(ViolationKind::UniqueConstraint),
            self.count(ViolationKind::InvalidType),
            self.count(ViolationKind::InvalidGeometry),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_valid() {
        let mut report = ValidationReport::new("GridCell");
        report.records_checked = 3;
        assert!(report.is_valid());
        assert_eq!(report.summary(), "3 record(s) checked, no violations found.");
    }

    #[test]
    fn test_summary_counts() {
        let mut report = ValidationReport::new("GridCell");
        report.records_checked = 4;
        report
            .violations
            .push(Violation::from_error(0, &GridError::MissingField("hash".into())));
        report
            .violations
            .push(Violation::from_error(0, &GridError::MissingField("geom".into())));
        report.violations.push(Violation::from_error(
            3,
            &GridError::UniqueConstraintViolation {
                field: "hash".into(),
                value: "1".into(),
            },
        ));

        assert!(!report.is_valid());
        assert_eq!(report.invalid_records(), 2);
        assert_eq!(report.count(ViolationKind::MissingField), 2);
        assert_eq!(
            report.summary(),
            "3 violation(s) in 2 of 4 record(s): 2 missing, 1 unique, 0 type, 0 geometry"
        );
    }

    #[test]
    fn test_violation_carries_field() {
        let v = Violation::from_error(
            1,
            &GridError::InvalidFieldType {
                field: "level".into(),
                expected: "int".into(),
                got: "string".into(),
            },
        );
        assert_eq!(v.field.as_deref(), Some("level"));
        assert_eq!(v.kind, ViolationKind::InvalidType);
    }
}
