//! Schema validation for loaded tables.
//!
//! Validation runs once, right after loading, and checks that every table
//! carries the columns the later stages depend on. The result is a structured
//! report rather than scattered presence checks.

pub mod compatibility;
pub mod conversions;

use std::fmt;

use crate::config::TableKind;
use crate::table::TableSet;

pub use compatibility::{ColumnClass, classify, is_integer, is_numeric, is_string};
pub use conversions::{identifier_text, to_float64, to_text};

/// Kinds of schema problems
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// A required column is absent
    MissingColumn,
}

/// A single schema problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    pub kind: IssueKind,
    /// Table the problem was found in
    pub table: String,
    /// Column the problem concerns
    pub column: String,
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            IssueKind::MissingColumn => write!(
                f,
                "table '{}' is missing required column '{}'",
                self.table, self.column
            ),
        }
    }
}

/// Outcome of validating a set of tables
#[derive(Debug, Clone, Default)]
pub struct SchemaReport {
    /// Whether every table passed
    pub compatible: bool,
    /// Every problem found, in table order
    pub issues: Vec<SchemaIssue>,
}

impl SchemaReport {
    #[must_use]
    pub fn issues_for(&self, table: &str) -> Vec<&SchemaIssue> {
        self.issues.iter().filter(|i| i.table == table).collect()
    }
}

impl fmt::Display for SchemaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return write!(f, "all required columns present");
        }
        let parts: Vec<String> = self.issues.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Check that each known table carries its required columns
///
/// Tables whose name is not one of the four inputs are ignored.
#[must_use]
pub fn validate_tables(tables: &TableSet) -> SchemaReport {
    let mut issues = Vec::new();

    for table in tables.iter() {
        let Some(kind) = TableKind::from_name(table.name()) else {
            log::debug!("No schema requirements for table '{}'", table.name());
            continue;
        };

        for column in kind.required_columns() {
            if !table.has_column(column) {
                issues.push(SchemaIssue {
                    kind: IssueKind::MissingColumn,
                    table: table.name().to_string(),
                    column: (*column).to_string(),
                });
            }
        }
    }

    SchemaReport {
        compatible: issues.is_empty(),
        issues,
    }
}
