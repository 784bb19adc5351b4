//! Diagnostics collected while the pipeline runs.

use std::fmt;

/// Pipeline stage that produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Load,
    Validate,
    Clean,
    Merge,
    Dedup,
    Write,
    Profile,
    Visualize,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Load => "load",
            Self::Validate => "validate",
            Self::Clean => "clean",
            Self::Merge => "merge",
            Self::Dedup => "dedup",
            Self::Write => "write",
            Self::Profile => "profile",
            Self::Visualize => "visualize",
        };
        f.write_str(name)
    }
}

/// A human-readable record of something a stage did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub stage: Stage,
    /// Table the event concerns
    pub table: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(stage: Stage, table: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            stage,
            table: table.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.stage, self.table, self.message)
    }
}
