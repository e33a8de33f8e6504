//! Parsed diagnostic types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level of a diagnostic line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Unknown,
    Note,
    Remark,
    Warning,
    Error,
    Fatal,
}

impl Severity {
    /// Map the severity word of a header line. Matching is exact and
    /// case-sensitive; anything unrecognized is `Unknown`.
    pub fn from_word(word: &str) -> Self {
        match word {
            "note" => Severity::Note,
            "remark" => Severity::Remark,
            "warning" => Severity::Warning,
            "error" => Severity::Error,
            "fatal" => Severity::Fatal,
            _ => Severity::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Unknown => "unknown",
            Severity::Note => "note",
            Severity::Remark => "remark",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed diagnostic, with the raw lines that followed it and the notes
/// attached to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DiagnosticRecord {
    /// Source file path as printed by the tool; may be empty.
    pub filepath: String,

    /// Line number, `None` when absent.
    pub line: Option<u32>,

    /// Column number, `None` when absent.
    pub column: Option<u32>,

    pub severity: Severity,

    pub message: String,

    /// Check name from the trailing `[...]` group, empty when absent.
    pub diagnostic_name: String,

    /// Unclassifiable lines that followed this record, verbatim.
    pub detail_lines: Vec<String>,

    /// Note-level diagnostics attached to this record. Always one level deep.
    pub children: Vec<DiagnosticRecord>,
}

impl DiagnosticRecord {
    /// Create a record with no location, name, details or children.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            ..Self::default()
        }
    }

    /// Set file location.
    pub fn with_location(mut self, filepath: impl Into<String>, line: u32, column: u32) -> Self {
        self.filepath = filepath.into();
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Set diagnostic name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.diagnostic_name = name.into();
        self
    }

    pub fn is_note(&self) -> bool {
        self.severity == Severity::Note
    }

    /// Identity used for duplicate suppression.
    pub fn key(&self) -> DiagnosticKey {
        DiagnosticKey {
            filepath: self.filepath.clone(),
            line: self.line,
            column: self.column,
            diagnostic_name: self.diagnostic_name.clone(),
        }
    }
}

/// Renders the header line form: `path:line:col: severity: message [name]`.
impl fmt::Display for DiagnosticRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.filepath)?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(column) = self.column {
            write!(f, ":{}", column)?;
        }
        write!(f, ": {}: {}", self.severity, self.message)?;
        if !self.diagnostic_name.is_empty() {
            write!(f, " [{}]", self.diagnostic_name)?;
        }
        Ok(())
    }
}

/// `(filepath, line, column, diagnostic_name)`; message and severity are not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiagnosticKey {
    pub filepath: String,
    pub line: Option<u32>,
    pub column: Option<u32>,
    pub diagnostic_name: String,
}

/// Counts over a grouped parse result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseSummary {
    pub remarks: usize,
    pub warnings: usize,
    pub errors: usize,
    pub fatals: usize,
    pub notes: usize,
}

impl ParseSummary {
    /// Number of top-level records.
    pub fn total(&self) -> usize {
        self.remarks + self.warnings + self.errors + self.fatals
    }
}

/// Count top-level records by severity, and attached notes.
pub fn summarize(records: &[DiagnosticRecord]) -> ParseSummary {
    let mut summary = ParseSummary::default();
    for record in records {
        match record.severity {
            Severity::Remark => summary.remarks += 1,
            Severity::Warning => summary.warnings += 1,
            Severity::Error => summary.errors += 1,
            Severity::Fatal => summary.fatals += 1,
            // never top-level after grouping
            Severity::Note | Severity::Unknown => {}
        }
        summary.notes += record.children.len();
    }
    summary
}
