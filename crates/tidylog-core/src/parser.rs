//! Line classifier and grouper for clang-tidy style output.
//!
//! Input is a sequence of already-split lines. Each line is classified on its
//! own, with no lookahead:
//!
//! - `error: ...` lines without a location are ignored outright.
//! - Header lines (`path:line:col: severity: message [name]`) become records,
//!   unless an exclude filter or duplicate suppression drops them.
//! - Everything else is a detail line for the most recently accepted record.
//!
//! Accepted records are then grouped in a second pass: notes become children
//! of the preceding top-level record.

use crate::config::ParserConfig;
use crate::error::{Result, TidylogError};
use crate::model::{DiagnosticRecord, Severity};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::{debug, warn};

const HEADER_PATTERN: &str = r"^(?P<filepath>.+):(?P<line>[0-9]+):(?P<column>[0-9]+): (?P<severity>\S+): (?P<message>.*?)(?: \[(?P<name>[^\]]*)\])?$";
const IGNORE_PATTERN: &str = r"^error:";

fn header_regex() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| Regex::new(HEADER_PATTERN).expect("header pattern is valid"))
}

fn ignore_regex() -> &'static Regex {
    static IGNORE: OnceLock<Regex> = OnceLock::new();
    IGNORE.get_or_init(|| Regex::new(IGNORE_PATTERN).expect("ignore pattern is valid"))
}

/// Outcome of classifying a single input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// Generic `error:` line; never a record, never a detail.
    Ignored,
    /// Header line dropped by an exclude filter; never a detail.
    Filtered,
    /// Not a recognizable header, or a header with an unknown severity.
    Detail,
    /// A header line that passed the exclude filters. Notes are reported here
    /// too, with `Severity::Note`.
    Diagnostic(DiagnosticRecord),
}

/// Diagnostic parser with compiled filters.
///
/// Holds no per-call state, so one instance can parse any number of inputs.
#[derive(Debug, Clone)]
pub struct DiagnosticParser {
    config: ParserConfig,
    diagnostic_exclude: Option<Regex>,
    file_exclude: Option<Regex>,
}

impl DiagnosticParser {
    /// Build a parser, compiling the configured filter patterns.
    ///
    /// Fails with [`TidylogError::InvalidPattern`] if either filter is not a
    /// valid regular expression.
    pub fn new(config: ParserConfig) -> Result<Self> {
        let diagnostic_exclude = compile_filter(
            "diagnostic_exclude_filter",
            config.diagnostic_exclude_filter.as_deref(),
        )?;
        let file_exclude =
            compile_filter("exclude_file_filter", config.exclude_file_filter.as_deref())?;

        Ok(Self {
            config,
            diagnostic_exclude,
            file_exclude,
        })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Classify one line in isolation.
    pub fn classify(&self, line: &str) -> LineClass {
        if ignore_regex().is_match(line) {
            debug!(line, "ignoring generic error line");
            return LineClass::Ignored;
        }

        let Some(caps) = header_regex().captures(line) else {
            return LineClass::Detail;
        };

        let severity = Severity::from_word(&caps["severity"]);
        if severity == Severity::Unknown {
            return LineClass::Detail;
        }

        // Digits that overflow u32 cannot be a real location.
        let (Ok(line_no), Ok(column)) =
            (caps["line"].parse::<u32>(), caps["column"].parse::<u32>())
        else {
            return LineClass::Detail;
        };

        let filepath = &caps["filepath"];

        // A header without a bracketed name is never matched against the name filter.
        if let (Some(name), Some(filter)) = (caps.name("name"), &self.diagnostic_exclude) {
            if filter.is_match(name.as_str()) {
                debug!(name = name.as_str(), "diagnostic excluded by name");
                return LineClass::Filtered;
            }
        }

        if let Some(filter) = &self.file_exclude {
            if filter.is_match(filepath) {
                debug!(filepath, "diagnostic excluded by file");
                return LineClass::Filtered;
            }
        }

        let record = DiagnosticRecord::new(severity, &caps["message"])
            .with_location(filepath, line_no, column)
            .with_name(caps.name("name").map_or("", |m| m.as_str()));

        LineClass::Diagnostic(record)
    }

    /// Parse a sequence of lines into grouped top-level records.
    pub fn parse<I, S>(&self, lines: I) -> Vec<DiagnosticRecord>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut accepted: Vec<DiagnosticRecord> = Vec::new();
        let mut seen = HashSet::new();
        let mut orphan_details = 0usize;

        for line in lines {
            let line = line.as_ref();
            match self.classify(line) {
                LineClass::Ignored | LineClass::Filtered => {}
                LineClass::Detail => match accepted.last_mut() {
                    Some(last) => last.detail_lines.push(line.to_string()),
                    None => orphan_details += 1,
                },
                LineClass::Diagnostic(record) => {
                    if self.config.exclude_duplicates && !seen.insert(record.key()) {
                        debug!(%record, "duplicate diagnostic dropped");
                        continue;
                    }
                    accepted.push(record);
                }
            }
        }

        if orphan_details > 0 {
            debug!(count = orphan_details, "discarded detail lines before first diagnostic");
        }

        let grouped = group_notes(accepted);
        debug!(records = grouped.len(), "parse complete");
        grouped
    }

    /// Split `text` into lines and parse them.
    pub fn parse_text(&self, text: &str) -> Vec<DiagnosticRecord> {
        self.parse(text.lines())
    }
}

fn compile_filter(option: &'static str, pattern: Option<&str>) -> Result<Option<Regex>> {
    pattern
        .map(|p| Regex::new(p).map_err(|source| TidylogError::InvalidPattern { option, source }))
        .transpose()
}

/// Attach each note to the last top-level record before it.
///
/// A note with no preceding top-level record is dropped.
fn group_notes(accepted: Vec<DiagnosticRecord>) -> Vec<DiagnosticRecord> {
    let mut grouped: Vec<DiagnosticRecord> = Vec::new();
    for record in accepted {
        if !record.is_note() {
            grouped.push(record);
            continue;
        }
        match grouped.last_mut() {
            Some(parent) => parent.children.push(record),
            None => warn!(%record, "note has no preceding diagnostic, dropping"),
        }
    }
    grouped
}
