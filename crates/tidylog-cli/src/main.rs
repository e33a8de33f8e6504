//! tidylog - group clang-tidy output into diagnostics
//!
//! Reads a build log (file or stdin), parses it with `tidylog-core` and prints
//! each top-level diagnostic followed by its detail lines and attached notes.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::PathBuf;
use tidylog_core::{summarize, DiagnosticParser, DiagnosticRecord, ParserConfig};
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(name = "tidylog")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Group clang-tidy style diagnostic output", long_about = None)]
struct Cli {
    /// Log file to parse (reads stdin when omitted or "-")
    input: Option<PathBuf>,

    /// TOML file with parser options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Drop diagnostics whose name matches this regex
    #[arg(long, env = "TIDYLOG_EXCLUDE_DIAGNOSTIC")]
    exclude_diagnostic: Option<String>,

    /// Drop diagnostics whose file path matches this regex
    #[arg(long, env = "TIDYLOG_EXCLUDE_FILE")]
    exclude_file: Option<String>,

    /// Drop repeated (path, line, column, name) diagnostics
    #[arg(long, overrides_with = "keep_duplicates")]
    exclude_duplicates: bool,

    /// Keep repeated diagnostics, even if the config file drops them
    #[arg(long, overrides_with = "exclude_duplicates")]
    keep_duplicates: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

impl Cli {
    /// Load the config file if given, then apply command-line overrides.
    fn parser_config(&self) -> Result<ParserConfig> {
        let mut config = match &self.config {
            Some(path) => ParserConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ParserConfig::default(),
        };

        if let Some(pattern) = &self.exclude_diagnostic {
            config.diagnostic_exclude_filter = Some(pattern.clone());
        }
        if let Some(pattern) = &self.exclude_file {
            config.exclude_file_filter = Some(pattern.clone());
        }
        if self.exclude_duplicates {
            config.exclude_duplicates = true;
        } else if self.keep_duplicates {
            config.exclude_duplicates = false;
        }
        Ok(config)
    }
}

/// Read newline-separated lines. Source snippets in tool output are copied
/// verbatim and may not be UTF-8, so each line is decoded lossily.
fn read_lines(reader: impl Read) -> Result<Vec<String>> {
    BufReader::new(reader)
        .split(b'\n')
        .map(|raw| {
            let mut raw = raw?;
            if raw.last() == Some(&b'\r') {
                raw.pop();
            }
            Ok(String::from_utf8_lossy(&raw).into_owned())
        })
        .collect::<std::io::Result<Vec<_>>>()
        .context("Failed to read input")
}

fn write_records(out: &mut impl Write, records: &[DiagnosticRecord]) -> std::io::Result<()> {
    for record in records {
        writeln!(out, "{}", record)?;
        for detail in &record.detail_lines {
            writeln!(out, "    {}", detail)?;
        }
        for child in &record.children {
            writeln!(out, "  {}", child)?;
            for detail in &child.detail_lines {
                writeln!(out, "      {}", detail)?;
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tidylog_core::init_tracing(cli.json, level);

    let config = cli.parser_config()?;
    let parser = DiagnosticParser::new(config).context("Invalid parser configuration")?;

    let lines = match cli.input.as_deref() {
        Some(path) if path.as_os_str() != "-" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            read_lines(file)?
        }
        _ => read_lines(std::io::stdin().lock())?,
    };

    let records = parser.parse(&lines);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_records(&mut out, &records).context("Failed to write output")?;
    out.flush()?;

    let summary = summarize(&records);
    info!(
        input_lines = lines.len(),
        diagnostics = summary.total(),
        errors = summary.errors + summary.fatals,
        warnings = summary.warnings,
        remarks = summary.remarks,
        notes = summary.notes,
        "parse finished"
    );
    Ok(())
}
