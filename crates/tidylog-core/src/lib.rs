//! tidylog core library
//!
//! Parses clang-tidy style diagnostic output into grouped records:
//! - `parser`: line classification, filtering and note grouping
//! - `model`: `Severity`, `DiagnosticRecord` and summary counts
//! - `config`: filter configuration, loadable from TOML

pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod telemetry;

pub use config::ParserConfig;
pub use error::{Result, TidylogError};
pub use model::{summarize, DiagnosticKey, DiagnosticRecord, ParseSummary, Severity};
pub use parser::{DiagnosticParser, LineClass};
pub use telemetry::init_tracing;
