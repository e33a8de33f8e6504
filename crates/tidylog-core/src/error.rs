//! Error types for tidylog-core

use thiserror::Error;

/// Errors raised while building a parser or loading its configuration.
///
/// Parsing itself never fails: every input line ends up as a record, a
/// detail line, a child, or is discarded.
#[derive(Error, Debug)]
pub enum TidylogError {
    /// A filter option holds a pattern the regex engine rejects
    #[error("Invalid pattern for {option}: {source}")]
    InvalidPattern {
        option: &'static str,
        #[source]
        source: regex::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file parsing error
    #[error("Config parsing error: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for tidylog operations
pub type Result<T> = std::result::Result<T, TidylogError>;
