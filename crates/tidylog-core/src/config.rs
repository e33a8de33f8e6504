//! Parser configuration.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the diagnostic parser.
///
/// Filter patterns are kept as source text here and compiled once by
/// [`DiagnosticParser::new`](crate::parser::DiagnosticParser::new).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Drop diagnostics whose name contains a match for this pattern.
    pub diagnostic_exclude_filter: Option<String>,

    /// Drop diagnostics whose (filepath, line, column, name) was already accepted.
    pub exclude_duplicates: bool,

    /// Drop diagnostics whose filepath contains a match for this pattern.
    pub exclude_file_filter: Option<String>,
}

impl ParserConfig {
    /// Parse a configuration from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn with_diagnostic_exclude_filter(mut self, pattern: impl Into<String>) -> Self {
        self.diagnostic_exclude_filter = Some(pattern.into());
        self
    }

    pub fn with_exclude_duplicates(mut self, enabled: bool) -> Self {
        self.exclude_duplicates = enabled;
        self
    }

    pub fn with_exclude_file_filter(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_file_filter = Some(pattern.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TidylogError;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = ParserConfig::default();
        assert!(config.diagnostic_exclude_filter.is_none());
        assert!(!config.exclude_duplicates);
        assert!(config.exclude_file_filter.is_none());
    }

    #[test]
    fn test_from_toml_partial_keys() {
        let config = ParserConfig::from_toml_str("exclude_duplicates = true\n").expect("parse");
        assert!(config.exclude_duplicates);
        assert!(config.diagnostic_exclude_filter.is_none());
    }

    #[test]
    fn test_from_toml_all_keys() {
        let text = r#"
diagnostic_exclude_filter = "NewDelete|NullDereference"
exclude_duplicates = true
exclude_file_filter = "^/usr/"
"#;
        let config = ParserConfig::from_toml_str(text).expect("parse");
        assert_eq!(
            config,
            ParserConfig::default()
                .with_diagnostic_exclude_filter("NewDelete|NullDereference")
                .with_exclude_duplicates(true)
                .with_exclude_file_filter("^/usr/")
        );
    }

    #[test]
    fn test_from_toml_rejects_wrong_type() {
        let err = ParserConfig::from_toml_str("exclude_duplicates = \"yes\"").unwrap_err();
        assert!(matches!(err, TidylogError::Config(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "exclude_file_filter = \"third_party\"").expect("write");

        let config = ParserConfig::from_file(file.path()).expect("load");
        assert_eq!(config.exclude_file_filter.as_deref(), Some("third_party"));
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = ParserConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, TidylogError::Io(_)));
    }
}
