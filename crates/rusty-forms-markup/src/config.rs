// File: src/config.rs
// Purpose: Validation configuration, loadable from TOML

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Whether a field's chain stops at the first failure
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExecutionPolicy {
    /// Run every validator and report every failure
    #[default]
    Accumulate,
    /// Stop at the first failure
    FailFast,
}

/// Validation settings
///
/// ```toml
/// [validation]
/// execution_policy = "fail-fast"
/// mx_check_timeout_ms = 500
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default)]
    pub execution_policy: ExecutionPolicy,

    /// Upper bound on the email MX lookup, in milliseconds
    #[serde(default = "default_mx_check_timeout_ms")]
    pub mx_check_timeout_ms: u64,
}

fn default_mx_check_timeout_ms() -> u64 {
    2000
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            execution_policy: ExecutionPolicy::default(),
            mx_check_timeout_ms: default_mx_check_timeout_ms(),
        }
    }
}

impl ValidationConfig {
    pub fn mx_check_timeout(&self) -> Duration {
        Duration::from_millis(self.mx_check_timeout_ms)
    }

    /// Parse either a bare table or a document with a `[validation]` section
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut document: toml::Table =
            toml::from_str(content).context("Failed to parse validation config")?;

        let table = match document.remove("validation") {
            Some(toml::Value::Table(section)) => section,
            Some(other) => anyhow::bail!(
                "`validation` must be a table, found {}",
                other.type_str()
            ),
            None => document,
        };

        toml::Value::Table(table)
            .try_into()
            .context("Invalid validation config")
    }

    /// Load from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to load config file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ValidationConfig::default();
        assert_eq!(config.execution_policy, ExecutionPolicy::Accumulate);
        assert_eq!(config.mx_check_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_parse_bare_table() {
        let config = ValidationConfig::from_toml_str(
            r#"
            execution_policy = "fail-fast"
            mx_check_timeout_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.execution_policy, ExecutionPolicy::FailFast);
        assert_eq!(config.mx_check_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn test_parse_validation_section() {
        let config = ValidationConfig::from_toml_str(
            r#"
            [project]
            name = "signup"

            [validation]
            execution_policy = "accumulate"
            "#,
        )
        .unwrap();

        assert_eq!(config, ValidationConfig::default());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        assert_eq!(ValidationConfig::from_toml_str("").unwrap(), ValidationConfig::default());
    }

    #[test]
    fn test_rejects_unknown_policy() {
        let err = ValidationConfig::from_toml_str(r#"execution_policy = "sometimes""#).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid validation config"));
    }

    #[test]
    fn test_rejects_non_table_section() {
        assert!(ValidationConfig::from_toml_str(r#"validation = 3"#).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("rusty-forms-markup-{}.toml", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[validation]\nmx_check_timeout_ms = 100").unwrap();
        drop(file);

        let config = ValidationConfig::load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.mx_check_timeout_ms, 100);
        assert!(ValidationConfig::load(&path).is_err());
    }
}
