use std::fs;
use std::path::Path;

use ::toml::{Table, Value};

use super::Source;
use crate::error::{Result, SecretsError};

/// Reads secrets from a TOML document.
///
/// Nested tables flatten into dotted paths: `[da.avail] seed_phrase = "…"`
/// yields `da.avail.seed_phrase`. Every leaf must be a TOML string; the
/// schema treats all secret material as opaque strings, so other types are
/// rejected rather than coerced.
pub struct TomlSource {
    name: String,
    table: Table,
}

impl TomlSource {
    /// Parses a TOML document from a string.
    ///
    /// # Errors
    ///
    /// Returns a TOML parse error for malformed input.
    pub fn from_str(name: impl Into<String>, content: &str) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            table: content.parse::<Table>()?,
        })
    }

    /// Reads and parses a TOML file; the file path becomes the source name.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_str(path.display().to_string(), &content)
    }
}

impl Source for TomlSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn entries(&self) -> Result<Vec<(String, String)>> {
        let mut entries = Vec::new();
        for (key, value) in &self.table {
            flatten(key, value, &mut entries)?;
        }
        Ok(entries)
    }
}

fn flatten(path: &str, value: &Value, entries: &mut Vec<(String, String)>) -> Result<()> {
    match value {
        Value::Table(table) => {
            for (key, value) in table {
                flatten(&format!("{path}.{key}"), value, entries)?;
            }
            Ok(())
        }
        Value::String(s) => {
            entries.push((path.to_owned(), s.clone()));
            Ok(())
        }
        _ => Err(SecretsError::NotAString {
            path: path.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_tables_flatten_to_dotted_paths() {
        let source = TomlSource::from_str(
            "base",
            r#"
            [database]
            server_url = "postgres://host/db"

            [da.avail]
            seed_phrase = "words"
            "#,
        )
        .unwrap();
        let entries = source.entries().unwrap();
        assert!(entries.contains(&(
            "database.server_url".to_owned(),
            "postgres://host/db".to_owned()
        )));
        assert!(entries.contains(&("da.avail.seed_phrase".to_owned(), "words".to_owned())));
    }

    #[test]
    fn non_string_leaf_is_rejected() {
        let source = TomlSource::from_str("base", "[l1]\nl1_rpc_url = 42\n").unwrap();
        let err = source.entries().unwrap_err();
        assert!(matches!(
            err,
            SecretsError::NotAString { ref path } if path == "l1.l1_rpc_url"
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(TomlSource::from_str("base", "not [ valid").is_err());
    }
}
