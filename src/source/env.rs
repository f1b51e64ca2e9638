use std::env;

use super::Source;
use crate::error::Result;
use crate::schema;

/// Reads secrets from prefixed environment variables.
///
/// A path maps to `<PREFIX>` plus the path uppercased with dots replaced by
/// underscores: with the prefix `SECRETS_`, `database.server_url` becomes
/// `SECRETS_DATABASE_SERVER_URL`. The source probes the schema's closed
/// path set rather than scanning the environment, so the variable-to-path
/// mapping is never ambiguous; stray prefixed variables are ignored.
pub struct EnvSource {
    name: String,
    prefix: String,
}

impl EnvSource {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            name: format!("env:{prefix}"),
            prefix,
        }
    }

    fn var_name(&self, path: &str) -> String {
        format!("{}{}", self.prefix, path.replace('.', "_").to_uppercase())
    }
}

impl Source for EnvSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn entries(&self) -> Result<Vec<(String, String)>> {
        let mut entries = Vec::new();
        for path in schema::PATHS {
            if let Ok(value) = env::var(self.var_name(path)) {
                entries.push(((*path).to_owned(), value));
            }
        }
        Ok(entries)
    }
}
