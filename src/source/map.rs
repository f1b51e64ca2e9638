use super::Source;
use crate::error::Result;

/// An in-memory source, for embedding callers and tests.
pub struct MapSource {
    name: String,
    entries: Vec<(String, String)>,
}

impl MapSource {
    pub fn new<K, V>(name: impl Into<String>, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            entries: pairs
                .into_iter()
                .map(|(path, value)| (path.into(), value.into()))
                .collect(),
        }
    }
}

impl Source for MapSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn entries(&self) -> Result<Vec<(String, String)>> {
        Ok(self.entries.clone())
    }
}
