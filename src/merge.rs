//! Merging ordered raw input sources into one [`SecretsBundle`].

use tracing::debug;

use crate::error::{Result, SecretsError};
use crate::schema::{PathError, SecretsBundle};
use crate::source::Source;

/// Merges `sources` in order into a single bundle.
///
/// Later sources win per leaf field; sibling fields set by earlier sources
/// survive untouched. An empty value overrides like any other and clears the
/// field, which is how a later source retracts an earlier source's choice
/// (relevant for switching data-availability backends between sources).
///
/// The merged data-availability group may still hold fields of several
/// backends at this point; judging that is the validator's job, since only
/// the final merged state decides whether the ambiguity is real.
///
/// # Errors
///
/// An unknown path in any source aborts the whole load with
/// [`SecretsError::UnknownPath`]; no partial bundle is produced.
pub fn merge(sources: &[Box<dyn Source>]) -> Result<SecretsBundle> {
    let mut bundle = SecretsBundle::default();
    for source in sources {
        let entries = source.entries()?;
        let count = entries.len();
        for (path, value) in entries {
            bundle
                .set(&path, &value)
                .map_err(|PathError::Unknown(path)| SecretsError::UnknownPath {
                    path,
                    source: source.name().to_owned(),
                })?;
        }
        debug!(source = source.name(), entries = count, "merged raw input source");
    }
    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MapSource;
    use secrecy::ExposeSecret;

    fn sources(specs: Vec<(&str, Vec<(&str, &str)>)>) -> Vec<Box<dyn Source>> {
        specs
            .into_iter()
            .map(|(name, pairs)| Box::new(MapSource::new(name, pairs)) as Box<dyn Source>)
            .collect()
    }

    #[test]
    fn later_source_wins_per_field() {
        let merged = merge(&sources(vec![
            ("base", vec![("l1.l1_rpc_url", "x")]),
            ("override", vec![("l1.l1_rpc_url", "y")]),
        ]))
        .unwrap();
        assert_eq!(
            merged.get("l1.l1_rpc_url").unwrap().unwrap().expose_secret(),
            "y"
        );
    }

    #[test]
    fn sibling_fields_survive_partial_override() {
        let merged = merge(&sources(vec![
            (
                "base",
                vec![
                    ("database.server_url", "postgres://primary"),
                    ("database.server_replica_url", "postgres://replica"),
                ],
            ),
            ("override", vec![("database.server_url", "postgres://other")]),
        ]))
        .unwrap();
        assert_eq!(
            merged
                .get("database.server_url")
                .unwrap()
                .unwrap()
                .expose_secret(),
            "postgres://other"
        );
        assert_eq!(
            merged
                .get("database.server_replica_url")
                .unwrap()
                .unwrap()
                .expose_secret(),
            "postgres://replica"
        );
    }

    #[test]
    fn empty_override_clears_earlier_value() {
        let merged = merge(&sources(vec![
            ("base", vec![("da.avail.seed_phrase", "twelve words")]),
            ("override", vec![("da.avail.seed_phrase", "")]),
        ]))
        .unwrap();
        assert!(merged.get("da.avail.seed_phrase").unwrap().is_none());
    }

    #[test]
    fn unknown_path_aborts_with_source_name() {
        let err = merge(&sources(vec![(
            "env",
            vec![("database.unknown_field", "value")],
        )]))
        .unwrap_err();
        match err {
            SecretsError::UnknownPath { path, source } => {
                assert_eq!(path, "database.unknown_field");
                assert_eq!(source, "env");
            }
            other => panic!("expected UnknownPath, got {other}"),
        }
    }

    #[test]
    fn no_sources_yields_empty_bundle() {
        let merged = merge(&[]).unwrap();
        assert!(merged.database.is_empty());
        assert!(merged.l1.is_empty());
        assert!(merged.consensus.is_empty());
        assert!(merged.da.is_empty());
        assert!(merged.contract_verifier.is_empty());
    }
}
