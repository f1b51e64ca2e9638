//! # secretbundle
//!
//! A typed secrets-configuration model and validation engine for a
//! multi-role node deployment (main node, prover, consensus roles,
//! data-availability client, contract verifier).
//!
//! The pipeline is deliberately small and runs once at process startup:
//!
//! 1. [`Source`]s supply raw dotted-path/value pairs (in-memory, environment,
//!    TOML files).
//! 2. [`merge`] folds them into a [`SecretsBundle`], later sources winning
//!    per leaf field; unknown paths abort the load.
//! 3. [`validate`] checks the bundle against a declared [`Role`], collecting
//!    every missing or conflicting field into one [`ValidationReport`], and
//!    resolves the exclusive-choice data-availability backend.
//! 4. The resulting [`ValidatedSecrets`] view is immutable, role-scoped, and
//!    redacts every value in serialized or debug output. Raw values leave it
//!    only through [`ValidatedSecrets::reveal_for_transport`].
//!
//! # Example
//!
//! ```
//! use secretbundle::{load, MapSource, Role, Source};
//!
//! let sources: Vec<Box<dyn Source>> = vec![Box::new(MapSource::new(
//!     "base",
//!     [
//!         ("l1.l1_rpc_url", "https://eth.example/v1/key"),
//!         ("database.server_url", "postgres://node@host/db"),
//!     ],
//! ))];
//! let secrets = load(&sources, Role::MainNode).unwrap();
//! assert!(secrets.database().is_some());
//! ```

pub mod error;
pub mod expose;
pub mod merge;
pub mod role;
pub mod schema;
pub mod source;
pub mod validate;

pub use error::{Result, SecretsError};
pub use expose::{REDACTED, ValidatedSecrets};
pub use merge::merge;
pub use role::{Role, SecretGroup};
pub use schema::{
    AttesterSecretKey, ConsensusSecrets, ContractVerifierSecrets, DaSecrets,
    DataAvailabilitySecrets, DatabaseSecrets, L1Secrets, NodeSecretKey, PATHS, PathError,
    SecretsBundle, ValidatorSecretKey,
};
pub use source::{EnvSource, MapSource, Source, TomlSource};
pub use validate::{ValidationReport, Violation, ViolationKind, validate};

/// Merges `sources` in order and validates the result for `role`.
///
/// This is the one-call entry point for process startup; see the module
/// docs for the individual stages.
///
/// # Errors
///
/// Returns [`SecretsError::UnknownPath`] for unrecognized raw input and
/// [`SecretsError::Validation`] wrapping the full report when the merged
/// bundle does not satisfy the role.
pub fn load(sources: &[Box<dyn Source>], role: Role) -> Result<ValidatedSecrets> {
    let bundle = merge::merge(sources)?;
    Ok(validate::validate(bundle, role)?)
}
