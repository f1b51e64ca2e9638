//! Per-role validation of a merged [`SecretsBundle`].
//!
//! Validation is pass/fail at the whole-bundle level and exhaustive: every
//! violated rule is collected before returning, so one report tells an
//! operator everything that is wrong. On success the bundle is wrapped into
//! the role-scoped [`ValidatedSecrets`] view, the only type the rest of the
//! system consumes.

use serde::Serialize;
use tracing::{debug, warn};

use crate::expose::ValidatedSecrets;
use crate::role::Role;
use crate::schema::{DaSecrets, DataAvailabilitySecrets, SecretsBundle};

/// Rule identifiers for validation failures.
///
/// `MergeAmbiguity` is reserved for multi-variant data-availability
/// conflicts that last-write-wins cannot resolve; the current merge policy
/// resolves them all, so it is never raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    MissingRequiredField,
    ConflictingVariant,
    PartialVariant,
    MergeAmbiguity,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::MissingRequiredField => "missing_required_field",
            ViolationKind::ConflictingVariant => "conflicting_variant",
            ViolationKind::PartialVariant => "partial_variant",
            ViolationKind::MergeAmbiguity => "merge_ambiguity",
        }
    }
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One violated rule: the field path it concerns and the rule identifier.
/// Never the field's value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub path: String,
    pub reason: ViolationKind,
}

impl Violation {
    fn new(path: impl Into<String>, reason: ViolationKind) -> Self {
        Self {
            path: path.into(),
            reason,
        }
    }
}

/// The full set of rules a bundle violated for a role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// The paths reported for a given rule, in check order.
    pub fn paths_for(&self, reason: ViolationKind) -> Vec<&str> {
        self.violations
            .iter()
            .filter(|v| v.reason == reason)
            .map(|v| v.path.as_str())
            .collect()
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "secrets validation failed: ")?;
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} ({})", violation.path, violation.reason)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

/// Validates `bundle` for `role`, producing the role-scoped view.
///
/// Rules run in a fixed order: the role's required paths (L1 endpoint, then
/// consensus keys), then the data-availability rules. Data-availability
/// *consistency* — at most one backend, fully populated — is checked for
/// every role whenever any DA field is present; only the *presence* of a
/// backend is role-conditional.
///
/// # Errors
///
/// Returns a [`ValidationReport`] listing every violated rule. No partial
/// or degraded view is ever produced.
pub fn validate(bundle: SecretsBundle, role: Role) -> Result<ValidatedSecrets, ValidationReport> {
    let mut violations = Vec::new();

    for path in role.required_paths() {
        let present = bundle
            .get(path)
            .expect("required paths are drawn from the schema path table")
            .is_some();
        if !present {
            violations.push(Violation::new(*path, ViolationKind::MissingRequiredField));
        }
    }

    let data_availability = resolve_data_availability(
        &bundle.da,
        role.requires_data_availability(),
        &mut violations,
    );

    if !violations.is_empty() {
        warn!(
            role = role.as_str(),
            violations = violations.len(),
            "secrets bundle failed role validation"
        );
        return Err(ValidationReport { violations });
    }
    debug!(role = role.as_str(), "secrets bundle validated");
    Ok(ValidatedSecrets::new(bundle, role, data_availability))
}

const AVAIL_FIELDS: &[&str] = &["da.avail.seed_phrase", "da.avail.gas_relay_api_key"];
const CELESTIA_FIELDS: &[&str] = &["da.celestia.private_key"];
const EIGEN_FIELDS: &[&str] = &["da.eigen.private_key"];

/// Collapses the raw DA fields into the tagged union, or records why that
/// is impossible.
///
/// Exactly one backend may have fields set, and that backend must have all
/// of its declared fields set. Zero backends is fine unless the role
/// requires one, in which case the group path `da` is reported missing.
fn resolve_data_availability(
    da: &DaSecrets,
    required: bool,
    violations: &mut Vec<Violation>,
) -> Option<DataAvailabilitySecrets> {
    let avail = [
        ("da.avail.seed_phrase", da.avail_seed_phrase.is_some()),
        (
            "da.avail.gas_relay_api_key",
            da.avail_gas_relay_api_key.is_some(),
        ),
    ];
    let celestia = [("da.celestia.private_key", da.celestia_private_key.is_some())];
    let eigen = [("da.eigen.private_key", da.eigen_private_key.is_some())];
    let variants: [&[(&str, bool)]; 3] = [&avail, &celestia, &eigen];

    let touched: Vec<&[(&str, bool)]> = variants
        .into_iter()
        .filter(|fields| fields.iter().any(|(_, set)| *set))
        .collect();

    match touched.len() {
        0 => {
            if required {
                violations.push(Violation::new("da", ViolationKind::MissingRequiredField));
            }
            None
        }
        1 => {
            let mut complete = true;
            for (path, set) in touched[0] {
                if !set {
                    complete = false;
                    violations.push(Violation::new(*path, ViolationKind::PartialVariant));
                }
            }
            complete.then(|| complete_variant(da))
        }
        _ => {
            for fields in touched {
                for (path, set) in fields {
                    if *set {
                        violations.push(Violation::new(*path, ViolationKind::ConflictingVariant));
                    }
                }
            }
            None
        }
    }
}

/// Builds the union from a `DaSecrets` already proven to hold exactly one
/// complete variant.
fn complete_variant(da: &DaSecrets) -> DataAvailabilitySecrets {
    if let (Some(seed_phrase), Some(gas_relay_api_key)) =
        (&da.avail_seed_phrase, &da.avail_gas_relay_api_key)
    {
        return DataAvailabilitySecrets::Avail {
            seed_phrase: seed_phrase.clone(),
            gas_relay_api_key: gas_relay_api_key.clone(),
        };
    }
    if let Some(private_key) = &da.celestia_private_key {
        return DataAvailabilitySecrets::Celestia {
            private_key: private_key.clone(),
        };
    }
    if let Some(private_key) = &da.eigen_private_key {
        return DataAvailabilitySecrets::Eigen {
            private_key: private_key.clone(),
        };
    }
    unreachable!("caller checked that one variant is fully populated")
}
