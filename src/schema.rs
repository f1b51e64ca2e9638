//! The typed schema for node secrets.
//!
//! Every sensitive value a node role can consume lives in [`SecretsBundle`],
//! addressed by a stable dotted path such as `consensus.validator_key`. The
//! path set is closed: [`PATHS`] enumerates every field the schema knows, and
//! addressing anything else is a [`PathError`], distinct from reading a path
//! that is known but currently absent.
//!
//! Required-ness is deliberately not modelled here. Whether a field must be
//! present depends on the deployment role and is decided by the validator;
//! the schema only describes shape.
//!
//! All leaf values are [`SecretString`], so the derived `Debug` of any type
//! in this module is redacted without call-site discipline.

use secrecy::SecretString;
use serde::Serialize;
use thiserror::Error;

/// Every dotted field path the schema recognizes.
///
/// Raw input sources address fields by these names; anything outside this
/// list is rejected at parse time.
pub const PATHS: &[&str] = &[
    "database.server_url",
    "database.server_replica_url",
    "database.prover_url",
    "l1.l1_rpc_url",
    "l1.gateway_rpc_url",
    "consensus.validator_key",
    "consensus.node_key",
    "consensus.attester_key",
    "da.avail.seed_phrase",
    "da.avail.gas_relay_api_key",
    "da.celestia.private_key",
    "da.eigen.private_key",
    "contract_verifier.etherscan_api_key",
];

/// Error for addressing a field path the schema does not define.
///
/// A known-but-absent field is *not* an error; it reads as `Ok(None)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("unknown secret path '{0}'")]
    Unknown(String),
}

/// Connection strings for the node's databases.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DatabaseSecrets {
    #[serde(
        serialize_with = "crate::expose::redact",
        skip_serializing_if = "Option::is_none"
    )]
    pub server_url: Option<SecretString>,
    #[serde(
        serialize_with = "crate::expose::redact",
        skip_serializing_if = "Option::is_none"
    )]
    pub server_replica_url: Option<SecretString>,
    #[serde(
        serialize_with = "crate::expose::redact",
        skip_serializing_if = "Option::is_none"
    )]
    pub prover_url: Option<SecretString>,
}

impl DatabaseSecrets {
    pub fn is_empty(&self) -> bool {
        self.server_url.is_none() && self.server_replica_url.is_none() && self.prover_url.is_none()
    }
}

/// L1 RPC endpoints. The endpoints themselves are credentials: hosted RPC
/// URLs routinely embed API keys.
#[derive(Debug, Clone, Default, Serialize)]
pub struct L1Secrets {
    #[serde(
        serialize_with = "crate::expose::redact",
        skip_serializing_if = "Option::is_none"
    )]
    pub l1_rpc_url: Option<SecretString>,
    #[serde(
        serialize_with = "crate::expose::redact",
        skip_serializing_if = "Option::is_none"
    )]
    pub gateway_rpc_url: Option<SecretString>,
}

impl L1Secrets {
    pub fn is_empty(&self) -> bool {
        self.l1_rpc_url.is_none() && self.gateway_rpc_url.is_none()
    }
}

/// Signing key for the validator role.
#[derive(Debug, Clone)]
pub struct ValidatorSecretKey(pub SecretString);

/// P2P identity key for any consensus participant.
#[derive(Debug, Clone)]
pub struct NodeSecretKey(pub SecretString);

/// Signing key for the attester role.
#[derive(Debug, Clone)]
pub struct AttesterSecretKey(pub SecretString);

/// Consensus key material. The three key kinds are distinct newtypes so one
/// can never be passed where another is expected.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConsensusSecrets {
    #[serde(
        serialize_with = "crate::expose::redact",
        skip_serializing_if = "Option::is_none"
    )]
    pub validator_key: Option<ValidatorSecretKey>,
    #[serde(
        serialize_with = "crate::expose::redact",
        skip_serializing_if = "Option::is_none"
    )]
    pub node_key: Option<NodeSecretKey>,
    #[serde(
        serialize_with = "crate::expose::redact",
        skip_serializing_if = "Option::is_none"
    )]
    pub attester_key: Option<AttesterSecretKey>,
}

impl ConsensusSecrets {
    pub fn is_empty(&self) -> bool {
        self.validator_key.is_none() && self.node_key.is_none() && self.attester_key.is_none()
    }
}

/// Raw, pre-resolution data-availability credentials.
///
/// This is the only place where fields of more than one DA backend may
/// coexist: the merger must be able to represent a later source overriding
/// or clearing an earlier source's backend choice. Validation collapses this
/// into [`DataAvailabilitySecrets`] (or rejects it).
#[derive(Debug, Clone, Default, Serialize)]
pub struct DaSecrets {
    #[serde(
        serialize_with = "crate::expose::redact",
        skip_serializing_if = "Option::is_none"
    )]
    pub avail_seed_phrase: Option<SecretString>,
    #[serde(
        serialize_with = "crate::expose::redact",
        skip_serializing_if = "Option::is_none"
    )]
    pub avail_gas_relay_api_key: Option<SecretString>,
    #[serde(
        serialize_with = "crate::expose::redact",
        skip_serializing_if = "Option::is_none"
    )]
    pub celestia_private_key: Option<SecretString>,
    #[serde(
        serialize_with = "crate::expose::redact",
        skip_serializing_if = "Option::is_none"
    )]
    pub eigen_private_key: Option<SecretString>,
}

impl DaSecrets {
    pub fn is_empty(&self) -> bool {
        self.avail_seed_phrase.is_none()
            && self.avail_gas_relay_api_key.is_none()
            && self.celestia_private_key.is_none()
            && self.eigen_private_key.is_none()
    }
}

/// Credentials for exactly one data-availability backend.
///
/// Only validation constructs this, from a [`DaSecrets`] whose populated
/// fields all belong to a single, complete variant. "More than one backend"
/// is unrepresentable here.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataAvailabilitySecrets {
    Avail {
        #[serde(serialize_with = "crate::expose::redact_value")]
        seed_phrase: SecretString,
        #[serde(serialize_with = "crate::expose::redact_value")]
        gas_relay_api_key: SecretString,
    },
    Celestia {
        #[serde(serialize_with = "crate::expose::redact_value")]
        private_key: SecretString,
    },
    Eigen {
        #[serde(serialize_with = "crate::expose::redact_value")]
        private_key: SecretString,
    },
}

/// Third-party API keys used by the contract verifier.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContractVerifierSecrets {
    #[serde(
        serialize_with = "crate::expose::redact",
        skip_serializing_if = "Option::is_none"
    )]
    pub etherscan_api_key: Option<SecretString>,
}

impl ContractVerifierSecrets {
    pub fn is_empty(&self) -> bool {
        self.etherscan_api_key.is_none()
    }
}

/// The root aggregate of all secret groups.
///
/// A bundle starts empty and is filled by the merger, one field at a time.
/// A group whose fields are all absent counts as an absent group; bundles
/// legitimately omit groups their deployment does not need.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SecretsBundle {
    #[serde(skip_serializing_if = "DatabaseSecrets::is_empty")]
    pub database: DatabaseSecrets,
    #[serde(skip_serializing_if = "L1Secrets::is_empty")]
    pub l1: L1Secrets,
    #[serde(skip_serializing_if = "ConsensusSecrets::is_empty")]
    pub consensus: ConsensusSecrets,
    #[serde(skip_serializing_if = "DaSecrets::is_empty")]
    pub da: DaSecrets,
    #[serde(skip_serializing_if = "ContractVerifierSecrets::is_empty")]
    pub contract_verifier: ContractVerifierSecrets,
}

impl SecretsBundle {
    /// Sets the field at `path`, normalizing empty input.
    ///
    /// An empty `value` clears the field: a present-but-empty secret is
    /// indistinguishable from an absent one everywhere downstream, and a
    /// later source can use it to retract an earlier source's value.
    ///
    /// # Errors
    ///
    /// Returns `PathError::Unknown` if `path` is not in [`PATHS`].
    pub fn set(&mut self, path: &str, value: &str) -> Result<(), PathError> {
        let value = if value.is_empty() {
            None
        } else {
            Some(SecretString::from(value.to_owned()))
        };
        match path {
            "database.server_url" => self.database.server_url = value,
            "database.server_replica_url" => self.database.server_replica_url = value,
            "database.prover_url" => self.database.prover_url = value,
            "l1.l1_rpc_url" => self.l1.l1_rpc_url = value,
            "l1.gateway_rpc_url" => self.l1.gateway_rpc_url = value,
            "consensus.validator_key" => {
                self.consensus.validator_key = value.map(ValidatorSecretKey)
            }
            "consensus.node_key" => self.consensus.node_key = value.map(NodeSecretKey),
            "consensus.attester_key" => self.consensus.attester_key = value.map(AttesterSecretKey),
            "da.avail.seed_phrase" => self.da.avail_seed_phrase = value,
            "da.avail.gas_relay_api_key" => self.da.avail_gas_relay_api_key = value,
            "da.celestia.private_key" => self.da.celestia_private_key = value,
            "da.eigen.private_key" => self.da.eigen_private_key = value,
            "contract_verifier.etherscan_api_key" => {
                self.contract_verifier.etherscan_api_key = value
            }
            _ => return Err(PathError::Unknown(path.to_owned())),
        }
        Ok(())
    }

    /// Reads the field at `path`.
    ///
    /// `Ok(None)` means the path is valid but no value is set; an unknown
    /// path is an error, never conflated with absence.
    pub fn get(&self, path: &str) -> Result<Option<&SecretString>, PathError> {
        let field = match path {
            "database.server_url" => self.database.server_url.as_ref(),
            "database.server_replica_url" => self.database.server_replica_url.as_ref(),
            "database.prover_url" => self.database.prover_url.as_ref(),
            "l1.l1_rpc_url" => self.l1.l1_rpc_url.as_ref(),
            "l1.gateway_rpc_url" => self.l1.gateway_rpc_url.as_ref(),
            "consensus.validator_key" => self.consensus.validator_key.as_ref().map(|k| &k.0),
            "consensus.node_key" => self.consensus.node_key.as_ref().map(|k| &k.0),
            "consensus.attester_key" => self.consensus.attester_key.as_ref().map(|k| &k.0),
            "da.avail.seed_phrase" => self.da.avail_seed_phrase.as_ref(),
            "da.avail.gas_relay_api_key" => self.da.avail_gas_relay_api_key.as_ref(),
            "da.celestia.private_key" => self.da.celestia_private_key.as_ref(),
            "da.eigen.private_key" => self.da.eigen_private_key.as_ref(),
            "contract_verifier.etherscan_api_key" => {
                self.contract_verifier.etherscan_api_key.as_ref()
            }
            _ => return Err(PathError::Unknown(path.to_owned())),
        };
        Ok(field)
    }
}
