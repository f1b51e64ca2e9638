//! Deployment roles and the policy tables keyed on them.
//!
//! Which fields a deployment must supply is a property of its [`Role`], not
//! of the schema. Both policy tables live here — [`Role::required_paths`]
//! for validation and [`Role::exposes`] for the validated view — so adding a
//! role never touches the schema types.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SecretsError;

/// A deployment identity, determining which secrets are mandatory and which
/// groups its validated view exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    MainNode,
    Prover,
    Validator,
    ConsensusParticipant,
    Attester,
    DataAvailabilityClient,
    ContractVerifier,
}

/// One of the five top-level secret groups of the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretGroup {
    Database,
    L1,
    Consensus,
    DataAvailability,
    ContractVerifier,
}

impl Role {
    /// All roles, in declaration order.
    pub const ALL: &[Role] = &[
        Role::MainNode,
        Role::Prover,
        Role::Validator,
        Role::ConsensusParticipant,
        Role::Attester,
        Role::DataAvailabilityClient,
        Role::ContractVerifier,
    ];

    /// Get the string representation of this role.
    ///
    /// This is the canonical name used in configuration and CLI arguments.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::MainNode => "main_node",
            Role::Prover => "prover",
            Role::Validator => "validator",
            Role::ConsensusParticipant => "consensus_participant",
            Role::Attester => "attester",
            Role::DataAvailabilityClient => "data_availability_client",
            Role::ContractVerifier => "contract_verifier",
        }
    }

    /// The dotted paths this role cannot run without, in the order the
    /// validator checks them: the L1 endpoint first, then consensus keys.
    ///
    /// The data-availability requirement is not a single path and is handled
    /// separately; see [`Role::requires_data_availability`].
    pub fn required_paths(&self) -> &'static [&'static str] {
        match self {
            // Every role talks to L1 except the contract verifier, which
            // only consults explorer APIs.
            Role::MainNode | Role::Prover | Role::DataAvailabilityClient => &["l1.l1_rpc_url"],
            Role::Validator => &[
                "l1.l1_rpc_url",
                "consensus.node_key",
                "consensus.validator_key",
            ],
            Role::ConsensusParticipant => &["l1.l1_rpc_url", "consensus.node_key"],
            Role::Attester => &[
                "l1.l1_rpc_url",
                "consensus.node_key",
                "consensus.attester_key",
            ],
            Role::ContractVerifier => &[],
        }
    }

    /// Whether this role must resolve exactly one data-availability backend.
    pub fn requires_data_availability(&self) -> bool {
        matches!(self, Role::DataAvailabilityClient)
    }

    /// Whether the validated view for this role exposes `group`.
    ///
    /// Groups outside this table are accepted in raw input but projected out
    /// of the view, so a role can never read credentials it has no use for.
    pub fn exposes(&self, group: SecretGroup) -> bool {
        match group {
            SecretGroup::Database => {
                matches!(self, Role::MainNode | Role::Prover | Role::ContractVerifier)
            }
            // gateway_rpc_url is optional everywhere, so the L1 group stays
            // visible to every role.
            SecretGroup::L1 => true,
            SecretGroup::Consensus => matches!(
                self,
                Role::Validator | Role::ConsensusParticipant | Role::Attester
            ),
            SecretGroup::DataAvailability => matches!(self, Role::DataAvailabilityClient),
            SecretGroup::ContractVerifier => true,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = SecretsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "main_node" => Ok(Role::MainNode),
            "prover" => Ok(Role::Prover),
            "validator" => Ok(Role::Validator),
            "consensus_participant" => Ok(Role::ConsensusParticipant),
            "attester" => Ok(Role::Attester),
            "data_availability_client" => Ok(Role::DataAvailabilityClient),
            "contract_verifier" => Ok(Role::ContractVerifier),
            _ => Err(SecretsError::UnknownRole(s.to_owned())),
        }
    }
}
