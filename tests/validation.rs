//! End-to-end tests: raw sources through merge, validation, and exposure.

use std::io::Write;

use secretbundle::{
    EnvSource, MapSource, REDACTED, Role, SecretsError, Source, TomlSource, ViolationKind, load,
};

fn boxed(sources: Vec<MapSource>) -> Vec<Box<dyn Source>> {
    sources
        .into_iter()
        .map(|s| Box::new(s) as Box<dyn Source>)
        .collect()
}

#[test]
fn serialized_output_never_contains_input_values() {
    let raw_values = [
        ("database.server_url", "postgres://admin:pw-one@db/main"),
        ("database.server_replica_url", "postgres://ro:pw-two@db/ro"),
        ("l1.l1_rpc_url", "https://mainnet.example/v2/raw-api-key"),
        ("l1.gateway_rpc_url", "https://gateway.example/raw-key"),
        ("contract_verifier.etherscan_api_key", "ETHERSCAN-RAW"),
    ];
    let sources = boxed(vec![MapSource::new("base", raw_values)]);
    let secrets = load(&sources, Role::MainNode).unwrap();

    let json = serde_json::to_string_pretty(&secrets).unwrap();
    for (_, value) in raw_values {
        assert!(!json.contains(value), "serialized output leaked a value");
    }
    assert!(json.contains(REDACTED));
}

#[test]
fn merge_is_last_write_wins_per_leaf() {
    let sources = boxed(vec![
        MapSource::new("a", [("l1.l1_rpc_url", "x")]),
        MapSource::new("b", [("l1.l1_rpc_url", "y")]),
    ]);
    let secrets = load(&sources, Role::ContractVerifier).unwrap();
    assert_eq!(
        secrets.reveal_for_transport("l1.l1_rpc_url").unwrap().as_deref(),
        Some("y")
    );
}

#[test]
fn two_da_variants_conflict_for_da_client() {
    let sources = boxed(vec![MapSource::new(
        "base",
        [
            ("l1.l1_rpc_url", "https://rpc"),
            ("da.avail.seed_phrase", "words"),
            ("da.celestia.private_key", "key"),
        ],
    )]);
    let err = load(&sources, Role::DataAvailabilityClient).unwrap_err();
    let SecretsError::Validation(report) = err else {
        panic!("expected validation failure");
    };
    assert_eq!(
        report.paths_for(ViolationKind::ConflictingVariant),
        vec!["da.avail.seed_phrase", "da.celestia.private_key"]
    );
}

#[test]
fn partial_avail_variant_names_missing_sibling() {
    let sources = boxed(vec![MapSource::new(
        "base",
        [
            ("l1.l1_rpc_url", "https://rpc"),
            ("da.avail.seed_phrase", "words"),
        ],
    )]);
    let err = load(&sources, Role::DataAvailabilityClient).unwrap_err();
    let SecretsError::Validation(report) = err else {
        panic!("expected validation failure");
    };
    assert_eq!(report.violations.len(), 1);
    assert_eq!(
        report.paths_for(ViolationKind::PartialVariant),
        vec!["da.avail.gas_relay_api_key"]
    );
}

#[test]
fn empty_bundle_for_validator_lists_its_three_requirements() {
    let err = load(&[], Role::Validator).unwrap_err();
    let SecretsError::Validation(report) = err else {
        panic!("expected validation failure");
    };
    assert_eq!(report.violations.len(), 3);
    assert_eq!(
        report.paths_for(ViolationKind::MissingRequiredField),
        vec![
            "l1.l1_rpc_url",
            "consensus.node_key",
            "consensus.validator_key"
        ]
    );
}

#[test]
fn contract_verifier_passes_without_l1_rpc_url() {
    let sources = boxed(vec![MapSource::new(
        "base",
        [
            ("database.server_url", "postgres://db"),
            ("contract_verifier.etherscan_api_key", "key"),
        ],
    )]);
    let secrets = load(&sources, Role::ContractVerifier).unwrap();
    assert!(secrets.contract_verifier().is_some());
    assert!(secrets.l1().is_none());
}

#[test]
fn unknown_path_fails_at_parse_time_for_any_role() {
    for role in Role::ALL {
        let sources = boxed(vec![MapSource::new(
            "base",
            [("database.unknown_field", "value")],
        )]);
        let err = load(&sources, *role).unwrap_err();
        assert!(
            matches!(err, SecretsError::UnknownPath { ref path, .. } if path == "database.unknown_field"),
            "role {role}: expected parse-time rejection, got {err}"
        );
    }
}

#[test]
fn validated_view_is_idempotent() {
    let sources = boxed(vec![MapSource::new(
        "base",
        [
            ("l1.l1_rpc_url", "https://rpc"),
            ("consensus.node_key", "nk"),
            ("consensus.validator_key", "vk"),
        ],
    )]);
    let secrets = load(&sources, Role::Validator).unwrap();
    assert_eq!(
        serde_json::to_string(&secrets).unwrap(),
        serde_json::to_string(&secrets).unwrap()
    );
    assert_eq!(
        secrets.reveal_for_transport("consensus.node_key").unwrap(),
        secrets.reveal_for_transport("consensus.node_key").unwrap()
    );
}

#[test]
fn later_source_clears_da_variant_with_empty_values() {
    // Base picks Avail, the override empties it and picks Celestia; after
    // last-write-wins there is no conflict left to report.
    let sources = boxed(vec![
        MapSource::new(
            "base",
            [
                ("l1.l1_rpc_url", "https://rpc"),
                ("da.avail.seed_phrase", "words"),
                ("da.avail.gas_relay_api_key", "relay"),
            ],
        ),
        MapSource::new(
            "override",
            [
                ("da.avail.seed_phrase", ""),
                ("da.avail.gas_relay_api_key", ""),
                ("da.celestia.private_key", "ck"),
            ],
        ),
    ]);
    let secrets = load(&sources, Role::DataAvailabilityClient).unwrap();
    assert_eq!(
        secrets
            .reveal_for_transport("da.celestia.private_key")
            .unwrap()
            .as_deref(),
        Some("ck")
    );
    assert!(
        secrets
            .reveal_for_transport("da.avail.seed_phrase")
            .unwrap()
            .is_none()
    );
}

#[test]
fn toml_file_and_env_override_compose() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "[l1]\nl1_rpc_url = \"https://from-file\"\n\n[database]\nserver_url = \"postgres://file\"\n"
    )
    .unwrap();

    unsafe {
        std::env::set_var("SB_ITEST_L1_L1_RPC_URL", "https://from-env");
    }

    let sources: Vec<Box<dyn Source>> = vec![
        Box::new(TomlSource::from_path(file.path()).unwrap()),
        Box::new(EnvSource::new("SB_ITEST_")),
    ];
    let secrets = load(&sources, Role::MainNode).unwrap();
    assert_eq!(
        secrets.reveal_for_transport("l1.l1_rpc_url").unwrap().as_deref(),
        Some("https://from-env")
    );
    assert_eq!(
        secrets
            .reveal_for_transport("database.server_url")
            .unwrap()
            .as_deref(),
        Some("postgres://file")
    );
}

#[test]
fn error_messages_never_leak_values() {
    let secret_value = "extremely-secret-value";
    let sources = boxed(vec![MapSource::new(
        "base",
        [
            ("da.avail.seed_phrase", secret_value),
            ("da.celestia.private_key", secret_value),
        ],
    )]);
    let err = load(&sources, Role::DataAvailabilityClient).unwrap_err();
    assert!(!err.to_string().contains(secret_value));
}
