// Tests for configuration loading and its effect on validation.

use std::fs;

use sagaguard_core::config::{SagaGuardConfig, CONFIG_FILE};
use sagaguard_core::graph::TypeGraph;
use sagaguard_enforce::rules::RuleId;
use sagaguard_enforce::ValidationEngine;
use tempfile::TempDir;

use crate::common::{class, derived, retry_policy, step};

#[test]
fn test_missing_config_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config = SagaGuardConfig::load(dir.path());
    assert_eq!(config.capabilities.saga, "SagaCapability");
    assert_eq!(config.capabilities.message, "MessageCapability");
    assert_eq!(config.failure_base_type, "System.Exception");
    assert!(config.suppress.is_empty());
    assert!(!config.parallel);
}

#[test]
fn test_malformed_config_uses_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(CONFIG_FILE), "{ not json").unwrap();
    let config = SagaGuardConfig::load(dir.path());
    assert_eq!(config.failure_base_type, "System.Exception");
}

#[test]
fn test_custom_names_drive_rules() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE),
        r#"{
          "capabilities": { "saga": "ISaga", "message": "IEvent" },
          "failure_base_type": "Framework.FaultBase"
        }"#,
    )
    .unwrap();
    let config = SagaGuardConfig::load(dir.path());

    let mut saga = class("BillingSaga", &["ISaga"]);
    saga.attributes.push(step("InvoiceIssued"));
    saga.attributes.push(retry_policy(
        "BillingSaga.cs",
        3,
        "RetryOnExceptions",
        &["Billing.GatewayFault", "Billing.Unrelated"],
    ));
    let graph = TypeGraph::new(vec![
        class("Framework.FaultBase", &[]),
        derived("Billing.GatewayFault", "Framework.FaultBase"),
        class("Billing.Unrelated", &[]),
        class("InvoiceIssued", &["IEvent"]),
        saga,
    ])
    .unwrap();

    let diags = ValidationEngine::with_config(&config).validate(&graph);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, RuleId::RetryOn);
    assert_eq!(diags[0].args, vec!["Billing.Unrelated"]);

    // The default names flag the saga, its message, and both exception entries.
    let defaults = ValidationEngine::new().validate(&graph);
    let codes: Vec<_> = defaults.iter().map(|d| d.code).collect();
    assert_eq!(
        codes,
        vec![
            RuleId::SagaClass,
            RuleId::MessageType,
            RuleId::RetryOn,
            RuleId::RetryOn
        ]
    );
}
