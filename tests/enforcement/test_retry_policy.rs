// Tests for RULE-RETRY-ON and RULE-NON-RETRYABLE.

use sagaguard_core::graph::TypeGraph;
use sagaguard_core::types::{
    ArgValue, AttributeInstance, AttributeKind, NamedArgument, Primitive, TypeRef,
};
use sagaguard_enforce::rules::RuleId;
use sagaguard_enforce::validate;

use crate::common::{class, derived, exception_types, retry_policy, SAGA_CAP};

fn graph_with_policy(policy: AttributeInstance) -> TypeGraph {
    let mut saga = class("Orders.PaymentSaga", &[SAGA_CAP]);
    saga.attributes.push(policy);
    let mut decls = exception_types();
    decls.push(saga);
    TypeGraph::new(decls).unwrap()
}

#[test]
fn test_one_conforming_one_not() {
    let graph = graph_with_policy(retry_policy(
        "PaymentSaga.cs",
        4,
        "RetryOnExceptions",
        &["System.TimeoutException", "Orders.NotAnError"],
    ));
    let diags = validate(&graph);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, RuleId::RetryOn);
    assert_eq!(diags[0].args, vec!["Orders.NotAnError"]);
}

#[test]
fn test_deep_inheritance_matches() {
    let graph = graph_with_policy(retry_policy(
        "PaymentSaga.cs",
        4,
        "NonRetryableExceptions",
        &["Orders.CardExpired", "System.Exception"],
    ));
    assert!(validate(&graph).is_empty());
}

#[test]
fn test_multiple_invalid_elements_in_source_order() {
    let graph = graph_with_policy(retry_policy(
        "PaymentSaga.cs",
        4,
        "NonRetryableExceptions",
        &[
            "Orders.AlsoNotAnError",
            "Orders.PaymentDeclined",
            "Orders.NotAnError",
        ],
    ));
    let diags = validate(&graph);
    assert!(diags.iter().all(|d| d.code == RuleId::NonRetryable));
    let args: Vec<_> = diags.iter().map(|d| d.args[0].as_str()).collect();
    assert_eq!(args, vec!["Orders.AlsoNotAnError", "Orders.NotAnError"]);
}

#[test]
fn test_both_properties_checked_independently() {
    let mut policy = retry_policy(
        "PaymentSaga.cs",
        4,
        "RetryOnExceptions",
        &["Orders.NotAnError"],
    );
    let non_retryable = retry_policy(
        "PaymentSaga.cs",
        4,
        "NonRetryableExceptions",
        &["Orders.NotAnError"],
    );
    policy.named.extend(non_retryable.named);
    let codes: Vec<_> = validate(&graph_with_policy(policy))
        .iter()
        .map(|d| d.code)
        .collect();
    assert_eq!(codes, vec![RuleId::RetryOn, RuleId::NonRetryable]);
}

#[test]
fn test_single_type_instead_of_array_skipped() {
    let mut policy = AttributeInstance::new(AttributeKind::RetryPolicy, "RetryPolicy");
    policy.named.push(NamedArgument {
        name: "RetryOnExceptions".into(),
        value: ArgValue::Type(TypeRef::new("Orders.NotAnError")),
        span: None,
    });
    policy.named.push(NamedArgument {
        name: "MaxRetries".into(),
        value: ArgValue::Primitive(Primitive::Int(3)),
        span: None,
    });
    assert!(validate(&graph_with_policy(policy)).is_empty());
}

#[test]
fn test_non_type_elements_skipped() {
    let mut policy = AttributeInstance::new(AttributeKind::RetryPolicy, "RetryPolicy");
    policy.named.push(NamedArgument {
        name: "RetryOnExceptions".into(),
        value: ArgValue::TypeArray(vec![
            ArgValue::Missing,
            ArgValue::Primitive(Primitive::Str("Orders.NotAnError".into())),
        ]),
        span: None,
    });
    assert!(validate(&graph_with_policy(policy)).is_empty());
}

#[test]
fn test_broken_base_chain_skipped() {
    let mut saga = class("Orders.PaymentSaga", &[SAGA_CAP]);
    saga.attributes.push(retry_policy(
        "PaymentSaga.cs",
        4,
        "RetryOnExceptions",
        &["Orders.VendorFault", "Orders.LoopA"],
    ));
    let mut decls = exception_types();
    decls.push(derived("Orders.VendorFault", "Vendor.UndeclaredBase"));
    decls.push(derived("Orders.LoopA", "Orders.LoopB"));
    decls.push(derived("Orders.LoopB", "Orders.LoopA"));
    decls.push(saga);
    assert!(validate(&TypeGraph::new(decls).unwrap()).is_empty());
}

#[test]
fn test_policy_on_saga_without_steps_still_checked() {
    let mut plain = class("Orders.Worker", &[]);
    plain.attributes.push(retry_policy(
        "Worker.cs",
        2,
        "RetryOnExceptions",
        &["Orders.NotAnError"],
    ));
    let mut decls = exception_types();
    decls.push(plain);
    let codes: Vec<_> = validate(&TypeGraph::new(decls).unwrap())
        .iter()
        .map(|d| d.code)
        .collect();
    assert_eq!(codes, vec![RuleId::RetryOn]);
}
