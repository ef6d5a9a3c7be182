// Tests for the location fallback chain: token, argument, attribute, type name.

use sagaguard_core::graph::TypeGraph;
use sagaguard_core::types::{ArgValue, Argument, AttributeInstance, AttributeKind, Span, TypeRef};
use sagaguard_enforce::rules::RuleId;
use sagaguard_enforce::types::{Location, Precision};
use sagaguard_enforce::validate;

use crate::common::{class, exception_types, invalid_saga_graph, retry_policy, SAGA_CAP};

fn message_step(
    token: Option<Span>,
    argument: Option<Span>,
    attribute: Option<Span>,
) -> AttributeInstance {
    let mut attr = AttributeInstance::new(AttributeKind::Step, "SagaStep");
    attr.span = attribute;
    attr.positional.push(Argument {
        value: ArgValue::Type(TypeRef {
            name: "BadMessage".into(),
            span: token,
        }),
        span: argument,
    });
    attr
}

fn message_location(attr: AttributeInstance, name_span: Option<Span>) -> Location {
    let mut saga = class("OrderSaga", &[SAGA_CAP]);
    saga.name_span = name_span;
    saga.attributes.push(attr);
    let graph = TypeGraph::new(vec![saga, class("BadMessage", &[])]).unwrap();
    let diags = validate(&graph);
    assert_eq!(diags[0].code, RuleId::MessageType);
    diags[0].location.clone()
}

fn s(col: u32) -> Span {
    Span::new("OrderSaga.cs", 4, col, 10)
}

#[test]
fn test_fallback_chain_levels() {
    let loc = message_location(message_step(Some(s(1)), Some(s(2)), Some(s(3))), Some(s(4)));
    assert_eq!(loc.precision, Precision::Token);
    assert_eq!(loc.span.unwrap().column, 1);

    let loc = message_location(message_step(None, Some(s(2)), Some(s(3))), Some(s(4)));
    assert_eq!(loc.precision, Precision::Argument);
    assert_eq!(loc.span.unwrap().column, 2);

    let loc = message_location(message_step(None, None, Some(s(3))), Some(s(4)));
    assert_eq!(loc.precision, Precision::Attribute);
    assert_eq!(loc.span.unwrap().column, 3);

    let loc = message_location(message_step(None, None, None), Some(s(4)));
    assert_eq!(loc.precision, Precision::TypeName);
    assert_eq!(loc.span.unwrap().column, 4);
}

#[test]
fn test_no_spans_still_reported() {
    let loc = message_location(message_step(None, None, None), None);
    assert_eq!(loc.precision, Precision::Unanchored);
    assert!(loc.span.is_none());
}

#[test]
fn test_saga_class_prefers_name_token() {
    let diags = validate(&invalid_saga_graph());
    assert_eq!(diags[0].code, RuleId::SagaClass);
    assert_eq!(diags[0].location.precision, Precision::Token);
    let span = diags[0].location.span.as_ref().unwrap();
    assert_eq!((span.line, span.column), (6, 14));
}

#[test]
fn test_message_type_anchored_at_type_argument() {
    let diags = validate(&invalid_saga_graph());
    assert_eq!(diags[1].code, RuleId::MessageType);
    let span = diags[1].location.span.as_ref().unwrap();
    assert_eq!((span.line, span.column), (5, 15));
}

#[test]
fn test_retry_on_second_element_anchor() {
    let mut saga = class("Orders.PaymentSaga", &[SAGA_CAP]);
    let policy = retry_policy(
        "PaymentSaga.cs",
        9,
        "RetryOnExceptions",
        &["System.TimeoutException", "Orders.NotAnError"],
    );
    let second = match &policy.named[0].value {
        ArgValue::TypeArray(items) => items[1].as_type().unwrap().span.clone().unwrap(),
        _ => unreachable!(),
    };
    saga.attributes.push(policy);
    let mut decls = exception_types();
    decls.push(saga);

    let diags = validate(&TypeGraph::new(decls).unwrap());
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].location.precision, Precision::Token);
    assert_eq!(diags[0].location.span.as_ref(), Some(&second));
}

#[test]
fn test_retry_element_without_span_falls_back_to_argument() {
    let mut saga = class("Orders.PaymentSaga", &[SAGA_CAP]);
    let mut policy = retry_policy(
        "PaymentSaga.cs",
        9,
        "RetryOnExceptions",
        &["Orders.NotAnError"],
    );
    if let ArgValue::TypeArray(items) = &mut policy.named[0].value {
        items[0] = ArgValue::Type(TypeRef::new("Orders.NotAnError"));
    }
    saga.attributes.push(policy);
    let mut decls = exception_types();
    decls.push(saga);

    let diags = validate(&TypeGraph::new(decls).unwrap());
    assert_eq!(diags[0].location.precision, Precision::Argument);
    assert_eq!(diags[0].location.span.as_ref().unwrap().column, 18);
}
