
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use sagaguard_core::graph::TypeGraph;
use sagaguard_core::types::{
    ArgValue, Argument, AttributeInstance, AttributeKind, NamedArgument, Primitive, Span,
    TypeDeclaration, TypeKind, TypeRef,
};

pub const SAGA_CAP: &str = "SagaCapability";
pub const MESSAGE_CAP: &str = "MessageCapability";
pub const FAILURE_BASE: &str = "System.Exception";

#[allow(dead_code)]
pub fn class(name: &str, caps: &[&str]) -> TypeDeclaration {
    let mut d = TypeDeclaration::new(name, TypeKind::Class);
    d.capabilities = caps.iter().map(|c| c.to_string()).collect();
    d
}

#[allow(dead_code)]
pub fn derived(name: &str, base: &str) -> TypeDeclaration {
    let mut d = class(name, &[]);
    d.base = Some(base.to_string());
    d
}

#[allow(dead_code)]
pub fn interface(name: &str, extends: &[&str]) -> TypeDeclaration {
    let mut d = TypeDeclaration::new(name, TypeKind::Interface);
    d.capabilities = extends.iter().map(|c| c.to_string()).collect();
    d
}

/// `[SagaStep(typeof(message))]` with no spans.
#[allow(dead_code)]
pub fn step(message: &str) -> AttributeInstance {
    let mut attr = AttributeInstance::new(AttributeKind::Step, "SagaStep");
    attr.positional.push(Argument {
        value: ArgValue::Type(TypeRef::new(message)),
        span: None,
    });
    attr
}

/// A step marker with `isPivot = true` as a named argument.
#[allow(dead_code)]
pub fn pivot_step(message: &str) -> AttributeInstance {
    let mut attr = step(message);
    attr.named.push(NamedArgument {
        name: "isPivot".into(),
        value: ArgValue::Primitive(Primitive::Bool(true)),
        span: None,
    });
    attr
}

/// `[RetryPolicy(property = new[] { typeof(..), ... })]`, each element at its own column.
#[allow(dead_code)]
pub fn retry_policy(file: &str, line: u32, property: &str, elements: &[&str]) -> AttributeInstance {
    let mut attr = AttributeInstance::new(AttributeKind::RetryPolicy, "RetryPolicy");
    attr.span = Some(Span::new(file, line, 6, 120));
    let mut column = 40;
    let items = elements
        .iter()
        .map(|e| {
            let span = Span::new(file, line, column, e.len() as u32 + 8);
            column += e.len() as u32 + 10;
            ArgValue::Type(TypeRef::with_span(e, span))
        })
        .collect();
    attr.named.push(NamedArgument {
        name: property.to_string(),
        value: ArgValue::TypeArray(items),
        span: Some(Span::new(file, line, 18, 100)),
    });
    attr
}

/// `System.Exception` plus a small hierarchy of failure and non-failure types.
#[allow(dead_code)]
pub fn exception_types() -> Vec<TypeDeclaration> {
    vec![
        class(FAILURE_BASE, &[]),
        derived("System.TimeoutException", FAILURE_BASE),
        derived("Orders.PaymentDeclined", FAILURE_BASE),
        derived("Orders.CardExpired", "Orders.PaymentDeclined"),
        class("Orders.NotAnError", &[]),
        class("Orders.AlsoNotAnError", &[]),
    ]
}

/// A conforming saga: `OrderSaga : SagaCapability` stepping on `OrderCreatedEvent`.
#[allow(dead_code)]
pub fn order_saga_graph() -> TypeGraph {
    let mut saga = class("Orders.OrderSaga", &[SAGA_CAP]);
    saga.name_span = Some(Span::new("Orders/OrderSaga.cs", 8, 18, 9));
    saga.attributes.push(step("Orders.OrderCreatedEvent"));
    TypeGraph::new(vec![
        class("Orders.OrderCreatedEvent", &[MESSAGE_CAP]),
        saga,
    ])
    .unwrap()
}

/// `InvalidSaga` lacks the saga capability and steps on `InvalidMessage`,
/// which lacks the message capability.
#[allow(dead_code)]
pub fn invalid_saga_graph() -> TypeGraph {
    let mut saga = class("Orders.InvalidSaga", &[]);
    saga.name_span = Some(Span::new("Orders/InvalidSaga.cs", 6, 14, 11));
    let mut attr = AttributeInstance::new(AttributeKind::Step, "SagaStep");
    attr.span = Some(Span::new("Orders/InvalidSaga.cs", 5, 6, 34));
    attr.positional.push(Argument {
        value: ArgValue::Type(TypeRef::with_span(
            "Orders.InvalidMessage",
            Span::new("Orders/InvalidSaga.cs", 5, 15, 22),
        )),
        span: Some(Span::new("Orders/InvalidSaga.cs", 5, 15, 22)),
    });
    saga.attributes.push(attr);
    TypeGraph::new(vec![class("Orders.InvalidMessage", &[]), saga]).unwrap()
}

/// Write `graph` as JSON under `dir`, returning the path.
#[allow(dead_code)]
pub fn write_graph(dir: &Path, name: &str, graph: &TypeGraph) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, graph.to_json().unwrap()).unwrap();
    path
}

/// Locate the `sagaguard` binary, building it if necessary.
#[allow(dead_code)]
pub fn sagaguard_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop();
    path.pop();
    path.push("sagaguard");
    if path.exists() {
        return path;
    }
    let workspace = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let fallback = workspace.join("target/debug/sagaguard");
    if fallback.exists() {
        return fallback;
    }
    let status = Command::new("cargo")
        .args(["build", "-p", "sagaguard-cli"])
        .current_dir(&workspace)
        .status()
        .expect("Failed to build sagaguard");
    assert!(status.success(), "Failed to build sagaguard binary");
    fallback
}

/// Run `sagaguard` in `dir` with `args`.
#[allow(dead_code)]
pub fn run_sagaguard(dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(sagaguard_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("SAGAGUARD_CONFIG_DIR")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run sagaguard")
}
