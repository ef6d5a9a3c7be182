//! Fixed registry of saga marker rules.
//!
//! Codes are a stable contract for downstream tooling; never renumber them.

use serde::{Deserialize, Serialize};

use crate::types::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RuleId {
    #[serde(rename = "RULE-MSG-TYPE")]
    MessageType,
    #[serde(rename = "RULE-SAGA-CLASS")]
    SagaClass,
    #[serde(rename = "RULE-RETRY-ON")]
    RetryOn,
    #[serde(rename = "RULE-NON-RETRYABLE")]
    NonRetryable,
    #[serde(rename = "RULE-MULTI-PIVOT")]
    MultiPivot,
}

#[derive(Debug)]
pub struct Rule {
    pub id: RuleId,
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub title: &'static str,
    /// `{0}`, `{1}`, ... are replaced by the diagnostic's message arguments.
    pub template: &'static str,
    pub description: &'static str,
    pub fix_hint: &'static str,
}

pub static RULES: [Rule; 5] = [
    Rule {
        id: RuleId::MessageType,
        code: "RULE-MSG-TYPE",
        category: "message-type-must-implement-message-capability",
        severity: Severity::Error,
        title: "Step message type must implement the message capability",
        template: "Message type '{0}' handled by a saga step does not implement the message \
                   capability",
        description: "The first argument of a step marker names the message type the step \
                      reacts to. That type must implement the message capability, directly, \
                      through a base class, or through an interface that extends it.",
        fix_hint: "Implement the message capability on the referenced message type",
    },
    Rule {
        id: RuleId::SagaClass,
        code: "RULE-SAGA-CLASS",
        category: "saga-class-must-implement-saga-capability",
        severity: Severity::Error,
        title: "Type with step markers must implement the saga capability",
        template: "Type '{0}' carries saga step markers but does not implement the saga capability",
        description: "Step markers may only be applied to saga types. The annotated type must \
                      implement the saga capability, directly, through a base class, or through \
                      an interface that extends it.",
        fix_hint: "Add the saga capability to the type's capability list",
    },
    Rule {
        id: RuleId::RetryOn,
        code: "RULE-RETRY-ON",
        category: "retry-on-exceptions-must-be-failure-types",
        severity: Severity::Error,
        title: "RetryOnExceptions entries must derive from the base failure type",
        template: "Type '{0}' listed in RetryOnExceptions does not derive from the base failure \
                   type",
        description: "Every type listed in a retry policy's RetryOnExceptions must have the \
                      base failure type somewhere in its base-class chain.",
        fix_hint: "Remove the entry or list a type derived from the base failure type",
    },
    Rule {
        id: RuleId::NonRetryable,
        code: "RULE-NON-RETRYABLE",
        category: "non-retryable-exceptions-must-be-failure-types",
        severity: Severity::Error,
        title: "NonRetryableExceptions entries must derive from the base failure type",
        template: "Type '{0}' listed in NonRetryableExceptions does not derive from the base \
                   failure type",
        description: "Every type listed in a retry policy's NonRetryableExceptions must have \
                      the base failure type somewhere in its base-class chain.",
        fix_hint: "Remove the entry or list a type derived from the base failure type",
    },
    Rule {
        id: RuleId::MultiPivot,
        code: "RULE-MULTI-PIVOT",
        category: "at-most-one-pivot-step",
        severity: Severity::Error,
        title: "A saga may declare at most one pivot step",
        template: "Saga '{0}' declares {1} pivot steps; at most one step may be the point of no \
                   return",
        description: "A pivot step is the point of no return: after it runs, compensation no \
                      longer applies. A saga type may flag at most one of its step markers as \
                      the pivot.",
        fix_hint: "Keep the pivot flag on a single step marker",
    },
];

impl RuleId {
    pub fn rule(&self) -> &'static Rule {
        match self {
            RuleId::MessageType => &RULES[0],
            RuleId::SagaClass => &RULES[1],
            RuleId::RetryOn => &RULES[2],
            RuleId::NonRetryable => &RULES[3],
            RuleId::MultiPivot => &RULES[4],
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.rule().code
    }

    pub fn from_code(code: &str) -> Option<Self> {
        RULES
            .iter()
            .find(|r| r.code.eq_ignore_ascii_case(code))
            .map(|r| r.id)
    }

    pub fn all() -> impl Iterator<Item = RuleId> {
        RULES.iter().map(|r| r.id)
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Rule {
    /// Render the message template with positional arguments.
    pub fn render(&self, args: &[String]) -> String {
        let mut out = self.template.to_string();
        for (i, arg) in args.iter().enumerate() {
            out = out.replace(&format!("{{{}}}", i), arg);
        }
        out
    }
}
