use sagaguard_core::types::Span;
use serde::{Deserialize, Serialize};

use crate::rules::{Rule, RuleId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Info => "INFO",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which step of the location fallback chain produced a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    Token,
    Argument,
    Attribute,
    TypeName,
    Unanchored,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub precision: Precision,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl Location {
    pub fn unanchored() -> Self {
        Self {
            precision: Precision::Unanchored,
            span: None,
        }
    }

    pub fn file(&self) -> &str {
        self.span.as_ref().map(|s| s.file.as_str()).unwrap_or("")
    }

    pub fn line(&self) -> u32 {
        self.span.as_ref().map(|s| s.line).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: RuleId,
    pub severity: Severity,
    pub category: String,
    pub message: String,
    /// Qualified name of the declaration the marker is attached to.
    pub type_name: String,
    pub location: Location,
    pub args: Vec<String>,
    pub fix_hint: Option<String>,
    pub suppressed: bool,
    pub suppress_hint: Option<String>,
}

impl Diagnostic {
    /// Build a diagnostic from the registry entry for `code`.
    pub fn new(code: RuleId, type_name: &str, args: Vec<String>, location: Location) -> Self {
        let rule = code.rule();
        Self {
            code,
            severity: rule.severity,
            category: rule.category.to_string(),
            message: rule.render(&args),
            type_name: type_name.to_string(),
            location,
            args,
            fix_hint: Some(rule.fix_hint.to_string()),
            suppressed: false,
            suppress_hint: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub version: String,
    pub command: String,
    pub status: String, // "ok" | "error" | "warning"
    pub types_analyzed: u32,
    pub diagnostics: Vec<Diagnostic>,
    pub summary: ValidationSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub errors: u32,
    pub warnings: u32,
    pub suppressed: u32,
}

impl ValidationSummary {
    pub fn from_diagnostics(diagnostics: &[Diagnostic]) -> Self {
        let mut summary = Self::default();
        for d in diagnostics {
            if d.suppressed {
                summary.suppressed += 1;
                continue;
            }
            match d.severity {
                Severity::Error => summary.errors += 1,
                Severity::Warning => summary.warnings += 1,
                Severity::Info => {}
            }
        }
        summary
    }
}

// --- Fix types ---

/// Structural edit appending a capability to a declaration's capability list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixSuggestion {
    pub code: RuleId,
    pub target: String,
    pub capability: String,
    pub old_capabilities: Vec<String>,
    pub new_capabilities: Vec<String>,
    /// True when the declaration had no capability list before the edit.
    pub creates_list: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Span>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FixState {
    NoFixAvailable {
        code: RuleId,
        target: String,
        message: String,
    },
    FixAvailable(FixSuggestion),
}

impl FixState {
    pub fn suggestion(&self) -> Option<&FixSuggestion> {
        match self {
            FixState::FixAvailable(fix) => Some(fix),
            FixState::NoFixAvailable { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixResult {
    pub version: String,
    pub command: String,
    pub fixes_available: u32,
    pub plans: Vec<FixState>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixApplyResult {
    pub version: String,
    pub command: String,
    pub fixes_applied: u32,
    pub output_path: String,
    pub remaining: ValidationResult,
}

// --- Rule registry views ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleInfo {
    pub code: RuleId,
    pub category: String,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub fix_hint: String,
    /// True when the rule has a structural fix.
    pub fixable: bool,
}

impl From<&Rule> for RuleInfo {
    fn from(rule: &Rule) -> Self {
        Self {
            code: rule.id,
            category: rule.category.to_string(),
            severity: rule.severity,
            title: rule.title.to_string(),
            description: rule.description.to_string(),
            fix_hint: rule.fix_hint.to_string(),
            fixable: rule.id == RuleId::SagaClass,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesResult {
    pub version: String,
    pub command: String,
    pub rules: Vec<RuleInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainResult {
    pub version: String,
    pub command: String,
    pub rule: RuleInfo,
    /// Active suppression state from configuration.
    pub suppressed: bool,
}

/// Errors surfaced by the validation engine.
#[derive(Debug, thiserror::Error)]
pub enum EnforceError {
    #[error("validation cancelled after {types_analyzed} type(s)")]
    Cancelled {
        diagnostics: Vec<Diagnostic>,
        types_analyzed: usize,
    },
}
