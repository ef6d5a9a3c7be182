//! Output formatters for sagaguard command results.
//!
//! Provides two output modes:
//! - **JSON** (`--json`): Machine-readable structured output
//! - **Human** (default): Compiler-style diagnostics for terminal users

pub mod human;
pub(crate) mod human_helpers;
pub mod json;

use sagaguard_enforce::types::{
    ExplainResult, FixApplyResult, FixResult, RulesResult, ValidationResult,
};

pub trait OutputFormatter {
    fn format_check(&self, result: &ValidationResult) -> String;
    fn format_fix(&self, result: &FixResult) -> String;
    fn format_fix_apply(&self, result: &FixApplyResult) -> String;
    fn format_rules(&self, result: &RulesResult) -> String;
    fn format_explain(&self, result: &ExplainResult) -> String;
}
