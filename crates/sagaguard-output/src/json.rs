use crate::OutputFormatter;
use sagaguard_enforce::types::{
    ExplainResult, FixApplyResult, FixResult, RulesResult, ValidationResult,
};

pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_check(&self, result: &ValidationResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_default()
    }
    fn format_fix(&self, result: &FixResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_default()
    }
    fn format_fix_apply(&self, result: &FixApplyResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_default()
    }
    fn format_rules(&self, result: &RulesResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_default()
    }
    fn format_explain(&self, result: &ExplainResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_default()
    }
}
