use sagaguard_enforce::rules::RuleId;
use sagaguard_enforce::types::{RuleInfo, RulesResult};
use sagaguard_output::OutputFormatter;

/// Run `sagaguard rules`: list the rule registry.
pub fn run(formatter: &dyn OutputFormatter) -> i32 {
    let result = RulesResult {
        version: env!("CARGO_PKG_VERSION").to_string(),
        command: "rules".to_string(),
        rules: RuleId::all().map(|id| RuleInfo::from(id.rule())).collect(),
    };
    super::emit(&formatter.format_rules(&result));
    0
}
