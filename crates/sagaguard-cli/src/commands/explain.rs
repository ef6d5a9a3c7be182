use std::path::Path;

use sagaguard_enforce::rules::RuleId;
use sagaguard_enforce::types::{ExplainResult, RuleInfo};
use sagaguard_output::OutputFormatter;

/// Run `sagaguard explain <code>`: describe a rule.
pub fn run(formatter: &dyn OutputFormatter, verbose: bool, config_dir: &Path, code: String) -> i32 {
    let Some(id) = RuleId::from_code(&code) else {
        eprintln!("sagaguard explain: unknown rule code {}", code);
        if verbose {
            let known: Vec<&str> = RuleId::all().map(|r| r.as_str()).collect();
            eprintln!("  known codes: {}", known.join(", "));
        }
        return 2;
    };

    let config = super::load_config(config_dir);
    let suppressed = config
        .suppress
        .iter()
        .any(|c| RuleId::from_code(c) == Some(id));

    let result = ExplainResult {
        version: env!("CARGO_PKG_VERSION").to_string(),
        command: "explain".to_string(),
        rule: RuleInfo::from(id.rule()),
        suppressed,
    };
    super::emit(&formatter.format_explain(&result));
    0
}
