use crate::human_helpers::{capability_list, format_diagnostic_human, severity_label};
use crate::OutputFormatter;
use sagaguard_enforce::types::{
    ExplainResult, FixApplyResult, FixResult, FixState, RulesResult, ValidationResult,
};

pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format_check(&self, result: &ValidationResult) -> String {
        if result.diagnostics.is_empty() {
            return String::new(); // Clean check = empty stdout
        }

        let mut out = String::new();
        for d in &result.diagnostics {
            out.push_str(&format_diagnostic_human(d));
        }

        let s = &result.summary;
        out.push_str(&format!(
            "\n{} error(s), {} warning(s), {} suppressed in {} type(s)\n",
            s.errors, s.warnings, s.suppressed, result.types_analyzed,
        ));
        out
    }

    fn format_fix(&self, result: &FixResult) -> String {
        if result.plans.is_empty() {
            return "No diagnostics to fix.\n".to_string();
        }
        let mut out = format!(
            "Fix plan: {} of {} diagnostic(s) fixable\n\n",
            result.fixes_available,
            result.plans.len(),
        );
        for plan in &result.plans {
            match plan {
                FixState::FixAvailable(fix) => {
                    out.push_str(&format!("[{}] {}\n", fix.code, fix.description));
                    if let Some(anchor) = &fix.anchor {
                        out.push_str(&format!("  --> {}\n", anchor));
                    }
                    out.push_str(&format!(
                        "    - capabilities: {}\n    + capabilities: {}\n",
                        capability_list(&fix.old_capabilities),
                        capability_list(&fix.new_capabilities),
                    ));
                }
                FixState::NoFixAvailable {
                    code,
                    target,
                    message,
                } => {
                    out.push_str(&format!("[{}] no automatic fix for `{}`\n", code, target));
                    out.push_str(&format!("  {}\n", message));
                }
            }
            out.push('\n');
        }
        out
    }

    fn format_fix_apply(&self, result: &FixApplyResult) -> String {
        let mut out = format!(
            "Applied {} fix(es), wrote {}\n",
            result.fixes_applied, result.output_path,
        );
        let remaining = self.format_check(&result.remaining);
        if remaining.is_empty() {
            out.push_str("No remaining diagnostics.\n");
        } else {
            out.push_str("\nRemaining:\n");
            out.push_str(&remaining);
        }
        out
    }

    fn format_rules(&self, result: &RulesResult) -> String {
        let mut out = String::new();
        for r in &result.rules {
            out.push_str(&format!(
                "{:<20} {:<8} {}{}\n",
                r.code.as_str(),
                severity_label(r.severity),
                r.title,
                if r.fixable { " [fixable]" } else { "" },
            ));
        }
        out
    }

    fn format_explain(&self, result: &ExplainResult) -> String {
        let r = &result.rule;
        let mut out = format!("{} ({}): {}\n", r.code, r.severity, r.title);
        out.push_str(&format!("  category: {}\n\n", r.category));
        out.push_str(&format!("{}\n\n", r.description));
        out.push_str(&format!("  fix: {}\n", r.fix_hint));
        if result.suppressed {
            out.push_str("  suppressed via configuration\n");
        }
        out
    }
}
