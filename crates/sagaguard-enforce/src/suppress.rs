use std::collections::HashSet;

use crate::rules::RuleId;
use crate::types::{Diagnostic, Severity};

/// Manages suppressed rule codes.
///
/// A suppressed diagnostic keeps its code and message but is downgraded to
/// severity `INFO`, marked `suppressed = true`, and given a suppress_hint.
#[derive(Debug, Default, Clone)]
pub struct SuppressionManager {
    suppressed: HashSet<RuleId>,
}

impl SuppressionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from config/CLI codes. Unknown codes are logged and ignored.
    pub fn from_codes<S: AsRef<str>>(codes: &[S]) -> Self {
        let mut mgr = Self::new();
        for code in codes {
            mgr.suppress(code.as_ref());
        }
        mgr
    }

    /// Add a code to suppress (e.g. "RULE-MULTI-PIVOT"). Returns false for unknown codes.
    pub fn suppress(&mut self, code: &str) -> bool {
        match RuleId::from_code(code) {
            Some(id) => {
                self.suppressed.insert(id);
                true
            }
            None => {
                tracing::warn!(code, "ignoring suppression of unknown rule code");
                false
            }
        }
    }

    pub fn is_suppressed(&self, code: RuleId) -> bool {
        self.suppressed.contains(&code)
    }

    /// Apply suppression to a diagnostic, returning the modified diagnostic.
    pub fn apply(&self, mut diagnostic: Diagnostic) -> Diagnostic {
        if self.is_suppressed(diagnostic.code) {
            diagnostic.suppress_hint =
                Some(format!("Suppressed {} via configuration", diagnostic.code));
            diagnostic.suppressed = true;
            diagnostic.severity = Severity::Info;
        }
        diagnostic
    }

    /// Number of active suppressions.
    pub fn count(&self) -> usize {
        self.suppressed.len()
    }
}
