use sagaguard_core::types::{AttributeInstance, TypeDeclaration};

use crate::location::Anchor;
use crate::rules::RuleId;
use crate::types::Diagnostic;

/// Counts pivot-flagged step markers on a single type.
///
/// Built fresh for every type on every pass; the verdict only depends on the
/// final count, never on the order markers were observed in.
#[derive(Debug, Default)]
pub struct PivotCountTracker {
    count: usize,
}

impl PivotCountTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, attr: &AttributeInstance) {
        if attr.is_pivot() {
            self.count += 1;
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// RULE-MULTI-PIVOT when more than one step on `decl` is a pivot.
    pub fn finish(self, decl: &TypeDeclaration) -> Option<Diagnostic> {
        if self.count <= 1 {
            return None;
        }
        let location = Anchor::for_type(decl)
            .token(decl.name_span.as_ref())
            .attribute(decl.attributes.first())
            .resolve();
        Some(Diagnostic::new(
            RuleId::MultiPivot,
            &decl.name,
            vec![decl.simple_name().to_string(), self.count.to_string()],
            location,
        ))
    }
}

/// Run the tracker over every marker of `decl`.
pub fn check_multiple_pivots(decl: &TypeDeclaration) -> Option<Diagnostic> {
    let mut tracker = PivotCountTracker::new();
    for attr in &decl.attributes {
        tracker.observe(attr);
    }
    tracker.finish(decl)
}
