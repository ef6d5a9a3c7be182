use sagaguard_enforce::types::{Diagnostic, Severity};

pub(crate) fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info => "info",
    }
}

pub(crate) fn format_diagnostic_human(d: &Diagnostic) -> String {
    let location = match &d.location.span {
        Some(span) => span.to_string(),
        None => format!("<{}>", d.type_name),
    };
    let mut out = format!(
        "{}[{}]: {}\n  --> {}\n",
        severity_label(d.severity),
        d.code,
        d.message,
        location,
    );

    out.push_str(&format!("   = type: {}\n", d.type_name));

    if let Some(fix) = &d.fix_hint {
        out.push_str(&format!("   = fix: {}\n", fix));
    }

    if d.suppressed {
        if let Some(hint) = &d.suppress_hint {
            out.push_str(&format!("   = {}\n", hint));
        }
    }

    out
}

/// Render a capability list the way it would appear after the type name.
pub(crate) fn capability_list(capabilities: &[String]) -> String {
    if capabilities.is_empty() {
        "(none)".to_string()
    } else {
        capabilities.join(", ")
    }
}
