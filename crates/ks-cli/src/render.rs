use std::fmt::Write;

use ks_core::{Diagnostic, ValidationReport};

/// Human-readable report: errors, warnings, then statistics.
pub(crate) fn render_report(report: &ValidationReport) -> String {
    let mut out = String::new();

    if report.is_clean() {
        out.push_str("No problems found.\n\n");
    } else {
        push_section(&mut out, "Errors", report.errors());
        push_section(&mut out, "Warnings", report.warnings());
    }

    let stats = &report.statistics;
    out.push_str("Statistics:\n");
    let _ = writeln!(out, "  labels: {}", stats.label_count);
    let _ = writeln!(out, "  jumps/calls/links: {}", stats.reference_count);
    let _ = writeln!(out, "  defined characters: {}", stats.defined_character_count);
    out
}

fn push_section<'a>(
    out: &mut String,
    title: &str,
    diagnostics: impl Iterator<Item = &'a Diagnostic>,
) {
    let mut diagnostics = diagnostics.peekable();
    if diagnostics.peek().is_none() {
        return;
    }
    let _ = writeln!(out, "{}:", title);
    for diagnostic in diagnostics {
        let _ = writeln!(out, "  line {}: {}", diagnostic.line, diagnostic.message);
    }
    out.push('\n');
}
