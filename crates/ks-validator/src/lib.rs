//! Static checks for a single scenario file.
//!
//! [`validate_scenario`] makes one forward pass over the text. Each
//! non-comment line is tokenized once and fed to the structural matcher and
//! the reference extractor; the collected facts are then resolved against
//! the file's own labels and the project tree, and everything is assembled
//! into a [`ValidationReport`].
//!
//! Diagnostics come out in a fixed order: structural, label references,
//! resources, characters. Malformed directives never abort the pass.

mod extract;
mod report;
mod resolve;
mod structure;

use ks_core::{ResourceLocator, ValidationReport};
use ks_parser::{parse_directives, scan_lines};
use tracing::debug;

use crate::extract::ReferenceExtractor;
use crate::structure::StructuralMatcher;

pub fn validate_scenario(source: &str, locator: &dyn ResourceLocator) -> ValidationReport {
    let mut matcher = StructuralMatcher::default();
    let mut extractor = ReferenceExtractor::default();

    for line in scan_lines(source) {
        if line.is_comment {
            continue;
        }
        let directives = parse_directives(line.content);
        matcher.observe(line.number, &directives);
        extractor.observe(line.number, line.content, &directives);
    }

    let structural = matcher.finish();
    let facts = extractor.finish();
    let resolution = resolve::resolve(&facts, locator);
    let report = report::assemble(structural, resolution, &facts);

    debug!(
        labels = report.statistics.label_count,
        references = report.statistics.reference_count,
        resources = facts.resources.len(),
        diagnostics = report.diagnostics.len(),
        "scenario validated"
    );
    report
}

#[cfg(test)]
mod tests;
