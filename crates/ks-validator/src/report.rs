use std::collections::BTreeSet;

use ks_core::{Diagnostic, Statistics, ValidationReport};

use crate::extract::{CharacterRole, ExtractedFacts};
use crate::resolve::Resolution;

pub(crate) fn assemble(
    structural: Vec<Diagnostic>,
    resolution: Resolution,
    facts: &ExtractedFacts,
) -> ValidationReport {
    let Resolution {
        references,
        resources,
        characters,
    } = resolution;

    let mut diagnostics = structural;
    diagnostics.extend(references);
    diagnostics.extend(resources);
    diagnostics.extend(characters);

    ValidationReport {
        diagnostics,
        statistics: statistics(facts),
    }
}

pub(crate) fn statistics(facts: &ExtractedFacts) -> Statistics {
    let defined_characters = facts
        .characters
        .iter()
        .filter(|fact| fact.role == CharacterRole::Definition)
        .map(|fact| fact.name.as_str())
        .collect::<BTreeSet<_>>();

    Statistics {
        label_count: facts.labels.len(),
        reference_count: facts.targets.len(),
        defined_character_count: defined_characters.len(),
    }
}
