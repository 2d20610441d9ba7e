use std::collections::{BTreeMap, BTreeSet};

use ks_core::{scenario_file_name, Diagnostic, ResourceCategory, ResourceLocator};

use crate::extract::{CharacterRole, ExtractedFacts, ResourceRef};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Resolution {
    pub(crate) references: Vec<Diagnostic>,
    pub(crate) resources: Vec<Diagnostic>,
    pub(crate) characters: Vec<Diagnostic>,
}

pub(crate) fn resolve(facts: &ExtractedFacts, locator: &dyn ResourceLocator) -> Resolution {
    Resolution {
        references: resolve_targets(facts),
        resources: resolve_resources(&facts.resources, locator),
        characters: resolve_characters(facts),
    }
}

/// Jump refs first, then call refs, then link refs, each in line order.
fn resolve_targets(facts: &ExtractedFacts) -> Vec<Diagnostic> {
    let mut targets = facts.targets.iter().collect::<Vec<_>>();
    targets.sort_by_key(|target| target.kind);

    targets
        .into_iter()
        .filter(|target| !facts.labels.contains_key(&target.target))
        .map(|target| {
            Diagnostic::error(
                target.line,
                format!("label '{}' is not defined", target.target),
            )
        })
        .collect()
}

/// Sub-scripts first, then images, BGM, sound effects and video.
fn resource_rank(category: ResourceCategory) -> u8 {
    match category {
        ResourceCategory::SubScript => 0,
        ResourceCategory::BackgroundImage
        | ResourceCategory::GenericImage
        | ResourceCategory::CharacterImage => 1,
        ResourceCategory::Bgm => 2,
        ResourceCategory::SoundEffect => 3,
        ResourceCategory::Video => 4,
    }
}

fn resolve_resources(resources: &[ResourceRef], locator: &dyn ResourceLocator) -> Vec<Diagnostic> {
    let mut ordered = resources.iter().collect::<Vec<_>>();
    ordered.sort_by_key(|resource| resource_rank(resource.category));

    ordered
        .into_iter()
        .filter_map(|resource| {
            let path = match resource.category {
                ResourceCategory::SubScript => scenario_file_name(&resource.path),
                _ => resource.path.clone(),
            };
            if locator.exists(resource.category, &path) {
                return None;
            }
            Some(Diagnostic::warning(
                resource.line,
                format!("{} file '{}' not found", resource.category.describe(), path),
            ))
        })
        .collect()
}

/// One warning per distinct undefined name, cited at its first usage.
fn resolve_characters(facts: &ExtractedFacts) -> Vec<Diagnostic> {
    let defined = facts
        .characters
        .iter()
        .filter(|fact| fact.role == CharacterRole::Definition)
        .map(|fact| fact.name.as_str())
        .collect::<BTreeSet<_>>();

    let mut first_usage: BTreeMap<&str, usize> = BTreeMap::new();
    for fact in &facts.characters {
        if fact.role == CharacterRole::Usage && !defined.contains(fact.name.as_str()) {
            first_usage.entry(fact.name.as_str()).or_insert(fact.line);
        }
    }

    let mut undefined = first_usage.into_iter().collect::<Vec<_>>();
    undefined.sort_by_key(|(_, line)| *line);

    undefined
        .into_iter()
        .map(|(name, line)| {
            Diagnostic::warning(
                line,
                format!(
                    "character '{}' is not defined (define it with [chara_new])",
                    name
                ),
            )
        })
        .collect()
}
