use std::collections::BTreeMap;

use ks_core::{LabelName, ResourceCategory, TargetKind, LABEL_MARKER};
use ks_parser::Directive;

/// Image-like families in priority order. The first family containing the
/// directive name decides the category.
const IMAGE_FAMILIES: [(&[&str], ResourceCategory); 3] = [
    (&["bg"], ResourceCategory::BackgroundImage),
    (&["image"], ResourceCategory::GenericImage),
    (
        &["chara_new", "chara_show", "chara_mod"],
        ResourceCategory::CharacterImage,
    ),
];

/// Audio and video families accept bare `storage=` values.
const MEDIA_FAMILIES: [(&[&str], ResourceCategory); 3] = [
    (&["playbgm", "fadeinbgm", "xchgbgm"], ResourceCategory::Bgm),
    (&["playse", "fadeinse"], ResourceCategory::SoundEffect),
    (&["playvideo"], ResourceCategory::Video),
];

const SUB_SCRIPT_DIRECTIVE: &str = "call";
const CHARACTER_DEFINITION_DIRECTIVE: &str = "chara_new";
const CHARACTER_USAGE_DIRECTIVES: [&str; 4] =
    ["chara_show", "chara_hide", "chara_mod", "chara_layer"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRef {
    pub target: LabelName,
    pub line: usize,
    pub kind: TargetKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    pub path: String,
    pub category: ResourceCategory,
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterRole {
    Definition,
    Usage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterFact {
    pub name: String,
    pub line: usize,
    pub role: CharacterRole,
}

/// Everything the extractor learned about one scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFacts {
    /// Label name to declaring line. A redeclared label keeps its last line.
    pub labels: BTreeMap<LabelName, usize>,
    pub targets: Vec<TargetRef>,
    pub resources: Vec<ResourceRef>,
    pub characters: Vec<CharacterFact>,
}

#[derive(Debug, Default)]
pub(crate) struct ReferenceExtractor {
    facts: ExtractedFacts,
}

impl ReferenceExtractor {
    pub(crate) fn observe(&mut self, line: usize, content: &str, directives: &[Directive<'_>]) {
        if content.starts_with(LABEL_MARKER) {
            if let Some(name) = LabelName::normalize(content) {
                self.facts.labels.insert(name, line);
            }
        }

        for directive in directives {
            self.observe_target(line, directive);
            self.observe_resource(line, directive);
            self.observe_character(line, directive);
        }
    }

    pub(crate) fn finish(self) -> ExtractedFacts {
        self.facts
    }

    fn observe_target(&mut self, line: usize, directive: &Directive<'_>) {
        let kind = match directive.name {
            "jump" => TargetKind::Jump,
            "call" => TargetKind::Call,
            "link" | "glink" => TargetKind::Link,
            _ => return,
        };
        let Some(target) = directive.value("target").and_then(LabelName::normalize) else {
            return;
        };
        self.facts.targets.push(TargetRef { target, line, kind });
    }

    fn observe_resource(&mut self, line: usize, directive: &Directive<'_>) {
        let image = family_category(&IMAGE_FAMILIES, directive.name)
            .and_then(|category| Some((category, directive.quoted_value("storage")?)));
        let media = family_category(&MEDIA_FAMILIES, directive.name)
            .and_then(|category| Some((category, directive.value("storage")?)));
        let sub_script = (directive.name == SUB_SCRIPT_DIRECTIVE)
            .then(|| directive.quoted_value("storage"))
            .flatten()
            .map(|path| (ResourceCategory::SubScript, path));

        for (category, path) in [image, media, sub_script].into_iter().flatten() {
            self.facts.resources.push(ResourceRef {
                path: path.to_string(),
                category,
                line,
            });
        }
    }

    fn observe_character(&mut self, line: usize, directive: &Directive<'_>) {
        let role = if directive.name == CHARACTER_DEFINITION_DIRECTIVE {
            CharacterRole::Definition
        } else if CHARACTER_USAGE_DIRECTIVES.contains(&directive.name) {
            CharacterRole::Usage
        } else {
            return;
        };
        if let Some(name) = directive.quoted_value("name") {
            self.facts.characters.push(CharacterFact {
                name: name.to_string(),
                line,
                role,
            });
        }
    }
}

fn family_category(
    families: &[(&[&str], ResourceCategory)],
    name: &str,
) -> Option<ResourceCategory> {
    families
        .iter()
        .find(|(names, _)| names.contains(&name))
        .map(|(_, category)| *category)
}
