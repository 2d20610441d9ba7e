use std::fmt;

use serde::{Deserialize, Serialize};

/// Sigil that starts a label declaration line and may prefix a jump target.
pub const LABEL_MARKER: char = '*';

/// Appended to sub-script references that carry no extension of their own.
pub const SCENARIO_EXTENSION: &str = ".ks";

/// `name` with [`SCENARIO_EXTENSION`] appended unless it already ends with it.
pub fn scenario_file_name(name: &str) -> String {
    if name.ends_with(SCENARIO_EXTENSION) {
        name.to_string()
    } else {
        format!("{}{}", name, SCENARIO_EXTENSION)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// One reported issue. `line` is 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub line: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn error(line: usize, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            line,
            message: message.into(),
        }
    }

    pub fn warning(line: usize, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            line,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// A label or jump target name with surrounding whitespace, quotes and the
/// leading [`LABEL_MARKER`] removed.
///
/// Every site that produces a label name (declarations and `target=` values)
/// goes through [`LabelName::normalize`], so `*room1`, `"*room1"` and `room1`
/// all compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelName(String);

impl LabelName {
    pub fn normalize(raw: &str) -> Option<Self> {
        let unquoted = strip_matching_quotes(raw.trim()).trim();
        let unmarked = unquoted
            .strip_prefix(LABEL_MARKER)
            .unwrap_or(unquoted)
            .trim();
        if unmarked.is_empty() {
            None
        } else {
            Some(Self(unmarked.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LabelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", LABEL_MARKER, self.0)
    }
}

fn strip_matching_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Jump,
    Call,
    Link,
}

/// Where a `storage=` reference is expected to live in the project tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceCategory {
    BackgroundImage,
    GenericImage,
    CharacterImage,
    Bgm,
    SoundEffect,
    Video,
    SubScript,
}

impl ResourceCategory {
    pub const ALL: [ResourceCategory; 7] = [
        Self::BackgroundImage,
        Self::GenericImage,
        Self::CharacterImage,
        Self::Bgm,
        Self::SoundEffect,
        Self::Video,
        Self::SubScript,
    ];

    /// Subfolder name under the project's data directory.
    pub fn default_subfolder(&self) -> &'static str {
        match self {
            Self::BackgroundImage => "bgimage",
            Self::GenericImage => "image",
            Self::CharacterImage => "fgimage",
            Self::Bgm => "bgm",
            Self::SoundEffect => "sound",
            Self::Video => "video",
            Self::SubScript => "scenario",
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Self::BackgroundImage => "background image",
            Self::GenericImage => "image",
            Self::CharacterImage => "character image",
            Self::Bgm => "BGM",
            Self::SoundEffect => "sound effect",
            Self::Video => "video",
            Self::SubScript => "scenario",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub label_count: usize,
    pub reference_count: usize,
    pub defined_character_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<Diagnostic>,
    pub statistics: Statistics,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity == Severity::Warning)
    }
}

/// Answers whether a referenced file exists in the project tree.
///
/// `relative_path` is relative to the category's subfolder. Implementations
/// must be safe to call repeatedly with the same arguments and give the same
/// answer while the tree is unchanged.
pub trait ResourceLocator {
    fn exists(&self, category: ResourceCategory, relative_path: &str) -> bool;
}

impl<F> ResourceLocator for F
where
    F: Fn(ResourceCategory, &str) -> bool,
{
    fn exists(&self, category: ResourceCategory, relative_path: &str) -> bool {
        self(category, relative_path)
    }
}

#[cfg(test)]
mod types_tests {
    use super::*;

    #[test]
    fn label_name_normalizes_marker_quotes_and_whitespace() {
        let expected = LabelName::normalize("room1").expect("plain name");
        for raw in ["*room1", "\"*room1\"", "'room1'", "  * room1 ", "\"room1\""] {
            assert_eq!(LabelName::normalize(raw).as_ref(), Some(&expected), "{raw}");
        }
        assert_eq!(expected.as_str(), "room1");
        assert_eq!(expected.to_string(), "*room1");
    }

    #[test]
    fn scenario_file_name_appends_missing_extension() {
        assert_eq!(scenario_file_name("battle"), "battle.ks");
        assert_eq!(scenario_file_name("battle.ks"), "battle.ks");
        assert_eq!(scenario_file_name("dir/x"), "dir/x.ks");
    }

    #[test]
    fn label_name_rejects_empty_names() {
        assert!(LabelName::normalize("").is_none());
        assert!(LabelName::normalize("*").is_none());
        assert!(LabelName::normalize("\"\"").is_none());
        assert!(LabelName::normalize("  *  ").is_none());
    }

    #[test]
    fn label_name_keeps_unbalanced_quotes() {
        let name = LabelName::normalize("\"room").expect("non-empty");
        assert_eq!(name.as_str(), "\"room");
    }

    #[test]
    fn resource_categories_have_distinct_subfolders() {
        let mut folders = ResourceCategory::ALL
            .iter()
            .map(ResourceCategory::default_subfolder)
            .collect::<Vec<_>>();
        folders.sort();
        folders.dedup();
        assert_eq!(folders.len(), ResourceCategory::ALL.len());
        assert_eq!(ResourceCategory::SubScript.default_subfolder(), "scenario");
    }

    #[test]
    fn report_helpers_split_by_severity() {
        let report = ValidationReport {
            diagnostics: vec![
                Diagnostic::error(3, "bad"),
                Diagnostic::warning(4, "meh"),
                Diagnostic::error(9, "worse"),
            ],
            statistics: Statistics::default(),
        };
        assert!(!report.is_clean());
        assert!(report.has_errors());
        assert_eq!(report.errors().count(), 2);
        assert_eq!(report.warnings().map(|d| d.line).collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn report_serializes_with_camel_case_statistics() {
        let report = ValidationReport {
            diagnostics: vec![Diagnostic::warning(1, "w")],
            statistics: Statistics {
                label_count: 2,
                reference_count: 3,
                defined_character_count: 1,
            },
        };
        let json = serde_json::to_value(&report).expect("report should serialize");
        assert_eq!(json["diagnostics"][0]["severity"], "warning");
        assert_eq!(json["statistics"]["labelCount"], 2);
        assert_eq!(json["statistics"]["definedCharacterCount"], 1);
    }

    #[test]
    fn closures_act_as_resource_locators() {
        let locator = |category: ResourceCategory, path: &str| {
            category == ResourceCategory::Bgm && path == "theme.ogg"
        };
        assert!(locator.exists(ResourceCategory::Bgm, "theme.ogg"));
        assert!(!locator.exists(ResourceCategory::Video, "theme.ogg"));
    }
}
