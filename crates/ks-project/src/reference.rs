use std::str::FromStr;

use ks_core::KsError;

/// Groups of the tag quick reference, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceCategory {
    Text,
    Character,
    Background,
    Choice,
    Variable,
    Audio,
}

impl ReferenceCategory {
    pub const ALL: [ReferenceCategory; 6] = [
        Self::Text,
        Self::Character,
        Self::Background,
        Self::Choice,
        Self::Variable,
        Self::Audio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Character => "character",
            Self::Background => "background",
            Self::Choice => "choice",
            Self::Variable => "variable",
            Self::Audio => "audio",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Self::Text => "Text and message tags",
            Self::Character => "Character tags",
            Self::Background => "Background and image tags",
            Self::Choice => "Choice and jump tags",
            Self::Variable => "Variable and script tags",
            Self::Audio => "Audio and video tags",
        }
    }

    fn entries(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Text => &[
                ("[l]", "wait for click"),
                ("[p]", "wait for click, then new page"),
                ("[r]", "line break"),
                ("[er]", "clear the current message layer"),
                ("[cm]", "clear all message layers"),
                ("[font]", "set font"),
                ("[resetfont]", "reset font"),
                ("[ruby]", "attach ruby text"),
                ("[nowait]", "start instant text"),
                ("[endnowait]", "end instant text"),
            ],
            Self::Character => &[
                ("[chara_new name=\"name\" storage=\"image\"]", "define a character"),
                ("[chara_show name=\"name\"]", "show a character"),
                ("[chara_hide name=\"name\"]", "hide a character"),
                ("[chara_hide_all]", "hide all characters"),
                ("[chara_mod name=\"name\" storage=\"image\"]", "change expression"),
                ("[chara_ptext name=\"name\" text=\"label\"]", "show the speaker name"),
                ("[chara_config]", "character settings"),
                ("[chara_layer name=\"name\" layer=\"n\"]", "move to another layer"),
            ],
            Self::Background => &[
                ("[bg storage=\"image\"]", "change background"),
                ("[image layer=\"n\" storage=\"image\"]", "show an image"),
                ("[freeimage layer=\"n\"]", "remove images from a layer"),
                ("[layopt layer=\"n\" visible=\"true/false\"]", "toggle layer visibility"),
                ("[trans time=\"ms\"]", "run a transition"),
                ("[wt]", "wait for the transition"),
                ("[ptext]", "place text on a layer"),
                ("[free]", "release a layer element"),
            ],
            Self::Choice => &[
                ("[link target=\"label\"]", "start a text link"),
                ("[endlink]", "end a text link"),
                ("[glink target=\"label\" text=\"caption\"]", "graphical link"),
                ("[button]", "create a button"),
                ("[jump target=\"label\"]", "jump to a label"),
                ("[call storage=\"scenario\" target=\"label\"]", "call a subroutine"),
                ("[return]", "return from a subroutine"),
                ("[s]", "stop the scenario"),
                ("*label", "define a label"),
            ],
            Self::Variable => &[
                ("[eval exp=\"var=value\"]", "evaluate an expression"),
                ("[iscript]", "start inline script"),
                ("[endscript]", "end inline script"),
                ("[if exp=\"cond\"]", "start a conditional"),
                ("[elsif exp=\"cond\"]", "else-if branch"),
                ("[else]", "else branch"),
                ("[endif]", "end a conditional"),
                ("[emb exp=\"var\"]", "embed a value in text"),
                ("[checkpoint]", "register a rollback point"),
                ("[rollback]", "roll back"),
            ],
            Self::Audio => &[
                ("[playbgm storage=\"music\"]", "play bgm"),
                ("[stopbgm]", "stop bgm"),
                ("[pausebgm]", "pause bgm"),
                ("[resumebgm]", "resume bgm"),
                ("[fadeinbgm]", "fade bgm in"),
                ("[fadeoutbgm]", "fade bgm out"),
                ("[playse storage=\"sound\"]", "play a sound effect"),
                ("[stopse]", "stop sound effects"),
                ("[wse]", "wait for a sound effect"),
                ("[playvideo storage=\"video\"]", "play a video"),
                ("[wb]", "wait for the video"),
            ],
        }
    }
}

impl FromStr for ReferenceCategory {
    type Err = KsError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == raw)
            .ok_or_else(|| {
                KsError::new(
                    "REFERENCE_CATEGORY_UNKNOWN",
                    format!("Unknown reference category: {}", raw),
                )
            })
    }
}

/// Renders the tag quick reference for one category, or every category
/// separated by blank lines when `category` is `None`.
pub fn render_reference(category: Option<ReferenceCategory>) -> String {
    let categories = match category {
        Some(category) => vec![category],
        None => ReferenceCategory::ALL.to_vec(),
    };
    categories
        .into_iter()
        .map(|category| {
            let mut section = format!("{}:\n", category.title());
            for (tag, description) in category.entries() {
                section.push_str(&format!("  {} - {}\n", tag, description));
            }
            section
        })
        .collect::<Vec<_>>()
        .join("\n")
}
