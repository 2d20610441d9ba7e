use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::OnceLock;

use ks_core::KsError;
use regex::{Captures, Regex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    BasicScene,
    CharacterIntro,
    ChoiceBranch,
    Dialogue,
    TitleScreen,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 5] = [
        Self::BasicScene,
        Self::CharacterIntro,
        Self::ChoiceBranch,
        Self::Dialogue,
        Self::TitleScreen,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BasicScene => "basic_scene",
            Self::CharacterIntro => "character_intro",
            Self::ChoiceBranch => "choice_branch",
            Self::Dialogue => "dialogue",
            Self::TitleScreen => "title_screen",
        }
    }

    fn body(&self) -> &'static str {
        match self {
            Self::BasicScene => BASIC_SCENE,
            Self::CharacterIntro => CHARACTER_INTRO,
            Self::ChoiceBranch => CHOICE_BRANCH,
            Self::Dialogue => DIALOGUE,
            Self::TitleScreen => TITLE_SCREEN,
        }
    }

    fn defaults(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::BasicScene => &[
                ("label", "start"),
                ("bg", "room.jpg"),
                ("text", "Write your text here."),
                ("next_label", "*end"),
            ],
            Self::CharacterIntro => &[
                ("label", "chara_intro"),
                ("bg", "room.jpg"),
                ("chara_name", "character1"),
                ("chara_image", "chara/character1.png"),
                ("chara_jname", "Character"),
                ("dialogue", "Hello!"),
                ("next_label", "*next"),
            ],
            Self::ChoiceBranch => &[
                ("label", "choice"),
                ("prompt_text", "Make a choice."),
                ("choice1_text", "Choice 1"),
                ("choice1_label", "branch1"),
                ("choice1_result", "You picked choice 1."),
                ("choice2_text", "Choice 2"),
                ("choice2_label", "branch2"),
                ("choice2_result", "You picked choice 2."),
                ("choice3_label", "branch3"),
                ("next_label", "*end"),
            ],
            Self::Dialogue => &[
                ("label", "dialogue"),
                ("bg", "room.jpg"),
                ("chara1_name", "Character A"),
                ("chara2_name", "Character B"),
                ("line1", "Hello."),
                ("line2", "Hey, how are you?"),
                ("line3", "I'm great!"),
                ("next_label", "*next"),
            ],
            Self::TitleScreen => &[
                ("label", "title"),
                ("bg", "title.jpg"),
                ("start_label", "start"),
            ],
        }
    }
}

impl FromStr for TemplateKind {
    type Err = KsError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == raw)
            .ok_or_else(|| {
                KsError::new(
                    "TEMPLATE_KIND_UNKNOWN",
                    format!("Unknown template kind: {}", raw),
                )
            })
    }
}

/// Fills `{slot}` placeholders from `params`, falling back to the template's
/// defaults. A line starting with `{?slot}` is kept only when `slot` is
/// present in `params`.
pub fn render_template(kind: TemplateKind, params: &BTreeMap<String, String>) -> String {
    let lookup = |slot: &str| -> Option<String> {
        params.get(slot).cloned().or_else(|| {
            kind.defaults()
                .iter()
                .find(|(name, _)| *name == slot)
                .map(|(_, value)| (*value).to_string())
        })
    };

    let mut rendered = String::new();
    for line in kind.body().lines() {
        let line = match optional_line_regex().captures(line) {
            Some(caps) if params.contains_key(&caps[1]) => {
                caps.get(2).map_or("", |m| m.as_str())
            }
            Some(_) => continue,
            None => line,
        };
        let filled = placeholder_regex().replace_all(line, |caps: &Captures<'_>| {
            lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        });
        rendered.push_str(&filled);
        rendered.push('\n');
    }
    rendered
}

fn placeholder_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\{([a-z0-9_]+)\}").expect("placeholder regex"))
}

fn optional_line_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^\{\?([a-z0-9_]+)\}(.*)$").expect("optional line regex"))
}

const BASIC_SCENE: &str = r#"; basic scene
*{label}

[cm]
[bg storage="{bg}"]

{text}[p]

[jump target="{next_label}"]
[s]"#;

const CHARACTER_INTRO: &str = r#"; character introduction
*{label}

[cm]
[bg storage="{bg}"]

[chara_new name="{chara_name}" storage="{chara_image}" jname="{chara_jname}"]
[chara_show name="{chara_name}"]

#{chara_jname}
{dialogue}[p]

[jump target="{next_label}"]
[s]"#;

const CHOICE_BRANCH: &str = r#"; choice branch
*{label}

[cm]
{prompt_text}[p]

[glink text="{choice1_text}" target="*{choice1_label}" size=20 width=500 x=30 y=200]
[glink text="{choice2_text}" target="*{choice2_label}" size=20 width=500 x=30 y=260]
{?choice3_text}[glink text="{choice3_text}" target="*{choice3_label}" size=20 width=500 x=30 y=320]
[s]

*{choice1_label}
[cm]
{choice1_result}[p]
[jump target="{next_label}"]

*{choice2_label}
[cm]
{choice2_result}[p]
[jump target="{next_label}"]"#;

const DIALOGUE: &str = r#"; dialogue
*{label}

[cm]
[bg storage="{bg}"]

#{chara1_name}
{line1}[p]

#{chara2_name}
{line2}[p]

#{chara1_name}
{line3}[p]

[jump target="{next_label}"]
[s]"#;

const TITLE_SCREEN: &str = r#"; title screen
*{label}

[cm]
[clearfix]
[hidemenubutton]
[bg storage="{bg}"]

[glink text="New Game" target="*{start_label}" size=20 width=300 x=490 y=300]
[glink text="Continue" role="load" size=20 width=300 x=490 y=360]
[glink text="Quit" role="sleepgame" size=20 width=300 x=490 y=420]
[s]"#;
