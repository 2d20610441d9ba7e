use super::*;
use ks_core::{Diagnostic, ResourceCategory, Severity};
use std::collections::BTreeSet;

#[derive(Default)]
struct Tree(BTreeSet<(ResourceCategory, String)>);

impl Tree {
    fn with(entries: &[(ResourceCategory, &str)]) -> Self {
        Self(
            entries
                .iter()
                .map(|(category, path)| (*category, (*path).to_string()))
                .collect(),
        )
    }
}

impl ResourceLocator for Tree {
    fn exists(&self, category: ResourceCategory, relative_path: &str) -> bool {
        self.0.contains(&(category, relative_path.to_string()))
    }
}

fn validate(source: &str) -> ValidationReport {
    validate_scenario(source, &Tree::default())
}

fn lines_of(diagnostics: &[Diagnostic]) -> Vec<(Severity, usize)> {
    diagnostics.iter().map(|d| (d.severity, d.line)).collect()
}

#[test]
fn text_without_blocks_has_no_structural_diagnostics() {
    let report = validate("*start\nHello.[p]\n[cm]\n#akane\nBye.[l][r]\n*end");
    assert!(report.is_clean(), "{:?}", report.diagnostics);
    assert_eq!(report.statistics.label_count, 2);
}

#[test]
fn unclosed_blocks_report_once_at_opening_line() {
    let report = validate("*start\n[if exp=\"f.a\"]\ntext\n[iscript]\nf.b = 1;");
    assert_eq!(
        lines_of(&report.diagnostics),
        vec![(Severity::Error, 2), (Severity::Error, 4)]
    );
}

#[test]
fn stray_close_reports_once_and_leaves_stack_alone() {
    let report = validate("[if exp=\"f.a\"]\n[endscript]\n[endif]");
    assert_eq!(lines_of(&report.diagnostics), vec![(Severity::Error, 2)]);
    assert!(report.diagnostics[0].message.contains("[endscript]"));
}

#[test]
fn target_matches_label_with_or_without_marker_and_quotes() {
    for jump in [
        "[jump target=\"*room1\"]",
        "[jump target=*room1]",
        "[jump target=\"room1\"]",
        "[jump target='*room1']",
        "@jump target=room1",
    ] {
        let report = validate(&format!("*room1\ntext\n{}", jump));
        assert!(report.is_clean(), "{}: {:?}", jump, report.diagnostics);
        assert_eq!(report.statistics.reference_count, 1);
    }
}

#[test]
fn missing_target_reports_exactly_once_at_the_jump() {
    let report = validate("*start\ntext\n[jump target=\"*missing\"]\n[jump target=\"*start\"]");
    assert_eq!(lines_of(&report.diagnostics), vec![(Severity::Error, 3)]);
    assert_eq!(
        report.diagnostics[0].message,
        "label '*missing' is not defined"
    );
}

#[test]
fn undefined_character_warns_once_for_many_usages() {
    let report = validate(
        "[chara_show name=\"X\"]\n[chara_mod name=\"X\" face=\"smile\"]\n[chara_hide name=\"X\"]",
    );
    assert_eq!(lines_of(&report.diagnostics), vec![(Severity::Warning, 1)]);
    assert!(report.diagnostics[0].message.contains("'X'"));
}

#[test]
fn missing_background_warns_with_line_and_file() {
    let report = validate("*start\n[bg storage=\"bg.jpg\"]");
    assert_eq!(lines_of(&report.diagnostics), vec![(Severity::Warning, 2)]);
    assert!(report.diagnostics[0].message.contains("bg.jpg"));

    let tree = Tree::with(&[(ResourceCategory::BackgroundImage, "bg.jpg")]);
    assert!(validate_scenario("*start\n[bg storage=\"bg.jpg\"]", &tree).is_clean());

    // Present, but in the wrong subfolder.
    let tree = Tree::with(&[(ResourceCategory::GenericImage, "bg.jpg")]);
    assert!(!validate_scenario("[bg storage=\"bg.jpg\"]", &tree).is_clean());
}

#[test]
fn repeated_runs_are_identical() {
    let source = "[if exp=\"a\"]\n[jump target=*nowhere]\n[chara_show name=\"b\"]\n[playse storage=x.ogg]";
    let tree = Tree::with(&[(ResourceCategory::SoundEffect, "y.ogg")]);
    let first = validate_scenario(source, &tree);
    let second = validate_scenario(source, &tree);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).expect("report json"),
        serde_json::to_string(&second).expect("report json")
    );
}

#[test]
fn comment_lines_contribute_nothing() {
    let report = validate(
        "; [jump target=\"*x\"]\n// [if exp=\"a\"]\n;*label\n; [chara_show name=\"ghost\"]\n;[bg storage=\"a.jpg\"]",
    );
    assert!(report.is_clean());
    assert_eq!(report.statistics.reference_count, 0);
    assert_eq!(report.statistics.label_count, 0);
}

#[test]
fn comment_lines_still_count_for_numbering() {
    let report = validate("; header\n; more\n[endif]");
    assert_eq!(report.diagnostics[0].line, 3);
}

#[test]
fn malformed_directives_are_skipped_silently() {
    let report = validate(
        "[bg storage=\"unterminated.jpg]\n[jump target=\"\"]\n[chara_show name=bare]\n[image storage=bare.png]",
    );
    assert!(report.is_clean(), "{:?}", report.diagnostics);
}

#[test]
fn redeclared_label_resolves_without_diagnostic() {
    let report = validate("*a\n*a\n[jump target=*a]");
    assert!(report.is_clean());
    assert_eq!(report.statistics.label_count, 1);
}

#[test]
fn full_scenario_orders_diagnostics_by_pass() {
    let source = r#"; title scene
*title
[cm]
[bg storage="title.jpg"]
[playbgm storage=theme.ogg]
[glink text="Start" target="*start"]
[glink text="Extra" target="*extra"]
[s]

*start
[chara_new name="akane" storage="chara/akane.png"]
[chara_show name="akane"]
[chara_show name="yamato"]
[if exp="f.met"]
[call storage="side" target="*side"]
[endif]
[link target="*title"]Back[endlink]
[jump target="*ending"]
[iscript]
f.met = true;
[endlink]
[playvideo storage="op.mp4"]
"#;
    let tree = Tree::with(&[
        (ResourceCategory::BackgroundImage, "title.jpg"),
        (ResourceCategory::CharacterImage, "chara/akane.png"),
        (ResourceCategory::SubScript, "side.ks"),
    ]);
    let report = validate_scenario(source, &tree);

    let messages = report
        .diagnostics
        .iter()
        .map(|d| (d.severity, d.line, d.message.as_str()))
        .collect::<Vec<_>>();
    assert_eq!(
        messages,
        vec![
            (Severity::Warning, 21, "[endlink] has no matching [link]"),
            (Severity::Error, 19, "[iscript] is never closed"),
            (Severity::Error, 18, "label '*ending' is not defined"),
            (Severity::Error, 15, "label '*side' is not defined"),
            (Severity::Error, 7, "label '*extra' is not defined"),
            (Severity::Warning, 5, "BGM file 'theme.ogg' not found"),
            (Severity::Warning, 22, "video file 'op.mp4' not found"),
            (
                Severity::Warning,
                13,
                "character 'yamato' is not defined (define it with [chara_new])"
            ),
        ]
    );
    assert_eq!(report.statistics.label_count, 2);
    assert_eq!(report.statistics.reference_count, 5);
    assert_eq!(report.statistics.defined_character_count, 1);
    assert!(report.has_errors());
}
