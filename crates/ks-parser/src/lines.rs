/// Trimmed lines starting with one of these are comments.
pub const COMMENT_PREFIXES: [&str; 2] = [";", "//"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptLine<'a> {
    /// 1-indexed, counted over every line including comments.
    pub number: usize,
    pub content: &'a str,
    pub is_comment: bool,
}

/// Splits `source` on `\n` and trims each line. `\r\n` is not normalized
/// beyond what trimming removes.
pub fn scan_lines(source: &str) -> impl Iterator<Item = ScriptLine<'_>> {
    source.split('\n').enumerate().map(|(index, raw)| {
        let content = raw.trim();
        ScriptLine {
            number: index + 1,
            content,
            is_comment: is_comment(content),
        }
    })
}

pub fn is_comment(content: &str) -> bool {
    COMMENT_PREFIXES
        .iter()
        .any(|prefix| content.starts_with(prefix))
}

#[cfg(test)]
mod lines_tests {
    use super::*;

    #[test]
    fn scan_lines_numbers_every_line_and_trims() {
        let lines = scan_lines("  *start  \n; note\n\n[p]\r\n// other").collect::<Vec<_>>();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0].number, 1);
        assert_eq!(lines[0].content, "*start");
        assert!(!lines[0].is_comment);
        assert!(lines[1].is_comment);
        assert_eq!(lines[2].content, "");
        assert!(!lines[2].is_comment);
        assert_eq!(lines[3].content, "[p]");
        assert_eq!(lines[4].number, 5);
        assert!(lines[4].is_comment);
    }

    #[test]
    fn comment_detection_uses_trimmed_prefix_only() {
        assert!(is_comment("; [jump target=\"*x\"]"));
        assert!(is_comment("//[if exp=\"f.a\"]"));
        assert!(!is_comment("/ not a comment"));
        assert!(!is_comment("text ; trailing"));
    }

    #[test]
    fn empty_source_is_one_empty_line() {
        let lines = scan_lines("").collect::<Vec<_>>();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].content, "");
    }
}
