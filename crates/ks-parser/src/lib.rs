mod directive;
mod lines;

pub use directive::{parse_directives, Attribute, AttributeValue, Directive};
pub use lines::{is_comment, scan_lines, ScriptLine, COMMENT_PREFIXES};
