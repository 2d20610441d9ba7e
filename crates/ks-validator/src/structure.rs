use ks_core::{Diagnostic, Severity};
use ks_parser::Directive;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Conditional,
    InlineScript,
    TextLink,
}

impl BlockKind {
    const ALL: [BlockKind; 3] = [Self::Conditional, Self::InlineScript, Self::TextLink];

    pub fn open_name(&self) -> &'static str {
        match self {
            Self::Conditional => "if",
            Self::InlineScript => "iscript",
            Self::TextLink => "link",
        }
    }

    pub fn close_name(&self) -> &'static str {
        match self {
            Self::Conditional => "endif",
            Self::InlineScript => "endscript",
            Self::TextLink => "endlink",
        }
    }

    /// Link nesting is cosmetic, the other blocks are not.
    fn mismatch_severity(&self) -> Severity {
        match self {
            Self::TextLink => Severity::Warning,
            Self::Conditional | Self::InlineScript => Severity::Error,
        }
    }

    fn opened_by(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.open_name() == name)
    }

    fn closed_by(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.close_name() == name)
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    kind: BlockKind,
    line: usize,
}

/// Matches block open/close directives with an explicit stack.
///
/// A close only ever looks at the top frame. A mismatched close is reported
/// and leaves the stack untouched, so the frame it should have closed is
/// reported again as unclosed at the end.
#[derive(Debug, Default)]
pub(crate) struct StructuralMatcher {
    stack: Vec<Frame>,
    diagnostics: Vec<Diagnostic>,
}

impl StructuralMatcher {
    pub(crate) fn observe(&mut self, line: usize, directives: &[Directive<'_>]) {
        for directive in directives {
            if let Some(kind) = BlockKind::opened_by(directive.name) {
                self.stack.push(Frame { kind, line });
            } else if let Some(kind) = BlockKind::closed_by(directive.name) {
                self.close(kind, line);
            }
        }
    }

    fn close(&mut self, kind: BlockKind, line: usize) {
        if self.stack.last().is_some_and(|frame| frame.kind == kind) {
            self.stack.pop();
            return;
        }
        self.diagnostics.push(Diagnostic {
            severity: kind.mismatch_severity(),
            line,
            message: format!(
                "[{}] has no matching [{}]",
                kind.close_name(),
                kind.open_name()
            ),
        });
    }

    pub(crate) fn finish(mut self) -> Vec<Diagnostic> {
        for frame in &self.stack {
            self.diagnostics.push(Diagnostic::error(
                frame.line,
                format!("[{}] is never closed", frame.kind.open_name()),
            ));
        }
        self.diagnostics
    }
}
