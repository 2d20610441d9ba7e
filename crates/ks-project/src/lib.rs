mod layout;
mod project;
mod reference;
mod templates;

pub use layout::ProjectLayout;
pub use project::ProjectRoot;
pub use reference::{render_reference, ReferenceCategory};
pub use templates::{render_template, TemplateKind};
