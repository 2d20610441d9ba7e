use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "ks-cli")]
#[command(about = "Static checks for scenario projects")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Mode,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Mode {
    Validate(ValidateArgs),
    Template(TemplateArgs),
    Reference(ReferenceArgs),
}

#[derive(Debug, Args)]
pub(crate) struct ProjectArgs {
    #[arg(long = "project-dir")]
    pub(crate) project_dir: String,
    #[arg(long = "layout")]
    pub(crate) layout: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Args)]
pub(crate) struct ValidateArgs {
    #[command(flatten)]
    pub(crate) project: ProjectArgs,
    #[arg(long = "scenario", required_unless_present = "all", conflicts_with = "all")]
    pub(crate) scenario: Option<String>,
    #[arg(long = "all")]
    pub(crate) all: bool,
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

#[derive(Debug, Args)]
pub(crate) struct TemplateArgs {
    #[command(flatten)]
    pub(crate) project: ProjectArgs,
    #[arg(long = "scenario")]
    pub(crate) scenario: String,
    #[arg(long = "kind")]
    pub(crate) kind: String,
    #[arg(long = "param", value_parser = parse_param)]
    pub(crate) params: Vec<(String, String)>,
    #[arg(long = "stdout")]
    pub(crate) stdout: bool,
}

#[derive(Debug, Args)]
pub(crate) struct ReferenceArgs {
    #[arg(long = "category")]
    pub(crate) category: Option<String>,
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected key=value, got \"{}\"", raw)),
    }
}
