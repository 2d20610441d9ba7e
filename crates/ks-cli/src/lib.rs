use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::Path;

use clap::Parser;
use ks_core::{KsError, ValidationReport};
use ks_project::{
    render_reference, render_template, ProjectLayout, ProjectRoot, ReferenceCategory, TemplateKind,
};
use tracing::info;

mod cli_args;
mod error_map;
mod render;

pub(crate) use cli_args::{
    Cli, Mode, OutputFormat, ProjectArgs, ReferenceArgs, TemplateArgs, ValidateArgs,
};
pub(crate) use error_map::{emit_error, map_cli_report_json};
pub(crate) use render::render_report;

/// Exit code when at least one report carries an Error diagnostic.
pub const EXIT_VALIDATION_ERRORS: i32 = 2;

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return error.exit_code();
        }
    };
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

fn run(cli: Cli) -> Result<i32, KsError> {
    match cli.command {
        Mode::Validate(args) => run_validate(args),
        Mode::Template(args) => run_template(args),
        Mode::Reference(args) => run_reference(args),
    }
}

fn open_project(args: &ProjectArgs) -> Result<ProjectRoot, KsError> {
    let layout = match &args.layout {
        Some(path) => ProjectLayout::load(Path::new(path))?,
        None => ProjectLayout::default(),
    };
    ProjectRoot::open(&args.project_dir, layout)
}

fn run_validate(args: ValidateArgs) -> Result<i32, KsError> {
    let project = open_project(&args.project)?;
    let reports = match &args.scenario {
        Some(scenario) if !args.all => vec![(scenario.clone(), project.validate(scenario)?)],
        _ => project.validate_all()?,
    };
    let has_errors = reports.iter().any(|(_, report)| report.has_errors());
    info!(scenarios = reports.len(), has_errors, "validation finished");

    println!("RESULT:OK");
    match args.format {
        OutputFormat::Json => {
            let payload = reports
                .into_iter()
                .collect::<BTreeMap<String, ValidationReport>>();
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).map_err(map_cli_report_json)?
            );
        }
        OutputFormat::Text => {
            let single = reports.len() == 1 && !args.all;
            for (name, report) in &reports {
                if !single {
                    println!("== {} ==", name);
                }
                print!("{}", render_report(report));
            }
        }
    }

    Ok(if has_errors { EXIT_VALIDATION_ERRORS } else { 0 })
}

fn run_template(args: TemplateArgs) -> Result<i32, KsError> {
    let kind = args.kind.parse::<TemplateKind>()?;
    let params = args.params.into_iter().collect::<BTreeMap<_, _>>();
    let content = render_template(kind, &params);

    if args.stdout {
        println!("RESULT:OK");
        print!("{}", content);
        return Ok(0);
    }

    let project = open_project(&args.project)?;
    let path = project.write_scenario(&args.scenario, &content)?;
    info!(kind = kind.as_str(), path = %path.display(), "template written");
    println!("RESULT:OK");
    println!("WROTE:{}", path.display());
    Ok(0)
}

fn run_reference(args: ReferenceArgs) -> Result<i32, KsError> {
    let category = args
        .category
        .as_deref()
        .filter(|raw| *raw != "all")
        .map(str::parse::<ReferenceCategory>)
        .transpose()?;
    println!("RESULT:OK");
    print!("{}", render_reference(category));
    Ok(0)
}
