//! CLI logic for the fsmaid chart tool.
//!
//! Reads one C source file and writes one Mermaid chart per state machine
//! declared in it.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{error, info, warn};
use miette::GraphicalReportHandler;

use fsmaid::{Chart, ChartBuilder, ChartFailure, Diagnostic, FsmaidError};

use error_adapter::diagnostics_to_reportables;

/// Run the fsmaid CLI application
///
/// Every declared state machine is attempted, even after one fails to be
/// written. Returns the paths of the charts written, in declaration order;
/// a source without declarations writes nothing and succeeds.
///
/// # Errors
///
/// Returns `FsmaidError` for:
/// - Configuration loading errors
/// - An input file that cannot be read
/// - An output directory that cannot be created
/// - [`FsmaidError::Charts`] listing every state machine that was not written
pub fn run(args: &Args) -> Result<Vec<PathBuf>, FsmaidError> {
    info!(
        input_path = args.input,
        output_dir = args.output_dir;
        "Processing state machines"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let input = input_path(&args.input, app_config.files().input_extension());
    let source = fs::read_to_string(&input).map_err(|source| FsmaidError::InputNotFound {
        path: input.clone(),
        source,
    })?;

    let builder = ChartBuilder::new(app_config);
    let declarations = builder.locate(&source);
    report_warnings(declarations.diagnostics(), &source);

    if declarations.is_empty() {
        info!(
            input_path = input.display().to_string();
            "No state machines declared, nothing written"
        );
        return Ok(Vec::new());
    }

    let output_dir = Path::new(&args.output_dir);
    fs::create_dir_all(output_dir)?;

    let mut written = Vec::new();
    let mut failures = Vec::new();

    for declaration in &declarations {
        let chart = builder.build(&source, declaration);
        report_warnings(chart.diagnostics(), &source);

        match write_chart(&builder, &chart, output_dir) {
            Ok(path) => {
                info!(
                    fsm = chart.name(),
                    output_file = path.display().to_string();
                    "Chart written"
                );
                written.push(path);
            }
            Err(err) => {
                error!(fsm = chart.name(); "Chart not written: {err}");
                failures.push(ChartFailure::new(chart.name(), err));
            }
        }
    }

    if failures.is_empty() {
        Ok(written)
    } else {
        Err(FsmaidError::Charts(failures))
    }
}

/// Append `.{extension}` unless `input` already ends with it.
fn input_path(input: &str, extension: &str) -> PathBuf {
    if extension.is_empty() || input.ends_with(&format!(".{extension}")) {
        PathBuf::from(input)
    } else {
        PathBuf::from(format!("{input}.{extension}"))
    }
}

/// `{dir}/{name}.{extension}`, refusing names that would leave `dir`.
fn output_path(dir: &Path, name: &str, extension: &str) -> Result<PathBuf, FsmaidError> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(FsmaidError::InvalidName(name.to_string()));
    }

    let file_name = if extension.is_empty() {
        name.to_string()
    } else {
        format!("{name}.{extension}")
    };
    Ok(dir.join(file_name))
}

fn write_chart(builder: &ChartBuilder, chart: &Chart, dir: &Path) -> Result<PathBuf, FsmaidError> {
    let path = output_path(dir, chart.name(), builder.config().files().output_extension())?;
    let text = builder.render(chart)?;
    fs::write(&path, text)?;
    Ok(path)
}

fn report_warnings(diagnostics: &[Diagnostic], source: &str) {
    let reporter = GraphicalReportHandler::new();

    for reportable in diagnostics_to_reportables(diagnostics, source) {
        let mut writer = String::new();
        match reporter.render_report(&mut writer, &reportable) {
            Ok(()) => warn!("{writer}"),
            Err(_) => warn!("{reportable}"),
        }
    }
}
