use crate::constants::{exit_codes, verbosity};
use crate::include::IncludePathMode;
use clap::{error::ErrorKind, CommandFactory, Parser};
use log::LevelFilter;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#;

/// CLI arguments for treeplate.
///
/// Every flag overrides the matching value of the configuration file.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory holding `treeplate.yaml`, `treeplate.yml` or `treeplate.json`.
    #[arg(value_name = "CONFIG_DIR", default_value = ".")]
    pub config_dir: PathBuf,

    /// Directory containing the template sources.
    #[arg(short, long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Directory to rebuild with the rendered files. Its content is deleted.
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Extra directory searched for included templates (repeatable).
    #[arg(short = 'I', long = "include-dir", value_name = "DIR")]
    pub include_dirs: Vec<PathBuf>,

    /// Glob selecting source files, relative to the source directory (repeatable).
    #[arg(long = "include", value_name = "GLOB")]
    pub includes: Vec<String>,

    /// Glob excluding source files, relative to the source directory (repeatable).
    #[arg(long = "exclude", value_name = "GLOB")]
    pub excludes: Vec<String>,

    /// Context values as a JSON object, or `-` to read it from stdin.
    #[arg(short, long, value_name = "JSON")]
    pub context: Option<String>,

    /// Sets one context value (repeatable). VALUE is parsed as JSON when
    /// possible, as a string otherwise.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Removes one context value (repeatable).
    #[arg(long = "unset", value_name = "KEY")]
    pub unset: Vec<String>,

    /// Extension stripped from file names to form `class`.
    #[arg(long = "source-extension", value_name = "EXT")]
    pub source_extension: Option<String>,

    /// How input files contribute to the include search path.
    #[arg(long = "include-path-mode", value_enum)]
    pub include_path_mode: Option<IncludePathMode>,

    /// Project name exposed to templates as `project.name`.
    #[arg(long = "project-name", value_name = "NAME")]
    pub project_name: Option<String>,

    /// Render every file and report all failures instead of stopping at the first.
    #[arg(long = "continue-on-error")]
    pub continue_on_error: bool,

    /// Fail on references to undefined values.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse command line arguments with custom handling for missing required inputs.
pub fn get_args() -> Args {
    Args::try_parse().unwrap_or_else(|e| {
        if e.kind() == ErrorKind::MissingRequiredArgument {
            let mut command = Args::command().help_template(HELP_TEMPLATE);
            if let Err(print_err) = command.print_help() {
                eprintln!("Failed to display help information: {print_err}");
            } else {
                println!();
            }
            std::process::exit(exit_codes::FAILURE);
        } else {
            e.exit();
        }
    })
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}
