use crate::{
    cli::Args,
    compiler::{CompileRequest, RunReport, TreeCompiler},
    config::{Config, ConfigV1},
    constants::STDIN_INDICATOR,
    context::{parse_assignment, ContextValues},
    error::{Error, Result},
    ioutils::read_from,
    renderer::get_template_engine,
    source::SourceTree,
};
use std::path::PathBuf;

/// Main CLI runner: merges configuration and flags, then compiles the tree.
pub struct Runner {
    args: Args,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    /// Executes the complete compilation workflow
    pub fn run(self) -> Result<RunReport> {
        let mut config = self.load_config()?;
        self.apply_overrides(&mut config)?;
        config.validate()?;

        let source_dir = required(config.source_dir.clone(), "source directory", "--source")?;
        let output_root = required(config.output_dir.clone(), "output directory", "--output")?;

        let input_files = SourceTree::new(&source_dir)
            .includes(config.includes.iter().cloned())
            .excludes(config.excludes.iter().cloned())
            .collect()?;
        log::info!("Found {} template(s) in {}", input_files.len(), source_dir.display());

        let request = CompileRequest {
            input_files,
            include_dirs: config.include_dirs.clone(),
            base_values: Some(config.context.clone()),
            output_root,
            project: config.project.clone(),
        };

        let mut compiler = TreeCompiler::new(config.compiler_options(), get_template_engine());
        let report = compiler.run(&request)?;

        if report.is_success() {
            println!(
                "Rendered {} file(s) into {}.",
                report.rendered.len(),
                request.output_root.display()
            );
        }
        Ok(report)
    }

    /// Loads the configuration file, falling back to defaults when there is none.
    fn load_config(&self) -> Result<ConfigV1> {
        match Config::find_config(&self.args.config_dir)? {
            Some(Config::V1(config)) => Ok(config),
            None => {
                log::debug!(
                    "No configuration file in {}, using command line values only",
                    self.args.config_dir.display()
                );
                Ok(ConfigV1::default())
            }
        }
    }

    /// Applies command line values on top of the configuration file.
    fn apply_overrides(&self, config: &mut ConfigV1) -> Result<()> {
        let args = &self.args;

        if let Some(source) = &args.source {
            config.source_dir = Some(source.clone());
        }
        if let Some(output) = &args.output {
            config.output_dir = Some(output.clone());
        }
        config.include_dirs.extend(args.include_dirs.iter().cloned());
        config.includes.extend(args.includes.iter().cloned());
        config.excludes.extend(args.excludes.iter().cloned());
        if let Some(extension) = &args.source_extension {
            config.source_extension = extension.clone();
        }
        if let Some(mode) = args.include_path_mode {
            config.include_path_mode = mode;
        }
        if let Some(name) = &args.project_name {
            config.project.name = name.clone();
        }
        if args.continue_on_error {
            config.continue_on_error = true;
        }
        if args.strict {
            config.strict_undefined = true;
        }

        if let Some(context) = &args.context {
            let buf = if context == STDIN_INDICATOR {
                read_from(std::io::stdin())?
            } else {
                context.clone()
            };
            config.context.extend(ContextValues::from_json_str(&buf)?);
        }
        for assignment in &args.set {
            let (key, value) = parse_assignment(assignment)?;
            config.context.set(key, Some(value));
        }
        for key in &args.unset {
            config.context.set(key.as_str(), None);
        }

        Ok(())
    }
}

fn required(value: Option<PathBuf>, what: &str, flag: &str) -> Result<PathBuf> {
    value.ok_or_else(|| {
        Error::ConfigValidation(format!(
            "no {what} configured; set it in the configuration file or pass {flag}"
        ))
    })
}

/// Main entry point for CLI execution
pub fn run(args: Args) -> Result<RunReport> {
    let runner = Runner::new(args);
    runner.run()
}
