//! Run orchestration: search path, output rebuild, then one render per file.

use crate::constants::{DEFAULT_ENGINE_LOG_TARGET, DEFAULT_SOURCE_EXTENSION};
use crate::context::{Context, ContextBuilder, ContextValues, ProjectHandle};
use crate::error::{Error, Result};
use crate::include::{IncludePathMode, IncludePathResolver};
use crate::output::rebuild_output_tree;
use crate::renderer::{EngineConfig, TemplateEngine};
use crate::source::InputFile;
use log::{debug, error, info, warn};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// What happens when one input file fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorMode {
    /// Abort the run on the first failure.
    #[default]
    FailFast,
    /// Keep rendering the remaining files and report every failure.
    ContinueOnError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerOptions {
    pub source_extension: String,
    pub include_path_mode: IncludePathMode,
    pub cache_enabled: bool,
    pub strict_undefined: bool,
    pub error_mode: ErrorMode,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            source_extension: DEFAULT_SOURCE_EXTENSION.to_string(),
            include_path_mode: IncludePathMode::default(),
            cache_enabled: true,
            strict_undefined: false,
            error_mode: ErrorMode::default(),
        }
    }
}

/// Everything a run needs from its caller.
#[derive(Debug, Clone, Default)]
pub struct CompileRequest {
    /// Template sources, rendered in this order.
    pub input_files: Vec<InputFile>,
    pub include_dirs: Vec<PathBuf>,
    /// `None` is accepted and treated as empty, with a warning.
    pub base_values: Option<ContextValues>,
    pub output_root: PathBuf,
    pub project: ProjectHandle,
}

/// A file that could not be rendered, and why.
#[derive(Debug)]
pub struct ProcessingFailure {
    pub relative_path: String,
    pub error: Error,
}

impl ProcessingFailure {
    fn into_error(self) -> Error {
        Error::Processing { path: self.relative_path, source: Box::new(self.error) }
    }
}

/// Outcome of a run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Output files fully written, in render order.
    pub rendered: Vec<PathBuf>,
    /// Only populated in [`ErrorMode::ContinueOnError`].
    pub failures: Vec<ProcessingFailure>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// One input file paired with its destination and context.
struct RenderUnit<'a> {
    input: &'a InputFile,
    output_file: PathBuf,
    context: Context,
}

/// Rebuilds an output tree from a set of templates.
pub struct TreeCompiler {
    options: CompilerOptions,
    engine: Box<dyn TemplateEngine>,
    resolver: IncludePathResolver,
    context_builder: ContextBuilder,
}

impl TreeCompiler {
    pub fn new(options: CompilerOptions, engine: Box<dyn TemplateEngine>) -> Self {
        let resolver = IncludePathResolver::new(options.include_path_mode);
        let context_builder = ContextBuilder::new(options.source_extension.clone());
        Self { options, engine, resolver, context_builder }
    }

    /// Runs the whole compilation.
    ///
    /// The output root is emptied first, so files from an earlier run never
    /// survive. Files are then rendered one at a time in request order.
    ///
    /// # Errors
    /// Rebuild and engine configuration failures are returned as is. A file
    /// failure is returned as [`Error::Processing`] in fail-fast mode; files
    /// after it are never written. Files written before it are kept.
    pub fn run(&mut self, request: &CompileRequest) -> Result<RunReport> {
        let search_path = self.resolver.resolve(&request.input_files, &request.include_dirs);

        rebuild_output_tree(&request.output_root)?;

        self.engine.configure(EngineConfig {
            search_path,
            cache_enabled: self.options.cache_enabled,
            log_target: DEFAULT_ENGINE_LOG_TARGET.to_string(),
            strict_undefined: self.options.strict_undefined,
        })?;

        let mut report = RunReport::default();
        for input in &request.input_files {
            match self.process(input, request) {
                Ok(output_file) => report.rendered.push(output_file),
                Err(error) => {
                    let failure = ProcessingFailure {
                        relative_path: input.relative_path.to_string(),
                        error,
                    };
                    match self.options.error_mode {
                        ErrorMode::FailFast => return Err(failure.into_error()),
                        ErrorMode::ContinueOnError => {
                            error!(
                                "Failed to process '{}': {}",
                                failure.relative_path, failure.error
                            );
                            report.failures.push(failure);
                        }
                    }
                }
            }
        }

        info!(
            "Rendered {} of {} file(s) into {}",
            report.rendered.len(),
            request.input_files.len(),
            request.output_root.display()
        );
        Ok(report)
    }

    fn process(&mut self, input: &InputFile, request: &CompileRequest) -> Result<PathBuf> {
        input.relative_path.check()?;
        let unit = RenderUnit {
            input,
            output_file: input.relative_path.resolve(&request.output_root),
            context: self.context_builder.build(
                request.base_values.as_ref(),
                input,
                &request.project,
            )?,
        };
        debug!(
            "Preprocessing {} -> {}",
            input.absolute_path.display(),
            unit.output_file.display()
        );

        if let Some(parent) = unit.output_file.parent() {
            fs::create_dir_all(parent).map_err(Error::fs(parent))?;
        }
        self.render(&unit)?;
        Ok(unit.output_file)
    }

    /// Both handles are dropped when this returns. A partially written output
    /// file is removed on failure.
    fn render(&mut self, unit: &RenderUnit<'_>) -> Result<()> {
        let mut reader = open_input(&unit.input.absolute_path)?;
        let mut writer = create_output(&unit.output_file)?;
        let name = unit.input.relative_path.to_string();
        let result = self
            .engine
            .evaluate(&unit.context, &mut reader, &name, &mut writer)
            .and_then(|()| writer.flush().map_err(Error::fs(&unit.output_file)));
        drop(writer);

        if result.is_err() {
            discard_output(&unit.output_file);
        }
        result
    }
}

fn discard_output(path: &Path) {
    debug!("Removing incomplete output {}", path.display());
    if let Err(err) = fs::remove_file(path) {
        warn!("Failed to remove incomplete output {}: {err}", path.display());
    }
}

fn open_input(path: &Path) -> Result<BufReader<File>> {
    File::open(path).map(BufReader::new).map_err(Error::fs(path))
}

fn create_output(path: &Path) -> Result<BufWriter<File>> {
    File::create(path).map(BufWriter::new).map_err(Error::fs(path))
}
