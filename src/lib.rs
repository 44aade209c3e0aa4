/// Command-line argument parsing and the CLI runner.
pub mod cli;

/// Run orchestration.
pub mod compiler;

/// Configuration file handling.
pub mod config;

/// Constants shared across modules.
pub mod constants;

/// Per-file rendering context.
pub mod context;

/// Defines custom error types.
pub mod error;

/// Extension traits for standard library types.
pub mod ext;

/// Search path for included templates.
pub mod include;

/// Small IO helpers.
pub mod ioutils;

/// Output directory rebuild.
pub mod output;

/// Template engine adapter.
pub mod renderer;

/// Input files and their discovery.
pub mod source;

pub use compiler::{CompileRequest, CompilerOptions, ErrorMode, RunReport, TreeCompiler};
pub use context::{Context, ContextBuilder, ContextValues, ProjectHandle};
pub use error::{Error, Result};
pub use include::{IncludePathMode, IncludePathResolver, SearchPath};
pub use source::{InputFile, RelativePath, SourceTree};
