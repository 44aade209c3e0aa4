use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    Io(#[from] std::io::Error),

    /// A filesystem operation failed on a specific path.
    #[error("IO error on '{}': {source}.", path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk directory tree. Original error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid glob pattern. Original error: {0}")]
    Glob(#[from] globset::Error),

    #[error("Failed to parse JSON. Original error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse YAML. Original error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The template engine rejected a template: syntax error, unresolved
    /// reference or missing include.
    #[error("Failed to render template '{name}'. Original error: {source:#}")]
    Template {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    /// Wraps any failure that happened while processing one input file.
    #[error("Failed to process '{path}': {source}")]
    Processing {
        path: String,
        #[source]
        source: Box<Error>,
    },

    #[error("No configuration file found in '{config_dir}'. Tried: {config_files}.")]
    ConfigNotFound { config_dir: String, config_files: String },

    #[error("Configuration error: {0}.")]
    ConfigValidation(String),

    #[error("Invalid context value: {0}.")]
    InvalidContextValue(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Attaches a path to an IO error.
    pub fn fs<P: Into<PathBuf>>(path: P) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Error::FileSystem { path, source }
    }
}

/// Convenience type alias for Results with treeplate's Error as the error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(crate::constants::exit_codes::FAILURE);
}
