use crate::constants::DEFAULT_ENGINE_LOG_TARGET;
use crate::context::Context;
use crate::error::Result;
use crate::include::SearchPath;
use std::io::{Read, Write};

/// Settings handed to one engine instance.
///
/// Each engine owns its configuration; nothing is shared between instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Locations searched, in order, for included templates.
    pub search_path: SearchPath,
    /// Keep templates loaded through the search path between evaluations.
    pub cache_enabled: bool,
    /// `log` target engine diagnostics are emitted under.
    pub log_target: String,
    /// Treat references to undefined values as errors.
    pub strict_undefined: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_path: SearchPath::default(),
            cache_enabled: true,
            log_target: DEFAULT_ENGINE_LOG_TARGET.to_string(),
            strict_undefined: false,
        }
    }
}

/// Adapter over an external template engine.
pub trait TemplateEngine {
    /// Applies `config`, replacing any earlier configuration.
    fn configure(&mut self, config: EngineConfig) -> Result<()>;

    /// Renders the template read from `source` against `context` into `out`.
    ///
    /// # Arguments
    /// * `context` - Values visible to the template
    /// * `source` - Template text, UTF-8
    /// * `name` - Logical template name used in diagnostics
    /// * `out` - Destination of the rendered text
    ///
    /// # Errors
    /// [`crate::error::Error::Template`] when the engine rejects the template,
    /// [`crate::error::Error::Io`] when `source` cannot be read.
    fn evaluate(
        &mut self,
        context: &Context,
        source: &mut dyn Read,
        name: &str,
        out: &mut dyn Write,
    ) -> Result<()>;
}
