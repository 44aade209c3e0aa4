use super::filters;
use super::interface::{EngineConfig, TemplateEngine};
use crate::context::Context;
use crate::error::{Error, Result};
use minijinja::{AutoEscape, Environment, ErrorKind, UndefinedBehavior};
use std::fs;
use std::io::{Read, Write};
use std::path::{Component, Path, PathBuf};

/// MiniJinja-backed template engine with a file-based loader.
pub struct MiniJinjaEngine {
    env: Environment<'static>,
    config: EngineConfig,
}

impl MiniJinjaEngine {
    /// Creates an engine with the default configuration (empty search path,
    /// caching on).
    pub fn new() -> Self {
        let config = EngineConfig::default();
        Self { env: build_environment(&config), config }
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn build_environment(config: &EngineConfig) -> Environment<'static> {
    let mut env = Environment::new();
    // Output is source code, never HTML.
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_keep_trailing_newline(true);
    if config.strict_undefined {
        env.set_undefined_behavior(UndefinedBehavior::Strict);
    }
    filters::register(&mut env);

    let search_path = config.search_path.entries().to_vec();
    let log_target = config.log_target.clone();
    env.set_loader(move |name| load_from_search_path(&search_path, name, &log_target));
    env
}

/// Looks `name` up in every search path entry, first match wins.
///
/// Entries that are missing or not directories never match. Names that could
/// escape an entry (absolute, or with `..`) resolve to nothing.
fn load_from_search_path(
    search_path: &[PathBuf],
    name: &str,
    log_target: &str,
) -> Result<Option<String>, minijinja::Error> {
    let relative = Path::new(name);
    if !relative.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir)) {
        log::debug!(target: log_target, "Refusing to resolve template '{name}'");
        return Ok(None);
    }

    for entry in search_path {
        let candidate = entry.join(relative);
        if !candidate.is_file() {
            continue;
        }
        log::debug!(
            target: log_target,
            "Loading template '{name}' from {}",
            candidate.display()
        );
        return fs::read_to_string(&candidate).map(Some).map_err(|err| {
            minijinja::Error::new(
                ErrorKind::InvalidOperation,
                format!("could not read template '{}'", candidate.display()),
            )
            .with_source(err)
        });
    }

    log::debug!(target: log_target, "Template '{name}' not found on the search path");
    Ok(None)
}

impl TemplateEngine for MiniJinjaEngine {
    fn configure(&mut self, config: EngineConfig) -> Result<()> {
        let target = config.log_target.as_str();
        log::info!(target: target, "Engine search path: {}", config.search_path);
        log::info!(target: target, "Engine cache enabled: {}", config.cache_enabled);
        log::info!(target: target, "Engine strict undefined: {}", config.strict_undefined);
        self.env = build_environment(&config);
        self.config = config;
        Ok(())
    }

    fn evaluate(
        &mut self,
        context: &Context,
        source: &mut dyn Read,
        name: &str,
        out: &mut dyn Write,
    ) -> Result<()> {
        if !self.config.cache_enabled {
            self.env.clear_templates();
        }

        let mut text = String::new();
        source.read_to_string(&mut text)?;

        let as_template_error =
            |source: minijinja::Error| Error::Template { name: name.to_string(), source };
        let rendered =
            self.env.render_named_str(name, &text, context).map_err(as_template_error)?;
        out.write_all(rendered.as_bytes())?;
        log::trace!(target: self.config.log_target.as_str(), "Evaluated template '{name}'");
        Ok(())
    }
}
