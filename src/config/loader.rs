//! Configuration loading and management

use crate::compiler::{CompilerOptions, ErrorMode};
use crate::constants::{CONFIG_FILENAMES, DEFAULT_SOURCE_EXTENSION};
use crate::context::{ContextValues, ProjectHandle};
use crate::error::{Error, Result};
use crate::ext::PathExt;
use crate::include::IncludePathMode;
use globset::Glob;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Task properties of one compilation.
///
/// Relative directories are resolved against the directory the configuration
/// file was found in.
#[derive(Debug, Deserialize)]
pub struct ConfigV1 {
    #[serde(default)]
    pub source_dir: Option<PathBuf>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub include_dirs: Vec<PathBuf>,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub excludes: Vec<String>,
    #[serde(default = "get_default_source_extension")]
    pub source_extension: String,
    #[serde(default)]
    pub include_path_mode: IncludePathMode,
    #[serde(default)]
    pub continue_on_error: bool,
    #[serde(default)]
    pub strict_undefined: bool,
    #[serde(default)]
    pub project: ProjectHandle,
    #[serde(default)]
    pub context: ContextValues,
}

impl Default for ConfigV1 {
    fn default() -> Self {
        Self {
            source_dir: None,
            output_dir: None,
            include_dirs: Vec::new(),
            includes: Vec::new(),
            excludes: Vec::new(),
            source_extension: get_default_source_extension(),
            include_path_mode: IncludePathMode::default(),
            continue_on_error: false,
            strict_undefined: false,
            project: ProjectHandle::default(),
            context: ContextValues::default(),
        }
    }
}

impl ConfigV1 {
    pub fn validate(&self) -> Result<(), Error> {
        if !self.source_extension.is_empty()
            && (!self.source_extension.starts_with('.') || self.source_extension.len() < 2)
        {
            return Err(Error::ConfigValidation(format!(
                "source_extension '{}' must start with '.' and have at least 1 character after it",
                self.source_extension
            )));
        }
        for pattern in self.includes.iter().chain(&self.excludes) {
            Glob::new(pattern)?;
        }
        Ok(())
    }

    /// Resolves every relative directory against `base`.
    pub fn resolve_paths<P: AsRef<Path>>(&mut self, base: P) {
        let base = base.as_ref();
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        if let Some(dir) = self.source_dir.as_mut() {
            resolve(dir);
        }
        if let Some(dir) = self.output_dir.as_mut() {
            resolve(dir);
        }
        self.include_dirs.iter_mut().for_each(resolve);
        if let Some(dir) = self.project.root_dir.as_mut() {
            resolve(dir);
        }
    }

    pub fn compiler_options(&self) -> CompilerOptions {
        CompilerOptions {
            source_extension: self.source_extension.clone(),
            include_path_mode: self.include_path_mode,
            strict_undefined: self.strict_undefined,
            error_mode: if self.continue_on_error {
                ErrorMode::ContinueOnError
            } else {
                ErrorMode::FailFast
            },
            ..Default::default()
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "schemaVersion")]
pub enum Config {
    #[serde(rename = "v1")]
    V1(ConfigV1),
}

impl Config {
    /// Loads the first configuration file found in `config_dir`, with its
    /// relative paths resolved against that directory.
    pub fn load_config<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        match Self::find_config(&config_dir)? {
            Some(config) => Ok(config),
            None => Err(Error::ConfigNotFound {
                config_dir: config_dir.to_str_checked()?.to_string(),
                config_files: CONFIG_FILENAMES.join(", "),
            }),
        }
    }

    /// Like [`Config::load_config`], but a missing file is not an error.
    pub fn find_config<P: AsRef<Path>>(config_dir: P) -> Result<Option<Self>> {
        let config_dir = config_dir.as_ref();

        for config_file_name in CONFIG_FILENAMES.iter() {
            let config_file_path = config_dir.join(config_file_name);

            if config_file_path.exists() {
                log::debug!("Loading configuration from {}", config_file_path.display());
                let content = std::fs::read_to_string(&config_file_path)
                    .map_err(Error::fs(&config_file_path))?;
                let mut config: Config = if config_file_name.ends_with(".json") {
                    serde_json::from_str(&content)?
                } else {
                    serde_yaml::from_str(&content)?
                };
                let Config::V1(inner) = &mut config;
                inner.resolve_paths(config_dir);
                return Ok(Some(config));
            }
        }

        Ok(None)
    }
}

fn get_default_source_extension() -> String {
    DEFAULT_SOURCE_EXTENSION.to_string()
}
