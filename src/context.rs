//! Per-file rendering context.
//!
//! A [`Context`] is the caller's [`ContextValues`] overlaid by three values
//! derived from the input file: `project`, `package` and `class`.

use crate::constants::{context_keys, DEFAULT_SOURCE_EXTENSION, PACKAGE_DELIMITER};
use crate::error::{Error, Result};
use crate::source::InputFile;
use indexmap::IndexMap;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// Any value a template can interpolate: string, number, boolean, null,
/// sequence or mapping.
pub type ContextValue = Value;

/// User-supplied context values, the base layer of every [`Context`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextValues(IndexMap<String, ContextValue>);

impl ContextValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, or removes `key` when `value` is `None`.
    pub fn set<K: Into<String>>(&mut self, key: K, value: Option<ContextValue>) {
        let key = key.into();
        match value {
            Some(value) => {
                self.0.insert(key, value);
            }
            None => {
                self.0.shift_remove(&key);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.0.get(key)
    }

    pub fn extend(&mut self, other: ContextValues) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ContextValue)> {
        self.0.iter()
    }

    /// Parses a JSON object. Anything else is rejected.
    pub fn from_json_str(json: &str) -> Result<Self> {
        match serde_json::from_str(json)? {
            Value::Object(map) => Ok(Self(map.into_iter().collect())),
            other => Err(Error::InvalidContextValue(format!(
                "expected a JSON object, got '{other}'"
            ))),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, ContextValue)> for ContextValues {
    fn from_iter<T: IntoIterator<Item = (K, ContextValue)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Parses a `KEY=VALUE` assignment. The value is read as JSON when it parses,
/// and as a plain string otherwise.
pub fn parse_assignment(assignment: &str) -> Result<(String, ContextValue)> {
    let (key, raw) = assignment.split_once('=').ok_or_else(|| {
        Error::InvalidContextValue(format!("'{assignment}' is not of the form KEY=VALUE"))
    })?;
    let key = key.trim();
    if key.is_empty() {
        return Err(Error::InvalidContextValue(format!("'{assignment}' has an empty key")));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

/// The project a run belongs to, exposed to templates as `project`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectHandle {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, ContextValue>,
}

impl ProjectHandle {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    /// Fails when `root_dir` is not valid UTF-8.
    fn to_value(&self) -> Result<ContextValue> {
        Ok(serde_json::to_value(self)?)
    }
}

/// The merged key-value environment for a single render.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Context(IndexMap<String, ContextValue>);

impl Context {
    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.0.get(key)
    }

    pub fn insert<K: Into<String>>(&mut self, key: K, value: ContextValue) {
        self.0.insert(key.into(), value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Builds the context of each input file.
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    source_extension: String,
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_EXTENSION)
    }
}

impl ContextBuilder {
    /// `source_extension` is stripped once from the end of the file name to
    /// form `class`. An empty extension keeps the file name as is.
    pub fn new<S: Into<String>>(source_extension: S) -> Self {
        Self { source_extension: source_extension.into() }
    }

    pub fn build(
        &self,
        base: Option<&ContextValues>,
        input: &InputFile,
        project: &ProjectHandle,
    ) -> Result<Context> {
        let mut context = Context::default();
        match base {
            Some(values) => {
                info!("Applying context values for evaluation: {values:?}");
                for (key, value) in values.iter() {
                    context.insert(key.clone(), value.clone());
                }
            }
            None => warn!("No context values supplied; templates only see derived values"),
        }

        context.insert(context_keys::PROJECT, project.to_value()?);
        context.insert(context_keys::PACKAGE, Value::String(self.package(input)));
        context.insert(context_keys::CLASS, Value::String(self.class(input)));
        Ok(context)
    }

    /// Parent segments joined with `.`; empty at the root.
    pub fn package(&self, input: &InputFile) -> String {
        input.relative_path.parent_segments().join(PACKAGE_DELIMITER)
    }

    /// Last segment without the configured extension.
    pub fn class(&self, input: &InputFile) -> String {
        let name = input.relative_path.last_name();
        if self.source_extension.is_empty() {
            return name.to_string();
        }
        name.strip_suffix(self.source_extension.as_str()).unwrap_or(name).to_string()
    }
}
