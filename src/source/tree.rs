use super::{InputFile, RelativePath};
use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Collects the template sources below a directory.
///
/// Files are yielded sorted by name at each level, so the same tree always
/// produces the same order. Include patterns default to every file; exclude
/// patterns win over includes. Patterns are matched against the relative path
/// with `/` separators.
#[derive(Debug, Clone)]
pub struct SourceTree {
    root: PathBuf,
    includes: Vec<String>,
    excludes: Vec<String>,
}

impl SourceTree {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into(), includes: Vec::new(), excludes: Vec::new() }
    }

    pub fn includes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.includes.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Walks the tree and returns the matching files in walk order, with
    /// absolute paths.
    pub fn collect(&self) -> Result<Vec<InputFile>> {
        if !self.root.is_dir() {
            return Err(Error::ConfigValidation(format!(
                "source directory '{}' does not exist",
                self.root.display()
            )));
        }

        let root = std::path::absolute(&self.root).map_err(Error::fs(&self.root))?;
        let includes = build_globset(&self.includes)?;
        let excludes = build_globset(&self.excludes)?;

        let mut files = Vec::new();
        for entry in WalkDir::new(&root).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(&root).map_err(|e| {
                Error::Other(anyhow::anyhow!(
                    "'{}' is outside '{}': {e}",
                    entry.path().display(),
                    root.display()
                ))
            })?;
            let relative_path = RelativePath::parse(relative)?;
            let name = relative_path.to_string();

            if includes.as_ref().is_some_and(|set| !set.is_match(&name)) {
                debug!("Skipping {name}: not matched by includes");
                continue;
            }
            if excludes.as_ref().is_some_and(|set| set.is_match(&name)) {
                debug!("Skipping {name}: matched by excludes");
                continue;
            }

            debug!("Collecting source {name}");
            files.push(InputFile::new(relative_path, entry.path()));
        }
        Ok(files)
    }
}

/// Builds a `GlobSet` from the patterns, or `None` when there are none.
fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(Some(builder.build()?))
}
