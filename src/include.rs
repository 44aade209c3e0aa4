//! Search path construction for the template engine's resource loader.

use crate::constants::SEARCH_PATH_DELIMITER;
use crate::source::InputFile;
use log::{debug, info};
use serde::Deserialize;
use std::fmt::{self, Display};
use std::path::{Path, PathBuf};

/// How input files contribute to the search path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum IncludePathMode {
    /// One entry per input file, its own absolute path. Compatible with the
    /// historical search path string.
    #[default]
    InputFiles,
    /// One entry per distinct parent directory of the input files.
    ParentDirectories,
}

/// Ordered locations consulted when a template includes another one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    entries: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new(entries: Vec<PathBuf>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, entry: PathBuf) {
        debug!("Collecting search path entry {}", entry.display());
        self.entries.push(entry);
    }
}

/// Renders the comma-and-space joined form accepted by file resource loaders.
impl Display for SearchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, entry) in self.entries.iter().enumerate() {
            if index > 0 {
                f.write_str(SEARCH_PATH_DELIMITER)?;
            }
            write!(f, "{}", entry.display())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IncludePathResolver {
    mode: IncludePathMode,
}

impl IncludePathResolver {
    pub fn new(mode: IncludePathMode) -> Self {
        Self { mode }
    }

    /// Input file locations first, then every include directory, in order.
    ///
    /// Nothing is checked for existence; a missing location just never
    /// matches at render time.
    pub fn resolve<P: AsRef<Path>>(
        &self,
        input_files: &[InputFile],
        include_dirs: &[P],
    ) -> SearchPath {
        let mut search_path = SearchPath::default();

        match self.mode {
            IncludePathMode::InputFiles => {
                for file in input_files {
                    search_path.push(absolute(&file.absolute_path));
                }
            }
            IncludePathMode::ParentDirectories => {
                info!("Search path uses parent directories of the input files");
                for file in input_files {
                    let absolute_path = absolute(&file.absolute_path);
                    let Some(parent) = absolute_path.parent() else {
                        continue;
                    };
                    if !search_path.entries.iter().any(|entry| entry == parent) {
                        search_path.push(parent.to_path_buf());
                    }
                }
            }
        }

        for dir in include_dirs {
            search_path.push(absolute(dir.as_ref()));
        }

        info!("Template search path: {search_path}");
        search_path
    }
}

/// Makes a path absolute against the current directory without touching the
/// filesystem.
fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::RelativePath;

    fn input(root: &Path, relative: &[&str]) -> InputFile {
        let relative_path = RelativePath::new(relative.iter().copied());
        let absolute_path = relative_path.resolve(root);
        InputFile::new(relative_path, absolute_path)
    }

    #[test]
    fn input_files_then_include_dirs_comma_joined() {
        let root = std::env::temp_dir().join("src");
        let inputs = vec![input(&root, &["a", "x.vm"]), input(&root, &["b", "y.vm"])];
        let inc1 = std::env::temp_dir().join("inc1");
        let inc2 = std::env::temp_dir().join("inc2");

        let search_path =
            IncludePathResolver::default().resolve(&inputs, &[inc1.clone(), inc2.clone()]);

        let expected = [
            root.join("a").join("x.vm"),
            root.join("b").join("y.vm"),
            inc1,
            inc2,
        ];
        assert_eq!(search_path.entries(), expected);
        let joined = expected
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        assert_eq!(search_path.to_string(), joined);
    }

    #[test]
    fn keeps_duplicates_and_missing_dirs() {
        let inc = std::env::temp_dir().join("does-not-exist");
        let search_path =
            IncludePathResolver::default().resolve(&[], &[inc.clone(), inc.clone()]);
        assert_eq!(search_path.entries(), [inc.clone(), inc]);
    }

    #[test]
    fn empty_inputs_give_empty_path() {
        let search_path = IncludePathResolver::default().resolve::<PathBuf>(&[], &[]);
        assert!(search_path.is_empty());
        assert_eq!(search_path.to_string(), "");
    }

    #[test]
    fn relative_include_dirs_become_absolute() {
        let search_path = IncludePathResolver::default().resolve(&[], &["templates/common"]);
        assert!(search_path.entries()[0].is_absolute());
        assert!(search_path.entries()[0].ends_with("templates/common"));
    }

    #[test]
    fn parent_directory_mode_deduplicates() {
        let root = std::env::temp_dir().join("src");
        let inputs = vec![
            input(&root, &["a", "x.vm"]),
            input(&root, &["a", "z.vm"]),
            input(&root, &["b", "y.vm"]),
        ];
        let inc = std::env::temp_dir().join("inc");

        let search_path = IncludePathResolver::new(IncludePathMode::ParentDirectories)
            .resolve(&inputs, &[inc.clone()]);

        assert_eq!(search_path.entries(), [root.join("a"), root.join("b"), inc]);
    }
}
