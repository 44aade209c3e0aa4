//! Input files handed to the compiler.
//!
//! The compiler never discovers files itself. Callers build the ordered list
//! of [`InputFile`]s, either by hand or with [`SourceTree`].

pub mod tree;

pub use tree::SourceTree;

use crate::error::{Error, Result};
use crate::ext::PathExt;
use std::fmt::{self, Display};
use std::path::{Path, PathBuf};

/// A path relative to the root of the source tree, kept as its segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RelativePath {
    segments: Vec<String>,
}

impl RelativePath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { segments: segments.into_iter().map(Into::into).collect() }
    }

    /// Parses a relative filesystem path such as `com/acme/Widget.java`.
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self { segments: path.as_ref().to_segments()? })
    }

    /// Checks that every segment is a single plain name, so the path stays
    /// below whatever base it is resolved against.
    pub fn check(&self) -> Result<()> {
        for segment in &self.segments {
            let parsed = Path::new(segment).to_segments().ok();
            if parsed.as_deref() != Some(std::slice::from_ref(segment)) {
                return Err(Error::Other(anyhow::anyhow!(
                    "'{self}' has segment '{segment}' which is not a plain file name"
                )));
            }
        }
        Ok(())
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Every segment but the last. Empty for a file at the root.
    pub fn parent_segments(&self) -> &[String] {
        match self.segments.split_last() {
            Some((_, parents)) => parents,
            None => &[],
        }
    }

    /// The final segment, or `""` for an empty path.
    pub fn last_name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Joins the segments with the platform separator.
    pub fn to_path(&self) -> PathBuf {
        self.segments.iter().collect()
    }

    /// Resolves this path against `base`.
    pub fn resolve<P: AsRef<Path>>(&self, base: P) -> PathBuf {
        base.as_ref().join(self.to_path())
    }
}

/// Displays with `/` separators on every platform; used as the template name.
impl Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

/// A template source: where it lives and where it sits in the source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub relative_path: RelativePath,
    pub absolute_path: PathBuf,
}

impl InputFile {
    pub fn new<P: Into<PathBuf>>(relative_path: RelativePath, absolute_path: P) -> Self {
        Self { relative_path, absolute_path: absolute_path.into() }
    }

    /// Builds an input file from a base directory and a path below it.
    pub fn from_base<B: AsRef<Path>, P: AsRef<Path>>(base: B, relative: P) -> Result<Self> {
        let relative_path = RelativePath::parse(relative)?;
        let absolute_path = relative_path.resolve(base);
        Ok(Self { relative_path, absolute_path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_segments_and_last_name() {
        let path = RelativePath::new(["com", "acme", "Widget.java"]);
        assert_eq!(path.parent_segments(), ["com", "acme"]);
        assert_eq!(path.last_name(), "Widget.java");
    }

    #[test]
    fn root_level_file_has_no_parents() {
        let path = RelativePath::new(["Main.java"]);
        assert!(path.parent_segments().is_empty());
        assert_eq!(path.last_name(), "Main.java");
    }

    #[test]
    fn empty_path_degrades_to_empty_values() {
        let path = RelativePath::default();
        assert!(path.is_empty());
        assert!(path.parent_segments().is_empty());
        assert_eq!(path.last_name(), "");
        assert_eq!(path.to_string(), "");
    }

    #[test]
    fn display_uses_forward_slashes() {
        let path = RelativePath::parse(Path::new("a").join("b").join("c.vm")).unwrap();
        assert_eq!(path.to_string(), "a/b/c.vm");
    }

    #[test]
    fn check_accepts_plain_segments() {
        assert!(RelativePath::new(["com", "acme", "Widget.java"]).check().is_ok());
        assert!(RelativePath::default().check().is_ok());
    }

    #[test]
    fn check_rejects_segments_leaving_the_base() {
        for segments in [
            vec!["..", "x.vm"],
            vec!["a", "."],
            vec!["/abs", "escape.txt"],
            vec!["a/b"],
            vec![""],
        ] {
            let path = RelativePath::new(segments.clone());
            assert!(path.check().is_err(), "{segments:?} should be rejected");
        }
    }

    #[test]
    fn from_base_resolves_absolute_path() {
        let file = InputFile::from_base("/src", "a/x.vm").unwrap();
        assert_eq!(file.absolute_path, Path::new("/src").join("a").join("x.vm"));
        assert_eq!(file.relative_path.segments(), ["a", "x.vm"]);
    }
}
