use std::path::{Component, Path};

use crate::error::{Error, Result};

/// Extension trait for Path to provide checked string conversion and segment access
pub trait PathExt {
    /// Converts a path to a string slice, returning an error if the path contains invalid Unicode characters.
    ///
    /// # Examples
    /// ```
    /// use treeplate::ext::PathExt;
    /// use std::path::Path;
    ///
    /// let path = Path::new("test");
    /// assert_eq!(path.to_str_checked().unwrap(), "test");
    /// ```
    fn to_str_checked(&self) -> Result<&str>;

    /// Splits a relative path into its normal segments.
    ///
    /// `.` components are skipped. Root, prefix and `..` components are
    /// rejected because a relative path must stay below its base directory.
    ///
    /// # Examples
    /// ```
    /// use treeplate::ext::PathExt;
    /// use std::path::Path;
    ///
    /// let segments = Path::new("com/acme/Widget.java").to_segments().unwrap();
    /// assert_eq!(segments, vec!["com", "acme", "Widget.java"]);
    /// ```
    fn to_segments(&self) -> Result<Vec<String>>;
}

impl PathExt for Path {
    fn to_str_checked(&self) -> Result<&str> {
        self.to_str().ok_or_else(|| {
            Error::Other(anyhow::anyhow!(
                "Path '{}' contains invalid Unicode characters",
                self.display()
            ))
        })
    }

    fn to_segments(&self) -> Result<Vec<String>> {
        self.components()
            .filter(|component| !matches!(component, Component::CurDir))
            .map(|component| match component {
                Component::Normal(segment) => segment
                    .to_str()
                    .map(str::to_owned)
                    .ok_or_else(|| {
                        Error::Other(anyhow::anyhow!(
                            "Path '{}' contains invalid Unicode characters",
                            self.display()
                        ))
                    }),
                _ => Err(Error::Other(anyhow::anyhow!(
                    "Path '{}' is not a plain relative path",
                    self.display()
                ))),
            })
            .collect()
    }
}
