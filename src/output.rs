//! Output directory rebuild.

use crate::error::{Error, Result};
use log::{debug, info};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Empties `output_root` and recreates it.
///
/// Any previous content is removed depth-first: every file or link is deleted,
/// then each directory once its children are gone, the root included. Links
/// are removed, never followed. The root and its missing parents are then
/// created again.
///
/// # Errors
/// The first failed delete or create aborts the rebuild with
/// [`Error::FileSystem`] naming the offending path.
pub fn rebuild_output_tree<P: AsRef<Path>>(output_root: P) -> Result<()> {
    let output_root = output_root.as_ref();

    if fs::symlink_metadata(output_root).is_ok() {
        info!("Clearing output directory {}", output_root.display());
        let walker =
            WalkDir::new(output_root).contents_first(true).follow_root_links(false);
        for entry in walker {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type().is_dir() {
                debug!("Removing directory {}", path.display());
                fs::remove_dir(path).map_err(Error::fs(path))?;
            } else {
                debug!("Removing file {}", path.display());
                fs::remove_file(path).map_err(Error::fs(path))?;
            }
        }
    }

    fs::create_dir_all(output_root).map_err(Error::fs(output_root))
}
