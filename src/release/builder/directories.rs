//! Output directory preparation.
//!
//! Each configuration builds into its own directory under the output root.
//! Before a build starts that directory must exist and hold nothing from a
//! previous run. Cleanup is a single level: direct children are deleted,
//! subdirectories are never descended into.

use crate::release::{
    error::{Error, ErrorExt, Result},
    utils::{EntryKind, FileSystem},
};
use std::path::Path;

/// Ensures `path` exists as a directory, creating it if absent.
///
/// Fails with [`Error::Directory`] if something other than a directory is
/// already there.
pub async fn ensure_dir<F: FileSystem>(fs: &F, path: &Path) -> Result<()> {
    match fs
        .entry_kind(path)
        .await
        .fs_context("inspecting output path", path)?
    {
        Some(EntryKind::Directory) => Ok(()),
        Some(_) => Err(Error::Directory {
            path: path.to_path_buf(),
            reason: "invalid output path: exists but is not a directory".into(),
        }),
        None => {
            log::debug!("Creating {}", path.display());
            fs.create_dir(path)
                .await
                .fs_context("creating output directory", path)
        }
    }
}

/// Creates `path` if needed and removes every entry directly inside it.
///
/// Returns the number of entries removed.
pub async fn prepare_output_dir<F: FileSystem>(fs: &F, path: &Path) -> Result<usize> {
    ensure_dir(fs, path).await?;

    let entries = fs
        .list_entries(path)
        .await
        .fs_context("listing output directory", path)?;
    for entry in &entries {
        log::debug!("Removing stale {}", entry.display());
        fs.remove_entry(entry)
            .await
            .fs_context("removing stale entry", entry)?;
    }

    Ok(entries.len())
}
