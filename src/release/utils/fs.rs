//! Filesystem capability used by the release driver.
//!
//! The driver only ever needs four operations: ask what is at a path,
//! create a directory if it is absent, list a directory's direct children
//! and delete a single entry. [`FileSystem`] exposes exactly those so the
//! orchestration can run against [`LocalFs`] in production and an
//! in-memory tree in tests.

use std::{
    io,
    path::{Path, PathBuf},
};
use tokio::fs;

/// What kind of entry lives at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory
    Directory,
    /// Anything else (sockets, devices, dangling links)
    Other,
}

/// Narrow filesystem interface for directory preparation and verification.
#[allow(async_fn_in_trait)]
pub trait FileSystem {
    /// Returns the kind of entry at `path`, or `None` if nothing is there.
    ///
    /// Symlinks are followed.
    async fn entry_kind(&self, path: &Path) -> io::Result<Option<EntryKind>>;

    /// Creates `path` as a directory. Succeeds if it already exists as one.
    async fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Lists the direct children of the directory at `path`, sorted.
    async fn list_entries(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Removes a single entry. Directories are only removed when empty.
    async fn remove_entry(&self, path: &Path) -> io::Result<()>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    async fn entry_kind(&self, path: &Path) -> io::Result<Option<EntryKind>> {
        (**self).entry_kind(path).await
    }

    async fn create_dir(&self, path: &Path) -> io::Result<()> {
        (**self).create_dir(path).await
    }

    async fn list_entries(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        (**self).list_entries(path).await
    }

    async fn remove_entry(&self, path: &Path) -> io::Result<()> {
        (**self).remove_entry(path).await
    }
}

/// [`FileSystem`] backed by the host filesystem through `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    async fn entry_kind(&self, path: &Path) -> io::Result<Option<EntryKind>> {
        match fs::metadata(path).await {
            Ok(meta) if meta.is_file() => Ok(Some(EntryKind::File)),
            Ok(meta) if meta.is_dir() => Ok(Some(EntryKind::Directory)),
            Ok(_) => Ok(Some(EntryKind::Other)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn create_dir(&self, path: &Path) -> io::Result<()> {
        // Try creation, ignore AlreadyExists when a directory is already there
        match fs::create_dir(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                if fs::metadata(path).await?.is_dir() {
                    Ok(())
                } else {
                    Err(e)
                }
            }
            Err(e) => Err(e),
        }
    }

    async fn list_entries(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut reader = fs::read_dir(path).await?;
        let mut entries = Vec::new();
        while let Some(entry) = reader.next_entry().await? {
            entries.push(entry.path());
        }
        entries.sort();
        Ok(entries)
    }

    async fn remove_entry(&self, path: &Path) -> io::Result<()> {
        // Do not follow symlinks: a link to a directory is removed as a file
        let meta = fs::symlink_metadata(path).await?;
        if meta.is_dir() {
            fs::remove_dir(path).await
        } else {
            fs::remove_file(path).await
        }
    }
}
