//! Verified artifacts and the ordered list handed to packaging.

use crate::release::{
    error::{Error, ErrorExt, Result},
    settings::{Configuration, Settings, TARGET_SEPARATOR},
    utils::{EntryKind, FileSystem},
};
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

/// A configuration paired with the artifact it was verified to produce.
///
/// Only [`verify_artifact`] creates descriptors, so holding one means the
/// file was present when it was checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDescriptor {
    configuration: String,
    path: PathBuf,
}

impl ArtifactDescriptor {
    /// Configuration name.
    pub fn configuration(&self) -> &str {
        &self.configuration
    }

    /// Absolute artifact path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Packaging argument: `<configuration>|<path>`.
    pub fn package_arg(&self) -> OsString {
        let mut arg = OsString::from(format!("{}{TARGET_SEPARATOR}", self.configuration));
        arg.push(&self.path);
        arg
    }
}

/// Checks that `configuration`'s artifact exists as a regular file.
///
/// Called after the build tool exited zero; a missing file is
/// [`Error::MissingArtifact`] regardless of what the tool reported.
pub async fn verify_artifact<F: FileSystem>(
    fs: &F,
    settings: &Settings,
    configuration: &Configuration,
) -> Result<ArtifactDescriptor> {
    let path = settings.artifact_path(configuration);
    let kind = fs
        .entry_kind(&path)
        .await
        .fs_context("checking build artifact", &path)?;

    if kind != Some(EntryKind::File) {
        return Err(Error::MissingArtifact {
            configuration: configuration.name().to_string(),
            path,
        });
    }

    log::debug!("Verified {}", path.display());
    Ok(ArtifactDescriptor {
        configuration: configuration.name().to_string(),
        path,
    })
}

/// Verified artifacts in the order their configurations were processed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetList {
    targets: Vec<ArtifactDescriptor>,
}

impl TargetList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a verified artifact.
    pub fn push(&mut self, descriptor: ArtifactDescriptor) {
        self.targets.push(descriptor);
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArtifactDescriptor> {
        self.targets.iter()
    }

    /// One packaging argument per target, in order.
    pub fn package_args(&self) -> Vec<OsString> {
        self.targets.iter().map(ArtifactDescriptor::package_arg).collect()
    }
}
