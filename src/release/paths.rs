//! Root path resolution.
//!
//! The two roots a release needs (the build tool and the project root) come
//! from the environment. They are read once, validated, and never touched
//! again for the rest of the run.

use crate::release::{
    error::{Error, Result},
    utils::{EntryKind, FileSystem},
};
use path_absolutize::Absolutize;
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

/// Environment variable holding the build tool location.
pub const BUILD_TOOL_VAR: &str = "MSBUILD_PATH";

/// Environment variable holding the project root.
pub const PROJECT_ROOT_VAR: &str = "CBP_SLN_ROOT";

/// Build tool executable joined onto [`BUILD_TOOL_VAR`] when it names a
/// directory.
#[cfg(windows)]
pub const BUILD_TOOL_EXE: &str = "msbuild.exe";
#[cfg(not(windows))]
pub const BUILD_TOOL_EXE: &str = "msbuild";

/// Raw, unvalidated root paths as supplied by the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootPaths {
    /// Build tool executable, or the directory containing it
    pub build_tool: PathBuf,
    /// Project root directory
    pub project_root: PathBuf,
}

impl RootPaths {
    /// Reads both roots from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Reads both roots through `lookup`, failing on missing or empty values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let read = |key: &str| match lookup(key) {
            Some(value) if !value.is_empty() => Ok(PathBuf::from(value)),
            _ => Err(Error::Configuration(format!(
                "environment variable {key} is not set"
            ))),
        };

        Ok(Self {
            build_tool: read(BUILD_TOOL_VAR)?,
            project_root: read(PROJECT_ROOT_VAR)?,
        })
    }
}

/// Validated root paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// Build tool executable; known to be a file
    pub build_tool: PathBuf,
    /// Absolute project root; known to be a directory
    pub project_root: PathBuf,
}

/// Validates `roots` against `fs`.
///
/// A directory build-tool path has [`BUILD_TOOL_EXE`] joined onto it. The
/// resulting tool must be a file and the project root a directory; the root
/// is made absolute so every derived artifact path is absolute too.
pub async fn resolve_paths<F: FileSystem>(fs: &F, roots: &RootPaths) -> Result<ResolvedPaths> {
    let mut build_tool = roots.build_tool.clone();
    if kind_of(fs, &build_tool).await? == Some(EntryKind::Directory) {
        build_tool = build_tool.join(BUILD_TOOL_EXE);
    }
    match kind_of(fs, &build_tool).await? {
        Some(EntryKind::File) => {}
        Some(_) => {
            return Err(Error::Configuration(format!(
                "build tool {} is not a file",
                build_tool.display()
            )));
        }
        None => {
            return Err(Error::Configuration(format!(
                "build tool {} does not exist",
                build_tool.display()
            )));
        }
    }

    let project_root = roots
        .project_root
        .absolutize()
        .map_err(|e| {
            Error::Configuration(format!(
                "cannot resolve project root {}: {e}",
                roots.project_root.display()
            ))
        })?
        .into_owned();
    match kind_of(fs, &project_root).await? {
        Some(EntryKind::Directory) => {}
        Some(_) => {
            return Err(Error::Configuration(format!(
                "project root {} is not a directory",
                project_root.display()
            )));
        }
        None => {
            return Err(Error::Configuration(format!(
                "project root {} does not exist",
                project_root.display()
            )));
        }
    }

    log::debug!(
        "Resolved build tool {} and project root {}",
        build_tool.display(),
        project_root.display()
    );

    Ok(ResolvedPaths {
        build_tool,
        project_root,
    })
}

/// Locates `program` on `PATH` unless it already contains a path separator.
pub fn locate_program(program: &Path) -> Result<PathBuf> {
    if program.components().count() > 1 || program.is_absolute() {
        return Ok(program.to_path_buf());
    }
    which::which(program).map_err(|e| {
        Error::Configuration(format!(
            "packaging interpreter '{}' not found: {e}",
            program.display()
        ))
    })
}

async fn kind_of<F: FileSystem>(fs: &F, path: &Path) -> Result<Option<EntryKind>> {
    fs.entry_kind(path).await.map_err(|e| {
        Error::Configuration(format!("cannot inspect {}: {e}", path.display()))
    })
}
