//! Core settings types: build configurations and the resolved run settings.

use crate::release::error::{Error, Result};
use std::{
    fmt,
    path::{Path, PathBuf},
};

/// Separator between configuration name and artifact path in packaging
/// arguments.
pub const TARGET_SEPARATOR: char = '|';

/// Separator between build tool properties on the command line.
const PROPERTY_SEPARATOR: char = ';';

/// A named build variant, e.g. `"ReleaseAVX2 MT"`.
///
/// The name doubles as the output directory name, so it must be usable as a
/// single path component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Configuration {
    name: String,
}

impl Configuration {
    /// Validates and wraps a configuration name.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::Configuration(
                "configuration names cannot be empty".into(),
            ));
        }
        if name.contains(TARGET_SEPARATOR) {
            return Err(Error::Configuration(format!(
                "configuration name '{name}' cannot contain '{TARGET_SEPARATOR}'"
            )));
        }
        if name.contains(PROPERTY_SEPARATOR) {
            return Err(Error::Configuration(format!(
                "configuration name '{name}' cannot contain '{PROPERTY_SEPARATOR}'"
            )));
        }
        if name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(Error::Configuration(format!(
                "configuration name '{name}' must be a single path component"
            )));
        }
        Ok(Self { name })
    }

    /// The configuration name as declared.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Immutable settings for one release run.
///
/// Built once at startup by [`SettingsBuilder`](super::SettingsBuilder) and
/// passed by reference to every step.
#[derive(Debug, Clone)]
pub struct Settings {
    project_root: PathBuf,
    build_tool: PathBuf,
    configurations: Vec<Configuration>,
    solution: PathBuf,
    artifact: String,
    output_dir: PathBuf,
    rebuild: bool,
    packaging_script: PathBuf,
    packaging_interpreter: PathBuf,
}

impl Settings {
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        project_root: PathBuf,
        build_tool: PathBuf,
        configurations: Vec<Configuration>,
        solution: PathBuf,
        artifact: String,
        output_dir: PathBuf,
        rebuild: bool,
        packaging_script: PathBuf,
        packaging_interpreter: PathBuf,
    ) -> Self {
        Self {
            project_root,
            build_tool,
            configurations,
            solution,
            artifact,
            output_dir,
            rebuild,
            packaging_script,
            packaging_interpreter,
        }
    }

    /// Absolute project root.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Build tool executable.
    pub fn build_tool(&self) -> &Path {
        &self.build_tool
    }

    /// Configurations in declaration order.
    pub fn configurations(&self) -> &[Configuration] {
        &self.configurations
    }

    /// Whether every build is forced to rebuild from scratch.
    pub fn rebuild(&self) -> bool {
        self.rebuild
    }

    /// Artifact filename expected in every output directory.
    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    /// `<root>/<solution>`
    pub fn solution_path(&self) -> PathBuf {
        self.project_root.join(&self.solution)
    }

    /// `<root>/<output_dir>`, parent of every configuration's output path.
    pub fn output_root(&self) -> PathBuf {
        self.project_root.join(&self.output_dir)
    }

    /// `<root>/<output_dir>/<configuration>`
    pub fn output_path(&self, configuration: &Configuration) -> PathBuf {
        self.output_root().join(configuration.name())
    }

    /// `<root>/<output_dir>/<configuration>/<artifact>`
    pub fn artifact_path(&self, configuration: &Configuration) -> PathBuf {
        self.output_path(configuration).join(&self.artifact)
    }

    /// `<root>/<packaging script>`
    pub fn packaging_script_path(&self) -> PathBuf {
        self.project_root.join(&self.packaging_script)
    }

    /// Interpreter used to run the packaging script.
    pub fn packaging_interpreter(&self) -> &Path {
        &self.packaging_interpreter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_names_with_spaces() {
        let cfg = Configuration::new("ReleaseAVX2 MT").unwrap();
        assert_eq!(cfg.name(), "ReleaseAVX2 MT");
        assert_eq!(cfg.to_string(), "ReleaseAVX2 MT");
    }

    #[test]
    fn rejects_names_that_break_paths_or_targets() {
        for bad in ["", "   ", "A|B", "A;Platform=x86", "../escape", "a/b", "a\\b", ".", ".."] {
            assert!(
                matches!(Configuration::new(bad), Err(Error::Configuration(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
