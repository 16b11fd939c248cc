//! Builder for constructing Settings.

use super::{Configuration, ReleaseManifest, Settings, manifest::DEFAULT_CONFIGURATIONS};
use crate::release::error::{Context, Error, Result};
use std::{
    collections::HashSet,
    ffi::OsStr,
    path::{Component, Path, PathBuf},
};

const DEFAULT_SOLUTION: &str = "CBP.sln";
const DEFAULT_ARTIFACT: &str = "CBP.dll";
const DEFAULT_OUTPUT_DIR: &str = "tmp";
const DEFAULT_PACKAGING_SCRIPT: &str = "installer/generateFomod.py";
const DEFAULT_PACKAGING_INTERPRETER: &str = "python";

/// Builder for constructing [`Settings`].
///
/// The project root and build tool are required; everything else falls
/// back to the default release layout.
///
/// # Examples
///
/// ```no_run
/// use multibuild_release::release::SettingsBuilder;
///
/// # fn example() -> multibuild_release::release::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_root("/src/cbp")
///     .build_tool("/opt/msbuild/msbuild")
///     .configurations(["ReleaseAVX2 MT", "Release MT"])
///     .build()?;
/// assert_eq!(settings.configurations().len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    project_root: Option<PathBuf>,
    build_tool: Option<PathBuf>,
    configurations: Option<Vec<String>>,
    solution: Option<PathBuf>,
    artifact: Option<String>,
    output_dir: Option<PathBuf>,
    rebuild: Option<bool>,
    packaging_script: Option<PathBuf>,
    packaging_interpreter: Option<PathBuf>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the project root. Required.
    pub fn project_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the build tool executable. Required.
    pub fn build_tool<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.build_tool = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the configurations to build, in order.
    ///
    /// Default: `["ReleaseAVX2 MT", "Release MT"]`
    pub fn configurations<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.configurations = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the solution file relative to the project root.
    ///
    /// Default: `CBP.sln`
    pub fn solution<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.solution = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the artifact filename each configuration must produce.
    ///
    /// Default: `CBP.dll`
    pub fn artifact(mut self, name: impl Into<String>) -> Self {
        self.artifact = Some(name.into());
        self
    }

    /// Sets the output root relative to the project root.
    ///
    /// Default: `tmp`
    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets whether builds are forced to rebuild.
    ///
    /// Default: `true`
    pub fn rebuild(mut self, rebuild: bool) -> Self {
        self.rebuild = Some(rebuild);
        self
    }

    /// Sets the packaging script relative to the project root.
    ///
    /// Default: `installer/generateFomod.py`
    pub fn packaging_script<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.packaging_script = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the program that runs the packaging script.
    ///
    /// Default: `python`
    pub fn packaging_interpreter<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.packaging_interpreter = Some(path.as_ref().to_path_buf());
        self
    }

    /// Applies every key present in `manifest`, leaving the rest untouched.
    pub fn manifest(mut self, manifest: ReleaseManifest) -> Self {
        if let Some(configurations) = manifest.configurations {
            self.configurations = Some(configurations);
        }
        if let Some(solution) = manifest.solution {
            self.solution = Some(solution);
        }
        if let Some(artifact) = manifest.artifact {
            self.artifact = Some(artifact);
        }
        if let Some(output_dir) = manifest.output_dir {
            self.output_dir = Some(output_dir);
        }
        if let Some(rebuild) = manifest.rebuild {
            self.rebuild = Some(rebuild);
        }
        if let Some(script) = manifest.packaging.script {
            self.packaging_script = Some(script);
        }
        if let Some(interpreter) = manifest.packaging.interpreter {
            self.packaging_interpreter = Some(interpreter);
        }
        self
    }

    /// Packaging interpreter as currently configured (default if unset).
    pub fn current_interpreter(&self) -> PathBuf {
        self.packaging_interpreter
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PACKAGING_INTERPRETER))
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the project root or build tool is
    /// missing, if no configurations are declared, if a configuration name is
    /// invalid or repeated, if the artifact name is not a plain filename, or
    /// if the output directory would resolve outside the project root.
    pub fn build(self) -> Result<Settings> {
        let packaging_interpreter = self.current_interpreter();
        let project_root = self.project_root.context("project root is required")?;
        let build_tool = self.build_tool.context("build tool is required")?;

        let names = self.configurations.unwrap_or_else(|| {
            DEFAULT_CONFIGURATIONS
                .iter()
                .map(|name| (*name).to_string())
                .collect()
        });
        if names.is_empty() {
            return Err(Error::Configuration(
                "at least one configuration must be declared".into(),
            ));
        }

        let mut seen = HashSet::new();
        let mut configurations = Vec::with_capacity(names.len());
        for name in names {
            let configuration = Configuration::new(name)?;
            if !seen.insert(configuration.name().to_string()) {
                return Err(Error::Configuration(format!(
                    "configuration '{configuration}' is declared more than once"
                )));
            }
            configurations.push(configuration);
        }

        let artifact = self
            .artifact
            .unwrap_or_else(|| DEFAULT_ARTIFACT.to_string());
        if artifact.is_empty() || Path::new(&artifact).file_name() != Some(OsStr::new(&artifact)) {
            return Err(Error::Configuration(format!(
                "artifact '{artifact}' must be a plain filename"
            )));
        }

        let output_dir = self
            .output_dir
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        if !is_contained_relative(&output_dir) {
            return Err(Error::Configuration(format!(
                "output directory '{}' must be a relative path inside the project root",
                output_dir.display()
            )));
        }

        Ok(Settings::new(
            project_root,
            build_tool,
            configurations,
            self.solution
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SOLUTION)),
            artifact,
            output_dir,
            self.rebuild.unwrap_or(true),
            self.packaging_script
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PACKAGING_SCRIPT)),
            packaging_interpreter,
        ))
    }
}

/// Non-empty and made only of normal components, so joining it onto the
/// project root stays beneath it.
fn is_contained_relative(path: &Path) -> bool {
    let mut components = path.components().peekable();
    components.peek().is_some() && components.all(|c| matches!(c, Component::Normal(_)))
}
