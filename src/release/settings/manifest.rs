//! Optional `release.toml` overrides read from the project root.

use crate::release::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Manifest filename looked up in the project root.
pub const MANIFEST_FILE: &str = "release.toml";

/// Configurations built when the manifest does not list any.
pub const DEFAULT_CONFIGURATIONS: [&str; 2] = ["ReleaseAVX2 MT", "Release MT"];

/// Release manifest. Every key is optional; absent keys keep the defaults.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ReleaseManifest {
    /// Configurations to build, in order
    pub configurations: Option<Vec<String>>,
    /// Solution file, relative to the project root
    pub solution: Option<PathBuf>,
    /// Artifact filename produced by every configuration
    pub artifact: Option<String>,
    /// Output root, relative to the project root
    pub output_dir: Option<PathBuf>,
    /// Force full rebuilds
    pub rebuild: Option<bool>,
    /// Packaging tool settings
    #[serde(default)]
    pub packaging: PackagingManifest,
}

/// `[packaging]` table.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PackagingManifest {
    /// Packaging script, relative to the project root
    pub script: Option<PathBuf>,
    /// Program that runs the script
    pub interpreter: Option<PathBuf>,
}

impl ReleaseManifest {
    /// Parses manifest text; `origin` is only used in error messages.
    pub fn parse(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|error| Error::Manifest {
            path: origin.to_path_buf(),
            error,
        })
    }

    /// Loads `<root>/release.toml`, or the defaults if there is none.
    pub async fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(MANIFEST_FILE);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => {
                log::debug!("Loaded release manifest from {}", path.display());
                Self::parse(&text, &path)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No {MANIFEST_FILE} in {}, using defaults", project_root.display());
                Ok(Self::default())
            }
            Err(e) => Err(Error::Configuration(format!(
                "cannot read release manifest {}: {e}",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_manifest() {
        let manifest = ReleaseManifest::parse(
            r#"
configurations = ["A", "B"]
solution = "Game.sln"
artifact = "artifact.bin"
output_dir = "out"
rebuild = false

[packaging]
script = "pack.sh"
interpreter = "sh"
"#,
            Path::new("release.toml"),
        )
        .unwrap();

        assert_eq!(manifest.configurations, Some(vec!["A".into(), "B".into()]));
        assert_eq!(manifest.artifact.as_deref(), Some("artifact.bin"));
        assert_eq!(manifest.rebuild, Some(false));
        assert_eq!(manifest.packaging.interpreter, Some(PathBuf::from("sh")));
    }

    #[test]
    fn empty_manifest_is_all_defaults() {
        let manifest = ReleaseManifest::parse("", Path::new("release.toml")).unwrap();
        assert_eq!(manifest, ReleaseManifest::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ReleaseManifest::parse("parallel = true", Path::new("release.toml"))
            .unwrap_err();
        assert!(matches!(err, Error::Manifest { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn missing_file_loads_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let manifest = ReleaseManifest::load(temp.path()).await.unwrap();
        assert_eq!(manifest, ReleaseManifest::default());
    }

    #[tokio::test]
    async fn unreadable_manifest_is_a_configuration_error() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join(MANIFEST_FILE)).unwrap();

        let err = ReleaseManifest::load(temp.path()).await.unwrap_err();
        assert!(matches!(err, Error::Configuration(_)), "got {err:?}");
        assert!(err.to_string().contains(MANIFEST_FILE));
        assert_eq!(err.exit_code(), 2);
    }
}
