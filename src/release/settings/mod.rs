//! Run settings: declared configurations, project layout and tool locations.
//!
//! - [`core`] - [`Configuration`] and the immutable [`Settings`]
//! - [`builder`] - [`SettingsBuilder`] with the release defaults
//! - [`manifest`] - optional `release.toml` overrides

mod builder;
mod core;
mod manifest;

pub use builder::SettingsBuilder;
pub use self::core::{Configuration, Settings, TARGET_SEPARATOR};
pub use manifest::{MANIFEST_FILE, PackagingManifest, ReleaseManifest};
