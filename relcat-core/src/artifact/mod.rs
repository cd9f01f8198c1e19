//! Release artifacts
//!
//! This module turns release paths into typed [`Artifact`] records and
//! answers faceted queries over collections of them.
//!
//! # Path scheme
//!
//! ```text
//! releases/binaries/<name>/<platform>/<arch>/<major>.<minor>.<patch>/<name>{.exe}
//! releases/plugins/<name>/<platform>/<arch>/<name>-<platform-version>-patch.<patch>.zip
//! ```
//!
//! # Architecture
//!
//! ```text
//! "releases/..." paths
//!        │
//!        ▼
//!   PathParser  ──── PathScheme (accepted architectures)
//!        │
//!        ▼
//!   ArtifactCollection
//!        │
//!        ├── binaries() → BinaryView  (major/minor/patch versions)
//!        └── plugins()  → PluginView  (platform versions, patches)
//! ```

mod collection;
mod parser;
mod version;

pub use collection::{
    ArtifactCollection, ArtifactFilter, ArtifactView, BinaryView, PluginView, ReleaseLine,
};
pub use parser::{PathParser, PathScheme, DEFAULT_ARCHITECTURES};
pub use version::{BinaryVersion, PluginVersion, Version, VersionNumber};

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::PathError;

/// Kind of release artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Binary,
    Plugin,
}

impl ArtifactKind {
    /// The `<type>` path segment for this kind
    pub fn segment(&self) -> &'static str {
        match self {
            ArtifactKind::Binary => "binaries",
            ArtifactKind::Plugin => "plugins",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Binary => f.write_str("binary"),
            ArtifactKind::Plugin => f.write_str("plugin"),
        }
    }
}

/// Operating system an artifact is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Darwin,
    Linux,
    Windows,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Darwin, Platform::Linux, Platform::Windows];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Darwin => "darwin",
            Platform::Linux => "linux",
            Platform::Windows => "windows",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("Unknown platform '{s}'. Expected one of: darwin, linux, windows"))
    }
}

/// One parsed release file.
///
/// Artifacts are immutable; the only way to build one is to parse a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Artifact {
    name: String,
    platform: Platform,
    architecture: String,
    version: Version,
    path: String,
}

impl Artifact {
    pub(crate) fn new(
        name: String,
        platform: Platform,
        architecture: String,
        version: Version,
        path: String,
    ) -> Self {
        Self {
            name,
            platform,
            architecture,
            version,
            path,
        }
    }

    /// Parse a path using the default scheme
    pub fn parse(path: &str) -> Result<Self, PathError> {
        PathParser::default().parse(path)
    }

    /// Kind follows from the version variant, so the two always agree
    pub fn kind(&self) -> ArtifactKind {
        match self.version {
            Version::Binary(_) => ArtifactKind::Binary,
            Version::Plugin(_) => ArtifactKind::Plugin,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn architecture(&self) -> &str {
        &self.architecture
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// The original path, unmodified
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_binary(&self) -> bool {
        self.kind() == ArtifactKind::Binary
    }

    pub fn is_plugin(&self) -> bool {
        self.kind() == ArtifactKind::Plugin
    }

    pub fn binary_version(&self) -> Option<&BinaryVersion> {
        match &self.version {
            Version::Binary(v) => Some(v),
            Version::Plugin(_) => None,
        }
    }

    pub fn plugin_version(&self) -> Option<&PluginVersion> {
        match &self.version {
            Version::Plugin(v) => Some(v),
            Version::Binary(_) => None,
        }
    }

    /// HTML anchor linking to the artifact.
    ///
    /// The path is used as the link text unless `label` is given. Both are
    /// escaped, since `<name>` segments are not restricted to safe characters.
    pub fn anchor(&self, label: Option<&str>) -> String {
        let text = label.unwrap_or(&self.path);
        format!(
            r#"<a href="{}">{}</a>"#,
            escape_html(&self.path),
            escape_html(text)
        )
    }
}

/// Escape text for use in HTML content and double-quoted attributes
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl FromStr for Artifact {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Artifact::parse(s)
    }
}

impl Serialize for Artifact {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Artifact", 6)?;
        state.serialize_field("kind", &self.kind())?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("platform", &self.platform)?;
        state.serialize_field("architecture", &self.architecture)?;
        state.serialize_field("version", &self.version)?;
        state.serialize_field("path", &self.path)?;
        state.end()
    }
}
