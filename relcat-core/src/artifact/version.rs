//! Version value types for release artifacts
//!
//! Binaries carry a full `major.minor.patch` version. Plugins have no version
//! of their own; they follow a host platform release line plus a patch counter.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::VersionParseError;

static BINARY_VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+)\.([0-9]+)\.([0-9]+)$").expect("binary version pattern is valid")
});

static PLUGIN_VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+(?:\.[0-9]+)*)-patch\.([0-9]+)$").expect("plugin version pattern is valid")
});

/// A run of ASCII digits taken verbatim from a path segment.
///
/// The digits are not range-checked and leading zeros are kept, so the
/// original text can always be reproduced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionNumber(String);

impl VersionNumber {
    /// Returns `None` unless `digits` is a non-empty run of ASCII digits.
    pub fn new(digits: impl Into<String>) -> Option<Self> {
        let digits = digits.into();
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(digits))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value, if it fits in a `u64`.
    pub fn to_u64(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Semantic version of a binary artifact
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BinaryVersion {
    major: VersionNumber,
    minor: VersionNumber,
    patch: VersionNumber,
}

impl BinaryVersion {
    pub fn new(major: VersionNumber, minor: VersionNumber, patch: VersionNumber) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse `<major>.<minor>.<patch>` where every group is ASCII digits.
    ///
    /// Anything else (extra groups, pre-release or build suffixes, other
    /// separators) is rejected.
    pub fn parse(text: &str) -> Option<Self> {
        let captures = BINARY_VERSION.captures(text)?;
        Some(Self {
            major: VersionNumber(captures[1].to_string()),
            minor: VersionNumber(captures[2].to_string()),
            patch: VersionNumber(captures[3].to_string()),
        })
    }

    pub fn major(&self) -> &VersionNumber {
        &self.major
    }

    pub fn minor(&self) -> &VersionNumber {
        &self.minor
    }

    pub fn patch(&self) -> &VersionNumber {
        &self.patch
    }

    /// `"{major}"`
    pub fn major_string(&self) -> String {
        self.major.to_string()
    }

    /// `"{major}.{minor}"`, the release line binaries are filtered by
    pub fn minor_string(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }

    /// `"{major}.{minor}.{patch}"`, the canonical form
    pub fn patch_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BinaryVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for BinaryVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| VersionParseError::binary(s))
    }
}

/// Version of a plugin: the host platform release it targets plus a patch counter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PluginVersion {
    platform_version: String,
    patch: VersionNumber,
}

impl PluginVersion {
    pub fn new(platform_version: impl Into<String>, patch: VersionNumber) -> Self {
        Self {
            platform_version: platform_version.into(),
            patch,
        }
    }

    /// Host platform release line, e.g. `"1.11"`
    pub fn platform_version(&self) -> &str {
        &self.platform_version
    }

    pub fn patch(&self) -> &VersionNumber {
        &self.patch
    }

    /// `"{platform_version}-patch.{patch}"`, the canonical form
    pub fn patch_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PluginVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-patch.{}", self.platform_version, self.patch)
    }
}

impl FromStr for PluginVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = PLUGIN_VERSION
            .captures(s)
            .ok_or_else(|| VersionParseError::plugin(s))?;
        Ok(Self {
            platform_version: captures[1].to_string(),
            patch: VersionNumber(captures[2].to_string()),
        })
    }
}

/// Version of an artifact, one variant per artifact kind
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Version {
    Binary(BinaryVersion),
    Plugin(PluginVersion),
}

impl Version {
    /// Canonical string form of either variant
    pub fn patch_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::Binary(v) => v.fmt(f),
            Version::Plugin(v) => v.fmt(f),
        }
    }
}

impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
