//! Error taxonomy for relcat-core.

use std::path::PathBuf;
use thiserror::Error;

/// Scheme shared by every artifact path
pub const PATH_SCHEME: &str = "releases/<type>/<name>/<platform>/<arch>/...";

/// Scheme for binary paths
pub const BINARY_SCHEME: &str =
    "releases/binaries/<name>/<platform>/<arch>/<version>/<name>{.exe}";

/// Scheme for plugin paths
pub const PLUGIN_SCHEME: &str =
    "releases/plugins/<name>/<platform>/<arch>/<name>-<platform-version>-patch.<patch>.zip";

/// A path that does not follow the release artifact scheme.
///
/// Every variant carries the offending path unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// First segment is not `releases`
    #[error(
        "Invalid path: paths to artifacts must follow the scheme '{scheme}': '{path}'",
        scheme = PATH_SCHEME
    )]
    InvalidRoot { path: String },

    /// Second segment is neither `binaries` nor `plugins`
    #[error("Invalid path: unrecognized <type> '{segment}' (expected 'binaries' or 'plugins') for path '{path}'")]
    UnrecognizedType { path: String, segment: String },

    #[error("Invalid path: paths to '{kind}' must follow the scheme '{scheme}' ({expected} segments, found {found}) for path '{path}'")]
    SegmentCount {
        path: String,
        kind: &'static str,
        scheme: &'static str,
        expected: usize,
        found: usize,
    },

    #[error(
        "Invalid path: empty <name> in scheme '{scheme}' for path '{path}'",
        scheme = PATH_SCHEME
    )]
    EmptyName { path: String },

    #[error(
        "Invalid path: unrecognized <platform> '{segment}' in scheme '{scheme}' for path '{path}'",
        scheme = PATH_SCHEME
    )]
    UnrecognizedPlatform { path: String, segment: String },

    #[error(
        "Invalid path: unrecognized <arch> '{segment}' in scheme '{scheme}' for path '{path}'",
        scheme = PATH_SCHEME
    )]
    UnrecognizedArchitecture { path: String, segment: String },

    /// Version segment or plugin file name is not in canonical form
    #[error("Invalid path: '{segment}' does not match '{expected}' for path '{path}'")]
    MalformedVersion {
        path: String,
        segment: String,
        expected: &'static str,
    },

    #[error("Invalid path: file name '{segment}' does not match artifact name '{name}' in scheme '{scheme}' for path '{path}'")]
    NameMismatch {
        path: String,
        segment: String,
        name: String,
        scheme: &'static str,
    },
}

impl PathError {
    /// The path that failed to parse
    pub fn path(&self) -> &str {
        match self {
            PathError::InvalidRoot { path }
            | PathError::UnrecognizedType { path, .. }
            | PathError::SegmentCount { path, .. }
            | PathError::EmptyName { path }
            | PathError::UnrecognizedPlatform { path, .. }
            | PathError::UnrecognizedArchitecture { path, .. }
            | PathError::MalformedVersion { path, .. }
            | PathError::NameMismatch { path, .. } => path,
        }
    }
}

/// A version string that is not in canonical form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} version '{text}': expected '{expected}'")]
pub struct VersionParseError {
    kind: &'static str,
    text: String,
    expected: &'static str,
}

impl VersionParseError {
    pub(crate) fn binary(text: &str) -> Self {
        Self {
            kind: "binary",
            text: text.to_string(),
            expected: "<major>.<minor>.<patch>",
        }
    }

    pub(crate) fn plugin(text: &str) -> Self {
        Self {
            kind: "plugin",
            text: text.to_string(),
            expected: "<platform-version>-patch.<patch>",
        }
    }
}

/// Errors raised while loading a catalog document
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The document has a top-level key other than `artifacts`
    #[error("Unknown key in artifact document: '{key}' (only 'artifacts' is recognized)")]
    UnknownInputKey { key: String },

    #[error("Artifact document has no 'artifacts' key")]
    MissingArtifacts,

    #[error(transparent)]
    InvalidPath(#[from] PathError),

    #[error("Malformed artifact document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read artifact document {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CatalogError>;
