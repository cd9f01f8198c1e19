//! Release path parsing
//!
//! A path is split on `/` and validated segment by segment. The first
//! failing check decides the error, so every malformed path maps to exactly
//! one [`PathError`] variant.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{
    Artifact, ArtifactKind, BinaryVersion, Platform, PluginVersion, Version, VersionNumber,
};
use crate::error::{PathError, BINARY_SCHEME, PLUGIN_SCHEME};

/// Architectures accepted when no configuration says otherwise
pub const DEFAULT_ARCHITECTURES: &[&str] = &["x86-64"];

const ROOT_SEGMENT: &str = "releases";
const BINARY_SEGMENTS: usize = 7;
const PLUGIN_SEGMENTS: usize = 6;

static PLUGIN_FILENAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+)-([0-9]+\.[0-9]+)-patch\.([0-9]+)\.zip$")
        .expect("plugin filename pattern is valid")
});

/// The configurable part of the path scheme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathScheme {
    /// Accepted `<arch>` segments
    pub architectures: Vec<String>,
}

impl Default for PathScheme {
    fn default() -> Self {
        Self {
            architectures: DEFAULT_ARCHITECTURES.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl PathScheme {
    /// Add an accepted architecture, keeping the list free of duplicates
    pub fn with_architecture(mut self, architecture: impl Into<String>) -> Self {
        let architecture = architecture.into();
        if !self.accepts_architecture(&architecture) {
            self.architectures.push(architecture);
        }
        self
    }

    pub fn accepts_architecture(&self, architecture: &str) -> bool {
        self.architectures.iter().any(|a| a == architecture)
    }
}

/// Parses release paths into [`Artifact`]s
#[derive(Debug, Clone, Default)]
pub struct PathParser {
    scheme: PathScheme,
}

impl PathParser {
    pub fn new(scheme: PathScheme) -> Self {
        Self { scheme }
    }

    pub fn scheme(&self) -> &PathScheme {
        &self.scheme
    }

    /// Parse one path.
    ///
    /// # Errors
    /// Returns the [`PathError`] for the first check the path fails.
    pub fn parse(&self, path: &str) -> Result<Artifact, PathError> {
        trace!(path, "Parsing artifact path");

        let result = self.parse_segments(path);
        if let Err(ref e) = result {
            debug!(path, reason = %e, "Rejected artifact path");
        }
        result
    }

    fn parse_segments(&self, path: &str) -> Result<Artifact, PathError> {
        let parts: Vec<&str> = path.split('/').collect();

        if parts[0] != ROOT_SEGMENT {
            return Err(PathError::InvalidRoot {
                path: path.to_string(),
            });
        }

        let kind = match parts.get(1).copied() {
            Some("binaries") => ArtifactKind::Binary,
            Some("plugins") => ArtifactKind::Plugin,
            other => {
                return Err(PathError::UnrecognizedType {
                    path: path.to_string(),
                    segment: other.unwrap_or_default().to_string(),
                })
            }
        };

        let (expected, scheme) = match kind {
            ArtifactKind::Binary => (BINARY_SEGMENTS, BINARY_SCHEME),
            ArtifactKind::Plugin => (PLUGIN_SEGMENTS, PLUGIN_SCHEME),
        };
        if parts.len() != expected {
            return Err(PathError::SegmentCount {
                path: path.to_string(),
                kind: kind.segment(),
                scheme,
                expected,
                found: parts.len(),
            });
        }

        let name = parts[2];
        if name.is_empty() {
            return Err(PathError::EmptyName {
                path: path.to_string(),
            });
        }

        let platform: Platform = parts[3].parse().map_err(|_| PathError::UnrecognizedPlatform {
            path: path.to_string(),
            segment: parts[3].to_string(),
        })?;

        let architecture = parts[4];
        if !self.scheme.accepts_architecture(architecture) {
            return Err(PathError::UnrecognizedArchitecture {
                path: path.to_string(),
                segment: architecture.to_string(),
            });
        }

        let version = match kind {
            ArtifactKind::Binary => {
                Version::Binary(parse_binary_tail(path, name, parts[5], parts[6])?)
            }
            ArtifactKind::Plugin => Version::Plugin(parse_plugin_tail(path, name, parts[5])?),
        };

        Ok(Artifact::new(
            name.to_string(),
            platform,
            architecture.to_string(),
            version,
            path.to_string(),
        ))
    }
}

/// `<version>/<name>{.exe}`
fn parse_binary_tail(
    path: &str,
    name: &str,
    version: &str,
    filename: &str,
) -> Result<BinaryVersion, PathError> {
    let parsed = BinaryVersion::parse(version).ok_or_else(|| PathError::MalformedVersion {
        path: path.to_string(),
        segment: version.to_string(),
        expected: "<major>.<minor>.<patch>",
    })?;

    let matches_name = filename == name || filename.strip_suffix(".exe") == Some(name);
    if !matches_name {
        return Err(PathError::NameMismatch {
            path: path.to_string(),
            segment: filename.to_string(),
            name: name.to_string(),
            scheme: BINARY_SCHEME,
        });
    }

    Ok(parsed)
}

/// `<name>-<platform-version>-patch.<patch>.zip`
///
/// The greedy prefix is checked against the `<name>` segment rather than
/// trusted on its own.
fn parse_plugin_tail(path: &str, name: &str, filename: &str) -> Result<PluginVersion, PathError> {
    let malformed = || PathError::MalformedVersion {
        path: path.to_string(),
        segment: filename.to_string(),
        expected: "<name>-<platform-version>-patch.<patch>.zip",
    };

    let captures = PLUGIN_FILENAME.captures(filename).ok_or_else(malformed)?;

    if &captures[1] != name {
        return Err(PathError::NameMismatch {
            path: path.to_string(),
            segment: filename.to_string(),
            name: name.to_string(),
            scheme: PLUGIN_SCHEME,
        });
    }

    let patch = VersionNumber::new(&captures[3]).ok_or_else(malformed)?;
    Ok(PluginVersion::new(&captures[2], patch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(path: &str) -> Result<Artifact, PathError> {
        PathParser::default().parse(path)
    }

    #[test]
    fn test_parse_binary() {
        let artifact = parse("releases/binaries/dcos/linux/x86-64/1.2.3/dcos").unwrap();

        assert_eq!(artifact.kind(), ArtifactKind::Binary);
        assert_eq!(artifact.name(), "dcos");
        assert_eq!(artifact.platform(), Platform::Linux);
        assert_eq!(artifact.architecture(), "x86-64");
        assert_eq!(artifact.path(), "releases/binaries/dcos/linux/x86-64/1.2.3/dcos");

        let version = artifact.binary_version().unwrap();
        assert_eq!(version.major().to_u64(), Some(1));
        assert_eq!(version.minor().to_u64(), Some(2));
        assert_eq!(version.patch().to_u64(), Some(3));
    }

    #[test]
    fn test_parse_binary_with_exe() {
        let artifact = parse("releases/binaries/dcos/windows/x86-64/1.2.3/dcos.exe").unwrap();
        assert_eq!(artifact.platform(), Platform::Windows);
        assert_eq!(artifact.version().to_string(), "1.2.3");
    }

    #[test]
    fn test_binary_name_mismatch() {
        let err = parse("releases/binaries/dcos/windows/x86-64/1.2.3/other.exe").unwrap_err();
        assert!(matches!(err, PathError::NameMismatch { ref segment, .. } if segment == "other.exe"));

        // Only a literal ".exe" suffix is accepted
        let err = parse("releases/binaries/dcos/linux/x86-64/1.2.3/dcos.zip").unwrap_err();
        assert!(matches!(err, PathError::NameMismatch { .. }));
        let err = parse("releases/binaries/dcos/linux/x86-64/1.2.3/dcos.exe.exe").unwrap_err();
        assert!(matches!(err, PathError::NameMismatch { .. }));
    }

    #[test]
    fn test_parse_plugin() {
        let artifact =
            parse("releases/plugins/my-plugin/darwin/x86-64/my-plugin-1.11-patch.2.zip").unwrap();

        assert_eq!(artifact.kind(), ArtifactKind::Plugin);
        assert_eq!(artifact.name(), "my-plugin");
        assert_eq!(artifact.platform(), Platform::Darwin);

        let version = artifact.plugin_version().unwrap();
        assert_eq!(version.platform_version(), "1.11");
        assert_eq!(version.patch().to_u64(), Some(2));
        assert_eq!(version.to_string(), "1.11-patch.2");
    }

    #[test]
    fn test_plugin_name_with_version_like_parts() {
        let artifact = parse(
            "releases/plugins/tool-2.0-patch.1/linux/x86-64/tool-2.0-patch.1-1.12-patch.7.zip",
        )
        .unwrap();
        assert_eq!(artifact.name(), "tool-2.0-patch.1");
        assert_eq!(artifact.plugin_version().unwrap().to_string(), "1.12-patch.7");
    }

    #[test]
    fn test_plugin_prefix_must_equal_name() {
        let err = parse("releases/plugins/my-plugin/linux/x86-64/other-1.11-patch.2.zip").unwrap_err();
        assert!(matches!(err, PathError::NameMismatch { ref name, .. } if name == "my-plugin"));
    }

    #[test]
    fn test_malformed_plugin_filename() {
        for filename in [
            "my-plugin-1.11-patch.2.tar.gz",
            "my-plugin-1.11.zip",
            "my-plugin-1-patch.2.zip",
            "my-plugin-1.11.0-patch.2.zip",
            "-1.11-patch.2.zip",
        ] {
            let path = format!("releases/plugins/my-plugin/linux/x86-64/{filename}");
            let err = parse(&path).unwrap_err();
            assert!(
                matches!(err, PathError::MalformedVersion { .. }),
                "{filename}: {err:?}"
            );
        }
    }

    #[test]
    fn test_malformed_binary_version() {
        for version in ["latest", "1.2", "1.2.3-rc.1", "v1.2.3", "1.2.3.4"] {
            let path = format!("releases/binaries/dcos/linux/x86-64/{version}/dcos");
            let err = parse(&path).unwrap_err();
            assert!(
                matches!(err, PathError::MalformedVersion { ref segment, .. } if segment == version),
                "{version}: {err:?}"
            );
        }
    }

    #[test]
    fn test_version_is_checked_before_filename() {
        let err = parse("releases/binaries/dcos/linux/x86-64/latest/other").unwrap_err();
        assert!(matches!(err, PathError::MalformedVersion { .. }));
    }

    #[test]
    fn test_invalid_root() {
        for path in ["binaries/cli/linux/x86-64/1.0.0/dcos", "", "/releases/binaries"] {
            let err = parse(path).unwrap_err();
            assert_eq!(err, PathError::InvalidRoot { path: path.to_string() });
        }
    }

    #[test]
    fn test_unrecognized_type() {
        let err = parse("releases/testing/dcos/linux/x86-64/1.2.3/dcos").unwrap_err();
        assert!(matches!(err, PathError::UnrecognizedType { ref segment, .. } if segment == "testing"));

        let err = parse("releases").unwrap_err();
        assert!(matches!(err, PathError::UnrecognizedType { ref segment, .. } if segment.is_empty()));
    }

    #[test]
    fn test_segment_count() {
        let err = parse("releases/binaries/dcos/linux/x86-64/dcos").unwrap_err();
        assert!(matches!(
            err,
            PathError::SegmentCount { expected: 7, found: 6, kind: "binaries", .. }
        ));

        let err = parse("releases/plugins/p/linux/x86-64/1.11/p-1.11-patch.1.zip").unwrap_err();
        assert!(matches!(
            err,
            PathError::SegmentCount { expected: 6, found: 7, kind: "plugins", .. }
        ));

        // A trailing slash adds an empty segment
        let err = parse("releases/binaries/dcos/linux/x86-64/1.2.3/dcos/").unwrap_err();
        assert!(matches!(err, PathError::SegmentCount { found: 8, .. }));
    }

    #[test]
    fn test_empty_name() {
        let err = parse("releases/binaries//linux/x86-64/1.2.3/.exe").unwrap_err();
        assert!(matches!(err, PathError::EmptyName { .. }));

        let err = parse("releases/plugins//linux/x86-64/-1.11-patch.2.zip").unwrap_err();
        assert_eq!(
            err,
            PathError::EmptyName {
                path: "releases/plugins//linux/x86-64/-1.11-patch.2.zip".to_string()
            }
        );
    }

    #[test]
    fn test_parser_exposes_scheme() {
        let parser = PathParser::new(PathScheme::default().with_architecture("arm64"));
        assert!(parser.scheme().accepts_architecture("arm64"));
        assert!(!PathParser::default().scheme().accepts_architecture("arm64"));
    }

    #[test]
    fn test_unrecognized_platform() {
        let err = parse("releases/binaries/dcos/Linux/x86-64/1.2.3/dcos").unwrap_err();
        assert!(matches!(err, PathError::UnrecognizedPlatform { ref segment, .. } if segment == "Linux"));
    }

    #[test]
    fn test_unrecognized_architecture() {
        let err = parse("releases/binaries/dcos/linux/arm64/1.2.3/dcos").unwrap_err();
        assert!(matches!(err, PathError::UnrecognizedArchitecture { ref segment, .. } if segment == "arm64"));
    }

    #[test]
    fn test_scheme_extends_architectures() {
        let parser = PathParser::new(PathScheme::default().with_architecture("arm64"));

        let artifact = parser.parse("releases/binaries/dcos/linux/arm64/1.2.3/dcos").unwrap();
        assert_eq!(artifact.architecture(), "arm64");

        // The default architecture is still accepted
        assert!(parser.parse("releases/binaries/dcos/linux/x86-64/1.2.3/dcos").is_ok());
    }

    #[test]
    fn test_with_architecture_is_idempotent() {
        let scheme = PathScheme::default()
            .with_architecture("x86-64")
            .with_architecture("arm64")
            .with_architecture("arm64");
        assert_eq!(scheme.architectures, vec!["x86-64", "arm64"]);
    }

    #[test]
    fn test_round_trip() {
        for (platform, version, filename) in [
            ("linux", "0.0.0", "dcos"),
            ("darwin", "1.12.3", "dcos"),
            ("windows", "10.200.3000", "dcos.exe"),
            ("linux", "007.01.0", "dcos"),
            ("linux", "99999999999999999999.1.1", "dcos"),
        ] {
            let path = format!("releases/binaries/dcos/{platform}/x86-64/{version}/{filename}");
            let artifact = parse(&path).unwrap();
            assert_eq!(artifact.path(), path);
            assert_eq!(artifact.binary_version().unwrap().patch_string(), version);
        }
    }
}
