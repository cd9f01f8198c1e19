//! Faceted queries over parsed artifacts
//!
//! An [`ArtifactCollection`] is built once and never changes. Binary and
//! plugin views borrow from it, and every facet list keeps values in the
//! order they first appear.

use indexmap::IndexSet;
use serde::Serialize;
use std::borrow::Cow;
use tracing::debug;

use super::{Artifact, BinaryVersion, Platform, PluginVersion};

/// A version type that has a release line to filter on.
///
/// Binaries are filtered by `"{major}.{minor}"`, plugins by the host platform
/// version they target.
pub trait ReleaseLine {
    /// Project the matching version out of an artifact, if it has one
    fn of(artifact: &Artifact) -> Option<&Self>;

    /// Value compared against [`ArtifactFilter::release`]
    fn release_line(&self) -> Cow<'_, str>;
}

impl ReleaseLine for BinaryVersion {
    fn of(artifact: &Artifact) -> Option<&Self> {
        artifact.binary_version()
    }

    fn release_line(&self) -> Cow<'_, str> {
        Cow::Owned(self.minor_string())
    }
}

impl ReleaseLine for PluginVersion {
    fn of(artifact: &Artifact) -> Option<&Self> {
        artifact.plugin_version()
    }

    fn release_line(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.platform_version())
    }
}

/// Constraints for [`ArtifactView::filter`].
///
/// `None` leaves a facet unconstrained. There is no "match all" value; callers
/// that offer one map it to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactFilter {
    pub platform: Option<Platform>,
    pub architecture: Option<String>,
    pub name: Option<String>,
    /// Minor version (`"1.12"`) for binaries, platform version for plugins
    pub release: Option<String>,
}

impl ArtifactFilter {
    /// A filter that matches everything
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn with_architecture(mut self, architecture: impl Into<String>) -> Self {
        self.architecture = Some(architecture.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_release(mut self, release: impl Into<String>) -> Self {
        self.release = Some(release.into());
        self
    }

    /// True when no facet is constrained
    pub fn is_empty(&self) -> bool {
        self.platform.is_none()
            && self.architecture.is_none()
            && self.name.is_none()
            && self.release.is_none()
    }

    fn matches<V: ReleaseLine>(&self, artifact: &Artifact, version: &V) -> bool {
        if let Some(platform) = self.platform {
            if artifact.platform() != platform {
                return false;
            }
        }
        if let Some(ref architecture) = self.architecture {
            if artifact.architecture() != architecture {
                return false;
            }
        }
        if let Some(ref name) = self.name {
            if artifact.name() != name {
                return false;
            }
        }
        if let Some(ref release) = self.release {
            if version.release_line() != release.as_str() {
                return false;
            }
        }
        true
    }
}

/// Distinct values in first-seen order
fn distinct<I>(values: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    values
        .into_iter()
        .map(Into::into)
        .collect::<IndexSet<String>>()
        .into_iter()
        .collect()
}

/// Ordered, immutable set of artifacts. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ArtifactCollection {
    artifacts: Vec<Artifact>,
}

impl ArtifactCollection {
    pub fn new(artifacts: Vec<Artifact>) -> Self {
        Self { artifacts }
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Artifact> {
        self.artifacts.iter()
    }

    /// Binary artifacts, in collection order
    pub fn binaries(&self) -> BinaryView<'_> {
        let view = ArtifactView::collect(&self.artifacts);
        debug!(count = view.len(), "Built binary view");
        view
    }

    /// Plugin artifacts, in collection order
    pub fn plugins(&self) -> PluginView<'_> {
        let view = ArtifactView::collect(&self.artifacts);
        debug!(count = view.len(), "Built plugin view");
        view
    }

    /// Platforms across binaries and plugins
    pub fn platforms(&self) -> Vec<String> {
        distinct(self.artifacts.iter().map(|a| a.platform().as_str()))
    }

    /// Architectures across binaries and plugins
    pub fn architectures(&self) -> Vec<String> {
        distinct(self.artifacts.iter().map(Artifact::architecture))
    }
}

impl FromIterator<Artifact> for ArtifactCollection {
    fn from_iter<T: IntoIterator<Item = Artifact>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ArtifactCollection {
    type Item = &'a Artifact;
    type IntoIter = std::slice::Iter<'a, Artifact>;

    fn into_iter(self) -> Self::IntoIter {
        self.artifacts.iter()
    }
}

/// Artifacts of one kind, borrowed from an [`ArtifactCollection`].
///
/// Each entry pairs the artifact with its typed version, so version
/// projections never have to handle the other kind.
#[derive(Debug, Clone)]
pub struct ArtifactView<'a, V> {
    entries: Vec<(&'a Artifact, &'a V)>,
}

/// View over binary artifacts
pub type BinaryView<'a> = ArtifactView<'a, BinaryVersion>;

/// View over plugin artifacts
pub type PluginView<'a> = ArtifactView<'a, PluginVersion>;

impl<'a, V: ReleaseLine> ArtifactView<'a, V> {
    fn collect(artifacts: &'a [Artifact]) -> Self {
        let entries = artifacts
            .iter()
            .filter_map(|artifact| V::of(artifact).map(|version| (artifact, version)))
            .collect();
        Self { entries }
    }

    /// All artifacts in the view, in collection order
    pub fn list(&self) -> Vec<&'a Artifact> {
        self.entries.iter().map(|(artifact, _)| *artifact).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        distinct(self.entries.iter().map(|(a, _)| a.name()))
    }

    pub fn platforms(&self) -> Vec<String> {
        distinct(self.entries.iter().map(|(a, _)| a.platform().as_str()))
    }

    pub fn architectures(&self) -> Vec<String> {
        distinct(self.entries.iter().map(|(a, _)| a.architecture()))
    }

    /// Artifacts matching every constraint in `filter`, in collection order
    pub fn filter(&self, filter: &ArtifactFilter) -> Vec<&'a Artifact> {
        self.entries
            .iter()
            .filter(|(artifact, version)| filter.matches(artifact, *version))
            .map(|(artifact, _)| *artifact)
            .collect()
    }
}

impl ArtifactView<'_, BinaryVersion> {
    pub fn major_versions(&self) -> Vec<String> {
        distinct(self.entries.iter().map(|(_, v)| v.major_string()))
    }

    pub fn minor_versions(&self) -> Vec<String> {
        distinct(self.entries.iter().map(|(_, v)| v.minor_string()))
    }

    pub fn patch_versions(&self) -> Vec<String> {
        distinct(self.entries.iter().map(|(_, v)| v.patch_string()))
    }

    /// Same as [`Self::patch_versions`]
    pub fn versions(&self) -> Vec<String> {
        self.patch_versions()
    }
}

impl ArtifactView<'_, PluginVersion> {
    /// Host platform release lines the plugins target
    pub fn platform_versions(&self) -> Vec<String> {
        distinct(self.entries.iter().map(|(_, v)| v.platform_version()))
    }

    pub fn patch_versions(&self) -> Vec<String> {
        distinct(self.entries.iter().map(|(_, v)| v.patch_string()))
    }

    /// Same as [`Self::patch_versions`]
    pub fn versions(&self) -> Vec<String> {
        self.patch_versions()
    }
}
