//! Artifact document loading
//!
//! The input document is a JSON object with a single `artifacts` key holding
//! an array of release paths:
//!
//! ```json
//! {"artifacts": ["releases/binaries/dcos/linux/x86-64/1.12.0/dcos"]}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use crate::artifact::{ArtifactCollection, PathParser, PathScheme};
use crate::config::RelcatConfig;
use crate::error::{CatalogError, PathError, Result};

/// The only key an artifact document may contain
pub const ARTIFACTS_KEY: &str = "artifacts";

/// What to do with a path that fails to parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPolicy {
    /// Fail the whole load on the first invalid path
    #[default]
    Abort,
    /// Log and leave out invalid paths
    Skip,
}

/// Result of a successful load
#[derive(Debug, Clone, Default)]
pub struct LoadedCatalog {
    pub collection: ArtifactCollection,
    /// Paths left out under [`LoadPolicy::Skip`], in input order
    pub rejected: Vec<PathError>,
}

/// Builds an [`ArtifactCollection`] from an artifact document
#[derive(Debug, Clone, Default)]
pub struct CatalogLoader {
    parser: PathParser,
    policy: LoadPolicy,
}

impl CatalogLoader {
    pub fn new(scheme: PathScheme, policy: LoadPolicy) -> Self {
        Self {
            parser: PathParser::new(scheme),
            policy,
        }
    }

    pub fn from_config(config: &RelcatConfig) -> Self {
        Self::new(config.scheme.clone(), config.load.on_invalid_path)
    }

    /// Override the policy from configuration
    pub fn with_policy(mut self, policy: LoadPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> LoadPolicy {
        self.policy
    }

    pub fn load_str(&self, document: &str) -> Result<LoadedCatalog> {
        let value: Value = serde_json::from_str(document)?;
        self.load_value(value)
    }

    pub fn load_reader<R: Read>(&self, reader: R) -> Result<LoadedCatalog> {
        let value: Value = serde_json::from_reader(reader)?;
        self.load_value(value)
    }

    pub fn load_path(&self, path: &Path) -> Result<LoadedCatalog> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.load_str(&content)
    }

    fn load_value(&self, value: Value) -> Result<LoadedCatalog> {
        let object: Map<String, Value> = serde_json::from_value(value)?;
        let paths = artifact_paths(object)?;
        self.load_paths(&paths)
    }

    /// Parse every path according to the loader's policy
    pub fn load_paths<S: AsRef<str>>(&self, paths: &[S]) -> Result<LoadedCatalog> {
        let mut artifacts = Vec::with_capacity(paths.len());
        let mut rejected = Vec::new();

        for path in paths {
            match self.parser.parse(path.as_ref()) {
                Ok(artifact) => artifacts.push(artifact),
                Err(e) => match self.policy {
                    LoadPolicy::Abort => return Err(e.into()),
                    LoadPolicy::Skip => {
                        warn!("Skipping invalid artifact path: {}", e);
                        rejected.push(e);
                    }
                },
            }
        }

        let collection = ArtifactCollection::new(artifacts);
        info!(
            loaded = collection.len(),
            rejected = rejected.len(),
            "Loaded artifact catalog"
        );

        Ok(LoadedCatalog {
            collection,
            rejected,
        })
    }
}

fn artifact_paths(mut object: Map<String, Value>) -> Result<Vec<String>> {
    if let Some(key) = object.keys().find(|k| k.as_str() != ARTIFACTS_KEY) {
        return Err(CatalogError::UnknownInputKey { key: key.clone() });
    }

    let value = object
        .remove(ARTIFACTS_KEY)
        .ok_or(CatalogError::MissingArtifacts)?;
    Ok(serde_json::from_value(value)?)
}
