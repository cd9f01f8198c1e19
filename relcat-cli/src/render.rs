//! Output rendering for facet lists and artifact listings

use relcat_core::artifact::{Artifact, ArtifactCollection};
use serde::Serialize;
use serde_json::Value;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

/// Table row for one artifact
#[derive(Tabled)]
struct ArtifactRow {
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Platform")]
    platform: String,
    #[tabled(rename = "Arch")]
    architecture: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Path")]
    path: String,
}

/// Table row for one facet
#[derive(Tabled)]
struct FacetRow {
    #[tabled(rename = "Facet")]
    facet: &'static str,
    #[tabled(rename = "Values")]
    values: String,
}

/// Every facet list, in the order the selection controls are shown
#[derive(Debug, Serialize)]
pub struct Facets {
    pub platforms: Vec<String>,
    pub architectures: Vec<String>,
    pub binaries: Vec<String>,
    pub cli_versions: Vec<String>,
    pub plugins: Vec<String>,
    pub dcos_versions: Vec<String>,
}

impl Facets {
    pub fn from_collection(collection: &ArtifactCollection) -> Self {
        let binaries = collection.binaries();
        let plugins = collection.plugins();
        Self {
            platforms: collection.platforms(),
            architectures: collection.architectures(),
            binaries: binaries.names(),
            cli_versions: binaries.minor_versions(),
            plugins: plugins.names(),
            dcos_versions: plugins.platform_versions(),
        }
    }

    fn rows(&self) -> Vec<FacetRow> {
        [
            ("platforms", &self.platforms),
            ("architectures", &self.architectures),
            ("binaries", &self.binaries),
            ("cli_versions", &self.cli_versions),
            ("plugins", &self.plugins),
            ("dcos_versions", &self.dcos_versions),
        ]
        .into_iter()
        .map(|(facet, values)| FacetRow {
            facet,
            values: if values.is_empty() {
                "-".to_string()
            } else {
                values.join(", ")
            },
        })
        .collect()
    }
}

/// Filtered listings, split by kind
#[derive(Debug, Serialize)]
pub struct Listing<'a> {
    pub binaries: &'a [&'a Artifact],
    pub plugins: &'a [&'a Artifact],
}

pub fn facets_json(collection: &ArtifactCollection) -> serde_json::Result<Value> {
    serde_json::to_value(Facets::from_collection(collection))
}

pub fn facets_table(collection: &ArtifactCollection) -> String {
    let rows = Facets::from_collection(collection).rows();

    Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string()
}

pub fn listing_table(artifacts: &[&Artifact]) -> String {
    let rows: Vec<ArtifactRow> = artifacts
        .iter()
        .map(|a| ArtifactRow {
            kind: a.kind().to_string(),
            name: a.name().to_string(),
            platform: a.platform().to_string(),
            architecture: a.architecture().to_string(),
            version: a.version().to_string(),
            path: a.path().to_string(),
        })
        .collect();

    Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string()
}

pub fn listing_json(binaries: &[&Artifact], plugins: &[&Artifact]) -> serde_json::Result<Value> {
    serde_json::to_value(Listing { binaries, plugins })
}

/// One anchor per line, each followed by a line break tag
pub fn listing_html(artifacts: &[&Artifact]) -> String {
    artifacts
        .iter()
        .map(|a| format!("{}<br/>", a.anchor(None)))
        .collect::<Vec<_>>()
        .join("\n")
}
