//! Test helpers shared by the integration tests

#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging for tests (only once per test run)
pub fn init_test_logging() {
    INIT.call_once(|| {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_target(true)
                    .with_level(true),
            )
            .with(tracing_subscriber::filter::EnvFilter::from_default_env())
            .try_init();
    });
}

pub fn binary_path(name: &str, platform: &str, arch: &str, version: &str) -> String {
    let file = if platform == "windows" {
        format!("{name}.exe")
    } else {
        name.to_string()
    };
    format!("releases/binaries/{name}/{platform}/{arch}/{version}/{file}")
}

pub fn plugin_path(
    name: &str,
    platform: &str,
    arch: &str,
    platform_version: &str,
    patch: u32,
) -> String {
    format!(
        "releases/plugins/{name}/{platform}/{arch}/{name}-{platform_version}-patch.{patch}.zip"
    )
}

/// Serialize paths as an artifact document
pub fn artifact_document<S: AsRef<str>>(paths: &[S]) -> String {
    let paths: Vec<&str> = paths.iter().map(|p| p.as_ref()).collect();
    serde_json::json!({ "artifacts": paths }).to_string()
}

/// A release listing shaped like a real bucket dump, including a `latest` alias
pub fn release_listing() -> Vec<String> {
    let mut paths = Vec::new();
    for version in ["1.10.2", "1.11.0", "1.11.4", "1.12.0"] {
        for platform in ["linux", "darwin", "windows"] {
            paths.push(binary_path("dcos", platform, "x86-64", version));
        }
    }
    paths.push(binary_path("dcos", "linux", "x86-64", "latest"));
    for (platform_version, patch) in [("1.11", 3), ("1.12", 0), ("1.12", 1)] {
        for platform in ["linux", "darwin"] {
            paths.push(plugin_path("dcos-core-cli", platform, "x86-64", platform_version, patch));
        }
    }
    paths.push(plugin_path("dcos-enterprise-cli", "linux", "x86-64", "1.12", 2));
    paths
}

/// Write an artifact document into `dir` and return its path
pub fn write_document(dir: &Path, paths: &[String]) -> Result<PathBuf> {
    let file = dir.join("artifacts.json");
    fs::write(&file, artifact_document(paths))?;
    Ok(file)
}
