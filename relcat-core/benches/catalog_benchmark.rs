//! Benchmarks for loading and querying a large artifact catalog

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use relcat_core::artifact::{ArtifactFilter, Platform};
use relcat_core::catalog::CatalogLoader;

fn large_document() -> String {
    let mut paths = Vec::new();
    for major in 0..4 {
        for minor in 0..20 {
            for patch in 0..10 {
                for platform in ["linux", "darwin", "windows"] {
                    let file = if platform == "windows" { "dcos.exe" } else { "dcos" };
                    paths.push(format!(
                        "releases/binaries/dcos/{platform}/x86-64/{major}.{minor}.{patch}/{file}"
                    ));
                }
            }
            for patch in 0..5 {
                paths.push(format!(
                    "releases/plugins/dcos-core-cli/linux/x86-64/dcos-core-cli-{major}.{minor}-patch.{patch}.zip"
                ));
            }
        }
    }
    serde_json::json!({ "artifacts": paths }).to_string()
}

fn bench_load(c: &mut Criterion) {
    let document = large_document();
    let loader = CatalogLoader::default();

    c.bench_function("load_catalog", |b| {
        b.iter(|| loader.load_str(black_box(&document)).unwrap())
    });
}

fn bench_queries(c: &mut Criterion) {
    let loaded = CatalogLoader::default()
        .load_str(&large_document())
        .unwrap();
    let collection = loaded.collection;

    c.bench_function("binary_facets", |b| {
        b.iter(|| {
            let binaries = collection.binaries();
            black_box(binaries.minor_versions());
            black_box(binaries.patch_versions());
        })
    });

    let filter = ArtifactFilter::new()
        .with_platform(Platform::Linux)
        .with_name("dcos")
        .with_release("2.7");
    c.bench_function("filter_binaries", |b| {
        b.iter(|| black_box(collection.binaries().filter(black_box(&filter)).len()))
    });
}

criterion_group!(benches, bench_load, bench_queries);
criterion_main!(benches);
