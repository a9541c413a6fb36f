use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pkglint_core::diagnostics::SourceMap;
use pkglint_core::{resolve_exports, ResolveInput};
use serde_json::{json, Map, Value};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// A manifest with `n` conditional subpaths and one wildcard over `n` files.
fn fixture(n: usize) -> (String, BTreeSet<String>) {
    let mut exports = Map::new();
    exports.insert(
        ".".to_string(),
        json!({ "import": "./dist/index.mjs", "require": "./dist/index.cjs" }),
    );
    let mut shipped: BTreeSet<String> = ["dist/index.mjs", "dist/index.cjs", "package.json"]
        .iter()
        .map(|s| (*s).to_string())
        .collect();
    for i in 0..n {
        exports.insert(
            format!("./feature-{i}"),
            json!({
                "types": format!("./dist/feature-{i}.d.ts"),
                "node": { "import": format!("./dist/feature-{i}.mjs"), "require": format!("./dist/feature-{i}.cjs") },
                "default": format!("./dist/feature-{i}.mjs")
            }),
        );
        shipped.insert(format!("dist/feature-{i}.d.ts"));
        shipped.insert(format!("dist/feature-{i}.mjs"));
        shipped.insert(format!("dist/feature-{i}.cjs"));
        shipped.insert(format!("lib/module-{i}.js"));
    }
    exports.insert("./lib/*".to_string(), json!("./lib/*.js"));

    let manifest = json!({ "name": "bench", "exports": Value::Object(exports) });
    let text = serde_json::to_string_pretty(&manifest).unwrap();
    (text, shipped)
}

fn bench_resolve_exports(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_exports");

    for n in [10, 100, 1000] {
        let (text, shipped) = fixture(n);
        let manifest: Value = serde_json::from_str(&text).unwrap();
        let source = SourceMap::parse(&text).unwrap();

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                resolve_exports(black_box(&ResolveInput {
                    exports: &manifest["exports"],
                    package_root: Path::new("/bench"),
                    shipped: &shipped,
                    probe: &shipped,
                    source: &source,
                }))
            });
        });
    }

    group.finish();
}

fn bench_source_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("source_map_parse");

    for n in [10, 100, 1000] {
        let (text, _) = fixture(n);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &text, |b, text| {
            b.iter(|| SourceMap::parse(black_box(text)));
        });
    }

    group.finish();
}

fn bench_walk_files(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk_files");

    for n in [100, 1000] {
        let dir = tempdir().unwrap();
        for i in 0..n {
            let path = dir.path().join(format!("dist/chunk-{}/file-{i}.js", i % 16));
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "").unwrap();
        }

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &dir, |b, dir| {
            b.iter(|| pkglint_util::fs::walk_files(black_box(dir.path()), &["node_modules"]));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_resolve_exports, bench_source_map, bench_walk_files);
criterion_main!(benches);
