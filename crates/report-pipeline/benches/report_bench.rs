//! 보고서 파이프라인 벤치마크
//!
//! 스캔 문서 파싱/정규화와 Markdown/JSON 렌더링 성능을 측정합니다.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use vulnreport_report_pipeline::types::{ScanMetadata, VulnerabilityRecord};
use vulnreport_report_pipeline::{export, normalize, render, schema};

/// count개 취약점을 가진 스캔 문서 JSON 생성
fn generate_scan_document(count: usize) -> String {
    let mut vulns = Vec::with_capacity(count);
    for i in 0..count {
        vulns.push(format!(
            r#"{{
                "VulnerabilityID": "CVE-2024-{:04}",
                "Title": "[lib] Vulnerability in package-{}",
                "Description": "Test vulnerability description number {}.",
                "Severity": "{}",
                "PkgName": "package-{}",
                "InstalledVersion": "1.{}.0",
                "FixedVersion": "1.{}.1",
                "PublishedDate": "2024-01-{:02}T00:00:00Z",
                "References": ["https://example.com/{}"],
                "CVSS": {{
                    "nvd": {{"V3Score": {}.{}, "V3Vector": "CVSS:3.1/AV:N/AC:L"}}
                }}
            }}"#,
            i,
            i % 50,
            i,
            ["CRITICAL", "HIGH", "MEDIUM", "LOW"][i % 4],
            i % 50,
            i % 100,
            i % 100,
            (i % 28) + 1,
            i,
            (i % 9) + 1,
            i % 10
        ));
    }

    format!(
        r#"{{
            "SchemaVersion": 2,
            "ArtifactName": "bench-artifact",
            "CreatedAt": "2024-01-15T09:00:00Z",
            "Results": [{{"Target": "bench-target", "Vulnerabilities": [{}]}}]
        }}"#,
        vulns.join(",")
    )
}

fn normalize_document(json: &str) -> Vec<VulnerabilityRecord> {
    let doc: schema::ScanDocument = serde_json::from_str(json).unwrap();
    let mut records = Vec::new();
    for result in schema::adapt(&doc) {
        for vuln in result.vulnerabilities {
            records.push(normalize::normalize_entry(
                vuln,
                result.target,
                "bench.json",
                "bench",
            ));
        }
    }
    records
}

fn bench_parse_and_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_and_normalize");

    for size in [10, 100, 1000].iter() {
        let json = generate_scan_document(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| normalize_document(black_box(&json)))
        });
    }

    group.finish();
}

fn bench_render_markdown(c: &mut Criterion) {
    let metadata = vec![ScanMetadata {
        source_file: "bench.json".to_owned(),
        schema_version: Some(2),
        artifact_name: Some("bench-artifact".to_owned()),
        artifact_type: None,
        scan_time: "2024-01-15T09:00:00Z".to_owned(),
    }];

    let mut group = c.benchmark_group("render_markdown");

    for size in [10, 100, 1000].iter() {
        let records = normalize_document(&generate_scan_document(*size));
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                render::render_markdown_at(
                    black_box(&records),
                    black_box(&metadata),
                    "bench",
                    "2024-01-15 09:00:00 UTC",
                )
            })
        });
    }

    group.finish();
}

fn bench_render_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_export");

    for size in [10, 100, 1000].iter() {
        let records = normalize_document(&generate_scan_document(*size));
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                export::render_export_at(black_box(&records), "bench", "2024-01-15T09:00:00Z")
                    .unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_parse_and_normalize,
    bench_render_markdown,
    bench_render_export
);
criterion_main!(benches);
