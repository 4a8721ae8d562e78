//! Markdown 보고서 렌더러
//!
//! 정규화된 레코드와 스캔 메타데이터에서 사람이 읽는 보안 보고서를
//! 생성합니다. 섹션 순서는 고정입니다:
//!
//! 1. 헤더 (서비스 라벨, 생성 시각, 총 개수)
//! 2. Executive Summary (위험 등급 문구)
//! 3. Severity Breakdown 표
//! 4. CVSS Analysis (CVSS 구조를 가진 레코드가 있을 때만)
//! 5. Detailed Findings (유효 점수 내림차순)
//! 6. Recommendations
//! 7. Scan Metadata
//!
//! 렌더링은 입력을 수정하지 않으며, 같은 입력과 같은 생성 시각에 대해
//! 항상 같은 바이트를 생성합니다.

use std::fmt::Write;

use vulnreport_core::REPORTABLE_SEVERITIES;

use crate::aggregate::{self, CvssStats, RiskTier};
use crate::types::{ScanMetadata, VulnerabilityRecord};

/// 상세 항목당 표시되는 최대 참고 URL 수
const MAX_REFERENCES_SHOWN: usize = 5;

/// Markdown 보고서를 렌더링합니다.
///
/// 생성 시각은 호출 시점의 UTC 현재 시각입니다. 레코드 목록이 비어
/// 있어도 모든 섹션을 가진 유효한 보고서를 생성합니다.
pub fn render_markdown(
    records: &[VulnerabilityRecord],
    metadata: &[ScanMetadata],
    service: &str,
) -> String {
    render_markdown_at(records, metadata, service, &now_utc())
}

fn now_utc() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// 명시된 생성 시각으로 보고서를 렌더링합니다.
///
/// 시각을 고정하면 출력이 입력에 대해 완전히 결정적입니다.
pub fn render_markdown_at(
    records: &[VulnerabilityRecord],
    metadata: &[ScanMetadata],
    service: &str,
    generated_at: &str,
) -> String {
    let mut out = String::with_capacity(4096 + records.len() * 512);

    render_header(&mut out, records.len(), service, generated_at);
    render_executive_summary(&mut out, records);
    render_severity_breakdown(&mut out, records);
    render_cvss_analysis(&mut out, records);
    render_detailed_findings(&mut out, records);
    render_recommendations(&mut out, records);
    render_scan_metadata(&mut out, metadata);

    out
}

fn render_header(out: &mut String, total: usize, service: &str, generated_at: &str) {
    out.push_str("# Security Vulnerability Report\n\n");
    if !service.is_empty() {
        let _ = writeln!(out, "**Service:** {service}\n");
    }
    let _ = writeln!(out, "**Generated:** {generated_at}\n");
    let _ = writeln!(out, "**Total Vulnerabilities:** {total}\n");
}

fn render_executive_summary(out: &mut String, records: &[VulnerabilityRecord]) {
    out.push_str("## Executive Summary\n\n");
    let tier = RiskTier::from_records(records);
    let _ = writeln!(out, "{}\n", tier.message());
}

fn render_severity_breakdown(out: &mut String, records: &[VulnerabilityRecord]) {
    out.push_str("## Severity Breakdown\n\n");
    out.push_str("| Severity | Count | Percentage |\n");
    out.push_str("|----------|-------|------------|\n");

    let counts = aggregate::severity_counts(records);
    let total = records.len();
    for severity in REPORTABLE_SEVERITIES {
        let count = counts.get(&severity).copied().unwrap_or(0);
        let percentage = if total == 0 {
            "0%".to_owned()
        } else {
            format!("{:.1}%", count as f64 / total as f64 * 100.0)
        };
        let _ = writeln!(
            out,
            "| {} {} | {} | {} |",
            severity.glyph(),
            severity,
            count,
            percentage
        );
    }
    out.push('\n');
}

fn render_cvss_analysis(out: &mut String, records: &[VulnerabilityRecord]) {
    let Some(stats) = CvssStats::compute(records) else {
        return;
    };

    out.push_str("## CVSS Analysis\n\n");
    let _ = writeln!(out, "- **Average Score:** {:.1}", stats.average);
    let _ = writeln!(out, "- **Maximum Score:** {:.1}", stats.max);
    out.push('\n');

    if !stats.distribution.is_empty() {
        out.push_str("### Score Distribution\n\n");
        out.push_str("| Range | Count |\n");
        out.push_str("|-------|-------|\n");
        for (bucket, count) in &stats.distribution {
            let _ = writeln!(out, "| {} | {} |", bucket.label(), count);
        }
        out.push('\n');
    }
}

fn render_detailed_findings(out: &mut String, records: &[VulnerabilityRecord]) {
    out.push_str("## Detailed Findings\n\n");
    if records.is_empty() {
        out.push_str("No vulnerabilities found.\n\n");
        return;
    }

    for record in sorted_for_display(records) {
        let _ = writeln!(out, "### {} {}\n", record.severity.glyph(), record.title);

        out.push_str("| Field | Value |\n");
        out.push_str("|-------|-------|\n");
        let _ = writeln!(out, "| Severity | {} |", record.severity);
        if let Some(cve) = &record.cve {
            let _ = writeln!(out, "| CVE | {cve} |");
        }
        let _ = writeln!(out, "| Package | {} |", record.location);
        if !record.target.is_empty() {
            let _ = writeln!(out, "| Target | {} |", record.target);
        }
        if let Some(installed) = &record.installed_version {
            let _ = writeln!(out, "| Installed Version | {installed} |");
        }
        if let Some(fixed) = &record.fixed_version {
            let _ = writeln!(out, "| Fixed Version | {fixed} |");
        }
        if let Some(cvss) = &record.cvss {
            if let Some(score) = cvss.effective_score() {
                let _ = writeln!(out, "| CVSS Score | {score:.1} |");
            }
            if let Some(vector) = cvss.v3_vector.as_deref().or(cvss.v2_vector.as_deref()) {
                let _ = writeln!(out, "| CVSS Vector | `{vector}` |");
            }
        }
        if let Some(published) = &record.published_date {
            let _ = writeln!(out, "| Published | {published} |");
        }
        if let Some(modified) = &record.last_modified_date {
            let _ = writeln!(out, "| Last Modified | {modified} |");
        }
        let _ = writeln!(out, "| Source | {} |", record.source_file);
        out.push('\n');

        if !record.description.is_empty() {
            let _ = writeln!(out, "> {}\n", record.description);
        }

        if !record.references.is_empty() {
            out.push_str("**References:**\n\n");
            for reference in record.references.iter().take(MAX_REFERENCES_SHOWN) {
                let _ = writeln!(out, "- {reference}");
            }
            out.push('\n');
        }
    }
}

/// 표시 순서로 정렬된 레코드 참조 목록을 반환합니다.
///
/// 유효 점수 내림차순, 동점이면 심각도 가중치 오름차순. 안정 정렬이므로
/// 남은 동점은 삽입 순서를 유지합니다.
fn sorted_for_display(records: &[VulnerabilityRecord]) -> Vec<&VulnerabilityRecord> {
    let mut sorted: Vec<&VulnerabilityRecord> = records.iter().collect();
    sorted.sort_by(|a, b| {
        b.effective_score()
            .partial_cmp(&a.effective_score())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.severity.weight().cmp(&b.severity.weight()))
    });
    sorted
}

fn render_recommendations(out: &mut String, records: &[VulnerabilityRecord]) {
    out.push_str("## Recommendations\n\n");
    out.push_str("- [ ] Review all critical and high severity findings\n");
    out.push_str("- [ ] Update affected packages to fixed versions where available\n");
    out.push_str("- [ ] Re-run the scan after remediation to confirm resolution\n");

    let fixable = aggregate::fixable_packages(records);
    if !fixable.is_empty() {
        out.push_str("\n### Upgrade Targets\n\n");
        for package in &fixable {
            let _ = writeln!(
                out,
                "- Upgrade `{}` to `{}` ({} finding{})",
                package.location,
                package.recommended,
                package.finding_count,
                if package.finding_count == 1 { "" } else { "s" }
            );
        }
    }
    out.push('\n');
}

fn render_scan_metadata(out: &mut String, metadata: &[ScanMetadata]) {
    out.push_str("## Scan Metadata\n\n");
    if metadata.is_empty() {
        out.push_str("No scan files were processed.\n");
        return;
    }

    for meta in metadata {
        let _ = writeln!(out, "**{}**\n", meta.source_file);
        if let Some(version) = meta.schema_version {
            let _ = writeln!(out, "- Schema Version: {version}");
        }
        if let Some(name) = &meta.artifact_name {
            let _ = writeln!(out, "- Artifact: {name}");
        }
        if let Some(kind) = &meta.artifact_type {
            let _ = writeln!(out, "- Artifact Type: {kind}");
        }
        let _ = writeln!(out, "- Scan Time: {}", meta.scan_time);
        out.push('\n');
    }
}
