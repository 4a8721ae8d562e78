//! JSON 내보내기 -- 기계 소비용 구조화 출력
//!
//! 정규화된 레코드 전체와 요약 블록을 pretty-printed JSON 문서로
//! 직렬화합니다. 레코드는 정규화 단계가 만든 형태 그대로 나가며
//! 내보내기 단계에서 재가공하지 않습니다.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::aggregate;
use crate::error::ReportPipelineError;
use crate::types::VulnerabilityRecord;

/// 내보내기 문서 최상위 구조
#[derive(Debug, Serialize)]
struct ExportDocument<'a> {
    scan_summary: ScanSummary,
    vulnerabilities: &'a [VulnerabilityRecord],
}

/// 내보내기 요약 블록
#[derive(Debug, Serialize)]
struct ScanSummary {
    total_vulnerabilities: usize,
    /// 심각도 이름별 개수 (데이터에 존재하는 심각도만)
    severity_counts: BTreeMap<String, usize>,
    exported_at: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    service: String,
}

/// 레코드 컬렉션을 JSON 내보내기 문자열로 직렬화합니다.
///
/// 내보내기 시각은 호출 시점의 UTC 현재 시각입니다.
pub fn render_export(
    records: &[VulnerabilityRecord],
    service: &str,
) -> Result<String, ReportPipelineError> {
    render_export_at(
        records,
        service,
        &chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
    )
}

/// 명시된 내보내기 시각으로 직렬화합니다.
///
/// 시각을 고정하면 출력이 입력에 대해 완전히 결정적입니다.
pub fn render_export_at(
    records: &[VulnerabilityRecord],
    service: &str,
    exported_at: &str,
) -> Result<String, ReportPipelineError> {
    let severity_counts = aggregate::severity_counts(records)
        .into_iter()
        .map(|(severity, count)| (severity.to_string(), count))
        .collect();

    let document = ExportDocument {
        scan_summary: ScanSummary {
            total_vulnerabilities: records.len(),
            severity_counts,
            exported_at: exported_at.to_owned(),
            service: service.to_owned(),
        },
        vulnerabilities: records,
    };

    serde_json::to_string_pretty(&document)
        .map_err(|e| ReportPipelineError::Export(e.to_string()))
}
