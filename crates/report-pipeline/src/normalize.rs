//! 취약점 정규화 -- 벤더 항목을 표준 레코드로 변환
//!
//! [`normalize_entry`]는 하나의 벤더 취약점 항목을 받아
//! [`VulnerabilityRecord`]를 생성합니다:
//!
//! - 심각도 대문자화 (누락/미등록 시 UNKNOWN)
//! - 제목 폴백 체인과 선행 대괄호 태그 제거
//! - 경쟁하는 벤더 CVSS 필드의 엄격한 우선순위 조정
//! - 타임스탬프의 달력 날짜 변환 (실패 시 조용히 생략)
//! - 참고 URL 중복 제거 (최초 등장 순서 유지)

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use vulnreport_core::Severity;

use crate::schema::VendorVulnerability;
use crate::types::{CvssMetrics, VulnerabilityRecord};

/// 설명 필드 누락 시 사용하는 자리 표시 문구
pub const DESCRIPTION_PLACEHOLDER: &str = "No description available.";

/// 제목 폴백 체인의 최종 문구
const TITLE_FALLBACK: &str = "Unknown vulnerability";

/// 벤더 취약점 항목 하나를 표준 레코드로 정규화합니다.
///
/// `target`은 해당 결과 객체의 대상 식별자, `source_file`은 원본 파일의
/// basename, `service`는 호출자가 지정한 서비스 라벨입니다.
pub fn normalize_entry(
    vuln: &VendorVulnerability,
    target: &str,
    source_file: &str,
    service: &str,
) -> VulnerabilityRecord {
    let severity = vuln
        .severity
        .as_deref()
        .and_then(Severity::from_str_loose)
        .unwrap_or(Severity::Unknown);

    let raw_title = vuln
        .title
        .as_deref()
        .or(vuln.vulnerability_id.as_deref())
        .unwrap_or(TITLE_FALLBACK);
    let title = clean_title(raw_title);

    let description = vuln
        .description
        .clone()
        .unwrap_or_else(|| DESCRIPTION_PLACEHOLDER.to_owned());

    let location = vuln
        .pkg_name
        .clone()
        .unwrap_or_else(|| target.to_owned());

    VulnerabilityRecord {
        service: service.to_owned(),
        severity,
        title,
        description,
        location,
        target: target.to_owned(),
        cve: vuln.vulnerability_id.clone(),
        cvss: reconcile_cvss(vuln),
        fixed_version: vuln.fixed_version.clone(),
        installed_version: vuln.installed_version.clone(),
        published_date: vuln.published_date.as_deref().and_then(to_calendar_date),
        last_modified_date: vuln
            .last_modified_date
            .as_deref()
            .and_then(to_calendar_date),
        references: collect_references(vuln),
        source_file: source_file.to_owned(),
        pkg_path: vuln.pkg_path.clone(),
        data_source: vuln.data_source.clone(),
    }
}

/// 선행 대괄호 태그(`[word/space chars] `)를 제거하고 양끝 공백을 정리합니다.
///
/// 태그 제거가 먼저이고 공백 정리가 나중입니다 -- 태그 패턴이 요구하는
/// 후행 공백을 정리가 먼저 지우면 `"[tag] "` 같은 제목이 매칭을 놓칩니다.
/// 정리 결과가 비면 폴백 문구를 사용합니다 -- 제목은 절대 비지 않습니다.
fn clean_title(raw: &str) -> String {
    let stripped = strip_bracket_tag(raw.trim_start()).trim();
    if stripped.is_empty() {
        TITLE_FALLBACK.to_owned()
    } else {
        stripped.to_owned()
    }
}

/// `[tag] ` 형태의 선행 태그를 제거합니다.
///
/// 태그 본문은 단어 문자와 공백만 허용합니다. 매칭되지 않으면 원본을
/// 그대로 반환합니다.
fn strip_bracket_tag(s: &str) -> &str {
    let Some(rest) = s.strip_prefix('[') else {
        return s;
    };
    let Some(close) = rest.find(']') else {
        return s;
    };
    let tag = &rest[..close];
    if tag.is_empty() || !tag.chars().all(|c| c.is_alphanumeric() || c == '_' || c == ' ') {
        return s;
    }
    let after = &rest[close + 1..];
    // 태그 뒤에는 공백이 따라와야 제목 본문으로 인정
    match after.strip_prefix(' ') {
        Some(body) => body,
        None => s,
    }
}

/// 경쟁하는 벤더 CVSS 필드를 엄격한 우선순위로 조정합니다.
///
/// 낮은 우선순위 소스는 상위 소스가 비워 둔 필드만 채웁니다:
///
/// 1. `CVSS.nvd.V3Score`/`V3Vector` -> v3 필드
/// 2. `CVSS.redhat.V2Score`/`V2Vector` -> v2 필드 (대응하는 v3 필드가 빈 경우에만)
/// 3. `CvssScore` 또는 `CvssV3Score` -> v3 점수 (아직 빈 경우)
/// 4. `CvssV2Score` -> v2 점수 (아직 빈 경우)
///
/// 어느 필드에서도 값이 나오지 않으면 `None`을 반환합니다 --
/// 빈 구조체가 아니라 구조체 자체가 생략됩니다.
fn reconcile_cvss(vuln: &VendorVulnerability) -> Option<CvssMetrics> {
    let mut metrics = CvssMetrics::default();

    if let Some(nested) = &vuln.cvss {
        if let Some(nvd) = &nested.nvd {
            metrics.v3_score = nvd.v3_score;
            metrics.v3_vector = nvd.v3_vector.clone();
        }
        if let Some(redhat) = &nested.redhat {
            if metrics.v3_score.is_none() {
                metrics.v2_score = redhat.v2_score;
            }
            if metrics.v3_vector.is_none() {
                metrics.v2_vector = redhat.v2_vector.clone();
            }
        }
    }

    if metrics.v3_score.is_none() {
        metrics.v3_score = vuln.cvss_score.or(vuln.cvss_v3_score);
    }
    if metrics.v2_score.is_none() {
        metrics.v2_score = vuln.cvss_v2_score;
    }

    if metrics.is_empty() {
        None
    } else {
        Some(metrics)
    }
}

/// 타임스탬프 문자열을 달력 날짜(`YYYY-MM-DD`)로 변환합니다.
///
/// RFC 3339, 오프셋 없는 `%Y-%m-%dT%H:%M:%S`, 순수 날짜 순으로 시도하며
/// 모두 실패하면 `None`입니다 -- 에러로 표면화하지 않습니다.
fn to_calendar_date(raw: &str) -> Option<String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.format("%Y-%m-%d").to_string());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.format("%Y-%m-%d").to_string());
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d.format("%Y-%m-%d").to_string());
    }
    None
}

/// `References` 배열과 `PrimaryURL`을 이어 붙이고 최초 등장 순서를
/// 유지하며 중복을 제거합니다.
fn collect_references(vuln: &VendorVulnerability) -> Vec<String> {
    let mut seen = Vec::new();
    let candidates = vuln
        .references
        .iter()
        .flatten()
        .chain(vuln.primary_url.iter());

    for url in candidates {
        if !url.is_empty() && !seen.contains(url) {
            seen.push(url.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vendor(json: &str) -> VendorVulnerability {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn severity_uppercased_and_mapped() {
        let v = vendor(r#"{"Severity": "critical"}"#);
        let record = normalize_entry(&v, "app", "scan.json", "");
        assert_eq!(record.severity, Severity::Critical);
    }

    #[test]
    fn missing_severity_maps_to_unknown() {
        let v = vendor(r#"{}"#);
        let record = normalize_entry(&v, "app", "scan.json", "");
        assert_eq!(record.severity, Severity::Unknown);
    }

    #[test]
    fn unrecognized_severity_maps_to_unknown() {
        let v = vendor(r#"{"Severity": "negligible"}"#);
        let record = normalize_entry(&v, "app", "scan.json", "");
        assert_eq!(record.severity, Severity::Unknown);
    }

    #[test]
    fn title_prefers_vendor_title() {
        let v = vendor(r#"{"Title": "Heap overflow", "VulnerabilityID": "CVE-1"}"#);
        let record = normalize_entry(&v, "app", "scan.json", "");
        assert_eq!(record.title, "Heap overflow");
    }

    #[test]
    fn title_falls_back_to_id_then_literal() {
        let v = vendor(r#"{"VulnerabilityID": "CVE-2024-1"}"#);
        let record = normalize_entry(&v, "app", "scan.json", "");
        assert_eq!(record.title, "CVE-2024-1");

        let v = vendor(r#"{}"#);
        let record = normalize_entry(&v, "app", "scan.json", "");
        assert_eq!(record.title, "Unknown vulnerability");
    }

    #[test]
    fn title_strips_leading_bracket_tag() {
        let v = vendor(r#"{"Title": "[alpine] musl: out-of-bounds read"}"#);
        let record = normalize_entry(&v, "app", "scan.json", "");
        assert_eq!(record.title, "musl: out-of-bounds read");

        // tags may contain spaces
        let v = vendor(r#"{"Title": "[alpine edge] musl: out-of-bounds read"}"#);
        let record = normalize_entry(&v, "app", "scan.json", "");
        assert_eq!(record.title, "musl: out-of-bounds read");
    }

    #[test]
    fn title_keeps_non_matching_bracket() {
        // tags with punctuation do not match the word/space pattern
        let v = vendor(r#"{"Title": "[CVE-2024-1!] details"}"#);
        let record = normalize_entry(&v, "app", "scan.json", "");
        assert_eq!(record.title, "[CVE-2024-1!] details");

        let v = vendor(r#"{"Title": "[alpine 3.18] musl: out-of-bounds read"}"#);
        let record = normalize_entry(&v, "app", "scan.json", "");
        assert_eq!(record.title, "[alpine 3.18] musl: out-of-bounds read");
    }

    #[test]
    fn title_never_empty_after_stripping() {
        // the trailing space the tag pattern requires must survive until
        // stripping runs, leaving an empty remainder that takes the fallback
        let v = vendor(r#"{"Title": "[tag] "}"#);
        let record = normalize_entry(&v, "app", "scan.json", "");
        assert_eq!(record.title, "Unknown vulnerability");
    }

    #[test]
    fn title_strip_runs_before_whitespace_cleanup() {
        let v = vendor(r#"{"Title": "  [alpine] musl: out-of-bounds read  "}"#);
        let record = normalize_entry(&v, "app", "scan.json", "");
        assert_eq!(record.title, "musl: out-of-bounds read");
    }

    #[test]
    fn description_placeholder_when_absent() {
        let v = vendor(r#"{}"#);
        let record = normalize_entry(&v, "app", "scan.json", "");
        assert_eq!(record.description, DESCRIPTION_PLACEHOLDER);
    }

    #[test]
    fn location_prefers_pkg_name_falls_back_to_target() {
        let v = vendor(r#"{"PkgName": "libfoo"}"#);
        let record = normalize_entry(&v, "app", "scan.json", "");
        assert_eq!(record.location, "libfoo");

        let v = vendor(r#"{}"#);
        let record = normalize_entry(&v, "app", "scan.json", "");
        assert_eq!(record.location, "app");
    }

    #[test]
    fn cvss_nvd_v3_wins() {
        let v = vendor(
            r#"{
                "CVSS": {"nvd": {"V3Score": 9.8, "V3Vector": "CVSS:3.1/AV:N"}},
                "CvssScore": 5.0,
                "CvssV2Score": 4.0
            }"#,
        );
        let record = normalize_entry(&v, "app", "scan.json", "");
        let cvss = record.cvss.unwrap();
        assert_eq!(cvss.v3_score, Some(9.8));
        assert_eq!(cvss.v3_vector.as_deref(), Some("CVSS:3.1/AV:N"));
        // direct CvssV2Score still fills the empty v2 slot
        assert_eq!(cvss.v2_score, Some(4.0));
    }

    #[test]
    fn cvss_redhat_v2_fills_only_when_v3_empty() {
        let v = vendor(
            r#"{"CVSS": {
                "nvd": {"V3Score": 9.8},
                "redhat": {"V2Score": 7.2, "V2Vector": "AV:N/AC:L"}
            }}"#,
        );
        let record = normalize_entry(&v, "app", "scan.json", "");
        let cvss = record.cvss.unwrap();
        // v3 score present, so redhat v2 score is not taken
        assert_eq!(cvss.v2_score, None);
        // v3 vector empty, so redhat v2 vector is taken
        assert_eq!(cvss.v2_vector.as_deref(), Some("AV:N/AC:L"));
    }

    #[test]
    fn cvss_redhat_v2_taken_when_no_nvd() {
        let v = vendor(r#"{"CVSS": {"redhat": {"V2Score": 6.8, "V2Vector": "AV:N"}}}"#);
        let record = normalize_entry(&v, "app", "scan.json", "");
        let cvss = record.cvss.unwrap();
        assert_eq!(cvss.v2_score, Some(6.8));
        assert_eq!(cvss.v3_score, None);
    }

    #[test]
    fn cvss_direct_score_fields_fill_remaining() {
        let v = vendor(r#"{"CvssV3Score": 8.1, "CvssV2Score": 6.5}"#);
        let record = normalize_entry(&v, "app", "scan.json", "");
        let cvss = record.cvss.unwrap();
        assert_eq!(cvss.v3_score, Some(8.1));
        assert_eq!(cvss.v2_score, Some(6.5));
    }

    #[test]
    fn cvss_score_preferred_over_cvss_v3_score() {
        let v = vendor(r#"{"CvssScore": 7.0, "CvssV3Score": 8.0}"#);
        let record = normalize_entry(&v, "app", "scan.json", "");
        assert_eq!(record.cvss.unwrap().v3_score, Some(7.0));
    }

    #[test]
    fn cvss_absent_when_no_field_yields_value() {
        let v = vendor(r#"{"Severity": "LOW", "CVSS": {}}"#);
        let record = normalize_entry(&v, "app", "scan.json", "");
        assert!(record.cvss.is_none(), "empty structure must be omitted");
    }

    #[test]
    fn dates_formatted_as_calendar_dates() {
        let v = vendor(
            r#"{
                "PublishedDate": "2023-04-14T14:15:00Z",
                "LastModifiedDate": "2023-05-01T09:30:00.5+02:00"
            }"#,
        );
        let record = normalize_entry(&v, "app", "scan.json", "");
        assert_eq!(record.published_date.as_deref(), Some("2023-04-14"));
        assert_eq!(record.last_modified_date.as_deref(), Some("2023-05-01"));
    }

    #[test]
    fn unparseable_date_yields_none() {
        let v = vendor(r#"{"PublishedDate": "not a date"}"#);
        let record = normalize_entry(&v, "app", "scan.json", "");
        assert_eq!(record.published_date, None);
    }

    #[test]
    fn bare_date_accepted() {
        let v = vendor(r#"{"PublishedDate": "2023-04-14"}"#);
        let record = normalize_entry(&v, "app", "scan.json", "");
        assert_eq!(record.published_date.as_deref(), Some("2023-04-14"));
    }

    #[test]
    fn references_dedup_preserving_order() {
        let v = vendor(
            r#"{
                "References": [
                    "https://a.example/1",
                    "https://b.example/2",
                    "https://a.example/1"
                ],
                "PrimaryURL": "https://b.example/2"
            }"#,
        );
        let record = normalize_entry(&v, "app", "scan.json", "");
        assert_eq!(
            record.references,
            vec!["https://a.example/1", "https://b.example/2"]
        );
    }

    #[test]
    fn primary_url_appended_when_new() {
        let v = vendor(r#"{"References": ["https://a.example/1"], "PrimaryURL": "https://p.example"}"#);
        let record = normalize_entry(&v, "app", "scan.json", "");
        assert_eq!(
            record.references,
            vec!["https://a.example/1", "https://p.example"]
        );
    }

    #[test]
    fn passthrough_fields_preserved() {
        let v = vendor(
            r#"{
                "VulnerabilityID": "CVE-2024-9",
                "PkgName": "openssl",
                "PkgPath": "usr/lib/libssl.so",
                "InstalledVersion": "3.0.8",
                "FixedVersion": "3.0.9",
                "DataSource": {"ID": "nvd"}
            }"#,
        );
        let record = normalize_entry(&v, "debian:12", "scan.json", "payments");
        assert_eq!(record.cve.as_deref(), Some("CVE-2024-9"));
        assert_eq!(record.pkg_path.as_deref(), Some("usr/lib/libssl.so"));
        assert_eq!(record.installed_version.as_deref(), Some("3.0.8"));
        assert_eq!(record.fixed_version.as_deref(), Some("3.0.9"));
        assert_eq!(record.target, "debian:12");
        assert_eq!(record.service, "payments");
        assert_eq!(record.source_file, "scan.json");
        assert!(record.data_source.is_some());
    }
}
