//! 도메인 타입 -- 정규화된 취약점 레코드와 스캔 메타데이터
//!
//! 벤더별 JSON 형태에서 정규화된 단일 표준 레코드를 정의합니다.
//! 레코드는 정규화 단계에서 한 번 생성된 뒤 집계와 렌더링에서
//! 여러 번 읽히며, 수정되거나 삭제되지 않습니다.

use std::fmt;

use serde::{Deserialize, Serialize};

use vulnreport_core::Severity;

/// CVSS 점수/벡터 묶음
///
/// 각 필드는 개별적으로 선택적입니다. 어떤 벤더 필드에서도 값이 나오지
/// 않으면 이 구조체 자체가 레코드에서 생략됩니다 (null 필드로 존재하지 않음).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CvssMetrics {
    /// CVSS v3 점수
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v3_score: Option<f64>,
    /// CVSS v3 벡터 문자열
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v3_vector: Option<String>,
    /// CVSS v2 점수
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v2_score: Option<f64>,
    /// CVSS v2 벡터 문자열
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v2_vector: Option<String>,
}

impl CvssMetrics {
    /// 모든 필드가 비어 있는지 반환합니다.
    pub fn is_empty(&self) -> bool {
        self.v3_score.is_none()
            && self.v3_vector.is_none()
            && self.v2_score.is_none()
            && self.v2_vector.is_none()
    }

    /// 유효 점수를 반환합니다 (v3 우선, 없으면 v2).
    pub fn effective_score(&self) -> Option<f64> {
        self.v3_score.or(self.v2_score)
    }
}

/// 정규화된 취약점 레코드
///
/// 벤더 스키마와 무관한 표준 형태입니다. 선택적 벤더 필드가 없으면
/// 레코드 필드도 없는 것으로 표현되며, 자리 표시 값을 쓰지 않습니다
/// (제목과 설명만 정의된 폴백을 가집니다).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VulnerabilityRecord {
    /// 호출자가 지정한 서비스 라벨
    pub service: String,
    /// 심각도
    pub severity: Severity,
    /// 제목 (항상 비어 있지 않음, 선행 대괄호 태그 제거됨)
    pub title: String,
    /// 상세 설명 (벤더 필드 누락 시 자리 표시 문구)
    pub description: String,
    /// 패키지/라이브러리 이름 (없으면 대상으로 폴백)
    pub location: String,
    /// 스캔 대상 아티팩트 식별자
    pub target: String,
    /// CVE 식별자
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cve: Option<String>,
    /// CVSS 점수/벡터 (어디에서도 점수가 나오지 않으면 전체 생략)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvss: Option<CvssMetrics>,
    /// 수정 버전
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_version: Option<String>,
    /// 설치된 버전
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installed_version: Option<String>,
    /// 공개 일자 (YYYY-MM-DD)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    /// 최종 수정 일자 (YYYY-MM-DD)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<String>,
    /// 참고 URL 목록 (중복 제거, 삽입 순서 유지)
    pub references: Vec<String>,
    /// 원본 파일명 (basename)
    pub source_file: String,
    /// 패키지 경로
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pkg_path: Option<String>,
    /// 벤더 데이터 소스 페이로드 (변형 없이 통과)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_source: Option<serde_json::Value>,
}

impl VulnerabilityRecord {
    /// 정렬용 유효 점수를 반환합니다 (v3, 없으면 v2, 없으면 0.0).
    pub fn effective_score(&self) -> f64 {
        self.cvss
            .as_ref()
            .and_then(CvssMetrics::effective_score)
            .unwrap_or(0.0)
    }
}

impl fmt::Display for VulnerabilityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {} (fixed: {})",
            self.severity,
            self.cve.as_deref().unwrap_or("N/A"),
            self.location,
            self.fixed_version.as_deref().unwrap_or("N/A"),
        )
    }
}

/// 스캔 메타데이터 -- 입력 파일당 하나
///
/// 파이프라인 실행이 소유하며 생성 후 수정되지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanMetadata {
    /// 원본 파일 경로
    pub source_file: String,
    /// 스키마 버전
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<i64>,
    /// 아티팩트 이름
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_name: Option<String>,
    /// 아티팩트 종류
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_type: Option<String>,
    /// 스캔 시각 (최선 노력 타임스탬프)
    pub scan_time: String,
}
