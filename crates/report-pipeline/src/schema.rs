//! 스키마 어댑터 -- 벤더 JSON 형태를 통일된 결과 목록으로 변환
//!
//! 스캐너 출력은 두 가지 최상위 형태로 들어옵니다:
//!
//! 1. `Results` 배열을 가진 문서 (각 항목에 `Target`과 `Vulnerabilities`)
//! 2. 최상위에 `Vulnerabilities` 배열을 직접 가진 평면 문서
//!    (암묵적 단일 결과로 취급)
//!
//! 두 형태 모두 serde 타입으로 한 번에 디코드되며, 이후 단계에서
//! 동적 키 탐색을 수행하지 않습니다. 어느 형태에도 해당하지 않는
//! 문서는 빈 결과 목록을 반환합니다 -- 결과 없는 스캔은 유효하며
//! 에러가 아닙니다.
//!
//! # JSON 형식 (형태 1)
//!
//! ```json
//! {
//!   "SchemaVersion": 2,
//!   "ArtifactName": "alpine:3.18",
//!   "ArtifactType": "container_image",
//!   "CreatedAt": "2024-01-15T09:00:00Z",
//!   "Results": [
//!     {
//!       "Target": "alpine:3.18 (alpine 3.18.0)",
//!       "Vulnerabilities": [{ "VulnerabilityID": "CVE-2024-1234", "Severity": "HIGH" }]
//!     }
//!   ]
//! }
//! ```

use serde::Deserialize;

/// 파싱된 스캔 문서 (두 가지 허용 형태의 합집합)
#[derive(Debug, Deserialize)]
pub struct ScanDocument {
    /// 스키마 버전
    #[serde(rename = "SchemaVersion")]
    pub schema_version: Option<i64>,
    /// 아티팩트 이름
    #[serde(rename = "ArtifactName")]
    pub artifact_name: Option<String>,
    /// 아티팩트 종류
    #[serde(rename = "ArtifactType")]
    pub artifact_type: Option<String>,
    /// 스캔 시각 후보 필드 (우선순위 순)
    #[serde(rename = "CreatedAt")]
    pub created_at: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at_camel: Option<String>,
    #[serde(rename = "created_at")]
    pub created_at_snake: Option<String>,
    /// 결과 목록 (형태 1)
    #[serde(rename = "Results")]
    pub results: Option<Vec<ResultEntry>>,
    /// 최상위 취약점 배열 (형태 2)
    #[serde(rename = "Vulnerabilities")]
    pub vulnerabilities: Option<Vec<VendorVulnerability>>,
}

impl ScanDocument {
    /// 고정 우선순위 후보 중 첫 번째로 채워진 타임스탬프 필드를 반환합니다.
    pub fn scan_time_candidate(&self) -> Option<&str> {
        [
            self.created_at.as_deref(),
            self.created_at_camel.as_deref(),
            self.created_at_snake.as_deref(),
        ]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
    }
}

/// 결과 객체 하나 (형태 1의 `Results` 항목)
#[derive(Debug, Deserialize)]
pub struct ResultEntry {
    /// 스캔 대상 식별자
    #[serde(rename = "Target")]
    pub target: Option<String>,
    /// 취약점 목록 (없으면 이 결과는 레코드를 만들지 않음)
    #[serde(rename = "Vulnerabilities")]
    pub vulnerabilities: Option<Vec<VendorVulnerability>>,
}

/// 벤더 취약점 항목 (정규화 전)
#[derive(Debug, Deserialize)]
pub struct VendorVulnerability {
    /// 취약점 식별자 (예: CVE-2024-1234)
    #[serde(rename = "VulnerabilityID")]
    pub vulnerability_id: Option<String>,
    /// 제목
    #[serde(rename = "Title")]
    pub title: Option<String>,
    /// 상세 설명
    #[serde(rename = "Description")]
    pub description: Option<String>,
    /// 벤더 심각도 문자열
    #[serde(rename = "Severity")]
    pub severity: Option<String>,
    /// 패키지 이름
    #[serde(rename = "PkgName")]
    pub pkg_name: Option<String>,
    /// 패키지 경로
    #[serde(rename = "PkgPath")]
    pub pkg_path: Option<String>,
    /// 설치된 버전
    #[serde(rename = "InstalledVersion")]
    pub installed_version: Option<String>,
    /// 수정 버전
    #[serde(rename = "FixedVersion")]
    pub fixed_version: Option<String>,
    /// 공개 일자 (원본 타임스탬프 문자열)
    #[serde(rename = "PublishedDate")]
    pub published_date: Option<String>,
    /// 최종 수정 일자 (원본 타임스탬프 문자열)
    #[serde(rename = "LastModifiedDate")]
    pub last_modified_date: Option<String>,
    /// 대표 참고 URL
    #[serde(rename = "PrimaryURL")]
    pub primary_url: Option<String>,
    /// 참고 URL 목록
    #[serde(rename = "References")]
    pub references: Option<Vec<String>>,
    /// 벤더별 중첩 CVSS 블록
    #[serde(rename = "CVSS")]
    pub cvss: Option<VendorCvss>,
    /// 직접 CVSS 점수 필드들
    #[serde(rename = "CvssScore")]
    pub cvss_score: Option<f64>,
    #[serde(rename = "CvssV3Score")]
    pub cvss_v3_score: Option<f64>,
    #[serde(rename = "CvssV2Score")]
    pub cvss_v2_score: Option<f64>,
    /// 데이터 소스 페이로드 (변형 없이 통과)
    #[serde(rename = "DataSource")]
    pub data_source: Option<serde_json::Value>,
}

/// 벤더별 중첩 CVSS 블록 (`CVSS.nvd`, `CVSS.redhat`)
#[derive(Debug, Deserialize)]
pub struct VendorCvss {
    /// NVD 점수 블록
    pub nvd: Option<CvssBlock>,
    /// Red Hat 점수 블록
    pub redhat: Option<CvssBlock>,
}

/// 단일 벤더의 CVSS 점수/벡터 묶음
#[derive(Debug, Default, Deserialize)]
pub struct CvssBlock {
    #[serde(rename = "V3Score")]
    pub v3_score: Option<f64>,
    #[serde(rename = "V3Vector")]
    pub v3_vector: Option<String>,
    #[serde(rename = "V2Score")]
    pub v2_score: Option<f64>,
    #[serde(rename = "V2Vector")]
    pub v2_vector: Option<String>,
}

/// 통일된 결과 뷰 -- 대상 식별자와 해당 취약점 목록
#[derive(Debug)]
pub struct ResultView<'a> {
    /// 스캔 대상 식별자 (없으면 빈 문자열)
    pub target: &'a str,
    /// 취약점 목록
    pub vulnerabilities: &'a [VendorVulnerability],
}

/// 문서를 통일된 결과 목록으로 변환합니다.
///
/// - `Results` 형태: 각 결과가 하나의 [`ResultView`]가 됩니다.
///   `Vulnerabilities`가 없는 결과는 건너뜁니다.
/// - 평면 형태: 아티팩트 이름을 대상으로 하는 암묵적 단일 결과가 됩니다.
/// - 어느 형태도 아니면 빈 목록을 반환합니다 (에러 아님).
pub fn adapt(doc: &ScanDocument) -> Vec<ResultView<'_>> {
    if let Some(results) = &doc.results {
        return results
            .iter()
            .filter_map(|entry| {
                entry.vulnerabilities.as_deref().map(|vulns| ResultView {
                    target: entry.target.as_deref().unwrap_or(""),
                    vulnerabilities: vulns,
                })
            })
            .collect();
    }

    if let Some(vulns) = &doc.vulnerabilities {
        return vec![ResultView {
            target: doc.artifact_name.as_deref().unwrap_or(""),
            vulnerabilities: vulns,
        }];
    }

    Vec::new()
}
