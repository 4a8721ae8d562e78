//! 집계 -- 레코드 컬렉션에서 파생 통계 계산
//!
//! 심각도별 개수, 위험 등급, CVSS 통계/분포, 수정 가능 패키지 그룹을
//! 필요 시점에 계산합니다. 입력 컬렉션은 읽기 전용입니다.

use std::collections::BTreeMap;

use vulnreport_core::Severity;

use crate::types::VulnerabilityRecord;

/// 심각도별 레코드 개수를 반환합니다.
///
/// 데이터에 존재하는 심각도만 포함합니다. 소비자는 없는 심각도를
/// 0으로 취급합니다. `BTreeMap`이므로 순회 순서는 심각도 내림차순
/// (Critical 먼저)으로 결정적입니다.
pub fn severity_counts(records: &[VulnerabilityRecord]) -> BTreeMap<Severity, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.severity).or_insert(0) += 1;
    }
    counts
}

/// 위험 등급 -- CRITICAL+HIGH 개수에서 파생된 요약 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskTier {
    /// 취약점 없음
    None,
    /// 취약점은 있으나 critical/high 없음
    LowMedium,
    /// critical+high 1-5개
    Moderate,
    /// critical+high 5개 초과
    High,
}

impl RiskTier {
    /// 레코드 컬렉션에서 위험 등급을 계산합니다.
    pub fn from_records(records: &[VulnerabilityRecord]) -> Self {
        let crit_high = records
            .iter()
            .filter(|r| matches!(r.severity, Severity::Critical | Severity::High))
            .count();
        Self::from_counts(records.len(), crit_high)
    }

    /// 전체 개수와 critical+high 개수에서 위험 등급을 계산합니다.
    pub fn from_counts(total: usize, crit_high: usize) -> Self {
        if total == 0 {
            Self::None
        } else if crit_high == 0 {
            Self::LowMedium
        } else if crit_high <= 5 {
            Self::Moderate
        } else {
            Self::High
        }
    }

    /// 보고서 Executive Summary에 쓰이는 문구를 반환합니다.
    pub fn message(&self) -> &'static str {
        match self {
            Self::None => "No known vulnerabilities were detected in this scan.",
            Self::LowMedium => {
                "No critical or high severity vulnerabilities were detected. \
                 Address remaining findings during regular maintenance."
            }
            Self::Moderate => {
                "A moderate number of critical or high severity vulnerabilities \
                 were detected and should be addressed soon."
            }
            Self::High => {
                "A high number of critical or high severity vulnerabilities \
                 were detected and require immediate remediation."
            }
        }
    }
}

/// CVSS 통계 -- `cvss` 구조를 가진 레코드에 대한 평균/최대/분포
#[derive(Debug, Clone, PartialEq)]
pub struct CvssStats {
    /// 유효 점수의 산술 평균 (소수 첫째 자리 반올림)
    pub average: f64,
    /// 유효 점수의 최댓값
    pub max: f64,
    /// 명명된 구간별 개수 (0인 구간은 제외)
    pub distribution: Vec<(DistributionBucket, usize)>,
}

/// CVSS 분포의 명명된 점수 구간
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistributionBucket {
    /// 9.0-10.0
    Critical,
    /// 7.0-8.9
    High,
    /// 4.0-6.9
    Medium,
    /// 0.1-3.9
    Low,
}

impl DistributionBucket {
    /// 표시 라벨을 반환합니다.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Critical => "Critical (9.0-10.0)",
            Self::High => "High (7.0-8.9)",
            Self::Medium => "Medium (4.0-6.9)",
            Self::Low => "Low (0.1-3.9)",
        }
    }

    fn from_severity(severity: Severity) -> Option<Self> {
        match severity {
            Severity::Critical => Some(Self::Critical),
            Severity::High => Some(Self::High),
            Severity::Medium => Some(Self::Medium),
            Severity::Low => Some(Self::Low),
            Severity::Unknown => None,
        }
    }
}

impl CvssStats {
    /// `cvss` 구조를 가진 레코드에서 통계를 계산합니다.
    ///
    /// 레코드별 유효 점수는 v3 점수, 없으면 v2 점수이며 둘 다 없으면
    /// 점수 집합에서 제외됩니다. 구조 자체를 가진 레코드가 하나도 없으면
    /// `None`을 반환합니다 (보고서의 CVSS 섹션이 생략됨).
    ///
    /// 분포는 [`Severity::from_score`]와 같은 경계 의미를 쓰므로
    /// 점수가 정확히 0인 레코드는 Low 구간에 포함되지 않습니다.
    pub fn compute(records: &[VulnerabilityRecord]) -> Option<Self> {
        if !records.iter().any(|r| r.cvss.is_some()) {
            return None;
        }

        let scores: Vec<f64> = records
            .iter()
            .filter_map(|r| r.cvss.as_ref())
            .filter_map(|c| c.effective_score())
            .collect();

        let (average, max) = if scores.is_empty() {
            (0.0, 0.0)
        } else {
            let sum: f64 = scores.iter().sum();
            let mean = sum / scores.len() as f64;
            let max = scores.iter().cloned().fold(f64::MIN, f64::max);
            ((mean * 10.0).round() / 10.0, max)
        };

        let mut buckets = [0usize; 4];
        for score in &scores {
            if let Some(bucket) = DistributionBucket::from_severity(Severity::from_score(*score)) {
                buckets[bucket as usize] += 1;
            }
        }

        let distribution = [
            DistributionBucket::Critical,
            DistributionBucket::High,
            DistributionBucket::Medium,
            DistributionBucket::Low,
        ]
        .into_iter()
        .filter_map(|b| {
            let count = buckets[b as usize];
            (count > 0).then_some((b, count))
        })
        .collect();

        Some(Self {
            average,
            max,
            distribution,
        })
    }
}

/// 수정 가능 패키지 -- 수정 버전이 명시된 레코드의 위치별 그룹
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixablePackage {
    /// 패키지/라이브러리 이름
    pub location: String,
    /// 권장 업그레이드 버전
    pub recommended: String,
    /// 그룹 내 레코드 수
    pub finding_count: usize,
}

/// 수정 버전이 비어 있지 않은 레코드를 `location`으로 그룹화합니다.
///
/// 권장 업그레이드 대상은 그룹 내 수정 버전 문자열의 사전순 최댓값입니다.
/// 사전순 비교는 의도적으로 단순하며 시맨틱 버저닝을 이해하지 못합니다
/// ("9.0"이 "10.0"보다 큰 것으로 비교됨) -- 원본 동작을 보존한 알려진
/// 한계입니다. 결과는 위치 이름 순으로 정렬됩니다.
pub fn fixable_packages(records: &[VulnerabilityRecord]) -> Vec<FixablePackage> {
    let mut groups: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for record in records {
        if let Some(fixed) = record.fixed_version.as_deref() {
            if !fixed.is_empty() {
                groups.entry(&record.location).or_default().push(fixed);
            }
        }
    }

    groups
        .into_iter()
        .map(|(location, versions)| {
            let recommended = versions
                .iter()
                .max()
                .copied()
                .unwrap_or_default()
                .to_owned();
            FixablePackage {
                location: location.to_owned(),
                recommended,
                finding_count: versions.len(),
            }
        })
        .collect()
}
