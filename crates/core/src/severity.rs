//! 심각도 분류 -- 취약점 심각도 레벨과 표시 속성
//!
//! [`Severity`]는 스캐너 벤더 문자열에서 파싱된 다섯 단계 심각도를 나타냅니다.
//! 각 레벨은 표시 글리프, 정렬 가중치, 표시 색상을 고정 매핑으로 가집니다.
//! 문자열 키 테이블 대신 enum 매핑을 사용하므로 미등록 심각도가
//! 렌더러까지 도달할 수 없습니다.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 취약점 심각도 레벨
///
/// 선언 순서가 정렬 가중치 순서입니다 (`Critical=0 < High < Medium < Low < Unknown=4`).
/// 가중치가 낮을수록 심각도가 높으며, 가중치 오름차순 정렬이
/// 심각도 내림차순 렌더링을 만듭니다.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// 치명적 -- 즉시 대응 필요
    Critical,
    /// 높은 심각도
    High,
    /// 중간 심각도
    Medium,
    /// 낮은 심각도
    Low,
    /// 분류 불가 (벤더 필드 누락 또는 미등록 문자열)
    #[default]
    Unknown,
}

/// 심각도 내림차순으로 나열된 보고서 테이블 대상 심각도 (Unknown 제외)
pub const REPORTABLE_SEVERITIES: [Severity; 4] = [
    Severity::Critical,
    Severity::High,
    Severity::Medium,
    Severity::Low,
];

impl Severity {
    /// 문자열에서 심각도를 파싱합니다 (대소문자 구분 없음).
    ///
    /// 미등록 문자열은 `None`을 반환합니다. 정규화 단계에서는
    /// `unwrap_or(Severity::Unknown)`으로 폴백합니다.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "CRITICAL" => Some(Self::Critical),
            "HIGH" => Some(Self::High),
            "MEDIUM" => Some(Self::Medium),
            "LOW" => Some(Self::Low),
            "UNKNOWN" => Some(Self::Unknown),
            _ => None,
        }
    }

    /// CVSS 점수를 심각도 구간으로 분류합니다.
    ///
    /// 구간 경계는 반개구간입니다:
    /// `[9.0, 10.0]` Critical, `[7.0, 9.0)` High, `[4.0, 7.0)` Medium,
    /// `(0, 4.0)` Low, 그 외 Unknown. 유효 범위(0-10) 밖의 점수는 어느
    /// 구간에도 속하지 않으므로 Unknown입니다.
    pub fn from_score(score: f64) -> Self {
        if (9.0..=10.0).contains(&score) {
            Self::Critical
        } else if (7.0..9.0).contains(&score) {
            Self::High
        } else if (4.0..7.0).contains(&score) {
            Self::Medium
        } else if score > 0.0 && score < 4.0 {
            Self::Low
        } else {
            Self::Unknown
        }
    }

    /// 정렬 가중치를 반환합니다 (Critical=0 .. Unknown=4).
    pub fn weight(&self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
            Self::Unknown => 4,
        }
    }

    /// 표시 글리프를 반환합니다.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Critical => "🔴",
            Self::High => "🟠",
            Self::Medium => "🟡",
            Self::Low => "🟢",
            Self::Unknown => "⚪",
        }
    }

    /// 표시 색상명을 반환합니다.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Critical => "red",
            Self::High => "orange",
            Self::Medium => "yellow",
            Self::Low => "green",
            Self::Unknown => "gray",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Critical => write!(f, "CRITICAL"),
            Self::High => write!(f, "HIGH"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::Low => write!(f, "LOW"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}
