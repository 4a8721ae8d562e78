//! 보고서 파이프라인 에러 타입
//!
//! [`ReportPipelineError`]는 파이프라인 내에서 발생할 수 있는 모든 에러를 나타냅니다.
//! `From<ReportPipelineError> for VulnreportError` 구현을 통해 `?` 연산자로
//! 상위 에러 타입으로 자연스럽게 전파됩니다.
//!
//! # 에러 카테고리
//!
//! - **JSON 파싱**: `JsonParse` -- 파일 단위로 격리되어 해당 파일만 건너뜁니다
//! - **설정**: `Config`
//! - **내보내기**: `Export`
//! - **파일 I/O**: `Io`, `FileTooBig`
//!
//! 날짜 파싱 실패와 누락된 선택적 벤더 필드는 에러가 아니며,
//! 정규화 단계에서 `None`으로 표현됩니다.

use vulnreport_core::error::{ConfigError, IngestError, VulnreportError};

/// 보고서 파이프라인 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum ReportPipelineError {
    /// 스캔 파일 JSON 파싱 실패
    #[error("json parse error: {path}: {reason}")]
    JsonParse {
        /// 파싱 대상 파일 경로
        path: String,
        /// 파싱 실패 사유
        reason: String,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// JSON 내보내기 직렬화 실패
    #[error("export error: {0}")]
    Export(String),

    /// 파일 I/O 에러
    #[error("io error: {path}: {source}")]
    Io {
        /// 관련 파일 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },

    /// 파일 크기 초과
    #[error("file too large: {path}: {size} bytes (max: {max})")]
    FileTooBig {
        /// 파일 경로
        path: String,
        /// 실제 파일 크기 (바이트)
        size: usize,
        /// 최대 허용 크기 (바이트)
        max: usize,
    },
}

impl From<ReportPipelineError> for VulnreportError {
    fn from(err: ReportPipelineError) -> Self {
        match err {
            ReportPipelineError::JsonParse { path, reason } => VulnreportError::Ingest(
                IngestError::ParseFailed(format!("json parse error: {path}: {reason}")),
            ),
            ReportPipelineError::Config { field, reason } => {
                VulnreportError::Config(ConfigError::InvalidValue { field, reason })
            }
            ReportPipelineError::Export(msg) => {
                VulnreportError::Ingest(IngestError::ExportFailed(msg))
            }
            ReportPipelineError::Io { path, source } => VulnreportError::Ingest(
                IngestError::ReadFailed(format!("io error: {path}: {source}")),
            ),
            ReportPipelineError::FileTooBig { size, max, .. } => {
                VulnreportError::Ingest(IngestError::TooLarge { size, max })
            }
        }
    }
}
