//! 에러 타입 — 도메인별 에러 정의

/// Vulnreport 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum VulnreportError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 입력 수집/변환 에러
    #[error("ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 입력 수집/변환 에러
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// 스캔 파일 읽기 실패
    #[error("read failed: {0}")]
    ReadFailed(String),

    /// 스캔 파일 파싱 실패
    #[error("parse failed: {0}")]
    ParseFailed(String),

    /// 입력 데이터 초과
    #[error("input too large: {size} bytes (max: {max})")]
    TooLarge { size: usize, max: usize },

    /// 내보내기 직렬화 실패
    #[error("export failed: {0}")]
    ExportFailed(String),
}
