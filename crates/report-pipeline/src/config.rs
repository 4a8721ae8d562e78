//! 보고서 파이프라인 설정
//!
//! [`ReportConfig`]는 파이프라인 실행에 필요한 설정을 담습니다:
//! 서비스 라벨, 인식 대상 스캔 파일명 목록, 출력 경로, 파일 크기 제한.
//!
//! # 사용 예시
//!
//! ```
//! use vulnreport_report_pipeline::ReportConfig;
//!
//! // 기본값으로 생성
//! let config = ReportConfig::default();
//! config.validate().unwrap();
//!
//! // 빌더로 생성
//! use vulnreport_report_pipeline::ReportConfigBuilder;
//!
//! let config = ReportConfigBuilder::new()
//!     .service_name("payments")
//!     .output_dir("reports")
//!     .build()
//!     .unwrap();
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ReportPipelineError;

/// 보고서 파이프라인 설정
///
/// # 필드
///
/// - **service_name**: 보고서 헤더에 표시되는 서비스 라벨 (비어 있으면 생략)
/// - **scan_filenames**: 탐색 시 인식하는 스캔 결과 파일명 목록
/// - **output_dir**: 출력 디렉토리
/// - **report_filename**: Markdown 보고서 파일명
/// - **export_filename**: JSON 내보내기 파일명
/// - **max_file_size**: 스캔 파일 최대 크기 (바이트)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// 서비스 라벨
    pub service_name: String,
    /// 인식 대상 스캔 결과 파일명
    pub scan_filenames: Vec<String>,
    /// 출력 디렉토리
    pub output_dir: String,
    /// Markdown 보고서 파일명
    pub report_filename: String,
    /// JSON 내보내기 파일명
    pub export_filename: String,
    /// 스캔 파일 최대 허용 크기 (바이트)
    pub max_file_size: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            service_name: String::new(),
            scan_filenames: vec![
                "trivy-report.json".to_owned(),
                "scan-report.json".to_owned(),
                "scan-results.json".to_owned(),
                "vulnerability-report.json".to_owned(),
            ],
            output_dir: "reports".to_owned(),
            report_filename: "security-report.md".to_owned(),
            export_filename: "vulnerability-export.json".to_owned(),
            max_file_size: 50 * 1024 * 1024, // 50 MB
        }
    }
}

/// 설정 상한값 상수
const MAX_FILE_SIZE: usize = 100 * 1024 * 1024; // 100 MB
const MAX_PATH_LEN: usize = 4096;

impl ReportConfig {
    /// TOML 파일에서 설정을 로드합니다.
    ///
    /// 파일에 없는 필드는 기본값을 사용하며, 로드 후 `validate()`를 수행합니다.
    pub fn load(path: &std::path::Path) -> Result<Self, ReportPipelineError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ReportPipelineError::Io {
                path: path.display().to_string(),
                source: e,
            })?;

        let config: Self = toml::from_str(&content).map_err(|e| ReportPipelineError::Config {
            field: path.display().to_string(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// 설정 값의 유효성을 검증합니다.
    ///
    /// # 검증 규칙
    ///
    /// - `scan_filenames`: 하나 이상 필요, 빈 문자열 및 경로 구분자 불가
    /// - `output_dir`: 비어 있으면 안 되고 `..` 패턴 불가
    /// - `report_filename` / `export_filename`: 비어 있으면 안 됨
    /// - `max_file_size`: 1-104857600 (100MB)
    pub fn validate(&self) -> Result<(), ReportPipelineError> {
        if self.scan_filenames.is_empty() {
            return Err(ReportPipelineError::Config {
                field: "scan_filenames".to_owned(),
                reason: "at least one recognized scan filename required".to_owned(),
            });
        }

        for name in &self.scan_filenames {
            if name.is_empty() {
                return Err(ReportPipelineError::Config {
                    field: "scan_filenames".to_owned(),
                    reason: "scan filename must not be empty".to_owned(),
                });
            }
            if name.contains('/') || name.contains('\\') {
                return Err(ReportPipelineError::Config {
                    field: "scan_filenames".to_owned(),
                    reason: format!("scan filename '{}' must not contain path separators", name),
                });
            }
        }

        if self.output_dir.is_empty() {
            return Err(ReportPipelineError::Config {
                field: "output_dir".to_owned(),
                reason: "output_dir must not be empty".to_owned(),
            });
        }

        // Path traversal 체크: Path::components()로 정확하게 ParentDir 컴포넌트 검출
        if std::path::Path::new(&self.output_dir)
            .components()
            .any(|c| c == std::path::Component::ParentDir)
        {
            return Err(ReportPipelineError::Config {
                field: "output_dir".to_owned(),
                reason: "output_dir contains path traversal pattern '..'".to_owned(),
            });
        }

        if self.output_dir.len() > MAX_PATH_LEN {
            return Err(ReportPipelineError::Config {
                field: "output_dir".to_owned(),
                reason: format!("output_dir exceeds maximum length {}", MAX_PATH_LEN),
            });
        }

        if self.report_filename.is_empty() {
            return Err(ReportPipelineError::Config {
                field: "report_filename".to_owned(),
                reason: "report_filename must not be empty".to_owned(),
            });
        }

        if self.export_filename.is_empty() {
            return Err(ReportPipelineError::Config {
                field: "export_filename".to_owned(),
                reason: "export_filename must not be empty".to_owned(),
            });
        }

        if self.max_file_size == 0 || self.max_file_size > MAX_FILE_SIZE {
            return Err(ReportPipelineError::Config {
                field: "max_file_size".to_owned(),
                reason: format!("must be 1-{MAX_FILE_SIZE}"),
            });
        }

        Ok(())
    }
}

/// [`ReportConfig`] 빌더
///
/// 유연한 설정 구성 및 빌드 시 유효성 검증을 제공합니다.
#[derive(Default)]
pub struct ReportConfigBuilder {
    config: ReportConfig,
}

impl ReportConfigBuilder {
    /// 기본값을 가진 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 서비스 라벨을 설정합니다.
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.config.service_name = name.into();
        self
    }

    /// 인식 대상 스캔 파일명 목록을 설정합니다.
    pub fn scan_filenames(mut self, names: Vec<String>) -> Self {
        self.config.scan_filenames = names;
        self
    }

    /// 출력 디렉토리를 설정합니다.
    pub fn output_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    /// Markdown 보고서 파일명을 설정합니다.
    pub fn report_filename(mut self, name: impl Into<String>) -> Self {
        self.config.report_filename = name.into();
        self
    }

    /// JSON 내보내기 파일명을 설정합니다.
    pub fn export_filename(mut self, name: impl Into<String>) -> Self {
        self.config.export_filename = name.into();
        self
    }

    /// 최대 파일 크기(바이트)를 설정합니다.
    pub fn max_file_size(mut self, size: usize) -> Self {
        self.config.max_file_size = size;
        self
    }

    /// 설정을 검증하고 빌드합니다.
    ///
    /// # Errors
    ///
    /// 유효성 검증 실패 시 `ReportPipelineError::Config` 반환
    pub fn build(self) -> Result<ReportConfig, ReportPipelineError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
