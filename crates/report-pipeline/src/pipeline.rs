//! 파이프라인 오케스트레이터
//!
//! [`ReportPipeline`]은 스캔 파일 수집부터 보고서/내보내기 렌더링까지의
//! 전체 흐름을 소유합니다. 파일 단위 실패는 격리됩니다: 손상된 파일은
//! 경고 로그와 함께 건너뛰고 나머지 파일 처리를 계속합니다.
//!
//! 실행은 단일 스레드 동기 방식입니다. 입력 규모(파일 수십 개,
//! 레코드 수천 개)에서 병렬화는 복잡도만 더합니다.

use std::path::Path;

use tracing::{info, warn};

use crate::config::ReportConfig;
use crate::error::ReportPipelineError;
use crate::types::{ScanMetadata, VulnerabilityRecord};
use crate::{export, normalize, render, schema};

/// 수집 실행 요약
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestSummary {
    /// 성공적으로 처리된 파일 수
    pub files_processed: usize,
    /// 건너뛴 파일 수 (파싱 실패, 크기 초과 등)
    pub files_failed: usize,
    /// 수집된 총 레코드 수
    pub records: usize,
}

/// 보고서 파이프라인 -- 수집된 레코드와 메타데이터의 소유자
///
/// 레코드는 수집 순서(파일 순서, 파일 내 등장 순서)로 누적되며
/// 수집 후에는 수정되지 않습니다. 렌더링은 몇 번이든 반복할 수 있고
/// 상태를 바꾸지 않습니다.
pub struct ReportPipeline {
    config: ReportConfig,
    records: Vec<VulnerabilityRecord>,
    metadata: Vec<ScanMetadata>,
}

impl ReportPipeline {
    /// 검증된 설정으로 빈 파이프라인을 생성합니다.
    pub fn new(config: ReportConfig) -> Self {
        Self {
            config,
            records: Vec::new(),
            metadata: Vec::new(),
        }
    }

    /// 설정을 반환합니다.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// 지금까지 수집된 레코드를 반환합니다.
    pub fn records(&self) -> &[VulnerabilityRecord] {
        &self.records
    }

    /// 지금까지 수집된 스캔 메타데이터를 반환합니다.
    pub fn metadata(&self) -> &[ScanMetadata] {
        &self.metadata
    }

    /// 스캔 파일 하나를 수집합니다.
    ///
    /// 성공 시 이 파일에서 추가된 레코드 수를 반환합니다. 취약점이 없는
    /// 유효한 파일은 0을 반환하며 에러가 아닙니다.
    ///
    /// # Errors
    ///
    /// - [`ReportPipelineError::FileTooBig`]: 파일 크기가 설정 제한 초과
    /// - [`ReportPipelineError::Io`]: 파일 읽기 실패
    /// - [`ReportPipelineError::JsonParse`]: JSON 디코드 실패
    pub fn ingest_file(&mut self, path: &Path) -> Result<usize, ReportPipelineError> {
        let file_meta = std::fs::metadata(path).map_err(|e| ReportPipelineError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let size = file_meta.len() as usize;
        if size > self.config.max_file_size {
            return Err(ReportPipelineError::FileTooBig {
                path: path.display().to_string(),
                size,
                max: self.config.max_file_size,
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ReportPipelineError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        let doc: schema::ScanDocument =
            serde_json::from_str(&content).map_err(|e| ReportPipelineError::JsonParse {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let source_file = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        self.metadata.push(ScanMetadata {
            source_file: path.display().to_string(),
            schema_version: doc.schema_version,
            artifact_name: doc.artifact_name.clone(),
            artifact_type: doc.artifact_type.clone(),
            scan_time: resolve_scan_time(&doc, path),
        });

        let mut added = 0;
        for result in schema::adapt(&doc) {
            for vuln in result.vulnerabilities {
                self.records.push(normalize::normalize_entry(
                    vuln,
                    result.target,
                    &source_file,
                    &self.config.service_name,
                ));
                added += 1;
            }
        }

        info!(path = %path.display(), records = added, "scan file ingested");
        Ok(added)
    }

    /// 여러 스캔 파일을 수집합니다.
    ///
    /// 개별 파일 실패는 경고 로그 후 건너뛰며 나머지를 계속 처리합니다.
    pub fn ingest_all(&mut self, paths: &[impl AsRef<Path>]) -> IngestSummary {
        let mut summary = IngestSummary {
            files_processed: 0,
            files_failed: 0,
            records: 0,
        };

        for path in paths {
            let path = path.as_ref();
            match self.ingest_file(path) {
                Ok(added) => {
                    summary.files_processed += 1;
                    summary.records += added;
                }
                Err(error) => {
                    warn!(path = %path.display(), %error, "skipping scan file");
                    summary.files_failed += 1;
                }
            }
        }

        summary
    }

    /// 수집된 레코드에서 Markdown 보고서를 렌더링합니다.
    pub fn render_markdown(&self) -> String {
        render::render_markdown(&self.records, &self.metadata, &self.config.service_name)
    }

    /// 수집된 레코드에서 JSON 내보내기를 렌더링합니다.
    pub fn render_export(&self) -> Result<String, ReportPipelineError> {
        export::render_export(&self.records, &self.config.service_name)
    }
}

/// 스캔 시각을 최선 노력으로 결정합니다.
///
/// 문서의 타임스탬프 후보 필드가 우선이며, 없으면 파일이 위치한
/// 디렉토리의 수정 시각, 그것도 실패하면 현재 시각을 씁니다.
fn resolve_scan_time(doc: &schema::ScanDocument, path: &Path) -> String {
    if let Some(candidate) = doc.scan_time_candidate() {
        return candidate.to_owned();
    }

    if let Some(modified) = path
        .parent()
        .and_then(|dir| std::fs::metadata(dir).ok())
        .and_then(|m| m.modified().ok())
    {
        let timestamp: chrono::DateTime<chrono::Utc> = modified.into();
        return timestamp.format("%Y-%m-%dT%H:%M:%SZ").to_string();
    }

    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
