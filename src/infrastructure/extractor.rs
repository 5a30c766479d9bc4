//! 文档抽取器 - 基础设施层
//!
//! 把上传的二进制文档转换为连续文本或行记录，不关心题目格式

use std::collections::HashMap;
use std::sync::Arc;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::error::ExtractError;
use crate::infrastructure::office_extractor::{DocxExtractor, XlsxExtractor};
use crate::models::document::{CellValue, RawDocument, RowRecord};

/// 原始抽取能力
///
/// 实现者负责一种文件类型，`source_name` 仅用于错误信息
pub trait RawExtractor: Send + Sync {
    fn extract(&self, source_name: &str, bytes: &[u8]) -> Result<RawDocument, ExtractError>;
}

/// UTF-8 纯文本
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExtractor;

impl RawExtractor for PlainTextExtractor {
    fn extract(&self, source_name: &str, bytes: &[u8]) -> Result<RawDocument, ExtractError> {
        let text = String::from_utf8(bytes.to_vec()).map_err(|source| {
            ExtractError::InvalidEncoding {
                path: source_name.to_string(),
                source,
            }
        })?;
        Ok(RawDocument::Text(text.trim_start_matches('\u{feff}').to_string()))
    }
}

/// 带表头的 CSV
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvExtractor;

impl RawExtractor for CsvExtractor {
    fn extract(&self, source_name: &str, bytes: &[u8]) -> Result<RawDocument, ExtractError> {
        let table_err = |source| ExtractError::Table {
            path: source_name.to_string(),
            source,
        };

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::All)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()
            .map_err(table_err)?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(table_err)?;
            let row: RowRecord = headers
                .iter()
                .zip(record.iter())
                .map(|(label, cell)| (label.clone(), CellValue::from(cell)))
                .collect();
            rows.push(row);
        }

        debug!("CSV 抽取完成: {} 行, {} 列", rows.len(), headers.len());
        Ok(RawDocument::Rows(rows))
    }
}

/// 按扩展名选择抽取器
///
/// 默认注册 docx、txt、xlsx 和 csv，调用方可以覆盖或增加
#[derive(Clone)]
pub struct ExtractorRegistry {
    extractors: HashMap<String, Arc<dyn RawExtractor>>,
}

impl ExtractorRegistry {
    /// 空注册表
    pub fn empty() -> Self {
        Self {
            extractors: HashMap::new(),
        }
    }

    /// 注册抽取器（扩展名不含点，忽略大小写）
    pub fn register(mut self, extension: &str, extractor: impl RawExtractor + 'static) -> Self {
        self.extractors
            .insert(normalize_extension(extension), Arc::new(extractor));
        self
    }

    pub fn supports(&self, extension: &str) -> bool {
        self.extractors.contains_key(&normalize_extension(extension))
    }

    /// 用对应的抽取器处理文档
    pub fn extract(
        &self,
        extension: &str,
        source_name: &str,
        bytes: &[u8],
    ) -> Result<RawDocument, ExtractError> {
        let extension = normalize_extension(extension);
        let extractor = self
            .extractors
            .get(&extension)
            .ok_or(ExtractError::ExtractorUnavailable { extension })?;
        extractor.extract(source_name, bytes)
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::empty()
            .register("docx", DocxExtractor)
            .register("txt", PlainTextExtractor)
            .register("xlsx", XlsxExtractor)
            .register("csv", CsvExtractor)
    }
}

impl std::fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<&String> = self.extractors.keys().collect();
        keys.sort();
        f.debug_struct("ExtractorRegistry")
            .field("extensions", &keys)
            .finish()
    }
}

fn normalize_extension(extension: &str) -> String {
    extension.trim_start_matches('.').to_lowercase()
}
