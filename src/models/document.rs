//! 文档相关数据结构
//!
//! 抽取器的输出：连续文本或按列名索引的行记录

use std::collections::BTreeMap;
use std::path::Path;

use phf::phf_map;
use serde::{Deserialize, Serialize};

use crate::error::IngestError;

/// 文档格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentFormat {
    /// 连续文本（docx / txt）
    FlowingText,
    /// 表格（xlsx / csv）
    Tabular,
}

/// 扩展名（小写，不含点）到格式的映射
static FORMAT_BY_EXTENSION: phf::Map<&'static str, DocumentFormat> = phf_map! {
    "docx" => DocumentFormat::FlowingText,
    "txt" => DocumentFormat::FlowingText,
    "xlsx" => DocumentFormat::Tabular,
    "csv" => DocumentFormat::Tabular,
};

impl DocumentFormat {
    /// 根据扩展名判断格式
    pub fn from_extension(extension: &str) -> Result<Self, IngestError> {
        let lowered = extension.trim_start_matches('.').to_lowercase();
        FORMAT_BY_EXTENSION
            .get(lowered.as_str())
            .copied()
            .ok_or(IngestError::UnsupportedFormat {
                extension: lowered,
            })
    }

    /// 根据文件路径判断格式
    pub fn detect(path: &Path) -> Result<Self, IngestError> {
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        Self::from_extension(extension)
    }

    /// 扩展名是否受支持
    pub fn is_supported(path: &Path) -> bool {
        Self::detect(path).is_ok()
    }

    pub fn name(self) -> &'static str {
        match self {
            DocumentFormat::FlowingText => "连续文本",
            DocumentFormat::Tabular => "表格",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// f64 能精确表示的最大整数（2^53）
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// 单元格的值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Empty,
}

impl CellValue {
    /// 单元格的文本形式，空值或纯空白返回 `None`
    pub fn as_text(&self) -> Option<String> {
        let text = match self {
            CellValue::Empty => return None,
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER => {
                format!("{}", *n as i64)
            }
            CellValue::Number(n) => n.to_string(),
            CellValue::Bool(b) => b.to_string(),
        };
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value.to_string())
        }
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::from(value.as_str())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// 表格中的一行：列名 → 单元格
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowRecord {
    cells: BTreeMap<String, CellValue>,
}

impl RowRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// 链式添加单元格
    pub fn with(mut self, label: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(label, value);
        self
    }

    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.insert(label.into(), value.into());
    }

    /// 按列名查找（忽略大小写和首尾空白），只返回非空值
    pub fn text_for(&self, label: &str) -> Option<String> {
        let wanted = label.trim().to_lowercase();
        self.cells
            .iter()
            .filter(|(key, _)| key.trim().to_lowercase() == wanted)
            .find_map(|(_, value)| value.as_text())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for RowRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RowRecord::new();
        for (label, value) in iter {
            row.insert(label, value);
        }
        row
    }
}

/// 抽取器输出
#[derive(Debug, Clone, PartialEq)]
pub enum RawDocument {
    Text(String),
    Rows(Vec<RowRecord>),
}

impl RawDocument {
    pub fn format(&self) -> DocumentFormat {
        match self {
            RawDocument::Text(_) => DocumentFormat::FlowingText,
            RawDocument::Rows(_) => DocumentFormat::Tabular,
        }
    }
}
