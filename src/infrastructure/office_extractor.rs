//! Office 文档抽取器 - 基础设施层
//!
//! - docx：解压 `word/document.xml`，每个段落一行
//! - xlsx：读取第一个工作表，第一行作为表头

use std::io::{Cursor, Read};

use calamine::{Data, Reader, Xlsx};
use quick_xml::events::Event;
use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::ExtractError;
use crate::infrastructure::extractor::RawExtractor;
use crate::models::document::{CellValue, RawDocument, RowRecord};

/// docx 正文所在的压缩包条目
const DOCX_BODY_ENTRY: &str = "word/document.xml";

/// Word 文档，只取正文纯文本
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxExtractor;

impl RawExtractor for DocxExtractor {
    fn extract(&self, source_name: &str, bytes: &[u8]) -> Result<RawDocument, ExtractError> {
        let archive_err = |source: ZipError| ExtractError::Archive {
            path: source_name.to_string(),
            source,
        };

        let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(archive_err)?;
        let mut xml = String::new();
        archive
            .by_name(DOCX_BODY_ENTRY)
            .map_err(archive_err)?
            .read_to_string(&mut xml)
            .map_err(|e| archive_err(ZipError::from(e)))?;

        let text = body_text(&xml).map_err(|source| ExtractError::Xml {
            path: source_name.to_string(),
            source,
        })?;

        debug!("docx 抽取完成: {} 行", text.lines().count());
        Ok(RawDocument::Text(text))
    }
}

/// 收集 `<w:t>` 中的文字；段落结束和 `<w:br/>` 换行，`<w:tab/>` 变为空格
fn body_text(xml: &str) -> Result<String, quick_xml::Error> {
    let mut reader = quick_xml::Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.local_name().as_ref() == b"t" => in_run_text = true,
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_run_text = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"br" | b"p" => text.push('\n'),
                b"tab" => text.push(' '),
                _ => {}
            },
            Event::Text(t) if in_run_text => text.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}

/// Excel 工作簿，只读第一个工作表
#[derive(Debug, Default, Clone, Copy)]
pub struct XlsxExtractor;

impl RawExtractor for XlsxExtractor {
    fn extract(&self, source_name: &str, bytes: &[u8]) -> Result<RawDocument, ExtractError> {
        let sheet_err = |source| ExtractError::Spreadsheet {
            path: source_name.to_string(),
            source,
        };

        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).map_err(sheet_err)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ExtractError::EmptyWorkbook {
                path: source_name.to_string(),
            })?
            .map_err(sheet_err)?;

        let mut sheet_rows = range.rows();
        let Some(header_row) = sheet_rows.next() else {
            return Ok(RawDocument::Rows(Vec::new()));
        };
        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let rows: Vec<RowRecord> = sheet_rows
            .filter(|row| !row.iter().all(|cell| matches!(cell, Data::Empty)))
            .map(|row| {
                headers
                    .iter()
                    .zip(row.iter())
                    .filter(|(label, _)| !label.is_empty())
                    .map(|(label, cell)| (label.clone(), cell_value(cell)))
                    .collect()
            })
            .collect();

        debug!("xlsx 抽取完成: {} 行, {} 列", rows.len(), headers.len());
        Ok(RawDocument::Rows(rows))
    }
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::from(s.as_str()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        other => CellValue::from(other.to_string()),
    }
}
