use crate::error::{AppError, AppResult, FileError};
use crate::models::document::DocumentFormat;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 答案文件后缀
const ANSWER_SHEET_SUFFIX: &str = "answers.json";

/// 读取文档的原始字节
pub async fn read_document_bytes(path: &Path) -> AppResult<Vec<u8>> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        return Err(FileError::NotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    fs::read(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))
}

/// 扫描文件夹中所有受支持的文档，按文件名排序
pub async fn list_documents(folder_path: &str) -> AppResult<Vec<PathBuf>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        return Err(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }
        .into());
    }

    let mut documents = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?
    {
        let path = entry.path();
        if path.is_file() && DocumentFormat::is_supported(&path) {
            documents.push(path);
        } else {
            tracing::debug!("跳过: {}", path.display());
        }
    }

    documents.sort();
    tracing::info!("在 {} 中找到 {} 个文档", folder_path, documents.len());
    Ok(documents)
}

/// 文档旁边的答案文件路径：`<stem>.answers.json`
pub fn answer_sheet_path(document_path: &Path) -> PathBuf {
    let stem = document_path
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();
    document_path.with_file_name(format!("{}.{}", stem, ANSWER_SHEET_SUFFIX))
}

/// 读取文档对应的答案文件（JSON 数组，元素为选项序号或 null）
///
/// 文件不存在时返回 `None`
pub async fn load_answer_sheet(document_path: &Path) -> AppResult<Option<Vec<Option<usize>>>> {
    let sheet_path = answer_sheet_path(document_path);
    if !fs::try_exists(&sheet_path).await.unwrap_or(false) {
        return Ok(None);
    }

    let content = fs::read_to_string(&sheet_path)
        .await
        .map_err(|e| AppError::file_read_failed(sheet_path.display().to_string(), e))?;

    let answers: Vec<Option<usize>> =
        serde_json::from_str(&content).map_err(|source| FileError::JsonParseFailed {
            path: sheet_path.display().to_string(),
            source,
        })?;

    tracing::info!(
        "加载答案文件: {} ({} 个答案)",
        sheet_path.file_name().unwrap_or_default().to_string_lossy(),
        answers.len()
    );
    Ok(Some(answers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_sheet_sits_next_to_document() {
        let path = answer_sheet_path(Path::new("docs/quiz 1.docx"));
        assert_eq!(path, PathBuf::from("docs/quiz 1.answers.json"));
    }
}
