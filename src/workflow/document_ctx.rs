//! 文档处理上下文
//!
//! 封装"我正在处理第几个文档、它叫什么"这一信息

use std::fmt::Display;
use std::path::{Path, PathBuf};

/// 文档处理上下文
#[derive(Debug, Clone)]
pub struct DocumentCtx {
    /// 文档索引（仅用于日志显示，从1开始）
    pub document_index: usize,

    /// 文档路径
    pub path: PathBuf,
}

impl DocumentCtx {
    pub fn new(document_index: usize, path: impl Into<PathBuf>) -> Self {
        Self {
            document_index,
            path: path.into(),
        }
    }

    /// 文件名，作为测验标题
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }

    /// 不含扩展名的文件名，用于输出文件命名
    pub fn file_stem(&self) -> String {
        self.path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Display for DocumentCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[文档 #{} {}]", self.document_index, self.file_name())
    }
}
