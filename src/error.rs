use thiserror::Error;

use crate::models::question::QuestionError;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 题目导入错误
    #[error("导入错误: {0}")]
    Ingest(#[from] IngestError),
    /// 文档抽取错误
    #[error("抽取错误: {0}")]
    Extract(#[from] ExtractError),
    /// 评分错误
    #[error("评分错误: {0}")]
    Scoring(#[from] ScoringError),
    /// 存储错误
    #[error("存储错误: {0}")]
    Store(#[from] StoreError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 题目数据不合法
    #[error("题目错误: {0}")]
    Question(#[from] QuestionError),
}

/// 题目导入错误
#[derive(Debug, Error)]
pub enum IngestError {
    /// 文件类型既不是连续文本也不是表格
    #[error("不支持的文件格式: {extension}")]
    UnsupportedFormat { extension: String },
    /// 文档中没有解析出任何有效题目
    #[error("文件中没有找到任何题目: {source_name}")]
    NoQuestionsFound { source_name: String },
    /// 抽取结果与检测到的格式不一致
    #[error("文档内容与格式不符: 期望 {expected}")]
    FormatMismatch { expected: &'static str },
}

/// 文档抽取错误
#[derive(Debug, Error)]
pub enum ExtractError {
    /// 没有为该扩展名注册抽取器
    #[error("没有可用的抽取器: .{extension}")]
    ExtractorUnavailable { extension: String },
    /// 文档不是有效的 UTF-8 文本
    #[error("文档编码无效 ({path}): {source}")]
    InvalidEncoding {
        path: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
    /// 表格读取失败
    #[error("表格读取失败 ({path}): {source}")]
    Table {
        path: String,
        #[source]
        source: csv::Error,
    },
    /// docx 压缩包读取失败
    #[error("文档压缩包读取失败 ({path}): {source}")]
    Archive {
        path: String,
        #[source]
        source: zip::result::ZipError,
    },
    /// docx 正文 XML 解析失败
    #[error("文档正文解析失败 ({path}): {source}")]
    Xml {
        path: String,
        #[source]
        source: quick_xml::Error,
    },
    /// xlsx 工作簿读取失败
    #[error("工作簿读取失败 ({path}): {source}")]
    Spreadsheet {
        path: String,
        #[source]
        source: calamine::XlsxError,
    },
    /// 工作簿中没有工作表
    #[error("工作簿中没有工作表: {path}")]
    EmptyWorkbook { path: String },
}

/// 评分错误
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScoringError {
    /// 题目列表为空，无法计算百分比
    #[error("题目列表为空，无法评分")]
    EmptyQuestionSet,
    /// 答案数量多于题目数量
    #[error("答案数量 {answers} 超过题目数量 {questions}")]
    TooManyAnswers { answers: usize, questions: usize },
}

/// 存储错误
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// 锁被污染
    #[error("存储锁已失效")]
    LockPoisoned,
    /// 序列化失败
    #[error("序列化失败: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({path}): {source}")]
    JsonParseFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 配置文件读取失败
    #[error("无法读取配置文件 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建"没有题目"错误
    pub fn no_questions(source_name: impl Into<String>) -> Self {
        AppError::Ingest(IngestError::NoQuestionsFound {
            source_name: source_name.into(),
        })
    }

    /// 是否属于"文件中没有题目"的拒绝
    pub fn is_no_questions(&self) -> bool {
        matches!(self, AppError::Ingest(IngestError::NoQuestionsFound { .. }))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
