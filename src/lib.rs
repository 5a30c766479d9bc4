//! # Quiz Ingest
//!
//! 波斯语数学测验的导入与评分核心
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有外部资源，只暴露能力
//! - `ExtractorRegistry` - 按扩展名把原始字节转换为文本或行记录
//! - `QuizStore` - 测验存储抽象，`InMemoryQuizStore` 为默认实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不接触文件和存储
//! - `TextFormatParser` - 流式文本（docx / txt）解析
//! - `TableFormatParser` - 表格（xlsx / csv）解析
//! - `Scorer` - 提交评分
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个文档"的完整导入流程
//! - `DocumentCtx` - 上下文封装（文档序号 + 路径）
//! - `IngestFlow` - 流程编排（格式判断 → 抽取 → 解析 → 保存）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量文档处理器，管理资源和并发
//! - `orchestrator/document_processor` - 单个文档处理器，写出结果文件
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{ExtractorRegistry, InMemoryQuizStore, QuizStore, RawExtractor};
pub use models::{
    default_question_set, AnswerOption, DocumentFormat, Question, QuestionSet, QuizId, QuizRecord,
    RawDocument, RowRecord, SubmissionResult,
};
pub use orchestrator::{process_document, App};
pub use services::{Scorer, TableFormatParser, TextFormatParser};
pub use workflow::{DocumentCtx, IngestFlow, IngestOutcome};
