//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，不做解析和评分的具体判断。
//!
//! ### `batch_processor` - 批量文档处理器
//! - 管理应用生命周期（初始化、运行）
//! - 扫描输入目录（Vec<PathBuf>）
//! - 控制并发数量（Semaphore）
//! - 输出全局统计信息
//!
//! ### `document_processor` - 单个文档处理器
//! - 通过 IngestFlow 导入一个文档
//! - 写出 `<stem>.quiz.json`
//! - 如有答案文件，评分并写出 `<stem>.result.json`
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<PathBuf>)
//!     ↓
//! document_processor (处理单个文档)
//!     ↓
//! workflow::IngestFlow (格式判断 → 抽取 → 解析 → 保存)
//!     ↓
//! services (能力层：文本解析 / 表格解析 / 评分)
//!     ↓
//! infrastructure (基础设施：抽取器、测验存储)
//! ```

pub mod batch_processor;
pub mod document_processor;

// 重新导出主要类型
pub use batch_processor::{App, ProcessingStats};
pub use document_processor::{process_document, DocumentStats};
