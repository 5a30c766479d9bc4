//! 题目导入流程 - 流程层
//!
//! 核心职责：定义"一个文档"的完整导入流程
//!
//! 流程顺序：
//! 1. 按扩展名判断格式（不支持的格式在读取前就拒绝）
//! 2. 抽取文本 / 行记录
//! 3. 对应的解析器生成题目集合
//! 4. 结果为空 → 拒绝，不保存
//! 5. 保存到测验存储

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult, IngestError};
use crate::infrastructure::{ExtractorRegistry, QuizStore};
use crate::models::document::{DocumentFormat, RawDocument};
use crate::models::loaders::read_document_bytes;
use crate::models::question::QuestionSet;
use crate::models::quiz::{NewQuiz, QuizId};
use crate::models::submission::SubmissionResult;
use crate::services::{Scorer, TableFormatParser, TextFormatParser};
use crate::utils::truncate_text;
use crate::workflow::document_ctx::DocumentCtx;

/// 导入结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestOutcome {
    pub quiz_id: QuizId,
    pub title: String,
    pub created_at: String,
    pub format: DocumentFormat,
    pub questions: QuestionSet,
}

/// 题目导入流程
///
/// - 不持有文件句柄，只依赖抽取器、解析器和存储
/// - 解析器和评分器都是无状态的，可在多个任务间共享
pub struct IngestFlow {
    extractors: ExtractorRegistry,
    text_parser: TextFormatParser,
    table_parser: TableFormatParser,
    scorer: Scorer,
    store: Arc<dyn QuizStore>,
    verbose_logging: bool,
}

impl IngestFlow {
    /// 使用默认抽取器创建
    pub fn new(store: Arc<dyn QuizStore>) -> Self {
        Self::with_extractors(store, ExtractorRegistry::default())
    }

    pub fn with_extractors(store: Arc<dyn QuizStore>, extractors: ExtractorRegistry) -> Self {
        Self {
            extractors,
            text_parser: TextFormatParser::new(),
            table_parser: TableFormatParser::new(),
            scorer: Scorer::new(),
            store,
            verbose_logging: false,
        }
    }

    pub fn verbose(mut self, verbose_logging: bool) -> Self {
        self.verbose_logging = verbose_logging;
        self
    }

    pub fn store(&self) -> &Arc<dyn QuizStore> {
        &self.store
    }

    /// 只解析，不保存
    pub fn parse(&self, document: &RawDocument) -> QuestionSet {
        match document {
            RawDocument::Text(text) => self.text_parser.parse(text),
            RawDocument::Rows(rows) => self.table_parser.parse(rows),
        }
    }

    /// 导入已抽取的文档
    ///
    /// # 参数
    /// - `title`: 测验标题（通常是原始文件名）
    /// - `format`: 调用方检测到的格式
    /// - `document`: 抽取结果
    pub fn ingest(
        &self,
        title: &str,
        format: DocumentFormat,
        document: &RawDocument,
    ) -> AppResult<IngestOutcome> {
        if document.format() != format {
            return Err(IngestError::FormatMismatch {
                expected: format.name(),
            }
            .into());
        }

        let questions = self.parse(document);
        if questions.is_empty() {
            warn!("⚠️ {} 中没有找到任何题目", title);
            return Err(AppError::no_questions(title));
        }

        if self.verbose_logging {
            for question in &questions {
                debug!(
                    "  #{} {} ({} 个选项, 正确: {})",
                    question.id,
                    truncate_text(&question.text, 40),
                    question.option_count(),
                    question.correct_option_index
                );
            }
        }

        let record = self
            .store
            .create(NewQuiz::from_question_set(title, &questions)?)?;
        info!(
            "✓ {} 导入 {} 道题 (格式: {}, 测验 #{})",
            title,
            questions.len(),
            format,
            record.id
        );

        Ok(IngestOutcome {
            quiz_id: record.id,
            title: record.title,
            created_at: record.created_at,
            format,
            questions,
        })
    }

    /// 从磁盘导入单个文档
    pub async fn ingest_file(&self, ctx: &DocumentCtx) -> AppResult<IngestOutcome> {
        let format = DocumentFormat::detect(ctx.path())?;
        info!("{} 📄 开始导入 (格式: {})", ctx, format);

        let bytes = read_document_bytes(ctx.path()).await?;
        let extension = ctx
            .path()
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let document = self
            .extractors
            .extract(extension, &ctx.file_name(), &bytes)?;

        self.ingest(&ctx.file_name(), format, &document)
    }

    /// 对一次提交评分
    pub fn score(
        &self,
        questions: &QuestionSet,
        answers: &[Option<usize>],
    ) -> AppResult<SubmissionResult> {
        Ok(self.scorer.score(questions.questions(), answers)?)
    }

    /// 读取已保存的测验并评分
    pub fn score_saved(&self, quiz_id: QuizId, answers: &[Option<usize>]) -> AppResult<Option<SubmissionResult>> {
        let Some(record) = self.store.get(quiz_id)? else {
            return Ok(None);
        };
        let questions = record.question_set()?;
        self.score(&questions, answers).map(Some)
    }
}
