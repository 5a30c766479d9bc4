//! 批量文档处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量文档的导入和资源管理。
//!
//! 1. **应用初始化**：写日志文件头、创建测验存储和导入流程
//! 2. **批量加载**：扫描输入目录中所有受支持的文档
//! 3. **并发控制**：使用 Semaphore 限制并发数量
//! 4. **分批处理**：每批完成后再开始下一批
//! 5. **全局统计**：汇总所有文档的处理结果

use crate::config::Config;
use crate::infrastructure::{InMemoryQuizStore, QuizStore};
use crate::models::loaders::list_documents;
use crate::orchestrator::document_processor::{self, DocumentStats};
use crate::utils::logging;
use crate::workflow::{DocumentCtx, IngestFlow};
use crate::AppResult;
use anyhow::{Context, Result};
use futures::future::join_all;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, warn};

/// 应用主结构
pub struct App {
    config: Config,
    flow: Arc<IngestFlow>,
}

/// 处理统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessingStats {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
    pub questions: usize,
    /// 导入成功但答案文件评分失败的文档数
    pub scoring_failed: usize,
}

/// 批次处理结果
#[derive(Debug, Default)]
struct BatchResult {
    success: usize,
    failed: usize,
    questions: usize,
    scoring_failed: usize,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        logging::init_log_file(&config.output_log_file)?;
        logging::log_startup(config.max_concurrent_documents, &config.input_folder);

        let store: Arc<dyn QuizStore> = Arc::new(InMemoryQuizStore::new());
        let flow = IngestFlow::new(store).verbose(config.verbose_logging);

        Ok(Self::with_flow(config, flow))
    }

    /// 使用自定义导入流程（例如自定义抽取器或存储）
    pub fn with_flow(config: Config, flow: IngestFlow) -> Self {
        Self {
            config,
            flow: Arc::new(flow),
        }
    }

    pub fn flow(&self) -> &IngestFlow {
        &self.flow
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<ProcessingStats> {
        let documents = list_documents(&self.config.input_folder)
            .await
            .with_context(|| format!("无法扫描输入目录: {}", self.config.input_folder))?;

        if documents.is_empty() {
            warn!("⚠️ 没有找到待导入的文档，程序结束");
            return Ok(ProcessingStats::default());
        }

        logging::log_documents_loaded(documents.len(), self.config.max_concurrent_documents);

        let stats = self.process_all_documents(documents).await?;

        logging::print_final_stats(
            stats.success,
            stats.failed,
            stats.questions,
            stats.total,
            &self.config.output_log_file,
        );

        Ok(stats)
    }

    /// 分批处理所有文档
    async fn process_all_documents(&self, documents: Vec<PathBuf>) -> Result<ProcessingStats> {
        let batch_size = self.config.max_concurrent_documents.max(1);
        let semaphore = Arc::new(Semaphore::new(batch_size));
        let total = documents.len();
        let total_batches = total.div_ceil(batch_size);
        let mut stats = ProcessingStats {
            total,
            ..Default::default()
        };

        for (batch_idx, batch) in documents.chunks(batch_size).enumerate() {
            let batch_start = batch_idx * batch_size;
            let batch_num = batch_idx + 1;

            logging::log_batch_start(
                batch_num,
                total_batches,
                batch_start + 1,
                batch_start + batch.len(),
                total,
            );

            let result = self
                .process_batch(batch, batch_start, semaphore.clone())
                .await?;

            stats.success += result.success;
            stats.failed += result.failed;
            stats.questions += result.questions;
            stats.scoring_failed += result.scoring_failed;

            logging::log_batch_complete(batch_num, result.success, batch.len());
        }

        Ok(stats)
    }

    /// 处理单个批次
    async fn process_batch(
        &self,
        batch: &[PathBuf],
        batch_start: usize,
        semaphore: Arc<Semaphore>,
    ) -> Result<BatchResult> {
        let mut handles = Vec::with_capacity(batch.len());

        for (idx, path) in batch.iter().enumerate() {
            let ctx = DocumentCtx::new(batch_start + idx + 1, path.clone());
            let permit = semaphore.clone().acquire_owned().await?;
            let flow = Arc::clone(&self.flow);
            let config = self.config.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                let outcome = document_processor::process_document(&flow, &ctx, &config).await;
                (ctx, outcome)
            });
            handles.push(handle);
        }

        let mut result = BatchResult::default();
        for joined in join_all(handles).await {
            match joined {
                Ok((ctx, outcome)) => self.record_outcome(&ctx, outcome, &mut result),
                Err(e) => {
                    error!("任务执行失败: {}", e);
                    result.failed += 1;
                }
            }
        }

        Ok(result)
    }

    fn record_outcome(
        &self,
        ctx: &DocumentCtx,
        outcome: AppResult<DocumentStats>,
        result: &mut BatchResult,
    ) {
        let line = match &outcome {
            Ok(stats) => {
                result.success += 1;
                result.questions += stats.questions;
                match (&stats.scored, &stats.scoring_error) {
                    (Some(scored), _) => {
                        format!("{} -> {} 道题, {}", ctx, stats.questions, scored)
                    }
                    (None, Some(e)) => {
                        result.scoring_failed += 1;
                        format!("{} -> {} 道题, 评分失败: {}", ctx, stats.questions, e)
                    }
                    (None, None) => format!("{} -> {} 道题", ctx, stats.questions),
                }
            }
            Err(e) => {
                result.failed += 1;
                format!("{} -> 失败: {}", ctx, e)
            }
        };

        if let Err(e) = logging::append_log_line(&self.config.output_log_file, &line) {
            warn!("写入日志文件失败: {}", e);
        }
    }
}
