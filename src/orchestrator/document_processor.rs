//! 单个文档处理器 - 编排层
//!
//! 负责导入一个文档、写出结果文件，如果有答案文件则顺便评分

use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::fs;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::loaders::load_answer_sheet;
use crate::models::submission::SubmissionResult;
use crate::workflow::{DocumentCtx, IngestFlow, IngestOutcome};

/// 单个文档的处理统计
///
/// 评分失败不影响导入结果，原因记录在 `scoring_error` 中
#[derive(Debug, Default, Clone)]
pub struct DocumentStats {
    pub questions: usize,
    pub scored: Option<SubmissionResult>,
    pub scoring_error: Option<String>,
}

/// 处理单个文档
///
/// # 参数
/// - `flow`: 导入流程
/// - `ctx`: 文档上下文
/// - `config`: 配置
///
/// # 返回
/// 成功导入时返回统计信息
pub async fn process_document(
    flow: &IngestFlow,
    ctx: &DocumentCtx,
    config: &Config,
) -> AppResult<DocumentStats> {
    let outcome = match flow.ingest_file(ctx).await {
        Ok(outcome) => outcome,
        Err(e) if e.is_no_questions() => {
            warn!("{} ⚠️ 没有可导入的题目，跳过", ctx);
            return Err(e);
        }
        Err(e) => {
            error!("{} 导入失败: {}", ctx, e);
            return Err(e);
        }
    };

    let output_dir = Path::new(&config.output_folder);
    write_json(&output_path(output_dir, ctx, "quiz"), &outcome).await?;

    let mut stats = DocumentStats {
        questions: outcome.questions.len(),
        ..Default::default()
    };

    match score_answer_sheet(flow, ctx, &outcome, output_dir).await {
        Ok(scored) => stats.scored = scored,
        Err(e) => {
            warn!("{} ⚠️ 答案文件评分失败: {}", ctx, e);
            stats.scoring_error = Some(e.to_string());
        }
    }

    log_document_complete(ctx, &stats);
    Ok(stats)
}

/// 读取并评分答案文件，没有答案文件时返回 `None`
async fn score_answer_sheet(
    flow: &IngestFlow,
    ctx: &DocumentCtx,
    outcome: &IngestOutcome,
    output_dir: &Path,
) -> AppResult<Option<SubmissionResult>> {
    let Some(answers) = load_answer_sheet(ctx.path()).await? else {
        return Ok(None);
    };

    let result = flow.score(&outcome.questions, &answers)?;
    info!("{} 📝 {}", ctx, result);
    write_json(&output_path(output_dir, ctx, "result"), &result).await?;
    Ok(Some(result))
}

fn output_path(output_dir: &Path, ctx: &DocumentCtx, kind: &str) -> PathBuf {
    output_dir.join(format!("{}.{}.json", ctx.file_stem(), kind))
}

async fn write_json<T: Serialize>(path: &Path, value: &T) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::file_write_failed(parent.display().to_string(), e))?;
    }

    let json = serde_json::to_string_pretty(value).map_err(crate::error::StoreError::from)?;
    fs::write(path, json)
        .await
        .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;
    Ok(())
}

// ========== 日志辅助函数 ==========

fn log_document_complete(ctx: &DocumentCtx, stats: &DocumentStats) {
    match (&stats.scored, &stats.scoring_error) {
        (Some(result), _) => info!(
            "{} ✅ 处理完成: {} 道题, 得分 {}%",
            ctx, stats.questions, result.score
        ),
        (None, Some(_)) => info!("{} ✅ 处理完成: {} 道题 (未评分)", ctx, stats.questions),
        (None, None) => info!("{} ✅ 处理完成: {} 道题", ctx, stats.questions),
    }
}
