use anyhow::{Context, Result};
/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing
///
/// `RUST_LOG` 优先于传入的过滤规则；重复调用不会报错
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n题目导入日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)
        .with_context(|| format!("无法写入日志文件: {}", log_file_path))?;
    Ok(())
}

/// 追加一行到日志文件
pub fn append_log_line(log_file_path: &str, line: &str) -> Result<()> {
    use std::io::Write;

    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)
        .with_context(|| format!("无法打开日志文件: {}", log_file_path))?;
    writeln!(file, "{}", line)?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(max_concurrent: usize, input_folder: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 批量题目导入模式");
    info!("📁 输入目录: {}", input_folder);
    info!("📊 最大并发数: {}", max_concurrent);
    info!("{}", "=".repeat(60));
}

/// 记录文档加载信息
pub fn log_documents_loaded(total: usize, max_concurrent: usize) {
    info!("✓ 找到 {} 个待导入的文档", total);
    info!("📋 将以每批 {} 个的方式处理\n", max_concurrent);
}

/// 记录批次开始信息
///
/// # 参数
/// - `batch_num`: 批次编号
/// - `total_batches`: 批次总数
/// - `start`: 起始文档编号
/// - `end`: 结束文档编号
/// - `total`: 文档总数
pub fn log_batch_start(
    batch_num: usize,
    total_batches: usize,
    start: usize,
    end: usize,
    total: usize,
) {
    info!("\n{}", "=".repeat(60));
    info!("📦 开始处理第 {}/{} 批", batch_num, total_batches);
    info!("📄 本批文档: {}-{} / 共 {} 个", start, end, total);
    info!("{}", "=".repeat(60));
}

pub fn log_batch_complete(batch_num: usize, success: usize, total: usize) {
    info!("\n{}", "─".repeat(60));
    info!("✓ 第 {} 批完成: 成功 {}/{}", batch_num, success, total);
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(
    success: usize,
    failed: usize,
    total_questions: usize,
    total: usize,
    log_file_path: &str,
) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", success, total);
    info!("❌ 失败: {}", failed);
    info!("📝 导入题目总数: {}", total_questions);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate_text("سلام دنیا", 4), "سلام...");
        assert_eq!(truncate_text("short", 10), "short");
    }

    #[test]
    fn log_file_gets_header_and_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.txt");
        let path = path.to_str().unwrap();

        init_log_file(path).unwrap();
        append_log_line(path, "quiz.txt -> 3").unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert!(content.starts_with(&"=".repeat(60)));
        assert!(content.ends_with("quiz.txt -> 3\n"));
    }
}
