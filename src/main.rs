use anyhow::Result;
use quiz_ingest::utils::logging;
use quiz_ingest::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置（QUIZ_CONFIG 指定的 toml 文件 + 环境变量）
    let config = Config::load()?;

    // 初始化日志
    logging::init(&config.log_filter);

    // 初始化并运行应用
    let _stats = App::initialize(config).await?.run().await?;

    Ok(())
}
