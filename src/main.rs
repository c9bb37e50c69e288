use anyhow::Result;
use easy_apply_bot::config::Config;
use easy_apply_bot::orchestrator::scheduler;
use easy_apply_bot::utils::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 按触发方式运行（立即一次 / cron 周期）
    scheduler::run(config).await?;

    Ok(())
}
