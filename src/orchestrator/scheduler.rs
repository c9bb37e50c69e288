//! 触发方式 - 编排层
//!
//! 没有配置 cron 表达式（或配置为字面量 `none`）时立即运行一次；
//! 否则按表达式周期触发。两条路径共用同一个工作流引擎，
//! 每次触发都建立全新的应用实例。

use std::str::FromStr;

use anyhow::Result;
use chrono::Local;
use cron::Schedule;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{AppError, ConfigError};
use crate::models::WorkflowSummary;
use crate::orchestrator::app::App;

/// 禁用周期触发的哨兵值
const DISABLE_SENTINEL: &str = "none";

/// 触发方式
#[derive(Debug, Clone)]
pub enum TriggerMode {
    /// 立即运行一次
    Once,
    /// 按 cron 表达式周期触发
    Cron(Schedule),
}

impl TriggerMode {
    /// 从配置解析触发方式
    ///
    /// 表达式缺失或为 `none`（不区分大小写）时为单次运行；
    /// 表达式不合法是配置错误，直接失败
    pub fn from_config(config: &Config) -> Result<Self> {
        match config.cron_expression.as_deref() {
            None => Ok(TriggerMode::Once),
            Some(expr) if expr.eq_ignore_ascii_case(DISABLE_SENTINEL) => Ok(TriggerMode::Once),
            Some(expr) => {
                let schedule = Schedule::from_str(expr).map_err(|e| {
                    AppError::Config(ConfigError::InvalidCronExpression {
                        expr: expr.to_string(),
                        source: Box::new(e),
                    })
                })?;
                Ok(TriggerMode::Cron(schedule))
            }
        }
    }
}

/// 按配置的触发方式运行工作流
pub async fn run(config: Config) -> Result<()> {
    match TriggerMode::from_config(&config)? {
        TriggerMode::Once => {
            run_once(config).await?;
            Ok(())
        }
        TriggerMode::Cron(schedule) => {
            info!(
                "⏰ 已按 CRON_EXPRESSION 调度: {}",
                config.cron_expression.as_deref().unwrap_or_default()
            );
            run_scheduled(config, schedule).await
        }
    }
}

/// 周期触发循环：睡到下一个触发点，运行一轮，失败只记日志不退出
async fn run_scheduled(config: Config, schedule: Schedule) -> Result<()> {
    loop {
        let Some(next_fire) = schedule.upcoming(Local).next() else {
            warn!("⚠️ cron 表达式没有后续触发点，调度结束");
            return Ok(());
        };
        info!("⏰ 下次运行时间: {}", next_fire.format("%Y-%m-%d %H:%M:%S"));

        let wait = (next_fire - Local::now())
            .to_std()
            .unwrap_or(std::time::Duration::ZERO);
        sleep(wait).await;

        info!(
            "⏰ 定时触发，开始申请职位: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        if let Err(e) = run_once(config.clone()).await {
            error!("❌ 本轮定时运行失败: {}", e);
        }
    }
}

/// 运行一轮完整的工作流
async fn run_once(config: Config) -> Result<WorkflowSummary> {
    App::initialize(config).await?.run().await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_cron(expr: Option<&str>) -> Config {
        Config {
            cron_expression: expr.map(|s| s.to_string()),
            ..Config::default()
        }
    }

    /// 表达式缺失或为哨兵值时只运行一次
    #[test]
    fn test_missing_or_sentinel_means_once() {
        assert!(matches!(
            TriggerMode::from_config(&config_with_cron(None)).unwrap(),
            TriggerMode::Once
        ));
        assert!(matches!(
            TriggerMode::from_config(&config_with_cron(Some("none"))).unwrap(),
            TriggerMode::Once
        ));
        assert!(matches!(
            TriggerMode::from_config(&config_with_cron(Some("NONE"))).unwrap(),
            TriggerMode::Once
        ));
    }

    #[test]
    fn test_valid_expression_parses() {
        let mode = TriggerMode::from_config(&config_with_cron(Some("0 0 9 * * *"))).unwrap();
        assert!(matches!(mode, TriggerMode::Cron(_)));
    }

    #[test]
    fn test_invalid_expression_is_config_error() {
        assert!(TriggerMode::from_config(&config_with_cron(Some("每天早上九点"))).is_err());
    }
}
