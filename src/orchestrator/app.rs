//! 应用生命周期 - 编排层
//!
//! ## 职责
//!
//! 1. **会话建立**：连接已有浏览器实例，或启动新实例
//! 2. **认证**：委托 auth 服务确保已登录（失败即致命）
//! 3. **运行引擎**：导航到搜索页后把控制权交给发现引擎
//! 4. **资源回收**：谁创建浏览器谁负责关闭；外部提供的实例不关

use std::time::Duration;

use anyhow::Result;
use tokio::time::sleep;
use tracing::{error, info};

use crate::browser::{self, BrowserSession};
use crate::config::Config;
use crate::infrastructure::JsExecutor;
use crate::models::WorkflowSummary;
use crate::orchestrator::engine::ApplyEngine;
use crate::services::{auth, CdpJobBoard, JobBoard};

/// 应用主结构
pub struct App {
    config: Config,
    session: BrowserSession,
}

impl App {
    /// 初始化应用：建立浏览器会话
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);
        let session = browser::establish_session(&config).await?;
        Ok(Self { config, session })
    }

    /// 运行一次完整的申请工作流
    ///
    /// 无论成功失败，退出前都会按所有权回收浏览器
    pub async fn run(mut self) -> Result<WorkflowSummary> {
        let outcome = self.run_inner().await;

        self.session.close_if_owned().await;

        match &outcome {
            Ok(summary) => log_summary(summary),
            Err(e) => error!("❌ 本次运行失败: {}", e),
        }
        outcome
    }

    async fn run_inner(&self) -> Result<WorkflowSummary> {
        auth::ensure_authenticated(self.session.page(), &self.config).await?;

        // 登录后停留片刻再发起搜索请求
        sleep(Duration::from_millis(self.config.detail_settle_millis)).await;

        let executor = JsExecutor::new(self.session.page().clone());
        let board = CdpJobBoard::new(
            executor,
            Duration::from_millis(self.config.settle_millis),
        );

        let search_url = self.config.job_search_url();
        info!("🔎 导航到职位搜索页...");
        board.navigate(&search_url).await?;

        let mut engine = ApplyEngine::new(&self.config);
        engine.run(&board).await
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 自动职位申请模式");
    info!("🔎 搜索关键词: {}", config.skill_set);
    info!("🎯 目标提交数: {}", config.target_submissions);
    info!("📊 无进展尝试上限: {}", config.max_no_progress_attempts);
    info!("{}", "=".repeat(60));
}

fn log_summary(summary: &WorkflowSummary) {
    info!("{}", "=".repeat(60));
    info!("📊 本次运行统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 提交申请: {}", summary.submissions_completed);
    info!("📋 处理合格职位: {}", summary.eligible_items_processed);
    info!("{}", "=".repeat(60));
}
