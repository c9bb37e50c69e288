//! # Easy Apply Bot
//!
//! 一个自动申请职位的 Rust 应用程序：在分页的职位列表里发现带
//! 快速申请入口的职位，逐个打开并推进多步申请向导直到提交，
//! 直到达到目标提交数或翻页手段耗尽。
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `JsExecutor` - 唯一的 page owner，提供 eval() 能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个动作
//! - `JobBoard` - 列表页能力面（扫描 / 打开 / 填写 / 翻页）
//! - `auth` - 登录会话能力
//! - `PaginationStrategy` - 翻页决策能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个职位"的完整申请流程
//! - `ApplyCtx` - 上下文封装（页内位置 + 序号）
//! - `ApplyFlow` - 状态机编排（打开 → 定位入口 → 填表 → 提交/中止）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/engine` - 发现循环，管理去重、计数和停止策略
//! - `orchestrator/app` - 会话生命周期和资源回收
//! - `orchestrator/scheduler` - 单次运行 / cron 周期触发
//!
//! ## 模块结构

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use browser::{establish_session, BrowserSession};
pub use config::Config;
pub use error::AppError;
pub use infrastructure::JsExecutor;
pub use models::{
    AbortReason, ApplyOutcome, DedupIndex, JobCardSnapshot, PageAdvance, WorkflowSummary,
};
pub use orchestrator::{App, ApplyEngine, TriggerMode};
pub use services::{CdpJobBoard, JobBoard, PaginationStrategy};
pub use workflow::{ApplyCtx, ApplyFlow};
