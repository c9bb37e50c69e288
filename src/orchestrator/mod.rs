//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责整次运行的调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `engine` - 职位发现引擎
//! - 驱动发现循环（扫描 → 去重 → 合格性判断 → 派发状态机）
//! - 持有去重索引、计数器和翻页策略
//! - 执行停止策略（达标 / 翻页耗尽）
//!
//! ### `app` - 应用生命周期
//! - 建立浏览器会话（连接已有实例或启动新实例）
//! - 认证、导航到搜索页、运行引擎
//! - 谁创建浏览器谁负责关闭
//!
//! ### `scheduler` - 触发方式
//! - 立即运行一次，或按 cron 表达式周期触发
//! - 两条路径共用同一个引擎
//!
//! ## 层次关系
//!
//! ```text
//! scheduler (决定何时运行)
//!     ↓
//! app (管理会话生命周期)
//!     ↓
//! engine (发现循环，处理整页职位)
//!     ↓
//! workflow::ApplyFlow (处理单个职位)
//!     ↓
//! services (能力层：board / auth / pagination)
//!     ↓
//! infrastructure (基础设施：JsExecutor)
//! ```

pub mod app;
pub mod engine;
pub mod scheduler;

pub use app::App;
pub use engine::ApplyEngine;
pub use scheduler::TriggerMode;
