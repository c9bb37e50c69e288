//! 职位发现引擎 - 编排层
//!
//! ## 职责
//!
//! 本模块驱动发现循环，是工作流的核心控制器。
//!
//! ## 核心功能
//!
//! 1. **扫描视图**：每轮重新获取当前视图的职位卡片快照
//! 2. **页内去重**：同一视图内每个位置最多评估一次
//! 3. **合格性判断**：用纯谓词挑出带快速申请入口的卡片
//! 4. **派发状态机**：把合格职位交给 ApplyFlow，折叠结果进计数器
//! 5. **停止策略**：达到目标提交数立即停；翻页耗尽正常终止
//!
//! ## 设计特点
//!
//! - 处理顺序严格按页内位置升序
//! - 计数器只在本模块的固定折叠点被修改
//! - 无论怎样终止，都返回一份汇总

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::models::{
    ApplyOutcome, DedupIndex, PageAdvance, WorkflowCounters, WorkflowSummary, FAST_APPLY_MARKER,
};
use crate::services::board::JobBoard;
use crate::services::PaginationStrategy;
use crate::utils::logging::truncate_text;
use crate::workflow::{ApplyCtx, ApplyFlow};

/// 职位发现引擎
pub struct ApplyEngine {
    flow: ApplyFlow,
    pagination: PaginationStrategy,
    dedup: DedupIndex,
    counters: WorkflowCounters,
    target_submissions: usize,
    max_no_progress_attempts: usize,
    verbose_logging: bool,
}

impl ApplyEngine {
    /// 根据配置创建引擎
    pub fn new(config: &Config) -> Self {
        Self {
            flow: ApplyFlow::new(config),
            pagination: PaginationStrategy::new(config.max_no_progress_attempts),
            dedup: DedupIndex::new(),
            counters: WorkflowCounters::new(),
            target_submissions: config.target_submissions,
            max_no_progress_attempts: config.max_no_progress_attempts,
            verbose_logging: config.verbose_logging,
        }
    }

    /// 运行发现循环，直到达标或翻页耗尽
    ///
    /// # 返回
    /// 无论哪种终止方式都返回汇总；Err 只在驱动层故障时出现
    pub async fn run<B: JobBoard>(&mut self, board: &B) -> Result<WorkflowSummary> {
        info!("🔍 开始搜索职位，目标提交数: {}", self.target_submissions);

        while self.counters.submissions_completed < self.target_submissions {
            let cards = board.scan_cards().await?;
            let mut progressed = false;

            // 按页内位置升序逐一评估
            for card in &cards {
                if self.counters.submissions_completed >= self.target_submissions {
                    break;
                }
                if !self.dedup.mark(card.position_index) {
                    continue;
                }

                if !card.has_fast_apply(FAST_APPLY_MARKER) {
                    if self.verbose_logging {
                        info!(
                            "⚠️ 卡片 {} 没有快速申请入口，跳过: {}",
                            card.position_index + 1,
                            truncate_text(&card.text, 40)
                        );
                    } else {
                        debug!("卡片 {} 没有快速申请入口，跳过", card.position_index + 1);
                    }
                    continue;
                }

                progressed = true;
                self.counters.record_eligible_item();
                let ctx = ApplyCtx::new(card.position_index, self.counters.eligible_items_processed);
                info!("➡️ 处理合格职位 {}...", ctx);

                match self.flow.run(board, &ctx).await? {
                    ApplyOutcome::Submitted => {
                        self.counters.record_submission();
                        info!(
                            "🚀 提交进度: {}/{}",
                            self.counters.submissions_completed, self.target_submissions
                        );
                    }
                    ApplyOutcome::Aborted(reason) => {
                        warn!("{} ⚠️ 申请中止: {}", ctx, reason);
                    }
                }
            }

            if self.counters.submissions_completed >= self.target_submissions {
                break;
            }

            // 整轮扫描一个新的合格职位都没有，计一次无进展
            if !progressed {
                self.counters.record_no_progress();
                debug!(
                    "本轮无进展 ({}/{})",
                    self.counters.no_progress_attempts, self.max_no_progress_attempts
                );
            }

            match self
                .pagination
                .advance(board, self.counters.no_progress_attempts)
                .await?
            {
                PageAdvance::ScrolledSameView => {
                    debug!("同视图滚动，去重集合保留 ({} 个位置)", self.dedup.len());
                }
                PageAdvance::NavigatedNewView => {
                    self.dedup.clear();
                    self.counters.reset_no_progress();
                }
                PageAdvance::Exhausted => {
                    warn!("⚠️ 翻页手段已耗尽，提前结束职位发现");
                    break;
                }
            }
        }

        let summary = WorkflowSummary::from(&self.counters);
        info!(
            "🚀 职位申请完成: 提交 {} 份, 处理合格职位 {} 个",
            summary.submissions_completed, summary.eligible_items_processed
        );
        Ok(summary)
    }
}
