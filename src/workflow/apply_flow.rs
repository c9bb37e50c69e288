//! 单个职位的申请流程 - 流程层
//!
//! 核心职责：驱动一个职位从打开详情到提交（或中止）的状态机
//!
//! 状态顺序：
//! 1. Opened：激活卡片，等详情面板渲染
//! 2. ActionLocated：找快速申请按钮，没有就中止
//! 3. FormStep(n)：必填检查 → 自动填写 → 轮询推进控件
//! 4. Submitted / Aborted：结果交还给引擎折叠进计数器
//!
//! 所有职位级的失败都收敛在这里，绝不向上传播成运行级错误；
//! Err 只留给驱动层故障。

use std::time::Duration;

use anyhow::Result;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::models::{AbortReason, ApplyOutcome, AutofillPolicy, ProgressControl};
use crate::services::board::JobBoard;
use crate::workflow::apply_ctx::ApplyCtx;

/// 申请流程
///
/// 职责：
/// - 编排单个职位的完整申请状态机
/// - 持有自动填写策略和时间预算
/// - 不持有任何资源（page）
/// - 不认识去重 / 翻页 / 计数器
pub struct ApplyFlow {
    autofill_policy: AutofillPolicy,
    /// 打开详情后的渲染等待
    detail_settle: Duration,
    /// 每次交互后的固定稳定等待
    settle: Duration,
    /// 单步向导的控件等待预算
    control_timeout: Duration,
}

impl ApplyFlow {
    /// 根据配置创建申请流程
    pub fn new(config: &Config) -> Self {
        Self {
            autofill_policy: AutofillPolicy {
                binary_choice_answer: config.binary_choice_answer.clone(),
                pick_latest_resume: true,
            },
            detail_settle: Duration::from_millis(config.detail_settle_millis),
            settle: Duration::from_millis(config.settle_millis),
            control_timeout: Duration::from_millis(config.control_timeout_millis),
        }
    }

    /// 运行单个职位的申请状态机
    ///
    /// # 返回
    /// 申请结果；Err 只在驱动层故障时出现
    pub async fn run<B: JobBoard>(&self, board: &B, ctx: &ApplyCtx) -> Result<ApplyOutcome> {
        // ========== Opened：激活卡片 ==========
        if !board.open_card(ctx.position_index).await? {
            warn!("{} ⚠️ 卡片已不在页面上，跳过", ctx);
            return Ok(ApplyOutcome::Aborted(AbortReason::StaleListing));
        }
        sleep(self.detail_settle).await;

        // ========== ActionLocated：找快速申请按钮 ==========
        if !board.begin_application().await? {
            warn!("{} ⚠️ 详情页没有快速申请按钮，跳过", ctx);
            return Ok(ApplyOutcome::Aborted(AbortReason::NoActionAvailable));
        }
        info!("{} ✅ 已进入申请向导", ctx);
        sleep(self.settle).await;

        // ========== FormStep(n)：必填门禁 → 自动填写 → 轮询推进 ==========
        // 必填字段可能在任何一步出现，每步都要重新检查；
        // 空着的职位不自动申请，也不重试
        let mut step = 1usize;
        loop {
            if board.has_empty_required_fields().await? {
                warn!("{} ⚠️ 第 {} 步存在未填写的必填字段，关闭弹窗并跳过", ctx, step);
                self.cleanup(board, ctx).await;
                return Ok(ApplyOutcome::Aborted(AbortReason::MissingRequiredFields));
            }
            self.autofill(board, ctx, step).await?;

            match board.advance_wizard(self.control_timeout).await? {
                ProgressControl::Submit => {
                    info!("{} ✅ 申请已提交", ctx);
                    sleep(self.settle).await;
                    return Ok(ApplyOutcome::Submitted);
                }
                ProgressControl::Review => {
                    info!("{} ➡️ 点击回顾按钮", ctx);
                    sleep(self.settle).await;
                }
                ProgressControl::Next => {
                    step += 1;
                    info!("{} ➡️ 进入第 {} 步", ctx, step);
                    sleep(self.settle).await;
                }
                ProgressControl::TimedOut => {
                    warn!("{} ⚠️ 等待预算内没有出现推进控件，中止本次申请", ctx);
                    self.cleanup(board, ctx).await;
                    return Ok(ApplyOutcome::Aborted(AbortReason::NoProgressControl));
                }
            }
        }
    }

    /// 自动填写当前步骤
    async fn autofill<B: JobBoard>(&self, board: &B, ctx: &ApplyCtx, step: usize) -> Result<()> {
        info!("{} 📝 自动填写第 {} 步表单...", ctx, step);
        let report = board.autofill_step(&self.autofill_policy).await?;
        debug!(
            "{} 填写报告: 勾选 {} 个选项, 简历选中: {}",
            ctx, report.choices_selected, report.resume_selected
        );
        sleep(self.settle).await;
        Ok(())
    }

    /// 中止后的弹窗清理：取消 + 关闭，各自尽力而为
    ///
    /// 清理失败只记日志，不影响中止结果
    async fn cleanup<B: JobBoard>(&self, board: &B, ctx: &ApplyCtx) {
        match board.dismiss_application().await {
            Ok(report) => {
                debug!(
                    "{} 清理报告: 取消 {}, 关闭 {}",
                    ctx, report.cancel_clicked, report.dismiss_clicked
                );
            }
            Err(e) => warn!("{} ⚠️ 关闭弹窗时出错: {}", ctx, e),
        }
    }
}
