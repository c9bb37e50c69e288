//! 工作流计数器
//!
//! 跨越嵌套循环累积的全局可变计数，收拢成一个显式的值，
//! 只在引擎的固定折叠点被修改，嵌套回调里绝不读改写

/// 单次运行的计数器
///
/// 不变量：`submissions_completed <= eligible_items_processed`
#[derive(Debug, Default, Clone, Copy)]
pub struct WorkflowCounters {
    /// 已成功提交的申请数量
    pub submissions_completed: usize,
    /// 已处理（进入状态机）的合格职位数量
    pub eligible_items_processed: usize,
    /// 连续无进展的滚动/翻页尝试次数
    pub no_progress_attempts: usize,
}

impl WorkflowCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// 折叠一次成功提交
    pub fn record_submission(&mut self) {
        self.submissions_completed += 1;
    }

    /// 折叠一次合格职位的处理（无论最终提交还是中止）
    pub fn record_eligible_item(&mut self) {
        self.eligible_items_processed += 1;
    }

    /// 折叠一次无进展扫描
    pub fn record_no_progress(&mut self) {
        self.no_progress_attempts += 1;
    }

    /// 页面视图切换后重置无进展计数
    pub fn reset_no_progress(&mut self) {
        self.no_progress_attempts = 0;
    }
}

/// 运行结束时对外报告的汇总
///
/// 无论正常达标还是翻页耗尽提前终止，都会报告
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowSummary {
    /// 已成功提交的申请数量
    pub submissions_completed: usize,
    /// 已处理的合格职位数量
    pub eligible_items_processed: usize,
}

impl From<&WorkflowCounters> for WorkflowSummary {
    fn from(counters: &WorkflowCounters) -> Self {
        Self {
            submissions_completed: counters.submissions_completed,
            eligible_items_processed: counters.eligible_items_processed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_points() {
        let mut counters = WorkflowCounters::new();
        counters.record_eligible_item();
        counters.record_submission();
        counters.record_no_progress();
        counters.record_no_progress();
        assert_eq!(counters.submissions_completed, 1);
        assert_eq!(counters.eligible_items_processed, 1);
        assert_eq!(counters.no_progress_attempts, 2);

        counters.reset_no_progress();
        assert_eq!(counters.no_progress_attempts, 0);

        let summary = WorkflowSummary::from(&counters);
        assert_eq!(summary.submissions_completed, 1);
        assert_eq!(summary.eligible_items_processed, 1);
    }
}
