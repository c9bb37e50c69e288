//! 流程结果类型
//!
//! 状态机和翻页策略的所有"预期内"结果都用带标签的枚举表达，
//! 不用错误传播：只有真正意外的驱动层故障才走 Err 路径

use std::fmt;

use serde::Deserialize;

/// 单个职位申请的最终结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// 申请已提交
    Submitted,
    /// 申请中止（本职位不再重试）
    Aborted(AbortReason),
}

/// 申请中止原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// 详情页没有快速申请按钮
    NoActionAvailable,
    /// 必填字段为空
    MissingRequiredFields,
    /// 等待超时后仍未找到任何推进控件
    NoProgressControl,
    /// 列表项在交互前已失效（页面重渲染）
    StaleListing,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::NoActionAvailable => write!(f, "没有快速申请入口"),
            AbortReason::MissingRequiredFields => write!(f, "必填字段为空"),
            AbortReason::NoProgressControl => write!(f, "未找到推进控件"),
            AbortReason::StaleListing => write!(f, "列表项已失效"),
        }
    }
}

/// 一次向导轮询的结果
///
/// 一轮轮询按优先级只命中其中一个：提交 > 回顾 > 下一步；
/// "Next" 和 "Continue" 视为同一种控件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressControl {
    /// 找到并点击了最终提交按钮
    Submit,
    /// 找到并点击了回顾按钮（停留在当前步骤）
    Review,
    /// 找到并点击了下一步按钮（进入下一步骤）
    Next,
    /// 等待预算内没有出现任何控件
    TimedOut,
}

/// 翻页策略的推进结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAdvance {
    /// 同一视图内滚动（不清空去重集合）
    ScrolledSameView,
    /// 切换到了新页面视图（去重集合和无进展计数需要重置）
    NavigatedNewView,
    /// 没有任何翻页手段了，正常终止条件
    Exhausted,
}

/// 表单自动填写策略
///
/// "二选一问题一律选 yes" 是一个盲目启发式，不是经过验证的推断，
/// 所以做成可配置策略而不是写死在状态机里
#[derive(Debug, Clone)]
pub struct AutofillPolicy {
    /// 二选一（是/否）问题统一选择的答案，与控件 value 的小写形式比较
    pub binary_choice_answer: String,
    /// 简历选择器是否选最近上传的一份
    pub pick_latest_resume: bool,
}

impl Default for AutofillPolicy {
    fn default() -> Self {
        Self {
            binary_choice_answer: "yes".to_string(),
            pick_latest_resume: true,
        }
    }
}

/// 一次自动填写的执行报告
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutofillReport {
    /// 按策略勾选的单选项数量
    pub choices_selected: usize,
    /// 是否选中了简历
    pub resume_selected: bool,
}

/// 弹窗清理报告
///
/// 取消和关闭各自尽力而为，控件缺失只记日志不算失败
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanupReport {
    /// 是否点到了取消按钮
    pub cancel_clicked: bool,
    /// 是否点到了关闭按钮
    pub dismiss_clicked: bool,
}
