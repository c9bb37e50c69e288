//! 职位列表页能力面 - 业务能力层
//!
//! 工作流核心只消费这个抽象能力接口，不依赖具体的浏览器实现。
//! 选择器 / XPath 全部是实现细节，只存在于具体实现里。

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{AutofillPolicy, AutofillReport, CleanupReport, JobCardSnapshot, ProgressControl};

/// 职位列表页的驱动能力
///
/// 约定：
/// - 所有方法都是单线程顺序调用，底层页面是唯一共享可变资源
/// - 预期内的"没找到"用 bool / 枚举表达，Err 只留给驱动层故障
#[async_trait]
pub trait JobBoard: Send + Sync {
    /// 导航到指定地址
    async fn navigate(&self, url: &str) -> Result<()>;

    /// 当前页面地址
    async fn current_url(&self) -> Result<String>;

    /// 扫描当前视图的职位卡片，按页内位置升序返回快照
    async fn scan_cards(&self) -> Result<Vec<JobCardSnapshot>>;

    /// 激活指定位置的卡片，打开详情面板
    ///
    /// # 返回
    /// 卡片已不在页面上（重渲染导致失效）时返回 false
    async fn open_card(&self, position_index: usize) -> Result<bool>;

    /// 查找并点击详情面板上的快速申请按钮
    ///
    /// # 返回
    /// 按钮不存在时返回 false
    async fn begin_application(&self) -> Result<bool>;

    /// 当前表单步骤是否存在未填写的必填字段
    async fn has_empty_required_fields(&self) -> Result<bool>;

    /// 按策略自动填写当前表单步骤
    async fn autofill_step(&self, policy: &AutofillPolicy) -> Result<AutofillReport>;

    /// 一次向导推进：在等待预算内轮询提交 / 回顾 / 下一步控件，
    /// 按优先级点击第一个命中的控件
    ///
    /// 超时不是错误，返回 [`ProgressControl::TimedOut`]
    async fn advance_wizard(&self, timeout: Duration) -> Result<ProgressControl>;

    /// 关闭申请弹窗：先取消再关闭，各自尽力而为
    async fn dismiss_application(&self) -> Result<CleanupReport>;

    /// 同一视图内滚动列表容器一个视口单位
    async fn scroll_list(&self) -> Result<()>;

    /// 查找并点击可用的"下一页"控件
    ///
    /// # 返回
    /// 控件不存在或被禁用时返回 false
    async fn click_next_page(&self) -> Result<bool>;
}
