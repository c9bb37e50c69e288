//! 职位列表页驱动实现 - 业务能力层
//!
//! [`JobBoard`] 的 chromiumoxide 实现：所有 DOM 交互都通过
//! [`JsExecutor`] 在页面内执行脚本完成，脚本返回 JSON 再反序列化。
//! 选择器和 XPath 只存在于本文件。

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use crate::infrastructure::JsExecutor;
use crate::models::{AutofillPolicy, AutofillReport, CleanupReport, JobCardSnapshot, ProgressControl};
use crate::services::board::JobBoard;

/// 控件轮询间隔
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// 扫描职位卡片，返回页内位置 + 渲染文本的快照数组
const SCAN_CARDS_JS: &str = r#"
(() => {
    const cards = document.querySelectorAll('.job-card-container');
    return Array.from(cards).map((el, i) => ({ positionIndex: i, text: el.innerText || '' }));
})()
"#;

/// 查找并点击详情面板上的快速申请按钮
const BEGIN_APPLICATION_JS: &str = r#"
(() => {
    const button = document.querySelector('.jobs-apply-button');
    if (!button) return false;
    button.click();
    return true;
})()
"#;

/// 检查当前表单步骤是否有未填写的必填字段
const EMPTY_REQUIRED_FIELDS_JS: &str = r#"
(() => {
    const inputs = Array.from(document.querySelectorAll('input[required]'));
    return inputs.filter((input) => !input.value.trim()).length > 0;
})()
"#;

/// 一轮向导控件轮询：按 提交 > 回顾 > 下一步 的优先级点击第一个命中的控件。
/// 一轮最多命中一个，互斥由脚本的提前返回保证。
const ADVANCE_PASS_JS: &str = r#"
(() => {
    const byXPath = (expr) => document.evaluate(
        expr, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null
    ).singleNodeValue;
    const submit = document.querySelector('button[aria-label="Submit application"]');
    if (submit) { submit.click(); return 'submit'; }
    const review = byXPath("//button[contains(., 'Review')]");
    if (review) { review.click(); return 'review'; }
    const next = byXPath("//button[contains(., 'Next') or contains(., 'Continue')]");
    if (next) { next.click(); return 'next'; }
    return null;
})()
"#;

const CANCEL_MODAL_JS: &str = r#"
(() => {
    const button = document.querySelector('button[aria-label="Cancel"]');
    if (!button) return false;
    button.click();
    return true;
})()
"#;

const DISMISS_MODAL_JS: &str = r#"
(() => {
    const button = document.querySelector('button[aria-label="Dismiss"]');
    if (!button) return false;
    button.click();
    return true;
})()
"#;

/// 滚动职位列表：找到第一张卡片最近的可滚动祖先容器，滚动一个视口单位；
/// 找不到容器就滚动窗口本身
const SCROLL_LIST_JS: &str = r#"
(() => {
    const card = document.querySelector('.job-card-container');
    if (!card) {
        window.scrollBy(0, window.innerHeight);
        return true;
    }
    let container = card.parentElement;
    while (container) {
        const style = window.getComputedStyle(container);
        const overflowY = style.getPropertyValue('overflow-y');
        if (overflowY === 'auto' || overflowY === 'scroll') {
            container.scrollBy(0, container.clientHeight);
            return true;
        }
        container = container.parentElement;
    }
    window.scrollBy(0, window.innerHeight);
    return true;
})()
"#;

/// 先滚到页面底部，保证分页控件可见
const SCROLL_TO_BOTTOM_JS: &str = r#"
(() => { window.scrollTo(0, document.body.scrollHeight); return true; })()
"#;

/// 查找并点击可用的"下一页"按钮
const NEXT_PAGE_JS: &str = r#"
(() => {
    const button = document.evaluate(
        "//button[contains(@aria-label, 'Next') and not(@disabled)]",
        document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null
    ).singleNodeValue;
    if (!button) return false;
    button.click();
    return true;
})()
"#;

/// 职位列表页驱动
///
/// 职责：
/// - 把 [`JobBoard`] 的每个能力翻译成一段页面脚本
/// - 不认识去重 / 计数 / 状态机
/// - 不决定流程顺序
pub struct CdpJobBoard {
    executor: JsExecutor,
    settle: Duration,
}

impl CdpJobBoard {
    /// 创建新的列表页驱动
    ///
    /// # 参数
    /// - `executor`: JS 执行器（持有 page）
    /// - `settle`: 交互后固定的稳定等待时长
    pub fn new(executor: JsExecutor, settle: Duration) -> Self {
        Self { executor, settle }
    }
}

#[async_trait]
impl JobBoard for CdpJobBoard {
    async fn navigate(&self, url: &str) -> Result<()> {
        debug!("导航到: {}", url);
        self.executor.page().goto(url).await?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        let url = self.executor.page().url().await?;
        Ok(url.unwrap_or_default())
    }

    async fn scan_cards(&self) -> Result<Vec<JobCardSnapshot>> {
        let cards: Vec<JobCardSnapshot> = self.executor.eval_as(SCAN_CARDS_JS).await?;
        debug!("扫描到 {} 张职位卡片", cards.len());
        Ok(cards)
    }

    async fn open_card(&self, position_index: usize) -> Result<bool> {
        let js_code = format!(
            r#"
            (() => {{
                const cards = document.querySelectorAll('.job-card-container');
                if ({index} >= cards.length) return false;
                cards[{index}].click();
                return true;
            }})()
            "#,
            index = position_index
        );
        self.executor.eval_as(js_code).await
    }

    async fn begin_application(&self) -> Result<bool> {
        self.executor.eval_as(BEGIN_APPLICATION_JS).await
    }

    async fn has_empty_required_fields(&self) -> Result<bool> {
        self.executor.eval_as(EMPTY_REQUIRED_FIELDS_JS).await
    }

    async fn autofill_step(&self, policy: &AutofillPolicy) -> Result<AutofillReport> {
        let answer = serde_json::to_string(&policy.binary_choice_answer.to_lowercase())?;
        let js_code = format!(
            r#"
            (() => {{
                const answer = {answer};
                let choicesSelected = 0;
                for (const radio of document.querySelectorAll('input[type="radio"]')) {{
                    const value = radio.getAttribute('value');
                    if (value && value.toLowerCase() === answer) {{
                        radio.click();
                        choicesSelected += 1;
                    }}
                }}
                let resumeSelected = false;
                if ({pick_resume}) {{
                    const picker = document.querySelector('select[name="resume-picker"]');
                    if (picker && picker.options.length > 0) {{
                        picker.selectedIndex = 0;
                        picker.dispatchEvent(new Event('change', {{ bubbles: true }}));
                        resumeSelected = true;
                    }}
                }}
                return {{ choicesSelected, resumeSelected }};
            }})()
            "#,
            answer = answer,
            pick_resume = policy.pick_latest_resume,
        );
        let report: AutofillReport = self.executor.eval_as(js_code).await?;
        Ok(report)
    }

    async fn advance_wizard(&self, timeout: Duration) -> Result<ProgressControl> {
        let deadline = Instant::now() + timeout;
        loop {
            let clicked: Option<String> = self.executor.eval_as(ADVANCE_PASS_JS).await?;
            match clicked.as_deref() {
                Some("submit") => return Ok(ProgressControl::Submit),
                Some("review") => return Ok(ProgressControl::Review),
                Some("next") => return Ok(ProgressControl::Next),
                Some(other) => {
                    warn!("向导轮询返回了未知标记: {}", other);
                    return Ok(ProgressControl::TimedOut);
                }
                None => {}
            }
            if Instant::now() >= deadline {
                return Ok(ProgressControl::TimedOut);
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    async fn dismiss_application(&self) -> Result<CleanupReport> {
        let cancel_clicked: bool = self.executor.eval_as(CANCEL_MODAL_JS).await?;
        if cancel_clicked {
            sleep(self.settle).await;
        } else {
            debug!("没有找到取消按钮");
        }

        let dismiss_clicked: bool = self.executor.eval_as(DISMISS_MODAL_JS).await?;
        if dismiss_clicked {
            sleep(self.settle).await;
        } else {
            debug!("没有找到关闭按钮");
        }

        Ok(CleanupReport {
            cancel_clicked,
            dismiss_clicked,
        })
    }

    async fn scroll_list(&self) -> Result<()> {
        let _: bool = self.executor.eval_as(SCROLL_LIST_JS).await?;
        sleep(self.settle).await;
        Ok(())
    }

    async fn click_next_page(&self) -> Result<bool> {
        // 分页控件在列表底部，先保证它可见
        let _: bool = self.executor.eval_as(SCROLL_TO_BOTTOM_JS).await?;
        sleep(self.settle).await;
        self.executor.eval_as(NEXT_PAGE_JS).await
    }
}
