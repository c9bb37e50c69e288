//! 翻页策略 - 业务能力层
//!
//! 当前视图里挖不出新职位时，决定如何让更多职位露出来。
//! 按顺序尝试：视图内滚动 → 可用的"下一页"控件 → 直接改写地址里的
//! 偏移参数。三条路都走不通才返回 Exhausted，这是正常终止条件。

use anyhow::Result;
use regex::Regex;
use tracing::{info, warn};
use url::Url;

use crate::models::PageAdvance;
use crate::services::board::JobBoard;

/// 每页职位数量，偏移参数按这个步长递增
const PAGE_SIZE: usize = 25;

/// 翻页策略
///
/// 职责：
/// - 决定滚动还是翻页
/// - 翻页控件缺失时构造下一页地址兜底
/// - 不认识去重 / 计数器（无进展次数由引擎传入）
#[derive(Debug)]
pub struct PaginationStrategy {
    max_no_progress_attempts: usize,
    exhausted: bool,
}

impl PaginationStrategy {
    /// 创建新的翻页策略
    ///
    /// # 参数
    /// - `max_no_progress_attempts`: 无进展滚动的次数上限，达到后改走翻页
    pub fn new(max_no_progress_attempts: usize) -> Self {
        Self {
            max_no_progress_attempts,
            exhausted: false,
        }
    }

    /// 推进一次
    ///
    /// Exhausted 是粘性状态：一旦返回，后续调用不再触碰页面，
    /// 始终返回 Exhausted
    pub async fn advance<B: JobBoard>(
        &mut self,
        board: &B,
        no_progress_attempts: usize,
    ) -> Result<PageAdvance> {
        if self.exhausted {
            return Ok(PageAdvance::Exhausted);
        }

        // 还没到滚动次数上限：同一视图内滚动，不影响去重
        if no_progress_attempts < self.max_no_progress_attempts {
            board.scroll_list().await?;
            return Ok(PageAdvance::ScrolledSameView);
        }

        // 滚动挖不出新职位了，先找可用的"下一页"控件
        if board.click_next_page().await? {
            info!("➡️ 点击下一页控件，切换到新页面");
            return Ok(PageAdvance::NavigatedNewView);
        }

        // 兜底：改写地址里的偏移参数直接导航
        let current = board.current_url().await?;
        if let Some(next_url) = derive_next_page_url(&current) {
            info!("➡️ 没有下一页控件，直接导航到: {}", next_url);
            board.navigate(&next_url).await?;
            return Ok(PageAdvance::NavigatedNewView);
        }

        warn!("⚠️ 既没有下一页控件，也无法构造下一页地址，结束职位发现");
        self.exhausted = true;
        Ok(PageAdvance::Exhausted)
    }
}

/// 从当前地址推导下一页地址
///
/// - 地址里已有 `start=N`：把 N 加一页
/// - 没有：追加一次 `start=25`（有无查询串分别用 `?` / `&`）
/// - 不是合法的 http(s) 绝对地址：无法推导，返回 None
pub fn derive_next_page_url(current_url: &str) -> Option<String> {
    let parsed = Url::parse(current_url).ok()?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return None;
    }

    let offset_re = Regex::new(r"start=(\d+)").ok()?;
    if let Some(captures) = offset_re.captures(current_url) {
        let start: usize = captures[1].parse().ok()?;
        let next = start + PAGE_SIZE;
        return Some(
            offset_re
                .replace(current_url, format!("start={}", next))
                .into_owned(),
        );
    }

    if current_url.contains('?') {
        Some(format!("{}&start={}", current_url, PAGE_SIZE))
    } else {
        Some(format!("{}?start={}", current_url, PAGE_SIZE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 没有偏移参数时只追加一次默认偏移
    #[test]
    fn test_derive_appends_offset_once() {
        let next = derive_next_page_url("https://www.linkedin.com/jobs/search/?keywords=rust")
            .expect("应当可以推导");
        assert_eq!(
            next,
            "https://www.linkedin.com/jobs/search/?keywords=rust&start=25"
        );
        assert_eq!(next.matches("start=").count(), 1);
    }

    #[test]
    fn test_derive_appends_query_when_absent() {
        let next =
            derive_next_page_url("https://www.linkedin.com/jobs/search").expect("应当可以推导");
        assert_eq!(next, "https://www.linkedin.com/jobs/search?start=25");
    }

    #[test]
    fn test_derive_increments_existing_offset() {
        let next = derive_next_page_url(
            "https://www.linkedin.com/jobs/search/?keywords=rust&start=25",
        )
        .expect("应当可以推导");
        assert_eq!(
            next,
            "https://www.linkedin.com/jobs/search/?keywords=rust&start=50"
        );
    }

    /// 不是 http(s) 绝对地址时无法推导
    #[test]
    fn test_derive_rejects_non_http_addresses() {
        assert!(derive_next_page_url("").is_none());
        assert!(derive_next_page_url("about:blank").is_none());
        assert!(derive_next_page_url("/jobs/search").is_none());
    }
}
