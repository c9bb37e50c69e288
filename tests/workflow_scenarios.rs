//! 发现循环 + 申请状态机的场景测试
//!
//! 用脚本化的假列表页驱动整个引擎，不需要真实浏览器。
//! 时间预算全部设为 0，测试即时完成。

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use easy_apply_bot::config::Config;
use easy_apply_bot::models::{
    AutofillPolicy, AutofillReport, CleanupReport, JobCardSnapshot, PageAdvance, ProgressControl,
};
use easy_apply_bot::orchestrator::ApplyEngine;
use easy_apply_bot::services::{JobBoard, PaginationStrategy};

/// 单张卡片的脚本：详情页行为 + 每步向导返回的控件
struct CardScript {
    text: String,
    has_apply_button: bool,
    empty_required: bool,
    /// 逐次消费的必填检查结果，耗尽后回落到 `empty_required`
    required_checks: VecDeque<bool>,
    controls: VecDeque<ProgressControl>,
}

impl CardScript {
    /// 不带快速申请入口的普通卡片
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            has_apply_button: false,
            empty_required: false,
            required_checks: VecDeque::new(),
            controls: VecDeque::new(),
        }
    }

    /// 带快速申请入口的卡片，按给定控件序列推进向导
    fn eligible(controls: Vec<ProgressControl>) -> Self {
        Self {
            text: "软件工程师\nEasy Apply".to_string(),
            has_apply_button: true,
            empty_required: false,
            required_checks: VecDeque::new(),
            controls: controls.into(),
        }
    }

    fn with_empty_required(mut self) -> Self {
        self.empty_required = true;
        self
    }

    /// 按步骤给定必填检查结果（第 n 次检查返回第 n 个值）
    fn with_required_checks(mut self, results: Vec<bool>) -> Self {
        self.required_checks = results.into();
        self
    }
}

struct FakePageView {
    cards: Vec<CardScript>,
    has_next_control: bool,
}

struct FakeState {
    pages: Vec<FakePageView>,
    current_page: usize,
    opened: Option<usize>,
    /// 按打开顺序记录的 (页号, 位置)
    open_history: Vec<(usize, usize)>,
    autofill_calls: usize,
    dismiss_calls: usize,
    scroll_calls: usize,
    next_page_clicks: usize,
    navigations: Vec<String>,
}

/// 脚本化的假列表页
struct FakeBoard {
    state: Mutex<FakeState>,
    current_url: String,
}

impl FakeBoard {
    fn new(pages: Vec<FakePageView>) -> Self {
        Self {
            state: Mutex::new(FakeState {
                pages,
                current_page: 0,
                opened: None,
                open_history: Vec::new(),
                autofill_calls: 0,
                dismiss_calls: 0,
                scroll_calls: 0,
                next_page_clicks: 0,
                navigations: Vec::new(),
            }),
            // 不是合法的 http 地址，推导下一页地址必然失败
            current_url: String::new(),
        }
    }

    fn single_page(cards: Vec<CardScript>) -> Self {
        Self::new(vec![FakePageView {
            cards,
            has_next_control: false,
        }])
    }
}

#[async_trait]
impl JobBoard for FakeBoard {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.state.lock().unwrap().navigations.push(url.to_string());
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.current_url.clone())
    }

    async fn scan_cards(&self) -> Result<Vec<JobCardSnapshot>> {
        let state = self.state.lock().unwrap();
        let page = &state.pages[state.current_page];
        Ok(page
            .cards
            .iter()
            .enumerate()
            .map(|(i, card)| JobCardSnapshot {
                position_index: i,
                text: card.text.clone(),
            })
            .collect())
    }

    async fn open_card(&self, position_index: usize) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        let page_index = state.current_page;
        if position_index >= state.pages[page_index].cards.len() {
            return Ok(false);
        }
        state.opened = Some(position_index);
        state.open_history.push((page_index, position_index));
        Ok(true)
    }

    async fn begin_application(&self) -> Result<bool> {
        let state = self.state.lock().unwrap();
        let opened = state.opened.expect("必须先打开卡片");
        Ok(state.pages[state.current_page].cards[opened].has_apply_button)
    }

    async fn has_empty_required_fields(&self) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        let opened = state.opened.expect("必须先打开卡片");
        let page = state.current_page;
        let card = &mut state.pages[page].cards[opened];
        Ok(card.required_checks.pop_front().unwrap_or(card.empty_required))
    }

    async fn autofill_step(&self, _policy: &AutofillPolicy) -> Result<AutofillReport> {
        self.state.lock().unwrap().autofill_calls += 1;
        Ok(AutofillReport::default())
    }

    async fn advance_wizard(&self, _timeout: Duration) -> Result<ProgressControl> {
        let mut state = self.state.lock().unwrap();
        let opened = state.opened.expect("必须先打开卡片");
        let page = state.current_page;
        Ok(state.pages[page].cards[opened]
            .controls
            .pop_front()
            .unwrap_or(ProgressControl::TimedOut))
    }

    async fn dismiss_application(&self) -> Result<CleanupReport> {
        self.state.lock().unwrap().dismiss_calls += 1;
        Ok(CleanupReport {
            cancel_clicked: true,
            dismiss_clicked: true,
        })
    }

    async fn scroll_list(&self) -> Result<()> {
        self.state.lock().unwrap().scroll_calls += 1;
        Ok(())
    }

    async fn click_next_page(&self) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        let page = state.current_page;
        if state.pages[page].has_next_control && page + 1 < state.pages.len() {
            state.current_page += 1;
            state.next_page_clicks += 1;
            state.opened = None;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

/// 时间预算全为 0 的测试配置
fn test_config(target_submissions: usize, max_no_progress_attempts: usize) -> Config {
    Config {
        target_submissions,
        max_no_progress_attempts,
        settle_millis: 0,
        detail_settle_millis: 0,
        control_timeout_millis: 0,
        ..Config::default()
    }
}

/// 10 张卡片里 3 张合格，目标 2 份：按位置升序处理，
/// 第 2 份提交后立即停止，第 3 张合格卡片不再访问
#[tokio::test]
async fn test_stops_at_target_leaving_remaining_eligible_unvisited() {
    let mut cards: Vec<CardScript> = (0..10)
        .map(|i| CardScript::plain(&format!("职位 {}", i)))
        .collect();
    for position in [1, 4, 7] {
        cards[position] = CardScript::eligible(vec![ProgressControl::Submit]);
    }
    let board = FakeBoard::single_page(cards);

    let mut engine = ApplyEngine::new(&test_config(2, 10));
    let summary = engine.run(&board).await.unwrap();

    assert_eq!(summary.submissions_completed, 2);
    assert_eq!(summary.eligible_items_processed, 2);

    let state = board.state.lock().unwrap();
    assert_eq!(state.open_history, vec![(0, 1), (0, 4)]);
}

/// 必填字段为空 → 中止 + 清理弹窗，提交数不变，处理数加一
#[tokio::test]
async fn test_empty_required_fields_abort_with_cleanup() {
    let cards = vec![CardScript::eligible(vec![]).with_empty_required()];
    let board = FakeBoard::single_page(cards);

    let mut engine = ApplyEngine::new(&test_config(5, 1));
    let summary = engine.run(&board).await.unwrap();

    assert_eq!(summary.submissions_completed, 0);
    assert_eq!(summary.eligible_items_processed, 1);

    let state = board.state.lock().unwrap();
    assert_eq!(state.dismiss_calls, 1, "应当尝试过取消+关闭清理");
    assert_eq!(state.autofill_calls, 0, "必填缺失时不应填写表单");
}

/// 3 步向导（Next, Next, Submit）→ 恰好 3 次填写、1 次提交
#[tokio::test]
async fn test_three_step_wizard_fills_once_per_step() {
    let cards = vec![CardScript::eligible(vec![
        ProgressControl::Next,
        ProgressControl::Next,
        ProgressControl::Submit,
    ])];
    let board = FakeBoard::single_page(cards);

    let mut engine = ApplyEngine::new(&test_config(1, 1));
    let summary = engine.run(&board).await.unwrap();

    assert_eq!(summary.submissions_completed, 1);

    let state = board.state.lock().unwrap();
    assert_eq!(state.autofill_calls, 3, "每个向导步骤恰好一次自动填写");
}

/// 必填字段在第 2 步才出现 → 每个步骤都重新检查，发现即中止
#[tokio::test]
async fn test_required_fields_rechecked_on_each_step() {
    let cards = vec![CardScript::eligible(vec![
        ProgressControl::Next,
        ProgressControl::Submit,
    ])
    .with_required_checks(vec![false, true])];
    let board = FakeBoard::single_page(cards);

    let mut engine = ApplyEngine::new(&test_config(1, 1));
    let summary = engine.run(&board).await.unwrap();

    assert_eq!(summary.submissions_completed, 0, "第 2 步必填缺失时不应提交");
    assert_eq!(summary.eligible_items_processed, 1);

    let state = board.state.lock().unwrap();
    assert_eq!(state.autofill_calls, 1, "发现必填缺失的步骤不应再填写");
    assert_eq!(state.dismiss_calls, 1);
}

/// 回顾控件不推进步骤，但会触发一次重新填写
#[tokio::test]
async fn test_review_control_refills_same_step() {
    let cards = vec![CardScript::eligible(vec![
        ProgressControl::Review,
        ProgressControl::Submit,
    ])];
    let board = FakeBoard::single_page(cards);

    let mut engine = ApplyEngine::new(&test_config(1, 1));
    let summary = engine.run(&board).await.unwrap();

    assert_eq!(summary.submissions_completed, 1);
    assert_eq!(board.state.lock().unwrap().autofill_calls, 2);
}

/// 控件超时 → Aborted(NoProgressControl)，清理后继续循环直至耗尽
#[tokio::test]
async fn test_wizard_timeout_aborts_item() {
    let cards = vec![CardScript::eligible(vec![ProgressControl::Next])];
    let board = FakeBoard::single_page(cards);

    let mut engine = ApplyEngine::new(&test_config(1, 1));
    let summary = engine.run(&board).await.unwrap();

    assert_eq!(summary.submissions_completed, 0);
    assert_eq!(summary.eligible_items_processed, 1);
    assert_eq!(board.state.lock().unwrap().dismiss_calls, 1);
}

/// 从未出现合格职位且无下一页，上限 1 →
/// 恰好一个无进展周期后终止，提交数为 0
#[tokio::test]
async fn test_exhaustion_after_single_no_progress_cycle() {
    let cards = vec![CardScript::plain("外部申请职位")];
    let board = FakeBoard::single_page(cards);

    let mut engine = ApplyEngine::new(&test_config(5, 1));
    let summary = engine.run(&board).await.unwrap();

    assert_eq!(summary.submissions_completed, 0);
    assert_eq!(summary.eligible_items_processed, 0);

    let state = board.state.lock().unwrap();
    assert_eq!(state.scroll_calls, 0, "上限为 1 时无进展后直接尝试翻页");
    assert_eq!(state.next_page_clicks, 0, "没有可用的下一页控件");
}

/// 翻页不变量：切换页面清空去重集合并重置无进展计数；
/// 同视图滚动保留去重集合（同一卡片绝不打开两次）
#[tokio::test]
async fn test_page_change_resets_dedup_but_scroll_does_not() {
    let pages = vec![
        FakePageView {
            cards: vec![CardScript::eligible(vec![ProgressControl::Submit])],
            has_next_control: true,
        },
        FakePageView {
            cards: vec![CardScript::eligible(vec![ProgressControl::Submit])],
            has_next_control: false,
        },
    ];
    let board = FakeBoard::new(pages);

    let mut engine = ApplyEngine::new(&test_config(2, 1));
    let summary = engine.run(&board).await.unwrap();

    assert_eq!(summary.submissions_completed, 2);
    assert_eq!(summary.eligible_items_processed, 2);

    let state = board.state.lock().unwrap();
    // 第 0 页位置 0 只打开一次（滚动轮保留去重），
    // 翻页后第 1 页的位置 0 能再次处理（去重已清空）
    assert_eq!(state.open_history, vec![(0, 0), (1, 0)]);
    assert_eq!(state.next_page_clicks, 1);
    assert!(state.scroll_calls >= 1, "翻页之前应当有同视图滚动");
}

/// 翻页策略耗尽后幂等：重复调用始终返回 Exhausted，不再触碰页面
#[tokio::test]
async fn test_pagination_exhausted_is_idempotent() {
    let board = FakeBoard::single_page(vec![]);
    let mut strategy = PaginationStrategy::new(1);

    assert_eq!(
        strategy.advance(&board, 1).await.unwrap(),
        PageAdvance::Exhausted
    );
    let clicks_after_first = board.state.lock().unwrap().next_page_clicks;

    for _ in 0..3 {
        assert_eq!(
            strategy.advance(&board, 1).await.unwrap(),
            PageAdvance::Exhausted
        );
    }
    let state = board.state.lock().unwrap();
    assert_eq!(state.next_page_clicks, clicks_after_first);
    assert_eq!(state.scroll_calls, 0);
}

/// 无进展次数未到上限时只滚动，不翻页
#[tokio::test]
async fn test_pagination_scrolls_below_ceiling() {
    let board = FakeBoard::single_page(vec![]);
    let mut strategy = PaginationStrategy::new(3);

    assert_eq!(
        strategy.advance(&board, 1).await.unwrap(),
        PageAdvance::ScrolledSameView
    );
    let state = board.state.lock().unwrap();
    assert_eq!(state.scroll_calls, 1);
    assert_eq!(state.next_page_clicks, 0);
}
