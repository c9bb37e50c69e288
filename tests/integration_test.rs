use std::time::Duration;

use easy_apply_bot::browser::establish_session;
use easy_apply_bot::config::Config;
use easy_apply_bot::infrastructure::JsExecutor;
use easy_apply_bot::services::auth::ensure_authenticated;
use easy_apply_bot::services::{CdpJobBoard, JobBoard};
use easy_apply_bot::utils::logging;
use easy_apply_bot::ApplyEngine;

#[tokio::test]
#[ignore] // 默认忽略，需要手动运行：cargo test -- --ignored
async fn test_browser_session() {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 建立浏览器会话（配置了 BROWSER_WS_ENDPOINT 则连接，否则启动新实例）
    let mut session = establish_session(&config)
        .await
        .expect("建立浏览器会话失败");

    session.close_if_owned().await;
}

#[tokio::test]
#[ignore]
async fn test_authentication() {
    // 初始化日志
    logging::init();

    // 加载配置（需要 LINKEDIN_EMAIL / LINKEDIN_PASSWORD）
    let config = Config::from_env();

    // 建立浏览器会话
    let mut session = establish_session(&config)
        .await
        .expect("建立浏览器会话失败");

    // 确保已登录
    let outcome = ensure_authenticated(session.page(), &config).await;

    session.close_if_owned().await;

    assert!(outcome.is_ok(), "应该能够完成登录检查");
}

#[tokio::test]
#[ignore]
async fn test_full_discovery_run() {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 建立浏览器会话并登录
    let mut session = establish_session(&config)
        .await
        .expect("建立浏览器会话失败");
    ensure_authenticated(session.page(), &config)
        .await
        .expect("登录失败");

    // 导航到职位搜索页并运行发现循环
    let executor = JsExecutor::new(session.page().clone());
    let board = CdpJobBoard::new(executor, Duration::from_millis(config.settle_millis));
    board
        .navigate(&config.job_search_url())
        .await
        .expect("导航到职位搜索页失败");

    let summary = ApplyEngine::new(&config)
        .run(&board)
        .await
        .expect("发现循环运行失败");

    session.close_if_owned().await;

    assert!(
        summary.submissions_completed <= config.target_submissions,
        "提交数不应超过目标"
    );
}
