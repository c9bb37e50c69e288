//! 登录会话服务 - 业务能力层
//!
//! 只负责"确保已登录"能力，不关心工作流程。
//! 登录失败是整次运行唯一的致命错误来源之一。

use std::time::Duration;

use anyhow::Result;
use chromiumoxide::{Element, Page};
use tokio::time::{sleep, Instant};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, AuthError};

/// 登录入口页
const HOME_URL: &str = "https://www.linkedin.com/";
const LOGIN_URL: &str = "https://www.linkedin.com/login";

/// 登录态的标志元素：导航栏头像
const NAV_AVATAR_SELECTOR: &str = ".global-nav__me-photo";
const USERNAME_SELECTOR: &str = "#username";
const PASSWORD_SELECTOR: &str = "#password";
const SUBMIT_SELECTOR: &str = "[type=\"submit\"]";

/// 检测已有会话的等待上限
const SESSION_CHECK_TIMEOUT: Duration = Duration::from_secs(5);
/// 提交登录表单后的等待上限
const LOGIN_TIMEOUT: Duration = Duration::from_secs(10);
/// 元素轮询间隔
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// 认证结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    /// 已有有效会话，无需登录
    AlreadyAuthenticated,
    /// 本次运行完成了登录
    LoggedIn,
}

/// 确保浏览器会话已登录
///
/// 先访问首页探测登录态；没有会话时走登录表单流程。
/// 任何一步在等待上限内没有出现登录态标志，都作为致命的认证错误返回。
pub async fn ensure_authenticated(page: &Page, config: &Config) -> Result<AuthOutcome> {
    info!("🔍 检查登录状态...");
    page.goto(HOME_URL).await?;

    if wait_for_selector(page, NAV_AVATAR_SELECTOR, SESSION_CHECK_TIMEOUT)
        .await
        .is_some()
    {
        info!("✅ 已处于登录状态");
        return Ok(AuthOutcome::AlreadyAuthenticated);
    }

    info!("❌ 未登录，开始登录流程...");
    if config.linkedin_email.is_empty() || config.linkedin_password.is_empty() {
        return Err(AppError::Auth(AuthError::MissingCredentials).into());
    }

    page.goto(LOGIN_URL).await?;

    type_into(page, USERNAME_SELECTOR, &config.linkedin_email).await?;
    type_into(page, PASSWORD_SELECTOR, &config.linkedin_password).await?;

    let submit = page.find_element(SUBMIT_SELECTOR).await?;
    submit.click().await?;

    if wait_for_selector(page, NAV_AVATAR_SELECTOR, LOGIN_TIMEOUT)
        .await
        .is_some()
    {
        info!("✅ 登录成功");
        Ok(AuthOutcome::LoggedIn)
    } else {
        warn!("❌ 登录失败！请检查凭据或是否触发了风控");
        Err(AppError::Auth(AuthError::LoginTimeout {
            waited_secs: LOGIN_TIMEOUT.as_secs(),
        })
        .into())
    }
}

/// 在超时预算内轮询等待选择器出现
///
/// 超时不是错误，返回 None 交由调用方决定后续分支
async fn wait_for_selector(page: &Page, selector: &str, timeout: Duration) -> Option<Element> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Ok(element) = page.find_element(selector).await {
            return Some(element);
        }
        if Instant::now() >= deadline {
            return None;
        }
        sleep(POLL_INTERVAL).await;
    }
}

/// 向输入框逐段输入文本，输入前后留出短暂间隔
async fn type_into(page: &Page, selector: &str, text: &str) -> Result<()> {
    let element = page.find_element(selector).await?;
    element.click().await?;
    sleep(Duration::from_millis(200)).await;
    element.type_str(text).await?;
    sleep(Duration::from_millis(200)).await;
    Ok(())
}
