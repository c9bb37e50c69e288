//! 浏览器会话建立
//!
//! 配置了调试端点就连接已有实例（连接失败回退到启动新实例），
//! 否则直接启动。会话记录所有权：谁创建谁关闭。

pub mod connection;
pub mod launch;

use anyhow::Result;
use chromiumoxide::{Browser, Page};
use tracing::{info, warn};

use crate::config::Config;

pub use connection::connect_to_existing;
pub use launch::launch_browser;

/// 浏览器会话
///
/// `owned` 为 true 表示浏览器由本次运行启动，结束时由我们关闭；
/// 连接到外部提供的实例时不关闭
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    owned: bool,
}

impl BrowserSession {
    /// 获取页面引用
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 浏览器是否由本次运行创建
    pub fn owned(&self) -> bool {
        self.owned
    }

    /// 按所有权回收浏览器，尽力而为
    pub async fn close_if_owned(&mut self) {
        if !self.owned {
            info!("🔗 浏览器由外部提供，保留实例");
            return;
        }
        if let Err(e) = self.browser.close().await {
            warn!("⚠️ 关闭浏览器失败: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            warn!("⚠️ 等待浏览器退出失败: {}", e);
        }
    }
}

/// 建立浏览器会话
pub async fn establish_session(config: &Config) -> Result<BrowserSession> {
    if let Some(endpoint) = config.browser_ws_endpoint.as_deref() {
        match connect_to_existing(endpoint).await {
            Ok((browser, page)) => {
                info!("🔗 已连接到现有浏览器实例");
                return Ok(BrowserSession {
                    browser,
                    page,
                    owned: false,
                });
            }
            Err(e) => {
                warn!("❌ 连接现有浏览器失败，改为启动新实例: {}", e);
            }
        }
    }

    let (browser, page) = launch_browser().await?;
    Ok(BrowserSession {
        browser,
        page,
        owned: true,
    })
}
