/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 职位搜索关键词
    pub skill_set: String,
    /// 目标提交数量
    pub target_submissions: usize,
    /// 无进展滚动/翻页尝试上限
    pub max_no_progress_attempts: usize,
    /// 已有浏览器实例的调试端点（为空则启动新实例）
    pub browser_ws_endpoint: Option<String>,
    /// 周期触发表达式（为空或 "none" 则立即运行一次）
    pub cron_expression: Option<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- 登录凭据 ---
    pub linkedin_email: String,
    pub linkedin_password: String,
    // --- 表单填写策略 ---
    /// 二选一问题统一选择的答案
    pub binary_choice_answer: String,
    // --- 时间预算（毫秒） ---
    /// 交互后的固定稳定等待
    pub settle_millis: u64,
    /// 打开详情面板后的渲染等待
    pub detail_settle_millis: u64,
    /// 单步向导的控件等待预算
    pub control_timeout_millis: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            skill_set: "nodejs".to_string(),
            target_submissions: 5,
            max_no_progress_attempts: 10,
            browser_ws_endpoint: None,
            cron_expression: None,
            verbose_logging: false,
            linkedin_email: String::new(),
            linkedin_password: String::new(),
            binary_choice_answer: "yes".to_string(),
            settle_millis: 2000,
            detail_settle_millis: 3000,
            control_timeout_millis: 5000,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            skill_set: std::env::var("SKILL_SET").unwrap_or(default.skill_set),
            target_submissions: std::env::var("MAX_EASY_APPLY_COUNT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.target_submissions),
            max_no_progress_attempts: std::env::var("MAX_SCROLL_ATTEMPTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_no_progress_attempts),
            browser_ws_endpoint: std::env::var("BROWSER_WS_ENDPOINT").ok().filter(|v| !v.is_empty()),
            cron_expression: std::env::var("CRON_EXPRESSION").ok().filter(|v| !v.is_empty()),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            linkedin_email: std::env::var("LINKEDIN_EMAIL").unwrap_or(default.linkedin_email),
            linkedin_password: std::env::var("LINKEDIN_PASSWORD").unwrap_or(default.linkedin_password),
            binary_choice_answer: std::env::var("BINARY_CHOICE_ANSWER").unwrap_or(default.binary_choice_answer),
            settle_millis: std::env::var("SETTLE_MILLIS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.settle_millis),
            detail_settle_millis: std::env::var("DETAIL_SETTLE_MILLIS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.detail_settle_millis),
            control_timeout_millis: std::env::var("CONTROL_TIMEOUT_MILLIS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.control_timeout_millis),
        }
    }

    /// 构造职位搜索页地址，关键词做 URL 编码（处理空格和特殊字符）
    pub fn job_search_url(&self) -> String {
        let encoded: String =
            url::form_urlencoded::byte_serialize(self.skill_set.as_bytes()).collect();
        format!(
            "https://www.linkedin.com/jobs/search/?keywords={}",
            encoded
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 关键词里的空格和特殊字符必须被编码
    #[test]
    fn test_search_url_encodes_keywords() {
        let config = Config {
            skill_set: "rust developer".to_string(),
            ..Config::default()
        };
        assert_eq!(
            config.job_search_url(),
            "https://www.linkedin.com/jobs/search/?keywords=rust+developer"
        );
    }

    #[test]
    fn test_default_budgets() {
        let config = Config::default();
        assert_eq!(config.target_submissions, 5);
        assert_eq!(config.max_no_progress_attempts, 10);
    }
}
