//! 申请处理上下文
//!
//! 封装"我正在处理第几个职位、它在页内哪个位置"这一信息

use std::fmt::Display;

/// 申请处理上下文
#[derive(Debug, Clone)]
pub struct ApplyCtx {
    /// 职位卡片的页内位置索引（从 0 开始）
    pub position_index: usize,

    /// 本次运行里第几个合格职位（从 1 开始，仅用于日志显示）
    pub item_number: usize,
}

impl ApplyCtx {
    /// 创建新的申请上下文
    pub fn new(position_index: usize, item_number: usize) -> Self {
        Self {
            position_index,
            item_number,
        }
    }
}

impl Display for ApplyCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[岗位 {} 卡片位置#{}]",
            self.item_number, self.position_index
        )
    }
}
