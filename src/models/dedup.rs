//! 页内去重索引
//!
//! 记录当前页面视图里已经评估过的位置索引。
//! 不变量：只在页面视图切换（翻页）时清空；同一视图内的滚动不清空。
//! 位置索引是页内的，绝不跨页共享。

use std::collections::HashSet;

/// 去重索引
#[derive(Debug, Default)]
pub struct DedupIndex {
    visited: HashSet<usize>,
}

impl DedupIndex {
    /// 创建空索引
    pub fn new() -> Self {
        Self::default()
    }

    /// 该位置是否已评估过
    pub fn contains(&self, position_index: usize) -> bool {
        self.visited.contains(&position_index)
    }

    /// 标记该位置已评估
    ///
    /// # 返回
    /// 首次标记返回 true，重复标记返回 false
    pub fn mark(&mut self, position_index: usize) -> bool {
        self.visited.insert(position_index)
    }

    /// 页面视图切换时清空
    pub fn clear(&mut self) {
        self.visited.clear();
    }

    /// 已评估的位置数量
    pub fn len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 同一视图内每个位置最多评估一次
    #[test]
    fn test_mark_is_idempotent() {
        let mut index = DedupIndex::new();
        assert!(index.mark(3));
        assert!(!index.mark(3));
        assert!(index.contains(3));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_clear_resets_all_positions() {
        let mut index = DedupIndex::new();
        index.mark(0);
        index.mark(1);
        index.clear();
        assert!(index.is_empty());
        assert!(index.mark(0));
    }
}
