// search-core/src/stats.rs
//! 索引统计

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use strum::{EnumCount, IntoEnumIterator};

use crate::models::{Category, DocumentIndex};

/// 索引统计信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub total: usize,
    /// 各分类数量，按枚举顺序，包含数量为 0 的分类
    pub by_category: Vec<(Category, usize)>,
    /// 不同页面路径数量
    pub pages: usize,
    /// 正文为空的片段数量
    pub blank_text: usize,
    /// 与前面某条记录 `(location, page, title, category)` 相同的片段数量
    pub duplicate_keys: usize,
}

impl IndexStats {
    pub fn collect(index: &DocumentIndex) -> Self {
        let mut counts = [0usize; Category::COUNT];
        let mut paths = HashSet::new();
        let mut keys = HashMap::new();
        let mut blank_text = 0;

        for fragment in index.iter() {
            counts[fragment.category as usize] += 1;
            paths.insert(fragment.path());
            *keys.entry(fragment.key()).or_insert(0usize) += 1;
            if fragment.is_blank() {
                blank_text += 1;
            }
        }

        Self {
            total: index.len(),
            by_category: Category::iter().zip(counts).collect(),
            pages: paths.len(),
            blank_text,
            duplicate_keys: keys.values().map(|n| n - 1).sum(),
        }
    }

    pub fn count(&self, category: Category) -> usize {
        self.by_category
            .iter()
            .find(|(c, _)| *c == category)
            .map_or(0, |(_, n)| *n)
    }
}
