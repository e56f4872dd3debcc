// search-core/src/outline.rs
//! 页面大纲
//!
//! 片段之间没有显式引用，页面结构由 `location` 的路径部分和 `page` 推导。

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Category, DocumentIndex};

/// 大纲条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineEntry {
    pub title: String,
    pub location: String,
    pub category: Category,
}

/// 单个页面的大纲
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageOutline {
    /// 页面路径（`#` 之前）
    pub path: String,
    /// 该路径下第一条记录的页面标题
    pub page: String,
    /// 章节标题，保持原顺序
    pub sections: Vec<OutlineEntry>,
    /// API 符号，保持原顺序
    pub symbols: Vec<OutlineEntry>,
    /// 正文片段（`page` 分类）数量
    pub prose: usize,
}

/// 按页面路径归纳整个索引，页面顺序为首次出现的顺序
pub fn outline(index: &DocumentIndex) -> Vec<PageOutline> {
    let mut pages: Vec<PageOutline> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for fragment in index.iter() {
        let path = fragment.path();
        let i = *positions.entry(path).or_insert_with(|| {
            pages.push(PageOutline {
                path: path.to_string(),
                page: fragment.page.clone(),
                sections: Vec::new(),
                symbols: Vec::new(),
                prose: 0,
            });
            pages.len() - 1
        });

        let entry = || OutlineEntry {
            title: fragment.title.clone(),
            location: fragment.location.clone(),
            category: fragment.category,
        };
        let page = &mut pages[i];
        match fragment.category {
            Category::Page => page.prose += 1,
            Category::Section => page.sections.push(entry()),
            _ => page.symbols.push(entry()),
        }
    }

    pages
}
