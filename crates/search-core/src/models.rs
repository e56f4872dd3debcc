// search-core/src/models.rs
//! 数据模型定义
//!
//! 文档生成器输出的搜索索引由一组扁平的页面片段组成，
//! 顺序即生成器遍历页面的顺序。

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// 片段分类标签
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    IntoStaticStr,
    EnumString,
    EnumIter,
    EnumCount,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Category {
    Page,
    Section,
    Module,
    Method,
    Function,
    Constant,
    Type,
    Macro,
}

impl Category {
    /// 是否为 API 符号（而非正文或章节标题）
    pub fn is_symbol(self) -> bool {
        !matches!(self, Category::Page | Category::Section)
    }

    /// 按索引文件中的标签精确匹配，区分大小写
    ///
    /// `FromStr` 忽略大小写，只用于命令行参数。
    pub fn from_tag(tag: &str) -> Option<Self> {
        Category::iter().find(|c| c.as_ref() == tag)
    }

    /// 所有标签的字符串形式，按枚举顺序
    pub fn tags() -> Vec<&'static str> {
        Category::iter().map(|c| c.into()).collect()
    }
}

/// 文档片段：搜索索引中的一条记录
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocPageFragment {
    /// 页面或锚点位置，如 `analytic/#Analytic-Fields`
    pub location: String,
    /// 页面标题
    pub page: String,
    /// 章节或符号标题
    pub title: String,
    /// 正文，可以为空
    pub text: String,
    pub category: Category,
}

impl DocPageFragment {
    pub fn new(
        location: impl Into<String>,
        page: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            location: location.into(),
            page: page.into(),
            title: title.into(),
            text: text.into(),
            category,
        }
    }

    /// `#` 之前的页面路径
    pub fn path(&self) -> &str {
        self.location
            .split_once('#')
            .map_or(self.location.as_str(), |(path, _)| path)
    }

    /// `#` 之后的锚点
    pub fn anchor(&self) -> Option<&str> {
        self.location.split_once('#').map(|(_, anchor)| anchor)
    }

    /// 正文为空或只有空白
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// 正文字符数（按 Unicode 标量计）
    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }

    /// 非唯一的记录键 `(location, page, title, category)`
    pub fn key(&self) -> (&str, &str, &str, Category) {
        (&self.location, &self.page, &self.title, self.category)
    }
}

/// 整个搜索索引：`{ "docs": [...] }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentIndex {
    pub docs: Vec<DocPageFragment>,
}

impl DocumentIndex {
    pub fn new(docs: Vec<DocPageFragment>) -> Self {
        Self { docs }
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// 按序号取片段
    pub fn get(&self, ordinal: usize) -> Option<&DocPageFragment> {
        self.docs.get(ordinal)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocPageFragment> {
        self.docs.iter()
    }
}
