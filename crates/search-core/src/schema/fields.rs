// search-core/src/schema/fields.rs
//! 字段名常量定义
//!
//! 统一管理所有 Schema 字段名，避免魔法字符串

/// 章节或符号标题（分词，权重最高）
pub const FIELD_TITLE: &str = "title";

/// 页面标题（分词）
pub const FIELD_PAGE: &str = "page";

/// 片段正文（全文检索主字段）
pub const FIELD_TEXT: &str = "text";

/// 页面位置/锚点（精确匹配）
pub const FIELD_LOCATION: &str = "location";

/// 分类标签（精确匹配，用于过滤）
pub const FIELD_CATEGORY: &str = "category";

/// 片段在 `docs` 数组中的序号
pub const FIELD_ORDINAL: &str = "ordinal";
