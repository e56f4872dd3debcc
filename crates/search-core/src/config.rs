// search-core/src/config.rs
//! 配置模块

use serde::{Deserialize, Serialize};

/// 搜索引擎配置
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SearchConfig {
    pub index: IndexConfig,
    pub ranking: RankingConfig,
    pub display: DisplayConfig,
}

/// 索引配置
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct IndexConfig {
    /// Tantivy 分词器名称：`en_stem`、`default`、`raw`
    pub tokenizer: String,
    pub writer_memory: usize,
}

/// 排序权重配置
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RankingConfig {
    pub title_boost: f32,
    pub page_boost: f32,
    pub text_boost: f32,
    /// 默认返回结果数量
    pub default_limit: usize,
}

/// 显示配置
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DisplayConfig {
    /// 摘要最大字符数
    pub preview_max_length: usize,
    /// 摘要从首个命中位置往前保留的字符数
    pub sentence_search_start: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            tokenizer: "en_stem".to_string(),
            writer_memory: 50_000_000,
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            title_boost: 2.0,
            page_boost: 1.0,
            text_boost: 1.0,
            default_limit: 20,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            preview_max_length: 160,
            sentence_search_start: 40,
        }
    }
}
