// search-core/src/lib.rs
//! 文档搜索核心库
//!
//! 读取文档生成器输出的 `search_index.js`，提供：
//! - 强类型的数据模型与加载/序列化
//! - 基于 Tantivy 的内存全文索引
//! - Query DSL 执行、排序、摘要、按页分组
//! - 页面大纲与统计

use std::sync::Arc;

use tantivy::{Index, IndexReader};

pub mod config;
pub mod indexer;
pub mod loader;
pub mod models;
pub mod outline;
pub mod query_executor;
pub mod schema;
pub mod search;
pub mod snippet;
pub mod stats;

// 重导出核心类型
pub use config::{DisplayConfig, IndexConfig, RankingConfig, SearchConfig};
pub use indexer::build_index;
pub use loader::{LoadError, LoadIssue, LoadMode, LoadReport, discover, load_file, parse_str, to_js, to_json};
pub use models::{Category, DocPageFragment, DocumentIndex};
pub use outline::{OutlineEntry, PageOutline, outline};
pub use query_executor::{QueryContext, QueryExecuteError, execute_query, parse_and_execute};
pub use schema::{SchemaFields, build_schema};
pub use search::{PageGroup, SearchOptions, SortMode, group_by_page, search_with_results};
pub use snippet::make_snippet;
pub use stats::IndexStats;

/// 搜索引擎统一入口
///
/// 持有只读的片段集合和对应的内存索引。
pub struct SearchEngine {
    pub docs: Arc<DocumentIndex>,
    pub index: Index,
    pub reader: IndexReader,
    pub fields: SchemaFields,
    pub config: SearchConfig,
}

impl SearchEngine {
    /// 创建搜索引擎实例并建立索引
    pub fn new(docs: impl Into<Arc<DocumentIndex>>, config: SearchConfig) -> anyhow::Result<Self> {
        let docs = docs.into();
        let (index, reader, fields) = build_index(&docs, &config.index)?;

        Ok(Self {
            docs,
            index,
            reader,
            fields,
            config,
        })
    }

    /// 查询执行上下文
    pub fn context(&self) -> QueryContext<'_> {
        QueryContext {
            docs: &self.docs,
            index: &self.index,
            reader: &self.reader,
            fields: self.fields,
            config: &self.config,
        }
    }

    /// 执行搜索（Tantivy 查询语法）
    pub fn search(&self, query: &str, options: &SearchOptions) -> anyhow::Result<Vec<SearchHit>> {
        search_with_results(&self.context(), query, options)
    }

    /// 执行 Query DSL 搜索
    pub fn query(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<SearchHit>, QueryExecuteError> {
        parse_and_execute(&self.context(), query, options)
    }

    /// 未指定数量时使用配置中的默认值
    pub fn options(&self) -> SearchOptions {
        SearchOptions::with_limit(self.config.ranking.default_limit)
    }
}

/// 搜索结果
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SearchHit {
    /// 在 `docs` 中的位置
    pub ordinal: usize,
    pub location: String,
    pub page: String,
    pub title: String,
    pub category: Category,
    pub score: f32,
    /// 正文摘要，正文为空时为空串
    pub snippet: String,
}

impl SearchHit {
    pub fn from_fragment(ordinal: usize, fragment: &DocPageFragment, score: f32) -> Self {
        Self {
            ordinal,
            location: fragment.location.clone(),
            page: fragment.page.clone(),
            title: fragment.title.clone(),
            category: fragment.category,
            score,
            snippet: String::new(),
        }
    }

    /// `#` 之前的页面路径
    pub fn path(&self) -> &str {
        self.location
            .split_once('#')
            .map_or(self.location.as_str(), |(path, _)| path)
    }
}
