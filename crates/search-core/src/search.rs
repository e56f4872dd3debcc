// search-core/src/search.rs
//! 搜索模块
//!
//! 全文检索、排序、分页和按页面分组。

use std::collections::HashMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tantivy::collector::TopDocs;
use tantivy::query::{BooleanQuery, Occur, Query, QueryParser, TermQuery};
use tantivy::schema::{IndexRecordOption, Value};
use tantivy::{TantivyDocument, Term};

use crate::SearchHit;
use crate::models::Category;
use crate::query_executor::QueryContext;
use crate::snippet::make_snippet;

/// 排序模式
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum SortMode {
    /// 分数降序，同分按文档顺序
    #[default]
    Relevance,
    /// 生成器的遍历顺序
    DocumentOrder,
    /// 标题字母序（忽略大小写）
    Alphabetical,
}

/// 搜索选项
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    pub limit: usize,
    pub offset: usize,
    /// 只保留该分类的片段
    pub category: Option<Category>,
    pub sort: SortMode,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: 20,
            offset: 0,
            category: None,
            sort: SortMode::default(),
        }
    }
}

impl SearchOptions {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }
}

/// 同一页面下的命中
#[derive(Debug, Clone)]
pub struct PageGroup {
    /// 页面路径（`#` 之前）
    pub path: String,
    /// 页面标题
    pub page: String,
    pub hits: Vec<SearchHit>,
}

/// 全文搜索（Tantivy 查询语法）
///
/// 在 title/page/text 上检索，按配置的字段权重打分。
/// 查询语法错误只记录警告并返回空结果。
pub fn search_with_results(
    ctx: &QueryContext,
    query_str: &str,
    options: &SearchOptions,
) -> Result<Vec<SearchHit>> {
    tracing::debug!("[Tantivy 搜索] 查询字符串: '{}'", query_str);

    if query_str.trim().is_empty() {
        return Ok(vec![]);
    }

    let query_parser = ranked_parser(ctx);
    let query = match query_parser.parse_query(query_str) {
        Ok(q) => {
            tracing::debug!("[Tantivy 搜索] 解析后的查询: {:?}", q);
            q
        }
        Err(e) => {
            tracing::warn!("[Tantivy 搜索] 查询语法错误: '{}' - {}", query_str, e);
            return Ok(vec![]);
        }
    };

    let query: Box<dyn Query> = match options.category {
        Some(category) => {
            let term = Term::from_field_text(ctx.fields.category, category.as_ref());
            Box::new(BooleanQuery::new(vec![
                (Occur::Must, query),
                (
                    Occur::Must,
                    Box::new(TermQuery::new(term, IndexRecordOption::Basic)),
                ),
            ]))
        }
        None => query,
    };

    let scored = scored_ordinals(ctx, query.as_ref())?;
    tracing::debug!("[Tantivy 搜索] 找到 {} 个文档", scored.len());

    Ok(finish(ctx, scored, &plain_terms(query_str), options))
}

/// 带字段权重的查询解析器
pub(crate) fn ranked_parser(ctx: &QueryContext) -> QueryParser {
    let ranking = &ctx.config.ranking;
    let mut query_parser = QueryParser::for_index(ctx.index, ctx.fields.full_text());
    query_parser.set_field_boost(ctx.fields.title, ranking.title_boost);
    query_parser.set_field_boost(ctx.fields.page, ranking.page_boost);
    query_parser.set_field_boost(ctx.fields.text, ranking.text_boost);
    query_parser
}

/// 执行 Tantivy 查询，返回全部命中的 `(序号, 分数)`
pub(crate) fn scored_ordinals(ctx: &QueryContext, query: &dyn Query) -> Result<Vec<(usize, f32)>> {
    let searcher = ctx.reader.searcher();
    let limit = (searcher.num_docs() as usize).max(1);
    let top_docs = searcher.search(query, &TopDocs::with_limit(limit))?;

    let mut scored = Vec::with_capacity(top_docs.len());
    for (score, doc_address) in top_docs {
        let doc: TantivyDocument = searcher.doc(doc_address)?;
        if let Some(ordinal) = doc.get_first(ctx.fields.ordinal).and_then(|v| v.as_u64()) {
            scored.push((ordinal as usize, score));
        }
    }
    Ok(scored)
}

/// 组装结果：分类过滤、排序、分页、生成摘要
pub(crate) fn finish(
    ctx: &QueryContext,
    scored: Vec<(usize, f32)>,
    terms: &[String],
    options: &SearchOptions,
) -> Vec<SearchHit> {
    let mut hits: Vec<SearchHit> = scored
        .into_iter()
        .filter_map(|(ordinal, score)| {
            ctx.docs
                .get(ordinal)
                .map(|fragment| SearchHit::from_fragment(ordinal, fragment, score))
        })
        .filter(|hit| options.category.is_none_or(|c| hit.category == c))
        .collect();

    sort_hits(&mut hits, options.sort);

    hits.into_iter()
        .skip(options.offset)
        .take(options.limit)
        .map(|mut hit| {
            if let Some(fragment) = ctx.docs.get(hit.ordinal) {
                hit.snippet = make_snippet(&fragment.text, terms, &ctx.config.display);
            }
            hit
        })
        .collect()
}

/// 按排序模式整理结果
pub fn sort_hits(hits: &mut [SearchHit], mode: SortMode) {
    match mode {
        SortMode::Relevance => hits.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then(a.ordinal.cmp(&b.ordinal))
        }),
        SortMode::DocumentOrder => hits.sort_by_key(|hit| hit.ordinal),
        SortMode::Alphabetical => {
            hits.sort_by_cached_key(|hit| (hit.title.to_lowercase(), hit.ordinal))
        }
    }
}

/// 按页面分组
///
/// 分组顺序为页面在输入中首次出现的顺序，组内保持输入顺序；
/// 输入按相关度排序时，每组的第一条即为该页最佳命中。
pub fn group_by_page(hits: Vec<SearchHit>) -> Vec<PageGroup> {
    let mut groups: Vec<PageGroup> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for hit in hits {
        let path = hit.path().to_string();
        match positions.get(&path) {
            Some(&i) => groups[i].hits.push(hit),
            None => {
                positions.insert(path.clone(), groups.len());
                groups.push(PageGroup {
                    path,
                    page: hit.page.clone(),
                    hits: vec![hit],
                });
            }
        }
    }

    groups
}

/// 从 Tantivy 查询串中取出用于摘要定位的词
fn plain_terms(query_str: &str) -> Vec<String> {
    query_str
        .split_whitespace()
        .filter(|word| !matches!(*word, "AND" | "OR" | "NOT"))
        .map(|word| word.rsplit_once(':').map_or(word, |(_, value)| value))
        .map(|word| word.trim_matches(|c: char| "\"'+-()^~*!".contains(c)))
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}
