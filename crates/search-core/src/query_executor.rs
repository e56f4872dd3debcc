// search-core/src/query_executor.rs
//! Query DSL 执行器
//!
//! 将解析后的 Query AST 转换为实际的搜索操作。
//! 关键词交给 Tantivy（分词、词干），其余条件直接在内存中的片段上判断，
//! 最后对每个片段按 AND/OR/NOT 求值。

use std::collections::HashMap;

use anyhow::Result;
use query::{Query, Term, ValidationError};
use tantivy::{Index, IndexReader};

use crate::SearchHit;
use crate::config::SearchConfig;
use crate::models::{DocPageFragment, DocumentIndex};
use crate::schema::SchemaFields;
use crate::search::{self, SearchOptions};

/// 查询执行上下文
pub struct QueryContext<'a> {
    pub docs: &'a DocumentIndex,
    pub index: &'a Index,
    pub reader: &'a IndexReader,
    pub fields: SchemaFields,
    pub config: &'a SearchConfig,
}

/// 关键词 -> (序号 -> 分数)
type KeywordHits = HashMap<String, HashMap<usize, f32>>;

/// 执行 Query AST 搜索
///
/// 搜索策略：
/// 1. 每个关键词（包括 NOT 之下的）单独交给 Tantivy，得到命中集合与分数
/// 2. 对每个片段求值整个 AST
/// 3. 分数为正向关键词分数之和；只有过滤条件时为 1.0
pub fn execute_query(
    ctx: &QueryContext,
    query: &Query,
    options: &SearchOptions,
) -> Result<Vec<SearchHit>> {
    let keyword_hits = resolve_keywords(ctx, query)?;
    let positive = collect_keywords(query);

    let scored: Vec<(usize, f32)> = ctx
        .docs
        .iter()
        .enumerate()
        .filter(|(ordinal, fragment)| matches_query(*ordinal, fragment, query, &keyword_hits))
        .map(|(ordinal, _)| (ordinal, score(ordinal, &positive, &keyword_hits)))
        .collect();

    tracing::debug!(
        "[Query执行器] {} 个关键词, {} 个片段匹配",
        keyword_hits.len(),
        scored.len()
    );

    Ok(search::finish(ctx, scored, &snippet_terms(query), options))
}

/// 收集正向（不在 NOT 之下的）关键词，保持出现顺序
fn collect_keywords(query: &Query) -> Vec<&str> {
    let mut keywords = Vec::new();
    query.walk_terms(&mut |term, negated| {
        if let (Term::KeyWord(kw), false) = (term, negated) {
            keywords.push(kw.as_str());
        }
    });
    keywords
}

/// 摘要定位用的词：正向的关键词与子串条件
fn snippet_terms(query: &Query) -> Vec<String> {
    let mut terms = Vec::new();
    query.walk_terms(&mut |term, negated| {
        if negated {
            return;
        }
        match term {
            Term::KeyWord(s) | Term::Title(s) | Term::Text(s) => terms.push(s.clone()),
            _ => {}
        }
    });
    terms
}

/// 逐个关键词检索
fn resolve_keywords(ctx: &QueryContext, query: &Query) -> Result<KeywordHits> {
    let mut keywords: Vec<&str> = Vec::new();
    query.walk_terms(&mut |term, _| {
        if let Term::KeyWord(kw) = term {
            keywords.push(kw.as_str());
        }
    });

    let query_parser = search::ranked_parser(ctx);
    let mut resolved = KeywordHits::new();
    for kw in keywords {
        if resolved.contains_key(kw) {
            continue;
        }
        // 整体作为短语交给 Tantivy，避免关键词里的符号被当作查询语法
        let phrase = format!("\"{}\"", kw.replace(['"', '\\'], " "));
        let hits = match query_parser.parse_query(&phrase) {
            Ok(q) => search::scored_ordinals(ctx, q.as_ref())?
                .into_iter()
                .collect(),
            Err(e) => {
                tracing::warn!("[Query执行器] 关键词无法检索: '{}' - {}", kw, e);
                HashMap::new()
            }
        };
        resolved.insert(kw.to_string(), hits);
    }
    Ok(resolved)
}

fn score(ordinal: usize, positive: &[&str], keyword_hits: &KeywordHits) -> f32 {
    if positive.is_empty() {
        return 1.0;
    }
    positive
        .iter()
        .filter_map(|kw| keyword_hits.get(*kw)?.get(&ordinal))
        .sum()
}

/// 检查片段是否匹配 Query
fn matches_query(
    ordinal: usize,
    fragment: &DocPageFragment,
    query: &Query,
    keyword_hits: &KeywordHits,
) -> bool {
    match query {
        Query::Term(term) => matches_term(ordinal, fragment, term, keyword_hits),
        Query::And(items) => items
            .iter()
            .all(|q| matches_query(ordinal, fragment, q, keyword_hits)),
        Query::Or(items) => items
            .iter()
            .any(|q| matches_query(ordinal, fragment, q, keyword_hits)),
        Query::Not(inner) => !matches_query(ordinal, fragment, inner, keyword_hits),
    }
}

/// 检查片段是否匹配 Term
fn matches_term(
    ordinal: usize,
    fragment: &DocPageFragment,
    term: &Term,
    keyword_hits: &KeywordHits,
) -> bool {
    match term {
        Term::KeyWord(kw) => keyword_hits
            .get(kw)
            .is_some_and(|hits| hits.contains_key(&ordinal)),
        // 子串条件的值在校验阶段已转为小写
        Term::Title(s) => fragment.title.to_lowercase().contains(s.as_str()),
        Term::Page(s) => fragment.page.to_lowercase().contains(s.as_str()),
        Term::Text(s) => fragment.text.to_lowercase().contains(s.as_str()),
        Term::Category(tag) => fragment.category.as_ref() == tag,
        Term::Location(pattern) => pattern.matches(&fragment.location),
        Term::Regex(re) => re.is_match(&fragment.title) || re.is_match(&fragment.text),
        Term::Length(range) => range.contains(fragment.text_len()),
    }
}

/// 解析并执行查询字符串
///
/// 这是主要的入口函数，将原始查询字符串解析为 Query AST，然后执行搜索
pub fn parse_and_execute(
    ctx: &QueryContext,
    query_str: &str,
    options: &SearchOptions,
) -> Result<Vec<SearchHit>, QueryExecuteError> {
    // 1. 解析查询字符串
    let parsed = query::parse_query(query_str)
        .map_err(|e| QueryExecuteError::ParseError(query::describe_parse_errors(&e)))?;

    // 2. 验证并转换为 Query AST
    let query = query::validate_query(&parsed)?;

    tracing::debug!("[Query执行器] 解析后的 Query: {:?}", query);

    // 3. 执行查询
    execute_query(ctx, &query, options).map_err(|e| QueryExecuteError::ExecutionError(e.to_string()))
}

/// Query 执行错误
#[derive(Debug, thiserror::Error)]
pub enum QueryExecuteError {
    /// 解析错误
    #[error("解析错误: {0}")]
    ParseError(String),
    /// 验证错误
    #[error("验证错误: {0}")]
    ValidationError(#[from] ValidationError),
    /// 执行错误
    #[error("执行错误: {0}")]
    ExecutionError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validated(input: &str) -> Query {
        let parsed = query::parse_query(input).unwrap();
        query::validate_query(&parsed).unwrap()
    }

    #[test]
    fn test_collect_keywords() {
        let query = validated("vector AND potential");
        assert_eq!(collect_keywords(&query), vec!["vector", "potential"]);
    }

    #[test]
    fn test_collect_keywords_with_field() {
        let query = validated("equilibrium AND cat:module");
        assert_eq!(collect_keywords(&query), vec!["equilibrium"]);
    }

    #[test]
    fn test_collect_keywords_not_excluded() {
        let query = validated("field AND NOT solovev");
        // NOT 中的关键词不参与打分
        assert_eq!(collect_keywords(&query), vec!["field"]);
    }

    #[test]
    fn test_double_negation_is_positive() {
        let query = validated("NOT -axis");
        assert_eq!(collect_keywords(&query), vec!["axis"]);
    }

    #[test]
    fn test_snippet_terms_skip_filters() {
        let query = validated(r#"ABC title:Beltrami cat:module -text:torus"#);
        assert_eq!(snippet_terms(&query), vec!["ABC", "beltrami"]);
    }

    #[test]
    fn test_score_sums_positive_keywords() {
        let mut hits = KeywordHits::new();
        hits.insert("a".into(), HashMap::from([(0, 1.5), (1, 0.5)]));
        hits.insert("b".into(), HashMap::from([(0, 2.0)]));
        assert_eq!(score(0, &["a", "b"], &hits), 3.5);
        assert_eq!(score(1, &["a", "b"], &hits), 0.5);
        assert_eq!(score(1, &[], &hits), 1.0);
    }

    #[test]
    fn test_matches_term_filters() {
        let fragment = DocPageFragment::new(
            "analytic/#ElectromagneticFields.ABC",
            "Analytic Fields",
            "ElectromagneticFields.ABC",
            "Arnold-Beltrami-Childress (ABC) field",
            crate::models::Category::Module,
        );
        let hits = KeywordHits::new();
        let check = |input: &str| matches_query(0, &fragment, &validated(input), &hits);

        assert!(check("title:abc"));
        assert!(check("page:ANALYTIC"));
        assert!(check("cat:module"));
        assert!(check("loc:analytic/*"));
        assert!(check("re:beltrami"));
        assert!(check("len:>10"));
        assert!(!check("cat:section"));
        assert!(!check("-text:childress"));
        assert!(!check("field"));
    }
}
