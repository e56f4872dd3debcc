// search-core/src/indexer.rs
//! 索引模块
//!
//! 搜索索引体量很小（几百到几千条），整体放进内存索引，一次提交，之后只读。

use anyhow::{Result, bail};
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy};

use crate::config::IndexConfig;
use crate::models::DocumentIndex;
use crate::schema::{SchemaFields, build_schema, to_tantivy_document};

/// 为全部片段构建内存索引
///
/// 每个片段对应一个 Tantivy 文档，`ordinal` 字段记录其在 `docs` 中的位置。
pub fn build_index(
    docs: &DocumentIndex,
    config: &IndexConfig,
) -> Result<(Index, IndexReader, SchemaFields)> {
    let schema = build_schema(&config.tokenizer);
    let index = Index::create_in_ram(schema.clone());

    if index.tokenizers().get(&config.tokenizer).is_none() {
        bail!("未知的分词器: '{}'", config.tokenizer);
    }

    let fields = SchemaFields::from_schema(&schema)?;

    // 单线程写入，保证只有一个段，文档地址与写入顺序一致
    let mut writer: IndexWriter = index.writer_with_num_threads(1, config.writer_memory)?;
    for (ordinal, fragment) in docs.iter().enumerate() {
        writer.add_document(to_tantivy_document(&fields, ordinal, fragment))?;
    }
    writer.commit()?;

    let reader: IndexReader = index
        .reader_builder()
        .reload_policy(ReloadPolicy::Manual)
        .try_into()?;

    tracing::info!(
        "[索引] 已索引 {} 个片段 (分词器: {})",
        reader.searcher().num_docs(),
        config.tokenizer
    );

    Ok((index, reader, fields))
}
