// search-core/src/schema/document.rs
//! 片段到 Tantivy 文档的转换

use tantivy::{TantivyDocument, doc};

use super::builder::SchemaFields;
use crate::models::DocPageFragment;

/// 将片段转换为 Tantivy 文档，`ordinal` 为其在 `docs` 中的位置
pub fn to_tantivy_document(
    fields: &SchemaFields,
    ordinal: usize,
    fragment: &DocPageFragment,
) -> TantivyDocument {
    doc!(
        fields.title => fragment.title.clone(),
        fields.page => fragment.page.clone(),
        fields.text => fragment.text.clone(),
        fields.location => fragment.location.clone(),
        fields.category => fragment.category.to_string(),
        fields.ordinal => ordinal as u64,
    )
}
