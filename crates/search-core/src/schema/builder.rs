// search-core/src/schema/builder.rs
//! Schema 构建器
//!
//! 构建 Tantivy 索引 Schema，统一管理字段配置

use tantivy::schema::*;

use super::fields::*;

/// 构建 Tantivy Schema
///
/// # 字段
/// - `title`: 章节/符号标题，分词，存储
/// - `page`: 页面标题，分词，存储
/// - `text`: 正文，分词，存储
/// - `location`: 位置，精确匹配，存储
/// - `category`: 分类，精确匹配，存储
/// - `ordinal`: 原始顺序，快速字段，存储
pub fn build_schema(tokenizer: &str) -> Schema {
    let mut schema_builder = Schema::builder();

    let text_options = TextOptions::default()
        .set_indexing_options(
            TextFieldIndexing::default()
                .set_tokenizer(tokenizer)
                .set_index_option(IndexRecordOption::WithFreqsAndPositions),
        )
        .set_stored();

    schema_builder.add_text_field(FIELD_TITLE, text_options.clone());
    schema_builder.add_text_field(FIELD_PAGE, text_options.clone());
    schema_builder.add_text_field(FIELD_TEXT, text_options);

    schema_builder.add_text_field(FIELD_LOCATION, STRING | STORED);
    schema_builder.add_text_field(FIELD_CATEGORY, STRING | STORED);

    schema_builder.add_u64_field(FIELD_ORDINAL, FAST | STORED);

    schema_builder.build()
}

/// Schema 字段辅助结构
///
/// 缓存字段引用，避免重复查找
#[derive(Debug, Clone, Copy)]
pub struct SchemaFields {
    pub title: Field,
    pub page: Field,
    pub text: Field,
    pub location: Field,
    pub category: Field,
    pub ordinal: Field,
}

impl SchemaFields {
    /// 从 Schema 中提取所有字段引用
    pub fn from_schema(schema: &Schema) -> tantivy::Result<Self> {
        Ok(Self {
            title: schema.get_field(FIELD_TITLE)?,
            page: schema.get_field(FIELD_PAGE)?,
            text: schema.get_field(FIELD_TEXT)?,
            location: schema.get_field(FIELD_LOCATION)?,
            category: schema.get_field(FIELD_CATEGORY)?,
            ordinal: schema.get_field(FIELD_ORDINAL)?,
        })
    }

    /// 全文检索字段
    pub fn full_text(&self) -> Vec<Field> {
        vec![self.title, self.page, self.text]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_fields_resolve() {
        let schema = build_schema("en_stem");
        let fields = SchemaFields::from_schema(&schema).unwrap();
        assert_eq!(schema.get_field_name(fields.title), FIELD_TITLE);
        assert_eq!(schema.get_field_name(fields.ordinal), FIELD_ORDINAL);
        assert_eq!(fields.full_text().len(), 3);
    }

    #[test]
    fn test_missing_field_is_error() {
        let mut builder = Schema::builder();
        builder.add_text_field(FIELD_TITLE, TEXT);
        let schema = builder.build();
        assert!(SchemaFields::from_schema(&schema).is_err());
    }

    #[test]
    fn test_tokenizer_is_applied() {
        let schema = build_schema("default");
        let entry = schema.get_field_entry(schema.get_field(FIELD_TEXT).unwrap());
        let FieldType::Str(options) = entry.field_type() else {
            panic!("text field should be a string field");
        };
        let indexing = options.get_indexing_options().unwrap();
        assert_eq!(indexing.tokenizer(), "default");
    }
}
