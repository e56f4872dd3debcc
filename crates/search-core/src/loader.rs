// search-core/src/loader.rs
//! 搜索索引加载与序列化
//!
//! 支持两种输入：
//! - 文档生成器输出的 JS 赋值语句 `var documenterSearchIndex = {"docs": [...]}`
//! - 纯 JSON 对象 `{"docs": [...]}`

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use walkdir::WalkDir;

use crate::models::{Category, DocPageFragment, DocumentIndex};

/// 生成器使用的全局变量名
pub const DEFAULT_GLOBAL_NAME: &str = "documenterSearchIndex";

/// 文档站点中的索引文件名
pub const SEARCH_INDEX_FILE_NAME: &str = "search_index.js";

const TEXT_FIELDS: [&str; 4] = ["location", "page", "title", "text"];

static ASSIGNMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:(?:var|let|const)\s+)?([A-Za-z_$][\w$]*(?:\.[A-Za-z_$][\w$]*)*)\s*=\s*")
        .expect("assignment regex is valid")
});

/// 加载错误
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("input is neither a JSON object nor a `name = {{...}}` assignment")]
    MissingAssignment,

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("top-level object has no `docs` array")]
    MissingDocs,

    #[error("search index contains no records")]
    Empty,

    #[error("record #{index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("no search_index.js found under {}", .0.display())]
    NotFound(PathBuf),
}

/// 加载模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadMode {
    /// 任何结构问题都是错误
    Strict,
    /// 容错：缺失的文本字段置空，无法识别分类的记录跳过
    #[default]
    Lenient,
}

/// 容错加载时做出的修复
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// 字段缺失或不是字符串，已置为空串
    BlankFilled { field: &'static str },
    /// 记录被跳过
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadIssue {
    /// 记录在原始 `docs` 数组中的位置
    pub index: usize,
    pub kind: IssueKind,
}

impl std::fmt::Display for LoadIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            IssueKind::BlankFilled { field } => {
                write!(f, "record #{}: `{}` missing or not a string, blank-filled", self.index, field)
            }
            IssueKind::Skipped { reason } => write!(f, "record #{}: skipped, {}", self.index, reason),
        }
    }
}

/// 加载结果
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub index: DocumentIndex,
    pub issues: Vec<LoadIssue>,
    /// JS 赋值语句的变量名，纯 JSON 输入时为 None
    pub global_name: Option<String>,
}

impl LoadReport {
    pub fn skipped(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| matches!(i.kind, IssueKind::Skipped { .. }))
            .count()
    }
}

/// 解析搜索索引文本
pub fn parse_str(input: &str, mode: LoadMode) -> Result<LoadReport, LoadError> {
    let (global_name, body) = split_assignment(input)?;
    let root: Value = serde_json::from_str(body)?;

    let records = root
        .get("docs")
        .and_then(Value::as_array)
        .ok_or(LoadError::MissingDocs)?;

    if records.is_empty() {
        return Err(LoadError::Empty);
    }

    let mut docs = Vec::with_capacity(records.len());
    let mut issues = Vec::new();

    for (index, record) in records.iter().enumerate() {
        if let Some(doc) = parse_record(index, record, mode, &mut issues)? {
            docs.push(doc);
        }
    }

    for issue in &issues {
        tracing::warn!("[加载] {}", issue);
    }

    if docs.is_empty() {
        return Err(LoadError::Empty);
    }

    tracing::info!(
        "[加载] 读取 {} 条记录，修复/跳过 {} 处",
        docs.len(),
        issues.len()
    );

    Ok(LoadReport {
        index: DocumentIndex::new(docs),
        issues,
        global_name,
    })
}

/// 从文件加载；`path` 也可以是文档站点目录
pub fn load_file(path: &Path, mode: LoadMode) -> Result<LoadReport, LoadError> {
    let file = discover(path)?;
    let content = std::fs::read_to_string(&file).map_err(|source| LoadError::Io {
        path: file.clone(),
        source,
    })?;
    tracing::debug!("[加载] 解析 {}", file.display());
    parse_str(&content, mode)
}

/// 定位搜索索引文件
///
/// 文件路径原样返回；目录则递归查找 `search_index.js`，取层级最浅的一个。
pub fn discover(root: &Path) -> Result<PathBuf, LoadError> {
    if root.is_file() {
        return Ok(root.to_path_buf());
    }
    if !root.is_dir() {
        return Err(LoadError::Io {
            path: root.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory"),
        });
    }

    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && entry.file_name() == SEARCH_INDEX_FILE_NAME)
        .min_by_key(|entry| (entry.depth(), entry.path().to_path_buf()))
        .map(|entry| entry.into_path())
        .ok_or_else(|| LoadError::NotFound(root.to_path_buf()))
}

/// 序列化为生成器格式的 JS 赋值语句
pub fn to_js(index: &DocumentIndex) -> Result<String, LoadError> {
    to_js_named(index, DEFAULT_GLOBAL_NAME)
}

pub fn to_js_named(index: &DocumentIndex, global_name: &str) -> Result<String, LoadError> {
    let records = index
        .docs
        .iter()
        .map(serde_json::to_string)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("var {} = {{\"docs\":\n[{}]\n}}\n", global_name, records.join(",")))
}

/// 序列化为 JSON
pub fn to_json(index: &DocumentIndex, pretty: bool) -> Result<String, LoadError> {
    let json = if pretty {
        serde_json::to_string_pretty(index)?
    } else {
        serde_json::to_string(index)?
    };
    Ok(json)
}

/// 拆出 JS 赋值的变量名与 JSON 主体
fn split_assignment(input: &str) -> Result<(Option<String>, &str), LoadError> {
    let trimmed = input.trim_start_matches('\u{feff}').trim();

    if trimmed.starts_with('{') {
        return Ok((None, trimmed.trim_end_matches(';').trim_end()));
    }

    let captures = ASSIGNMENT_RE
        .captures(trimmed)
        .ok_or(LoadError::MissingAssignment)?;
    let name = captures[1].to_string();
    let body_start = captures.get(0).map_or(0, |m| m.end());
    let body = trimmed[body_start..].trim_end().trim_end_matches(';').trim_end();

    if !body.starts_with('{') {
        return Err(LoadError::MissingAssignment);
    }

    Ok((Some(name), body))
}

fn parse_record(
    index: usize,
    record: &Value,
    mode: LoadMode,
    issues: &mut Vec<LoadIssue>,
) -> Result<Option<DocPageFragment>, LoadError> {
    let Some(object) = record.as_object() else {
        return reject(index, mode, issues, "not a JSON object".to_string());
    };

    let category = match object.get("category").and_then(Value::as_str) {
        Some(tag) => match Category::from_tag(tag) {
            Some(category) => category,
            None => return reject(index, mode, issues, format!("unknown category '{}'", tag)),
        },
        None => {
            return reject(index, mode, issues, "`category` missing or not a string".to_string());
        }
    };

    let mut fields: [String; 4] = Default::default();
    for (slot, field) in fields.iter_mut().zip(TEXT_FIELDS) {
        *slot = match text_field(object, field) {
            Some(value) => value,
            None if mode == LoadMode::Strict => {
                return Err(LoadError::InvalidRecord {
                    index,
                    reason: format!("`{}` missing or not a string", field),
                });
            }
            None => {
                issues.push(LoadIssue {
                    index,
                    kind: IssueKind::BlankFilled { field },
                });
                String::new()
            }
        };
    }

    let [location, page, title, text] = fields;
    Ok(Some(DocPageFragment {
        location,
        page,
        title,
        text,
        category,
    }))
}

fn text_field(object: &Map<String, Value>, field: &str) -> Option<String> {
    object.get(field).and_then(Value::as_str).map(str::to_string)
}

fn reject(
    index: usize,
    mode: LoadMode,
    issues: &mut Vec<LoadIssue>,
    reason: String,
) -> Result<Option<DocPageFragment>, LoadError> {
    match mode {
        LoadMode::Strict => Err(LoadError::InvalidRecord { index, reason }),
        LoadMode::Lenient => {
            issues.push(LoadIssue {
                index,
                kind: IssueKind::Skipped { reason },
            });
            Ok(None)
        }
    }
}
