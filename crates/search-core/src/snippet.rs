// search-core/src/snippet.rs
//! 摘要生成
//!
//! 按字符（而非字节）截取，正文里常见 `R₀`、`ψ` 这类多字节字符。

use crate::config::DisplayConfig;

const ELLIPSIS: char = '…';

/// 生成命中片段的摘要
///
/// 空白折叠为单个空格；窗口长度为 `preview_max_length`，
/// 起点在第一个命中词之前 `sentence_search_start` 个字符处；
/// 两端被截断时补 `…`。没有命中词时从头截取。
pub fn make_snippet(text: &str, terms: &[String], display: &DisplayConfig) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() || display.preview_max_length == 0 {
        return String::new();
    }

    let chars: Vec<char> = collapsed.chars().collect();
    let len = chars.len();
    let max = display.preview_max_length;

    let mut start = first_occurrence(&chars, terms)
        .map(|pos| pos.saturating_sub(display.sentence_search_start))
        .unwrap_or(0);
    let end = (start + max).min(len);
    // 靠近结尾时向前补足窗口
    if end - start < max {
        start = end.saturating_sub(max);
    }

    let mut snippet = String::with_capacity(max + 2);
    if start > 0 {
        snippet.push(ELLIPSIS);
    }
    snippet.extend(&chars[start..end]);
    if end < len {
        snippet.push(ELLIPSIS);
    }
    snippet
}

/// 任一词首次出现的字符位置（忽略大小写）
fn first_occurrence(chars: &[char], terms: &[String]) -> Option<usize> {
    let haystack: Vec<char> = chars.iter().map(|&c| fold(c)).collect();

    terms
        .iter()
        .filter_map(|term| {
            let needle: Vec<char> = term.chars().map(fold).collect();
            if needle.is_empty() || needle.len() > haystack.len() {
                return None;
            }
            haystack.windows(needle.len()).position(|w| w == needle.as_slice())
        })
        .min()
}

// 逐字符小写，保持长度不变
fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}
