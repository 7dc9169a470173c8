//! 扁平 HTML 文档的片段提取

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::parsers::html::dom::{fragment_root, parse_fragment};
use crate::parsers::html::text::strip_tags;
use crate::translation::fragment::{Fragment, FragmentOrigin};

use super::collect_markup_units;

fn paragraph_splitter() -> &'static Regex {
    static SPLITTER: OnceLock<Regex> = OnceLock::new();
    SPLITTER.get_or_init(|| Regex::new(r"\n{2,}").expect("段落切分正则无效"))
}

/// 提取扁平 HTML 字符串中的片段
///
/// 正常路径是基于 DOM 的翻译单元遍历；当遍历产出为空（纯文本或
/// 无元素结构的内容）时回退到空行切分，每个非空段落一个片段。
/// 同一文本只提取一次。
pub fn extract(markup: &str) -> Vec<Fragment> {
    if markup.trim().is_empty() {
        return Vec::new();
    }

    let mut fragments = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    let dom = parse_fragment(markup);
    for unit in collect_markup_units(&fragment_root(&dom)) {
        if !seen.insert(unit.text.clone()) {
            continue;
        }
        fragments.push(Fragment::content(
            unit.text,
            Some(unit.html),
            FragmentOrigin::Body,
        ));
    }

    if fragments.is_empty() {
        for part in paragraph_splitter().split(markup) {
            let text = strip_tags(part).trim().to_string();
            if text.is_empty() || !seen.insert(text.clone()) {
                continue;
            }
            fragments.push(Fragment::content(
                text,
                Some(part.to_string()),
                FragmentOrigin::Body,
            ));
        }
    }

    fragments
}
