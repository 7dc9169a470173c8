//! 片段提取
//!
//! 按文档形态分派到对应的提取器。提取是确定性的纯函数：
//! 同一文档在同一配置下总是产出相同顺序的相同片段。

pub mod blocks;
pub mod elements;
pub mod flat;

use markup5ever_rcdom::{Handle, NodeData};
use tracing::debug;

use crate::core::Document;
use crate::parsers::html::serializer::outer_html;
use crate::parsers::html::text::{direct_text, is_embeddable_element, is_text_leaf, text_content};
use crate::translation::config::ExtractorConfig;
use crate::translation::fragment::Fragment;

/// 提取文档的有序片段列表
pub fn extract_document(document: &Document, config: &ExtractorConfig) -> Vec<Fragment> {
    let fragments = match document {
        Document::FlatMarkup(markup) => flat::extract(markup),
        Document::BlockTree(tree) => blocks::extract(tree, config),
        Document::ElementTree(tree) => elements::extract(tree, config),
    };

    debug!(
        shape = document.shape(),
        count = fragments.len(),
        "片段提取完成"
    );
    fragments
}

/// 标记主体中提取出的一个翻译单元
#[derive(Debug, Clone)]
pub(crate) struct MarkupUnit {
    /// 修剪过的纯文本
    pub text: String,
    /// 单元元素的外层 HTML
    pub html: String,
}

/// 从解析后的片段根收集翻译单元
///
/// 自外向内的先序遍历：元素是文本叶子、自带非空白直接文本、
/// 或自身文本与子元素文本拼接不一致时作为一个单元整体提取，
/// 其后代不再访问；否则继续下探。嵌入类元素整棵跳过。
pub(crate) fn collect_markup_units(root: &Handle) -> Vec<MarkupUnit> {
    let mut units = Vec::new();
    walk_children(root, &mut units);
    units
}

fn walk_children(node: &Handle, units: &mut Vec<MarkupUnit>) {
    for child in node.children.borrow().iter() {
        if !matches!(child.data, NodeData::Element { .. }) {
            continue;
        }
        if is_embeddable_element(child) {
            continue;
        }

        let text = text_content(child);
        let trimmed = text.trim();
        if trimmed.is_empty() {
            walk_children(child, units);
            continue;
        }

        if is_unit_element(child, &text) {
            units.push(MarkupUnit {
                text: trimmed.to_string(),
                html: outer_html(child),
            });
        } else {
            walk_children(child, units);
        }
    }
}

fn is_unit_element(node: &Handle, text: &str) -> bool {
    if is_text_leaf(node) {
        return true;
    }
    if !direct_text(node).trim().is_empty() {
        return true;
    }

    // 文本并非全部来自子元素时整体提取（注释间文本等边角情况）
    collapse(text) != children_text_collapsed(node)
}

fn children_text_collapsed(node: &Handle) -> String {
    let mut out = String::new();
    for child in node.children.borrow().iter() {
        if matches!(child.data, NodeData::Element { .. }) && !is_embeddable_element(child) {
            out.push_str(&collapse(&text_content(child)));
        }
    }
    out
}

/// 去掉全部空白后比较，子元素间的排版空白不应影响判定
fn collapse(value: &str) -> String {
    value.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::html::dom::{fragment_root, parse_fragment};

    fn units_of(markup: &str) -> Vec<MarkupUnit> {
        let dom = parse_fragment(markup);
        collect_markup_units(&fragment_root(&dom))
    }

    #[test]
    fn sibling_paragraphs_are_separate_units() {
        let units = units_of("<div><p>First</p>\n<p>Second</p></div>");
        let texts: Vec<&str> = units.iter().map(|u| u.text.as_str()).collect();
        assert_eq!(texts, ["First", "Second"]);
    }

    #[test]
    fn mixed_content_is_one_unit() {
        let units = units_of("<p>Hello <strong>world</strong>!</p>");
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].text, "Hello world!");
        assert!(units[0].html.contains("<strong>"));
    }

    #[test]
    fn embedded_elements_are_skipped() {
        let units = units_of("<div><script>var x = 1;</script><p>Visible</p></div>");
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].text, "Visible");
    }

    #[test]
    fn whitespace_only_yields_nothing() {
        assert!(units_of("<div>  \n\t </div>").is_empty());
    }
}
