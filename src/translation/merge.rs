//! 匹配与合并
//!
//! 把一条译文合并进容器标记的策略级联。策略按序尝试，第一个
//! 命中的生效；全部落空是匹配失败，调用方保持容器原样（匹配
//! 失败是策略而非错误）。
//!
//! 级联顺序：
//! 1. 叶子元素精确匹配（译文和容器都携带标记时）
//! 2. 任意元素精确匹配（同样要求译文携带标记）
//! 3. 文本节点包含匹配（纯文本译文就地替换，带标记译文替换
//!    父元素的内层标记）
//! 4. 原始字符串全局替换（仅限纯文本译文）

use std::sync::OnceLock;

use markup5ever_rcdom::{Handle, NodeData};
use regex::Regex;
use tracing::debug;

use crate::parsers::html::dom::{fragment_root, get_parent_node, parse_fragment};
use crate::parsers::html::serializer::{inner_html, outer_html, replace_children, replace_node};
use crate::parsers::html::text::{
    contains_markup, is_embeddable_element, is_text_leaf, normalize_whitespace, strip_tags,
    text_content,
};

fn raw_markup_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]+>").expect("标记探测正则无效"))
}

/// 把译文合并进容器标记
///
/// 返回 `Some(新容器)` 表示某个策略命中；`None` 表示匹配失败，
/// 容器应保持原样。译文与原文相同是无操作，直接返回原容器。
pub fn merge_translation(container: &str, original: &str, translated: &str) -> Option<String> {
    let translated = translated.trim();
    if translated == original {
        return Some(container.to_string());
    }
    if original.is_empty() || !strip_tags(container).contains(original) {
        return None;
    }

    let translated_has_markup = contains_markup(translated);
    let container_has_markup = raw_markup_pattern().is_match(container);

    if container_has_markup {
        // 元素级替换只接带标记的译文，纯文本译文落到文本节点策略
        if translated_has_markup {
            if let Some(merged) = replace_leaf_element(container, original, translated) {
                debug!(strategy = 1, "叶子元素精确匹配命中");
                return Some(merged);
            }

            if let Some(merged) = replace_exact_element(container, original, translated) {
                debug!(strategy = 2, "元素精确匹配命中");
                return Some(merged);
            }
        }

        if let Some(merged) =
            replace_in_text_node(container, original, translated, translated_has_markup)
        {
            debug!(strategy = 3, "文本节点匹配命中");
            return Some(merged);
        }
    }

    if !translated_has_markup && container.contains(original) {
        debug!(strategy = 4, "原始字符串替换命中");
        return Some(container.replace(original, translated));
    }

    None
}

/// 结构精确匹配变体
///
/// 已知片段的原始外层 HTML 时优先使用：自内向外寻找归一化
/// 外层 HTML 与原始标记一致、文本也一致的元素，带标记的译文
/// 替换元素本身，纯文本译文替换元素内容。
pub fn merge_structural_exact(
    container: &str,
    original_text: &str,
    original_html: &str,
    translated: &str,
) -> Option<String> {
    let translated = translated.trim();
    if translated == original_text {
        return Some(container.to_string());
    }

    let dom = parse_fragment(container);
    let root = fragment_root(&dom);

    let normalized_html = normalize_whitespace(original_html);
    let target = find_element_post_order(&root, &|node| {
        text_content(node).trim() == original_text
            && normalize_whitespace(&outer_html(node)) == normalized_html
    })?;

    if contains_markup(translated) {
        if !replace_node(&target, translated) {
            return None;
        }
    } else {
        replace_children(&target, translated);
    }

    Some(inner_html(&root))
}

fn replace_leaf_element(container: &str, original: &str, translated: &str) -> Option<String> {
    let dom = parse_fragment(container);
    let root = fragment_root(&dom);

    let target = find_element_pre_order(&root, &|node| {
        is_text_leaf(node) && text_content(node).trim() == original
    })?;

    replace_children(&target, translated);
    Some(inner_html(&root))
}

fn replace_exact_element(container: &str, original: &str, translated: &str) -> Option<String> {
    let dom = parse_fragment(container);
    let root = fragment_root(&dom);

    let target = find_element_pre_order(&root, &|node| text_content(node).trim() == original)?;

    replace_children(&target, translated);
    Some(inner_html(&root))
}

fn replace_in_text_node(
    container: &str,
    original: &str,
    translated: &str,
    translated_has_markup: bool,
) -> Option<String> {
    let dom = parse_fragment(container);
    let root = fragment_root(&dom);

    let text_node = find_text_node(&root, original)?;

    if translated_has_markup {
        // 带标记的译文无法塞进文本节点，改写父元素的内层标记
        let parent = get_parent_node(&text_node)?;
        let inner = inner_html(&parent);
        if !inner.contains(original) {
            return None;
        }
        replace_children(&parent, &inner.replace(original, translated));
    } else if let NodeData::Text { ref contents } = text_node.data {
        let updated = contents.borrow().to_string().replace(original, translated);
        let mut contents = contents.borrow_mut();
        contents.clear();
        contents.push_slice(&updated);
    }

    Some(inner_html(&root))
}

fn find_element_pre_order(node: &Handle, predicate: &dyn Fn(&Handle) -> bool) -> Option<Handle> {
    for child in node.children.borrow().iter() {
        if !matches!(child.data, NodeData::Element { .. }) || is_embeddable_element(child) {
            continue;
        }
        if predicate(child) {
            return Some(child.clone());
        }
        if let Some(found) = find_element_pre_order(child, predicate) {
            return Some(found);
        }
    }
    None
}

fn find_element_post_order(node: &Handle, predicate: &dyn Fn(&Handle) -> bool) -> Option<Handle> {
    for child in node.children.borrow().iter() {
        if !matches!(child.data, NodeData::Element { .. }) || is_embeddable_element(child) {
            continue;
        }
        if let Some(found) = find_element_post_order(child, predicate) {
            return Some(found);
        }
        if predicate(child) {
            return Some(child.clone());
        }
    }
    None
}

fn find_text_node(node: &Handle, original: &str) -> Option<Handle> {
    for child in node.children.borrow().iter() {
        match child.data {
            NodeData::Text { ref contents } => {
                if contents.borrow().contains(original) {
                    return Some(child.clone());
                }
            }
            NodeData::Element { .. } if !is_embeddable_element(child) => {
                if let Some(found) = find_text_node(child, original) {
                    return Some(found);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_translation_is_a_no_op() {
        let merged = merge_translation("<p>Hello</p>", "Hello", "Hello").unwrap();
        assert_eq!(merged, "<p>Hello</p>");
    }

    #[test]
    fn plain_into_plain_uses_raw_replacement() {
        let merged = merge_translation("Hello world", "Hello world", "Bonjour le monde").unwrap();
        assert_eq!(merged, "Bonjour le monde");
    }

    #[test]
    fn markup_translation_lands_in_leaf_element() {
        let merged = merge_translation(
            "<div><p>Hello</p></div>",
            "Hello",
            "<em>Bonjour</em>",
        )
        .unwrap();
        assert_eq!(merged, "<div><p><em>Bonjour</em></p></div>");
    }

    #[test]
    fn plain_translation_lands_in_the_text_node() {
        let merged = merge_translation("<p>Hello</p>", "Hello", "Bonjour").unwrap();
        assert_eq!(merged, "<p>Bonjour</p>");
    }

    #[test]
    fn plain_translation_never_flattens_nested_markup() {
        // 文本分散在子元素里，纯文本译文没有可落脚的文本节点
        assert!(merge_translation("<p>Hello <b>world</b></p>", "Hello world", "Bonjour").is_none());
    }

    #[test]
    fn plain_translation_prefers_the_first_containing_text_node() {
        let merged = merge_translation(
            "<div><p>Around Hello here</p><span>Hello</span></div>",
            "Hello",
            "Bonjour",
        )
        .unwrap();
        assert_eq!(
            merged,
            "<div><p>Around Bonjour here</p><span>Hello</span></div>"
        );
    }

    #[test]
    fn partial_text_replaced_inside_text_node() {
        let merged = merge_translation(
            "<p>Say Hello to everyone</p>",
            "Hello",
            "Bonjour",
        )
        .unwrap();
        assert_eq!(merged, "<p>Say Bonjour to everyone</p>");
    }

    #[test]
    fn missing_original_is_a_match_miss() {
        assert!(merge_translation("<p>Other text</p>", "Hello", "Bonjour").is_none());
    }

    #[test]
    fn structural_exact_replaces_matching_element() {
        let merged = merge_structural_exact(
            "<div><p>Hello</p><p>Other</p></div>",
            "Hello",
            "<p>Hello</p>",
            "<p>Bonjour</p>",
        )
        .unwrap();
        assert_eq!(merged, "<div><p>Bonjour</p><p>Other</p></div>");
    }

    #[test]
    fn structural_exact_with_plain_translation_keeps_the_element() {
        let merged = merge_structural_exact(
            "<div><h2>Title</h2></div>",
            "Title",
            "<h2>Title</h2>",
            "Titre",
        )
        .unwrap();
        assert_eq!(merged, "<div><h2>Titre</h2></div>");
    }
}
