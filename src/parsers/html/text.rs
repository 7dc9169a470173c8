use markup5ever_rcdom::{Handle, NodeData};

use super::dom::{fragment_root, get_node_name, parse_fragment};

/// 遍历时不作为可翻译内容处理的嵌入类元素
pub const EMBEDDABLE_ELEMENTS: &[&str] = &[
    "script", "style", "noscript", "iframe", "object", "embed", "svg",
];

/// 判断元素是否属于嵌入类（脚本/样式/多媒体容器）
pub fn is_embeddable_element(node: &Handle) -> bool {
    match get_node_name(node) {
        Some(name) => EMBEDDABLE_ELEMENTS.contains(&name.to_lowercase().as_str()),
        None => false,
    }
}

/// 获取节点的完整文本内容（所有后代文本节点的拼接）
///
/// 嵌入类后代（脚本、样式等）的内容不算文本。
pub fn text_content(node: &Handle) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

fn collect_text(node: &Handle, out: &mut String) {
    match node.data {
        NodeData::Text { ref contents } => {
            out.push_str(&contents.borrow());
        }
        _ => {
            for child in node.children.borrow().iter() {
                if is_embeddable_element(child) {
                    continue;
                }
                collect_text(child, out);
            }
        }
    }
}

/// 获取节点自身直接持有的文本（不含子元素贡献的部分）
pub fn direct_text(node: &Handle) -> String {
    let mut out = String::new();
    for child in node.children.borrow().iter() {
        if let NodeData::Text { ref contents } = child.data {
            out.push_str(&contents.borrow());
        }
    }
    out
}

/// 判断元素是否为文本意义上的叶子
///
/// 叶子指没有任何（非嵌入类）后代元素自带非空白文本。
pub fn is_text_leaf(node: &Handle) -> bool {
    !has_text_bearing_descendant(node)
}

fn has_text_bearing_descendant(node: &Handle) -> bool {
    for child in node.children.borrow().iter() {
        if let NodeData::Element { .. } = child.data {
            if is_embeddable_element(child) {
                continue;
            }
            if !text_content(child).trim().is_empty() {
                return true;
            }
            // 空文本元素下层仍可能挂着嵌入类之外的文本元素
            if has_text_bearing_descendant(child) {
                return true;
            }
        }
    }
    false
}

/// 剥离 HTML 标签，得到纯文本（已做实体解码，未修剪）
pub fn strip_tags(markup: &str) -> String {
    if !markup.contains('<') && !markup.contains('&') {
        return markup.to_string();
    }
    let dom = parse_fragment(markup);
    text_content(&fragment_root(&dom))
}

/// 判断字符串是否携带标记
///
/// 通过一次解析往返检测：解析后存在子元素，或者文本内容与原始
/// 字符串不一致（含实体），都视为携带标记。
pub fn contains_markup(value: &str) -> bool {
    if !value.contains('<') && !value.contains('&') {
        return false;
    }

    let dom = parse_fragment(value);
    let root = fragment_root(&dom);

    let has_element_children = root
        .children
        .borrow()
        .iter()
        .any(|child| matches!(child.data, NodeData::Element { .. }));

    has_element_children || text_content(&root) != value
}

/// 折叠空白串为单个空格并修剪两端
///
/// 只用于步骤 2 的结构相等比较，纯文本包含判断从不做空白归一。
pub fn normalize_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::html::dom::get_child_node_by_name;

    #[test]
    fn text_content_concatenates_descendants() {
        let dom = parse_fragment("<p>Hello <b>world</b></p>");
        let root = fragment_root(&dom);
        let p = get_child_node_by_name(&root, "p").unwrap();
        assert_eq!(text_content(&p), "Hello world");
    }

    #[test]
    fn text_content_excludes_embedded_elements() {
        let dom = parse_fragment("<div><script>var x = 1;</script><p>Visible</p></div>");
        let root = fragment_root(&dom);
        let div = get_child_node_by_name(&root, "div").unwrap();
        assert_eq!(text_content(&div), "Visible");
    }

    #[test]
    fn direct_text_excludes_children() {
        let dom = parse_fragment("<p>Hello <b>world</b></p>");
        let root = fragment_root(&dom);
        let p = get_child_node_by_name(&root, "p").unwrap();
        assert_eq!(direct_text(&p), "Hello ");
    }

    #[test]
    fn leaf_detection() {
        let dom = parse_fragment("<div><p>text</p></div><span>plain</span>");
        let root = fragment_root(&dom);
        let div = get_child_node_by_name(&root, "div").unwrap();
        let span = get_child_node_by_name(&root, "span").unwrap();

        assert!(!is_text_leaf(&div));
        assert!(is_text_leaf(&span));
    }

    #[test]
    fn strip_tags_decodes_entities() {
        assert_eq!(strip_tags("<strong>Hi</strong>"), "Hi");
        assert_eq!(strip_tags("a &amp; b"), "a & b");
        assert_eq!(strip_tags("plain"), "plain");
    }

    #[test]
    fn markup_detection() {
        assert!(contains_markup("<strong>Hi</strong>"));
        assert!(contains_markup("a &amp; b"));
        assert!(!contains_markup("Bonjour"));
        assert!(!contains_markup(""));
    }

    #[test]
    fn whitespace_normalization() {
        assert_eq!(normalize_whitespace("  a \n  b\t c "), "a b c");
    }
}
