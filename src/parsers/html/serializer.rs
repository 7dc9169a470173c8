use std::rc::Rc;

use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use markup5ever_rcdom::{Handle, SerializableHandle};

use super::dom::{fragment_root, get_parent_node, parse_fragment};

/// 序列化节点的内层 HTML（只序列化子节点）
pub fn inner_html(node: &Handle) -> String {
    serialize_handle(node, TraversalScope::ChildrenOnly(None))
}

/// 序列化节点的外层 HTML（包含节点本身）
pub fn outer_html(node: &Handle) -> String {
    serialize_handle(node, TraversalScope::IncludeNode)
}

fn serialize_handle(node: &Handle, traversal_scope: TraversalScope) -> String {
    let mut buf: Vec<u8> = Vec::new();
    let serializable: SerializableHandle = node.clone().into();

    serialize(
        &mut buf,
        &serializable,
        SerializeOpts {
            traversal_scope,
            ..Default::default()
        },
    )
    .expect("Unable to serialize DOM into buffer");

    String::from_utf8_lossy(&buf).to_string()
}

/// 用解析后的标记替换节点的全部子节点
///
/// 新标记先被解析成独立的片段树，其内容节点逐个改挂到目标节点下。
pub fn replace_children(node: &Handle, markup: &str) {
    let dom = parse_fragment(markup);
    let new_root = fragment_root(&dom);
    let new_children: Vec<Handle> = new_root.children.borrow_mut().drain(..).collect();

    let mut children = node.children.borrow_mut();
    children.clear();

    for child in new_children {
        child.parent.set(Some(Rc::downgrade(node)));
        children.push(child);
    }
}

/// 用解析后的标记替换节点本身（在父节点的子序列中原位拼接）
///
/// 找不到父节点时不做任何修改。
pub fn replace_node(node: &Handle, markup: &str) -> bool {
    let parent = match get_parent_node(node) {
        Some(parent) => parent,
        None => return false,
    };

    let position = {
        let children = parent.children.borrow();
        children.iter().position(|child| Rc::ptr_eq(child, node))
    };
    let position = match position {
        Some(position) => position,
        None => return false,
    };

    let dom = parse_fragment(markup);
    let new_root = fragment_root(&dom);
    let new_children: Vec<Handle> = new_root.children.borrow_mut().drain(..).collect();

    let mut children = parent.children.borrow_mut();
    children.remove(position);

    for (offset, child) in new_children.into_iter().enumerate() {
        child.parent.set(Some(Rc::downgrade(&parent)));
        children.insert(position + offset, child);
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::html::dom::get_child_node_by_name;

    #[test]
    fn inner_and_outer_html() {
        let dom = parse_fragment("<p>Hello <b>world</b></p>");
        let root = fragment_root(&dom);
        let p = get_child_node_by_name(&root, "p").unwrap();

        assert_eq!(inner_html(&p), "Hello <b>world</b>");
        assert_eq!(outer_html(&p), "<p>Hello <b>world</b></p>");
    }

    #[test]
    fn replaces_children_with_parsed_markup() {
        let dom = parse_fragment("<p>old</p>");
        let root = fragment_root(&dom);
        let p = get_child_node_by_name(&root, "p").unwrap();

        replace_children(&p, "new <i>text</i>");
        assert_eq!(outer_html(&p), "<p>new <i>text</i></p>");
    }

    #[test]
    fn replaces_node_in_place() {
        let dom = parse_fragment("<div><p>a</p><p>b</p></div>");
        let root = fragment_root(&dom);
        let div = get_child_node_by_name(&root, "div").unwrap();
        let first = get_child_node_by_name(&div, "p").unwrap();

        assert!(replace_node(&first, "<h2>c</h2>"));
        assert_eq!(inner_html(&div), "<h2>c</h2><p>b</p>");
    }
}
