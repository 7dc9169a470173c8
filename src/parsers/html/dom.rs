use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// 将标记片段解析为独立的 DOM 树
///
/// 每次调用都分配一棵新树，调用方在树上修改后用 `serializer`
/// 序列化回字符串。
pub fn parse_fragment(markup: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(markup)
}

/// 获取片段树的内容根节点（body）
///
/// `parse_document` 会为片段补全 html/head/body 外壳，
/// 片段的实际内容挂在 body 下。
pub fn fragment_root(dom: &RcDom) -> Handle {
    if let Some(html) = get_child_node_by_name(&dom.document, "html") {
        if let Some(body) = get_child_node_by_name(&html, "body") {
            return body;
        }
    }
    dom.document.clone()
}

/// 根据名称获取子节点
pub fn get_child_node_by_name(parent: &Handle, node_name: &str) -> Option<Handle> {
    let children = parent.children.borrow();
    let matching_children = children.iter().find(|child| match child.data {
        NodeData::Element { ref name, .. } => &*name.local == node_name,
        _ => false,
    });
    matching_children.cloned()
}

/// 获取节点属性值
pub fn get_node_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => {
            for attr in attrs.borrow().iter() {
                if &*attr.name.local == attr_name {
                    return Some(attr.value.to_string());
                }
            }
            None
        }
        _ => None,
    }
}

/// 获取节点名称
pub fn get_node_name(node: &Handle) -> Option<&'_ str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

/// 获取父节点
pub fn get_parent_node(child: &Handle) -> Option<Handle> {
    let parent = child.parent.take();
    child.parent.set(parent.clone());
    parent.and_then(|node| node.upgrade())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fragment_under_body() {
        let dom = parse_fragment("<p>Hello</p>");
        let root = fragment_root(&dom);
        let p = get_child_node_by_name(&root, "p");
        assert!(p.is_some());
    }

    #[test]
    fn reads_attributes() {
        let dom = parse_fragment("<img alt=\"cat\">");
        let root = fragment_root(&dom);
        let img = get_child_node_by_name(&root, "img").unwrap();

        assert_eq!(get_node_attr(&img, "alt"), Some("cat".to_string()));
        assert_eq!(get_node_attr(&img, "title"), None);
    }

    #[test]
    fn parent_lookup_keeps_link_intact() {
        let dom = parse_fragment("<p><b>x</b></p>");
        let root = fragment_root(&dom);
        let p = get_child_node_by_name(&root, "p").unwrap();
        let b = get_child_node_by_name(&p, "b").unwrap();

        // 两次访问都应成功，parent 链接不能被消耗掉
        assert!(get_parent_node(&b).is_some());
        assert!(get_parent_node(&b).is_some());
    }
}
