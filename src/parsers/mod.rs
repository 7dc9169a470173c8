//! # 解析器模块
//!
//! 这个模块包含用于解析和处理标记片段的功能：
//!
//! - HTML 片段解析和 DOM 操作
//! - 文本内容提取和标签剥离
//! - DOM 序列化（内层/外层 HTML）

pub mod html;

// 常用项的便捷重导出
pub use html::{
    contains_markup, direct_text, get_node_attr, get_node_name, get_parent_node, inner_html,
    is_text_leaf, normalize_whitespace, outer_html, parse_fragment, replace_children, strip_tags,
    text_content,
};
