//! HTML 片段解析和处理模块
//!
//! 所有标记操作都遵循同一个模式：把片段解析为独立的 DOM 树，
//! 在树上完成修改，再序列化回字符串。没有共享的全局文档状态。
//!
//! - `dom`: 片段解析和基础 DOM 操作
//! - `text`: 文本内容提取、标签剥离、叶子判定
//! - `serializer`: 内层/外层 HTML 序列化和子节点替换

pub mod dom;
pub mod serializer;
pub mod text;

// 重新导出主要的公共 API
pub use dom::{fragment_root, get_node_attr, get_node_name, get_parent_node, parse_fragment};
pub use serializer::{inner_html, outer_html, replace_children, replace_node};
pub use text::{
    contains_markup, direct_text, is_text_leaf, normalize_whitespace, strip_tags, text_content,
};
