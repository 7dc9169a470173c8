//! # Lingotree Library
//!
//! 从结构化内容文档中提取可翻译文本片段，并在外部翻译完成后
//! 将译文安全地写回原始结构，保持标记、属性格式和树形结构不变。
//!
//! ## 模块组织
//!
//! - `core` - 文档模型和顶层提取/重组入口
//! - `parsers` - HTML 片段解析、文本提取和序列化
//! - `translation` - 片段提取、匹配合并、路径定位和会话管理

pub mod core;
pub mod parsers;
pub mod translation;

// Re-export commonly used items for convenience
pub use crate::core::*;
pub use crate::parsers::*;
