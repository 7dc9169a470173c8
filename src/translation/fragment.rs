//! 片段类型
//!
//! 片段是翻译的基本单位：一段修剪过、剥离了标记的纯文本，
//! 加上指回源文档的定位器和来源信息。片段列表在一次翻译会话
//! 中产出一次，回写完成后即丢弃。

use crate::translation::locator::Locator;

/// 片段种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    /// 标题（宿主提供）
    Title,
    /// 正文内容
    Content,
}

/// 片段在源文档中的来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentOrigin {
    /// 块节点的属性值
    Attribute {
        /// 属性键
        key: String,
    },
    /// HTML 主体中的元素文本
    Body,
    /// 原始内容序列中的条目
    RawContent {
        /// 条目下标
        index: usize,
    },
    /// 元素设置表中的字符串值
    Setting {
        /// 设置键
        key: String,
    },
    /// 转发器行中的字段
    Repeater {
        /// 设置键
        key: String,
        /// 行下标
        index: usize,
        /// 行内字段键
        subkey: String,
    },
    /// 宿主预提取的字符串（翻译记忆通道）
    Provided,
}

/// 一个可独立翻译的文本片段
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    /// 修剪过的纯文本内容（已剥离标记）
    pub text: String,
    /// 源文档中的原始标记，与纯文本一致时为 `None`
    pub html: Option<String>,
    /// 指回源文档的结构化路径
    pub locator: Option<Locator>,
    /// 片段种类
    pub kind: FragmentKind,
    /// 宿主侧字段名（用于按名存储的翻译记忆）
    pub field_name: Option<String>,
    /// 来源信息
    pub origin: FragmentOrigin,
}

impl Fragment {
    /// 创建正文片段，原始标记与纯文本一致时自动省略
    pub fn content(text: String, html: Option<String>, origin: FragmentOrigin) -> Self {
        let html = html.filter(|markup| markup != &text);
        Self {
            text,
            html,
            locator: None,
            kind: FragmentKind::Content,
            field_name: None,
            origin,
        }
    }

    /// 附加定位器
    pub fn with_locator(mut self, locator: Locator) -> Self {
        self.locator = Some(locator);
        self
    }

    /// 附加宿主字段名
    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = Some(field_name.into());
        self
    }

    /// 创建宿主预提取字符串的片段
    pub fn provided(text: String, field_name: impl Into<String>) -> Self {
        Self {
            text,
            html: None,
            locator: None,
            kind: FragmentKind::Content,
            field_name: Some(field_name.into()),
            origin: FragmentOrigin::Provided,
        }
    }

    /// 创建标题片段
    pub fn title(text: String) -> Self {
        Self {
            text,
            html: None,
            locator: None,
            kind: FragmentKind::Title,
            field_name: Some("title".to_string()),
            origin: FragmentOrigin::Provided,
        }
    }

    /// 翻译面展示用的源标记：有原始标记时用标记，否则用纯文本
    pub fn display_markup(&self) -> &str {
        self.html.as_deref().unwrap_or(&self.text)
    }
}

/// 片段与外部翻译面产出的替换文本的配对
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedFragment {
    /// 源片段
    pub fragment: Fragment,
    /// 替换文本，可能携带 HTML
    pub text: String,
}

impl TranslatedFragment {
    /// 配对片段与译文
    pub fn new(fragment: Fragment, text: impl Into<String>) -> Self {
        Self {
            fragment,
            text: text.into(),
        }
    }

    /// 译文是否与原文不同（相同即为无操作）
    pub fn is_changed(&self) -> bool {
        self.text.trim() != self.fragment.text
    }
}
