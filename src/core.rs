//! 文档模型
//!
//! 支持三种文档形态：扁平 HTML 字符串、块树（区块编辑器）和
//! 元素树（页面构建器）。文档是只读输入，重组总是在深拷贝上进行。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::translation::config::ExtractorConfig;
use crate::translation::error::{TranslationError, TranslationResult};
use crate::translation::fragment::{Fragment, TranslatedFragment};
use crate::translation::{extract, reassemble};

/// 结构化内容文档
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// 扁平 HTML 字符串（经典编辑器）
    FlatMarkup(String),
    /// 块节点序列（区块编辑器）
    BlockTree(Vec<Block>),
    /// 嵌套元素序列（页面构建器）
    ElementTree(Vec<Element>),
}

/// 区块编辑器的块节点
///
/// 字段名与宿主序列化格式保持一致；未建模的字段通过 `extra`
/// 原样保留，重组后的文档不会丢失它们。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// 块类型名，经典内容块为空
    #[serde(rename = "blockName", default)]
    pub block_name: Option<String>,

    /// 块属性表
    #[serde(default)]
    pub attrs: Map<String, Value>,

    /// 块的 HTML 主体
    #[serde(rename = "innerHTML", default)]
    pub inner_html: String,

    /// 原始内容片段序列，`None` 是嵌套块占位符
    #[serde(rename = "innerContent", default)]
    pub inner_content: Vec<Option<String>>,

    /// 嵌套块
    #[serde(rename = "innerBlocks", default)]
    pub inner_blocks: Vec<Block>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 页面构建器的元素节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// 元素类型标签
    #[serde(rename = "elType", default)]
    pub el_type: String,

    /// 部件类型（仅部件元素携带）
    #[serde(rename = "widgetType", default, skip_serializing_if = "Option::is_none")]
    pub widget_type: Option<String>,

    /// 设置表：字符串值或转发器行序列
    #[serde(default)]
    pub settings: Map<String, Value>,

    /// 嵌套元素
    #[serde(default)]
    pub elements: Vec<Element>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    /// 从宿主提供的 JSON 值构造块树文档
    ///
    /// 顶层必须是数组，否则视为损坏的负载。
    pub fn block_tree_from_value(value: Value) -> TranslationResult<Self> {
        if !value.is_array() {
            return Err(TranslationError::MalformedPayload(
                "块树文档的顶层必须是数组".to_string(),
            ));
        }

        let blocks: Vec<Block> = serde_json::from_value(value)?;
        Ok(Document::BlockTree(blocks))
    }

    /// 从宿主提供的 JSON 值构造元素树文档
    pub fn element_tree_from_value(value: Value) -> TranslationResult<Self> {
        if !value.is_array() {
            return Err(TranslationError::MalformedPayload(
                "元素树文档的顶层必须是数组".to_string(),
            ));
        }

        let elements: Vec<Element> = serde_json::from_value(value)?;
        Ok(Document::ElementTree(elements))
    }

    /// 序列化为宿主可持久化的 JSON 值
    ///
    /// 扁平文档序列化为字符串值，两种树形文档序列化为数组。
    pub fn to_value(&self) -> TranslationResult<Value> {
        let value = match self {
            Document::FlatMarkup(markup) => Value::String(markup.clone()),
            Document::BlockTree(blocks) => serde_json::to_value(blocks)?,
            Document::ElementTree(elements) => serde_json::to_value(elements)?,
        };
        Ok(value)
    }

    /// 文档形态名称（用于日志）
    pub fn shape(&self) -> &'static str {
        match self {
            Document::FlatMarkup(_) => "flat",
            Document::BlockTree(_) => "block",
            Document::ElementTree(_) => "element",
        }
    }

    /// 提取有序的可翻译片段列表
    ///
    /// 确定性、无副作用：同一文档总是产出相同顺序的相同片段。
    pub fn extract(&self) -> Vec<Fragment> {
        self.extract_with(&ExtractorConfig::default())
    }

    /// 使用给定配置提取片段
    pub fn extract_with(&self, config: &ExtractorConfig) -> Vec<Fragment> {
        extract::extract_document(self, config)
    }

    /// 把一批翻译结果写回文档的深拷贝
    ///
    /// 结果严格按片段提取顺序依次应用，后面的结果作用在前面
    /// 结果的输出之上。原文档从不被修改。
    pub fn reassemble(&self, results: &[TranslatedFragment]) -> TranslationResult<Document> {
        self.reassemble_with(results, &ExtractorConfig::default())
    }

    /// 使用给定配置重组文档
    pub fn reassemble_with(
        &self,
        results: &[TranslatedFragment],
        config: &ExtractorConfig,
    ) -> TranslationResult<Document> {
        reassemble::reassemble_document(self, results, config)
    }
}
