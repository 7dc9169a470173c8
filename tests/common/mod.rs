// 集成测试公共模块
//
// 提供三种文档形态的构造辅助和批量翻译辅助

use serde_json::{Map, Value};

use lingotree::core::{Block, Document, Element};
use lingotree::translation::fragment::TranslatedFragment;

/// 构造一个段落块，content 属性与 HTML 主体成对出现
pub fn paragraph_block(content: &str, body: &str) -> Block {
    let mut attrs = Map::new();
    if !content.is_empty() {
        attrs.insert("content".to_string(), Value::String(content.to_string()));
    }
    Block {
        block_name: Some("core/paragraph".to_string()),
        attrs,
        inner_html: body.to_string(),
        inner_content: if body.is_empty() {
            Vec::new()
        } else {
            vec![Some(body.to_string())]
        },
        inner_blocks: Vec::new(),
        extra: Map::new(),
    }
}

/// 构造一个容器块，子块在原始内容序列中以占位符出现
pub fn container_block(children: Vec<Block>) -> Block {
    let inner_content = children.iter().map(|_| None).collect();
    Block {
        block_name: Some("core/group".to_string()),
        attrs: Map::new(),
        inner_html: String::new(),
        inner_content,
        inner_blocks: children,
        extra: Map::new(),
    }
}

/// 构造一个部件元素
pub fn widget(widget_type: &str, settings: Value) -> Element {
    Element {
        el_type: "widget".to_string(),
        widget_type: Some(widget_type.to_string()),
        settings: match settings {
            Value::Object(map) => map,
            _ => Map::new(),
        },
        elements: Vec::new(),
        extra: Map::new(),
    }
}

/// 构造一个区段元素
pub fn section(children: Vec<Element>) -> Element {
    Element {
        el_type: "section".to_string(),
        widget_type: None,
        settings: Map::new(),
        elements: children,
        extra: Map::new(),
    }
}

/// 按原文查表产出翻译结果，查不到的片段保持原文
pub fn results_for(document: &Document, pairs: &[(&str, &str)]) -> Vec<TranslatedFragment> {
    document
        .extract()
        .into_iter()
        .map(|fragment| {
            let translated = pairs
                .iter()
                .find(|(original, _)| *original == fragment.text)
                .map(|(_, translated)| translated.to_string())
                .unwrap_or_else(|| fragment.text.clone());
            TranslatedFragment::new(fragment, translated)
        })
        .collect()
}

/// 提取、翻译、重组一条龙
pub fn translate(document: &Document, pairs: &[(&str, &str)]) -> Document {
    document
        .reassemble(&results_for(document, pairs))
        .expect("重组不应失败")
}
