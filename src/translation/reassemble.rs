//! 文档重组
//!
//! 在文档的深拷贝上按提取顺序依次应用翻译结果，后面的结果作用
//! 在前面结果的输出之上。定位器失效和匹配落空都只是跳过该结果
//! （记 debug 日志），结构性的序列化失败才向调用方报错。

use serde_json::Value;
use tracing::debug;

use crate::core::{Block, Document, Element};
use crate::parsers::html::text::{contains_markup, strip_tags};
use crate::translation::config::ExtractorConfig;
use crate::translation::error::TranslationResult;
use crate::translation::fragment::{Fragment, FragmentKind, FragmentOrigin, TranslatedFragment};
use crate::translation::locator::{get_value, write_value};
use crate::translation::merge::{merge_structural_exact, merge_translation};

/// 把一批翻译结果写回文档的深拷贝
pub fn reassemble_document(
    document: &Document,
    results: &[TranslatedFragment],
    config: &ExtractorConfig,
) -> TranslationResult<Document> {
    match document {
        Document::FlatMarkup(markup) => Ok(Document::FlatMarkup(reassemble_flat(markup, results))),
        Document::BlockTree(tree) => reassemble_blocks(tree, results),
        Document::ElementTree(tree) => reassemble_elements(tree, results, config),
    }
}

/// 结果是否参与文档重组
///
/// 标题和宿主预提取字符串不在文档里，译文与原文相同是无操作。
fn applies_to_document(result: &TranslatedFragment) -> bool {
    result.fragment.kind == FragmentKind::Content
        && result.fragment.origin != FragmentOrigin::Provided
        && result.is_changed()
}

/// 扁平文档：逐条结果在当前字符串上做结构精确匹配，落空时退到
/// 策略级联
fn reassemble_flat(markup: &str, results: &[TranslatedFragment]) -> String {
    let mut current = markup.to_string();

    for result in results {
        if !applies_to_document(result) {
            continue;
        }
        let fragment = &result.fragment;
        let translated = prepare_translated(fragment, &result.text);

        let merged = fragment
            .html
            .as_deref()
            .and_then(|html| merge_structural_exact(&current, &fragment.text, html, &translated))
            .or_else(|| merge_translation(&current, &fragment.text, &translated));

        match merged {
            Some(next) => current = next,
            None => debug!(text = %fragment.text, "匹配失败，保持原文"),
        }
    }

    current
}

/// 原文无标记而译文带标记时剥离译文，替换不能把标记引入纯文本位置
fn prepare_translated(fragment: &Fragment, translated: &str) -> String {
    let translated = translated.trim();
    if fragment.html.is_none() && contains_markup(translated) {
        strip_tags(translated).trim().to_string()
    } else {
        translated.to_string()
    }
}

fn reassemble_blocks(
    tree: &[Block],
    results: &[TranslatedFragment],
) -> TranslationResult<Document> {
    let mut value = serde_json::to_value(tree)?;

    for result in results {
        if !applies_to_document(result) {
            continue;
        }
        let fragment = &result.fragment;

        match &fragment.origin {
            FragmentOrigin::Attribute { .. } => {
                apply_attribute(&mut value, fragment, &result.text);
            }
            FragmentOrigin::Body | FragmentOrigin::RawContent { .. } => {
                if let Value::Array(blocks) = &mut value {
                    let mut applied = false;
                    for block in blocks.iter_mut() {
                        applied |= merge_into_block(block, fragment, &result.text);
                    }
                    if !applied {
                        debug!(text = %fragment.text, "匹配失败，保持原文");
                    }
                }
            }
            _ => debug!(text = %fragment.text, "来源与文档形态不符，跳过"),
        }
    }

    let blocks: Vec<Block> = serde_json::from_value(value)?;
    Ok(Document::BlockTree(blocks))
}

/// 属性结果走定位器读出当前值，译文经策略级联合并后写回，
/// 属性值里的标记在纯文本译文下得以保留
fn apply_attribute(tree: &mut Value, fragment: &Fragment, translated: &str) {
    let locator = match &fragment.locator {
        Some(locator) => locator,
        None => {
            debug!(text = %fragment.text, "属性片段缺少定位器，跳过");
            return;
        }
    };

    let current = match get_value(tree, locator.segments()).and_then(Value::as_str) {
        Some(current) => current.to_string(),
        None => {
            debug!(locator = %locator, "定位器失效，跳过");
            return;
        }
    };

    match merge_translation(&current, &fragment.text, translated) {
        Some(merged) => {
            if !write_value(tree, locator.segments(), Value::String(merged)) {
                debug!(locator = %locator, "定位器失效，跳过");
            }
        }
        None => debug!(locator = %locator, "匹配失败，保持原文"),
    }
}

/// 把一条正文结果合并进单个块：HTML 主体、字符串原始内容，
/// 然后无条件递归嵌套块
fn merge_into_block(block: &mut Value, fragment: &Fragment, translated: &str) -> bool {
    let mut applied = false;
    let translated = prepare_translated(fragment, translated);

    if let Some(Value::String(body)) = block.get_mut("innerHTML") {
        let merged = fragment
            .html
            .as_deref()
            .and_then(|html| merge_structural_exact(body, &fragment.text, html, &translated))
            .or_else(|| merge_translation(body, &fragment.text, &translated));
        if let Some(next) = merged {
            if next != *body {
                *body = next;
                applied = true;
            }
        }
    }

    if let Some(Value::Array(entries)) = block.get_mut("innerContent") {
        // 原始内容槽必须保持可序列化，带标记的译文先剥成纯文本
        let plain = if contains_markup(&translated) {
            strip_tags(&translated).trim().to_string()
        } else {
            translated.clone()
        };

        for entry in entries.iter_mut() {
            if let Value::String(raw) = entry {
                if let Some(next) = merge_translation(raw, &fragment.text, &plain) {
                    if next != *raw {
                        *entry = Value::String(next);
                        applied = true;
                    }
                }
            }
        }
    }

    if let Some(Value::Array(children)) = block.get_mut("innerBlocks") {
        for child in children.iter_mut() {
            applied |= merge_into_block(child, fragment, translated.as_str());
        }
    }

    applied
}

fn reassemble_elements(
    tree: &[Element],
    results: &[TranslatedFragment],
    config: &ExtractorConfig,
) -> TranslationResult<Document> {
    let mut value = serde_json::to_value(tree)?;

    for result in results {
        if !applies_to_document(result) {
            continue;
        }
        let fragment = &result.fragment;
        let translated = result.text.trim().to_string();

        match &fragment.locator {
            // 设置值直接覆写
            Some(locator) => {
                if !write_value(&mut value, locator.segments(), Value::String(translated)) {
                    debug!(locator = %locator, "定位器失效，跳过");
                }
            }
            // 无定位器时退到设置表扫描合并
            None => {
                if let Value::Array(elements) = &mut value {
                    let mut applied = false;
                    for element in elements.iter_mut() {
                        applied |= merge_into_element(element, fragment, &translated, config);
                    }
                    if !applied {
                        debug!(text = %fragment.text, "匹配失败，保持原文");
                    }
                }
            }
        }
    }

    let elements: Vec<Element> = serde_json::from_value(value)?;
    Ok(Document::ElementTree(elements))
}

fn merge_into_element(
    element: &mut Value,
    fragment: &Fragment,
    translated: &str,
    config: &ExtractorConfig,
) -> bool {
    let mut applied = false;

    if let Some(Value::Object(settings)) = element.get_mut("settings") {
        for (key, setting) in settings.iter_mut() {
            if config.is_css_property(key) || !config.is_translatable_setting_key(key) {
                continue;
            }
            if let Value::String(raw) = setting {
                if let Some(next) = merge_translation(raw, &fragment.text, translated) {
                    if next != *raw {
                        *setting = Value::String(next);
                        applied = true;
                    }
                }
            }
        }
    }

    if let Some(Value::Array(children)) = element.get_mut("elements") {
        for child in children.iter_mut() {
            applied |= merge_into_element(child, fragment, translated, config);
        }
    }

    applied
}
