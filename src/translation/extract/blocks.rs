//! 块树文档的片段提取
//!
//! 每个块按 属性 → HTML 主体 → 原始内容 的顺序处理，块内用
//! 已见文本集去重：同一段文本先以属性身份提取，主体和原始内容
//! 阶段再遇到时跳过（属性优先）。嵌套块各自维护独立的已见集。

use std::collections::HashSet;

use serde_json::Value;

use crate::core::Block;
use crate::parsers::html::dom::{fragment_root, parse_fragment};
use crate::parsers::html::text::strip_tags;
use crate::translation::config::ExtractorConfig;
use crate::translation::fragment::{Fragment, FragmentOrigin};
use crate::translation::locator::{Locator, Segment};

use super::collect_markup_units;

/// 提取块树中的片段
pub fn extract(tree: &[Block], config: &ExtractorConfig) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    for (index, block) in tree.iter().enumerate() {
        walk_block(
            block,
            &Locator::root().join(Segment::Index(index)),
            config,
            &mut fragments,
        );
    }
    fragments
}

fn walk_block(
    block: &Block,
    locator: &Locator,
    config: &ExtractorConfig,
    fragments: &mut Vec<Fragment>,
) {
    let mut seen: HashSet<String> = HashSet::new();

    // 属性按允许表顺序检查
    for key in &config.translatable_attrs {
        let value = match block.attrs.get(key) {
            Some(Value::String(value)) => value,
            _ => continue,
        };
        let text = strip_tags(value).trim().to_string();
        if text.is_empty() {
            continue;
        }

        seen.insert(text.clone());
        fragments.push(
            Fragment::content(
                text,
                Some(value.clone()),
                FragmentOrigin::Attribute { key: key.clone() },
            )
            .with_locator(
                locator
                    .join(Segment::Key("attrs".to_string()))
                    .join(Segment::Key(key.clone())),
            ),
        );
    }

    // HTML 主体
    if !block.inner_html.trim().is_empty() {
        extract_body(
            &block.inner_html,
            &locator.join(Segment::Key("innerHTML".to_string())),
            FragmentOrigin::Body,
            &mut seen,
            fragments,
        );
    }

    // 原始内容序列（None 是嵌套块占位符）
    for (index, entry) in block.inner_content.iter().enumerate() {
        let raw = match entry {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => continue,
        };
        extract_body(
            raw,
            &locator
                .join(Segment::Key("innerContent".to_string()))
                .join(Segment::Index(index)),
            FragmentOrigin::RawContent { index },
            &mut seen,
            fragments,
        );
    }

    for (index, child) in block.inner_blocks.iter().enumerate() {
        walk_block(
            child,
            &locator
                .join(Segment::Key("innerBlocks".to_string()))
                .join(Segment::Index(index)),
            config,
            fragments,
        );
    }
}

/// 对一段标记主体做翻译单元遍历
///
/// 主体有文本但遍历不出任何单元时（纯文本主体），整体作为
/// 一个片段提取。
fn extract_body(
    markup: &str,
    locator: &Locator,
    origin: FragmentOrigin,
    seen: &mut HashSet<String>,
    fragments: &mut Vec<Fragment>,
) {
    let dom = parse_fragment(markup);
    let units = collect_markup_units(&fragment_root(&dom));

    if units.is_empty() {
        let text = strip_tags(markup).trim().to_string();
        if !text.is_empty() && seen.insert(text.clone()) {
            fragments.push(
                Fragment::content(text, Some(markup.to_string()), origin)
                    .with_locator(locator.clone()),
            );
        }
        return;
    }

    for (index, unit) in units.into_iter().enumerate() {
        if !seen.insert(unit.text.clone()) {
            continue;
        }
        fragments.push(
            Fragment::content(unit.text, Some(unit.html), origin.clone())
                .with_locator(locator.join(Segment::Index(index))),
        );
    }
}
