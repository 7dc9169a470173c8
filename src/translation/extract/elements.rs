//! 元素树文档的片段提取
//!
//! 遍历设置表提取字符串值，键名启发式决定是否可翻译；数组值按
//! 转发器行展开，行内字段用同一套键名规则过滤。子元素无条件递归。

use serde_json::Value;

use crate::core::Element;
use crate::parsers::html::text::strip_tags;
use crate::translation::config::ExtractorConfig;
use crate::translation::fragment::{Fragment, FragmentOrigin};
use crate::translation::locator::{Locator, Segment};

/// 提取元素树中的片段
pub fn extract(tree: &[Element], config: &ExtractorConfig) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    for (index, element) in tree.iter().enumerate() {
        walk_element(
            element,
            &Locator::root().join(Segment::Index(index)),
            config,
            &mut fragments,
        );
    }
    fragments
}

fn walk_element(
    element: &Element,
    locator: &Locator,
    config: &ExtractorConfig,
    fragments: &mut Vec<Fragment>,
) {
    let settings_locator = locator.join(Segment::Key("settings".to_string()));

    for (key, value) in &element.settings {
        // 样式类键整个跳过，包括它挂着的转发器行
        if config.is_css_property(key) {
            continue;
        }

        match value {
            Value::String(raw) if config.is_translatable_setting_key(key) => {
                push_setting(
                    raw,
                    FragmentOrigin::Setting { key: key.clone() },
                    settings_locator.join(Segment::Key(key.clone())),
                    fragments,
                );
            }
            Value::Array(rows) => {
                extract_repeater(key, rows, &settings_locator, config, fragments);
            }
            _ => {}
        }
    }

    for (index, child) in element.elements.iter().enumerate() {
        walk_element(
            child,
            &locator
                .join(Segment::Key("elements".to_string()))
                .join(Segment::Index(index)),
            config,
            fragments,
        );
    }
}

fn extract_repeater(
    key: &str,
    rows: &[Value],
    settings_locator: &Locator,
    config: &ExtractorConfig,
    fragments: &mut Vec<Fragment>,
) {
    for (index, row) in rows.iter().enumerate() {
        let map = match row {
            Value::Object(map) => map,
            _ => continue,
        };

        for (subkey, value) in map {
            if config.is_css_property(subkey) || !config.is_translatable_setting_key(subkey) {
                continue;
            }
            let raw = match value {
                Value::String(raw) => raw,
                _ => continue,
            };

            push_setting(
                raw,
                FragmentOrigin::Repeater {
                    key: key.to_string(),
                    index,
                    subkey: subkey.clone(),
                },
                settings_locator.join(Segment::Repeater {
                    key: key.to_string(),
                    index,
                    subkey: subkey.clone(),
                }),
                fragments,
            );
        }
    }
}

fn push_setting(
    raw: &str,
    origin: FragmentOrigin,
    locator: Locator,
    fragments: &mut Vec<Fragment>,
) {
    let text = strip_tags(raw).trim().to_string();
    if text.is_empty() {
        return;
    }
    fragments.push(Fragment::content(text, Some(raw.to_string()), origin).with_locator(locator));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn widget(settings: Value) -> Element {
        Element {
            el_type: "widget".to_string(),
            widget_type: Some("heading".to_string()),
            settings: match settings {
                Value::Object(map) => map,
                _ => Map::new(),
            },
            elements: Vec::new(),
            extra: Map::new(),
        }
    }

    #[test]
    fn translatable_keys_extracted_css_keys_skipped() {
        let element = widget(json!({
            "title": "Welcome",
            "title_color": "#fff",
            "font_size": "18px",
            "link": "https://example.org",
        }));

        let fragments = extract(&[element], &ExtractorConfig::default());
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].text, "Welcome");
        assert_eq!(
            fragments[0].locator.as_ref().unwrap().to_string(),
            "0.settings.title"
        );
    }

    #[test]
    fn repeater_rows_expand_with_row_locators() {
        let element = widget(json!({
            "slides": [
                { "slide_title": "One", "slide_color": "#000" },
                { "slide_title": "Two" },
            ],
        }));

        let fragments = extract(&[element], &ExtractorConfig::default());
        let locators: Vec<String> = fragments
            .iter()
            .map(|f| f.locator.as_ref().unwrap().to_string())
            .collect();
        assert_eq!(
            locators,
            ["0.settings.slides[0].slide_title", "0.settings.slides[1].slide_title"]
        );
    }

    #[test]
    fn nested_elements_are_walked() {
        let mut section = Element {
            el_type: "section".to_string(),
            widget_type: None,
            settings: Map::new(),
            elements: Vec::new(),
            extra: Map::new(),
        };
        section
            .elements
            .push(widget(json!({ "editor": "<p>Body text</p>" })));

        let fragments = extract(&[section], &ExtractorConfig::default());
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].text, "Body text");
        assert_eq!(fragments[0].html.as_deref(), Some("<p>Body text</p>"));
        assert_eq!(
            fragments[0].locator.as_ref().unwrap().to_string(),
            "0.elements.0.settings.editor"
        );
    }
}
