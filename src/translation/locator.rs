//! 路径定位器
//!
//! 定位器在提取时构造一次，之后以结构化形式随片段携带，
//! 回写阶段不经过任何字符串解析。写入是尽力而为的：文档可能在
//! 提取和回写之间被外部修改，任何中间段解析失败都只是静默跳过，
//! 返回未变动的树，而不是报错。

use std::fmt;

use serde_json::Value;

/// 路径段
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// 序列下标
    Index(usize),
    /// 字面键名（settings、elements、attrs、innerBlocks 等）
    Key(String),
    /// 转发器字段：`key[index].subkey`
    Repeater {
        /// 设置键
        key: String,
        /// 行下标
        index: usize,
        /// 行内字段键
        subkey: String,
    },
}

/// 结构化路径，标识片段值在文档中的位置
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Locator(pub Vec<Segment>);

impl Locator {
    /// 空路径
    pub fn root() -> Self {
        Locator(Vec::new())
    }

    /// 追加一个路径段，返回新路径
    pub fn join(&self, segment: Segment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        Locator(segments)
    }

    /// 路径段视图
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            match segment {
                Segment::Index(index) => write!(f, "{}", index)?,
                Segment::Key(key) => write!(f, "{}", key)?,
                Segment::Repeater { key, index, subkey } => {
                    write!(f, "{}[{}].{}", key, index, subkey)?
                }
            }
        }
        Ok(())
    }
}

/// 按路径读取 JSON 树中的值
pub fn get_value<'a>(root: &'a Value, segments: &[Segment]) -> Option<&'a Value> {
    let mut current = root;

    for segment in segments {
        current = match segment {
            Segment::Index(index) => current.as_array()?.get(*index)?,
            Segment::Key(key) => current.as_object()?.get(key)?,
            Segment::Repeater { key, index, subkey } => current
                .as_object()?
                .get(key)?
                .as_array()?
                .get(*index)?
                .as_object()?
                .get(subkey)?,
        };
    }

    Some(current)
}

/// 按路径覆写 JSON 树中的值，尽力而为
///
/// 任何中间段无法解析时返回 `false`，树保持原样。终端键在目标
/// 映射中不存在时允许插入（与读取不同，写入的最后一段是赋值）。
pub fn write_value(root: &mut Value, segments: &[Segment], new_value: Value) -> bool {
    let (last, init) = match segments.split_last() {
        Some(split) => split,
        None => return false,
    };

    let mut current = root;
    for segment in init {
        current = match navigate_mut(current, segment) {
            Some(next) => next,
            None => return false,
        };
    }

    match last {
        Segment::Index(index) => match current.as_array_mut() {
            Some(array) if *index < array.len() => {
                array[*index] = new_value;
                true
            }
            _ => false,
        },
        Segment::Key(key) => match current.as_object_mut() {
            Some(map) => {
                map.insert(key.clone(), new_value);
                true
            }
            None => false,
        },
        Segment::Repeater { key, index, subkey } => {
            let row = current
                .as_object_mut()
                .and_then(|map| map.get_mut(key))
                .and_then(|value| value.as_array_mut())
                .and_then(|rows| rows.get_mut(*index))
                .and_then(|row| row.as_object_mut());

            match row {
                Some(row) => {
                    row.insert(subkey.clone(), new_value);
                    true
                }
                None => false,
            }
        }
    }
}

fn navigate_mut<'a>(current: &'a mut Value, segment: &Segment) -> Option<&'a mut Value> {
    match segment {
        Segment::Index(index) => current.as_array_mut()?.get_mut(*index),
        Segment::Key(key) => current.as_object_mut()?.get_mut(key),
        Segment::Repeater { key, index, subkey } => current
            .as_object_mut()?
            .get_mut(key)?
            .as_array_mut()?
            .get_mut(*index)?
            .as_object_mut()?
            .get_mut(subkey),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn key(name: &str) -> Segment {
        Segment::Key(name.to_string())
    }

    #[test]
    fn displays_dotted_form() {
        let locator = Locator::root()
            .join(Segment::Index(0))
            .join(key("elements"))
            .join(Segment::Index(1))
            .join(key("settings"))
            .join(key("title"));
        assert_eq!(locator.to_string(), "0.elements.1.settings.title");
    }

    #[test]
    fn displays_repeater_bracket_form() {
        let locator = Locator::root()
            .join(Segment::Index(0))
            .join(key("settings"))
            .join(Segment::Repeater {
                key: "slides".to_string(),
                index: 2,
                subkey: "slide_title".to_string(),
            });
        assert_eq!(locator.to_string(), "0.settings.slides[2].slide_title");
    }

    #[test]
    fn writes_nested_value() {
        let mut tree = json!([{ "settings": { "title": "Old" }, "elements": [] }]);
        let locator = Locator(vec![Segment::Index(0), key("settings"), key("title")]);

        assert!(write_value(
            &mut tree,
            locator.segments(),
            Value::String("New".to_string())
        ));
        assert_eq!(tree[0]["settings"]["title"], "New");
    }

    #[test]
    fn writes_repeater_value() {
        let mut tree = json!([{ "settings": { "slides": [{ "slide_title": "One" }] } }]);
        let locator = Locator(vec![
            Segment::Index(0),
            key("settings"),
            Segment::Repeater {
                key: "slides".to_string(),
                index: 0,
                subkey: "slide_title".to_string(),
            },
        ]);

        assert!(write_value(
            &mut tree,
            locator.segments(),
            Value::String("Uno".to_string())
        ));
        assert_eq!(tree[0]["settings"]["slides"][0]["slide_title"], "Uno");
    }

    #[test]
    fn missing_segment_is_a_silent_skip() {
        let mut tree = json!([{ "settings": {} }]);
        let before = tree.clone();
        let locator = Locator(vec![Segment::Index(3), key("settings"), key("title")]);

        assert!(!write_value(
            &mut tree,
            locator.segments(),
            Value::String("x".to_string())
        ));
        assert_eq!(tree, before);
    }
}
