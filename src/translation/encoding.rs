//! 转义解码与字段负载编码
//!
//! 外部翻译面回传的文本可能带 `uXXXX` 或 `\uXXXX` 形式的转义
//! 序列（含代理对），持久化前解码。按字段交付的译文用 base64
//! 包装携带标记的值；解码失败一律退回原始数据，不中断保存
//! （编码失败是策略而非错误）。

use std::sync::OnceLock;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::parsers::html::text::contains_markup;

fn escape_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\\?u([0-9a-fA-F]{4})").expect("转义扫描正则无效"))
}

/// 解码文本中的 Unicode 转义序列
///
/// 同时接受带反斜杠和不带反斜杠的形式；高低代理对合并为一个
/// 码点，落单的代理替换为 U+FFFD，无效码点保留原样。没有转义
/// 序列的文本原样返回。
pub fn decode_unicode_escapes(text: &str) -> String {
    let pattern = escape_pattern();
    if !pattern.is_match(text) {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut matches = pattern.captures_iter(text).peekable();

    while let Some(caps) = matches.next() {
        let matched = match caps.get(0) {
            Some(matched) if matched.start() >= last => matched,
            _ => continue,
        };
        out.push_str(&text[last..matched.start()]);
        last = matched.end();

        let unit = u32::from_str_radix(&caps[1], 16).unwrap_or(0xFFFD);

        // 高代理：尝试与紧随其后的低代理合并
        if (0xD800..0xDC00).contains(&unit) {
            let low = matches.peek().and_then(|next| {
                let next_match = next.get(0)?;
                if next_match.start() != matched.end() {
                    return None;
                }
                let low = u32::from_str_radix(&next[1], 16).ok()?;
                (0xDC00..0xE000).contains(&low).then_some((low, next_match.end()))
            });

            match low {
                Some((low, end)) => {
                    let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                    out.push(char::from_u32(combined).unwrap_or('\u{FFFD}'));
                    last = end;
                    matches.next();
                }
                None => out.push('\u{FFFD}'),
            }
            continue;
        }

        match char::from_u32(unit) {
            Some(decoded) => out.push(decoded),
            None => out.push_str(matched.as_str()),
        }
    }

    out.push_str(&text[last..]);
    out
}

/// 字段负载的数据格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldFormat {
    #[serde(rename = "raw")]
    Raw,
    #[serde(rename = "base64")]
    Base64,
}

/// 按字段交付给翻译记忆的译文负载
///
/// 字段名与宿主的存储格式对齐。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPayload {
    /// 宿主侧字段名
    #[serde(rename = "field_type")]
    pub name: String,
    /// 负载数据（格式为 base64 时已编码）
    #[serde(rename = "field_data")]
    pub data: String,
    /// 数据格式
    #[serde(rename = "field_format")]
    pub format: FieldFormat,
}

impl FieldPayload {
    /// 创建原样携带的负载
    pub fn raw(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: text.into(),
            format: FieldFormat::Raw,
        }
    }

    /// 创建负载，携带标记的值用 base64 包装
    pub fn encoded(name: impl Into<String>, text: &str) -> Self {
        if contains_markup(text) {
            Self {
                name: name.into(),
                data: BASE64.encode(text),
                format: FieldFormat::Base64,
            }
        } else {
            Self::raw(name, text)
        }
    }
}

/// 解码字段负载为明文
///
/// base64 负载用严格模式解码，失败时退回原始数据；之后统一做
/// 转义序列解码。
pub fn decode_field_payload(payload: &FieldPayload) -> String {
    let data = match payload.format {
        FieldFormat::Raw => payload.data.clone(),
        FieldFormat::Base64 => match BASE64.decode(&payload.data) {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(_) => {
                    debug!(field = %payload.name, "base64 负载不是合法 UTF-8，退回原始数据");
                    payload.data.clone()
                }
            },
            Err(_) => {
                debug!(field = %payload.name, "base64 解码失败，退回原始数据");
                payload.data.clone()
            }
        },
    };

    decode_unicode_escapes(&data)
}
