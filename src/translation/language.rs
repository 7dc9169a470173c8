//! 语言代码映射与校验
//!
//! 宿主侧语言代码和外部翻译面的代码不是一个体系：少数代码有
//! 固定的改写表，其余带连字符的变体折叠到基础代码。翻译面只
//! 支持一个固定集合，不在集合内的目标语言在发起翻译前就被拒绝。

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::translation::error::{TranslationError, TranslationResult};

/// 固定改写表：宿主代码 → 翻译面代码
const SURFACE_LANG_MAP: &[(&str, &str)] = &[
    ("kir", "ky"),
    ("oci", "oc"),
    ("bel", "be"),
    ("he", "iw"),
    ("snd", "sd"),
    ("jv", "jw"),
    ("nb", "no"),
    ("nn", "no"),
    ("pt-br", "pt"),
    ("zh-hans", "zh-CN"),
    ("zh-hant", "zh-TW"),
    ("zh", "zh-CN"),
];

/// 外部翻译面支持的语言代码集合
const SURFACE_SUPPORTED: &[&str] = &[
    "af", "sq", "am", "ar", "hy", "az", "eu", "be", "bn", "bs", "bg", "ca", "ceb", "ny", "zh-CN",
    "zh-TW", "co", "hr", "cs", "da", "nl", "en", "eo", "et", "tl", "fi", "fr", "fy", "gl", "ka",
    "de", "el", "gu", "ht", "ha", "haw", "iw", "hi", "hmn", "hu", "is", "ig", "id", "ga", "it",
    "ja", "jw", "kn", "kk", "km", "rw", "ko", "ku", "ky", "lo", "la", "lv", "lt", "lb", "mk",
    "mg", "ms", "ml", "mt", "mi", "mr", "mn", "my", "ne", "no", "ps", "fa", "pl", "pt", "pa",
    "ro", "ru", "sm", "gd", "sr", "st", "sn", "sd", "si", "sk", "sl", "so", "es", "su", "sw",
    "sv", "tg", "ta", "tt", "te", "th", "tr", "uk", "ur", "uz", "vi", "cy", "xh", "yi", "yo",
    "zu",
];

/// 宿主侧配置的语言
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// 宿主侧语言代码
    pub code: String,
    /// 展示名称
    pub name: String,
}

impl Language {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// 把宿主语言代码映射为翻译面代码
///
/// 先查固定改写表；未命中的带连字符变体折叠到基础代码，
/// `zh` 基础代码重新展开为 `zh-CN`。
pub fn map_to_surface(code: &str) -> String {
    let lowered = code.to_lowercase();

    if let Some((_, mapped)) = SURFACE_LANG_MAP.iter().find(|(from, _)| *from == lowered) {
        return (*mapped).to_string();
    }

    if let Some((base, _)) = lowered.split_once('-') {
        if base == "zh" {
            return "zh-CN".to_string();
        }
        return base.to_string();
    }

    lowered
}

/// 目标语言是否在翻译面支持的集合内
pub fn is_surface_supported(code: &str) -> bool {
    if code.trim().is_empty() {
        return false;
    }
    SURFACE_SUPPORTED.contains(&map_to_surface(code).as_str())
}

/// 校验并映射目标语言，不支持时报错（错误信息带原始代码）
pub fn ensure_surface_supported(code: &str) -> TranslationResult<String> {
    if !is_surface_supported(code) {
        return Err(TranslationError::UnsupportedLanguage(code.to_string()));
    }
    Ok(map_to_surface(code))
}

/// 计算待翻译语言集合
///
/// 给定配置的语言、源语言，以及每个标识符已完成的语言集合：
/// 源语言之外、尚未对**所有**标识符完成的语言都是待翻译语言。
pub fn pending_languages(
    configured: &[Language],
    source: &str,
    completed: &[HashSet<String>],
) -> Vec<Language> {
    configured
        .iter()
        .filter(|language| {
            if language.code == source {
                return false;
            }
            let complete_everywhere = !completed.is_empty()
                && completed.iter().all(|set| set.contains(&language.code));
            !complete_everywhere
        })
        .cloned()
        .collect()
}
