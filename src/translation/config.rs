//! 翻译配置
//!
//! 提取规则（属性允许表、设置键启发式、样式类键拒绝表）和
//! 外部翻译面的轮询参数。

use std::time::Duration;

/// 翻译配置常量
pub mod constants {
    /// 块属性中按固定允许表提取的键（按表内顺序检查）
    pub const TRANSLATABLE_BLOCK_ATTRS: &[&str] = &[
        "content",
        "text",
        "caption",
        "alt",
        "title",
        "summary",
        "citation",
        "value",
        "placeholder",
        "label",
    ];

    /// 设置键的精确匹配允许表
    pub const STATIC_SETTING_KEYS: &[&str] = &[
        "caption",
        "heading",
        "sub_heading",
        "testimonial_content",
        "testimonial_job",
        "testimonial_name",
        "name",
    ];

    /// 设置键的大小写无关子串允许表
    pub const DYNAMIC_SETTING_SUBSTRINGS: &[&str] =
        &["title", "description", "editor", "text", "content", "label"];

    /// 展示类/CSS 类设置键的子串拒绝表，命中即跳过
    pub const CSS_PROPERTY_DENYLIST: &[&str] = &[
        "content_width",
        "title_size",
        "font_size",
        "margin",
        "padding",
        "background",
        "border",
        "color",
        "text_align",
        "font_weight",
        "font_family",
        "line_height",
        "letter_spacing",
        "text_transform",
        "border_radius",
        "box_shadow",
        "opacity",
        "width",
        "height",
        "display",
        "position",
        "z_index",
        "visibility",
        "align",
        "max_width",
        "content_typography_typography",
        "flex_justify_content",
        "title_color",
        "description_color",
        "email_content",
    ];

    /// 翻译面观察的冷却窗口（毫秒）
    pub const SURFACE_COOLDOWN_MS: u64 = 2000;

    /// 翻译面轮询间隔（毫秒）
    pub const SURFACE_CHECK_INTERVAL_MS: u64 = 1000;

    /// 翻译面轮询次数上限
    pub const SURFACE_MAX_CHECKS: usize = 60;
}

/// 片段提取器配置
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// 块属性允许表
    pub translatable_attrs: Vec<String>,
    /// 设置键的精确匹配允许表
    pub static_setting_keys: Vec<String>,
    /// 设置键的子串允许表
    pub dynamic_setting_substrings: Vec<String>,
    /// 样式类设置键拒绝表
    pub css_property_denylist: Vec<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            translatable_attrs: constants::TRANSLATABLE_BLOCK_ATTRS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            static_setting_keys: constants::STATIC_SETTING_KEYS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            dynamic_setting_substrings: constants::DYNAMIC_SETTING_SUBSTRINGS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            css_property_denylist: constants::CSS_PROPERTY_DENYLIST
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ExtractorConfig {
    /// 判断设置键是否为样式类属性
    ///
    /// 拒绝表按大小写无关子串命中。
    pub fn is_css_property(&self, key: &str) -> bool {
        let lowered = key.to_lowercase();
        self.css_property_denylist
            .iter()
            .any(|prop| lowered.contains(&prop.to_lowercase()))
    }

    /// 判断设置键是否可翻译
    ///
    /// 精确命中静态允许表，或大小写无关地包含动态允许表中的子串。
    pub fn is_translatable_setting_key(&self, key: &str) -> bool {
        if self.static_setting_keys.iter().any(|s| s == key) {
            return true;
        }

        let lowered = key.to_lowercase();
        self.dynamic_setting_substrings
            .iter()
            .any(|substring| lowered.contains(substring.as_str()))
    }
}

/// 外部翻译面配置
#[derive(Debug, Clone)]
pub struct SurfaceConfig {
    /// 观察去抖的冷却窗口
    pub cooldown: Duration,
    /// 轮询间隔
    pub check_interval: Duration,
    /// 轮询次数上限
    pub max_checks: usize,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            cooldown: Duration::from_millis(constants::SURFACE_COOLDOWN_MS),
            check_interval: Duration::from_millis(constants::SURFACE_CHECK_INTERVAL_MS),
            max_checks: constants::SURFACE_MAX_CHECKS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_denylist_matches_substrings() {
        let config = ExtractorConfig::default();
        assert!(config.is_css_property("font_size"));
        assert!(config.is_css_property("mobile_font_size_tablet"));
        assert!(config.is_css_property("title_color"));
        assert!(!config.is_css_property("testimonial_name"));
    }

    #[test]
    fn setting_key_heuristic() {
        let config = ExtractorConfig::default();
        // 静态精确匹配
        assert!(config.is_translatable_setting_key("caption"));
        assert!(config.is_translatable_setting_key("sub_heading"));
        // 动态子串匹配
        assert!(config.is_translatable_setting_key("title"));
        assert!(config.is_translatable_setting_key("button_text"));
        assert!(config.is_translatable_setting_key("Description_Extra"));
        // 不命中
        assert!(!config.is_translatable_setting_key("link"));
        assert!(!config.is_translatable_setting_key("headings"));
    }
}
