//! 翻译会话
//!
//! 一次会话对应一个文档和一个目标语言：校验语言、提取片段、
//! 接收外部翻译面的替换文本、重组并产出可持久化的本地化文档。
//! 丢弃会话就是取消，任何部分重组结果都不会外泄。

use tracing::{debug, info};

use crate::core::Document;
use crate::translation::config::ExtractorConfig;
use crate::translation::encoding::{decode_unicode_escapes, FieldPayload};
use crate::translation::error::{TranslationError, TranslationResult};
use crate::translation::fragment::{Fragment, FragmentKind, TranslatedFragment};
use crate::translation::language::ensure_surface_supported;
use crate::translation::surface::{sanitize_surface_markup, translation_ready};

/// 宿主预提取的命名字符串（翻译记忆通道）
#[derive(Debug, Clone, PartialEq)]
pub struct SourceString {
    /// 宿主侧字段名
    pub field_name: String,
    /// 源文本
    pub text: String,
}

/// 宿主提供的源内容
#[derive(Debug, Clone, PartialEq)]
pub struct SourceContent {
    /// 标题，可选
    pub title: Option<String>,
    /// 正文文档
    pub document: Document,
    /// 宿主预提取的命名字符串
    pub strings: Vec<SourceString>,
}

impl SourceContent {
    pub fn new(document: Document) -> Self {
        Self {
            title: None,
            document,
            strings: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_string(mut self, field_name: impl Into<String>, text: impl Into<String>) -> Self {
        self.strings.push(SourceString {
            field_name: field_name.into(),
            text: text.into(),
        });
        self
    }
}

/// 重组产出的本地化文档
#[derive(Debug, Clone, PartialEq)]
pub struct LocalizedDocument {
    /// 目标语言（宿主侧代码）
    pub language: String,
    /// 译后标题
    pub title: Option<String>,
    /// 重组后的文档
    pub document: Document,
    /// 按字段交付的译文负载
    pub fields: Vec<FieldPayload>,
}

/// 宿主侧文档源
pub trait DocumentSource {
    /// 按标识符取出源内容
    fn load(&self, id: &str) -> TranslationResult<SourceContent>;

    /// 按（标识符，目标语言）持久化本地化文档
    fn persist(&mut self, id: &str, localized: &LocalizedDocument) -> TranslationResult<()>;
}

/// 宿主侧翻译记忆
pub trait TranslationMemory {
    /// 存入一份本地化副本的字段负载
    fn store(&mut self, id: &str, language: &str, fields: &[FieldPayload]) -> TranslationResult<()>;
}

/// 单文档翻译会话
#[derive(Debug)]
pub struct TranslationSession {
    language: String,
    surface_language: String,
    content: SourceContent,
    fragments: Vec<Fragment>,
    replacements: Vec<Option<String>>,
    config: ExtractorConfig,
}

impl TranslationSession {
    /// 开启会话
    ///
    /// 目标语言先过翻译面支持校验，不支持立即拒绝。片段顺序：
    /// 标题（宿主提供时）、正文片段、宿主预提取字符串。
    pub fn begin(content: SourceContent, target_language: &str) -> TranslationResult<Self> {
        Self::begin_with(content, target_language, ExtractorConfig::default())
    }

    /// 使用给定配置开启会话
    pub fn begin_with(
        content: SourceContent,
        target_language: &str,
        config: ExtractorConfig,
    ) -> TranslationResult<Self> {
        let surface_language = ensure_surface_supported(target_language)?;

        let mut fragments = Vec::new();
        if let Some(title) = &content.title {
            if !title.trim().is_empty() {
                fragments.push(Fragment::title(title.trim().to_string()));
            }
        }
        fragments.extend(content.document.extract_with(&config));
        for string in &content.strings {
            let text = string.text.trim();
            if !text.is_empty() {
                fragments.push(Fragment::provided(text.to_string(), &string.field_name));
            }
        }

        info!(
            language = target_language,
            surface = %surface_language,
            shape = content.document.shape(),
            fragments = fragments.len(),
            "翻译会话开启"
        );

        let replacements = vec![None; fragments.len()];
        Ok(Self {
            language: target_language.to_string(),
            surface_language,
            content,
            fragments,
            replacements,
            config,
        })
    }

    /// 翻译面使用的语言代码
    pub fn surface_language(&self) -> &str {
        &self.surface_language
    }

    /// 会话的片段列表，按固定顺序
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// 记录一条翻译面回传的替换文本
    ///
    /// 文本先过就绪判定（非空且与源不同），再做标记清理和转义
    /// 解码。未就绪的文本被拒收，返回 `false`。
    pub fn record_replacement(&mut self, index: usize, translated: &str) -> bool {
        let fragment = match self.fragments.get(index) {
            Some(fragment) => fragment,
            None => {
                debug!(index, "替换下标越界，拒收");
                return false;
            }
        };

        if !translation_ready(fragment.display_markup(), translated) {
            debug!(index, "内容未就绪，拒收");
            return false;
        }

        let cleaned = decode_unicode_escapes(sanitize_surface_markup(translated).trim());
        if cleaned.trim().is_empty() {
            debug!(index, "清理后内容为空，拒收");
            return false;
        }

        self.replacements[index] = Some(cleaned);
        true
    }

    /// 已记录的替换条数
    pub fn replaced_count(&self) -> usize {
        self.replacements.iter().filter(|r| r.is_some()).count()
    }

    /// 结束会话，重组并产出本地化文档
    ///
    /// 没有任何片段发生变化时拒绝保存。
    pub fn finish(self) -> TranslationResult<LocalizedDocument> {
        let results: Vec<TranslatedFragment> = self
            .fragments
            .iter()
            .zip(&self.replacements)
            .map(|(fragment, replacement)| {
                let text = replacement
                    .clone()
                    .unwrap_or_else(|| fragment.text.clone());
                TranslatedFragment::new(fragment.clone(), text)
            })
            .collect();

        if !results.iter().any(|result| result.is_changed()) {
            return Err(TranslationError::MalformedPayload(
                "没有任何片段被翻译，拒绝保存".to_string(),
            ));
        }

        let document = self
            .content
            .document
            .reassemble_with(&results, &self.config)?;

        if let (Document::FlatMarkup(reassembled), Document::FlatMarkup(source)) =
            (&document, &self.content.document)
        {
            if reassembled.trim().is_empty() && !source.trim().is_empty() {
                return Err(TranslationError::MalformedPayload(
                    "重组后的文档为空".to_string(),
                ));
            }
        }

        let title = results
            .iter()
            .find(|result| result.fragment.kind == FragmentKind::Title
                && result.fragment.field_name.as_deref() == Some("title"))
            .filter(|result| result.is_changed())
            .map(|result| result.text.clone())
            .or_else(|| self.content.title.clone());

        let fields: Vec<FieldPayload> = results
            .iter()
            .filter(|result| result.is_changed())
            .filter_map(|result| {
                let name = result.fragment.field_name.as_deref()?;
                Some(FieldPayload::encoded(name, result.text.trim()))
            })
            .collect();

        info!(
            language = %self.language,
            replaced = self.replacements.iter().filter(|r| r.is_some()).count(),
            fields = fields.len(),
            "翻译会话完成"
        );

        Ok(LocalizedDocument {
            language: self.language,
            title,
            document,
            fields,
        })
    }
}
