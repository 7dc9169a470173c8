//! 翻译模块
//!
//! 提取/匹配/重组引擎和围绕它的会话层：
//! - **extract**: 按文档形态提取可翻译片段
//! - **merge**: 四级匹配策略级联，把译文合并进容器标记
//! - **locator**: 类型化路径定位器和通用树写入
//! - **reassemble**: 在文档深拷贝上批量回写译文
//! - **language**: 外部翻译面的语言代码映射和校验
//! - **encoding**: 转义序列解码和字段负载编码
//! - **surface**: 外部翻译面契约、冷却窗口和标记清理
//! - **session**: 单文档翻译会话和宿主接口
//! - **config**: 提取/翻译面配置
//! - **error**: 错误处理

pub mod config;
pub mod encoding;
pub mod error;
pub mod extract;
pub mod fragment;
pub mod language;
pub mod locator;
pub mod merge;
pub mod reassemble;
pub mod session;
pub mod surface;

pub use config::{ExtractorConfig, SurfaceConfig};
pub use encoding::{decode_field_payload, decode_unicode_escapes, FieldFormat, FieldPayload};
pub use error::{TranslationError, TranslationResult};
pub use fragment::{Fragment, FragmentKind, FragmentOrigin, TranslatedFragment};
pub use language::{
    ensure_surface_supported, is_surface_supported, map_to_surface, pending_languages, Language,
};
pub use locator::{Locator, Segment};
pub use merge::{merge_structural_exact, merge_translation};
pub use session::{
    DocumentSource, LocalizedDocument, SourceContent, SourceString, TranslationMemory,
    TranslationSession,
};
pub use surface::{sanitize_surface_markup, translation_ready, CooldownGate};
