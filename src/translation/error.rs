//! 翻译模块统一错误处理
//!
//! 提取和匹配阶段的失败都在本地降级为无操作（定位器失效、匹配
//! 落空只是跳过目标）；只有结构性的重组失败和语言校验会作为
//! 显式错误向调用方传播。

use thiserror::Error;

/// 翻译错误类型
#[derive(Error, Debug, Clone)]
pub enum TranslationError {
    /// 翻译负载损坏（空标记、顶层类型错误等），整个文档的重组被放弃
    #[error("负载格式错误: {0}")]
    MalformedPayload(String),

    /// 目标语言不在外部翻译面支持的集合内，在发起翻译前拒绝
    #[error("外部翻译面不支持目标语言 \"{0}\"")]
    UnsupportedLanguage(String),

    /// 序列化错误
    #[error("序列化错误: {0}")]
    SerializationError(String),

    /// 内部错误
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl From<serde_json::Error> for TranslationError {
    fn from(err: serde_json::Error) -> Self {
        TranslationError::SerializationError(err.to_string())
    }
}

/// 翻译结果类型别名
pub type TranslationResult<T> = Result<T, TranslationError>;
