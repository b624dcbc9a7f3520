//! 统一错误类型
//!
//! 所有链适配器与核心契约共用的错误分类

use thiserror::Error;

/// 核心错误类型
///
/// 零值（空地址、零金额、空哈希）本身也是合法结果，调用方必须先检查错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XcError {
    /// 该链族或操作尚无具体实现
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// 交易（或其子对象）在构建完成前被访问
    #[error("transaction not initialized: {0}")]
    NotInitialized(String),

    /// 公钥字节、金额或配置格式错误
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// 链原生编码器/协作方返回失败
    #[error("encoding failed: {0}")]
    Encoding(String),
}

impl XcError {
    pub fn not_implemented(msg: impl Into<String>) -> Self {
        Self::NotImplemented(msg.into())
    }

    pub fn not_initialized(msg: impl Into<String>) -> Self {
        Self::NotInitialized(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// 稳定的错误代码（用于日志和上层映射）
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotImplemented(_) => "not_implemented",
            Self::NotInitialized(_) => "not_initialized",
            Self::InvalidInput(_) => "invalid_input",
            Self::Encoding(_) => "encoding_failed",
        }
    }

    pub fn is_not_initialized(&self) -> bool {
        matches!(self, Self::NotInitialized(_))
    }
}

// 从 serde_json 错误转换
impl From<serde_json::Error> for XcError {
    fn from(err: serde_json::Error) -> Self {
        Self::encoding(format!("JSON serialization error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, XcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(XcError::not_implemented("x").code(), "not_implemented");
        assert_eq!(XcError::not_initialized("x").code(), "not_initialized");
        assert_eq!(XcError::invalid_input("x").code(), "invalid_input");
        assert_eq!(XcError::encoding("x").code(), "encoding_failed");
    }

    #[test]
    fn test_error_display() {
        let err = XcError::not_initialized("sighash");
        assert_eq!(err.to_string(), "transaction not initialized: sighash");
        assert!(err.is_not_initialized());
    }
}
