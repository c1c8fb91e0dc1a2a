//! 语法层统一错误定义
//!
//! 仅覆盖类型描述文法与夹具源码读取两类失败，
//! 展开层会将其转换为 `ExpansionError`。
//!
use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("invalid type format: `{0}`")]
    InvalidTypeFormat(String),

    #[error("parse error: {reason}")]
    Parse { reason: String },
}

impl SyntaxError {
    pub(crate) fn parse(reason: impl Into<String>) -> Self {
        Self::Parse {
            reason: reason.into(),
        }
    }
}

/// 统一 Result 类型别名
pub type SyntaxResult<T> = Result<T, SyntaxError>;
