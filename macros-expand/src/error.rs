//! 展开层统一错误定义
//!
//! 每个展开调用都把失败同步返回给唯一的调用方（宿主），不做本地恢复或重试；
//! 一次调用的失败不会影响其它调用。`kind()` 给出稳定的错误种类，消息携带关键上下文
//! （宏名、出错的表达式文本、类型文本等）。
//!
use macros_syntax::SyntaxError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::expander::MacroRole;

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpansionError {
    // --- 实参校验 ---
    #[error("{}", arity_message(.macro_name, .expected, .found))]
    Arity {
        macro_name: String,
        expected: usize,
        found: usize,
    },
    #[error("the argument provided to `#{macro_name}` must be {expected}. Found: {argument}")]
    Type {
        macro_name: String,
        expected: &'static str,
        argument: String,
    },
    #[error("invalid arguments for `#{macro_name}`: {reason}")]
    Argument { macro_name: String, reason: String },

    // --- 领域规则 ---
    #[error("struct name `{name}` must start with an uppercase letter")]
    Naming { name: String },
    #[error("invalid type format for field `{field}`: `{text}`")]
    InvalidTypeFormat { field: String, text: String },
    #[error(
        "`#{macro_name}` produced no fields for struct `{struct_name}`; each entry must map a string literal name to a string literal type"
    )]
    EmptyFields {
        macro_name: String,
        struct_name: String,
    },
    #[error("`@{macro_name}` can only be applied to classes, found {found}")]
    UnsupportedTarget {
        macro_name: String,
        found: &'static str,
    },

    // --- 注册表 ---
    #[error("no macro named `{name}` is registered")]
    UnknownMacro { name: String },
    #[error("macro `{name}` has role `{found}`, expected `{expected}`")]
    RoleMismatch {
        name: String,
        expected: MacroRole,
        found: MacroRole,
    },
    #[error("macro already registered: {name}")]
    DuplicateMacro { name: String },

    // --- 源码 ---
    #[error("syntax: {0}")]
    Syntax(#[from] SyntaxError),
}

fn arity_message(macro_name: &str, expected: &usize, found: &usize) -> String {
    let (expected, found) = (*expected, *found);
    let noun = if expected == 1 { "argument" } else { "arguments" };
    if found == 0 {
        format!("the `#{macro_name}` macro requires exactly {expected} {noun}, but none was provided")
    } else if found > expected {
        format!("the `#{macro_name}` macro supports only {expected} {noun}, found {found}")
    } else {
        format!("the `#{macro_name}` macro requires exactly {expected} {noun}, found {found}")
    }
}

/// 稳定的错误种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ArityError,
    TypeError,
    ArgumentError,
    NamingError,
    InvalidTypeFormat,
    EmptyFieldsError,
    UnsupportedTargetError,
    UnknownMacro,
    RoleMismatch,
    DuplicateMacro,
    SyntaxError,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ArityError => "arity_error",
            Self::TypeError => "type_error",
            Self::ArgumentError => "argument_error",
            Self::NamingError => "naming_error",
            Self::InvalidTypeFormat => "invalid_type_format",
            Self::EmptyFieldsError => "empty_fields_error",
            Self::UnsupportedTargetError => "unsupported_target_error",
            Self::UnknownMacro => "unknown_macro",
            Self::RoleMismatch => "role_mismatch",
            Self::DuplicateMacro => "duplicate_macro",
            Self::SyntaxError => "syntax_error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ExpansionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Arity { .. } => ErrorKind::ArityError,
            Self::Type { .. } => ErrorKind::TypeError,
            Self::Argument { .. } => ErrorKind::ArgumentError,
            Self::Naming { .. } => ErrorKind::NamingError,
            Self::InvalidTypeFormat { .. } => ErrorKind::InvalidTypeFormat,
            Self::EmptyFields { .. } => ErrorKind::EmptyFieldsError,
            Self::UnsupportedTarget { .. } => ErrorKind::UnsupportedTargetError,
            Self::UnknownMacro { .. } => ErrorKind::UnknownMacro,
            Self::RoleMismatch { .. } => ErrorKind::RoleMismatch,
            Self::DuplicateMacro { .. } => ErrorKind::DuplicateMacro,
            Self::Syntax(SyntaxError::InvalidTypeFormat(_)) => ErrorKind::InvalidTypeFormat,
            Self::Syntax(_) => ErrorKind::SyntaxError,
        }
    }

    /// 出错的宏名（若与具体宏相关）
    pub fn macro_name(&self) -> Option<&str> {
        match self {
            Self::Arity { macro_name, .. }
            | Self::Type { macro_name, .. }
            | Self::Argument { macro_name, .. }
            | Self::EmptyFields { macro_name, .. }
            | Self::UnsupportedTarget { macro_name, .. } => Some(macro_name),
            Self::UnknownMacro { name }
            | Self::RoleMismatch { name, .. }
            | Self::DuplicateMacro { name } => Some(name),
            Self::Naming { .. } | Self::InvalidTypeFormat { .. } | Self::Syntax(_) => None,
        }
    }
}

/// 统一 Result 类型别名
pub type ExpansionResult<T> = Result<T, ExpansionError>;
