//! 类型描述（Type Descriptor）
//!
//! 把类型名字符串解析为结构化描述，并提供规范渲染：`T?`、`[T]`、`[K: V]`。
//! 文法按顺序匹配（顺序有意义）：
//!
//! 1. `[` 开头且 `]` 结尾：去掉外层括号；若存在深度为 0 的 `:`，在第一个处切分为字典，否则为数组；
//! 2. `?` 结尾：可选类型；
//! 3. 内置基础类型名；
//! 4. 合法标识符 `[A-Za-z_][A-Za-z0-9_]*`：自定义类型；
//! 5. 其余：`SyntaxError::InvalidTypeFormat`。
//!
//! 因为括号检查在 `?` 之前，`[Int]?` 解析为 `Optional(Array(Int))`。
//! 嵌套超过 `MAX_NESTING_DEPTH` 层的文本整体视为非法格式。
//!
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::MAX_NESTING_DEPTH;
use crate::error::{SyntaxError, SyntaxResult};

/// 内置基础类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveType {
    String,
    Int,
    Double,
    Bool,
    Float,
    Uuid,
    Date,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 7] = [
        Self::String,
        Self::Int,
        Self::Double,
        Self::Bool,
        Self::Float,
        Self::Uuid,
        Self::Date,
    ];

    /// 宿主语言中的类型名
    pub fn type_name(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Int => "Int",
            Self::Double => "Double",
            Self::Bool => "Bool",
            Self::Float => "Float",
            Self::Uuid => "UUID",
            Self::Date => "Date",
        }
    }

    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.type_name() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum TypeDescriptor {
    Primitive(PrimitiveType),
    Custom(String),
    Optional(Box<TypeDescriptor>),
    Array(Box<TypeDescriptor>),
    Dictionary(Box<TypeDescriptor>, Box<TypeDescriptor>),
}

impl TypeDescriptor {
    pub fn optional(inner: TypeDescriptor) -> Self {
        Self::Optional(Box::new(inner))
    }

    pub fn array(element: TypeDescriptor) -> Self {
        Self::Array(Box::new(element))
    }

    pub fn dictionary(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self::Dictionary(Box::new(key), Box::new(value))
    }

    /// 解析类型文本
    ///
    /// ```
    /// use macros_syntax::type_descriptor::{PrimitiveType, TypeDescriptor};
    ///
    /// let parsed = TypeDescriptor::parse("[String: [Int: Bool]]").unwrap();
    /// assert_eq!(
    ///     parsed,
    ///     TypeDescriptor::dictionary(
    ///         TypeDescriptor::Primitive(PrimitiveType::String),
    ///         TypeDescriptor::dictionary(
    ///             TypeDescriptor::Primitive(PrimitiveType::Int),
    ///             TypeDescriptor::Primitive(PrimitiveType::Bool),
    ///         ),
    ///     )
    /// );
    /// assert_eq!(parsed.to_string(), "[String: [Int: Bool]]");
    /// ```
    pub fn parse(text: &str) -> SyntaxResult<Self> {
        Self::parse_nested(text, text, 0)
    }

    fn parse_nested(text: &str, whole: &str, depth: usize) -> SyntaxResult<Self> {
        if depth > MAX_NESTING_DEPTH {
            return Err(SyntaxError::InvalidTypeFormat(whole.trim().to_string()));
        }
        let text = text.trim();
        let nested = |inner: &str| Self::parse_nested(inner, whole, depth + 1);

        if let Some(inner) = text.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
            return match split_top_level_colon(inner) {
                Some((key, value)) => Ok(Self::dictionary(nested(key)?, nested(value)?)),
                None => Ok(Self::array(nested(inner)?)),
            };
        }

        if let Some(inner) = text.strip_suffix('?') {
            return Ok(Self::optional(nested(inner)?));
        }

        if let Some(primitive) = PrimitiveType::from_type_name(text) {
            return Ok(Self::Primitive(primitive));
        }

        if is_identifier(text) {
            return Ok(Self::Custom(text.to_string()));
        }

        Err(SyntaxError::InvalidTypeFormat(text.to_string()))
    }
}

/// 在括号深度为 0 的第一个 `:` 处切分
fn split_top_level_colon(text: &str) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => return Some((&text[..i], &text[i + 1..])),
            _ => {}
        }
    }
    None
}

/// ASCII 标识符：字母或下划线开头，其后为字母、数字或下划线
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl FromStr for TypeDescriptor {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => write!(f, "{p}"),
            Self::Custom(name) => f.write_str(name),
            Self::Optional(inner) => write!(f, "{inner}?"),
            Self::Array(element) => write!(f, "[{element}]"),
            Self::Dictionary(key, value) => write!(f, "[{key}: {value}]"),
        }
    }
}
