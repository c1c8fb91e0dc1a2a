//! 表达式语法树（Expression）
//!
//! 宿主语言表达式的封闭和类型：展开器只通过穷尽匹配读取，
//! 渲染（`Display`）输出宿主源码文本。
//!
use std::fmt;

use serde::{Deserialize, Serialize};

/// 表达式节点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExpressionNode {
    /// 整数字面量，保留源码文本（如 `10`、`-3`、`0x1F`、`1_000`）
    IntegerLiteral { text: String },
    /// 字符串字面量，由文本段与插值段组成
    StringLiteral { segments: Vec<StringSegment> },
    /// 字典字面量，保持源码中的插入顺序
    DictionaryLiteral { entries: Vec<DictionaryEntry> },
    /// 裸标识符引用
    Identifier { name: String },
    /// 调用表达式，如 `Double(10)`、`Foo()`
    FunctionCall {
        callee: Box<ExpressionNode>,
        arguments: Vec<Argument>,
    },
    /// 其它不关心形状的表达式（原样保留文本）
    Other { text: String },
}

/// 字符串字面量片段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StringSegment {
    /// 原始文本（转义序列不解码）
    Text(String),
    /// `\(expr)` 插值
    Interpolation(ExpressionNode),
}

/// 字典条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub key: ExpressionNode,
    pub value: ExpressionNode,
}

/// 调用实参（可带标签，如 `fields: [...]`）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    pub label: Option<String>,
    pub expression: ExpressionNode,
}

impl Argument {
    pub fn unlabeled(expression: ExpressionNode) -> Self {
        Self {
            label: None,
            expression,
        }
    }

    pub fn labeled(label: impl Into<String>, expression: ExpressionNode) -> Self {
        Self {
            label: Some(label.into()),
            expression,
        }
    }
}

impl From<ExpressionNode> for Argument {
    fn from(expression: ExpressionNode) -> Self {
        Self::unlabeled(expression)
    }
}

impl ExpressionNode {
    pub fn integer(text: impl Into<String>) -> Self {
        Self::IntegerLiteral { text: text.into() }
    }

    /// 只含一个文本段的字符串字面量
    pub fn string(text: impl Into<String>) -> Self {
        Self::StringLiteral {
            segments: vec![StringSegment::Text(text.into())],
        }
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier { name: name.into() }
    }

    pub fn dictionary<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (ExpressionNode, ExpressionNode)>,
    {
        Self::DictionaryLiteral {
            entries: entries
                .into_iter()
                .map(|(key, value)| DictionaryEntry { key, value })
                .collect(),
        }
    }

    /// 以标识符为被调用者构造调用表达式
    pub fn call<I>(callee: impl Into<String>, arguments: I) -> Self
    where
        I: IntoIterator<Item = Argument>,
    {
        Self::FunctionCall {
            callee: Box::new(Self::identifier(callee)),
            arguments: arguments.into_iter().collect(),
        }
    }

    pub fn other(text: impl Into<String>) -> Self {
        Self::Other { text: text.into() }
    }

    /// 节点形状名称，用于日志与诊断
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::IntegerLiteral { .. } => "integer literal",
            Self::StringLiteral { .. } => "string literal",
            Self::DictionaryLiteral { .. } => "dictionary literal",
            Self::Identifier { .. } => "identifier",
            Self::FunctionCall { .. } => "function call",
            Self::Other { .. } => "expression",
        }
    }
}

impl fmt::Display for ExpressionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IntegerLiteral { text } => f.write_str(text),
            Self::StringLiteral { segments } => {
                f.write_str("\"")?;
                for segment in segments {
                    match segment {
                        StringSegment::Text(text) => f.write_str(text)?,
                        StringSegment::Interpolation(expr) => write!(f, "\\({expr})")?,
                    }
                }
                f.write_str("\"")
            }
            Self::DictionaryLiteral { entries } if entries.is_empty() => f.write_str("[:]"),
            Self::DictionaryLiteral { entries } => {
                f.write_str("[")?;
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", entry.key, entry.value)?;
                }
                f.write_str("]")
            }
            Self::Identifier { name } => f.write_str(name),
            Self::FunctionCall { callee, arguments } => {
                write!(f, "{callee}(")?;
                write_arguments(f, arguments)?;
                f.write_str(")")
            }
            Self::Other { text } => f.write_str(text),
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{label}: {}", self.expression),
            None => write!(f, "{}", self.expression),
        }
    }
}

pub(crate) fn write_arguments(f: &mut fmt::Formatter<'_>, arguments: &[Argument]) -> fmt::Result {
    for (i, argument) in arguments.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{argument}")?;
    }
    Ok(())
}
