//! 声明语法树（Declaration）
//!
//! - 变量声明（`let`/`var`）
//! - 结构体声明（值语义）
//! - 类声明（引用语义）
//!
//! 三者构成封闭的 `DeclarationNode`，作为构建器输出或附加宏（attached macro）的目标。
//!
use std::fmt;

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::expr::ExpressionNode;

/// 声明修饰符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Public,
    Private,
    Fileprivate,
    Internal,
    Open,
    Static,
    Final,
}

impl Modifier {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Fileprivate => "fileprivate",
            Self::Internal => "internal",
            Self::Open => "open",
            Self::Static => "static",
            Self::Final => "final",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let modifier = match keyword {
            "public" => Self::Public,
            "private" => Self::Private,
            "fileprivate" => Self::Fileprivate,
            "internal" => Self::Internal,
            "open" => Self::Open,
            "static" => Self::Static,
            "final" => Self::Final,
            _ => return None,
        };
        Some(modifier)
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// 属性（`@Name`），也是附加宏的挂载点
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)
    }
}

/// 变量声明
///
/// ```
/// use macros_syntax::decl::{Modifier, VariableDecl};
/// use macros_syntax::expr::ExpressionNode;
///
/// let decl = VariableDecl::builder()
///     .name("count")
///     .type_annotation("Int")
///     .initializer(ExpressionNode::integer("0"))
///     .modifiers(vec![Modifier::Private])
///     .build();
/// assert_eq!(decl.to_string(), "private var count: Int = 0");
/// ```
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDecl {
    #[builder(into)]
    pub name: String,
    /// 类型标注原文（不做校验）
    #[builder(into)]
    pub type_annotation: Option<String>,
    pub initializer: Option<ExpressionNode>,
    /// `let`（true）或 `var`（false）
    #[builder(default)]
    pub is_constant: bool,
    #[builder(default)]
    pub modifiers: Vec<Modifier>,
    #[builder(default)]
    pub attributes: Vec<Attribute>,
}

/// 结构体声明（值语义）
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructDecl {
    #[builder(into)]
    pub name: String,
    #[builder(default)]
    pub modifiers: Vec<Modifier>,
    #[builder(default)]
    pub attributes: Vec<Attribute>,
    #[builder(default)]
    pub members: Vec<DeclarationNode>,
}

/// 类声明（引用语义）
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDecl {
    #[builder(into)]
    pub name: String,
    #[builder(default)]
    pub members: Vec<DeclarationNode>,
    #[builder(default)]
    pub attributes: Vec<Attribute>,
    #[builder(default)]
    pub modifiers: Vec<Modifier>,
}

/// 声明节点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclarationNode {
    Variable(VariableDecl),
    Struct(StructDecl),
    ClassLike(ClassDecl),
}

impl DeclarationNode {
    pub fn name(&self) -> &str {
        match self {
            Self::Variable(v) => &v.name,
            Self::Struct(s) => &s.name,
            Self::ClassLike(c) => &c.name,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Variable(_) => "variable",
            Self::Struct(_) => "struct",
            Self::ClassLike(_) => "class",
        }
    }

    pub fn attributes(&self) -> &[Attribute] {
        match self {
            Self::Variable(v) => &v.attributes,
            Self::Struct(s) => &s.attributes,
            Self::ClassLike(c) => &c.attributes,
        }
    }

    pub fn attributes_mut(&mut self) -> &mut Vec<Attribute> {
        match self {
            Self::Variable(v) => &mut v.attributes,
            Self::Struct(s) => &mut s.attributes,
            Self::ClassLike(c) => &mut c.attributes,
        }
    }

    /// 成员列表；变量声明没有成员
    pub fn members(&self) -> &[DeclarationNode] {
        match self {
            Self::Variable(_) => &[],
            Self::Struct(s) => &s.members,
            Self::ClassLike(c) => &c.members,
        }
    }
}

impl From<VariableDecl> for DeclarationNode {
    fn from(decl: VariableDecl) -> Self {
        Self::Variable(decl)
    }
}

impl From<StructDecl> for DeclarationNode {
    fn from(decl: StructDecl) -> Self {
        Self::Struct(decl)
    }
}

impl From<ClassDecl> for DeclarationNode {
    fn from(decl: ClassDecl) -> Self {
        Self::ClassLike(decl)
    }
}

// -------- rendering --------

const INDENT: &str = "    ";

fn write_prefix(
    f: &mut fmt::Formatter<'_>,
    attributes: &[Attribute],
    modifiers: &[Modifier],
) -> fmt::Result {
    for attr in attributes {
        write!(f, "{attr} ")?;
    }
    for modifier in modifiers {
        write!(f, "{modifier} ")?;
    }
    Ok(())
}

fn write_members(f: &mut fmt::Formatter<'_>, members: &[DeclarationNode], depth: usize) -> fmt::Result {
    f.write_str("{\n")?;
    for member in members {
        for _ in 0..=depth {
            f.write_str(INDENT)?;
        }
        write_declaration(f, member, depth + 1)?;
        f.write_str("\n")?;
    }
    for _ in 0..depth {
        f.write_str(INDENT)?;
    }
    f.write_str("}")
}

fn write_declaration(f: &mut fmt::Formatter<'_>, decl: &DeclarationNode, depth: usize) -> fmt::Result {
    match decl {
        DeclarationNode::Variable(v) => write!(f, "{v}"),
        DeclarationNode::Struct(s) => {
            write_prefix(f, &s.attributes, &s.modifiers)?;
            write!(f, "struct {} ", s.name)?;
            write_members(f, &s.members, depth)
        }
        DeclarationNode::ClassLike(c) => {
            write_prefix(f, &c.attributes, &c.modifiers)?;
            write!(f, "class {} ", c.name)?;
            write_members(f, &c.members, depth)
        }
    }
}

impl fmt::Display for VariableDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_prefix(f, &self.attributes, &self.modifiers)?;
        let keyword = if self.is_constant { "let" } else { "var" };
        write!(f, "{keyword} {}", self.name)?;
        if let Some(ty) = &self.type_annotation {
            write!(f, ": {ty}")?;
        }
        if let Some(init) = &self.initializer {
            write!(f, " = {init}")?;
        }
        Ok(())
    }
}

impl fmt::Display for DeclarationNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_declaration(f, self, 0)
    }
}
