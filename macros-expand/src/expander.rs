//! 展开器抽象
//!
//! 三种宏角色各对应一个 trait，展开函数为无状态的关联函数：
//! - 表达式宏（`ExpressionMacro`）：调用点 → 替换表达式
//! - 声明宏（`DeclarationMacro`）：调用点 → 若干声明
//! - 对等宏（`PeerMacro`）：属性挂载点 + 被标注声明 → 若干对等声明
//!
//! `MacroDeclaration` 由 `#[external_macro]` 生成，把类型绑定到宏名与角色。
//!
use std::fmt;

use macros_syntax::{Attribute, DeclarationNode, ExpressionNode, MacroInvocation};
use serde::{Deserialize, Serialize};

use crate::context::ExpansionContext;
use crate::error::ExpansionResult;

pub type ExpressionExpansionFn =
    fn(&MacroInvocation, &ExpansionContext) -> ExpansionResult<ExpressionNode>;

pub type DeclarationExpansionFn =
    fn(&MacroInvocation, &ExpansionContext) -> ExpansionResult<Vec<DeclarationNode>>;

pub type PeerExpansionFn =
    fn(&Attribute, &DeclarationNode, &ExpansionContext) -> ExpansionResult<Vec<DeclarationNode>>;

/// 表达式宏
pub trait ExpressionMacro {
    fn expansion(
        node: &MacroInvocation,
        context: &ExpansionContext,
    ) -> ExpansionResult<ExpressionNode>;
}

/// 声明宏
pub trait DeclarationMacro {
    fn expansion(
        node: &MacroInvocation,
        context: &ExpansionContext,
    ) -> ExpansionResult<Vec<DeclarationNode>>;
}

/// 对等宏：返回与被标注声明并列的新声明，不替换原声明
pub trait PeerMacro {
    fn expansion(
        node: &Attribute,
        declaration: &DeclarationNode,
        context: &ExpansionContext,
    ) -> ExpansionResult<Vec<DeclarationNode>>;
}

/// 宏角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacroRole {
    Expression,
    Declaration,
    Peer,
}

impl MacroRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expression => "expression",
            Self::Declaration => "declaration",
            Self::Peer => "peer",
        }
    }
}

impl fmt::Display for MacroRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 外部宏声明（由 `#[external_macro]` 生成）
pub trait MacroDeclaration {
    const NAME: &'static str;
    const ROLE: MacroRole;

    /// 注册表条目
    fn entry() -> MacroEntry;
}

/// 注册表条目：宏名 + 对应角色的展开函数
#[derive(Clone, Copy)]
pub enum MacroEntry {
    Expression {
        name: &'static str,
        expand: ExpressionExpansionFn,
    },
    Declaration {
        name: &'static str,
        expand: DeclarationExpansionFn,
    },
    Peer {
        name: &'static str,
        expand: PeerExpansionFn,
    },
}

impl MacroEntry {
    pub fn of<M: MacroDeclaration>() -> Self {
        M::entry()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Expression { name, .. }
            | Self::Declaration { name, .. }
            | Self::Peer { name, .. } => *name,
        }
    }

    pub fn role(&self) -> MacroRole {
        match self {
            Self::Expression { .. } => MacroRole::Expression,
            Self::Declaration { .. } => MacroRole::Declaration,
            Self::Peer { .. } => MacroRole::Peer,
        }
    }
}

impl fmt::Debug for MacroEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MacroEntry")
            .field("name", &self.name())
            .field("role", &self.role())
            .finish()
    }
}
