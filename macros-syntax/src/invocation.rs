//! 宏调用点（Macro Invocation）
//!
//! 独立宏（freestanding）的调用：宏名 + 有序实参列表，
//! 由宿主解析器按调用点创建，展开器只读。
//!
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::expr::{Argument, ExpressionNode, write_arguments};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroInvocation {
    pub name: String,
    pub arguments: Vec<Argument>,
}

impl MacroInvocation {
    /// 使用无标签实参构造调用
    pub fn new<I>(name: impl Into<String>, arguments: I) -> Self
    where
        I: IntoIterator<Item = ExpressionNode>,
    {
        Self {
            name: name.into(),
            arguments: arguments.into_iter().map(Argument::unlabeled).collect(),
        }
    }

    pub fn with_arguments<I>(name: impl Into<String>, arguments: I) -> Self
    where
        I: IntoIterator<Item = Argument>,
    {
        Self {
            name: name.into(),
            arguments: arguments.into_iter().collect(),
        }
    }

    pub fn argument_count(&self) -> usize {
        self.arguments.len()
    }

    /// 按顺序遍历实参表达式（忽略标签）
    pub fn expressions(&self) -> impl Iterator<Item = &ExpressionNode> {
        self.arguments.iter().map(|a| &a.expression)
    }
}

impl fmt::Display for MacroInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}(", self.name)?;
        write_arguments(f, &self.arguments)?;
        f.write_str(")")
    }
}
