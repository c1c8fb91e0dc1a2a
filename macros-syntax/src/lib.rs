//! 宏展开语法层（macros-syntax）
//!
//! 提供宏展开所需的语法树模型与纯函数构件：
//! - 表达式（`expr`）、调用点（`invocation`）与声明（`decl`）的封闭语法树
//! - 字面量提取（`literal`）：整数、“常量”字符串
//! - 语法树构建（`builder`）：字段、结构体、静态访问器
//! - 类型描述文法（`type_descriptor`）：`T?`、`[T]`、`[K: V]`
//! - 夹具源码读取（`source`）：按固定形状把源码读成语法树，便于源码级断言
//!
//! 所有节点均为不可变、由父节点独占的树值，可序列化，线程间可自由传递。
//!
pub mod builder;
pub mod decl;
pub mod error;
pub mod expr;
pub mod invocation;
pub mod literal;
pub mod source;
pub mod type_descriptor;

/// 类型描述与夹具源码允许的最大嵌套层数
pub const MAX_NESTING_DEPTH: usize = 32;

pub use decl::{Attribute, ClassDecl, DeclarationNode, Modifier, StructDecl, VariableDecl};
pub use error::{SyntaxError, SyntaxResult};
pub use expr::{Argument, DictionaryEntry, ExpressionNode, StringSegment};
pub use invocation::MacroInvocation;
pub use type_descriptor::{PrimitiveType, TypeDescriptor};
