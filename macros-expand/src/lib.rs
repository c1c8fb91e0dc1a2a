//! 宏展开层（macros-expand）
//!
//! 在语法层之上实现具体的宏展开：
//! - 展开器抽象（`expander`）：表达式宏、声明宏、对等宏三种角色
//! - 内置展开器：`#doubleValue`、`#generateStruct`、`@Singleton`
//! - 注册表（`registry`）：宏名到展开函数的静态只读表，支持源码级展开
//! - 上下文与配置（`context`、`config`）、错误与诊断（`error`、`diagnostic`）
//! - 测试支持（`testing`）：源码进、源码出的展开断言
//!
//! 展开是同步的纯函数：没有共享可变状态，也不做 I/O，可按调用点并行。
//!
extern crate self as macros_expand;

pub mod config;
pub mod context;
pub mod diagnostic;
pub mod double_value;
pub mod error;
pub mod expander;
pub mod generate_struct;
pub mod registry;
pub mod singleton;
pub mod testing;

pub use context::{ExpansionContext, SourceLocation};
pub use error::{ErrorKind, ExpansionError, ExpansionResult};
pub use expander::{
    DeclarationMacro, ExpressionMacro, MacroDeclaration, MacroEntry, MacroRole, PeerMacro,
};
pub use registry::MacroRegistry;

pub use macros_derive::external_macro;
