//! 语法树构建
//!
//! 由已校验的语义数据合成声明片段，纯函数，不做校验。
//!
use crate::decl::{Attribute, DeclarationNode, Modifier, StructDecl, VariableDecl};
use crate::expr::ExpressionNode;

/// 存储属性：`var name: Type`
pub fn field_declaration(name: impl Into<String>, type_annotation: impl Into<String>) -> DeclarationNode {
    VariableDecl::builder()
        .name(name)
        .type_annotation(type_annotation)
        .build()
        .into()
}

/// 结构体声明，成员顺序即传入顺序
pub fn struct_declaration<I>(name: impl Into<String>, members: I) -> DeclarationNode
where
    I: IntoIterator<Item = DeclarationNode>,
{
    StructDecl::builder()
        .name(name)
        .members(members.into_iter().collect())
        .build()
        .into()
}

/// 静态访问器：`[@Executor] public static let <accessor> = <TypeName>()`
///
/// ```
/// use macros_syntax::builder::static_accessor;
///
/// let decl = static_accessor("Foo", "shared", Some("MainActor"));
/// assert_eq!(decl.to_string(), "@MainActor public static let shared = Foo()");
/// ```
pub fn static_accessor(
    type_name: &str,
    accessor_name: &str,
    executor_attribute: Option<&str>,
) -> DeclarationNode {
    VariableDecl::builder()
        .name(accessor_name)
        .initializer(ExpressionNode::call(type_name, []))
        .is_constant(true)
        .modifiers(vec![Modifier::Public, Modifier::Static])
        .attributes(executor_attribute.map(Attribute::new).into_iter().collect())
        .build()
        .into()
}
