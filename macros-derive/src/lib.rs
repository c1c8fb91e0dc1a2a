use proc_macro::TokenStream;

mod external_macro;

/// 外部宏声明
///
/// 把展开器类型绑定到宏名与宏角色，生成 `::macros_expand::MacroDeclaration` 实现，
/// 其中 `entry()` 指向对应角色 trait 的 `expansion` 函数（因此类型必须实现该 trait）。
///
/// - 仅支持单元结构体：`pub struct DoubleValueMacro;`
/// - 参数：`#[external_macro(name = "doubleValue", role = expression)]`
///   - `name`：宏名（合法标识符）
///   - `role`：`expression` | `declaration` | `peer`
#[proc_macro_attribute]
pub fn external_macro(attr: TokenStream, item: TokenStream) -> TokenStream {
    external_macro::expand(attr, item)
}
