//! 源码级展开断言
//!
//! 以“源码进、源码出”的方式断言展开结果，比较前统一行尾空白与首尾空行。
//!
//! ```
//! use macros_expand::testing::assert_macro_expansion;
//!
//! assert_macro_expansion("#doubleValue(10)", "Double(10)");
//! ```
//!
use crate::context::ExpansionContext;
use crate::error::ErrorKind;
use crate::registry::MacroRegistry;

/// 使用标准注册表与默认上下文断言展开结果
#[track_caller]
pub fn assert_macro_expansion(source: &str, expanded: &str) {
    assert_macro_expansion_with(MacroRegistry::standard(), &ExpansionContext::default(), source, expanded);
}

#[track_caller]
pub fn assert_macro_expansion_with(
    registry: &MacroRegistry,
    context: &ExpansionContext,
    source: &str,
    expanded: &str,
) {
    match registry.expand_source(source, context) {
        Ok(actual) => assert_eq!(
            normalize(&actual),
            normalize(expanded),
            "unexpected expansion of:\n{source}"
        ),
        Err(err) => panic!("expansion of:\n{source}\nfailed: {err}"),
    }
}

/// 断言展开失败且错误种类一致，返回错误消息供进一步断言
#[track_caller]
pub fn assert_expansion_error(source: &str, kind: ErrorKind) -> String {
    match MacroRegistry::standard().expand_source(source, &ExpansionContext::default()) {
        Ok(actual) => panic!("expected {kind} for:\n{source}\nbut expanded to:\n{actual}"),
        Err(err) => {
            assert_eq!(err.kind(), kind, "unexpected error for:\n{source}\n{err}");
            err.to_string()
        }
    }
}

fn normalize(text: &str) -> String {
    text.trim()
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_surrounding_blank_lines_and_trailing_spaces() {
        assert_eq!(normalize("\n  struct A {   \n    var x: Int\n}\n\n"), "struct A {\n    var x: Int\n}");
    }

    #[test]
    #[should_panic(expected = "unexpected expansion")]
    fn mismatch_panics() {
        assert_macro_expansion("#doubleValue(10)", "Double(11)");
    }
}
