//! `#doubleValue(<整数字面量>)` → `Double(<整数字面量>)`
//!
use macros_derive::external_macro;
use macros_syntax::literal::integer_literal_value;
use macros_syntax::{Argument, ExpressionNode, MacroInvocation};

use crate::context::ExpansionContext;
use crate::error::{ExpansionError, ExpansionResult};
use crate::expander::ExpressionMacro;

/// 把整数字面量包装为浮点构造调用；字面量文本原样保留
#[external_macro(name = "doubleValue", role = expression)]
pub struct DoubleValueMacro;

impl ExpressionMacro for DoubleValueMacro {
    #[tracing::instrument(level = "debug", skip_all, fields(invocation = %node))]
    fn expansion(
        node: &MacroInvocation,
        _context: &ExpansionContext,
    ) -> ExpansionResult<ExpressionNode> {
        let [argument] = node.arguments.as_slice() else {
            return Err(ExpansionError::Arity {
                macro_name: node.name.clone(),
                expected: 1,
                found: node.argument_count(),
            });
        };

        let literal = &argument.expression;
        // 溢出或含非法数字的整数字面量同样是类型错误
        if integer_literal_value(literal).is_none() {
            return Err(ExpansionError::Type {
                macro_name: node.name.clone(),
                expected: "an integer literal",
                argument: literal.to_string(),
            });
        }

        let expanded = ExpressionNode::call("Double", [Argument::unlabeled(literal.clone())]);
        tracing::debug!(expanded = %expanded, "expanded");
        Ok(expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::expander::{MacroDeclaration, MacroRole};

    fn expand(arguments: Vec<ExpressionNode>) -> ExpansionResult<ExpressionNode> {
        let node = MacroInvocation::new("doubleValue", arguments);
        DoubleValueMacro::expansion(&node, &ExpansionContext::default())
    }

    // 测试整数字面量展开
    #[test]
    fn test_wraps_integer_literal() {
        let out = expand(vec![ExpressionNode::integer("10")]).unwrap();
        assert_eq!(out.to_string(), "Double(10)");
    }

    // 测试字面量文本原样保留（不做数值归一化）
    #[test]
    fn test_keeps_literal_text() {
        let out = expand(vec![ExpressionNode::integer("0x1F")]).unwrap();
        assert_eq!(out.to_string(), "Double(0x1F)");
        let out = expand(vec![ExpressionNode::integer("-3")]).unwrap();
        assert_eq!(out.to_string(), "Double(-3)");
    }

    // 测试实参个数
    #[test]
    fn test_arity() {
        let err = expand(vec![]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArityError);
        assert!(err.to_string().contains("none was provided"));

        let err = expand(vec![ExpressionNode::integer("1"), ExpressionNode::integer("2")])
            .unwrap_err();
        assert_eq!(
            err,
            ExpansionError::Arity {
                macro_name: "doubleValue".into(),
                expected: 1,
                found: 2,
            }
        );
    }

    // 测试非整数实参
    #[test]
    fn test_rejects_non_integer() {
        let err = expand(vec![ExpressionNode::string("10")]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeError);
        assert!(err.to_string().ends_with("Found: \"10\""));

        let err = expand(vec![ExpressionNode::identifier("x")]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeError);
    }

    // 测试形状是整数但数值不可解析
    #[test]
    fn test_rejects_unparsable_integer_literal() {
        let err = expand(vec![ExpressionNode::integer("99999999999999999999")]).unwrap_err();
        assert_eq!(
            err,
            ExpansionError::Type {
                macro_name: "doubleValue".into(),
                expected: "an integer literal",
                argument: "99999999999999999999".into(),
            }
        );

        let err = expand(vec![ExpressionNode::integer("12abc")]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeError);

        // 分隔符出现在数字之后是合法的宿主字面量
        let out = expand(vec![ExpressionNode::integer("1__")]).unwrap();
        assert_eq!(out.to_string(), "Double(1__)");
    }

    // 测试声明胶水
    #[test]
    fn test_declaration() {
        assert_eq!(DoubleValueMacro::NAME, "doubleValue");
        assert_eq!(DoubleValueMacro::ROLE, MacroRole::Expression);
        assert_eq!(DoubleValueMacro::entry().role(), MacroRole::Expression);
    }
}
