//! 字面量提取
//!
//! 对表达式节点做形状匹配并提取类型化的值；形状不符时返回 `None`（正常分支，不是错误）。
//!
//! 字符串提取是一个启发式近似：插值段只接受裸标识符，并以标识符的名字（而非运行期值）
//! 代入，用来近似“编译期常量字符串”，不做真正的常量求值。
//!
use crate::expr::{ExpressionNode, StringSegment};

/// 是否为整数字面量（只看形状）
pub fn is_integer_literal(node: &ExpressionNode) -> bool {
    matches!(node, ExpressionNode::IntegerLiteral { .. })
}

/// 提取整数字面量的值
///
/// 支持可选的前导 `-`、`_` 分隔符，以及 `0x`/`0o`/`0b` 前缀；溢出视为不匹配。
///
/// ```
/// use macros_syntax::expr::ExpressionNode;
/// use macros_syntax::literal::integer_literal_value;
///
/// assert_eq!(integer_literal_value(&ExpressionNode::integer("1_000")), Some(1000));
/// assert_eq!(integer_literal_value(&ExpressionNode::integer("0x1F")), Some(31));
/// assert_eq!(integer_literal_value(&ExpressionNode::string("10")), None);
/// ```
pub fn integer_literal_value(node: &ExpressionNode) -> Option<i64> {
    let ExpressionNode::IntegerLiteral { text } = node else {
        return None;
    };
    parse_integer_text(text)
}

fn parse_integer_text(text: &str) -> Option<i64> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let (radix, digits) = if let Some(rest) = unsigned.strip_prefix("0x") {
        (16, rest)
    } else if let Some(rest) = unsigned.strip_prefix("0o") {
        (8, rest)
    } else if let Some(rest) = unsigned.strip_prefix("0b") {
        (2, rest)
    } else {
        (10, unsigned)
    };

    // 分隔符不能出现在开头，且至少要有一位数字
    if digits.is_empty() || digits.starts_with('_') {
        return None;
    }
    let digits: String = digits.chars().filter(|c| *c != '_').collect();
    if !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    let signed = if negative {
        format!("-{digits}")
    } else {
        digits
    };
    i64::from_str_radix(&signed, radix).ok()
}

/// 提取“常量”字符串
///
/// 文本段原样拼接；插值段必须是裸标识符，代入其名字；出现任何其它插值表达式时整体失败。
///
/// ```
/// use macros_syntax::expr::{ExpressionNode, StringSegment};
/// use macros_syntax::literal::string_literal_value;
///
/// let node = ExpressionNode::StringLiteral {
///     segments: vec![
///         StringSegment::Text("Point".into()),
///         StringSegment::Interpolation(ExpressionNode::identifier("Dim")),
///     ],
/// };
/// assert_eq!(string_literal_value(&node).as_deref(), Some("PointDim"));
/// ```
pub fn string_literal_value(node: &ExpressionNode) -> Option<String> {
    let ExpressionNode::StringLiteral { segments } = node else {
        return None;
    };

    let mut result = String::new();
    for segment in segments {
        match segment {
            StringSegment::Text(text) => result.push_str(text),
            StringSegment::Interpolation(ExpressionNode::Identifier { name }) => {
                result.push_str(name)
            }
            StringSegment::Interpolation(other) => {
                tracing::trace!(
                    interpolation = %other,
                    "string literal interpolates a non-identifier expression"
                );
                return None;
            }
        }
    }
    Some(result)
}
