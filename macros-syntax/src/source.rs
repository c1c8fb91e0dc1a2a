//! 夹具源码读取
//!
//! 只识别宏展开涉及的固定形状，用于以“源码进、源码出”的方式断言展开结果：
//! - 调用：`#name(arg, label: arg)`
//! - 表达式：整数、带 `\(expr)` 插值的字符串、字典（`[:]`、`[k: v, ...]`）、标识符、调用；
//!   其它形状按括号配平截取为 `ExpressionNode::Other`
//! - 声明：`@Attr` 属性、修饰符、`struct`/`class` 与 `var`/`let` 成员
//!
//! 这不是通用解析器；超出以上形状的输入返回 `SyntaxError::Parse`。
//!
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, digit1, line_ending, multispace0, one_of, satisfy, space0},
    combinator::{eof, map_opt, opt, peek, recognize, value},
    multi::{many0, separated_list0, separated_list1},
    sequence::{delimited, pair, preceded, terminated},
};

use crate::MAX_NESTING_DEPTH;
use crate::decl::{Attribute, ClassDecl, DeclarationNode, Modifier, StructDecl, VariableDecl};
use crate::error::{SyntaxError, SyntaxResult};
use crate::expr::{Argument, DictionaryEntry, ExpressionNode, StringSegment};
use crate::invocation::MacroInvocation;

type PResult<'a, T> = IResult<&'a str, T>;

/// 读取独立宏调用，如 `#generateStruct("Point", fields: ["x": "Int"])`
pub fn parse_invocation(source: &str) -> SyntaxResult<MacroInvocation> {
    parse_complete(source, invocation)
}

/// 读取单个表达式
pub fn parse_expression(source: &str) -> SyntaxResult<ExpressionNode> {
    parse_complete(source, expression)
}

/// 读取单个声明（可带属性）
pub fn parse_declaration(source: &str) -> SyntaxResult<DeclarationNode> {
    parse_complete(source, declaration)
}

fn parse_complete<'a, T>(
    source: &'a str,
    mut parser: impl FnMut(&'a str) -> PResult<'a, T>,
) -> SyntaxResult<T> {
    check_nesting(source)?;
    match terminated(&mut parser, (multispace0, eof)).parse(source) {
        Ok((_, parsed)) => Ok(parsed),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => Err(error_at(source, e.input)),
        Err(nom::Err::Incomplete(_)) => Err(SyntaxError::parse("unexpected end of input")),
    }
}

/// 括号与字符串插值的嵌套层数不得超过 `MAX_NESTING_DEPTH`；配平与否交给解析器判断
fn check_nesting(source: &str) -> SyntaxResult<()> {
    #[derive(Clone, Copy, PartialEq)]
    enum Frame {
        Group,
        Text,
    }

    let mut stack: Vec<Frame> = Vec::new();
    let mut chars = source.char_indices();
    while let Some((offset, c)) = chars.next() {
        if stack.last() == Some(&Frame::Text) {
            match c {
                '\\' => {
                    if let Some((_, '(')) = chars.next() {
                        stack.push(Frame::Group);
                    }
                }
                '"' => {
                    stack.pop();
                }
                _ => continue,
            }
        } else {
            match c {
                '"' => stack.push(Frame::Text),
                '(' | '[' | '{' => stack.push(Frame::Group),
                ')' | ']' | '}' => {
                    stack.pop();
                }
                _ => continue,
            }
        }
        if stack.len() > MAX_NESTING_DEPTH {
            return Err(SyntaxError::parse(format!(
                "nesting deeper than {MAX_NESTING_DEPTH} levels at offset {offset}"
            )));
        }
    }
    Ok(())
}

fn error_at(source: &str, remaining: &str) -> SyntaxError {
    let offset = source.len() - remaining.len();
    let near: String = remaining.chars().take(24).collect();
    if near.is_empty() {
        SyntaxError::parse(format!("unexpected end of input at offset {offset}"))
    } else {
        SyntaxError::parse(format!("unexpected input at offset {offset} near `{near}`"))
    }
}

fn fail<T>(input: &str, kind: nom::error::ErrorKind) -> PResult<'_, T> {
    Err(nom::Err::Error(nom::error::Error::new(input, kind)))
}

// -------- lexical --------

fn symbol<'a>(s: &'static str) -> impl FnMut(&'a str) -> PResult<'a, &'a str> {
    move |input| preceded(multispace0, tag(s)).parse(input)
}

fn identifier(input: &str) -> PResult<'_, &str> {
    recognize(pair(
        satisfy(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))
    .parse(input)
}

fn keyword<'a>(word: &'static str) -> impl FnMut(&'a str) -> PResult<'a, &'a str> {
    move |input| {
        let (rest, ident) = preceded(multispace0, identifier).parse(input)?;
        if ident == word {
            Ok((rest, ident))
        } else {
            fail(input, nom::error::ErrorKind::Tag)
        }
    }
}

/// 表达式结束：分隔符、换行或输入结束（不消耗）
fn expression_end(input: &str) -> PResult<'_, ()> {
    peek(value(
        (),
        preceded(space0, alt((eof, line_ending, recognize(one_of(",)]:;}"))))),
    ))
    .parse(input)
}

// -------- expressions --------

fn invocation(input: &str) -> PResult<'_, MacroInvocation> {
    let (input, _) = symbol("#")(input)?;
    let (input, name) = identifier(input)?;
    let (input, arguments) = opt(argument_list).parse(input)?;
    Ok((
        input,
        MacroInvocation::with_arguments(name, arguments.unwrap_or_default()),
    ))
}

fn argument_list(input: &str) -> PResult<'_, Vec<Argument>> {
    delimited(
        char('('),
        terminated(separated_list0(symbol(","), argument), opt(symbol(","))),
        symbol(")"),
    )
    .parse(input)
}

fn argument(input: &str) -> PResult<'_, Argument> {
    let (input, label) = opt(terminated(
        preceded(multispace0, identifier),
        preceded(space0, char(':')),
    ))
    .parse(input)?;
    let (input, expression) = expression(input)?;
    Ok((
        input,
        Argument {
            label: label.map(str::to_string),
            expression,
        },
    ))
}

fn expression(input: &str) -> PResult<'_, ExpressionNode> {
    let (input, _) = multispace0(input)?;
    alt((
        terminated(integer_literal, expression_end),
        terminated(string_literal, expression_end),
        terminated(dictionary_literal, expression_end),
        terminated(call_or_identifier, expression_end),
        opaque,
    ))
    .parse(input)
}

fn integer_literal(input: &str) -> PResult<'_, ExpressionNode> {
    recognize(pair(
        opt(char('-')),
        pair(
            digit1,
            take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
        ),
    ))
    .map(ExpressionNode::integer)
    .parse(input)
}

fn string_literal(input: &str) -> PResult<'_, ExpressionNode> {
    let (mut input, _) = char('"').parse(input)?;
    let mut segments = Vec::new();
    let mut text = String::new();

    loop {
        if let Some(rest) = input.strip_prefix('"') {
            if !text.is_empty() {
                segments.push(StringSegment::Text(text));
            }
            return Ok((rest, ExpressionNode::StringLiteral { segments }));
        }

        if let Some(rest) = input.strip_prefix("\\(") {
            if !text.is_empty() {
                segments.push(StringSegment::Text(std::mem::take(&mut text)));
            }
            let (rest, inner) = expression(rest)?;
            let (rest, _) = symbol(")")(rest)?;
            segments.push(StringSegment::Interpolation(inner));
            input = rest;
            continue;
        }

        let mut chars = input.chars();
        match chars.next() {
            // 未闭合的字符串直接失败，不再回退到其它分支
            None | Some('\n') => {
                return Err(nom::Err::Failure(nom::error::Error::new(
                    input,
                    nom::error::ErrorKind::Char,
                )));
            }
            Some('\\') => {
                text.push('\\');
                if let Some(escaped) = chars.next() {
                    text.push(escaped);
                }
            }
            Some(c) => text.push(c),
        }
        input = chars.as_str();
    }
}

fn dictionary_literal(input: &str) -> PResult<'_, ExpressionNode> {
    alt((
        value(
            ExpressionNode::DictionaryLiteral { entries: vec![] },
            (char('['), multispace0, char(':'), multispace0, char(']')),
        ),
        delimited(
            char('['),
            terminated(separated_list1(symbol(","), dictionary_entry), opt(symbol(","))),
            symbol("]"),
        )
        .map(|entries| ExpressionNode::DictionaryLiteral { entries }),
    ))
    .parse(input)
}

fn dictionary_entry(input: &str) -> PResult<'_, DictionaryEntry> {
    let (input, key) = expression(input)?;
    let (input, _) = symbol(":")(input)?;
    let (input, value) = expression(input)?;
    Ok((input, DictionaryEntry { key, value }))
}

fn call_or_identifier(input: &str) -> PResult<'_, ExpressionNode> {
    let (input, name) = identifier(input)?;
    let (input, arguments) = opt(argument_list).parse(input)?;
    let node = match arguments {
        Some(arguments) => ExpressionNode::call(name, arguments),
        None => ExpressionNode::identifier(name),
    };
    Ok((input, node))
}

/// 截取配平的文本，直到深度 0 的分隔符、换行或输入结束
fn opaque(input: &str) -> PResult<'_, ExpressionNode> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut end = input.len();

    for (i, c) in input.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' if depth == 0 => {
                end = i;
                break;
            }
            ')' | ']' | '}' => depth -= 1,
            ',' | ':' | ';' | '\n' if depth == 0 => {
                end = i;
                break;
            }
            _ => {}
        }
    }

    let text = input[..end].trim();
    if text.is_empty() {
        return fail(input, nom::error::ErrorKind::Verify);
    }
    Ok((&input[end..], ExpressionNode::other(text)))
}

// -------- declarations --------

fn declaration(input: &str) -> PResult<'_, DeclarationNode> {
    let (input, attributes) = many0(preceded(symbol("@"), identifier)).parse(input)?;
    let (input, modifiers) =
        many0(map_opt(preceded(multispace0, identifier), Modifier::from_keyword)).parse(input)?;
    let attributes: Vec<Attribute> = attributes.into_iter().map(Attribute::new).collect();

    if let Ok((input, _)) = keyword("struct")(input) {
        let (input, name) = preceded(multispace0, identifier).parse(input)?;
        let (input, members) = member_block(input)?;
        let decl = StructDecl::builder()
            .name(name)
            .modifiers(modifiers)
            .attributes(attributes)
            .members(members)
            .build();
        return Ok((input, decl.into()));
    }

    if let Ok((input, _)) = keyword("class")(input) {
        let (input, name) = preceded(multispace0, identifier).parse(input)?;
        let (input, members) = member_block(input)?;
        let decl = ClassDecl::builder()
            .name(name)
            .members(members)
            .attributes(attributes)
            .modifiers(modifiers)
            .build();
        return Ok((input, decl.into()));
    }

    let (input, binding) = alt((keyword("let"), keyword("var"))).parse(input)?;
    let (input, name) = preceded(multispace0, identifier).parse(input)?;
    let (input, type_annotation) = opt(preceded(symbol(":"), type_text)).parse(input)?;
    let (input, initializer) = opt(preceded(symbol("="), expression)).parse(input)?;
    let decl = VariableDecl::builder()
        .name(name)
        .maybe_type_annotation(type_annotation)
        .maybe_initializer(initializer)
        .is_constant(binding == "let")
        .modifiers(modifiers)
        .attributes(attributes)
        .build();
    Ok((input, decl.into()))
}

fn type_text(input: &str) -> PResult<'_, &str> {
    preceded(
        space0,
        take_while1(|c: char| !matches!(c, '\n' | '\r' | ';' | '=' | '{' | '}')),
    )
    .map(str::trim_end)
    .parse(input)
}

fn member_block(input: &str) -> PResult<'_, Vec<DeclarationNode>> {
    let (mut input, _) = symbol("{")(input)?;
    let mut members = Vec::new();
    loop {
        let (rest, _) = many0(alt((symbol(";"), recognize(one_of(" \t\r\n"))))).parse(input)?;
        if let Some(rest) = rest.strip_prefix('}') {
            return Ok((rest, members));
        }
        let (rest, member) = declaration(rest)?;
        members.push(member);
        input = rest;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 测试带标签与字典实参的调用
    #[test]
    fn test_invocation_with_label_and_dictionary() {
        let inv = parse_invocation(r#"#generateStruct("Point", fields: ["x": "Int", "y": "Int"])"#)
            .unwrap();
        assert_eq!(inv.name, "generateStruct");
        assert_eq!(inv.argument_count(), 2);
        assert_eq!(inv.arguments[0].label, None);
        assert_eq!(inv.arguments[1].label.as_deref(), Some("fields"));
        assert_eq!(
            inv.arguments[1].expression,
            ExpressionNode::dictionary([
                (ExpressionNode::string("x"), ExpressionNode::string("Int")),
                (ExpressionNode::string("y"), ExpressionNode::string("Int")),
            ])
        );
    }

    // 测试无参数调用
    #[test]
    fn test_invocation_without_arguments() {
        assert_eq!(parse_invocation("#doubleValue()").unwrap().argument_count(), 0);
        assert_eq!(parse_invocation("#doubleValue").unwrap().argument_count(), 0);
    }

    // 测试无法识别的表达式保留为 Other
    #[test]
    fn test_opaque_expressions() {
        assert_eq!(parse_expression("1 + 2").unwrap(), ExpressionNode::other("1 + 2"));
        assert_eq!(parse_expression("3.14").unwrap(), ExpressionNode::other("3.14"));
        assert_eq!(parse_expression("[1, 2]").unwrap(), ExpressionNode::other("[1, 2]"));
        assert_eq!(parse_expression("a.b(c)").unwrap(), ExpressionNode::other("a.b(c)"));
    }

    // 测试整数字面量文本保持不变
    #[test]
    fn test_integer_text_preserved() {
        assert_eq!(parse_expression("-0x1F").unwrap(), ExpressionNode::integer("-0x1F"));
        assert_eq!(parse_expression("1_000").unwrap(), ExpressionNode::integer("1_000"));
    }

    // 测试字符串插值与转义
    #[test]
    fn test_string_segments() {
        let parsed = parse_expression(r#""Item\(kind)\n\(a + b)""#).unwrap();
        assert_eq!(
            parsed,
            ExpressionNode::StringLiteral {
                segments: vec![
                    StringSegment::Text("Item".into()),
                    StringSegment::Interpolation(ExpressionNode::identifier("kind")),
                    StringSegment::Text("\\n".into()),
                    StringSegment::Interpolation(ExpressionNode::other("a + b")),
                ]
            }
        );
    }

    #[test]
    fn test_empty_dictionary_and_trailing_comma() {
        assert_eq!(parse_expression("[:]").unwrap(), ExpressionNode::dictionary([]));
        assert_eq!(
            parse_expression("[\n  \"a\": \"Int\",\n]").unwrap(),
            ExpressionNode::dictionary([(ExpressionNode::string("a"), ExpressionNode::string("Int"))])
        );
    }

    // 测试带属性、修饰符与成员的类声明
    #[test]
    fn test_class_declaration() {
        let decl = parse_declaration(
            "@Singleton\nfinal class Store {\n    var items: [String: Int] = [:]\n    let name = Name(\"x\"); var flag: Bool\n}",
        )
        .unwrap();
        let DeclarationNode::ClassLike(class) = &decl else {
            panic!("expected class, got {decl:?}");
        };
        assert_eq!(class.name, "Store");
        assert_eq!(class.attributes, vec![Attribute::new("Singleton")]);
        assert_eq!(class.modifiers, vec![Modifier::Final]);
        assert_eq!(class.members.len(), 3);

        let DeclarationNode::Variable(items) = &class.members[0] else {
            panic!("expected variable");
        };
        assert_eq!(items.type_annotation.as_deref(), Some("[String: Int]"));
        assert_eq!(items.initializer, Some(ExpressionNode::dictionary([])));
        assert!(!items.is_constant);

        let DeclarationNode::Variable(name) = &class.members[1] else {
            panic!("expected variable");
        };
        assert!(name.is_constant);
        assert_eq!(
            name.initializer,
            Some(ExpressionNode::call("Name", [Argument::unlabeled(ExpressionNode::string("x"))]))
        );
    }

    #[test]
    fn test_struct_declaration_renders_back() {
        let source = "struct Point {\n    var x: Int\n    var y: Int\n}";
        assert_eq!(parse_declaration(source).unwrap().to_string(), source);
    }

    // 测试错误输入
    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_invocation("doubleValue(10)"),
            Err(SyntaxError::Parse { .. })
        ));
        assert!(matches!(
            parse_invocation("#doubleValue(10"),
            Err(SyntaxError::Parse { .. })
        ));
        assert!(matches!(
            parse_expression("\"unterminated"),
            Err(SyntaxError::Parse { .. })
        ));
        assert!(matches!(
            parse_declaration("enum Color {}"),
            Err(SyntaxError::Parse { .. })
        ));
    }

    // 测试嵌套层数上限
    #[test]
    fn test_nesting_limit() {
        let nested = |levels: usize| {
            format!("#f({}1{})", "[".repeat(levels - 1), "]".repeat(levels - 1))
        };
        assert!(parse_invocation(&nested(MAX_NESTING_DEPTH)).is_ok());

        let err = parse_invocation(&nested(MAX_NESTING_DEPTH + 1)).unwrap_err();
        assert!(err.to_string().contains("nesting deeper than"), "{err}");

        let deep = "[".repeat(200_000);
        assert!(matches!(parse_expression(&deep), Err(SyntaxError::Parse { .. })));

        let interpolated = format!("{}x{}", "\"\\(".repeat(20), ")\"".repeat(20));
        let err = parse_expression(&interpolated).unwrap_err();
        assert!(err.to_string().contains("nesting deeper than"), "{err}");

        let quoted = format!("\"{}\\\"\"", "[".repeat(100));
        assert!(check_nesting(&quoted).is_ok());
    }
}
