//! `#generateStruct("Name", fields: ["field": "Type", ...])` → `struct Name { var field: Type ... }`
//!
//! 校验顺序：
//! 1. 实参形状：恰好两个实参，第一个可提取为字符串，第二个是字典字面量；
//! 2. 结构体名首字母大写；
//! 3. 键或值无法提取为字符串的条目被丢弃（记录 warn 日志，不报错）；
//! 4. 字段类型按配置的策略处理（原样 / 类型描述文法校验）；
//! 5. 没有任何字段留下时报错。
//!
use macros_derive::external_macro;
use macros_syntax::builder::{field_declaration, struct_declaration};
use macros_syntax::literal::string_literal_value;
use macros_syntax::{DeclarationNode, DictionaryEntry, ExpressionNode, MacroInvocation, TypeDescriptor};

use crate::config::FieldTypePolicy;
use crate::context::ExpansionContext;
use crate::error::{ExpansionError, ExpansionResult};
use crate::expander::DeclarationMacro;

#[external_macro(name = "generateStruct", role = declaration)]
pub struct GenerateStructMacro;

impl DeclarationMacro for GenerateStructMacro {
    #[tracing::instrument(level = "debug", skip_all, fields(invocation = %node))]
    fn expansion(
        node: &MacroInvocation,
        context: &ExpansionContext,
    ) -> ExpansionResult<Vec<DeclarationNode>> {
        let argument_error = |reason: String| ExpansionError::Argument {
            macro_name: node.name.clone(),
            reason,
        };

        let [name_arg, fields_arg] = node.arguments.as_slice() else {
            return Err(argument_error(format!(
                "expected a struct name and a fields dictionary, found {} argument(s)",
                node.argument_count()
            )));
        };
        let Some(struct_name) = string_literal_value(&name_arg.expression) else {
            return Err(argument_error(format!(
                "struct name must be a string literal, found {}",
                name_arg.expression
            )));
        };
        let ExpressionNode::DictionaryLiteral { entries } = &fields_arg.expression else {
            return Err(argument_error(format!(
                "fields must be a dictionary literal, found {}",
                fields_arg.expression
            )));
        };

        if !struct_name.chars().next().is_some_and(char::is_uppercase) {
            return Err(ExpansionError::Naming { name: struct_name });
        }

        let policy = context.config().field_types;
        let mut members = Vec::with_capacity(entries.len());
        for entry in entries {
            let Some((field, type_text)) = field_entry(entry) else {
                tracing::warn!(
                    struct_name = %struct_name,
                    key = %entry.key,
                    key_kind = entry.key.kind_name(),
                    value = %entry.value,
                    value_kind = entry.value.kind_name(),
                    "dropping field entry that is not a pair of string literals"
                );
                continue;
            };
            let type_annotation = match policy {
                FieldTypePolicy::Raw => type_text,
                FieldTypePolicy::Descriptor => TypeDescriptor::parse(&type_text)
                    .map_err(|_| ExpansionError::InvalidTypeFormat {
                        field: field.clone(),
                        text: type_text.clone(),
                    })?
                    .to_string(),
            };
            members.push(field_declaration(field, type_annotation));
        }

        if members.is_empty() {
            return Err(ExpansionError::EmptyFields {
                macro_name: node.name.clone(),
                struct_name,
            });
        }

        tracing::debug!(struct_name = %struct_name, fields = members.len(), "expanded");
        Ok(vec![struct_declaration(struct_name, members)])
    }
}

fn field_entry(entry: &DictionaryEntry) -> Option<(String, String)> {
    Some((
        string_literal_value(&entry.key)?,
        string_literal_value(&entry.value)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExpansionConfig;
    use crate::error::ErrorKind;
    use macros_syntax::{Argument, StringSegment};

    fn invocation<I>(name: ExpressionNode, fields: I) -> MacroInvocation
    where
        I: IntoIterator<Item = (ExpressionNode, ExpressionNode)>,
    {
        MacroInvocation::with_arguments(
            "generateStruct",
            [
                Argument::unlabeled(name),
                Argument::labeled("fields", ExpressionNode::dictionary(fields)),
            ],
        )
    }

    fn str_pair(key: &str, value: &str) -> (ExpressionNode, ExpressionNode) {
        (ExpressionNode::string(key), ExpressionNode::string(value))
    }

    fn expand(node: &MacroInvocation) -> ExpansionResult<Vec<DeclarationNode>> {
        GenerateStructMacro::expansion(node, &ExpansionContext::default())
    }

    fn expand_descriptor(node: &MacroInvocation) -> ExpansionResult<Vec<DeclarationNode>> {
        let config = ExpansionConfig {
            field_types: FieldTypePolicy::Descriptor,
            ..ExpansionConfig::default()
        };
        GenerateStructMacro::expansion(node, &ExpansionContext::with_config(config))
    }

    // 测试基本展开：字段顺序与插入顺序一致
    #[test]
    fn test_generates_struct_in_insertion_order() {
        let node = invocation(
            ExpressionNode::string("Point"),
            [str_pair("x", "Int"), str_pair("y", "Int")],
        );
        let out = expand(&node).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].to_string(), "struct Point {\n    var x: Int\n    var y: Int\n}");
    }

    // 测试非法条目被丢弃
    #[test]
    fn test_drops_malformed_entries() {
        let node = invocation(
            ExpressionNode::string("User"),
            [
                str_pair("id", "UUID"),
                (ExpressionNode::integer("1"), ExpressionNode::string("Int")),
                (ExpressionNode::string("age"), ExpressionNode::identifier("Int")),
                str_pair("name", "String"),
            ],
        );
        let out = expand(&node).unwrap();
        let names: Vec<_> = out[0].members().iter().map(|m| m.name()).collect();
        assert_eq!(names, ["id", "name"]);
    }

    // 测试插值标识符参与结构体名
    #[test]
    fn test_interpolated_name() {
        let name = ExpressionNode::StringLiteral {
            segments: vec![
                StringSegment::Text("Point".into()),
                StringSegment::Interpolation(ExpressionNode::identifier("D3")),
            ],
        };
        let out = expand(&invocation(name, [str_pair("z", "Double")])).unwrap();
        assert_eq!(out[0].name(), "PointD3");
    }

    // 测试实参形状错误
    #[test]
    fn test_argument_errors() {
        let only_name =
            MacroInvocation::new("generateStruct", [ExpressionNode::string("Point")]);
        assert_eq!(expand(&only_name).unwrap_err().kind(), ErrorKind::ArgumentError);

        let bad_name = invocation(ExpressionNode::identifier("Point"), [str_pair("x", "Int")]);
        assert_eq!(expand(&bad_name).unwrap_err().kind(), ErrorKind::ArgumentError);

        let bad_fields = MacroInvocation::new(
            "generateStruct",
            [ExpressionNode::string("Point"), ExpressionNode::string("x")],
        );
        let err = expand(&bad_fields).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentError);
        assert!(err.to_string().contains("fields must be a dictionary literal"));
    }

    // 测试命名规则
    #[test]
    fn test_lowercase_name() {
        let node = invocation(ExpressionNode::string("point"), [str_pair("x", "Int")]);
        assert_eq!(
            expand(&node).unwrap_err(),
            ExpansionError::Naming {
                name: "point".into()
            }
        );

        let empty = invocation(ExpressionNode::string(""), [str_pair("x", "Int")]);
        assert_eq!(expand(&empty).unwrap_err().kind(), ErrorKind::NamingError);
    }

    // 测试没有字段
    #[test]
    fn test_empty_fields() {
        let empty = invocation(ExpressionNode::string("Empty"), []);
        assert_eq!(expand(&empty).unwrap_err().kind(), ErrorKind::EmptyFieldsError);

        let all_dropped = invocation(
            ExpressionNode::string("Empty"),
            [(ExpressionNode::integer("1"), ExpressionNode::integer("2"))],
        );
        assert_eq!(
            expand(&all_dropped).unwrap_err().kind(),
            ErrorKind::EmptyFieldsError
        );
    }

    // 测试原样策略不校验类型文本
    #[test]
    fn test_raw_policy_keeps_type_text() {
        let node = invocation(ExpressionNode::string("Odd"), [str_pair("x", "[Int")]);
        let out = expand(&node).unwrap();
        assert_eq!(out[0].to_string(), "struct Odd {\n    var x: [Int\n}");
    }

    // 测试类型描述策略：规范化与校验
    #[test]
    fn test_descriptor_policy() {
        let node = invocation(
            ExpressionNode::string("Index"),
            [str_pair("map", "[String:Int]"), str_pair("tags", " [ String ]? ")],
        );
        let out = expand_descriptor(&node).unwrap();
        assert_eq!(
            out[0].to_string(),
            "struct Index {\n    var map: [String: Int]\n    var tags: [String]?\n}"
        );

        let bad = invocation(ExpressionNode::string("Odd"), [str_pair("x", "[Int")]);
        assert_eq!(
            expand_descriptor(&bad).unwrap_err(),
            ExpansionError::InvalidTypeFormat {
                field: "x".into(),
                text: "[Int".into()
            }
        );
    }
}
