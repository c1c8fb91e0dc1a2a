//! 宏注册表
//!
//! 宏名 → 展开函数的只读表。标准表在首次访问时构建一次，此后不可变，可在线程间共享。
//!
use std::collections::HashMap;

use macros_syntax::source::{parse_declaration, parse_invocation};
use macros_syntax::{Attribute, DeclarationNode, ExpressionNode, MacroInvocation};
use once_cell::sync::Lazy;

use crate::context::ExpansionContext;
use crate::double_value::DoubleValueMacro;
use crate::error::{ExpansionError, ExpansionResult};
use crate::expander::{MacroDeclaration, MacroEntry, MacroRole};
use crate::generate_struct::GenerateStructMacro;
use crate::singleton::SingletonMacro;

static STANDARD: Lazy<MacroRegistry> = Lazy::new(|| MacroRegistry {
    entries: [
        DoubleValueMacro::entry(),
        GenerateStructMacro::entry(),
        SingletonMacro::entry(),
    ]
    .into_iter()
    .map(|entry| (entry.name(), entry))
    .collect(),
});

#[derive(Debug, Clone, Default)]
pub struct MacroRegistry {
    entries: HashMap<&'static str, MacroEntry>,
}

impl MacroRegistry {
    /// 标准表：`doubleValue`、`generateStruct`、`Singleton`
    pub fn standard() -> &'static MacroRegistry {
        &STANDARD
    }

    /// 自定义表；宏名重复时报错
    pub fn from_entries<I>(entries: I) -> ExpansionResult<Self>
    where
        I: IntoIterator<Item = MacroEntry>,
    {
        let mut map = HashMap::new();
        for entry in entries {
            if map.insert(entry.name(), entry).is_some() {
                return Err(ExpansionError::DuplicateMacro {
                    name: entry.name().to_string(),
                });
            }
        }
        Ok(Self { entries: map })
    }

    pub fn get(&self, name: &str) -> Option<&MacroEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// 已注册的宏名（按字典序）
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup(&self, name: &str, expected: MacroRole) -> ExpansionResult<&MacroEntry> {
        let entry = self.get(name).ok_or_else(|| ExpansionError::UnknownMacro {
            name: name.to_string(),
        })?;
        if entry.role() != expected {
            return Err(ExpansionError::RoleMismatch {
                name: name.to_string(),
                expected,
                found: entry.role(),
            });
        }
        Ok(entry)
    }

    pub fn expand_expression(
        &self,
        node: &MacroInvocation,
        context: &ExpansionContext,
    ) -> ExpansionResult<ExpressionNode> {
        match self.lookup(&node.name, MacroRole::Expression)? {
            MacroEntry::Expression { expand, .. } => expand(node, context),
            other => Err(role_mismatch(&node.name, MacroRole::Expression, other)),
        }
    }

    pub fn expand_declaration(
        &self,
        node: &MacroInvocation,
        context: &ExpansionContext,
    ) -> ExpansionResult<Vec<DeclarationNode>> {
        match self.lookup(&node.name, MacroRole::Declaration)? {
            MacroEntry::Declaration { expand, .. } => expand(node, context),
            other => Err(role_mismatch(&node.name, MacroRole::Declaration, other)),
        }
    }

    pub fn expand_peer(
        &self,
        node: &Attribute,
        declaration: &DeclarationNode,
        context: &ExpansionContext,
    ) -> ExpansionResult<Vec<DeclarationNode>> {
        match self.lookup(&node.name, MacroRole::Peer)? {
            MacroEntry::Peer { expand, .. } => expand(node, declaration, context),
            other => Err(role_mismatch(&node.name, MacroRole::Peer, other)),
        }
    }

    /// 源码级展开
    ///
    /// - `#name(...)`：独立宏，输出替换后的表达式或声明（声明之间空一行）；
    /// - 其它输入按声明读取：已注册的属性宏被移除，随后依次追加各属性宏产出的对等声明。
    ///
    /// ```
    /// use macros_expand::{ExpansionContext, MacroRegistry};
    ///
    /// let out = MacroRegistry::standard()
    ///     .expand_source("#doubleValue(10)", &ExpansionContext::default())
    ///     .unwrap();
    /// assert_eq!(out, "Double(10)");
    /// ```
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn expand_source(&self, source: &str, context: &ExpansionContext) -> ExpansionResult<String> {
        let source = source.trim();
        if source.starts_with('#') {
            let node = parse_invocation(source)?;
            let entry = self.get(&node.name).ok_or_else(|| ExpansionError::UnknownMacro {
                name: node.name.clone(),
            })?;
            return match entry.role() {
                MacroRole::Expression => Ok(self.expand_expression(&node, context)?.to_string()),
                MacroRole::Declaration => Ok(render(&self.expand_declaration(&node, context)?)),
                MacroRole::Peer => Err(ExpansionError::RoleMismatch {
                    name: node.name,
                    expected: MacroRole::Declaration,
                    found: MacroRole::Peer,
                }),
            };
        }

        let declaration = parse_declaration(source)?;
        let macro_attributes: Vec<&Attribute> = declaration
            .attributes()
            .iter()
            .filter(|attr| self.contains(&attr.name))
            .collect();

        let mut output = vec![self.strip_macro_attributes(declaration.clone())];
        for attr in macro_attributes {
            tracing::debug!(attribute = %attr, target = declaration.name(), "expanding peer macro");
            for peer in self.expand_peer(attr, &declaration, context)? {
                output.push(self.strip_macro_attributes(peer));
            }
        }
        Ok(render(&output))
    }

    fn strip_macro_attributes(&self, mut declaration: DeclarationNode) -> DeclarationNode {
        declaration
            .attributes_mut()
            .retain(|attr| !self.contains(&attr.name));
        declaration
    }
}

fn role_mismatch(name: &str, expected: MacroRole, found: &MacroEntry) -> ExpansionError {
    ExpansionError::RoleMismatch {
        name: name.to_string(),
        expected,
        found: found.role(),
    }
}

fn render(declarations: &[DeclarationNode]) -> String {
    declarations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n\n")
}
