//! `@Singleton class Foo { ... }` → 追加 `@MainActor public static let shared = Foo()`
//!
use macros_derive::external_macro;
use macros_syntax::builder::static_accessor;
use macros_syntax::{Attribute, DeclarationNode};

use crate::context::ExpansionContext;
use crate::error::{ExpansionError, ExpansionResult};
use crate::expander::PeerMacro;

/// 为类生成共享实例访问器，返回追加访问器后的类作为唯一的对等声明
#[external_macro(name = "Singleton", role = peer)]
pub struct SingletonMacro;

impl PeerMacro for SingletonMacro {
    #[tracing::instrument(level = "debug", skip_all, fields(attribute = %node, target = declaration.name()))]
    fn expansion(
        node: &Attribute,
        declaration: &DeclarationNode,
        context: &ExpansionContext,
    ) -> ExpansionResult<Vec<DeclarationNode>> {
        let DeclarationNode::ClassLike(class) = declaration else {
            return Err(ExpansionError::UnsupportedTarget {
                macro_name: node.name.clone(),
                found: declaration.kind_name(),
            });
        };

        let cfg = &context.config().singleton;
        let mut augmented = class.clone();

        if cfg.skip_existing && class.members.iter().any(|m| m.name() == cfg.accessor_name) {
            tracing::warn!(
                class = %class.name,
                accessor = %cfg.accessor_name,
                "class already declares the shared accessor; skipping synthesis"
            );
            return Ok(vec![augmented.into()]);
        }

        augmented.members.push(static_accessor(
            &class.name,
            &cfg.accessor_name,
            cfg.executor_attribute.as_deref(),
        ));
        tracing::debug!(class = %class.name, "expanded");
        Ok(vec![augmented.into()])
    }
}
