use macros_derive::external_macro;
use macros_expand::{
    ExpansionContext, ExpansionResult, ExpressionMacro, MacroDeclaration, MacroEntry, MacroRole,
};
use macros_syntax::{ExpressionNode, MacroInvocation};

#[external_macro(name = "stringify", role = expression)]
pub struct StringifyMacro;

impl ExpressionMacro for StringifyMacro {
    fn expansion(
        node: &MacroInvocation,
        _context: &ExpansionContext,
    ) -> ExpansionResult<ExpressionNode> {
        let text: Vec<String> = node.expressions().map(ToString::to_string).collect();
        Ok(ExpressionNode::string(text.join(", ")))
    }
}

fn main() {
    assert_eq!(StringifyMacro::NAME, "stringify");
    assert_eq!(StringifyMacro::ROLE, MacroRole::Expression);

    let entry = MacroEntry::of::<StringifyMacro>();
    let MacroEntry::Expression { name, expand } = entry else {
        panic!("expected expression entry");
    };
    assert_eq!(name, "stringify");

    let node = MacroInvocation::new("stringify", [ExpressionNode::identifier("a")]);
    let out = expand(&node, &ExpansionContext::default()).unwrap();
    assert_eq!(out.to_string(), "\"a\"");
}
