use macros_derive::external_macro;
use macros_expand::{
    ExpansionContext, ExpansionResult, MacroDeclaration, MacroEntry, MacroRole, PeerMacro,
};
use macros_syntax::builder::field_declaration;
use macros_syntax::{Attribute, DeclarationNode};

#[external_macro(name = "Companion", role = peer)]
pub struct CompanionMacro;

impl PeerMacro for CompanionMacro {
    fn expansion(
        _node: &Attribute,
        declaration: &DeclarationNode,
        _context: &ExpansionContext,
    ) -> ExpansionResult<Vec<DeclarationNode>> {
        Ok(vec![field_declaration(
            format!("{}Companion", declaration.name()),
            declaration.name().to_string(),
        )])
    }
}

fn main() {
    assert_eq!(CompanionMacro::NAME, "Companion");
    assert_eq!(CompanionMacro::ROLE, MacroRole::Peer);
    assert_eq!(CompanionMacro::entry().role(), MacroRole::Peer);
    assert!(matches!(
        MacroEntry::of::<CompanionMacro>(),
        MacroEntry::Peer { name: "Companion", .. }
    ));
}
