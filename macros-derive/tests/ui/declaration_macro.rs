use macros_derive::external_macro;
use macros_expand::{
    DeclarationMacro, ExpansionContext, ExpansionResult, MacroDeclaration, MacroRegistry, MacroRole,
};
use macros_syntax::builder::{field_declaration, struct_declaration};
use macros_syntax::{DeclarationNode, MacroInvocation};

#[external_macro(name = "emptyRecord", role = declaration)]
struct EmptyRecordMacro;

impl DeclarationMacro for EmptyRecordMacro {
    fn expansion(
        _node: &MacroInvocation,
        _context: &ExpansionContext,
    ) -> ExpansionResult<Vec<DeclarationNode>> {
        Ok(vec![struct_declaration(
            "Record",
            [field_declaration("id", "UUID")],
        )])
    }
}

fn main() {
    assert_eq!(EmptyRecordMacro::ROLE, MacroRole::Declaration);

    let registry = MacroRegistry::from_entries([EmptyRecordMacro::entry()]).unwrap();
    let out = registry
        .expand_source("#emptyRecord", &ExpansionContext::default())
        .unwrap();
    assert_eq!(out, "struct Record {\n    var id: UUID\n}");
}
