use macros_derive::external_macro;

#[external_macro(role = expression)]
pub struct NegateMacro;

fn main() {}
