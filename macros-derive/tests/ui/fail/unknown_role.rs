use macros_derive::external_macro;

#[external_macro(name = "negate", role = statement)]
pub struct NegateMacro;

fn main() {}
