use macros_derive::external_macro;

#[external_macro(name = "negate", kind = expression)]
pub struct NegateMacro;

fn main() {}
