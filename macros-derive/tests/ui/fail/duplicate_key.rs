use macros_derive::external_macro;

#[external_macro(name = "negate", role = expression, name = "other")]
pub struct NegateMacro;

fn main() {}
