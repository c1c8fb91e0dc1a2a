use macros_derive::external_macro;

#[external_macro(name = "double value", role = expression)]
pub struct DoubleValueMacro;

fn main() {}
