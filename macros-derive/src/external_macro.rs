use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Ident, Item, LitStr, Result, Token, parse::Parse, parse::ParseStream};

/// #[external_macro] 宏实现
/// - 只接受单元结构体
/// - 生成 `MacroDeclaration`（NAME / ROLE / entry）
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    expand_tokens(attr.into(), item.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_tokens(attr: TokenStream2, item: TokenStream2) -> Result<TokenStream2> {
    let cfg: ExternalMacroAttrConfig = syn::parse2(attr)?;
    let input: Item = syn::parse2(item)?;

    let st = match input {
        Item::Struct(s) => s,
        other => {
            return Err(syn::Error::new(other.span(), "#[external_macro] only on struct"));
        }
    };

    if !matches!(st.fields, syn::Fields::Unit) {
        return Err(syn::Error::new(
            st.fields.span(),
            "#[external_macro] requires a unit struct, e.g., pub struct DoubleValueMacro;",
        ));
    }

    if !st.generics.params.is_empty() {
        return Err(syn::Error::new(
            st.generics.span(),
            "#[external_macro] does not support generic expander types",
        ));
    }

    let ident = &st.ident;
    let name = &cfg.name;
    let variant = cfg.role.variant();
    let role_trait = cfg.role.trait_ident();

    Ok(quote! {
        #st

        impl ::macros_expand::MacroDeclaration for #ident {
            const NAME: &'static str = #name;
            const ROLE: ::macros_expand::MacroRole = ::macros_expand::MacroRole::#variant;

            fn entry() -> ::macros_expand::MacroEntry {
                ::macros_expand::MacroEntry::#variant {
                    name: #name,
                    expand: <Self as ::macros_expand::#role_trait>::expansion,
                }
            }
        }
    })
}

// -------- parsing --------

#[derive(Clone, Copy)]
enum Role {
    Expression,
    Declaration,
    Peer,
}

impl Role {
    fn variant(self) -> Ident {
        match self {
            Role::Expression => format_ident!("Expression"),
            Role::Declaration => format_ident!("Declaration"),
            Role::Peer => format_ident!("Peer"),
        }
    }

    fn trait_ident(self) -> Ident {
        match self {
            Role::Expression => format_ident!("ExpressionMacro"),
            Role::Declaration => format_ident!("DeclarationMacro"),
            Role::Peer => format_ident!("PeerMacro"),
        }
    }
}

struct ExternalMacroAttrConfig {
    name: LitStr,
    role: Role,
}

impl Parse for ExternalMacroAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut name: Option<LitStr> = None;
        let mut role: Option<Role> = None;

        let elems: Punctuated<ExternalMacroAttrElem, Token![,]> =
            Punctuated::<ExternalMacroAttrElem, Token![,]>::parse_terminated(input)?;

        for elem in elems.into_iter() {
            match elem {
                ExternalMacroAttrElem::Name(key, lit) => {
                    if name.is_some() {
                        return Err(syn::Error::new(
                            key.span(),
                            "duplicate key 'name' in attribute",
                        ));
                    }
                    name = Some(lit);
                }
                ExternalMacroAttrElem::Role(key, r) => {
                    if role.is_some() {
                        return Err(syn::Error::new(
                            key.span(),
                            "duplicate key 'role' in attribute",
                        ));
                    }
                    role = Some(r);
                }
            }
        }

        let Some(name) = name else {
            return Err(syn::Error::new(
                proc_macro2::Span::call_site(),
                "missing key 'name', e.g., #[external_macro(name = \"doubleValue\", role = expression)]",
            ));
        };
        let Some(role) = role else {
            return Err(syn::Error::new(
                proc_macro2::Span::call_site(),
                "missing key 'role'; expected 'expression' | 'declaration' | 'peer'",
            ));
        };

        Ok(Self { name, role })
    }
}

enum ExternalMacroAttrElem {
    Name(Ident, LitStr),
    Role(Ident, Role),
}

impl Parse for ExternalMacroAttrElem {
    fn parse(input: ParseStream) -> Result<Self> {
        let key: Ident = input.parse()?;
        let _eq: Token![=] = input.parse()?;

        if key == "name" {
            let lit: LitStr = input.parse()?;
            if !is_identifier(&lit.value()) {
                return Err(syn::Error::new(
                    lit.span(),
                    "macro name must be a non-empty identifier",
                ));
            }
            Ok(Self::Name(key, lit))
        } else if key == "role" {
            let value: Ident = input.parse()?;
            let role = match value.to_string().as_str() {
                "expression" => Role::Expression,
                "declaration" => Role::Declaration,
                "peer" => Role::Peer,
                _ => {
                    return Err(syn::Error::new(
                        value.span(),
                        "unknown role; expected 'expression' | 'declaration' | 'peer'",
                    ));
                }
            };
            Ok(Self::Role(key, role))
        } else {
            Err(syn::Error::new(
                key.span(),
                "unknown key in attribute; expected 'name' or 'role'",
            ))
        }
    }
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
