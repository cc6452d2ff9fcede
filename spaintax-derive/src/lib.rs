use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Lit, Meta, Type};

/// Derive macro that documents the fields of a calculator input struct.
///
/// For each field, extracts:
/// - Column name (respects #[serde(rename = "...")])
/// - Required (false for Option<T> or #[serde(default)] fields)
/// - Description (from doc comments)
///
/// Generates an `input_schema() -> &'static [crate::core::InputField]` method,
/// used for CSV batch headers and field listings.
#[proc_macro_derive(InputSchema, attributes(serde))]
pub fn derive_input_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(name, "InputSchema requires named fields")
                    .to_compile_error()
                    .into()
            }
        },
        _ => {
            return syn::Error::new_spanned(name, "InputSchema only supports structs")
                .to_compile_error()
                .into()
        }
    };

    let entries = fields.iter().filter_map(|field| {
        let ident = field.ident.as_ref()?;
        let column = serde_rename(&field.attrs).unwrap_or_else(|| ident.to_string());
        let required = !is_option_type(&field.ty) && !has_serde_default(&field.attrs);
        let description = doc_comment(&field.attrs);
        Some(quote! {
            crate::core::InputField {
                name: #column,
                required: #required,
                description: #description,
            }
        })
    });

    let expanded = quote! {
        impl #name {
            pub fn input_schema() -> &'static [crate::core::InputField] {
                static SCHEMA: &[crate::core::InputField] = &[
                    #(#entries),*
                ];
                SCHEMA
            }
        }
    };

    TokenStream::from(expanded)
}

fn serde_tokens(attrs: &[Attribute]) -> impl Iterator<Item = String> + '_ {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("serde"))
        .filter_map(|attr| match &attr.meta {
            Meta::List(list) => Some(list.tokens.to_string()),
            _ => None,
        })
}

fn serde_rename(attrs: &[Attribute]) -> Option<String> {
    serde_tokens(attrs).find_map(|tokens| {
        let rest = &tokens[tokens.find("rename")?..];
        let after_eq = rest[rest.find('=')? + 1..].trim();
        let quoted = after_eq.strip_prefix('"')?;
        Some(quoted[..quoted.find('"')?].to_string())
    })
}

fn has_serde_default(attrs: &[Attribute]) -> bool {
    serde_tokens(attrs).any(|tokens| {
        tokens
            .split(',')
            .any(|part| part.trim().starts_with("default"))
    })
}

fn doc_comment(attrs: &[Attribute]) -> String {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(meta) => match &meta.value {
                syn::Expr::Lit(expr_lit) => match &expr_lit.lit {
                    Lit::Str(s) => Some(s.value().trim().to_string()),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_option_type(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Option"),
        _ => false,
    }
}
