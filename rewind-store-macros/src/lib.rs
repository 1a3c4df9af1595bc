//! Procedural macros for rewind-store

use darling::{FromDeriveInput, FromVariant};
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Container-level input for #[derive(Action)]
#[derive(Debug, FromDeriveInput)]
#[darling(supports(enum_any))]
struct ActionOpts {
    ident: syn::Ident,
    data: darling::ast::Data<ActionVariant, ()>,
}

/// Variant-level input
#[derive(Debug, FromVariant)]
struct ActionVariant {
    ident: syn::Ident,
    fields: darling::ast::Fields<()>,
}

/// Derive macro for the Action trait
///
/// Generates a `name()` method that returns the variant name as a static
/// string. The wire representation is governed separately by the serde
/// derives on the same enum; pair the derive with `#[serde(tag = "type")]`
/// so actions cross the inspector wire as tagged objects.
///
/// # Example
/// ```ignore
/// #[derive(Action, Clone, Debug, Serialize, Deserialize)]
/// #[serde(tag = "type", rename_all = "camelCase")]
/// enum AppAction {
///     IncrementOne,
///     SetLabel { label: String },
/// }
///
/// let action = AppAction::IncrementOne;
/// assert_eq!(action.name(), "IncrementOne");
/// ```
#[proc_macro_derive(Action)]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match ActionOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    let name = &opts.ident;

    let variants = match &opts.data {
        darling::ast::Data::Enum(variants) => variants,
        _ => {
            return syn::Error::new_spanned(&input, "Action can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    let name_arms = variants.iter().map(|v| {
        let variant_name = &v.ident;
        let variant_str = variant_name.to_string();

        match &v.fields.style {
            darling::ast::Style::Unit => quote! {
                #name::#variant_name => #variant_str
            },
            darling::ast::Style::Tuple => quote! {
                #name::#variant_name(..) => #variant_str
            },
            darling::ast::Style::Struct => quote! {
                #name::#variant_name { .. } => #variant_str
            },
        }
    });

    let expanded = quote! {
        impl rewind_store::Action for #name {
            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms),*
                }
            }
        }
    };

    expanded.into()
}
