// chatsync/chatsync-proc-macros
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use proc_macro::TokenStream;

use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

/// Implements `From<&AppDependencies>` for a struct with named fields.
///
/// Fields marked with `#[inject]` are cloned from the field of the same name in
/// `crate::app::deps::AppDependencies`, all others are initialized with `Default::default()`.
#[proc_macro_derive(InjectDependencies, attributes(inject))]
pub fn inject_dependencies(stream: TokenStream) -> TokenStream {
    let input = parse_macro_input!(stream as DeriveInput);

    let Data::Struct(data) = &input.data else {
        return syn::Error::new_spanned(&input.ident, "InjectDependencies requires a struct")
            .to_compile_error()
            .into();
    };

    let Fields::Named(fields) = &data.fields else {
        return syn::Error::new_spanned(
            &input.ident,
            "InjectDependencies requires a struct with named fields",
        )
        .to_compile_error()
        .into();
    };

    let initializers = fields.named.iter().filter_map(|field| {
        let ident = field.ident.as_ref()?;
        let is_injected = field.attrs.iter().any(|attr| attr.path().is_ident("inject"));

        Some(if is_injected {
            quote! { #ident: deps.#ident.clone() }
        } else {
            quote! { #ident: Default::default() }
        })
    });

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    TokenStream::from(quote! {
        impl #impl_generics From<&crate::app::deps::AppDependencies> for #name #ty_generics #where_clause {
            fn from(deps: &crate::app::deps::AppDependencies) -> Self {
                Self {
                    #(#initializers,)*
                }
            }
        }
    })
}
