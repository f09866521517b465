extern crate proc_macro;

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DeriveInput, Fields, Ident};

/// Implements `Display` (using the `Debug` representation) and
/// `std::error::Error` for the annotated type.
///
/// When deriving for an enum, a single field of a variant can be marked with
/// `#[source]` and will be returned from `Error::source` for that variant.
#[proc_macro_derive(Error, attributes(source))]
pub fn derive_error(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) =
        input.generics.split_for_impl();

    let source_arms: Vec<TokenStream> = match &input.data {
        Data::Enum(data) => data
            .variants
            .iter()
            .filter_map(|v| source_arm(&v.ident, &v.fields))
            .collect(),
        _ => Vec::new(),
    };

    let source_body = if source_arms.is_empty() {
        quote! { None }
    } else {
        quote! {
            #[allow(unreachable_patterns)]
            match self {
                #(#source_arms)*
                _ => None,
            }
        }
    };

    let expanded = quote! {
        impl #impl_generics ::std::fmt::Display for #name #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                write!(f, "{:?}", self)
            }
        }

        impl #impl_generics ::std::error::Error for #name #ty_generics #where_clause {
            fn source(&self) -> Option<&(dyn ::std::error::Error + 'static)> {
                #source_body
            }
        }
    };

    proc_macro::TokenStream::from(expanded)
}

/// Produces the match arm for a variant that has a `#[source]` field
fn source_arm(variant: &Ident, fields: &Fields) -> Option<TokenStream> {
    let is_source = |attrs: &[syn::Attribute]| {
        attrs.iter().any(|a| a.path.is_ident("source"))
    };

    match fields {
        Fields::Named(named) => {
            let field = named.named.iter().find(|f| is_source(&f.attrs))?;
            let ident = field.ident.as_ref()?;
            Some(quote! {
                Self::#variant { #ident, .. } => Some(#ident as &(dyn ::std::error::Error + 'static)),
            })
        }
        Fields::Unnamed(unnamed) => {
            let index = unnamed
                .unnamed
                .iter()
                .position(|f| is_source(&f.attrs))?;
            let binding = format_ident!("source");
            let pattern = (0..unnamed.unnamed.len()).map(|i| {
                if i == index {
                    quote! { #binding }
                } else {
                    quote! { _ }
                }
            });
            Some(quote! {
                Self::#variant( #(#pattern),* ) => Some(#binding as &(dyn ::std::error::Error + 'static)),
            })
        }
        Fields::Unit => None,
    }
}
