use proc_macro::TokenStream;
use quote::quote;

/// Derives the `FromRng` trait for structs with named fields.
///
/// Fields are initialized in declaration order, each one drawing from the same generator. Two
/// structs derived from the same seed are therefore identical as long as their field order is.
#[proc_macro_derive(FromRng)]
pub fn derive_from_rng(input: TokenStream) -> TokenStream {
    let item: syn::Item = match syn::parse(input) {
        Ok(item) => item,
        Err(err) => return err.to_compile_error().into(),
    };

    let ret = match item {
        syn::Item::Struct(s) => {
            let name = s.ident;
            let (impl_generics, ty_generics, where_clause) = s.generics.split_for_impl();

            let mut field_init = Vec::new();
            for field in s.fields.iter() {
                let Some(ident) = field.ident.as_ref() else {
                    return syn::Error::new_spanned(field, "tuple structs are not supported")
                        .to_compile_error()
                        .into();
                };

                field_init.push(quote! {
                    #ident : pc_rng::FromRng::from_rng(rng),
                });
            }

            quote! {
                impl #impl_generics pc_rng::FromRng for #name #ty_generics #where_clause {
                    fn from_rng(rng: &mut impl pc_rng::Rng) -> Self {
                        Self {
                            #(#field_init)*
                        }
                    }
                }
            }
        }
        other => syn::Error::new_spanned(other, "`FromRng` can only be derived for structs")
            .to_compile_error(),
    };

    ret.into()
}
