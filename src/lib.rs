//! Procedural macros for waypoint routes.
//!
//! `#[route_model]` gives a route type identity-based `PartialEq`, `Eq` and
//! `Hash`, so routes holding non-comparable collaborators can still be
//! compared and collected by value.

extern crate proc_macro;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Error, Item, ItemImpl};

const CONFORMANCE_MESSAGE: &str =
    "#[route_model] can only be applied to `impl Route for ...` blocks";

/// Derive identity-based equality and hashing from a `Route` impl.
///
/// # Usage
///
/// ```ignore
/// trait Auth: Send + Sync {
///     fn is_authenticated(&self) -> bool;
/// }
///
/// struct HomeRoute {
///     auth: Arc<dyn Auth>,
/// }
///
/// #[route_model]
/// impl Route for HomeRoute {
///     type Id = &'static str;
///     type Destination = &'static str;
///
///     fn id(&self) -> &'static str {
///         "home"
///     }
///
///     fn destination(&self) -> &'static str {
///         "Home"
///     }
/// }
/// ```
///
/// The macro keeps the impl as written and generates:
/// - `impl PartialEq for HomeRoute`, comparing `Route::id` of both sides
/// - `impl Eq for HomeRoute`
/// - `impl Hash for HomeRoute`, hashing `Route::id` only
///
/// Any other item, or an impl of any other trait, is rejected at compile time.
#[proc_macro_attribute]
pub fn route_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    expand_route_model(attr.into(), item.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

fn expand_route_model(attr: TokenStream2, item: TokenStream2) -> Result<TokenStream2, Error> {
    if !attr.is_empty() {
        return Err(Error::new_spanned(
            attr,
            "#[route_model] does not take arguments",
        ));
    }

    let item_impl = match syn::parse2::<Item>(item)? {
        Item::Impl(item_impl) => item_impl,
        other => return Err(Error::new_spanned(other, CONFORMANCE_MESSAGE)),
    };
    let route_trait = route_trait_path(&item_impl)?;

    let self_ty = &item_impl.self_ty;
    let (impl_generics, _, where_clause) = item_impl.generics.split_for_impl();

    Ok(quote! {
        #item_impl

        impl #impl_generics ::core::cmp::PartialEq for #self_ty #where_clause {
            fn eq(&self, other: &Self) -> bool {
                <Self as #route_trait>::id(self) == <Self as #route_trait>::id(other)
            }
        }

        impl #impl_generics ::core::cmp::Eq for #self_ty #where_clause {}

        impl #impl_generics ::core::hash::Hash for #self_ty #where_clause {
            fn hash<__H: ::core::hash::Hasher>(&self, state: &mut __H) {
                ::core::hash::Hash::hash(&<Self as #route_trait>::id(self), state);
            }
        }
    })
}

/// The trait path of a positive `impl ...Route for T` block.
fn route_trait_path(item_impl: &ItemImpl) -> Result<&syn::Path, Error> {
    match &item_impl.trait_ {
        Some((None, path, _))
            if path
                .segments
                .last()
                .is_some_and(|segment| segment.ident == "Route") =>
        {
            Ok(path)
        }
        Some((_, path, _)) => Err(Error::new_spanned(path, CONFORMANCE_MESSAGE)),
        None => Err(Error::new_spanned(&item_impl.self_ty, CONFORMANCE_MESSAGE)),
    }
}
