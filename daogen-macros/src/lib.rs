use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Attribute, Data, DeriveInput, Error, Field, Fields, GenericArgument, Ident, LitBool, LitInt, LitStr,
    PathArguments, Result, Type, meta::ParseNestedMeta, parse_macro_input, spanned::Spanned,
};

mod parsed;

use parsed::{DeclaredKind, ParsedType};

/// Declares a persistent entity.
///
/// The derive checks the `#[daogen(...)]` attributes and implements
/// `daogen::Persistent` and `daogen::EntityType`. Data-access code is
/// produced separately by `daogen-build` from the same declarations.
///
/// ```text
/// #[derive(Entity, Default, Clone)]
/// #[daogen(table = "article", schema = "shop")]
/// pub struct Article {
///     #[daogen(id, generated(strategy = "identity"), column(name = "idArticle"))]
///     id: Option<i32>,
///     #[daogen(column(length = 20, nullable = false))]
///     code: Option<String>,
///     #[daogen(many_to_one, join_column(name = "supplierId"))]
///     supplier: Option<Supplier>,
/// }
/// ```
#[proc_macro_derive(Entity, attributes(daogen))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    expand(input, DeclaredKind::Entity)
}

/// Declares an aggregate that can serve as an embedded identifier.
#[proc_macro_derive(Embeddable, attributes(daogen))]
pub fn derive_embeddable(input: TokenStream) -> TokenStream {
    expand(input, DeclaredKind::Embeddable)
}

/// Declares a non-table parent whose properties entities inherit.
#[proc_macro_derive(MappedSuperclass, attributes(daogen))]
pub fn derive_mapped_superclass(input: TokenStream) -> TokenStream {
    expand(input, DeclaredKind::MappedSuperclass)
}

fn expand(input: TokenStream, kind: DeclaredKind) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match ParsedType::from_input(&input, kind) {
        Ok(parsed) => parsed.emit().into(),
        Err(err) => err.to_compile_error().into(),
    }
}
