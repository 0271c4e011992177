//! Renders one data-access module per resolved entity.
//!
//! Emission is a pure function of the resolved entity, the full entity map
//! and the options: cross-entity references are written as fully qualified
//! paths, so the order in which units are rendered does not matter.

mod accessors;
mod columns;
mod dao;
mod mappers;

use anyhow::{Context, Result};
use heck::ToSnakeCase;
use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::Ident;

use crate::error::ConfigError;
use crate::model::{Access, EntityMap, EntityMetadata, Property, ResolvedReference};

pub(crate) use columns::ColumnSet;

/// Options shared by every unit of a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Module the generated units are declared in.
    pub module_path: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            module_path: "crate::generated".to_string(),
        }
    }
}

/// One rendered source unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    pub entity: String,
    pub module_name: String,
    pub source: String,
}

impl GeneratedUnit {
    pub fn file_name(&self) -> String {
        format!("{}.rs", self.module_name)
    }
}

/// Module name of an entity's unit, e.g. `order_item_dao`.
pub fn module_name(simple_name: &str) -> String {
    format!("{}_dao", simple_name.to_snake_case())
}

/// Renders the data-access module of `entity`.
pub fn emit_entity(entity: &EntityMetadata, entities: &EntityMap, options: &EmitOptions) -> Result<GeneratedUnit> {
    let cx = EmitContext::new(entity, entities, options)?;

    let constants = columns::emit_constants(&cx);
    let mappers = mappers::emit_mappers(&cx)?;
    let accessors = accessors::emit_accessors(&cx)?;
    let dao = dao::emit_dao(&cx)?;

    let summary = format!(" Data access for `{}`.", entity.qualified_name);
    let output = quote! {
        #![doc = #summary]
        #![doc = ""]
        #![doc = " Generated by daogen-build. Do not edit manually."]
        #![allow(unused_imports, unused_mut, clippy::all)]

        use ::daogen::{
            DaoError, DaoResult, FromValue, ParameterBinder, PropertyDetail, Reference, Row, RowMapper, SqlExecutor,
            ToValue, Value,
        };

        #constants
        #mappers
        #accessors
        #dao
    };

    let syntax_tree = syn::parse2(output)
        .with_context(|| format!("Failed to parse generated code for {}", entity.qualified_name))?;
    Ok(GeneratedUnit {
        entity: entity.qualified_name.clone(),
        module_name: module_name(&entity.simple_name),
        source: prettyplease::unparse(&syntax_tree),
    })
}

/// Renders the `mod.rs` declaring every generated unit.
pub fn emit_mod_file(units: &[GeneratedUnit]) -> String {
    let mut names: Vec<&str> = units.iter().map(|unit| unit.module_name.as_str()).collect();
    names.sort_unstable();

    let mut content = String::from("//! Auto-generated data-access modules. Do not edit manually.\n\n");
    for name in names {
        content.push_str(&format!("pub mod {name};\n"));
    }
    content
}

/// Everything the emitters need to know about the unit being rendered.
pub(crate) struct EmitContext<'a> {
    pub entity: &'a EntityMetadata,
    pub entities: &'a EntityMap,
    pub options: &'a EmitOptions,
    pub columns: ColumnSet,
    pub entity_ty: syn::Path,
    pub row_mapper: Ident,
    pub id_row_mapper: Ident,
    pub dao: Ident,
}

impl<'a> EmitContext<'a> {
    fn new(entity: &'a EntityMetadata, entities: &'a EntityMap, options: &'a EmitOptions) -> Result<Self> {
        let columns = ColumnSet::of(entity);
        if columns.id_columns.is_empty() {
            return Err(ConfigError::EntityWithoutIdentifier {
                entity: entity.qualified_name.clone(),
            }
            .into());
        }
        let name = &entity.simple_name;
        Ok(Self {
            entity,
            entities,
            options,
            columns,
            entity_ty: parse_path(&entity.qualified_name)?,
            row_mapper: format_ident!("{}RowMapper", name),
            id_row_mapper: format_ident!("{}IdRowMapper", name),
            dao: format_ident!("{}Dao", name),
        })
    }

    pub fn getter(&self, property: &'a Property) -> Result<&'a Access> {
        property.getter.as_ref().ok_or_else(|| self.missing_accessor(property, "getter"))
    }

    pub fn setter(&self, property: &'a Property) -> Result<&'a Access> {
        property.setter.as_ref().ok_or_else(|| self.missing_accessor(property, "setter"))
    }

    fn missing_accessor(&self, property: &Property, accessor: &'static str) -> anyhow::Error {
        ConfigError::MissingAccessor {
            entity: self.entity.qualified_name.clone(),
            property: property.path.clone(),
            accessor,
        }
        .into()
    }

    /// The embedded aggregate a nested property lives in.
    pub fn parent_of(&self, nested: &Property) -> Result<&'a Property> {
        nested
            .parent_path()
            .and_then(|parent| self.entity.property(parent))
            .with_context(|| format!("{}: `{}` has no parent aggregate", self.entity.qualified_name, nested.path))
    }

    /// Type path of an embedded aggregate property.
    pub fn aggregate_ty(&self, aggregate: &Property) -> Result<syn::Path> {
        let qualified = aggregate
            .aggregate
            .as_deref()
            .with_context(|| format!("{}: `{}` is not an aggregate", self.entity.qualified_name, aggregate.path))?;
        parse_path(qualified)
    }

    fn target(&self, reference: &ResolvedReference) -> Result<&'a EntityMetadata> {
        self.entities.get(&reference.qualified_name).with_context(|| {
            format!(
                "{}: referenced entity `{}` is not part of this round",
                self.entity.qualified_name, reference.qualified_name
            )
        })
    }

    /// Generated module of a referenced entity.
    pub fn target_module(&self, reference: &ResolvedReference) -> Result<syn::Path> {
        let target = self.target(reference)?;
        parse_path(&format!("{}::{}", self.options.module_path, module_name(&target.simple_name)))
    }

    /// Type path of a referenced entity.
    pub fn target_ty(&self, reference: &ResolvedReference) -> Result<syn::Path> {
        parse_path(&self.target(reference)?.qualified_name)
    }

    pub fn properties(&self) -> impl Iterator<Item = &'a Property> {
        self.entity.properties.values()
    }
}

pub(crate) fn parse_path(text: &str) -> Result<syn::Path> {
    syn::parse_str(text).with_context(|| format!("`{text}` is not a valid path"))
}

/// An identifier for a field or method name, raw if it is a keyword.
pub(crate) fn ident(name: &str) -> Ident {
    syn::parse_str::<Ident>(name).unwrap_or_else(|_| Ident::new_raw(name, Span::call_site()))
}

/// Identifier derived from a property path, e.g. `id_article_id`.
pub(crate) fn path_ident(path: &str) -> Ident {
    ident(&path.replace('.', "_"))
}

/// Row mapper field holding the column name of a property.
pub(crate) fn column_field(path: &str) -> Ident {
    format_ident!("{}_col", path.replace('.', "_"))
}

/// Local holding an embedded aggregate while a row is mapped.
pub(crate) fn aggregate_local(path: &str) -> Ident {
    format_ident!("{}_aggregate", path.replace('.', "_"))
}

/// Reads a property through `receiver`.
pub(crate) fn read_access(access: &Access, receiver: TokenStream) -> TokenStream {
    match access {
        Access::Method(name) => {
            let method = ident(name);
            quote!(#receiver.#method())
        }
        Access::Field(name) => {
            let field = ident(name);
            quote!(#receiver.#field)
        }
    }
}

/// Writes `value` to a property through `receiver`, as a statement.
pub(crate) fn write_access(access: &Access, receiver: TokenStream, value: TokenStream) -> TokenStream {
    match access {
        Access::Method(name) => {
            let method = ident(name);
            quote!(#receiver.#method(#value);)
        }
        Access::Field(name) => {
            let field = ident(name);
            quote!(#receiver.#field = #value;)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_names_are_snake_case() {
        assert_eq!(module_name("OrderItem"), "order_item_dao");
        assert_eq!(module_name("Article"), "article_dao");
    }

    #[test]
    fn keywords_become_raw_identifiers() {
        assert_eq!(ident("type").to_string(), "r#type");
        assert_eq!(path_ident("id.article_id").to_string(), "id_article_id");
        assert_eq!(column_field("id.order_id").to_string(), "id_order_id_col");
    }

    #[test]
    fn mod_file_lists_units_sorted() {
        let unit = |name: &str| GeneratedUnit {
            entity: String::new(),
            module_name: name.to_string(),
            source: String::new(),
        };
        let content = emit_mod_file(&[unit("supplier_dao"), unit("article_dao")]);
        assert!(content.ends_with("pub mod article_dao;\npub mod supplier_dao;\n"));
    }
}
