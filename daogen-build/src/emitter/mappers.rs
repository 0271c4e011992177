//! Row mappers: the full `<Entity>RowMapper` and the identifier-only
//! `<Entity>IdRowMapper` used by referencing entities.

use anyhow::Result;
use proc_macro2::TokenStream;
use quote::quote;

use super::{EmitContext, aggregate_local, column_field, write_access};
use crate::model::{Property, ValueKind};

pub(crate) fn emit_mappers(cx: &EmitContext) -> Result<TokenStream> {
    let row_mapper = emit_row_mapper(cx)?;
    let id_row_mapper = emit_id_row_mapper(cx)?;
    Ok(quote! {
        #row_mapper
        #id_row_mapper
    })
}

fn emit_row_mapper(cx: &EmitContext) -> Result<TokenStream> {
    let entity_ty = &cx.entity_ty;
    let mapper = &cx.row_mapper;
    let properties: Vec<&Property> = cx.properties().collect();
    let columns: Vec<&Property> = properties.iter().copied().filter(|p| p.is_column()).collect();

    let fields = columns.iter().map(|p| column_field(&p.path));
    let inits = columns.iter().map(|p| {
        let field = column_field(&p.path);
        let column = &p.column_name;
        quote!(#field: format!("{}{}", column_prefix, #column),)
    });
    let body = map_body(cx, &properties)?;

    Ok(quote! {
        /// Maps a full row onto the entity. Column names may carry a prefix
        /// so several entities can be read from one joined row.
        #[derive(Debug, Clone)]
        pub struct #mapper {
            column_prefix: String,
            #(#fields: String,)*
        }

        impl #mapper {
            pub fn new() -> Self {
                Self::with_prefix("")
            }

            pub fn with_prefix(prefix: impl Into<String>) -> Self {
                let column_prefix = prefix.into();
                Self {
                    #(#inits)*
                    column_prefix,
                }
            }

            pub fn column_prefix(&self) -> &str {
                &self.column_prefix
            }
        }

        impl Default for #mapper {
            fn default() -> Self {
                Self::new()
            }
        }

        impl RowMapper<#entity_ty> for #mapper {
            fn map_row(&self, row: &dyn Row) -> DaoResult<#entity_ty> {
                let mut entity = <#entity_ty>::default();
                #body
                Ok(entity)
            }
        }
    })
}

fn emit_id_row_mapper(cx: &EmitContext) -> Result<TokenStream> {
    let entity_ty = &cx.entity_ty;
    let mapper = &cx.id_row_mapper;
    let properties: Vec<&Property> = cx.properties().filter(|p| p.id).collect();
    let columns: Vec<&Property> = properties.iter().copied().filter(|p| p.is_column()).collect();

    let fields: Vec<_> = columns.iter().map(|p| column_field(&p.path)).collect();
    let defaults = columns.iter().map(|p| &p.column_name);
    let body = map_body(cx, &properties)?;

    Ok(quote! {
        /// Maps the identifier columns only; yields `None` when every
        /// identifier is NULL.
        #[derive(Debug, Clone)]
        pub struct #mapper {
            #(#fields: String,)*
        }

        impl #mapper {
            pub fn new() -> Self {
                Self::with_columns(#(#defaults),*)
            }

            pub fn with_columns(#(#fields: impl Into<String>),*) -> Self {
                Self {
                    #(#fields: #fields.into(),)*
                }
            }
        }

        impl Default for #mapper {
            fn default() -> Self {
                Self::new()
            }
        }

        impl RowMapper<Option<#entity_ty>> for #mapper {
            fn map_row(&self, row: &dyn Row) -> DaoResult<Option<#entity_ty>> {
                let mut entity = <#entity_ty>::default();
                #body
                Ok(if has_id(&entity) { Some(entity) } else { None })
            }
        }
    })
}

/// Statements filling `entity` from `row` for the given properties.
///
/// Embedded aggregates are created first, their nested fields are set
/// alongside the other properties, and the aggregates are written back last.
fn map_body(cx: &EmitContext, properties: &[&Property]) -> Result<TokenStream> {
    let mut declare = Vec::new();
    let mut assign = Vec::new();
    let mut write_back = Vec::new();

    for property in properties {
        if property.is_aggregate() {
            let local = aggregate_local(&property.path);
            let aggregate_ty = cx.aggregate_ty(property)?;
            declare.push(quote!(let mut #local = <#aggregate_ty>::default();));
            write_back.push(write_access(cx.setter(property)?, quote!(entity), quote!(Some(#local))));
            continue;
        }
        if !property.is_column() {
            continue;
        }

        let value = read_column(cx, property)?;
        let receiver = match property.parent_path() {
            Some(parent) => {
                let local = aggregate_local(parent);
                quote!(#local)
            }
            None => quote!(entity),
        };
        assign.push(write_access(cx.setter(property)?, receiver, value));
    }

    Ok(quote! {
        #(#declare)*
        #(#assign)*
        #(#write_back)*
    })
}

/// Expression reading one property value from `row`.
fn read_column(cx: &EmitContext, property: &Property) -> Result<TokenStream> {
    let field = column_field(&property.path);

    if let Some(reference) = &property.reference {
        let target_module = cx.target_module(reference)?;
        let target_mapper = quote::format_ident!("{}IdRowMapper", reference.simple_name);
        return Ok(quote! {
            #target_module::#target_mapper::with_columns(self.#field.as_str()).map_row(row)?
        });
    }

    let getter = match property.ty.kind {
        ValueKind::Text => quote!(get_string),
        ValueKind::Bool => quote!(get_bool),
        ValueKind::I16 => quote!(get_i16),
        ValueKind::I32 => quote!(get_i32),
        ValueKind::I64 => quote!(get_i64),
        ValueKind::F32 => quote!(get_f32),
        ValueKind::F64 => quote!(get_f64),
        ValueKind::Decimal => quote!(get_decimal),
        ValueKind::Opaque => return Ok(quote!(FromValue::from_value(row.get_value(&self.#field)?)?)),
    };
    if property.ty.optional {
        Ok(quote!(row.#getter(&self.#field)?))
    } else {
        Ok(quote!(row.#getter(&self.#field)?.unwrap_or_default()))
    }
}
